use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tokio::sync::{mpsc, watch};
use tracing::info;

use scrollstrap_core::{
    bootstrap::{BootstrapGuard, GuardEvent, Outcome},
    runtime::{providers::{SimLoader, SimRuntime}, CapabilityLoader},
    AppConfig, Capability, CapabilityRegistry, HostDocument, ReadyState, WaitMode,
};

#[derive(Args, Default)]
pub struct RunArgs {
    /// Wait strategy while capabilities are missing (poll or subscribe)
    #[arg(long)]
    mode: Option<String>,

    /// Re-check cadence for poll mode, in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Give up after this many readiness checks
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Install a capability after a delay, as name=millis (repeatable)
    #[arg(long = "delay", value_name = "CAP=MS")]
    delays: Vec<String>,

    /// Never install the named capability (repeatable)
    #[arg(long, value_name = "CAP")]
    withhold: Vec<String>,

    /// Panels the simulated runtime reports under the horizontal container
    #[arg(long)]
    panels: Option<usize>,

    /// Delay before the host document becomes interactive, in milliseconds
    #[arg(long)]
    host_delay_ms: Option<u64>,

    /// Print the bootstrap report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_wait_mode(s: &str) -> Result<WaitMode> {
    match s {
        "poll" => Ok(WaitMode::Poll),
        "subscribe" => Ok(WaitMode::Subscribe),
        other => Err(anyhow!(
            "unknown wait mode '{}' (expected poll or subscribe)",
            other
        )),
    }
}

fn parse_delay(s: &str) -> Result<(Capability, Duration)> {
    let (name, millis) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected CAP=MS, got '{}'", s))?;
    let capability: Capability = name.parse()?;
    let millis: u64 = millis
        .parse()
        .with_context(|| format!("invalid delay '{}'", millis))?;
    Ok((capability, Duration::from_millis(millis)))
}

pub async fn run(mut config: AppConfig, args: RunArgs) -> Result<()> {
    if let Some(ref mode) = args.mode {
        config.bootstrap.mode = parse_wait_mode(mode)?;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.bootstrap.poll_interval_ms = interval_ms;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.bootstrap.max_attempts = Some(max_attempts);
    }

    // Simulated runtime plus an install schedule built from the flags
    let runtime = Arc::new(SimRuntime::with_panel_count(args.panels.unwrap_or(4)));
    let mut loader = SimLoader::immediate(runtime.clone());
    for entry in &args.delays {
        let (capability, delay) = parse_delay(entry)?;
        loader = loader.delay(capability, delay);
    }
    for name in &args.withhold {
        loader = loader.withhold(name.parse::<Capability>()?);
    }

    let registry = CapabilityRegistry::new();
    tokio::spawn({
        let registry = registry.clone();
        async move {
            if let Err(e) = loader.load(registry).await {
                tracing::error!("Capability loader failed: {}", e);
            }
        }
    });

    // Host readiness, optionally delayed to exercise the deferral path
    let host_delay = args.host_delay_ms.unwrap_or(0);
    let host = if host_delay == 0 {
        HostDocument::new(ReadyState::Interactive)
    } else {
        let host = HostDocument::new(ReadyState::Loading);
        tokio::spawn({
            let host = host.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(host_delay)).await;
                host.mark_interactive();
            }
        });
        host
    };

    // Setup signal handler for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let mut guard = BootstrapGuard::new(registry, host, config);

    // Progress lines on stdout unless the output is the JSON report
    if !args.json {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        guard = guard.with_event_sender(event_tx);
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                match event {
                    GuardEvent::Deferred { state } => {
                        println!("Host is {}, deferring first check...", state);
                    }
                    GuardEvent::Waiting { attempt, missing } => {
                        println!("Check {}: waiting for {}", attempt, missing);
                    }
                    GuardEvent::Initialized { attempts } => {
                        println!("Setup complete after {} check(s).", attempts);
                    }
                }
            }
        });
    }

    match guard.run(shutdown_rx).await? {
        Outcome::Completed(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("\nScroll effects initialized ({} mode)", match report.mode {
                    WaitMode::Poll => "poll",
                    WaitMode::Subscribe => "subscribe",
                });
                println!("  checks:   {}", report.attempts);
                println!("  elapsed:  {} ms", report.elapsed().num_milliseconds());
                if let Some(ref smoother) = report.smoother {
                    println!("  smoother: {} ({})", smoother.id, smoother.wrapper);
                }
                if let Some(ref tween) = report.panel_tween {
                    println!(
                        "  panels:   {} ({}, {} panels)",
                        tween.id, tween.container, tween.panel_count
                    );
                }
            }
        }
        Outcome::AlreadyInitialized => {
            println!("Setup had already run; nothing to do.");
        }
        Outcome::Shutdown => {
            println!("Interrupted before setup could run.");
        }
    }

    Ok(())
}
