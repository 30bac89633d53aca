use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::{AppConfig, WaitMode};
use crate::effects;
use crate::host::{HostDocument, ReadyState};
use crate::runtime::{CapabilityRegistry, CapabilitySet};
use crate::{Error, Result};

use super::{BootstrapReport, PageController};

/// Events emitted by the guard so embedders can observe its progress
#[derive(Debug, Clone)]
pub enum GuardEvent {
    /// The host is still loading; the first attempt is deferred
    Deferred { state: ReadyState },
    /// A readiness check found capabilities missing
    Waiting {
        attempt: u64,
        missing: CapabilitySet,
    },
    /// Setup completed
    Initialized { attempts: u64 },
}

/// Result of a single readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Setup already ran; nothing was done
    AlreadyInitialized,
    /// The host has not reached an interactive state yet
    HostNotReady(ReadyState),
    /// The named capabilities have not been installed yet
    Missing(CapabilitySet),
    /// All conditions held and setup ran
    Initialized,
}

/// How a guard run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Setup ran during this call
    Completed(BootstrapReport),
    /// Setup had already run before this call
    AlreadyInitialized,
    /// The shutdown signal fired before setup could run
    Shutdown,
}

/// Retry-until-ready initializer for the scroll effects.
///
/// Waits for the host to become interactive, then checks the capability
/// registry until every binding the enabled effects need is installed, then
/// runs the one-time setup and stores the returned handles on the page
/// controller. Setup runs at most once per guard.
pub struct BootstrapGuard {
    registry: CapabilityRegistry,
    host: HostDocument,
    config: AppConfig,
    controller: PageController,
    attempts: u64,
    event_tx: Option<mpsc::UnboundedSender<GuardEvent>>,
}

impl BootstrapGuard {
    pub fn new(registry: CapabilityRegistry, host: HostDocument, config: AppConfig) -> Self {
        Self {
            registry,
            host,
            config,
            controller: PageController::new(),
            attempts: 0,
            event_tx: None,
        }
    }

    /// Set the event sender for progress notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<GuardEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// The page state owned by this guard.
    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    /// Readiness checks performed so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Union of the capabilities the enabled effects need.
    pub fn required_capabilities(&self) -> CapabilitySet {
        let mut required = CapabilitySet::EMPTY;
        if self.config.smoother.enabled {
            required.extend(effects::smoother::required_capabilities().iter());
        }
        if self.config.panels.enabled {
            required.extend(effects::panels::required_capabilities().iter());
        }
        required
    }

    fn send_event(&self, event: GuardEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send guard event: receiver dropped");
            }
        }
    }

    /// Perform a single readiness check, running setup if everything holds.
    ///
    /// A missing capability or a still-loading host is not an error, only a
    /// "not yet". A failure inside setup itself propagates unchanged and
    /// leaves the guard uninitialized, so an explicit re-run may succeed
    /// once the fault is gone.
    pub fn try_init(&mut self) -> Result<Probe> {
        if self.controller.is_initialized() {
            return Ok(Probe::AlreadyInitialized);
        }

        let state = self.host.ready_state();
        if !state.is_ready() {
            return Ok(Probe::HostNotReady(state));
        }

        let missing = self.registry.loaded().missing(self.required_capabilities());
        if !missing.is_empty() {
            return Ok(Probe::Missing(missing));
        }

        if self.config.smoother.enabled {
            let handle = effects::smoother::setup(&self.registry, &self.config.smoother)?;
            self.controller.store_smoother(handle);
        }
        if self.config.panels.enabled {
            if let Some(handle) = effects::panels::setup(&self.registry, &self.config.panels)? {
                self.controller.store_panel_tween(handle);
            }
        }
        self.controller.mark_initialized();
        info!("Scroll effects initialized");
        Ok(Probe::Initialized)
    }

    /// Drive readiness checks until setup runs, the attempt bound is hit, or
    /// the shutdown signal fires.
    ///
    /// The first check is deferred until the host reports ready. After a
    /// check finds capabilities missing, the guard waits according to the
    /// configured mode: a fixed-cadence timer (`poll`) or registry change
    /// notifications (`subscribe`). Without a `max_attempts` bound the wait
    /// is unbounded; a dependency that never loads means the guard waits
    /// forever.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<Outcome> {
        if self.controller.is_initialized() {
            debug!("Setup already ran, nothing to do");
            return Ok(Outcome::AlreadyInitialized);
        }

        let started_at = Utc::now();
        let mode = self.config.bootstrap.mode;

        // Defer the first check until the host is ready
        let mut host_rx = self.host.subscribe();
        while !host_rx.borrow_and_update().is_ready() {
            let state = self.host.ready_state();
            debug!(state = %state, "Host still loading, deferring first check");
            self.send_event(GuardEvent::Deferred { state });
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Bootstrap guard received shutdown signal");
                        return Ok(Outcome::Shutdown);
                    }
                }
                result = host_rx.changed() => {
                    if result.is_err() {
                        return Ok(Outcome::Shutdown);
                    }
                }
            }
        }

        // Subscribe before the first check so no install is missed between
        // a snapshot and the wait that follows it
        let mut registry_rx = self.registry.subscribe();

        let interval_ms = self.config.bootstrap.poll_interval_ms.max(1);
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        // Skip the first tick (fires immediately)
        interval.tick().await;

        loop {
            self.attempts += 1;
            if let Some(max) = self.config.bootstrap.max_attempts {
                if self.attempts > max {
                    warn!(max_attempts = max, "Giving up waiting for capabilities");
                    return Err(Error::AttemptsExhausted(max));
                }
            }

            match self.try_init()? {
                Probe::Initialized => {
                    let attempts = self.attempts;
                    let report = BootstrapReport {
                        mode,
                        attempts,
                        started_at,
                        ready_at: Utc::now(),
                        smoother: self.controller.smoother().cloned(),
                        panel_tween: self.controller.panel_tween().cloned(),
                    };
                    self.send_event(GuardEvent::Initialized { attempts });
                    return Ok(Outcome::Completed(report));
                }
                Probe::AlreadyInitialized => return Ok(Outcome::AlreadyInitialized),
                Probe::HostNotReady(_) | Probe::Missing(_) => {
                    let missing = self.registry.loaded().missing(self.required_capabilities());
                    debug!(
                        attempt = self.attempts,
                        missing = %missing,
                        "Capabilities not ready, waiting"
                    );
                    self.send_event(GuardEvent::Waiting {
                        attempt: self.attempts,
                        missing,
                    });
                }
            }

            match mode {
                WaitMode::Poll => {
                    tokio::select! {
                        result = shutdown.changed() => {
                            if result.is_err() || *shutdown.borrow() {
                                info!("Bootstrap guard received shutdown signal");
                                return Ok(Outcome::Shutdown);
                            }
                        }
                        _ = interval.tick() => {}
                    }
                }
                WaitMode::Subscribe => {
                    tokio::select! {
                        result = shutdown.changed() => {
                            if result.is_err() || *shutdown.borrow() {
                                info!("Bootstrap guard received shutdown signal");
                                return Ok(Outcome::Shutdown);
                            }
                        }
                        result = registry_rx.changed() => {
                            if result.is_err() {
                                return Ok(Outcome::Shutdown);
                            }
                        }
                    }
                }
            }
        }
    }
}
