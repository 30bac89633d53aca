//! In-process stand-in for the external animation runtime.
//!
//! `SimRuntime` answers all three binding surfaces and records every call so
//! tests and the demo binary can assert on what the glue actually did.
//! `SimLoader` installs the bindings into a registry on a per-capability
//! delay schedule, mimicking scripts arriving in arbitrary order.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info};

use crate::{Error, Result};

use crate::runtime::{
    Capability, CapabilityLoader, CapabilityRegistry, PluginHost, SmootherFactory, SmootherHandle,
    SmootherSpec, TimelineSpec, TriggerFactory, TweenHandle,
};

#[derive(Default)]
struct SimState {
    registered_plugins: Vec<Capability>,
    smoother_calls: Vec<SmootherSpec>,
    timeline_calls: Vec<TimelineSpec>,
    issued_smoothers: Vec<SmootherHandle>,
    issued_tweens: Vec<TweenHandle>,
    fail_smoother: Option<String>,
    fail_timeline: Option<String>,
}

/// Scripted runtime implementation for tests and the demo binary.
pub struct SimRuntime {
    panel_count: usize,
    state: Mutex<SimState>,
}

impl SimRuntime {
    pub fn new() -> Self {
        Self::with_panel_count(4)
    }

    /// Runtime whose trigger factory reports `count` panels under any
    /// container it is asked about.
    pub fn with_panel_count(count: usize) -> Self {
        Self {
            panel_count: count,
            state: Mutex::new(SimState::default()),
        }
    }

    /// Make the next smoother creation fail with the given message.
    /// Cleared once it has fired.
    pub fn fail_next_smoother(&self, message: impl Into<String>) {
        self.lock().fail_smoother = Some(message.into());
    }

    /// Make the next timeline creation fail with the given message.
    pub fn fail_next_timeline(&self, message: impl Into<String>) {
        self.lock().fail_timeline = Some(message.into());
    }

    /// Plugins registered so far, one entry per plugin.
    pub fn registered_plugins(&self) -> Vec<Capability> {
        self.lock().registered_plugins.clone()
    }

    /// Number of smoother factory invocations.
    pub fn smoother_calls(&self) -> usize {
        self.lock().smoother_calls.len()
    }

    /// Number of timeline factory invocations.
    pub fn timeline_calls(&self) -> usize {
        self.lock().timeline_calls.len()
    }

    /// The spec passed to the most recent smoother creation.
    pub fn last_smoother_spec(&self) -> Option<SmootherSpec> {
        self.lock().smoother_calls.last().cloned()
    }

    /// The spec passed to the most recent timeline creation.
    pub fn last_timeline_spec(&self) -> Option<TimelineSpec> {
        self.lock().timeline_calls.last().cloned()
    }

    /// The handle returned by the most recent smoother creation.
    pub fn last_issued_smoother(&self) -> Option<SmootherHandle> {
        self.lock().issued_smoothers.last().cloned()
    }

    /// The handle returned by the most recent timeline creation.
    pub fn last_issued_tween(&self) -> Option<TweenHandle> {
        self.lock().issued_tweens.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SimRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginHost for SimRuntime {
    fn register_plugin(&self, plugin: Capability) -> Result<()> {
        let mut state = self.lock();
        if !state.registered_plugins.contains(&plugin) {
            state.registered_plugins.push(plugin);
            debug!(plugin = %plugin, "Plugin registered");
        }
        Ok(())
    }
}

impl TriggerFactory for SimRuntime {
    fn panel_count(&self, _container: &str, _item_selector: &str) -> Result<usize> {
        Ok(self.panel_count)
    }

    fn create_timeline(&self, spec: &TimelineSpec) -> Result<TweenHandle> {
        let mut state = self.lock();
        if let Some(message) = state.fail_timeline.take() {
            return Err(Error::Runtime(message));
        }
        state.timeline_calls.push(spec.clone());
        let handle = TweenHandle::new(spec.container.clone(), self.panel_count);
        state.issued_tweens.push(handle.clone());
        Ok(handle)
    }
}

impl SmootherFactory for SimRuntime {
    fn create_smoother(&self, spec: &SmootherSpec) -> Result<SmootherHandle> {
        let mut state = self.lock();
        if let Some(message) = state.fail_smoother.take() {
            return Err(Error::Runtime(message));
        }
        state.smoother_calls.push(spec.clone());
        let handle = SmootherHandle::new(spec.wrapper.clone());
        state.issued_smoothers.push(handle.clone());
        Ok(handle)
    }
}

/// Per-capability install schedule.
#[derive(Debug, Clone, Copy)]
enum Arrival {
    After(Duration),
    Never,
}

/// Loader that installs a `SimRuntime`'s bindings on a delay schedule.
pub struct SimLoader {
    runtime: Arc<SimRuntime>,
    schedule: Vec<(Capability, Arrival)>,
}

impl SimLoader {
    /// All capabilities available immediately.
    pub fn immediate(runtime: Arc<SimRuntime>) -> Self {
        let schedule = Capability::ALL
            .into_iter()
            .map(|capability| (capability, Arrival::After(Duration::ZERO)))
            .collect();
        Self { runtime, schedule }
    }

    /// Install the capability after the given delay.
    pub fn delay(mut self, capability: Capability, delay: Duration) -> Self {
        self.set(capability, Arrival::After(delay));
        self
    }

    /// Never install the capability.
    pub fn withhold(mut self, capability: Capability) -> Self {
        self.set(capability, Arrival::Never);
        self
    }

    fn set(&mut self, capability: Capability, arrival: Arrival) {
        self.schedule.retain(|(c, _)| *c != capability);
        self.schedule.push((capability, arrival));
    }

    fn install(&self, registry: &CapabilityRegistry, capability: Capability) {
        match capability {
            Capability::Core => registry.install_core(self.runtime.clone()),
            Capability::Triggers => registry.install_triggers(self.runtime.clone()),
            Capability::Smoothing => registry.install_smoothing(self.runtime.clone()),
        }
    }
}

#[async_trait::async_trait]
impl CapabilityLoader for SimLoader {
    async fn load(&self, registry: CapabilityRegistry) -> Result<()> {
        let mut pending: Vec<(Capability, Duration)> = self
            .schedule
            .iter()
            .filter_map(|(capability, arrival)| match arrival {
                Arrival::After(delay) => Some((*capability, *delay)),
                Arrival::Never => {
                    info!(capability = %capability, "Capability withheld, never installing");
                    None
                }
            })
            .collect();
        pending.sort_by_key(|(_, delay)| *delay);

        let mut elapsed = Duration::ZERO;
        for (capability, delay) in pending {
            if delay > elapsed {
                tokio::time::sleep(delay - elapsed).await;
                elapsed = delay;
            }
            self.install(&registry, capability);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_registration_is_idempotent() {
        let runtime = SimRuntime::new();
        runtime.register_plugin(Capability::Triggers).unwrap();
        runtime.register_plugin(Capability::Triggers).unwrap();
        runtime.register_plugin(Capability::Smoothing).unwrap();

        assert_eq!(
            runtime.registered_plugins(),
            vec![Capability::Triggers, Capability::Smoothing]
        );
    }

    #[test]
    fn test_scripted_smoother_failure_fires_once() {
        let runtime = SimRuntime::new();
        runtime.fail_next_smoother("driver exploded");

        let spec = SmootherSpec {
            wrapper: "#smooth-wrapper".to_string(),
            content: "#smooth-content".to_string(),
            smooth: 1.5,
            smooth_touch: 0.1,
            effects: true,
            normalize_scroll: true,
            allow_nested_scroll: true,
            ignore_mobile_resize: true,
        };

        assert!(matches!(
            runtime.create_smoother(&spec),
            Err(Error::Runtime(_))
        ));
        assert_eq!(runtime.smoother_calls(), 0);

        // Fault cleared after firing
        let handle = runtime.create_smoother(&spec).unwrap();
        assert_eq!(handle.wrapper, "#smooth-wrapper");
        assert_eq!(runtime.smoother_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loader_installs_on_schedule() {
        let runtime = Arc::new(SimRuntime::new());
        let registry = CapabilityRegistry::new();

        let loader = SimLoader::immediate(runtime)
            .delay(Capability::Smoothing, Duration::from_millis(250))
            .withhold(Capability::Triggers);

        loader.load(registry.clone()).await.unwrap();

        let loaded = registry.loaded();
        assert!(loaded.contains(Capability::Core));
        assert!(loaded.contains(Capability::Smoothing));
        assert!(!loaded.contains(Capability::Triggers));
    }
}
