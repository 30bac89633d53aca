//! One-time setup of the horizontal panel timeline.

use tracing::{debug, info};

use crate::config::PanelConfig;
use crate::runtime::{Capability, CapabilityRegistry, CapabilitySet, TimelineSpec, TweenHandle};
use crate::Result;

/// Capabilities the panel effect needs before setup can run.
pub fn required_capabilities() -> CapabilitySet {
    [Capability::Core, Capability::Triggers].into_iter().collect()
}

/// Create the scrubbed horizontal timeline for the configured container.
///
/// Each panel shifts the content by a full viewport width, so the total
/// shift is `-100 * (count - 1)` percent. A container with no panels skips
/// the effect entirely rather than producing a degenerate timeline.
pub fn setup(registry: &CapabilityRegistry, config: &PanelConfig) -> Result<Option<TweenHandle>> {
    let core = registry.core()?;
    core.register_plugin(Capability::Triggers)?;

    let triggers = registry.triggers()?;
    let count = triggers.panel_count(&config.container, &config.item_selector)?;
    if count == 0 {
        debug!(container = %config.container, "No panels found, skipping horizontal scroll");
        return Ok(None);
    }

    let spec = TimelineSpec {
        container: config.container.clone(),
        item_selector: config.item_selector.clone(),
        x_percent: -100.0 * (count as f64 - 1.0),
        pin: config.pin,
        scrub: config.scrub,
        end_offset: config.end_offset,
        markers: config.markers,
    };
    let handle = triggers.create_timeline(&spec)?;

    info!(
        container = %handle.container,
        panels = count,
        "Horizontal panel timeline created"
    );
    Ok(Some(handle))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::runtime::providers::SimRuntime;

    fn registry_with(runtime: &Arc<SimRuntime>) -> CapabilityRegistry {
        let registry = CapabilityRegistry::new();
        registry.install_core(runtime.clone());
        registry.install_triggers(runtime.clone());
        registry
    }

    #[test]
    fn test_shift_scales_with_panel_count() {
        let runtime = Arc::new(SimRuntime::with_panel_count(5));
        let registry = registry_with(&runtime);

        let handle = setup(&registry, &PanelConfig::default()).unwrap().unwrap();
        assert_eq!(handle.panel_count, 5);

        let spec = runtime.last_timeline_spec().unwrap();
        assert_eq!(spec.x_percent, -400.0);
        assert!(spec.pin);
        assert_eq!(spec.scrub, 2.0);
        assert_eq!(spec.end_offset, 10000);
        assert!(!spec.markers);
    }

    #[test]
    fn test_single_panel_does_not_shift() {
        let runtime = Arc::new(SimRuntime::with_panel_count(1));
        let registry = registry_with(&runtime);

        setup(&registry, &PanelConfig::default()).unwrap().unwrap();
        assert_eq!(runtime.last_timeline_spec().unwrap().x_percent, 0.0);
    }

    #[test]
    fn test_empty_container_skips_effect() {
        let runtime = Arc::new(SimRuntime::with_panel_count(0));
        let registry = registry_with(&runtime);

        let handle = setup(&registry, &PanelConfig::default()).unwrap();
        assert!(handle.is_none());
        assert_eq!(runtime.timeline_calls(), 0);
    }

    #[test]
    fn test_does_not_need_smoothing_binding() {
        let runtime = Arc::new(SimRuntime::new());
        let registry = registry_with(&runtime);

        assert!(setup(&registry, &PanelConfig::default()).unwrap().is_some());
        assert!(!required_capabilities().contains(Capability::Smoothing));
    }
}
