//! One-time setup of the smoothed-scrolling session.

use tracing::info;

use crate::config::SmootherConfig;
use crate::runtime::{Capability, CapabilityRegistry, CapabilitySet, SmootherHandle, SmootherSpec};
use crate::Result;

/// Capabilities the smoothing effect needs before setup can run.
pub fn required_capabilities() -> CapabilitySet {
    CapabilitySet::all()
}

fn spec_from(config: &SmootherConfig) -> SmootherSpec {
    SmootherSpec {
        wrapper: config.wrapper.clone(),
        content: config.content.clone(),
        smooth: config.smooth,
        smooth_touch: config.smooth_touch,
        effects: config.effects,
        normalize_scroll: config.normalize_scroll.enabled,
        allow_nested_scroll: config.normalize_scroll.allow_nested_scroll,
        ignore_mobile_resize: config.ignore_mobile_resize,
    }
}

/// Register the plugins the session depends on, then create it.
///
/// The returned handle is passed through exactly as the factory produced it.
pub fn setup(registry: &CapabilityRegistry, config: &SmootherConfig) -> Result<SmootherHandle> {
    let core = registry.core()?;
    core.register_plugin(Capability::Triggers)?;
    core.register_plugin(Capability::Smoothing)?;

    let factory = registry.smoothing()?;
    let handle = factory.create_smoother(&spec_from(config))?;

    info!(
        wrapper = %handle.wrapper,
        smooth = config.smooth,
        "Scroll smoothing session created"
    );
    Ok(handle)
}
