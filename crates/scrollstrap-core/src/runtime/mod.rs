pub mod capability;
pub mod handle;
pub mod loader;
pub mod providers;
pub mod registry;

pub use capability::{Capability, CapabilitySet};
pub use handle::{SmootherHandle, TweenHandle};
pub use loader::CapabilityLoader;
pub use registry::CapabilityRegistry;

use crate::Result;

/// Parameters for a smoothed-scrolling session, as handed to the runtime's
/// smoothing factory. Mirrors the declarative configuration one-to-one; the
/// glue never interprets these values.
#[derive(Debug, Clone, PartialEq)]
pub struct SmootherSpec {
    pub wrapper: String,
    pub content: String,
    pub smooth: f64,
    pub smooth_touch: f64,
    pub effects: bool,
    pub normalize_scroll: bool,
    pub allow_nested_scroll: bool,
    pub ignore_mobile_resize: bool,
}

/// Parameters for a scroll-driven horizontal panel timeline.
///
/// `x_percent` is the total horizontal shift applied across the scrubbed
/// range, already computed from the panel count.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSpec {
    pub container: String,
    pub item_selector: String,
    pub x_percent: f64,
    pub pin: bool,
    pub scrub: f64,
    pub end_offset: u32,
    pub markers: bool,
}

/// Plugin-registration entry point of the runtime core.
pub trait PluginHost: Send + Sync {
    /// Register a plugin extension with the runtime core.
    /// Registering the same plugin twice is a no-op.
    fn register_plugin(&self, plugin: Capability) -> Result<()>;
}

/// Scroll-trigger factory surface.
pub trait TriggerFactory: Send + Sync {
    /// Number of panel elements under the given container.
    fn panel_count(&self, container: &str, item_selector: &str) -> Result<usize>;

    /// Create a scrubbed timeline bound to the container's scroll position.
    fn create_timeline(&self, spec: &TimelineSpec) -> Result<TweenHandle>;
}

/// Scroll-smoothing factory surface.
pub trait SmootherFactory: Send + Sync {
    /// Create a smoothed-scrolling session for the given wrapper/content pair.
    fn create_smoother(&self, spec: &SmootherSpec) -> Result<SmootherHandle>;
}
