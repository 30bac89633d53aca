use crate::runtime::{SmootherHandle, TweenHandle};

/// Owner of the per-page setup state.
///
/// Holds an explicit `initialized` flag and the handles returned by the
/// runtime factories, so later code can inspect the active sessions without
/// reaching into ambient globals.
#[derive(Debug, Default)]
pub struct PageController {
    initialized: bool,
    smoother: Option<SmootherHandle>,
    panel_tween: Option<TweenHandle>,
}

impl PageController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the one-time setup has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The active smoothing session, if setup created one.
    pub fn smoother(&self) -> Option<&SmootherHandle> {
        self.smoother.as_ref()
    }

    /// The active panel timeline, if setup created one.
    pub fn panel_tween(&self) -> Option<&TweenHandle> {
        self.panel_tween.as_ref()
    }

    pub(crate) fn store_smoother(&mut self, handle: SmootherHandle) {
        self.smoother = Some(handle);
    }

    pub(crate) fn store_panel_tween(&mut self, handle: TweenHandle) {
        self.panel_tween = Some(handle);
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_uninitialized_and_empty() {
        let controller = PageController::new();
        assert!(!controller.is_initialized());
        assert!(controller.smoother().is_none());
        assert!(controller.panel_tween().is_none());
    }

    #[test]
    fn test_stored_handle_is_untouched() {
        let mut controller = PageController::new();
        let handle = SmootherHandle::new("#smooth-wrapper");
        let id = handle.id;

        controller.store_smoother(handle);
        controller.mark_initialized();

        assert!(controller.is_initialized());
        assert_eq!(controller.smoother().unwrap().id, id);
    }
}
