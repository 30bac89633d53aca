use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::WaitMode;
use crate::runtime::{SmootherHandle, TweenHandle};

/// Diagnostic summary of one bootstrap run.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    /// Wait strategy the guard used
    pub mode: WaitMode,
    /// Readiness checks performed, including the one that succeeded
    pub attempts: u64,
    /// When the guard started waiting
    pub started_at: DateTime<Utc>,
    /// When setup completed
    pub ready_at: DateTime<Utc>,
    /// The stored smoothing session, if the effect is enabled
    pub smoother: Option<SmootherHandle>,
    /// The stored panel timeline, if the effect is enabled and applicable
    pub panel_tween: Option<TweenHandle>,
}

impl BootstrapReport {
    /// Total time from first wait to setup completion.
    pub fn elapsed(&self) -> chrono::Duration {
        self.ready_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_handle_ids() {
        let smoother = SmootherHandle::new("#smooth-wrapper");
        let report = BootstrapReport {
            mode: WaitMode::Poll,
            attempts: 3,
            started_at: Utc::now(),
            ready_at: Utc::now(),
            smoother: Some(smoother.clone()),
            panel_tween: None,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["mode"], "poll");
        assert_eq!(value["attempts"], 3);
        assert_eq!(value["smoother"]["id"], smoother.id.to_string());
        assert!(value["panel_tween"].is_null());
    }
}
