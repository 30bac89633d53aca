use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle to an active smoothed-scrolling session.
///
/// The glue stores whatever the factory returns without looking inside it;
/// identity is the factory-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmootherHandle {
    pub id: Uuid,
    /// Wrapper element the session was bound to
    pub wrapper: String,
    pub created_at: DateTime<Utc>,
}

impl SmootherHandle {
    pub fn new(wrapper: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            wrapper: wrapper.into(),
            created_at: Utc::now(),
        }
    }
}

/// Opaque handle to a scroll-driven panel timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweenHandle {
    pub id: Uuid,
    /// Container element the timeline is pinned to
    pub container: String,
    /// Number of panels the timeline moves across
    pub panel_count: usize,
    pub created_at: DateTime<Utc>,
}

impl TweenHandle {
    pub fn new(container: impl Into<String>, panel_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            container: container.into(),
            panel_count,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_have_distinct_ids() {
        let a = SmootherHandle::new("#smooth-wrapper");
        let b = SmootherHandle::new("#smooth-wrapper");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_clone_preserves_identity() {
        let handle = TweenHandle::new("#horizontal", 4);
        let copy = handle.clone();
        assert_eq!(copy.id, handle.id);
        assert_eq!(copy, handle);
    }
}
