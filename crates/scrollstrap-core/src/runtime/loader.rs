use crate::Result;

use super::CapabilityRegistry;

/// Source of runtime bindings that arrive asynchronously.
///
/// A loader installs capabilities into the registry as they become
/// available; ordering and timing are the loader's business. The guard never
/// drives a loader directly, it only watches the registry.
#[async_trait::async_trait]
pub trait CapabilityLoader: Send + Sync {
    /// Install bindings into the registry until the loader has nothing left
    /// to deliver. Capabilities the loader cannot supply are simply never
    /// installed.
    async fn load(&self, registry: CapabilityRegistry) -> Result<()>;
}
