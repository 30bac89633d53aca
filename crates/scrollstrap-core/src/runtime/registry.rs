use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::debug;

use crate::{Error, Result};

use super::{Capability, CapabilitySet, PluginHost, SmootherFactory, TriggerFactory};

#[derive(Default)]
struct Bindings {
    core: Option<Arc<dyn PluginHost>>,
    triggers: Option<Arc<dyn TriggerFactory>>,
    smoothing: Option<Arc<dyn SmootherFactory>>,
}

impl Bindings {
    fn loaded(&self) -> CapabilitySet {
        let mut set = CapabilitySet::EMPTY;
        if self.core.is_some() {
            set.insert(Capability::Core);
        }
        if self.triggers.is_some() {
            set.insert(Capability::Triggers);
        }
        if self.smoothing.is_some() {
            set.insert(Capability::Smoothing);
        }
        set
    }
}

/// Process-wide table of runtime bindings.
///
/// An asynchronous loader installs bindings as they become available, in any
/// order; the guard observes the loaded set either by snapshot (`loaded`) or
/// by change subscription (`subscribe`). Installing a capability again
/// replaces the binding without double-counting it.
#[derive(Clone)]
pub struct CapabilityRegistry {
    inner: Arc<Inner>,
}

struct Inner {
    // Never held across an await point
    bindings: RwLock<Bindings>,
    loaded_tx: watch::Sender<CapabilitySet>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        let (loaded_tx, _rx) = watch::channel(CapabilitySet::EMPTY);
        Self {
            inner: Arc::new(Inner {
                bindings: RwLock::new(Bindings::default()),
                loaded_tx,
            }),
        }
    }

    /// Snapshot of the currently loaded capabilities.
    pub fn loaded(&self) -> CapabilitySet {
        *self.inner.loaded_tx.borrow()
    }

    /// Subscribe to loaded-set changes.
    pub fn subscribe(&self) -> watch::Receiver<CapabilitySet> {
        self.inner.loaded_tx.subscribe()
    }

    pub fn install_core(&self, binding: Arc<dyn PluginHost>) {
        self.install(Capability::Core, |b| b.core = Some(binding));
    }

    pub fn install_triggers(&self, binding: Arc<dyn TriggerFactory>) {
        self.install(Capability::Triggers, |b| b.triggers = Some(binding));
    }

    pub fn install_smoothing(&self, binding: Arc<dyn SmootherFactory>) {
        self.install(Capability::Smoothing, |b| b.smoothing = Some(binding));
    }

    fn install(&self, capability: Capability, write: impl FnOnce(&mut Bindings)) {
        let loaded = {
            let mut bindings = self
                .inner
                .bindings
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            write(&mut bindings);
            bindings.loaded()
        };
        debug!(capability = %capability, loaded = %loaded, "Capability installed");
        self.inner.loaded_tx.send_if_modified(|current| {
            if *current == loaded {
                false
            } else {
                *current = loaded;
                true
            }
        });
    }

    /// The plugin-registration entry point, if installed.
    pub fn core(&self) -> Result<Arc<dyn PluginHost>> {
        self.read(|b| b.core.clone())
            .ok_or(Error::CapabilityMissing(Capability::Core))
    }

    /// The scroll-trigger factory, if installed.
    pub fn triggers(&self) -> Result<Arc<dyn TriggerFactory>> {
        self.read(|b| b.triggers.clone())
            .ok_or(Error::CapabilityMissing(Capability::Triggers))
    }

    /// The scroll-smoothing factory, if installed.
    pub fn smoothing(&self) -> Result<Arc<dyn SmootherFactory>> {
        self.read(|b| b.smoothing.clone())
            .ok_or(Error::CapabilityMissing(Capability::Smoothing))
    }

    fn read<T>(&self, get: impl FnOnce(&Bindings) -> Option<T>) -> Option<T> {
        let bindings = self
            .inner
            .bindings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        get(&bindings)
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
