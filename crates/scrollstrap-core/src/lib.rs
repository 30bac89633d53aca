pub mod bootstrap;
pub mod config;
pub mod effects;
pub mod error;
pub mod host;
pub mod runtime;

pub use bootstrap::{BootstrapGuard, BootstrapReport, GuardEvent, Outcome, PageController};
pub use config::{AppConfig, WaitMode};
pub use error::{Error, Result};
pub use host::{HostDocument, ReadyState};
pub use runtime::{Capability, CapabilityRegistry, CapabilitySet};
