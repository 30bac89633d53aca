pub mod controller;
pub mod guard;
pub mod report;

pub use controller::PageController;
pub use guard::{BootstrapGuard, GuardEvent, Outcome, Probe};
pub use report::BootstrapReport;
