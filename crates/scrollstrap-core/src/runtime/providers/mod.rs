mod sim;

pub use sim::{SimLoader, SimRuntime};
