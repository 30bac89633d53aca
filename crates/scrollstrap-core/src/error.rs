use thiserror::Error;

use crate::runtime::Capability;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Capability not loaded: {0}")]
    CapabilityMissing(Capability),

    #[error("Plugin registration failed: {0}")]
    PluginRegistration(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Gave up waiting for capabilities after {0} attempts")]
    AttemptsExhausted(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
