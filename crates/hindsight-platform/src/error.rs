use hindsight_core::RuntimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no control labelled or identified as '{0}' in the current frame")]
    NoSuchTarget(String),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
