use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A slot operation ran outside `Scheduler::repose`.
    #[error("no composition is active on this thread")]
    NotComposing,
    #[error("scheduler was unmounted after {frames} frame(s)")]
    Unmounted { frames: u64 },
}
