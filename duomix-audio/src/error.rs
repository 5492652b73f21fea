use thiserror::Error;

/// Failure taxonomy surfaced by the downmix engine. Every failure is local,
/// synchronous and non-fatal; retrying is the host's responsibility after
/// reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("illegal argument: {0}")]
    IllegalArgument(&'static str),

    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    #[error("illegal lifecycle transition: {0}")]
    Lifecycle(&'static str),
}
