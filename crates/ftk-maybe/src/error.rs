use thiserror::Error;

/// Errors produced by optional-value operations.
///
/// Everything here signals a programming error, not a recoverable runtime
/// condition: callers that go through [`Maybe::fold`](crate::Maybe::fold)
/// never see these.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MaybeError {
    /// A read or narrowing was attempted on an absent value.
    #[error("value is absent")]
    Absent,
}
