use thiserror::Error;

/// Typed failures raised by checked access and visitation.
///
/// Builder failures (`try_set`, `try_emplace`, `try_with`) are *not* part of
/// this taxonomy: the caller's own error type propagates through those
/// operations unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A `get`-style accessor named an alternative that is not live,
    /// including the valueless case.
    #[error("variant does not hold the requested alternative")]
    BadAlternativeAccess,
    /// A visitation was attempted while at least one argument variant was
    /// valueless.
    #[error("cannot visit a valueless variant")]
    ValuelessVisit,
}
