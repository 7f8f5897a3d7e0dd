use thiserror::Error;

/// Errors the collector itself can raise (spec §4.1, §7 `^rt-*-error`
/// family as far as it concerns the allocator).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GcError {
    /// A heap reference did not resolve to a live (non-free) slot — either
    /// stale, or a use-after-collection bug in the caller.
    #[error("stale or invalid heap reference")]
    StaleReference,
}
