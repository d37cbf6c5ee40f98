//! Core record model for coursewatch.
//!
//! This crate defines the two value types the rest of the workspace is
//! built on:
//! - [`Offering`], one catalog entry, with the equality and ordering rules
//!   the reconciliation engine depends on
//! - [`Snapshot`], an ordered capture of the catalog at one point in time,
//!   with its JSON wire format
//!
//! Everything here is pure and synchronous. Acquisition, persistence and
//! notification live in their own crates.

mod offering;
mod snapshot;

pub use offering::Offering;
pub use snapshot::Snapshot;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors that can occur while decoding snapshot text.
///
/// A malformed snapshot means the persisted state is corrupt; callers are
/// expected to stop the cycle rather than continue with partial data.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot text is not a JSON array of objects.
    #[error("malformed snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// An offering record lacks one of the required keys.
    #[error("offering record is missing required field `{0}`")]
    MissingField(&'static str),

    /// An offering field is present but not a string.
    #[error("offering field `{0}` is not a string")]
    InvalidField(&'static str),
}
