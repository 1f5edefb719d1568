//! Error types for threshold BLS operations.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced to callers of the threshold layer.
///
/// Signature verification never produces one of these: an invalid signature
/// simply verifies `false`.
#[derive(Debug, Error)]
pub enum Error {
    /// A limb array had the wrong number of words for the scalar field.
    #[error("bad size ({actual}), expected size {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A byte buffer or text string does not encode a valid element.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// An operation that needs at least one input received none.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// Value and id vectors passed to a recovery have different lengths.
    #[error("mismatched value and id counts: {values} != {ids}")]
    LengthMismatch { values: usize, ids: usize },

    /// Id zero collides with the constant term of the sharing polynomial.
    #[error("id at index {index} is zero")]
    ZeroId { index: usize },

    /// The same id appears twice in an interpolation set.
    #[error("duplicate id at index {index}")]
    DuplicateId { index: usize },

    /// Fewer shares than the threshold were supplied.
    #[error("insufficient shares: need {required}, got {got}")]
    InsufficientShares { required: usize, got: usize },

    /// Threshold parameters outside `1 <= threshold <= participants`.
    #[error("invalid threshold {threshold} for {participants} participants")]
    InvalidThreshold { threshold: usize, participants: usize },
}

/// Reasons a wire or text encoding was rejected.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("value is not below the group order")]
    OutOfRange,

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid base-{radix} number")]
    InvalidNumber { radix: u32 },

    #[error("invalid point encoding: {0}")]
    InvalidPoint(String),

    #[error("point is not in the prime-order subgroup")]
    NotInGroup,
}
