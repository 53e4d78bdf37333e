//! Error taxonomy for ABI parsing, encoding and decoding.
//!
//! Mirrors `crate::utils::ByteDecodeError`'s use of `failure::Fail`
//! rather than hand-implementing `std::error::Error`.
use failure::Fail;

/// Every way a signature, type expression or argument list can fail to
/// round-trip through the codec.
#[derive(Debug, Fail, PartialEq, Eq, Clone)]
pub enum AbiError {
    /// A `name(t1,t2,...)` signature string could not be parsed.
    #[fail(display = "malformed signature `{}`: {}", signature, reason)]
    MalformedSignature { signature: String, reason: String },

    /// A single type expression (e.g. `uint32`, `fixed128x128`) is not
    /// well-formed or violates the width invariants of the grammar.
    #[fail(display = "invalid type `{}`: {}", type_str, reason)]
    InvalidType { type_str: String, reason: String },

    /// A value doesn't fit the declared width/sign of its type.
    #[fail(display = "value out of range for type `{}`", type_str)]
    OutOfRange { type_str: String },

    /// A `bytes<n>` value is longer than its fixed-width cap.
    #[fail(display = "value too long for type `{}`", type_str)]
    TooLong { type_str: String },

    /// The decoder ran out of bytes before it could finish reading a
    /// value; the most common cause is using the wrong signature for a
    /// given payload.
    #[fail(
        display = "truncated input: expected at least {} bytes, got {}",
        expected, got
    )]
    TruncatedInput { expected: usize, got: usize },

    /// Input handed to a hex-aware decode entry point wasn't valid hex.
    #[fail(display = "invalid hex input")]
    InvalidHex,

    /// A decoded `string` value's bytes were not valid UTF-8.
    #[fail(display = "invalid utf-8 in decoded string")]
    InvalidUtf8,

    /// Caller passed a different number of types than values.
    #[fail(
        display = "argument count mismatch: expected {} types, got {} values",
        expected, got
    )]
    ArgumentCountMismatch { expected: usize, got: usize },
}
