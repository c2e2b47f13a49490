//! Domain Errors for Supernode Discovery

use thiserror::Error;

/// Errors returned by the authorized supernode registry.
///
/// These are synchronous, caller-facing results; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SupernodeError {
    /// Supernode addresses must be IPv6 overlay addresses.
    #[error("supernode address must be IPv6")]
    InvalidFamily,
    /// An entry with the same raw address is already authorized.
    #[error("supernode already authorized")]
    AlreadyExists,
    /// No entry with that raw address is authorized.
    #[error("supernode not found")]
    NotFound,
}

/// A `HunterConfig` the hunter cannot run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidConfig {
    /// A period, timeout or pool bound of zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Reasons a query reply was discarded.
///
/// None of these are fatal; the reply handler logs them and leaves pool
/// state untouched for the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    /// No responder: the correlator gave up waiting.
    #[error("query timed out")]
    Timeout,
    /// The remote node answered with an `error` field.
    #[error("remote error: {0}")]
    Remote(String),
    /// A getRoute reply without a `label` field.
    #[error("reply missing label")]
    MissingLabel,
    /// A `label` field of the wrong length or unparsable.
    #[error("malformed label: {0}")]
    MalformedLabel(String),
    /// The reply carried no usable node list.
    #[error("reply without nodes")]
    NoNodes,
    /// The reply belongs to a different engine instance.
    #[error("reply for engine {got}, expected {expected}")]
    StaleEngine {
        /// Engine id carried in the pending query.
        got: u64,
        /// Id of the engine that received the reply.
        expected: u64,
    },
}

/// Errors parsing keys, labels and addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Key text is not 52 base32 characters followed by `.k`.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Key hashes outside the overlay address range.
    #[error("key does not map to an overlay address")]
    NotOverlayKey,
    /// Label text is not `xxxx.xxxx.xxxx.xxxx`.
    #[error("invalid label: {0}")]
    InvalidLabel(String),
}

/// Errors encoding or decoding wire messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Input ended in the middle of a value.
    #[error("unexpected end of message at byte {0}")]
    UnexpectedEof(usize),
    /// A byte that cannot start or continue a value.
    #[error("unexpected byte {byte:#04x} at {pos}")]
    UnexpectedByte {
        /// Offending byte.
        byte: u8,
        /// Position in the input.
        pos: usize,
    },
    /// Integer or length field failed to parse.
    #[error("invalid number at byte {0}")]
    InvalidNumber(usize),
    /// Nesting deeper than the codec allows.
    #[error("message nested deeper than {0} levels")]
    TooDeep(usize),
    /// The top-level value is not a dictionary.
    #[error("top-level value is not a dictionary")]
    NotADict,
    /// Bytes left over after the top-level dictionary.
    #[error("{0} trailing bytes after message")]
    TrailingData(usize),
}
