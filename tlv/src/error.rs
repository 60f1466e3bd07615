//! Error types for codec operations

use crate::wire::{Category, WireType};
use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("message too large: {attempted} > {limit}")]
    MessageTooLarge { attempted: usize, limit: usize },
    #[error("string too long: {len} > {limit}")]
    StringTooLong { len: usize, limit: usize },
    #[error("too many elements: {count} > {limit}")]
    TooManyElements { count: usize, limit: usize },
    #[error("nesting too deep: {depth} > {limit}")]
    NestingTooDeep { depth: usize, limit: usize },
    #[error("underflow: requested {requested} bytes, {remaining} remaining")]
    Underflow { requested: usize, remaining: usize },
    #[error("seek out of range: {position} > {len}")]
    SeekOutOfRange { position: usize, len: usize },
    #[error("unknown wire type: {0}")]
    UnknownWireType(u8),
    #[error("varint too long")]
    VarintTooLong,
    #[error("type mismatch: found {found}, expected {expected}")]
    TypeMismatch { found: WireType, expected: Category },
    #[error("raw size mismatch: {found} != {expected}")]
    RawSizeMismatch { found: usize, expected: usize },
    #[error("element count mismatch: {found} != {expected}")]
    ElementCountMismatch { found: usize, expected: usize },
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid {0}: {1}")]
    Invalid(&'static str, &'static str), // context, message
}
