//! Safety limits consulted while encoding and decoding.
//!
//! A [`Limits`] value is owned by whatever backs the bytes (usually a [`crate::Buffer`])
//! and is copied into every [`crate::Writer`] and [`crate::Reader`] created over it.
//! Each side of a conversation enforces its own configured limits: a decoder never lets an
//! unvalidated length field drive an allocation.

use crate::Error;
use tracing::debug;

/// Default maximum size of a single message (1 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1 << 20;

/// Default maximum length of a single string payload (1 MiB).
pub const DEFAULT_MAX_STRING_BYTES: usize = 1 << 20;

/// Default maximum number of nested compound values.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Default maximum number of elements in a single container.
pub const DEFAULT_MAX_ELEMENTS: usize = 1 << 20;

/// Configurable bounds on message size, string length, container size, and nesting.
///
/// # Examples
///
/// ```
/// use commonware_tlv::Limits;
///
/// let limits = Limits::default().with_max_string_bytes(64).with_max_depth(4);
/// assert!(limits.check_string(64).is_ok());
/// assert!(limits.check_string(65).is_err());
/// assert!(limits.check_depth(5).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Limits {
    /// Maximum total number of bytes held by a buffer.
    pub max_message_bytes: usize,

    /// Maximum length of a string payload.
    pub max_string_bytes: usize,

    /// Maximum nesting depth of compound values (containers and aggregates).
    pub max_depth: usize,

    /// Maximum element count of a container.
    pub max_elements: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            max_string_bytes: DEFAULT_MAX_STRING_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl Limits {
    /// Limits that never reject anything. Only suitable for trusted, in-process data.
    pub const fn unbounded() -> Self {
        Self {
            max_message_bytes: usize::MAX,
            max_string_bytes: usize::MAX,
            max_depth: usize::MAX,
            max_elements: usize::MAX,
        }
    }

    /// Returns a copy with `max_message_bytes` replaced.
    pub const fn with_max_message_bytes(mut self, max: usize) -> Self {
        self.max_message_bytes = max;
        self
    }

    /// Returns a copy with `max_string_bytes` replaced.
    pub const fn with_max_string_bytes(mut self, max: usize) -> Self {
        self.max_string_bytes = max;
        self
    }

    /// Returns a copy with `max_depth` replaced.
    pub const fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }

    /// Returns a copy with `max_elements` replaced.
    pub const fn with_max_elements(mut self, max: usize) -> Self {
        self.max_elements = max;
        self
    }

    /// Checks that a buffer may grow to `total` bytes.
    pub fn check_message(&self, total: usize) -> Result<(), Error> {
        if total > self.max_message_bytes {
            debug!(total, limit = self.max_message_bytes, "message too large");
            return Err(Error::MessageTooLarge {
                attempted: total,
                limit: self.max_message_bytes,
            });
        }
        Ok(())
    }

    /// Checks the length of a string payload.
    pub fn check_string(&self, len: usize) -> Result<(), Error> {
        if len > self.max_string_bytes {
            debug!(len, limit = self.max_string_bytes, "string too long");
            return Err(Error::StringTooLong {
                len,
                limit: self.max_string_bytes,
            });
        }
        Ok(())
    }

    /// Checks the element count of a container.
    pub fn check_elements(&self, count: usize) -> Result<(), Error> {
        if count > self.max_elements {
            debug!(count, limit = self.max_elements, "too many elements");
            return Err(Error::TooManyElements {
                count,
                limit: self.max_elements,
            });
        }
        Ok(())
    }

    /// Checks the depth a compound value would be entered at.
    pub fn check_depth(&self, depth: usize) -> Result<(), Error> {
        if depth > self.max_depth {
            debug!(depth, limit = self.max_depth, "nesting too deep");
            return Err(Error::NestingTooDeep {
                depth,
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}
