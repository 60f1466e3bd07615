//! Counting sink used to learn encoded sizes.

use crate::{ByteSink, Error, Limits};

/// A [`ByteSink`] that discards every byte and only counts them.
///
/// Driving the regular encode path over a `Sizer` yields the exact number of bytes the same
/// value would occupy in any other sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sizer {
    count: usize,
    limits: Limits,
}

impl Sizer {
    /// Creates a sizer with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sizer that enforces `limits` while counting.
    pub fn with_limits(limits: Limits) -> Self {
        Self { count: 0, limits }
    }

    /// Number of bytes counted so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl ByteSink for Sizer {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.count = self.count.saturating_add(bytes.len());
        Ok(())
    }

    fn limits(&self) -> Limits {
        self.limits
    }

    #[inline]
    fn counted(&self) -> Option<usize> {
        Some(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_without_storing() {
        let mut sizer = Sizer::new();
        assert_eq!(sizer.count(), 0);
        sizer.write_bytes(&[1, 2, 3]).unwrap();
        sizer.write_bytes(&[]).unwrap();
        sizer.write_bytes(&[4]).unwrap();
        assert_eq!(sizer.count(), 4);
        assert_eq!(sizer.counted(), Some(4));
    }

    #[test]
    fn test_limits() {
        let limits = Limits::default().with_max_depth(2);
        let sizer = Sizer::with_limits(limits);
        assert_eq!(ByteSink::limits(&sizer), limits);
    }
}
