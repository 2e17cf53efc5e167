//! Identity types
//!
//! Both identifiers are issued from monotonically increasing counters so
//! that a newer ramp or capture always compares greater than an older one.

use std::fmt;

use serde::Serialize;

/// Token of the single in-flight generation ramp.
///
/// The controller holds one ramp at a time. Regenerating replaces that ramp
/// under a fresh token, so a superseded ramp never steps again.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct GenerationToken(pub u64);

impl GenerationToken {
    pub const ZERO: GenerationToken = GenerationToken(0);

    /// Token issued after this one
    #[inline]
    pub fn next(self) -> Self {
        GenerationToken(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for GenerationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

impl fmt::Display for GenerationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one capture (export) run
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct CaptureId(pub u64);

impl CaptureId {
    pub const ZERO: CaptureId = CaptureId(0);

    #[inline]
    pub fn next(self) -> Self {
        CaptureId(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capture({})", self.0)
    }
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let first = GenerationToken::ZERO.next();
        let second = first.next();
        assert!(second > first);
        assert_eq!(format!("{:?}", second), "Generation(2)");
    }

    #[test]
    fn test_capture_id_display() {
        assert_eq!(CaptureId(7).to_string(), "#7");
    }
}
