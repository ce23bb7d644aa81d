//! Resource bounds for parsing untrusted input.
//!
//! By default a document of any size is accepted, but nesting is capped at
//! [`DEFAULT_MAX_DEPTH`] levels: the parser recurses once per level, so an
//! uncapped depth can exhaust the stack. Callers reading from untrusted or
//! network-backed sources should opt into [`Limits::untrusted`] or set their
//! own caps.

/// Nesting cap applied by [`Limits::default`].
pub const DEFAULT_MAX_DEPTH: u64 = 256;

/// Optional caps checked while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of UTF-16 units consumed from the source.
    pub max_input_units: Option<u64>,
    /// Maximum array/object nesting depth.
    pub max_depth: Option<u64>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_units: None,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl Limits {
    /// No bounds at all.
    ///
    /// Deeply nested input can overflow the stack and abort the process.
    pub const fn unbounded() -> Self {
        Self {
            max_input_units: None,
            max_depth: None,
        }
    }

    /// Bounds suitable for input from an untrusted peer.
    pub const fn untrusted() -> Self {
        Self {
            max_input_units: Some(16 * 1024 * 1024), // 16 Mi units
            max_depth: Some(128),
        }
    }

    /// Whether `consumed` units stay within the input cap.
    pub(crate) fn allows_units(&self, consumed: u64) -> bool {
        self.max_input_units.map_or(true, |max| consumed <= max)
    }

    /// Whether a container at `depth` (1 for the outermost) is allowed.
    pub(crate) fn allows_depth(&self, depth: u64) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_depth_only() {
        let limits = Limits::default();
        assert!(limits.allows_units(u64::MAX));
        assert!(limits.allows_depth(DEFAULT_MAX_DEPTH));
        assert!(!limits.allows_depth(DEFAULT_MAX_DEPTH + 1));
    }

    #[test]
    fn test_unbounded() {
        let limits = Limits::unbounded();
        assert!(limits.allows_units(u64::MAX));
        assert!(limits.allows_depth(u64::MAX));
    }

    #[test]
    fn test_untrusted_limits() {
        let limits = Limits::untrusted();
        assert!(limits.allows_depth(128));
        assert!(!limits.allows_depth(129));
        assert!(limits.allows_units(16 * 1024 * 1024));
        assert!(!limits.allows_units(16 * 1024 * 1024 + 1));
    }
}
