//! Overflow strategies

use serde::{Deserialize, Serialize};

/// What a pool does when a spawn finds no inactive member
///
/// Fixed at construction from the `expandable` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Instantiate one more member and append it
    Grow,
    /// Repurpose the first member ever created, even if it is still active
    EvictOldest,
}

impl OverflowPolicy {
    /// Policy selected by an `expandable` flag
    pub const fn from_expandable(expandable: bool) -> Self {
        if expandable {
            Self::Grow
        } else {
            Self::EvictOldest
        }
    }

    /// Whether this policy grows the pool
    pub const fn is_expandable(self) -> bool {
        matches!(self, Self::Grow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(OverflowPolicy::from_expandable(true), OverflowPolicy::Grow);
        assert_eq!(OverflowPolicy::from_expandable(false), OverflowPolicy::EvictOldest);
        assert!(OverflowPolicy::Grow.is_expandable());
        assert!(!OverflowPolicy::EvictOldest.is_expandable());
    }
}
