//! Specialized collection types

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Generation-checked index of a node in a scene arena
    ///
    /// A handle stays valid until its node is destroyed; afterwards lookups
    /// with it fail instead of aliasing a newer node stored in the same slot.
    pub struct NodeHandle;
}

/// Arena of scene nodes addressed by [`NodeHandle`]
pub type NodeMap<T> = SlotMap<NodeHandle, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_does_not_alias_reused_slot() {
        let mut nodes: NodeMap<&str> = NodeMap::with_key();
        let first = nodes.insert("first");
        nodes.remove(first);

        let second = nodes.insert("second");
        assert_ne!(first, second);
        assert!(nodes.get(first).is_none());
        assert_eq!(nodes.get(second), Some(&"second"));
    }

    #[test]
    fn test_null_handle_is_never_stored() {
        let mut nodes: NodeMap<u32> = NodeMap::with_key();
        nodes.insert(1);
        assert!(NodeHandle::null().is_null());
        assert!(!nodes.contains_key(NodeHandle::null()));
    }
}
