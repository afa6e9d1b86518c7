//! Object host capability trait

use crate::foundation::math::{Quat, Vec3};
use std::fmt::Debug;

/// Engine primitives a pool needs from its scene
///
/// Implementations own the instances; pools only keep handles. Every fallible
/// operation reports the host's own error type, which pools pass through to
/// their callers untouched.
pub trait ObjectHost {
    /// Lightweight reference to an instance or scope node
    type Handle: Copy + Eq + Debug;

    /// Prototype description that instances are created from
    type Template;

    /// Failure reported by host primitives
    type Error: std::error::Error + 'static;

    /// Create a root scoping node that will own pooled instances
    fn create_scope(&mut self, name: &str) -> Result<Self::Handle, Self::Error>;

    /// Destroy a scope together with everything parented under it
    fn destroy_scope(&mut self, scope: Self::Handle) -> Result<(), Self::Error>;

    /// Create a new instance of `template` as the last child of `parent`
    fn instantiate(
        &mut self,
        template: &Self::Template,
        parent: Self::Handle,
    ) -> Result<Self::Handle, Self::Error>;

    /// Current parent of `handle`, `None` for roots
    fn parent_of(&self, handle: Self::Handle) -> Result<Option<Self::Handle>, Self::Error>;

    /// Move `handle` under `parent`, appending it to the parent's children
    fn set_parent(&mut self, handle: Self::Handle, parent: Self::Handle) -> Result<(), Self::Error>;

    /// Activate or deactivate an instance
    fn set_active(&mut self, handle: Self::Handle, active: bool) -> Result<(), Self::Error>;

    /// Whether the instance is active in the hierarchy (itself and all ancestors)
    fn is_active(&self, handle: Self::Handle) -> Result<bool, Self::Error>;

    /// Place an instance relative to its parent
    fn set_transform(
        &mut self,
        handle: Self::Handle,
        position: Vec3,
        rotation: Quat,
    ) -> Result<(), Self::Error>;

    /// Move an instance to the end of its parent's child order
    fn reorder_last(&mut self, handle: Self::Handle) -> Result<(), Self::Error>;

    /// Child of `parent` at `index` in sibling order
    fn child_at(&self, parent: Self::Handle, index: usize) -> Result<Self::Handle, Self::Error>;

    /// Number of children under `parent`
    fn child_count(&self, parent: Self::Handle) -> Result<usize, Self::Error>;

    /// Diagnostic name of an instance
    fn name(&self, handle: Self::Handle) -> Result<&str, Self::Error>;

    /// Rename an instance
    fn set_name(&mut self, handle: Self::Handle, name: String) -> Result<(), Self::Error>;

    /// Diagnostic name of a template
    fn template_name<'a>(&self, template: &'a Self::Template) -> &'a str;
}
