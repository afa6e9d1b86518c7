//! Arena-backed scene graph
//!
//! Nodes live in a slot map owned by the graph. Parents keep their children in
//! sibling order, which is also the order the host updates and draws them in.

use super::ObjectHost;
use crate::config::SceneConfig;
use crate::foundation::collections::{NodeHandle, NodeMap};
use crate::foundation::math::{Quat, Transform, Vec3};

/// Result type for scene graph operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors reported by [`SceneGraph`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Handle does not refer to a live node
    #[error("Scene node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    /// The configured node limit would be exceeded
    #[error("Scene node limit reached ({limit} nodes)")]
    NodeLimitReached {
        /// Configured maximum number of live nodes
        limit: usize,
    },

    /// Reparenting would make a node its own ancestor
    #[error("Cannot parent {child:?} under {parent:?}: would create a cycle")]
    CyclicParent {
        /// Node being moved
        child: NodeHandle,
        /// Requested new parent
        parent: NodeHandle,
    },

    /// Operation needs a parent but the node is a root
    #[error("Scene node {0:?} has no parent")]
    Detached(NodeHandle),

    /// Sibling index past the end of a parent's children
    #[error("Child index {index} out of range for {parent:?} ({count} children)")]
    ChildIndexOutOfRange {
        /// Parent node that was queried
        parent: NodeHandle,
        /// Requested index
        index: usize,
        /// Actual number of children
        count: usize,
    },
}

/// Template for instances created in a [`SceneGraph`]
#[derive(Debug, Clone, PartialEq)]
pub struct Prefab<P> {
    /// Name given to every instance
    pub name: String,
    /// Data cloned into every instance
    pub payload: P,
    /// Local transform of a fresh instance
    pub transform: Transform,
}

impl<P> Prefab<P> {
    /// Create a prefab with an identity transform
    pub fn new(name: impl Into<String>, payload: P) -> Self {
        Self {
            name: name.into(),
            payload,
            transform: Transform::identity(),
        }
    }
}

#[derive(Debug)]
struct SceneNode<P> {
    name: String,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    active: bool,
    transform: Transform,
    payload: Option<P>,
}

impl<P> SceneNode<P> {
    fn new(name: String, parent: Option<NodeHandle>, transform: Transform, payload: Option<P>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            active: true,
            transform,
            payload,
        }
    }
}

/// In-memory scene graph carrying a payload of type `P` per instance
///
/// Root scopes carry no payload; instances created from a [`Prefab<P>`]
/// carry a clone of the prefab's payload.
#[derive(Debug)]
pub struct SceneGraph<P> {
    nodes: NodeMap<SceneNode<P>>,
    max_nodes: Option<usize>,
}

impl<P> SceneGraph<P> {
    /// Create an unbounded scene graph
    pub fn new() -> Self {
        Self {
            nodes: NodeMap::with_key(),
            max_nodes: None,
        }
    }

    /// Create a scene graph with limits taken from configuration
    pub fn with_config(config: &SceneConfig) -> Self {
        Self {
            nodes: NodeMap::with_key(),
            max_nodes: config.max_nodes,
        }
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `handle` refers to a live node
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Parent of a node, `None` for roots
    pub fn parent(&self, handle: NodeHandle) -> SceneResult<Option<NodeHandle>> {
        Ok(self.node(handle)?.parent)
    }

    /// Children of a node in sibling order
    pub fn children(&self, handle: NodeHandle) -> SceneResult<&[NodeHandle]> {
        Ok(&self.node(handle)?.children)
    }

    /// Local transform of a node
    pub fn transform(&self, handle: NodeHandle) -> SceneResult<&Transform> {
        Ok(&self.node(handle)?.transform)
    }

    /// Transform of a node composed with all of its ancestors
    pub fn world_transform(&self, handle: NodeHandle) -> SceneResult<Transform> {
        let node = self.node(handle)?;
        match node.parent {
            Some(parent) => Ok(self.world_transform(parent)?.combine(&node.transform)),
            None => Ok(node.transform),
        }
    }

    /// Payload of an instance, `None` for scope nodes
    pub fn payload(&self, handle: NodeHandle) -> Option<&P> {
        self.nodes.get(handle)?.payload.as_ref()
    }

    /// Mutable payload of an instance
    pub fn payload_mut(&mut self, handle: NodeHandle) -> Option<&mut P> {
        self.nodes.get_mut(handle)?.payload.as_mut()
    }

    /// The node's own active flag, ignoring its ancestors
    pub fn active_self(&self, handle: NodeHandle) -> SceneResult<bool> {
        Ok(self.node(handle)?.active)
    }

    /// Create a root node
    pub fn create_root(&mut self, name: impl Into<String>) -> SceneResult<NodeHandle> {
        self.insert(SceneNode::new(name.into(), None, Transform::identity(), None))
    }

    /// Destroy a node together with its whole subtree
    ///
    /// Returns the number of nodes removed.
    pub fn destroy(&mut self, handle: NodeHandle) -> SceneResult<usize> {
        let parent = self.node(handle)?.parent;
        if let Some(parent) = parent {
            self.detach_from(parent, handle);
        }

        let mut pending = vec![handle];
        let mut removed = 0;
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
                removed += 1;
            }
        }

        log::debug!("Destroyed {} scene node(s) rooted at {:?}", removed, handle);
        Ok(removed)
    }

    fn node(&self, handle: NodeHandle) -> SceneResult<&SceneNode<P>> {
        self.nodes.get(handle).ok_or(SceneError::NodeNotFound(handle))
    }

    fn node_mut(&mut self, handle: NodeHandle) -> SceneResult<&mut SceneNode<P>> {
        self.nodes.get_mut(handle).ok_or(SceneError::NodeNotFound(handle))
    }

    fn insert(&mut self, node: SceneNode<P>) -> SceneResult<NodeHandle> {
        if let Some(limit) = self.max_nodes {
            if self.nodes.len() >= limit {
                return Err(SceneError::NodeLimitReached { limit });
            }
        }

        let parent = node.parent;
        let handle = self.nodes.insert(node);
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.push(handle);
        }
        Ok(handle)
    }

    fn detach_from(&mut self, parent: NodeHandle, child: NodeHandle) {
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&c| c != child);
        }
    }

    fn is_ancestor(&self, ancestor: NodeHandle, mut handle: NodeHandle) -> bool {
        while let Some(parent) = self.nodes.get(handle).and_then(|node| node.parent) {
            if parent == ancestor {
                return true;
            }
            handle = parent;
        }
        false
    }
}

impl<P> Default for SceneGraph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> ObjectHost for SceneGraph<P> {
    type Handle = NodeHandle;
    type Template = Prefab<P>;
    type Error = SceneError;

    fn create_scope(&mut self, name: &str) -> SceneResult<NodeHandle> {
        self.create_root(name)
    }

    fn destroy_scope(&mut self, scope: NodeHandle) -> SceneResult<()> {
        self.destroy(scope).map(|_| ())
    }

    fn instantiate(&mut self, template: &Prefab<P>, parent: NodeHandle) -> SceneResult<NodeHandle> {
        self.node(parent)?;
        let node = SceneNode::new(
            template.name.clone(),
            Some(parent),
            template.transform,
            Some(template.payload.clone()),
        );
        let handle = self.insert(node)?;
        log::trace!("Instantiated '{}' as {:?} under {:?}", template.name, handle, parent);
        Ok(handle)
    }

    fn parent_of(&self, handle: NodeHandle) -> SceneResult<Option<NodeHandle>> {
        self.parent(handle)
    }

    fn set_parent(&mut self, handle: NodeHandle, parent: NodeHandle) -> SceneResult<()> {
        self.node(parent)?;
        let previous = self.node(handle)?.parent;
        if handle == parent || self.is_ancestor(handle, parent) {
            return Err(SceneError::CyclicParent { child: handle, parent });
        }

        if let Some(previous) = previous {
            self.detach_from(previous, handle);
        }
        self.node_mut(parent)?.children.push(handle);
        self.node_mut(handle)?.parent = Some(parent);
        Ok(())
    }

    fn set_active(&mut self, handle: NodeHandle, active: bool) -> SceneResult<()> {
        self.node_mut(handle)?.active = active;
        Ok(())
    }

    fn is_active(&self, handle: NodeHandle) -> SceneResult<bool> {
        let mut current = Some(handle);
        while let Some(node_handle) = current {
            let node = self.node(node_handle)?;
            if !node.active {
                return Ok(false);
            }
            current = node.parent;
        }
        Ok(true)
    }

    fn set_transform(&mut self, handle: NodeHandle, position: Vec3, rotation: Quat) -> SceneResult<()> {
        let node = self.node_mut(handle)?;
        node.transform.position = position;
        node.transform.rotation = rotation;
        Ok(())
    }

    fn reorder_last(&mut self, handle: NodeHandle) -> SceneResult<()> {
        let parent = self.node(handle)?.parent.ok_or(SceneError::Detached(handle))?;
        let siblings = &mut self.node_mut(parent)?.children;
        if let Some(index) = siblings.iter().position(|&c| c == handle) {
            let moved = siblings.remove(index);
            siblings.push(moved);
        }
        Ok(())
    }

    fn child_at(&self, parent: NodeHandle, index: usize) -> SceneResult<NodeHandle> {
        let children = &self.node(parent)?.children;
        children.get(index).copied().ok_or(SceneError::ChildIndexOutOfRange {
            parent,
            index,
            count: children.len(),
        })
    }

    fn child_count(&self, parent: NodeHandle) -> SceneResult<usize> {
        Ok(self.node(parent)?.children.len())
    }

    fn name(&self, handle: NodeHandle) -> SceneResult<&str> {
        Ok(&self.node(handle)?.name)
    }

    fn set_name(&mut self, handle: NodeHandle, name: String) -> SceneResult<()> {
        self.node_mut(handle)?.name = name;
        Ok(())
    }

    fn template_name<'a>(&self, template: &'a Prefab<P>) -> &'a str {
        &template.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene_with_root() -> (SceneGraph<u32>, NodeHandle) {
        let mut scene = SceneGraph::new();
        let root = scene.create_root("Root").unwrap();
        (scene, root)
    }

    #[test]
    fn test_instantiate_appends_last_child() {
        let (mut scene, root) = scene_with_root();
        let prefab = Prefab::new("Rock", 7);

        let a = scene.instantiate(&prefab, root).unwrap();
        let b = scene.instantiate(&prefab, root).unwrap();

        assert_eq!(scene.children(root).unwrap(), &[a, b]);
        assert_eq!(scene.child_count(root).unwrap(), 2);
        assert_eq!(scene.child_at(root, 1).unwrap(), b);
        assert_eq!(scene.name(a).unwrap(), "Rock");
        assert_eq!(scene.payload(a), Some(&7));
        assert_eq!(scene.parent(a).unwrap(), Some(root));
    }

    #[test]
    fn test_payloads_are_independent_copies() {
        let (mut scene, root) = scene_with_root();
        let prefab = Prefab::new("Rock", 1);
        let a = scene.instantiate(&prefab, root).unwrap();
        let b = scene.instantiate(&prefab, root).unwrap();

        *scene.payload_mut(a).unwrap() = 99;
        assert_eq!(scene.payload(a), Some(&99));
        assert_eq!(scene.payload(b), Some(&1));
        assert_eq!(scene.payload(root), None);
    }

    #[test]
    fn test_reorder_last_moves_to_end() {
        let (mut scene, root) = scene_with_root();
        let prefab = Prefab::new("Rock", 0);
        let a = scene.instantiate(&prefab, root).unwrap();
        let b = scene.instantiate(&prefab, root).unwrap();
        let c = scene.instantiate(&prefab, root).unwrap();

        scene.reorder_last(a).unwrap();
        assert_eq!(scene.children(root).unwrap(), &[b, c, a]);

        assert_eq!(scene.reorder_last(root), Err(SceneError::Detached(root)));
    }

    #[test]
    fn test_active_in_hierarchy() {
        let (mut scene, root) = scene_with_root();
        let child = scene.instantiate(&Prefab::new("Rock", 0), root).unwrap();
        assert!(scene.is_active(child).unwrap());

        scene.set_active(root, false).unwrap();
        assert!(!scene.is_active(child).unwrap());
        assert!(scene.active_self(child).unwrap());

        scene.set_active(root, true).unwrap();
        scene.set_active(child, false).unwrap();
        assert!(!scene.is_active(child).unwrap());
    }

    #[test]
    fn test_set_parent_moves_between_scopes() {
        let (mut scene, root) = scene_with_root();
        let other = scene.create_root("Other").unwrap();
        let child = scene.instantiate(&Prefab::new("Rock", 0), root).unwrap();

        scene.set_parent(child, other).unwrap();
        assert_eq!(scene.child_count(root).unwrap(), 0);
        assert_eq!(scene.children(other).unwrap(), &[child]);
        assert_eq!(scene.parent(child).unwrap(), Some(other));
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let (mut scene, root) = scene_with_root();
        let child = scene.instantiate(&Prefab::new("Rock", 0), root).unwrap();

        assert_eq!(
            scene.set_parent(root, child),
            Err(SceneError::CyclicParent { child: root, parent: child })
        );
        assert!(matches!(scene.set_parent(root, root), Err(SceneError::CyclicParent { .. })));
    }

    #[test]
    fn test_destroy_cascades_and_invalidates_handles() {
        let (mut scene, root) = scene_with_root();
        let prefab = Prefab::new("Rock", 0);
        let a = scene.instantiate(&prefab, root).unwrap();
        let b = scene.instantiate(&prefab, a).unwrap();

        assert_eq!(scene.destroy(root).unwrap(), 3);
        assert_eq!(scene.node_count(), 0);
        assert!(!scene.contains(b));
        assert_eq!(scene.is_active(a), Err(SceneError::NodeNotFound(a)));
    }

    #[test]
    fn test_destroy_child_detaches_from_parent() {
        let (mut scene, root) = scene_with_root();
        let a = scene.instantiate(&Prefab::new("Rock", 0), root).unwrap();

        assert_eq!(scene.destroy(a).unwrap(), 1);
        assert_eq!(scene.child_count(root).unwrap(), 0);
    }

    #[test]
    fn test_node_limit() {
        let mut scene: SceneGraph<u32> = SceneGraph::with_config(&SceneConfig::default().with_max_nodes(2));
        let root = scene.create_root("Root").unwrap();
        scene.instantiate(&Prefab::new("Rock", 0), root).unwrap();

        assert_eq!(
            scene.instantiate(&Prefab::new("Rock", 0), root),
            Err(SceneError::NodeLimitReached { limit: 2 })
        );
        assert_eq!(scene.child_count(root).unwrap(), 1);
    }

    #[test]
    fn test_child_at_out_of_range() {
        let (scene, root) = scene_with_root();
        assert_eq!(
            scene.child_at(root, 0),
            Err(SceneError::ChildIndexOutOfRange { parent: root, index: 0, count: 0 })
        );
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let mut scene: SceneGraph<u32> = SceneGraph::new();
        let root = scene.create_root("Root").unwrap();
        scene.set_transform(root, Vec3::new(5.0, 0.0, 0.0), Quat::identity()).unwrap();
        let child = scene.instantiate(&Prefab::new("Rock", 0), root).unwrap();
        scene.set_transform(child, Vec3::new(0.0, 2.0, 0.0), Quat::identity()).unwrap();

        let world = scene.world_transform(child).unwrap();
        assert_relative_eq!(world.position.x, 5.0);
        assert_relative_eq!(world.position.y, 2.0);
    }
}
