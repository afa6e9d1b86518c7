//! Scene hosting
//!
//! Pools never touch scene data directly. Everything they need from the
//! surrounding engine goes through the [`ObjectHost`] capability:
//!
//! ```text
//! ObjectPool (recycling policy)
//!      ↓
//! ObjectHost (instantiate, parent, activate, place)
//!      ↓
//! SceneGraph / engine scene
//! ```
//!
//! [`SceneGraph`] is an arena-backed host that owns its nodes explicitly and
//! hands out generation-checked handles.

mod host;
mod scene_graph;

pub use host::ObjectHost;
pub use scene_graph::{Prefab, SceneError, SceneGraph, SceneResult};
pub use crate::foundation::collections::NodeHandle;
