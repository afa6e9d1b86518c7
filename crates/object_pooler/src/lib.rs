//! # Object Pooler
//!
//! Reusable object pools bound to a scene graph.
//!
//! A pool pre-instantiates a number of copies of a template under a container
//! node, hands out inactive copies on request and, when every copy is in use,
//! either grows by one or repurposes the oldest copy.
//!
//! ## Quick Start
//!
//! ```rust
//! use object_pooler::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut scene: SceneGraph<u32> = SceneGraph::new();
//! let enemy = Prefab::new("Enemy", 100);
//!
//! let mut pool = ObjectPool::new(&mut scene, enemy, 2, false)?;
//! let first = pool.spawn(&mut scene, Vec3::new(1.0, 0.0, 0.0), Quat::identity())?;
//!
//! assert!(scene.is_active(first)?);
//! assert_eq!(pool.last_spawned(), Some(first));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod pool;

/// Common imports for pool users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PoolConfig, SceneConfig},
        foundation::math::{Quat, Transform, Vec3},
        pool::{ObjectPool, OverflowPolicy, PoolError, PoolStats},
        scene::{NodeHandle, ObjectHost, Prefab, SceneError, SceneGraph},
    };
}
