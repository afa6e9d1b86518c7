//! Object pooling
//!
//! Pre-instantiated, recycled scene objects.
//!
//! # Architecture
//!
//! ```text
//! spawn(position, rotation)
//!         ↓
//! first inactive member (creation order)
//!         ↓ none found
//! OverflowPolicy::Grow        → instantiate one more member
//! OverflowPolicy::EvictOldest → repurpose members[0]
//!         ↓
//! place, move last among siblings, activate
//! ```

mod error;
mod object_pool;
mod overflow;
mod stats;

pub use error::PoolError;
pub use object_pool::{ObjectPool, SpawnAccessor};
pub use overflow::OverflowPolicy;
pub use stats::PoolStats;
