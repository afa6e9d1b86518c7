//! Object Pool
//!
//! A homogeneous set of pre-instantiated scene objects that are handed out
//! again once the caller deactivates them.

use super::{OverflowPolicy, PoolError, PoolStats};
use crate::config::PoolConfig;
use crate::foundation::math::{Quat, Vec3};
use crate::scene::ObjectHost;

/// Typed view of a pooled instance, resolved through the host
///
/// Chosen once when the pool is built so spawning never has to inspect the
/// instance's type.
pub type SpawnAccessor<H, T> = for<'a> fn(&'a H, <H as ObjectHost>::Handle) -> Option<&'a T>;

/// How `spawn` obtained its member, counted once the spawn succeeds
#[derive(Debug, Clone, Copy)]
enum SpawnSource {
    Recycled,
    Grown,
    Evicted,
}

fn no_view<H: ObjectHost>(_host: &H, _handle: H::Handle) -> Option<&()> {
    None
}

/// Pool of scene objects created from a single template
///
/// The pool keeps only handles. The host owns the instances through the
/// pool's container node, so destroying the container destroys every member.
///
/// # Usage
///
/// ```rust
/// use object_pooler::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut scene: SceneGraph<u32> = SceneGraph::new();
/// let mut bullets = ObjectPool::with_accessor(
///     &mut scene,
///     Prefab::new("Bullet", 10_u32),
///     4,
///     true,
///     SceneGraph::payload,
/// )?;
///
/// bullets.spawn(&mut scene, Vec3::zeros(), Quat::identity())?;
/// assert_eq!(bullets.latest_spawn(&scene), Some(&10));
/// # Ok(())
/// # }
/// ```
pub struct ObjectPool<H: ObjectHost, T: ?Sized = ()> {
    /// Prototype every member is instantiated from
    template: H::Template,
    /// Scope node that owns all members
    container: H::Handle,
    /// Members in creation order
    members: Vec<H::Handle>,
    /// Strategy used when no member is inactive
    policy: OverflowPolicy,
    /// Most recently activated member
    last_spawned: Option<H::Handle>,
    /// Typed view of members
    accessor: SpawnAccessor<H, T>,
    /// Statistics
    stats: PoolStats,
}

impl<H: ObjectHost> ObjectPool<H> {
    /// Create a pool of `size` inactive members without a typed view
    ///
    /// The overflow strategy is fixed here: `expandable` pools grow, others
    /// repurpose their oldest member.
    pub fn new(
        host: &mut H,
        template: H::Template,
        size: usize,
        expandable: bool,
    ) -> Result<Self, H::Error> {
        Self::with_accessor(host, template, size, expandable, no_view::<H>)
    }

    /// Create a pool from configuration
    pub fn from_config(
        host: &mut H,
        template: H::Template,
        config: &PoolConfig,
    ) -> Result<Self, H::Error> {
        Self::new(host, template, config.size, config.expandable)
    }
}

impl<H: ObjectHost, T: ?Sized> ObjectPool<H, T> {
    /// Create a pool whose latest spawn can be viewed as `T`
    ///
    /// If the host fails while members are being created, the container is
    /// destroyed again through [`ObjectHost::destroy_scope`] before the error
    /// is returned, so a failed construction leaves nothing behind.
    pub fn with_accessor(
        host: &mut H,
        template: H::Template,
        size: usize,
        expandable: bool,
        accessor: SpawnAccessor<H, T>,
    ) -> Result<Self, H::Error> {
        let scope_name = format!("{} Pool", host.template_name(&template));
        let container = host.create_scope(&scope_name)?;

        let mut pool = Self {
            template,
            container,
            members: Vec::with_capacity(size),
            policy: OverflowPolicy::from_expandable(expandable),
            last_spawned: None,
            accessor,
            stats: PoolStats::default(),
        };

        if let Err(error) = pool.populate(host, size) {
            log::warn!(
                "Failed to build pool '{}'; destroying its container",
                pool.name(host)
            );
            if let Err(cleanup) = host.destroy_scope(pool.container) {
                log::error!("Failed to destroy container of pool '{}': {}", pool.name(host), cleanup);
            }
            return Err(error);
        }

        log::info!(
            "Created pool '{}' with {} members ({:?} on overflow)",
            pool.name(host),
            size,
            pool.policy
        );

        Ok(pool)
    }

    /// Activate a member at the given position and orientation
    ///
    /// Returns the first inactive member in creation order. When every
    /// member is active the overflow policy decides: growable pools add a
    /// member, others hand out `members[0]` even though it is still in use.
    pub fn spawn(
        &mut self,
        host: &mut H,
        position: Vec3,
        rotation: Quat,
    ) -> Result<H::Handle, PoolError<H::Error>> {
        let (member, source) = match self.find_inactive(host)? {
            Some(member) => {
                log::trace!("Recycling inactive member {:?}", member);
                (member, SpawnSource::Recycled)
            }
            None => self.overflow(host)?,
        };

        if host.parent_of(member)? != Some(self.container) {
            log::debug!("Returning member {:?} to its pool container", member);
            host.set_parent(member, self.container)?;
        }

        host.set_transform(member, position, rotation)?;
        host.reorder_last(member)?;
        host.set_active(member, true)?;

        self.last_spawned = Some(member);
        self.stats.spawned += 1;
        match source {
            SpawnSource::Recycled => self.stats.recycled += 1,
            SpawnSource::Grown => self.stats.grown += 1,
            SpawnSource::Evicted => self.stats.evicted += 1,
        }
        self.stats.peak_active = self.stats.peak_active.max(self.active_count(host)?);

        Ok(member)
    }

    /// Deactivate a member so later spawns can reuse it
    ///
    /// Returns `false` without touching the host when `handle` is not a member.
    pub fn release(&self, host: &mut H, handle: H::Handle) -> Result<bool, H::Error> {
        if !self.contains(handle) {
            return Ok(false);
        }
        host.set_active(handle, false)?;
        Ok(true)
    }

    /// Current number of members
    pub fn capacity(&self) -> usize {
        self.members.len()
    }

    /// Whether the pool grows on overflow
    pub fn expandable(&self) -> bool {
        self.policy.is_expandable()
    }

    /// Overflow strategy fixed at construction
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Most recently spawned member
    pub fn last_spawned(&self) -> Option<H::Handle> {
        self.last_spawned
    }

    /// Typed view of the most recently spawned member
    pub fn latest_spawn<'a>(&self, host: &'a H) -> Option<&'a T> {
        self.last_spawned.and_then(|handle| (self.accessor)(host, handle))
    }

    /// Members in creation order
    pub fn members(&self) -> &[H::Handle] {
        &self.members
    }

    /// Member at `index` in creation order
    pub fn member(&self, index: usize) -> Option<H::Handle> {
        self.members.get(index).copied()
    }

    /// Whether `handle` belongs to this pool
    pub fn contains(&self, handle: H::Handle) -> bool {
        self.members.contains(&handle)
    }

    /// Scope node owning every member
    pub fn container(&self) -> H::Handle {
        self.container
    }

    /// Template members are created from
    pub fn template(&self) -> &H::Template {
        &self.template
    }

    /// Usage counters
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Number of members currently active
    pub fn active_count(&self, host: &H) -> Result<usize, H::Error> {
        let mut active = 0;
        for &member in &self.members {
            if host.is_active(member)? {
                active += 1;
            }
        }
        Ok(active)
    }

    /// Children of the container in sibling (update and draw) order
    pub fn sibling_order(&self, host: &H) -> Result<Vec<H::Handle>, H::Error> {
        let count = host.child_count(self.container)?;
        (0..count).map(|index| host.child_at(self.container, index)).collect()
    }

    fn name<'a>(&'a self, host: &H) -> &'a str {
        host.template_name(&self.template)
    }

    fn find_inactive(&self, host: &H) -> Result<Option<H::Handle>, H::Error> {
        for &member in &self.members {
            if !host.is_active(member)? {
                return Ok(Some(member));
            }
        }
        Ok(None)
    }

    fn overflow(&mut self, host: &mut H) -> Result<(H::Handle, SpawnSource), PoolError<H::Error>> {
        match self.policy {
            OverflowPolicy::Grow => {
                let member = self.add_member(host)?;
                log::debug!(
                    "Pool '{}' grew to {} members",
                    self.name(host),
                    self.members.len()
                );
                Ok((member, SpawnSource::Grown))
            }
            OverflowPolicy::EvictOldest => {
                let Some(&oldest) = self.members.first() else {
                    return Err(PoolError::Empty {
                        pool: self.name(host).to_owned(),
                    });
                };
                log::warn!(
                    "Pool '{}' exhausted; repurposing oldest member {:?}",
                    self.name(host),
                    oldest
                );
                Ok((oldest, SpawnSource::Evicted))
            }
        }
    }

    fn populate(&mut self, host: &mut H, size: usize) -> Result<(), H::Error> {
        for _ in 0..size {
            let member = self.add_member(host)?;
            host.set_active(member, false)?;
        }
        Ok(())
    }

    /// Instantiate, name and record one member; the host decides its active state
    fn add_member(&mut self, host: &mut H) -> Result<H::Handle, H::Error> {
        let member = host.instantiate(&self.template, self.container)?;
        let position = host.child_count(self.container)?;
        let name = format!("{} {}", host.name(member)?, position);
        host.set_name(member, name)?;
        self.members.push(member);
        Ok(member)
    }
}
