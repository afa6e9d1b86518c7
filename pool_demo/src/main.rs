//! Pool demo
//!
//! Spawns enemies from an object pool on a simulated frame loop and releases
//! them when their lifetime runs out.
//!
//! Usage: `pool_demo [config.toml|config.ron]`

mod config;

use config::DemoConfig;
use object_pooler::foundation::logging;
use object_pooler::prelude::*;
use rand::Rng;

/// Payload carried by every pooled enemy
#[derive(Debug, Clone, PartialEq)]
struct Enemy {
    health: u32,
    /// Demo time at which the enemy goes back to the pool, `None` to stay until evicted
    expires_at: Option<f32>,
}

const ENEMY_HEALTH: u32 = 3;

impl Enemy {
    fn prototype() -> Self {
        Self {
            health: ENEMY_HEALTH,
            expires_at: None,
        }
    }

    /// Reset a recycled enemy; a non-positive `lifetime` never expires
    fn revive(&mut self, now: f32, lifetime: f32) {
        self.health = ENEMY_HEALTH;
        self.expires_at = (lifetime > 0.0).then_some(now + lifetime);
    }

    fn is_expired(&self, now: f32) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

struct PoolDemo {
    config: DemoConfig,
    scene: SceneGraph<Enemy>,
    enemies: ObjectPool<SceneGraph<Enemy>, Enemy>,
    time: f32,
}

impl PoolDemo {
    fn new(config: DemoConfig) -> Result<Self, SceneError> {
        let mut scene = SceneGraph::with_config(&config.scene);
        let prefab = Prefab::new(config.template_name.clone(), Enemy::prototype());

        let enemies = ObjectPool::with_accessor(
            &mut scene,
            prefab,
            config.pool.size,
            config.pool.expandable,
            SceneGraph::payload,
        )?;

        Ok(Self {
            config,
            scene,
            enemies,
            time: 0.0,
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("Running {} frames...", self.config.frames);

        for frame in 0..self.config.frames {
            self.time = frame as f32 * self.config.frame_time;
            self.release_expired()?;

            if frame % self.config.spawn_interval == 0 {
                self.spawn_enemy()?;
            }
        }

        self.report()?;
        Ok(())
    }

    fn spawn_enemy(&mut self) -> Result<(), PoolError<SceneError>> {
        let radius = self.config.arena_radius;
        let mut rng = rand::thread_rng();
        let position = Vec3::new(rng.gen_range(-radius..radius), 0.0, rng.gen_range(-radius..radius));
        let heading = Quat::from_axis_angle(&Vec3::y_axis(), rng.gen_range(0.0..std::f32::consts::TAU));

        let handle = self.enemies.spawn(&mut self.scene, position, heading)?;
        if let Some(enemy) = self.scene.payload_mut(handle) {
            enemy.revive(self.time, self.config.lifetime);
        }

        if let Some(enemy) = self.enemies.latest_spawn(&self.scene) {
            log::debug!(
                "t={:.2}s spawned {} at ({:.1}, {:.1}) with {} health",
                self.time,
                self.scene.name(handle)?,
                position.x,
                position.z,
                enemy.health
            );
        }
        Ok(())
    }

    fn release_expired(&mut self) -> Result<(), SceneError> {
        let expired: Vec<NodeHandle> = self
            .enemies
            .members()
            .iter()
            .copied()
            .filter(|&handle| {
                self.scene
                    .payload(handle)
                    .is_some_and(|enemy| enemy.is_expired(self.time))
            })
            .collect();

        for handle in expired {
            if self.scene.is_active(handle)? {
                self.enemies.release(&mut self.scene, handle)?;
                log::debug!("t={:.2}s released {}", self.time, self.scene.name(handle)?);
            }
        }
        Ok(())
    }

    fn report(&self) -> Result<(), SceneError> {
        let stats = self.enemies.stats();
        println!("Pool '{}' finished", self.config.template_name);
        println!("  capacity:     {}", self.enemies.capacity());
        println!("  expandable:   {}", self.enemies.expandable());
        println!("  active now:   {}", self.enemies.active_count(&self.scene)?);
        println!("  spawned:      {}", stats.spawned);
        println!("  recycled:     {}", stats.recycled);
        println!("  grown:        {}", stats.grown);
        println!("  evicted:      {}", stats.evicted);
        println!("  peak active:  {}", stats.peak_active);
        println!("  reuse ratio:  {:.2}", stats.reuse_ratio());

        let order: Vec<&str> = self
            .enemies
            .sibling_order(&self.scene)?
            .into_iter()
            .map(|handle| self.scene.name(handle))
            .collect::<Result<_, _>>()?;
        println!("  draw order:   {}", order.join(", "));

        for &handle in self.enemies.members() {
            if self.scene.is_active(handle)? {
                let world = self.scene.world_transform(handle)?;
                println!(
                    "  {} at ({:.1}, {:.1}, {:.1})",
                    self.scene.name(handle)?,
                    world.position.x,
                    world.position.y,
                    world.position.z
                );
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_from_file(&path)?,
        None => DemoConfig::default(),
    };
    config.validate()?;

    logging::init_with_level(&config.log_level);
    log::info!("Starting pool demo with {:?}", config.pool);

    let mut demo = PoolDemo::new(config)?;
    demo.run()
}
