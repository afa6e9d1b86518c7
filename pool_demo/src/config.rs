//! Demo configuration

use object_pooler::config::{Config, ConfigError, PoolConfig, SceneConfig};
use serde::{Deserialize, Serialize};

/// Settings for the simulated frame loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Name of the pooled prefab
    pub template_name: String,
    /// Pool construction settings
    pub pool: PoolConfig,
    /// Scene limits
    pub scene: SceneConfig,
    /// Number of simulated frames
    pub frames: u32,
    /// Seconds per frame
    pub frame_time: f32,
    /// Frames between spawns
    pub spawn_interval: u32,
    /// Seconds a spawned enemy stays active, non-positive to keep it until evicted
    pub lifetime: f32,
    /// Half-extent of the square spawn area
    pub arena_radius: f32,
}

impl DemoConfig {
    /// Reject values the frame loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval == 0 {
            return Err(ConfigError::Invalid("spawn_interval must be at least 1".to_string()));
        }
        if !self.frame_time.is_finite() || self.frame_time <= 0.0 {
            return Err(ConfigError::Invalid("frame_time must be a positive number".to_string()));
        }
        if !self.arena_radius.is_finite() || self.arena_radius <= 0.0 {
            return Err(ConfigError::Invalid("arena_radius must be a positive number".to_string()));
        }
        if !self.lifetime.is_finite() {
            return Err(ConfigError::Invalid("lifetime must be a finite number".to_string()));
        }
        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            template_name: "Enemy".to_string(),
            pool: PoolConfig::new(4, false),
            scene: SceneConfig::default(),
            frames: 240,
            frame_time: 1.0 / 60.0,
            spawn_interval: 15,
            lifetime: 1.5,
            arena_radius: 20.0,
        }
    }
}

impl Config for DemoConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_spawn_interval_rejected() {
        let config = DemoConfig {
            spawn_interval: 0,
            ..DemoConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_nan_and_infinite_values_rejected() {
        let config: DemoConfig = toml::from_str("arena_radius = nan\nframe_time = nan").expect("Should parse");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config: DemoConfig = toml::from_str("arena_radius = nan").expect("Should parse");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config: DemoConfig = toml::from_str("arena_radius = inf").expect("Should parse");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config: DemoConfig = toml::from_str("lifetime = nan").expect("Should parse");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DemoConfig = toml::from_str(
            r#"
            frames = 10

            [pool]
            expandable = true
            "#,
        )
        .expect("Should parse");

        assert_eq!(config.frames, 10);
        assert!(config.pool.expandable);
        assert_eq!(config.pool.size, 10);
        assert_eq!(config.template_name, "Enemy");
    }
}
