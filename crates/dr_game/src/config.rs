//! Tunable gameplay constants, optionally overridden from a JSON file.
//!
//! Every field has a default, so a config file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPhysics {
    /// Downward acceleration, px/s².
    pub gravity: f32,
    /// Per-tick multiplier applied to horizontal velocity without input.
    pub friction: f32,
    /// Horizontal acceleration while a direction is held, px/s².
    pub accel_x: f32,
    /// Initial vertical velocity of a jump (negative is up).
    pub jump_velocity: f32,
    pub max_speed_x: f32,
    /// Clamp for |velocity.y| in both directions.
    pub max_speed_y: f32,
    pub double_jump_cooldown: f32,
    /// Falling below this world Y is instant death.
    pub fall_death_y: f32,
    /// Constant walking speed in the top-down maze.
    pub top_down_speed: f32,
    pub max_health: i32,
    pub starting_lives: i32,
}

impl Default for PlayerPhysics {
    fn default() -> Self {
        Self {
            gravity: 800.0,
            friction: 0.85,
            accel_x: 1200.0,
            jump_velocity: -350.0,
            max_speed_x: 200.0,
            max_speed_y: 500.0,
            double_jump_cooldown: 3.0,
            fall_death_y: 800.0,
            top_down_speed: 150.0,
            max_health: 100,
            starting_lives: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    pub spike_damage: i32,
    pub enemy_riddle_reward: i32,
    pub enemy_riddle_heal: i32,
    pub enemy_riddle_damage: i32,
    pub coin_score: i32,
    pub key_score: i32,
    pub enemy_patrol_distance: f32,
    pub enemy_speed: f32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            spike_damage: 25,
            enemy_riddle_reward: 500,
            enemy_riddle_heal: 25,
            enemy_riddle_damage: 25,
            coin_score: 100,
            key_score: 1000,
            enemy_patrol_distance: 64.0,
            enemy_speed: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRules {
    pub initial_hints: i32,
    pub hint_health_cost: i32,
    pub max_dt: f32,
    pub target_fps: u32,
    /// Seconds between a non-final death and the respawn.
    pub respawn_delay: f32,
    pub rng_seed: u64,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            initial_hints: 3,
            hint_health_cost: 5,
            max_dt: 0.1,
            target_fps: 60,
            respawn_delay: 1.0,
            rng_seed: 0xDEA7_2161,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PlayerPhysics,
    pub combat: CombatRules,
    pub session: SessionRules,
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    let p = &config.physics;
    if !(p.friction > 0.0 && p.friction <= 1.0) {
        return Err("Config validation failed: physics.friction must be in (0, 1]".to_string());
    }
    if p.max_speed_x <= 0.0 || p.max_speed_y <= 0.0 {
        return Err("Config validation failed: physics max speeds must be > 0".to_string());
    }
    if p.max_health <= 0 {
        return Err("Config validation failed: physics.max_health must be > 0".to_string());
    }
    if p.starting_lives < 1 {
        return Err("Config validation failed: physics.starting_lives must be >= 1".to_string());
    }

    let c = &config.combat;
    for (name, value) in [
        ("spike_damage", c.spike_damage),
        ("enemy_riddle_damage", c.enemy_riddle_damage),
        ("enemy_riddle_heal", c.enemy_riddle_heal),
    ] {
        if value < 0 {
            return Err(format!("Config validation failed: combat.{name} must be >= 0"));
        }
    }

    let s = &config.session;
    if s.target_fps == 0 {
        return Err("Config validation failed: session.target_fps must be > 0".to_string());
    }
    if s.max_dt <= 0.0 {
        return Err("Config validation failed: session.max_dt must be > 0".to_string());
    }
    if s.initial_hints < 0 || s.hint_health_cost < 0 {
        return Err("Config validation failed: hint settings must be >= 0".to_string());
    }
    Ok(())
}
