//! Data-driven game balance
//!
//! Every gameplay number a designer might want to touch lives here. The
//! defaults are the shipped balance; a driver can override any subset from
//! JSON without recompiling.

use serde::{Deserialize, Serialize};

/// Gameplay balance knobs, all in world units and seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player top speed (units per second)
    pub player_speed: f32,
    /// Base projectile launch speed; enemy shots use fractions of this
    pub projectile_speed: f32,
    /// Time scale while the player moves (or just fired)
    pub time_scale_moving: f32,
    /// Time scale while the player stands still
    pub time_scale_stopped: f32,
    /// Per-frame exponential smoothing toward the target time scale
    pub time_scale_smoothing: f32,
    /// Per-frame multiplicative velocity damping with no input held
    pub player_friction: f32,
    /// Per-frame camera follow smoothing
    pub camera_smoothing: f32,
    /// Full-speed override duration after the player fires
    pub shoot_burst_duration: f32,
    /// Minimum wall-clock interval between player shots
    pub player_fire_cooldown: f32,
    /// Interval between enemy shots (simulation time)
    pub enemy_fire_cooldown: f32,
    /// Distance at which an enemy switches to its attacking state
    pub attack_range: f32,
    /// Maximum distance at which an enemy will fire
    pub fire_range: f32,
    /// Projectiles farther than this from the player are dropped
    pub projectile_max_distance: f32,
    /// Delay between successive spawns in a wave
    pub spawn_stagger: f32,
    /// Score awarded per enemy kill
    pub score_per_kill: u64,
    /// Shotgunner probability per spawn from level 5 on
    pub shotgunner_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 400.0,
            projectile_speed: 600.0,
            time_scale_moving: 1.0,
            time_scale_stopped: 0.05,
            time_scale_smoothing: 0.15,
            player_friction: 0.9,
            camera_smoothing: 0.1,
            shoot_burst_duration: 0.15,
            player_fire_cooldown: 0.3,
            enemy_fire_cooldown: 2.0,
            attack_range: 250.0,
            fire_range: 400.0,
            projectile_max_distance: 1000.0,
            spawn_stagger: 0.2,
            score_per_kill: 100,
            shotgunner_chance: 0.3,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; unspecified fields keep
    /// their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{"player_speed": 250.0}"#).unwrap();
        assert_eq!(tuning.player_speed, 250.0);
        assert_eq!(tuning.attack_range, Tuning::default().attack_range);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json_str("not json").is_err());
    }
}
