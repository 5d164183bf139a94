//! World state and core simulation types
//!
//! Everything the per-frame step mutates lives in one owned [`World`] value.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Player just died; only particles animate until the timer expires
    Dying,
    /// All enemies down with more levels ahead
    LevelComplete,
    /// Run ended (check `World::game_won` for win vs. loss)
    GameOver,
}

/// Enemy behavior state, re-evaluated every scaled tick.
///
/// `Idle` is only ever the freshly-spawned value; the AI immediately
/// reassigns to `Chasing` or `Attacking` and never assigns `Idle` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Idle,
    Chasing,
    Attacking,
}

/// Enemy archetypes with fixed color/speed/radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Intern,
    Manager,
    Security,
    Janitor,
}

impl EnemyKind {
    pub fn color(&self) -> u32 {
        match self {
            EnemyKind::Intern => 0xFF0000,
            EnemyKind::Manager => 0xCC0000,
            EnemyKind::Security => 0x990000,
            EnemyKind::Janitor => 0xFF6600,
        }
    }

    /// Movement speed in units per second
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Intern => 200.0,
            EnemyKind::Manager => 150.0,
            EnemyKind::Security => 180.0,
            EnemyKind::Janitor => 250.0,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            EnemyKind::Intern => 20.0,
            EnemyKind::Manager => 25.0,
            EnemyKind::Security => 22.0,
            EnemyKind::Janitor => 18.0,
        }
    }

    /// Archetype pool available at a given level; grows up to all four.
    pub fn unlocked_for_level(level: u32) -> &'static [EnemyKind] {
        match level {
            0 | 1 => &[EnemyKind::Intern],
            2 => &[EnemyKind::Intern, EnemyKind::Manager],
            3 => &[EnemyKind::Intern, EnemyKind::Manager, EnemyKind::Security],
            _ => &[
                EnemyKind::Intern,
                EnemyKind::Manager,
                EnemyKind::Security,
                EnemyKind::Janitor,
            ],
        }
    }
}

/// Cosmetic projectile sub-types (office supplies); purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Stapler,
    Pencil,
    Keyboard,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 3] = [
        ProjectileKind::Stapler,
        ProjectileKind::Pencil,
        ProjectileKind::Keyboard,
    ];

    pub fn color(&self) -> u32 {
        match self {
            ProjectileKind::Stapler => 0x4444FF,
            ProjectileKind::Pencil => 0xFFAA00,
            ProjectileKind::Keyboard => 0xAA00FF,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            ProjectileKind::Stapler => 8.0,
            ProjectileKind::Pencil => 5.0,
            ProjectileKind::Keyboard => 10.0,
        }
    }
}

/// Who fired a projectile. Opaque discriminator only: it selects the target
/// class (enemies vs. the player) and is never resolved back to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// The player avatar. At most one exists; `World::player` being `None` is
/// the authoritative "player is dead" signal.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Raw move intent from held keys, unnormalized
    pub move_dir: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub is_moving: bool,
    /// Session-time timestamp of the last shot (wall-clock, unscaled)
    pub last_shot_time: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            move_dir: Vec2::ZERO,
            radius: 20.0,
            health: 100.0,
            max_health: 100.0,
            is_moving: false,
            last_shot_time: f32::NEG_INFINITY,
        }
    }
}

/// An enemy entity. One hit kills: max health is 1.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub health: i32,
    pub ai_state: AiState,
    /// Fires a three-pellet spread instead of a single shot
    pub shotgunner: bool,
    /// Seconds of simulation time until the next allowed shot
    pub shoot_cooldown: f32,
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
    /// 1 for player shots; enemy shots carry a nominal 100 (contact with the
    /// player kills outright, so the value is informational)
    pub damage: i32,
    pub owner: ProjectileOwner,
    pub kind: ProjectileKind,
}

/// Axis-aligned wall rectangle (origin corner + extent). Immutable once the
/// layout is generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Wall {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }
}

/// A cosmetic particle; never affects the simulation.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime fraction, 1 -> 0
    pub life: f32,
    pub max_life: f32,
    pub color: u32,
    /// Base size; rendered size scales with remaining life
    pub size: f32,
}

/// Raw continuous input state, written by the driver each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in viewport-local coordinates
    pub pointer: Vec2,
    /// Pointer held down (fire)
    pub fire: bool,
}

/// One deferred enemy spawn: fires when `session_time` reaches `fire_at`.
/// Entries drain strictly in queue order.
#[derive(Debug, Clone, Copy)]
pub struct SpawnEntry {
    pub fire_at: f32,
    pub level: u32,
    /// `Some` pins the shotgunner flag (level 4 telegraphing); `None` rolls
    /// the level-dependent chance at fire time.
    pub force_shotgunner: Option<bool>,
}

/// Complete session state: the single owned world value the step mutates.
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    /// Session seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Current level, 1-based
    pub level: u32,
    pub score: u64,
    pub kills: u32,
    /// Set when the final level is cleared
    pub game_won: bool,
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub walls: Vec<Wall>,
    pub particles: Vec<Particle>,
    /// Smoothed-follow view offset (world position of the viewport origin)
    pub camera: Vec2,
    pub input: InputState,
    /// Accumulated unscaled (clamped) frame time; the wall clock for
    /// fire cooldowns and the spawn queue
    pub session_time: f32,
    /// Full-speed override remaining after a player shot
    pub shoot_burst: f32,
    /// Smoothed current time scale, exposed for UI
    pub time_scale: f32,
    /// True once the level's staggered spawn sequence has finished issuing;
    /// gates level-complete detection
    pub level_started: bool,
    /// Unscaled time spent in the dying phase
    pub dying_timer: f32,
    pub spawn_queue: VecDeque<SpawnEntry>,
    next_id: u32,
}

impl World {
    /// Create a fresh session in the menu phase.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            kills: 0,
            game_won: false,
            player: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            walls: Vec::new(),
            particles: Vec::new(),
            camera: Vec2::ZERO,
            input: InputState::default(),
            session_time: 0.0,
            shoot_burst: 0.0,
            time_scale: 1.0,
            level_started: false,
            dying_timer: 0.0,
            spawn_queue: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a fresh run at level 1, resetting score and kill count.
    pub fn start_game(&mut self) {
        self.score = 0;
        self.kills = 0;
        self.game_won = false;
        self.camera = Vec2::ZERO;
        self.time_scale = 1.0;
        self.start_level(1);
    }

    /// (Re)initialize the arena for a level: regenerate the fixed layout,
    /// place the player, and schedule the enemy wave.
    ///
    /// Clearing the spawn queue here is the stale-session guard: deferred
    /// spawns scheduled for a previous level can never fire into this one.
    pub fn start_level(&mut self, level: u32) {
        self.level = level;
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.spawn_queue.clear();
        self.walls = super::layout::arena_walls();
        self.level_started = false;
        self.dying_timer = 0.0;
        self.shoot_burst = 0.0;
        self.player = Some(super::spawn::place_player(&self.walls, &mut self.rng));
        super::spawn::schedule_wave(self);
        self.phase = GamePhase::Playing;
        log::info!(
            "level {} started, {} spawns scheduled",
            level,
            self.spawn_queue.len()
        );
    }

    /// Move from the level-complete screen into the next level.
    pub fn advance_level(&mut self) {
        self.start_level(self.level + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_pool_grows_with_level() {
        assert_eq!(EnemyKind::unlocked_for_level(1).len(), 1);
        assert_eq!(EnemyKind::unlocked_for_level(2).len(), 2);
        assert_eq!(EnemyKind::unlocked_for_level(3).len(), 3);
        assert_eq!(EnemyKind::unlocked_for_level(4).len(), 4);
        assert_eq!(EnemyKind::unlocked_for_level(9).len(), 4);
    }

    #[test]
    fn test_start_level_resets_session_entities() {
        let mut world = World::new(1, Tuning::default());
        world.start_game();
        let id = world.next_entity_id();
        world.enemies.push(Enemy {
            id,
            kind: EnemyKind::Intern,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 20.0,
            health: 1,
            ai_state: AiState::Idle,
            shotgunner: false,
            shoot_cooldown: 0.0,
        });
        world.start_level(2);
        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert!(!world.level_started);
        assert!(world.player.is_some());
        assert_eq!(world.phase, GamePhase::Playing);
        // wall layout is identical across levels
        assert_eq!(world.walls, super::super::layout::arena_walls());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = World::new(1, Tuning::default());
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert_ne!(a, b);
    }
}
