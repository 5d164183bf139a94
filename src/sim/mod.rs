//! Real-time simulation module
//!
//! All gameplay logic lives here. The module is deterministic for a given
//! seed and input sequence:
//! - One mutable [`World`] value, stepped once per rendered frame
//! - Seeded RNG only (no ambient entropy)
//! - No rendering or platform dependencies
//!
//! The driver owns the frame clock: it writes input into `world.input`,
//! calls [`step`] with the elapsed real time, then reads the world to draw.

pub mod collision;
pub mod effects;
pub mod layout;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{AxisCollision, axis_separated_collision, has_line_of_sight, overlaps_any_wall};
pub use layout::arena_walls;
pub use state::{
    AiState, Enemy, EnemyKind, GamePhase, InputState, Particle, Player, Projectile,
    ProjectileKind, ProjectileOwner, SpawnEntry, Wall, World,
};
pub use tick::step;
