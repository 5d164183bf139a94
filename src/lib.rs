//! Overtime - a top-down arena shooter core
//!
//! Time moves only while the player moves: the whole world runs at a
//! near-frozen time scale whenever the player stands still, and snaps back
//! to full speed on movement or right after firing.
//!
//! Core modules:
//! - `sim`: the real-time simulation (world state, collision, per-frame step)
//! - `tuning`: data-driven game balance
//!
//! Rendering, input event wiring and menu screens are external collaborators:
//! a driver feeds held keys / pointer state into the [`sim::World`] and calls
//! [`sim::step`] once per frame, then reads the world back to draw it.

pub mod sim;
pub mod tuning;

pub use sim::{GamePhase, World, step};
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed structural constants. Gameplay balance lives in [`tuning::Tuning`].
pub mod consts {
    /// Viewport dimensions the camera centers on
    pub const VIEWPORT_WIDTH: f32 = 1200.0;
    pub const VIEWPORT_HEIGHT: f32 = 800.0;

    /// Square arena side length; boundary walls sit at +-ARENA_SIZE/2
    pub const ARENA_SIZE: f32 = 1600.0;
    /// Half-extent of the playable square
    pub const ARENA_HALF: f32 = ARENA_SIZE / 2.0;
    /// Boundary wall thickness
    pub const WALL_THICKNESS: f32 = 20.0;
    /// Safety margin kept from the boundary when placing enemies
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Maximum frame delta fed to the step (guards against frame hitches)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Duration of the dying phase before the game-over transition
    pub const DYING_DURATION: f32 = 1.0;
    /// Clearing this level ends the run
    pub const FINAL_LEVEL: u32 = 5;
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
