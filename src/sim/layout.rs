//! Arena layout generator
//!
//! The layout is fixed: identical walls every level and every session. Only
//! the spawn counts and enemy mix change with the level.

use crate::consts::{ARENA_HALF, ARENA_SIZE, WALL_THICKNESS};

use super::state::Wall;

/// Build the full wall set: four boundary walls enclosing the square arena
/// plus the interior pillars and cover walls.
pub fn arena_walls() -> Vec<Wall> {
    let mut walls = vec![
        // Boundary
        Wall::new(-ARENA_HALF, -ARENA_HALF, ARENA_SIZE, WALL_THICKNESS),
        Wall::new(-ARENA_HALF, ARENA_HALF - WALL_THICKNESS, ARENA_SIZE, WALL_THICKNESS),
        Wall::new(-ARENA_HALF, -ARENA_HALF, WALL_THICKNESS, ARENA_SIZE),
        Wall::new(ARENA_HALF - WALL_THICKNESS, -ARENA_HALF, WALL_THICKNESS, ARENA_SIZE),
    ];

    // Corner pillars and a center block
    walls.extend_from_slice(&[
        Wall::new(-200.0, -200.0, 60.0, 60.0),
        Wall::new(200.0, -200.0, 60.0, 60.0),
        Wall::new(-200.0, 200.0, 60.0, 60.0),
        Wall::new(200.0, 200.0, 60.0, 60.0),
        Wall::new(0.0, 0.0, 80.0, 80.0),
    ]);

    // Cover walls on each approach
    walls.extend_from_slice(&[
        Wall::new(-400.0, -50.0, 200.0, 20.0),
        Wall::new(400.0, -50.0, 200.0, 20.0),
        Wall::new(-50.0, -400.0, 20.0, 200.0),
        Wall::new(-50.0, 400.0, 20.0, 200.0),
    ]);

    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_layout_is_deterministic() {
        assert_eq!(arena_walls(), arena_walls());
    }

    #[test]
    fn test_wall_count() {
        // 4 boundary + 5 pillars + 4 cover walls
        assert_eq!(arena_walls().len(), 13);
    }

    #[test]
    fn test_boundary_encloses_arena() {
        let walls = arena_walls();
        // A disc pushed against each edge of the playable area hits a wall
        let r = 10.0;
        let inside = ARENA_HALF - WALL_THICKNESS - r + 1.0;
        for probe in [
            Vec2::new(0.0, -inside - 2.0),
            Vec2::new(0.0, inside + 2.0),
            Vec2::new(-inside - 2.0, 300.0),
            Vec2::new(inside + 2.0, 300.0),
        ] {
            assert!(
                super::super::collision::overlaps_any_wall(probe, r, &walls),
                "expected boundary hit at {probe:?}"
            );
        }
        // The nominal player start is clear
        assert!(!super::super::collision::overlaps_any_wall(
            Vec2::new(0.0, 300.0),
            30.0,
            &walls
        ));
    }
}
