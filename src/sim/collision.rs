//! Geometry and collision utilities
//!
//! All wall tests use the expanded-rectangle (Minkowski sum) form: a disc of
//! radius `r` overlaps a rectangle iff its center lies inside the rectangle
//! grown by `r` on every side.

use glam::Vec2;

use super::state::Wall;

/// Disc vs. axis-aligned rectangle overlap.
#[inline]
pub fn disc_overlaps_rect(p: Vec2, radius: f32, wall: &Wall) -> bool {
    p.x + radius > wall.pos.x
        && p.x - radius < wall.pos.x + wall.size.x
        && p.y + radius > wall.pos.y
        && p.y - radius < wall.pos.y + wall.size.y
}

/// Whether a disc overlaps any wall. Short-circuits on the first hit.
pub fn overlaps_any_wall(p: Vec2, radius: f32, walls: &[Wall]) -> bool {
    walls.iter().any(|wall| disc_overlaps_rect(p, radius, wall))
}

/// Per-axis blocked flags for player movement resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCollision {
    pub x: bool,
    pub y: bool,
}

/// Axis-separated movement test: does moving to `candidate.x` collide given
/// the *current* y, and moving to `candidate.y` collide given the *current*
/// x? Testing each axis independently lets a diagonal move into a corner
/// slide along the open axis.
pub fn axis_separated_collision(
    candidate: Vec2,
    radius: f32,
    walls: &[Wall],
    current: Vec2,
) -> AxisCollision {
    let mut hit = AxisCollision { x: false, y: false };

    for wall in walls {
        let x0 = wall.pos.x;
        let x1 = wall.pos.x + wall.size.x;
        let y0 = wall.pos.y;
        let y1 = wall.pos.y + wall.size.y;

        if candidate.x + radius > x0
            && candidate.x - radius < x1
            && current.y + radius > y0
            && current.y - radius < y1
        {
            hit.x = true;
        }

        if candidate.y + radius > y0
            && candidate.y - radius < y1
            && current.x + radius > x0
            && current.x - radius < x1
        {
            hit.y = true;
        }

        if hit.x && hit.y {
            break;
        }
    }

    hit
}

/// Number of probe points sampled along a sight line
const LOS_SAMPLES: u32 = 10;
/// Probe disc radius for sight-line sampling
const LOS_PROBE_RADIUS: f32 = 5.0;

/// Sampled line-of-sight check: probes evenly spaced points along the
/// segment and fails if any lands in a wall. Coarse by design; a shot only
/// needs a roughly clear lane.
pub fn has_line_of_sight(from: Vec2, to: Vec2, walls: &[Wall]) -> bool {
    let delta = to - from;
    for i in 1..LOS_SAMPLES {
        let probe = from + delta * (i as f32 / LOS_SAMPLES as f32);
        if overlaps_any_wall(probe, LOS_PROBE_RADIUS, walls) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wall() -> Wall {
        Wall::new(50.0, -10.0, 20.0, 20.0)
    }

    #[test]
    fn test_disc_overlap_at_boundary() {
        let w = wall();
        let eps = 0.001;
        // Disc approaching the left edge: touching exactly is not overlap
        // (strict inequality), inside by epsilon is.
        assert!(!disc_overlaps_rect(Vec2::new(40.0, 0.0), 10.0, &w));
        assert!(!disc_overlaps_rect(Vec2::new(40.0 - eps, 0.0), 10.0, &w));
        assert!(disc_overlaps_rect(Vec2::new(40.0 + eps, 0.0), 10.0, &w));
        // And the top edge
        assert!(!disc_overlaps_rect(Vec2::new(60.0, -20.0), 10.0, &w));
        assert!(disc_overlaps_rect(Vec2::new(60.0, -20.0 + eps), 10.0, &w));
    }

    #[test]
    fn test_overlaps_any_wall_short_circuits_to_true() {
        let walls = [Wall::new(-1000.0, -1000.0, 1.0, 1.0), wall()];
        assert!(overlaps_any_wall(Vec2::new(60.0, 0.0), 5.0, &walls));
        assert!(!overlaps_any_wall(Vec2::new(200.0, 200.0), 5.0, &walls));
        assert!(!overlaps_any_wall(Vec2::new(200.0, 200.0), 5.0, &[]));
    }

    #[test]
    fn test_axis_separated_slide_scenario() {
        // Player at the origin with radius 20 trying to reach x=55: the x
        // move is blocked, the y move stays open, so movement resolves to a
        // slide along y.
        let walls = [wall()];
        let hit = axis_separated_collision(Vec2::new(55.0, 0.0), 20.0, &walls, Vec2::ZERO);
        assert!(hit.x);
        assert!(!hit.y);
    }

    #[test]
    fn test_axis_separated_clear_when_far() {
        let walls = [wall()];
        let hit =
            axis_separated_collision(Vec2::new(0.0, 200.0), 20.0, &walls, Vec2::new(0.0, 195.0));
        assert!(!hit.x);
        assert!(!hit.y);
    }

    #[test]
    fn test_line_of_sight_blocked_by_wall() {
        let walls = [wall()];
        // Straight line through the wall
        assert!(!has_line_of_sight(
            Vec2::new(0.0, 0.0),
            Vec2::new(120.0, 0.0),
            &walls
        ));
        // Line passing well clear of it
        assert!(has_line_of_sight(
            Vec2::new(0.0, 100.0),
            Vec2::new(120.0, 100.0),
            &walls
        ));
        // Degenerate zero-length segment from open space
        assert!(has_line_of_sight(Vec2::ZERO, Vec2::ZERO, &walls));
    }

    proptest! {
        #[test]
        fn prop_overlap_matches_expanded_rect(
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
            r in 0.1f32..50.0,
            wx in -400.0f32..400.0,
            wy in -400.0f32..400.0,
            ww in 1.0f32..200.0,
            wh in 1.0f32..200.0,
        ) {
            let w = Wall::new(wx, wy, ww, wh);
            let expected = px + r > wx && px - r < wx + ww && py + r > wy && py - r < wy + wh;
            prop_assert_eq!(disc_overlaps_rect(Vec2::new(px, py), r, &w), expected);
            prop_assert_eq!(overlaps_any_wall(Vec2::new(px, py), r, &[w]), expected);
        }
    }
}
