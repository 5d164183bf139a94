//! Entity spawner
//!
//! Player placement and the staggered enemy wave. Wave spawns are deferred:
//! `schedule_wave` queues one entry per enemy and the step drains the queue
//! against session time, preserving spawn order. Placement failures degrade
//! through a fallback chain and never error the session.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{ARENA_HALF, SPAWN_MARGIN};
use crate::unit_from_angle;

use super::collision::overlaps_any_wall;
use super::state::{AiState, Enemy, EnemyKind, Player, SpawnEntry, Wall, World};

/// Nominal player start position
const PLAYER_START: Vec2 = Vec2::new(0.0, 300.0);
/// Bounded retry budget for randomized placement
const PLACEMENT_ATTEMPTS: u32 = 50;
/// Extra clearance demanded around a spawn position
const PLACEMENT_MARGIN: f32 = 10.0;
/// Half-extent of the randomized player respawn square
const PLAYER_RETRY_RANGE: f32 = 200.0;

/// Base wave size before the per-level increment
const WAVE_BASE_COUNT: u32 = 3;
/// Extra enemies per level
const WAVE_PER_LEVEL: u32 = 2;
/// Number of forced shotgunners opening level 4
const LEVEL4_FORCED_SHOTGUNNERS: u32 = 5;

/// Place the player: nominal start, then bounded randomized retries near the
/// origin. If every attempt collides the last tried position is accepted;
/// spawn failure never blocks the game.
pub fn place_player(walls: &[Wall], rng: &mut Pcg32) -> Player {
    let mut pos = PLAYER_START;
    let radius = Player::new(Vec2::ZERO).radius;

    for _ in 0..PLACEMENT_ATTEMPTS {
        if !overlaps_any_wall(pos, radius + PLACEMENT_MARGIN, walls) {
            break;
        }
        pos = Vec2::new(
            rng.random_range(-PLAYER_RETRY_RANGE..PLAYER_RETRY_RANGE),
            rng.random_range(-PLAYER_RETRY_RANGE..PLAYER_RETRY_RANGE),
        );
    }

    Player::new(pos)
}

/// Enemy count for a level
pub fn wave_size(level: u32) -> u32 {
    WAVE_BASE_COUNT + WAVE_PER_LEVEL * level
}

/// Queue the level's wave as time-deferred spawn entries, one per enemy at
/// fixed stagger offsets. Level 4 telegraphs the shotgun mechanic: the first
/// five spawns are pinned shotgunners, the remainder pinned regular.
pub fn schedule_wave(world: &mut World) {
    let level = world.level;
    let stagger = world.tuning.spawn_stagger;
    for i in 0..wave_size(level) {
        let force_shotgunner = if level == 4 {
            Some(i < LEVEL4_FORCED_SHOTGUNNERS)
        } else {
            None
        };
        world.spawn_queue.push_back(SpawnEntry {
            fire_at: world.session_time + i as f32 * stagger,
            level,
            force_shotgunner,
        });
    }
}

/// Drain every due spawn entry, strictly in queue order. Once the queue
/// empties the level counts as fully started, which arms level-complete
/// detection.
pub fn drain_spawn_queue(world: &mut World) {
    let mut spawned = false;
    while let Some(entry) = world.spawn_queue.front().copied() {
        if entry.fire_at > world.session_time {
            break;
        }
        world.spawn_queue.pop_front();
        spawn_enemy(world, entry);
        spawned = true;
    }
    if spawned && world.spawn_queue.is_empty() {
        world.level_started = true;
        log::debug!("level {} wave fully spawned", world.level);
    }
}

/// Spawn a single enemy from a queue entry. No-op if the player is already
/// gone (the entry is still consumed).
fn spawn_enemy(world: &mut World, entry: SpawnEntry) {
    let Some(player_pos) = world.player.as_ref().map(|p| p.pos) else {
        return;
    };

    let kinds = EnemyKind::unlocked_for_level(entry.level);
    let kind = kinds[world.rng.random_range(0..kinds.len())];
    let shotgunner = match entry.force_shotgunner {
        Some(forced) => forced,
        None => entry.level >= 5 && world.rng.random_bool(world.tuning.shotgunner_chance),
    };

    let pos = find_spawn_position(
        player_pos,
        entry.level,
        kind.radius(),
        &world.walls,
        &mut world.rng,
    );
    let id = world.next_entity_id();
    world.enemies.push(Enemy {
        id,
        kind,
        pos,
        vel: Vec2::ZERO,
        radius: kind.radius(),
        health: 1,
        ai_state: AiState::Idle,
        shotgunner,
        shoot_cooldown: 0.0,
    });
}

/// Pick an enemy position in a level-scaled distance band around the player,
/// rejecting out-of-bounds and walled candidates. Falls back to clamped
/// cardinal offsets, then the arena center (which is not guaranteed clear;
/// accepted edge case).
pub(crate) fn find_spawn_position(
    player_pos: Vec2,
    level: u32,
    radius: f32,
    walls: &[Wall],
    rng: &mut Pcg32,
) -> Vec2 {
    let boundary = ARENA_HALF - SPAWN_MARGIN;
    // Tighter bands at higher levels keep spawns reachable
    let min_dist = (300.0 - level as f32 * 20.0).max(200.0);
    let max_dist = (400.0 - level as f32 * 20.0).max(300.0);

    for _ in 0..PLACEMENT_ATTEMPTS {
        let angle = rng.random_range(0.0..TAU);
        let dist = rng.random_range(min_dist..max_dist);
        let candidate = player_pos + unit_from_angle(angle) * dist;

        if candidate.x.abs() > boundary || candidate.y.abs() > boundary {
            continue;
        }
        if !overlaps_any_wall(candidate, radius + PLACEMENT_MARGIN, walls) {
            return candidate;
        }
    }

    // Cardinal offsets from the player, clamped into bounds
    for offset in [
        Vec2::new(300.0, 0.0),
        Vec2::new(-300.0, 0.0),
        Vec2::new(0.0, 300.0),
        Vec2::new(0.0, -300.0),
    ] {
        let candidate = (player_pos + offset).clamp(Vec2::splat(-boundary), Vec2::splat(boundary));
        if !overlaps_any_wall(candidate, radius + PLACEMENT_MARGIN, walls) {
            log::debug!("enemy spawn fell back to cardinal offset {candidate:?}");
            return candidate;
        }
    }

    log::debug!("enemy spawn fell back to arena center");
    Vec2::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;

    fn world_at_level(level: u32) -> World {
        let mut world = World::new(42, Tuning::default());
        world.start_game();
        if level > 1 {
            world.start_level(level);
        }
        world
    }

    #[test]
    fn test_wave_size_formula() {
        assert_eq!(wave_size(1), 5);
        assert_eq!(wave_size(2), 7);
        assert_eq!(wave_size(4), 11);
        assert_eq!(wave_size(5), 13);
    }

    #[test]
    fn test_schedule_queues_one_entry_per_enemy() {
        let world = world_at_level(3);
        assert_eq!(world.spawn_queue.len(), 9);
        // Entries are ordered by fire time
        let times: Vec<f32> = world.spawn_queue.iter().map(|e| e.fire_at).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_level4_forces_first_five_shotgunners() {
        let mut world = world_at_level(4);
        let forced: Vec<Option<bool>> = world
            .spawn_queue
            .iter()
            .map(|e| e.force_shotgunner)
            .collect();
        assert_eq!(forced.len(), 11);
        assert!(forced[..5].iter().all(|f| *f == Some(true)));
        assert!(forced[5..].iter().all(|f| *f == Some(false)));

        // Drain the whole queue and check the spawned enemies in order
        world.session_time += 60.0;
        drain_spawn_queue(&mut world);
        assert_eq!(world.enemies.len(), 11);
        assert!(world.enemies[..5].iter().all(|e| e.shotgunner));
        assert!(world.enemies[5..].iter().all(|e| !e.shotgunner));
        assert!(world.level_started);
    }

    #[test]
    fn test_queue_drains_only_due_entries() {
        let mut world = world_at_level(1);
        // First entry fires at schedule time, the rest are staggered
        drain_spawn_queue(&mut world);
        assert_eq!(world.enemies.len(), 1);
        assert!(!world.level_started);

        world.session_time += world.tuning.spawn_stagger * 10.0;
        drain_spawn_queue(&mut world);
        assert_eq!(world.enemies.len(), 5);
        assert!(world.level_started);
    }

    #[test]
    fn test_fresh_enemies_start_idle_with_one_health() {
        let mut world = world_at_level(1);
        world.session_time += 60.0;
        drain_spawn_queue(&mut world);
        assert!(world
            .enemies
            .iter()
            .all(|e| e.ai_state == AiState::Idle && e.health == 1));
    }

    #[test]
    fn test_player_placement_nominal_start() {
        let mut rng = Pcg32::seed_from_u64(7);
        let player = place_player(&super::super::layout::arena_walls(), &mut rng);
        assert_eq!(player.pos, PLAYER_START);
    }

    #[test]
    fn test_player_placement_retries_out_of_wall() {
        // A wall sitting exactly on the nominal start forces a reroll; the
        // retry square near the origin is clear of it.
        let walls = [Wall::new(-40.0, 260.0, 80.0, 80.0)];
        let mut rng = Pcg32::seed_from_u64(7);
        let player = place_player(&walls, &mut rng);
        assert_ne!(player.pos, PLAYER_START);
        assert!(!overlaps_any_wall(
            player.pos,
            player.radius + PLACEMENT_MARGIN,
            &walls
        ));
    }

    #[test]
    fn test_enemy_spawn_within_distance_band() {
        let walls = super::super::layout::arena_walls();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..20 {
            let pos = find_spawn_position(Vec2::ZERO, 1, 20.0, &walls, &mut rng);
            let dist = pos.length();
            assert!(
                (279.0..381.0).contains(&dist),
                "distance {dist} outside level-1 band"
            );
        }
    }

    #[test]
    fn test_spawn_falls_back_to_center_when_walled_in() {
        // One wall covering everything: every candidate and every cardinal
        // fallback collides, leaving the unconditional center fallback.
        let walls = [Wall::new(-2000.0, -2000.0, 4000.0, 4000.0)];
        let mut rng = Pcg32::seed_from_u64(3);
        let pos = find_spawn_position(Vec2::ZERO, 1, 20.0, &walls, &mut rng);
        assert_eq!(pos, Vec2::ZERO);
    }
}
