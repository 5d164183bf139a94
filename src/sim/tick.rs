//! Per-frame simulation step
//!
//! One mutable pass over the whole [`World`], phase-gated. The playing phase
//! runs a fixed sequence: clock and spawn queue, time-scale smoothing, player
//! movement on unscaled time, then enemies, projectiles and particles on
//! scaled time, and finally level-complete detection. The dying phase only
//! animates particles until the timer hands off to game over.

use glam::Vec2;
use rand::Rng;

use crate::consts::{DYING_DURATION, FINAL_LEVEL, MAX_FRAME_DT, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::unit_from_angle;

use super::collision::{axis_separated_collision, has_line_of_sight, overlaps_any_wall};
use super::effects;
use super::spawn;
use super::state::{
    AiState, GamePhase, Projectile, ProjectileKind, ProjectileOwner, World,
};

/// Per-frame velocity damping applied to particles
const PARTICLE_DRAG: f32 = 0.95;
/// Particle life drain per scaled second
const PARTICLE_FADE: f32 = 2.0;
/// Particle life drain per unscaled second during the dying phase
const DYING_PARTICLE_FADE: f32 = 1.5;
/// Below this distance an aim direction is considered degenerate
const MIN_AIM_DISTANCE: f32 = 0.01;
/// Player projectiles spawn this far ahead of the player center
const PLAYER_MUZZLE_OFFSET: f32 = 30.0;
/// Shotgun pellets spawn this far ahead of the enemy center
const SHOTGUN_MUZZLE_OFFSET: f32 = 25.0;
/// Angular offset between shotgun pellets, radians
const SHOTGUN_SPREAD: f32 = 0.3;
/// Shotgun pellet speed as a fraction of the base projectile speed
const SHOTGUN_SPEED_FRACTION: f32 = 0.6;
/// Single enemy shot speed as a fraction of the base projectile speed
const SINGLE_SPEED_FRACTION: f32 = 0.7;
/// Overlap separation: each enemy moves half the overlap out
const SEPARATION_FACTOR: f32 = 0.5;
/// Particles in an enemy death burst
const DEATH_BURST: usize = 8;

/// A shot decided during the enemy pass, materialized afterwards.
struct PendingShot {
    origin: Vec2,
    dir: Vec2,
    shotgunner: bool,
}

/// Advance the simulation by one frame of `dt` seconds.
pub fn step(world: &mut World, dt: f32) {
    // Clamp away tab-switch sized frames
    let dt = dt.min(MAX_FRAME_DT);
    match world.phase {
        GamePhase::Playing => step_playing(world, dt),
        GamePhase::Dying => step_dying(world, dt),
        GamePhase::Menu | GamePhase::LevelComplete | GamePhase::GameOver => {}
    }
}

fn step_playing(world: &mut World, dt: f32) {
    let tuning = world.tuning.clone();

    world.session_time += dt;
    spawn::drain_spawn_queue(world);

    // Move intent from held keys
    let input = world.input;
    let mut move_dir = Vec2::ZERO;
    if input.up {
        move_dir.y -= 1.0;
    }
    if input.down {
        move_dir.y += 1.0;
    }
    if input.left {
        move_dir.x -= 1.0;
    }
    if input.right {
        move_dir.x += 1.0;
    }
    let is_moving = move_dir != Vec2::ZERO;

    world.shoot_burst = (world.shoot_burst - dt).max(0.0);

    // Time scale chases its target a fixed fraction per frame. Shooting
    // counts as motion so a standing player still sees the shot fly.
    let target = if is_moving || world.shoot_burst > 0.0 {
        tuning.time_scale_moving
    } else {
        tuning.time_scale_stopped
    };
    world.time_scale += (target - world.time_scale) * tuning.time_scale_smoothing;

    // Player moves on unscaled time; the slowdown never applies to them.
    if let Some(player) = world.player.as_mut() {
        player.move_dir = move_dir;
        player.is_moving = is_moving;
        if is_moving {
            player.vel = move_dir.normalize() * tuning.player_speed;
        } else {
            player.vel *= tuning.player_friction;
        }

        let candidate = player.pos + player.vel * dt;
        let hit = axis_separated_collision(candidate, player.radius, &world.walls, player.pos);
        if hit.x {
            player.vel.x = 0.0;
        } else {
            player.pos.x = candidate.x;
        }
        if hit.y {
            player.vel.y = 0.0;
        } else {
            player.pos.y = candidate.y;
        }

        let view_target = player.pos - Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT) * 0.5;
        world.camera += (view_target - world.camera) * tuning.camera_smoothing;
    }

    if input.fire {
        player_shoot(world);
    }

    let scaled = dt * world.time_scale;

    // Enemy pass: AI, movement, separation, fire decisions. Shots are
    // buffered so the spawn does not fight the enemy borrow.
    let mut pending_shots: Vec<PendingShot> = Vec::new();
    let mut contact_kill = false;
    if let Some((target_pos, player_radius)) =
        world.player.as_ref().map(|p| (p.pos, p.radius))
    {
        // Pre-move snapshot for pairwise separation
        let bodies: Vec<(Vec2, f32)> = world.enemies.iter().map(|e| (e.pos, e.radius)).collect();

        for (idx, enemy) in world.enemies.iter_mut().enumerate() {
            let to_player = target_pos - enemy.pos;
            let dist = to_player.length();

            enemy.ai_state = if dist < tuning.attack_range {
                AiState::Attacking
            } else {
                AiState::Chasing
            };

            // Always advance on the player, attacking or not
            if dist > 0.0 {
                enemy.vel = to_player / dist * enemy.kind.speed();
            }
            // Enemies slide with the plain overlap test per axis; only the
            // player gets the axis-separated treatment.
            let candidate = enemy.pos + enemy.vel * scaled;
            if !overlaps_any_wall(
                Vec2::new(candidate.x, enemy.pos.y),
                enemy.radius,
                &world.walls,
            ) {
                enemy.pos.x = candidate.x;
            }
            if !overlaps_any_wall(
                Vec2::new(enemy.pos.x, candidate.y),
                enemy.radius,
                &world.walls,
            ) {
                enemy.pos.y = candidate.y;
            }

            // Push out of overlapping neighbors, but never into a wall
            for (other_idx, &(other_pos, other_radius)) in bodies.iter().enumerate() {
                if other_idx == idx {
                    continue;
                }
                let delta = enemy.pos - other_pos;
                let d = delta.length();
                let min_d = enemy.radius + other_radius;
                if d > 0.0 && d < min_d {
                    let pushed = enemy.pos + delta / d * ((min_d - d) * SEPARATION_FACTOR);
                    if !overlaps_any_wall(
                        Vec2::new(pushed.x, enemy.pos.y),
                        enemy.radius,
                        &world.walls,
                    ) {
                        enemy.pos.x = pushed.x;
                    }
                    if !overlaps_any_wall(
                        Vec2::new(enemy.pos.x, pushed.y),
                        enemy.radius,
                        &world.walls,
                    ) {
                        enemy.pos.y = pushed.y;
                    }
                }
            }

            enemy.shoot_cooldown = (enemy.shoot_cooldown - scaled).max(0.0);
            if enemy.ai_state == AiState::Attacking
                && enemy.shoot_cooldown <= 0.0
                && dist < tuning.fire_range
                && dist >= MIN_AIM_DISTANCE
                && has_line_of_sight(enemy.pos, target_pos, &world.walls)
            {
                pending_shots.push(PendingShot {
                    origin: enemy.pos,
                    dir: to_player / dist,
                    shotgunner: enemy.shotgunner,
                });
                enemy.shoot_cooldown = tuning.enemy_fire_cooldown;
            }

            if enemy.pos.distance(target_pos) < enemy.radius + player_radius {
                contact_kill = true;
            }
        }
    }
    for shot in pending_shots {
        spawn_enemy_shot(world, shot);
    }
    if contact_kill {
        kill_player(world);
    }

    // Projectile pass. The vec is taken out of the world so impact effects
    // can borrow particles and rng freely.
    let player_body = world.player.as_ref().map(|p| (p.pos, p.radius));
    let range_anchor = player_body.map(|(pos, _)| pos).unwrap_or(world.camera);
    let mut player_hit = false;
    let projectiles = std::mem::take(&mut world.projectiles);
    let mut kept = Vec::with_capacity(projectiles.len());
    for mut proj in projectiles {
        proj.pos += proj.vel * scaled;

        if overlaps_any_wall(proj.pos, proj.radius, &world.walls) {
            effects::impact_burst(&mut world.particles, &mut world.rng, proj.pos, proj.color, 3);
            continue;
        }

        match proj.owner {
            ProjectileOwner::Player => {
                let mut consumed = false;
                for enemy in world.enemies.iter_mut() {
                    if enemy.health > 0
                        && proj.pos.distance(enemy.pos) < proj.radius + enemy.radius
                    {
                        enemy.health -= proj.damage;
                        consumed = true;
                        break;
                    }
                }
                if consumed {
                    effects::impact_burst(
                        &mut world.particles,
                        &mut world.rng,
                        proj.pos,
                        0xFF4444,
                        5,
                    );
                    continue;
                }
            }
            ProjectileOwner::Enemy => {
                if let Some((player_pos, player_radius)) = player_body {
                    if proj.pos.distance(player_pos) < proj.radius + player_radius {
                        player_hit = true;
                        continue;
                    }
                }
            }
        }

        if proj.pos.distance(range_anchor) > tuning.projectile_max_distance {
            continue;
        }
        kept.push(proj);
    }
    world.projectiles = kept;
    if player_hit {
        kill_player(world);
    }

    // Cull dead enemies, burst and score each one
    let mut deaths: Vec<Vec2> = Vec::new();
    world.enemies.retain(|enemy| {
        if enemy.health <= 0 {
            deaths.push(enemy.pos);
            false
        } else {
            true
        }
    });
    for pos in deaths {
        effects::impact_burst(&mut world.particles, &mut world.rng, pos, 0xFF0000, DEATH_BURST);
        world.score += tuning.score_per_kill;
        world.kills += 1;
        log::debug!("enemy down, score {}", world.score);
    }

    for particle in world.particles.iter_mut() {
        particle.pos += particle.vel * scaled;
        particle.vel *= PARTICLE_DRAG;
        particle.life -= PARTICLE_FADE * scaled;
    }
    world.particles.retain(|p| p.life > 0.0);

    // Level completion only arms once the wave has fully spawned
    if world.phase == GamePhase::Playing && world.level_started && world.enemies.is_empty() {
        if world.level >= FINAL_LEVEL {
            world.game_won = true;
            world.phase = GamePhase::GameOver;
            log::info!("final level cleared, score {}", world.score);
        } else {
            world.phase = GamePhase::LevelComplete;
            log::info!("level {} cleared, score {}", world.level, world.score);
        }
    }
}

/// Dying phase: the world freezes except for the death particles, which run
/// on unscaled time so the effect plays at full speed.
fn step_dying(world: &mut World, dt: f32) {
    for particle in world.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel *= PARTICLE_DRAG;
        particle.life -= DYING_PARTICLE_FADE * dt;
    }
    world.particles.retain(|p| p.life > 0.0);

    world.dying_timer += dt;
    if world.dying_timer >= DYING_DURATION {
        world.phase = GamePhase::GameOver;
        log::info!(
            "game over at level {}, score {} ({} kills)",
            world.level,
            world.score,
            world.kills
        );
    }
}

/// Fire the player weapon if the cooldown allows. Aim comes from the pointer
/// converted to world space; a degenerate aim vector drops the shot.
fn player_shoot(world: &mut World) {
    let cooldown = world.tuning.player_fire_cooldown;
    let now = world.session_time;
    let aim_point = world.input.pointer + world.camera;

    let Some(player) = world.player.as_mut() else {
        return;
    };
    if now - player.last_shot_time < cooldown {
        return;
    }
    let aim = aim_point - player.pos;
    if aim.length_squared() < MIN_AIM_DISTANCE * MIN_AIM_DISTANCE {
        return;
    }
    player.last_shot_time = now;
    let dir = aim / aim.length();
    let origin = player.pos + dir * PLAYER_MUZZLE_OFFSET;

    let kind = ProjectileKind::ALL[world.rng.random_range(0..ProjectileKind::ALL.len())];
    let id = world.next_entity_id();
    world.projectiles.push(Projectile {
        id,
        pos: origin,
        vel: dir * world.tuning.projectile_speed,
        radius: kind.radius(),
        color: kind.color(),
        damage: 1,
        owner: ProjectileOwner::Player,
        kind,
    });

    // Shooting briefly counts as motion
    world.shoot_burst = world.tuning.shoot_burst_duration;
    effects::impact_burst(&mut world.particles, &mut world.rng, origin, 0xFFFF00, 3);
}

/// Materialize an enemy shot: a three-pellet spread for shotgunners, a
/// single slower shot otherwise.
fn spawn_enemy_shot(world: &mut World, shot: PendingShot) {
    let speed = world.tuning.projectile_speed;
    if shot.shotgunner {
        let base_angle = shot.dir.to_angle();
        for spread in [-SHOTGUN_SPREAD, 0.0, SHOTGUN_SPREAD] {
            let dir = unit_from_angle(base_angle + spread);
            let id = world.next_entity_id();
            world.projectiles.push(Projectile {
                id,
                pos: shot.origin + dir * SHOTGUN_MUZZLE_OFFSET,
                vel: dir * speed * SHOTGUN_SPEED_FRACTION,
                radius: 4.0,
                color: 0xFF6600,
                damage: 100,
                owner: ProjectileOwner::Enemy,
                kind: ProjectileKind::Stapler,
            });
        }
        effects::impact_burst(
            &mut world.particles,
            &mut world.rng,
            shot.origin,
            0xFF6600,
            5,
        );
    } else {
        let id = world.next_entity_id();
        world.projectiles.push(Projectile {
            id,
            pos: shot.origin,
            vel: shot.dir * speed * SINGLE_SPEED_FRACTION,
            radius: 6.0,
            color: 0xFF0000,
            damage: 100,
            owner: ProjectileOwner::Enemy,
            kind: ProjectileKind::Pencil,
        });
    }
}

/// Remove the player and enter the dying phase. Idempotent: a frame with
/// multiple lethal hits shatters exactly once.
pub(crate) fn kill_player(world: &mut World) {
    let Some(player) = world.player.take() else {
        return;
    };
    effects::shatter_burst(&mut world.particles, &mut world.rng, player.pos);
    world.phase = GamePhase::Dying;
    world.dying_timer = 0.0;
    log::info!("player down at level {}", world.level);
}
