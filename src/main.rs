//! Headless demo driver
//!
//! Runs a scripted session at a fixed 60 Hz step: the bot strafes to keep
//! time flowing and fires at the nearest enemy, advancing levels until the
//! run ends. Useful for profiling and for watching a full session in logs.
//!
//! Usage: `overtime [seed] [tuning.json]`

use std::process::ExitCode;

use glam::Vec2;

use overtime::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use overtime::{step, GamePhase, Tuning, World};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Hard cap so a stalled bot cannot loop forever
const MAX_FRAMES: u32 = 60 * 600;

fn parse_args() -> Result<(u64, Tuning), String> {
    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| format!("invalid seed {raw:?}: {e}"))?,
        None => 0xDEAD_9005,
    };

    let tuning = match args.next() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {path}: {e}"))?;
            Tuning::from_json_str(&raw).map_err(|e| format!("bad tuning in {path}: {e}"))?
        }
        None => Tuning::default(),
    };

    Ok((seed, tuning))
}

/// Scripted input for one frame: circle-strafe on a slow rhythm and keep the
/// pointer on the nearest enemy.
fn drive(world: &mut World, frame: u32) {
    world.input.up = frame % 240 < 60;
    world.input.right = (60..120).contains(&(frame % 240));
    world.input.down = (120..180).contains(&(frame % 240));
    world.input.left = frame % 240 >= 180;
    world.input.fire = false;

    let Some(player_pos) = world.player.as_ref().map(|p| p.pos) else {
        return;
    };
    let nearest = world
        .enemies
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player_pos)
                .total_cmp(&b.pos.distance_squared(player_pos))
        })
        .map(|e| e.pos);
    if let Some(target) = nearest {
        // Pointer is viewport-local
        world.input.pointer = target - world.camera;
        world.input.fire = true;
    } else {
        world.input.pointer = Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT) * 0.5;
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let (seed, tuning) = match parse_args() {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("starting demo session, seed {seed}");
    let mut world = World::new(seed, tuning);
    world.start_game();

    for frame in 0..MAX_FRAMES {
        drive(&mut world, frame);
        step(&mut world, FRAME_DT);

        match world.phase {
            GamePhase::LevelComplete => world.advance_level(),
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    let outcome = if world.game_won { "won" } else { "lost" };
    println!(
        "{outcome} at level {} with score {} ({} kills, {:.1}s survived)",
        world.level, world.score, world.kills, world.session_time
    );
    ExitCode::SUCCESS
}
