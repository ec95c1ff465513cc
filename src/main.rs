//! Headless demo match driving the movement core.
//!
//! Spawns a player and a few opponents in a circular arena, drops
//! collectibles and crossing traffic on timers, and logs what happens. The
//! player is steered toward the nearest collectible as if it were tapped.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hashbrown::HashMap;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cashrun::{
    init_logging, nearest_collectible, ActorId, Arena, MotionEvent, MotionWorld, WorldConfig,
};

/// Collectible values the demo chooses from.
const COLLECTIBLE_VALUES: [i32; 3] = [100, 250, 500];

/// Headless driving demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Number of fixed steps to simulate
    #[arg(long, default_value_t = 1500)]
    ticks: u64,
    /// Number of autonomous opponents
    #[arg(long, default_value_t = 3)]
    opponents: usize,
    /// Seed for the world and the demo spawner
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// Arena edge radius, larger than the collectible margin
    #[arg(long, default_value_t = 12.0, value_parser = parse_arena_radius)]
    arena_radius: f32,
}

/// Distance kept clear between collectibles and the centre or the edge.
const COLLECTIBLE_MARGIN: f32 = 1.0;

fn parse_arena_radius(raw: &str) -> Result<f32, String> {
    let radius: f32 = raw
        .parse()
        .map_err(|err| format!("`{raw}` is not a number: {err}"))?;
    if radius.is_finite() && radius > 2.0 * COLLECTIBLE_MARGIN {
        Ok(radius)
    } else {
        Err(format!(
            "must be finite and above {}, got {radius}",
            2.0 * COLLECTIBLE_MARGIN
        ))
    }
}

#[derive(Debug, Default)]
struct Tally {
    collected: u32,
    collected_value: i64,
    traffic_hits: u32,
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Spawn intervals are a few seconds and the value is checked to be at least one."
)]
fn seconds_to_ticks(seconds: f32, fixed_step: f32) -> u64 {
    let ticks = (seconds / fixed_step).round();
    if ticks.is_finite() && ticks >= 1.0 {
        ticks as u64
    } else {
        1
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => WorldConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut world = MotionWorld::new(config).context("building motion world")?;
    let mut spawner = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    let arena = Arena::new(args.arena_radius);

    let poses = arena.spawn_poses(args.opponents + 1);
    let mut poses_iter = poses.into_iter();
    let player_pose = poses_iter.next().context("arena produced no spawn poses")?;
    let player = world.create_player_actor(player_pose)?;
    let mut drivers = vec![player];
    for pose in poses_iter {
        drivers.push(world.create_autonomous_actor(pose, config.max_speed_jitter)?);
    }

    let collectible_every = seconds_to_ticks(3.0, config.fixed_step);
    let traffic_every = seconds_to_ticks(4.0, config.fixed_step);
    let pointer_every = seconds_to_ticks(0.5, config.fixed_step);
    let max_collectibles = 5;
    let mut tally: HashMap<ActorId, Tally> = HashMap::new();

    info!(
        "running {} ticks with {} opponents in an arena of radius {}",
        args.ticks, args.opponents, arena.radius
    );

    for tick in 0..args.ticks {
        if tick % collectible_every == 0 && world.collectibles().len() < max_collectibles {
            let position = arena.random_point_inside(
                &mut spawner,
                COLLECTIBLE_MARGIN,
                arena.radius - COLLECTIBLE_MARGIN,
            );
            let value = COLLECTIBLE_VALUES
                .get(spawner.gen_range(0..COLLECTIBLE_VALUES.len()))
                .copied()
                .unwrap_or(100);
            world.add_collectible(position, value)?;
        }
        if tick > 0 && tick % traffic_every == 0 {
            let (start, end) = arena.traffic_crossing(&mut spawner);
            if let Err(err) = world.spawn_traffic(start, end) {
                warn!("tick {tick}: skipped traffic spawn: {err}");
            }
        }
        if tick % pointer_every == 0 {
            if let Some(body) = world.body(player) {
                if let Some(target) = nearest_collectible(body.position, world.collectibles()) {
                    let point = target.position;
                    world.submit_pointer(player, point)?;
                }
            }
        }

        world.tick();

        for event in world.drain_events() {
            debug!("tick {tick}: {event:?}");
            match event {
                MotionEvent::CollectibleContact {
                    actor,
                    collectible,
                    value,
                } => {
                    let entry = tally.entry(actor).or_default();
                    entry.collected += 1;
                    entry.collected_value += i64::from(value);
                    // Another driver may have taken it earlier in the same tick.
                    world.remove_collectible(collectible).ok();
                }
                MotionEvent::TrafficContact { actor, traffic, .. } => {
                    tally.entry(actor).or_default().traffic_hits += 1;
                    world.despawn_actor(traffic).ok();
                }
                MotionEvent::ActorDestroyed { actor } => {
                    debug!("traffic {actor} left the arena");
                }
            }
        }
    }

    for id in drivers {
        let entry = tally.remove(&id).unwrap_or_default();
        info!(
            "{id}: {} collectibles worth {}, {} traffic hits",
            entry.collected, entry.collected_value, entry.traffic_hits
        );
    }
    Ok(())
}
