//! Contact events, deferred destruction and pursuit bookkeeping.
use cashrun::{MotionEvent, SpawnPose, SteeringPhase};
use glam::Vec3;
use rstest::rstest;
use test_utils::physics::{world, world_with_opponent, world_with_player};

fn run_until<F>(world: &mut cashrun::MotionWorld, max_ticks: u32, mut done: F) -> Vec<MotionEvent>
where
    F: FnMut(&cashrun::MotionWorld, &[MotionEvent]) -> bool,
{
    let mut all = Vec::new();
    for _ in 0..max_ticks {
        world.tick();
        all.extend(world.drain_events());
        if done(world, &all) {
            break;
        }
    }
    all
}

#[test]
fn collectible_contact_reports_once_per_overlap() {
    let (mut w, player) = world_with_player(Vec3::ZERO);
    let coin = w
        .add_collectible(Vec3::new(0.3, 0.0, 0.0), 250)
        .expect("finite position");

    w.tick();
    assert_eq!(
        w.drain_events(),
        vec![MotionEvent::CollectibleContact {
            actor: player,
            collectible: coin,
            value: 250,
        }]
    );
    w.tick();
    assert!(w.drain_events().is_empty());
}

#[test]
fn traffic_hit_reports_penalty_once_then_destroys_traffic() {
    let (mut w, player) = world_with_player(Vec3::new(5.0, 0.0, 0.0));
    let traffic = w
        .spawn_traffic(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0))
        .expect("traffic");

    let events = run_until(&mut w, 2_000, |_, seen| {
        seen.iter()
            .any(|e| matches!(e, MotionEvent::ActorDestroyed { .. }))
    });

    let hits: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, MotionEvent::TrafficContact { .. }))
        .collect();
    assert_eq!(
        hits,
        vec![&MotionEvent::TrafficContact {
            actor: player,
            traffic,
            penalty: -10_000,
        }]
    );
    assert!(events.contains(&MotionEvent::ActorDestroyed { actor: traffic }));
    assert!(w.body(traffic).is_none());
    assert!(w.traffic_positions().is_empty());
}

#[test]
fn opponent_stops_on_reaching_its_target() {
    let (mut w, opponent) = world_with_opponent(Vec3::ZERO);
    let coin = w
        .add_collectible(Vec3::new(0.0, 0.0, 3.0), 100)
        .expect("finite position");

    let events = run_until(&mut w, 1_000, |_, seen| !seen.is_empty());
    assert_eq!(
        events,
        vec![MotionEvent::CollectibleContact {
            actor: opponent,
            collectible: coin,
            value: 100,
        }]
    );
    assert_eq!(w.phase(opponent), Some(SteeringPhase::Idle));
    assert_eq!(w.body(opponent).expect("live actor").velocity, Vec3::ZERO);
}

#[test]
fn removed_target_is_reselected_next_tick() {
    let (mut w, opponent) = world_with_opponent(Vec3::ZERO);
    let near = w
        .add_collectible(Vec3::new(0.0, 0.0, 6.0), 100)
        .expect("finite position");
    let far = w
        .add_collectible(Vec3::new(0.0, 0.0, -9.0), 100)
        .expect("finite position");

    w.tick();
    assert_eq!(w.held_target(opponent).map(|t| t.id), Some(near));

    w.remove_collectible(near).expect("live collectible");
    w.tick();
    assert_eq!(w.held_target(opponent).map(|t| t.id), Some(far));
}

#[test]
fn opponent_without_targets_parks_in_place() {
    let (mut w, opponent) = world_with_opponent(Vec3::new(2.0, 0.0, 2.0));
    for _ in 0..50 {
        w.tick();
    }
    let body = w.body(opponent).expect("live actor");
    assert!(cashrun::vector_math::planar_distance(body.position, Vec3::new(2.0, 0.0, 2.0)) < 0.2);
    assert!(w.held_target(opponent).is_none());
}

#[test]
fn inactive_actors_hold_still() {
    let (mut w, opponent) = world_with_opponent(Vec3::ZERO);
    w.add_collectible(Vec3::new(4.0, 0.0, 4.0), 100)
        .expect("finite position");
    w.set_active(opponent, false).expect("live actor");
    for _ in 0..25 {
        w.tick();
    }
    assert_eq!(w.body(opponent).expect("live actor").position, Vec3::ZERO);
    assert_eq!(w.is_active(opponent), Some(false));

    w.set_active(opponent, true).expect("live actor");
    for _ in 0..25 {
        w.tick();
    }
    assert_ne!(w.body(opponent).expect("live actor").position, Vec3::ZERO);
}

#[test]
fn degenerate_traffic_spawn_is_rejected() {
    let mut w = world();
    let result = w.spawn_traffic(Vec3::new(2.0, 0.0, 2.0), Vec3::new(2.0, 0.0, 2.0));
    assert!(matches!(result, Err(cashrun::MotionError::DegeneratePath { .. })));
    assert_eq!(w.actor_ids().count(), 0);
}

#[test]
fn stopping_traffic_is_rejected() {
    let mut w = world();
    let traffic = w
        .spawn_traffic(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0))
        .expect("traffic");
    assert!(matches!(
        w.stop_actor(traffic),
        Err(cashrun::MotionError::WrongKind { .. })
    ));
}

#[test]
fn despawned_actor_no_longer_reports() {
    let mut w = world();
    let player = w
        .create_player_actor(SpawnPose::at(Vec3::ZERO))
        .expect("player");
    w.add_collectible(Vec3::new(0.1, 0.0, 0.0), 100)
        .expect("finite position");
    w.despawn_actor(player).expect("live actor");
    w.tick();
    assert!(w.drain_events().is_empty());
}

#[rstest]
#[case::nan_x(Vec3::new(f32::NAN, 0.0, 0.0))]
#[case::infinite_z(Vec3::new(0.0, 0.0, f32::INFINITY))]
fn non_finite_collectible_is_rejected(#[case] position: Vec3) {
    let (mut w, _player) = world_with_player(Vec3::new(50.0, 0.0, 50.0));
    let result = w.add_collectible(position, 7);
    assert!(matches!(
        result,
        Err(cashrun::MotionError::InvalidConfig {
            field: "collectible.position",
            ..
        })
    ));
    assert!(w.collectibles().is_empty());
    w.tick();
    assert!(w.drain_events().is_empty());
}
