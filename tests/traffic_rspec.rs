//! Behaviour tests for the traffic lifecycle using rust-rspec.
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use cashrun::{ActorId, MotionEvent, MotionWorld};
use glam::Vec3;
use test_utils::physics::world;

#[derive(Clone)]
struct Env {
    world: Arc<Mutex<MotionWorld>>,
    traffic: Arc<Mutex<Option<ActorId>>>,
    events: Arc<Mutex<Vec<MotionEvent>>>,
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self {
            world: Arc::new(Mutex::new(world())),
            traffic: Arc::new(Mutex::new(None)),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Env {
    fn world(&self) -> MutexGuard<'_, MotionWorld> {
        self.world.lock().expect("lock world")
    }

    fn reset(&self) {
        *self.world() = world();
        *self.traffic.lock().expect("lock traffic") = None;
        self.events.lock().expect("lock events").clear();
    }

    fn spawn(&self, start: Vec3, end: Vec3) {
        let id = self.world().spawn_traffic(start, end).expect("spawn traffic");
        *self.traffic.lock().expect("lock traffic") = Some(id);
    }

    fn traffic(&self) -> ActorId {
        self.traffic
            .lock()
            .expect("lock traffic")
            .expect("traffic spawned")
    }

    fn run(&self, ticks: u32) {
        let mut w = self.world();
        let mut events = self.events.lock().expect("lock events");
        for _ in 0..ticks {
            w.tick();
            events.extend(w.drain_events());
        }
    }

    fn events(&self) -> Vec<MotionEvent> {
        self.events.lock().expect("lock events").clone()
    }
}

/// Traffic reaching the end of its path is removed exactly once.
#[test]
fn traffic_is_destroyed_at_the_end_of_its_path() {
    rspec::run(&rspec::given(
        "traffic on a short straight path",
        Env::default(),
        |ctx| {
            ctx.before_each(|env| {
                env.reset();
                env.spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
            });
            ctx.when("the world runs well past the path duration", |ctx| {
                ctx.before_each(|env| env.run(600));
                ctx.then("one destruction is reported and the body is gone", |env| {
                    let id = env.traffic();
                    let destroyed: Vec<_> = env
                        .events()
                        .into_iter()
                        .filter(|e| matches!(e, MotionEvent::ActorDestroyed { .. }))
                        .collect();
                    assert_eq!(destroyed, vec![MotionEvent::ActorDestroyed { actor: id }]);
                    let w = env.world();
                    assert!(w.body(id).is_none());
                    assert_eq!(w.actor_ids().count(), 0);
                });
            });
        },
    ));
}

/// Traffic advances along its path while it is running.
#[test]
fn traffic_moves_along_its_path() {
    rspec::run(&rspec::given(
        "traffic heading down the z axis",
        Env::default(),
        |ctx| {
            ctx.before_each(|env| {
                env.reset();
                env.spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
            });
            ctx.when("a second of ticks elapses", |ctx| {
                ctx.before_each(|env| env.run(50));
                ctx.then("it has moved forward and faces its velocity", |env| {
                    let id = env.traffic();
                    let w = env.world();
                    let body = w.body(id).expect("still travelling");
                    assert!(body.position.z > 0.5, "z = {}", body.position.z);
                    assert!(body.position.x.abs() < 1e-3);
                    assert!(body.forward().z > 0.99);
                    assert!(w.traffic(id).expect("traffic").progress() > 1.5);
                    assert!(env.events().is_empty());
                });
            });
        },
    ));
}

/// Deactivated traffic neither moves nor finishes.
#[test]
fn inactive_traffic_is_frozen() {
    rspec::run(&rspec::given(
        "traffic that has been switched off",
        Env::default(),
        |ctx| {
            ctx.before_each(|env| {
                env.reset();
                env.spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
                let id = env.traffic();
                env.world().set_active(id, false).expect("live traffic");
            });
            ctx.when("the world runs", |ctx| {
                ctx.before_each(|env| env.run(600));
                ctx.then("the body stays at its start and is never destroyed", |env| {
                    let id = env.traffic();
                    let w = env.world();
                    assert_eq!(w.body(id).expect("live traffic").position, Vec3::ZERO);
                    assert!(env.events().is_empty());
                });
            });
        },
    ));
}
