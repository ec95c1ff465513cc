//! Arena that owns every vehicle and runs the fixed simulation step.
//!
//! The orchestrator spawns actors, registers collectibles and feeds pointer
//! input. It then calls [`MotionWorld::tick`] once per physics step and
//! drains [`MotionEvent`]s afterwards. Actors are never removed while the
//! tick iterates. Finished traffic is collected and removed after every
//! actor has moved.
use glam::Vec3;
use hashbrown::HashSet;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actor::{GoalSelector, HeldTarget};
use crate::config::WorldConfig;
use crate::entity::{ActorId, ActorKind, Collectible, CollectibleId, SpawnPose};
use crate::error::MotionError;
use crate::events::MotionEvent;
use crate::input::PointerInput;
use crate::physics::VehicleBody;
use crate::spline::SplinePath;
use crate::steering::{ArrivalSteering, SteeringPhase};
use crate::traffic::{TrafficController, TrafficTick};
use crate::vector_math::planar_distance;

#[derive(Debug, Clone)]
enum Controller {
    Player {
        steering: ArrivalSteering,
        input: PointerInput,
    },
    Autonomous {
        steering: ArrivalSteering,
        selector: GoalSelector,
    },
    Traffic(TrafficController),
}

impl Controller {
    const fn kind(&self) -> ActorKind {
        match self {
            Self::Player { .. } => ActorKind::Player,
            Self::Autonomous { .. } => ActorKind::Autonomous,
            Self::Traffic(_) => ActorKind::Traffic,
        }
    }

    const fn steering(&self) -> Option<&ArrivalSteering> {
        match self {
            Self::Player { steering, .. } | Self::Autonomous { steering, .. } => Some(steering),
            Self::Traffic(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
struct ActorSlot {
    id: ActorId,
    active: bool,
    body: VehicleBody,
    controller: Controller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Contact {
    Collectible(ActorId, CollectibleId),
    Traffic(ActorId, ActorId),
}

/// Owner of every vehicle body and controller.
#[derive(Debug, Clone)]
pub struct MotionWorld {
    config: WorldConfig,
    rng: StdRng,
    actors: Vec<ActorSlot>,
    collectibles: Vec<Collectible>,
    contacts: HashSet<Contact>,
    events: Vec<MotionEvent>,
    next_actor: u64,
    next_collectible: u64,
    tick_count: u64,
}

impl MotionWorld {
    /// Creates an empty world seeded from `config.seed`.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] when `config` fails validation.
    pub fn new(config: WorldConfig) -> Result<Self, MotionError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(config.seed),
            actors: Vec::new(),
            collectibles: Vec::new(),
            contacts: HashSet::new(),
            events: Vec::new(),
            next_actor: 0,
            next_collectible: 0,
            tick_count: 0,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn allocate_actor(&mut self) -> ActorId {
        let id = ActorId(self.next_actor);
        self.next_actor += 1;
        id
    }

    fn body_for(&self, pose: SpawnPose, drag: f32) -> VehicleBody {
        VehicleBody::new(pose.position, pose.heading, drag, self.config.ground_height)
    }

    fn slot(&self, id: ActorId) -> Result<&ActorSlot, MotionError> {
        self.actors
            .iter()
            .find(|slot| slot.id == id)
            .ok_or(MotionError::UnknownActor(id))
    }

    fn slot_mut(&mut self, id: ActorId) -> Result<&mut ActorSlot, MotionError> {
        self.actors
            .iter_mut()
            .find(|slot| slot.id == id)
            .ok_or(MotionError::UnknownActor(id))
    }

    /// Spawns a traffic vehicle on a fresh jittered path from `start` to `end`.
    ///
    /// # Errors
    /// Returns [`MotionError::DegeneratePath`] if the endpoints coincide in
    /// the plane.
    pub fn spawn_traffic(&mut self, start: Vec3, end: Vec3) -> Result<ActorId, MotionError> {
        let mut controller = TrafficController::new(self.config.traffic)?;
        let mut body = self.body_for(SpawnPose::at(start), self.config.traffic.drag);
        if let Err(err) = controller.start_path(start, end, &mut body, &mut self.rng) {
            warn!("rejected traffic spawn: {err}");
            return Err(err);
        }
        Ok(self.insert_traffic(controller, body))
    }

    /// Spawns a traffic vehicle on an explicit path.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] if the traffic tuning is invalid.
    pub fn spawn_traffic_on(&mut self, path: SplinePath) -> Result<ActorId, MotionError> {
        let mut controller = TrafficController::new(self.config.traffic)?;
        let mut body = self.body_for(SpawnPose::at(path.first()), self.config.traffic.drag);
        controller.follow(path, &mut body);
        Ok(self.insert_traffic(controller, body))
    }

    fn insert_traffic(&mut self, controller: TrafficController, body: VehicleBody) -> ActorId {
        let id = self.allocate_actor();
        info!("spawned traffic {id} at {}", body.position);
        self.actors.push(ActorSlot {
            id,
            active: true,
            body,
            controller: Controller::Traffic(controller),
        });
        id
    }

    /// Creates an autonomous driver whose top speed is offset by a uniform
    /// draw from `[-max_speed_jitter, max_speed_jitter]`.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] when the jitter is negative,
    /// non-finite, or not below the configured top speed.
    pub fn create_autonomous_actor(
        &mut self,
        pose: SpawnPose,
        max_speed_jitter: f32,
    ) -> Result<ActorId, MotionError> {
        let mut steering_config = self.config.steering;
        if !(max_speed_jitter.is_finite()
            && max_speed_jitter >= 0.0
            && max_speed_jitter < steering_config.max_speed)
        {
            return Err(MotionError::invalid(
                "max_speed_jitter",
                format!(
                    "must lie in [0, {}), got {max_speed_jitter}",
                    steering_config.max_speed
                ),
            ));
        }
        if max_speed_jitter > 0.0 {
            steering_config.max_speed += self.rng.gen_range(-max_speed_jitter..=max_speed_jitter);
        }
        let steering = ArrivalSteering::new(steering_config)?;
        let selector = GoalSelector::new(self.config.avoidance)?;
        let body = self.body_for(pose, steering_config.drag);
        let id = self.allocate_actor();
        info!(
            "created autonomous {id} at {} with max speed {:.2}",
            body.position, steering_config.max_speed
        );
        self.actors.push(ActorSlot {
            id,
            active: true,
            body,
            controller: Controller::Autonomous { steering, selector },
        });
        Ok(id)
    }

    /// Creates the pointer-driven player vehicle.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] if the steering tuning is invalid.
    pub fn create_player_actor(&mut self, pose: SpawnPose) -> Result<ActorId, MotionError> {
        let steering = ArrivalSteering::new(self.config.steering)?;
        let body = self.body_for(pose, self.config.steering.drag);
        let id = self.allocate_actor();
        info!("created player {id} at {}", body.position);
        self.actors.push(ActorSlot {
            id,
            active: true,
            body,
            controller: Controller::Player {
                steering,
                input: PointerInput::default(),
            },
        });
        Ok(id)
    }

    /// Enables or disables ticking for `id`. Disabled actors hold still.
    ///
    /// # Errors
    /// Returns [`MotionError::UnknownActor`] for a stale handle.
    pub fn set_active(&mut self, id: ActorId, active: bool) -> Result<(), MotionError> {
        self.slot_mut(id)?.active = active;
        Ok(())
    }

    /// Whether `id` is ticked, or `None` for a stale handle.
    #[must_use]
    pub fn is_active(&self, id: ActorId) -> Option<bool> {
        self.slot(id).ok().map(|slot| slot.active)
    }

    /// Removes an actor immediately. Call between ticks only.
    ///
    /// # Errors
    /// Returns [`MotionError::UnknownActor`] for a stale handle.
    pub fn despawn_actor(&mut self, id: ActorId) -> Result<(), MotionError> {
        let before = self.actors.len();
        self.actors.retain(|slot| slot.id != id);
        if self.actors.len() == before {
            return Err(MotionError::UnknownActor(id));
        }
        self.contacts.retain(|contact| match *contact {
            Contact::Collectible(actor, _) => actor != id,
            Contact::Traffic(actor, traffic) => actor != id && traffic != id,
        });
        debug!("despawned {id}");
        Ok(())
    }

    /// Registers a collectible worth `value` at `position`.
    ///
    /// # Errors
    /// Returns [`MotionError::InvalidConfig`] when the planar part of
    /// `position` is not finite.
    pub fn add_collectible(
        &mut self,
        position: Vec3,
        value: i32,
    ) -> Result<CollectibleId, MotionError> {
        if !(position.x.is_finite() && position.z.is_finite()) {
            warn!("rejected collectible at {position}");
            return Err(MotionError::invalid(
                "collectible.position",
                format!("must be finite, got {position}"),
            ));
        }
        let id = CollectibleId(self.next_collectible);
        self.next_collectible += 1;
        let grounded = Vec3::new(position.x, self.config.ground_height, position.z);
        self.collectibles.push(Collectible {
            id,
            position: grounded,
            value,
        });
        debug!("added {id} worth {value} at {grounded}");
        Ok(id)
    }

    /// Removes a collectible. Drivers chasing it reselect on their next tick.
    ///
    /// # Errors
    /// Returns [`MotionError::UnknownCollectible`] for a stale handle.
    pub fn remove_collectible(&mut self, id: CollectibleId) -> Result<(), MotionError> {
        let before = self.collectibles.len();
        self.collectibles.retain(|c| c.id != id);
        if self.collectibles.len() == before {
            return Err(MotionError::UnknownCollectible(id));
        }
        self.contacts
            .retain(|contact| !matches!(*contact, Contact::Collectible(_, c) if c == id));
        Ok(())
    }

    /// Live collectibles in registration order.
    #[must_use]
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    /// Queues a world-space pointer target for the player `id`.
    ///
    /// # Errors
    /// Returns [`MotionError::UnknownActor`] for a stale handle and
    /// [`MotionError::WrongKind`] when `id` is not a player.
    pub fn submit_pointer(&mut self, id: ActorId, point: Vec3) -> Result<(), MotionError> {
        let slot = self.slot_mut(id)?;
        let kind = slot.controller.kind();
        match &mut slot.controller {
            Controller::Player { input, .. } => {
                input.submit(point);
                Ok(())
            }
            _ => Err(MotionError::WrongKind {
                actor: id,
                kind,
                operation: "take pointer input",
            }),
        }
    }

    /// Drops the goal of a steered actor and brings it to rest.
    ///
    /// # Errors
    /// Returns [`MotionError::UnknownActor`] for a stale handle and
    /// [`MotionError::WrongKind`] for traffic.
    pub fn stop_actor(&mut self, id: ActorId) -> Result<(), MotionError> {
        let slot = self.slot_mut(id)?;
        match &mut slot.controller {
            Controller::Player { steering, .. } | Controller::Autonomous { steering, .. } => {
                steering.stop(&mut slot.body);
                Ok(())
            }
            Controller::Traffic(_) => Err(MotionError::WrongKind {
                actor: id,
                kind: ActorKind::Traffic,
                operation: "stop",
            }),
        }
    }

    /// Adds an external velocity change to `id`'s body.
    ///
    /// # Errors
    /// Returns [`MotionError::UnknownActor`] for a stale handle.
    pub fn apply_impulse(&mut self, id: ActorId, delta_velocity: Vec3) -> Result<(), MotionError> {
        self.slot_mut(id)?.body.apply_impulse(delta_velocity);
        Ok(())
    }

    /// Body of `id`.
    #[must_use]
    pub fn body(&self, id: ActorId) -> Option<&VehicleBody> {
        self.slot(id).ok().map(|slot| &slot.body)
    }

    /// Role of `id`.
    #[must_use]
    pub fn kind(&self, id: ActorId) -> Option<ActorKind> {
        self.slot(id).ok().map(|slot| slot.controller.kind())
    }

    /// Steering controller of a player or autonomous actor.
    #[must_use]
    pub fn steering(&self, id: ActorId) -> Option<&ArrivalSteering> {
        self.slot(id).ok().and_then(|slot| slot.controller.steering())
    }

    /// Steering phase of a player or autonomous actor.
    #[must_use]
    pub fn phase(&self, id: ActorId) -> Option<SteeringPhase> {
        self.steering(id).map(ArrivalSteering::phase)
    }

    /// Collectible an autonomous actor is chasing.
    #[must_use]
    pub fn held_target(&self, id: ActorId) -> Option<HeldTarget> {
        match &self.slot(id).ok()?.controller {
            Controller::Autonomous { selector, .. } => selector.held_target(),
            _ => None,
        }
    }

    /// Traffic controller of a traffic actor.
    #[must_use]
    pub fn traffic(&self, id: ActorId) -> Option<&TrafficController> {
        match &self.slot(id).ok()?.controller {
            Controller::Traffic(traffic) => Some(traffic),
            _ => None,
        }
    }

    /// Handles of every live actor in creation order.
    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.actors.iter().map(|slot| slot.id)
    }

    /// Positions of every live traffic vehicle.
    #[must_use]
    pub fn traffic_positions(&self) -> Vec<Vec3> {
        self.actors
            .iter()
            .filter(|slot| slot.controller.kind() == ActorKind::Traffic)
            .map(|slot| slot.body.position)
            .collect()
    }

    /// Takes all events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Runs one fixed simulation step.
    ///
    /// Drivers select goals against the traffic positions left by the
    /// previous tick, then steer and integrate. Traffic advances along its
    /// path. Contacts are detected on the resulting positions, and finished
    /// traffic is removed last.
    pub fn tick(&mut self) {
        let dt = self.config.fixed_step;
        let traffic_snapshot = self.traffic_positions();
        let collectibles = &self.collectibles;
        let mut finished = Vec::new();

        for slot in self.actors.iter_mut().filter(|slot| slot.active) {
            let body = &mut slot.body;
            match &mut slot.controller {
                Controller::Player { steering, input } => {
                    input.apply(steering);
                    steering.tick(body, dt);
                }
                Controller::Autonomous { steering, selector } => {
                    let goal = selector.select_goal(
                        body.position,
                        body.forward(),
                        collectibles,
                        &traffic_snapshot,
                    );
                    steering.set_target(goal);
                    steering.tick(body, dt);
                }
                Controller::Traffic(traffic) => {
                    if traffic.tick(body, dt) == TrafficTick::Arrived {
                        finished.push(slot.id);
                    }
                }
            }
        }

        self.detect_contacts();

        for id in finished {
            self.actors.retain(|slot| slot.id != id);
            info!("{id} finished its path");
            self.events.push(MotionEvent::ActorDestroyed { actor: id });
        }
        self.tick_count += 1;
    }

    fn detect_contacts(&mut self) {
        let collect_reach = self.config.vehicle_radius + self.config.collectible_radius;
        let traffic_reach = self.config.vehicle_radius + self.config.traffic_radius;
        let mut touching = HashSet::with_capacity(self.contacts.len());
        let mut stops = Vec::new();

        for driver in self.actors.iter().filter(|s| s.controller.kind().is_driver()) {
            for collectible in &self.collectibles {
                if !overlaps(driver.body.position, collectible.position, collect_reach) {
                    continue;
                }
                let contact = Contact::Collectible(driver.id, collectible.id);
                touching.insert(contact);
                if self.contacts.contains(&contact) {
                    continue;
                }
                debug!("{} touched {}", driver.id, collectible.id);
                self.events.push(MotionEvent::CollectibleContact {
                    actor: driver.id,
                    collectible: collectible.id,
                    value: collectible.value,
                });
                if let Controller::Autonomous { selector, .. } = &driver.controller {
                    if selector.on_collectible_contact(collectible) {
                        stops.push(driver.id);
                    }
                }
            }

            for other in &self.actors {
                let Controller::Traffic(traffic) = &other.controller else {
                    continue;
                };
                if !overlaps(driver.body.position, other.body.position, traffic_reach) {
                    continue;
                }
                let contact = Contact::Traffic(driver.id, other.id);
                touching.insert(contact);
                if self.contacts.contains(&contact) {
                    continue;
                }
                debug!("{} hit traffic {}", driver.id, other.id);
                self.events.push(MotionEvent::TrafficContact {
                    actor: driver.id,
                    traffic: other.id,
                    penalty: traffic.collision_penalty(),
                });
            }
        }

        self.contacts = touching;
        for id in stops {
            if let Ok(slot) = self.slot_mut(id) {
                if let Controller::Autonomous { steering, .. } = &mut slot.controller {
                    steering.stop(&mut slot.body);
                }
            }
        }
    }
}

/// Strict overlap test. A non-finite distance never overlaps.
fn overlaps(a: Vec3, b: Vec3, reach: f32) -> bool {
    planar_distance(a, b) < reach
}
