//! The pilot: walks the airbase on foot, boards aircraft and flies them.
//!
//! Possession is `Option<Entity>` into the aircraft `World`; the pilot never owns
//! an aircraft. While flying, the pilot pose is copied from the possessed body
//! after every tick and is never integrated on its own.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use std::rc::Rc;

use engine_core::{euler_to_quat, rotate_by_yaw, ControlSnapshot, Pose, Terrain, Vec3};
use flight::{wrap_angle, AircraftBody, Archetype};
use hecs::{Entity, World};
use thiserror::Error;

use crate::camera::{CameraPose, CameraSink};
use crate::config::PilotConfig;

/// Horizontal speed retained per 1/60 s with no walking input.
const WALK_FRICTION: f32 = 0.9;
/// Pitch limit for mouse look while flying, before the archetype's own limit.
const FLIGHT_LOOK_PITCH_LIMIT: f32 = FRAC_PI_4;
/// Auto-land triggers below this height above the ground while descending
/// through the air.
pub const AUTO_LAND_HEIGHT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilotMode {
    Walking,
    Flying,
}

impl PilotMode {
    pub fn label(self) -> &'static str {
        match self {
            PilotMode::Walking => "WALKING",
            PilotMode::Flying => "FLYING",
        }
    }
}

/// Why `enter_aircraft` refused. The pilot is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EnterError {
    #[error("no aircraft selected")]
    NoTarget,
    #[error("{0:?} is not an aircraft")]
    UnknownAircraft(Entity),
    #[error("aircraft is {distance:.1}m away, interaction radius is {radius}m")]
    OutOfRange { distance: f32, radius: f32 },
    #[error("already flying")]
    AlreadyFlying,
}

/// An aircraft within interaction range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftCandidate {
    pub entity: Entity,
    pub archetype: Archetype,
    pub distance: f32,
}

/// Things that happened during a tick, for the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PilotEvent {
    Entered { aircraft: Entity, archetype: Archetype },
    Exited { aircraft: Entity },
    AutoLanded { aircraft: Entity },
    /// Interact was pressed with several aircraft in range, nearest first.
    /// Answer with `enter_aircraft(Some(candidate.entity))`.
    SelectionRequested(Vec<AircraftCandidate>),
}

/// Walking/flying state machine driving one camera.
pub struct PilotController<C: CameraSink> {
    config: PilotConfig,
    terrain: Rc<dyn Terrain>,
    camera: C,
    mouse_sensitivity: f32,
    flight_look_scale: f32,

    position: Vec3,
    /// Look pitch (x) and yaw (y). While flying, the possessed body's rotation.
    rotation: Vec3,
    velocity: Vec3,
    on_ground: bool,
    possessed: Option<Entity>,

    nearby: Vec<AircraftCandidate>,
    since_scan: f32,
    events: Vec<PilotEvent>,
}

impl<C: CameraSink> PilotController<C> {
    pub fn new(config: PilotConfig, terrain: Rc<dyn Terrain>, camera: C) -> Self {
        let spawn = config.spawn;
        let scan_interval = config.scan_interval;
        Self {
            config,
            terrain,
            camera,
            mouse_sensitivity: 0.001,
            flight_look_scale: 0.3,
            position: spawn,
            rotation: Vec3::ZERO,
            velocity: Vec3::ZERO,
            on_ground: false,
            possessed: None,
            nearby: Vec::new(),
            since_scan: scan_interval,
            events: Vec::new(),
        }
    }

    /// Mouse sensitivity (radians per pixel) and the extra flying scale.
    pub fn with_look(mut self, sensitivity: f32, flight_scale: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self.flight_look_scale = flight_scale;
        self
    }

    pub fn mode(&self) -> PilotMode {
        if self.possessed.is_some() {
            PilotMode::Flying
        } else {
            PilotMode::Walking
        }
    }

    pub fn possessed(&self) -> Option<Entity> {
        self.possessed
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn config(&self) -> &PilotConfig {
        &self.config
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Aircraft found by the last scan, nearest first. Empty while flying.
    pub fn nearby_aircraft(&self) -> &[AircraftCandidate] {
        &self.nearby
    }

    pub fn is_highlighted(&self, entity: Entity) -> bool {
        self.nearby.iter().any(|c| c.entity == entity)
    }

    /// Events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<PilotEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move the walking body. Ignored while flying.
    pub fn place_at(&mut self, position: Vec3) {
        if self.possessed.is_some() {
            return;
        }
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.on_ground = false;
        self.since_scan = self.config.scan_interval;
    }

    /// Advance one tick.
    pub fn update(&mut self, dt: f32, controls: &ControlSnapshot, world: &mut World) {
        match self.possessed {
            Some(aircraft) => self.update_flying(aircraft, dt, controls, world),
            None => {
                self.update_walking(dt, controls);
                self.update_interaction(dt, controls, world);
            }
        }
        self.update_camera(world);
    }

    fn update_flying(
        &mut self,
        aircraft: Entity,
        dt: f32,
        controls: &ControlSnapshot,
        world: &mut World,
    ) {
        let descending_near_ground = {
            let Ok(mut body) = world.get::<&mut AircraftBody>(aircraft) else {
                log::warn!("Possessed aircraft {:?} is gone, back on foot", aircraft);
                self.possessed = None;
                return;
            };

            if controls.pointer_locked {
                let look = controls.mouse_delta * self.mouse_sensitivity * self.flight_look_scale;
                body.apply_look(-look.x, -look.y, FLIGHT_LOOK_PITCH_LIMIT);
            }

            body.update(dt, &controls.flight, self.terrain.as_ref());

            self.position = body.position;
            self.rotation = body.rotation;
            self.velocity = body.velocity;

            let ground = self.terrain.ground_height(body.position.x, body.position.z);
            // Rolling on the ground is not a landing approach.
            !body.is_grounded()
                && body.position.y < ground + AUTO_LAND_HEIGHT
                && body.velocity.y < 0.0
        };

        if controls.exit {
            self.exit_aircraft(world);
        } else if descending_near_ground {
            self.auto_land(world);
        }
    }

    fn update_walking(&mut self, dt: f32, controls: &ControlSnapshot) {
        let look = controls.mouse_delta * self.mouse_sensitivity;
        self.rotation.y = wrap_angle(self.rotation.y - look.x);
        self.rotation.x = (self.rotation.x - look.y).clamp(-FRAC_PI_2, FRAC_PI_2);

        let walk = controls.walk.sanitized();
        let speed = if controls.run {
            self.config.run_speed
        } else {
            self.config.walk_speed
        };

        // Forward (z = -1) follows the look yaw.
        let movement = rotate_by_yaw(Vec3::new(walk.x, 0.0, walk.z), self.rotation.y);
        if movement.length_squared() > 0.0 {
            let m = movement.normalize() * speed;
            self.velocity.x = m.x;
            self.velocity.z = m.z;
        } else {
            let friction = WALK_FRICTION.powf(dt * 60.0);
            self.velocity.x *= friction;
            self.velocity.z *= friction;
        }

        if controls.jump && self.on_ground {
            self.velocity.y = self.config.jump_power;
            self.on_ground = false;
        }
        if !self.on_ground {
            self.velocity.y -= self.config.gravity * dt;
        }

        self.position += self.velocity * dt;

        let floor = self.terrain.ground_height(self.position.x, self.position.z) + self.config.eye_height;
        self.on_ground = false;
        if self.position.y <= floor && self.velocity.y <= 0.0 {
            self.position.y = floor;
            self.velocity.y = 0.0;
            self.on_ground = true;
        }

        let bound = self.config.world_bound;
        self.position.x = self.position.x.clamp(-bound, bound);
        self.position.z = self.position.z.clamp(-bound, bound);
    }

    fn update_interaction(&mut self, dt: f32, controls: &ControlSnapshot, world: &mut World) {
        self.since_scan += dt;
        if self.since_scan >= self.config.scan_interval {
            self.since_scan = 0.0;
            self.nearby = self.scan(world);
        }

        if !controls.interact {
            return;
        }
        match self.nearby.as_slice() {
            [] => {}
            [only] => {
                let target = only.entity;
                if let Err(e) = self.enter_aircraft(world, Some(target)) {
                    log::debug!("Could not board {:?}: {}", target, e);
                }
            }
            several => {
                log::debug!("{} aircraft in range, asking for a choice", several.len());
                self.events.push(PilotEvent::SelectionRequested(several.to_vec()));
            }
        }
    }

    /// Aircraft strictly inside the interaction radius, nearest first.
    fn scan(&self, world: &World) -> Vec<AircraftCandidate> {
        let radius = self.config.interaction_radius;
        let mut found: Vec<AircraftCandidate> = world
            .query::<&AircraftBody>()
            .iter()
            .filter_map(|(entity, body)| {
                let distance = body.distance_to_point(self.position);
                (distance < radius).then_some(AircraftCandidate {
                    entity,
                    archetype: body.archetype(),
                    distance,
                })
            })
            .collect();
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        found
    }

    /// Board `target` and hand it the controls.
    ///
    /// Fails without touching any state when already flying, when `target` is
    /// `None` or not an aircraft, or when it is outside the interaction radius.
    pub fn enter_aircraft(
        &mut self,
        world: &mut World,
        target: Option<Entity>,
    ) -> Result<(), EnterError> {
        if self.possessed.is_some() {
            return Err(EnterError::AlreadyFlying);
        }
        let entity = target.ok_or(EnterError::NoTarget)?;
        let mut body = world
            .get::<&mut AircraftBody>(entity)
            .map_err(|_| EnterError::UnknownAircraft(entity))?;

        let distance = body.distance_to_point(self.position);
        let radius = self.config.interaction_radius;
        if !(distance < radius) {
            return Err(EnterError::OutOfRange { distance, radius });
        }

        body.start_flying();
        self.position = body.position;
        self.rotation = body.rotation;
        self.velocity = body.velocity;
        self.on_ground = false;
        self.possessed = Some(entity);
        self.nearby.clear();

        let archetype = body.archetype();
        log::info!("Entered {} aircraft", archetype);
        self.events.push(PilotEvent::Entered {
            aircraft: entity,
            archetype,
        });
        Ok(())
    }

    /// Park the possessed aircraft and step out beside it. Returns false when
    /// nothing was possessed.
    pub fn exit_aircraft(&mut self, world: &mut World) -> bool {
        let Some(entity) = self.possessed.take() else {
            return false;
        };

        let mut exit = self.position;
        if let Ok(mut body) = world.get::<&mut AircraftBody>(entity) {
            body.stop_flying();
            exit = body.position;
        }
        exit.x += self.config.exit_offset;
        exit.y = self.terrain.ground_height(exit.x, exit.z) + self.config.eye_height;

        self.position = exit;
        self.velocity = Vec3::ZERO;
        self.rotation = Vec3::ZERO;
        self.on_ground = true;
        self.since_scan = self.config.scan_interval;

        log::info!("Exited aircraft");
        self.events.push(PilotEvent::Exited { aircraft: entity });
        true
    }

    /// Set the possessed aircraft down on the ground below it: rest height,
    /// zero velocity, wings level, heading kept. The pilot stays in the
    /// aircraft. Returns false when nothing was possessed.
    pub fn auto_land(&mut self, world: &mut World) -> bool {
        let Some(entity) = self.possessed else {
            return false;
        };
        let Ok(mut body) = world.get::<&mut AircraftBody>(entity) else {
            return false;
        };

        let ground = self.terrain.ground_height(body.position.x, body.position.z);
        body.settle_on_ground(ground);
        self.position = body.position;
        self.rotation = body.rotation;
        self.velocity = Vec3::ZERO;

        log::info!("{} landed", body.archetype());
        self.events.push(PilotEvent::AutoLanded { aircraft: entity });
        true
    }

    /// Camera pose for the current mode: cockpit offset rotated by the aircraft
    /// while flying, camera height above the body while walking.
    pub fn camera_pose(&self, world: &World) -> CameraPose {
        let body = self
            .possessed
            .and_then(|entity| world.get::<&AircraftBody>(entity).ok());
        match body {
            Some(body) => {
                let pose = body.pose();
                CameraPose {
                    position: pose.to_world(body.archetype().spec().cockpit_offset),
                    orientation: pose.orientation(),
                }
            }
            None => CameraPose {
                position: self.position + Vec3::Y * self.config.camera_height,
                orientation: euler_to_quat(Vec3::new(self.rotation.x, self.rotation.y, 0.0)),
            },
        }
    }

    fn update_camera(&mut self, world: &World) {
        let pose = self.camera_pose(world);
        self.camera.set_pose(pose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use engine_core::{FlightInput, Vec2, WalkInput};
    use terrain::FlatTerrain;

    const DT: f32 = 1.0 / 60.0;

    fn pilot_on_flat() -> PilotController<Camera> {
        PilotController::new(
            PilotConfig::default(),
            Rc::new(FlatTerrain::new(0.0)),
            Camera::default(),
        )
    }

    fn settle(pilot: &mut PilotController<Camera>, world: &mut World) {
        for _ in 0..120 {
            pilot.update(DT, &ControlSnapshot::idle(), world);
        }
    }

    fn parked(world: &mut World, archetype: Archetype, x: f32, z: f32) -> Entity {
        world.spawn((AircraftBody::new(archetype, Vec3::new(x, 3.0, z)),))
    }

    fn interact() -> ControlSnapshot {
        ControlSnapshot {
            interact: true,
            ..ControlSnapshot::idle()
        }
    }

    #[test]
    fn falls_onto_the_ground_and_stands() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 10.0, 0.0));
        settle(&mut pilot, &mut world);
        assert!(pilot.is_on_ground());
        assert_eq!(pilot.position().y, 1.8);
        assert_eq!(pilot.velocity().y, 0.0);
    }

    #[test]
    fn forward_walk_follows_yaw() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));
        let forward = ControlSnapshot {
            walk: WalkInput { x: 0.0, z: -1.0 },
            ..ControlSnapshot::idle()
        };
        for _ in 0..60 {
            pilot.update(DT, &forward, &mut world);
        }
        assert!((pilot.position().z + 10.0).abs() < 0.5, "z = {}", pilot.position().z);
        assert!(pilot.position().x.abs() < 1e-3);

        pilot.rotation.y = FRAC_PI_2;
        for _ in 0..60 {
            pilot.update(DT, &forward, &mut world);
        }
        assert!(pilot.position().x < -9.0, "quarter turn left walks toward -X");
    }

    #[test]
    fn running_is_faster_and_friction_stops_you() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));
        let run = ControlSnapshot {
            walk: WalkInput { x: 1.0, z: 0.0 },
            run: true,
            ..ControlSnapshot::idle()
        };
        pilot.update(DT, &run, &mut world);
        assert!((pilot.velocity().x - 20.0).abs() < 1e-4);

        settle(&mut pilot, &mut world);
        assert!(pilot.velocity().x.abs() < 0.01);
    }

    #[test]
    fn jump_only_from_the_ground() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));
        settle(&mut pilot, &mut world);
        let jump = ControlSnapshot {
            jump: true,
            ..ControlSnapshot::idle()
        };
        pilot.update(DT, &jump, &mut world);
        assert!(!pilot.is_on_ground());
        assert!(pilot.position().y > 1.8);
        let vy = pilot.velocity().y;
        pilot.update(DT, &jump, &mut world);
        assert!(pilot.velocity().y < vy, "no double jump");
    }

    #[test]
    fn walking_is_confined_to_world_bounds() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(3999.9, 1.8, 0.0));
        let right = ControlSnapshot {
            walk: WalkInput { x: 1.0, z: 0.0 },
            ..ControlSnapshot::idle()
        };
        for _ in 0..30 {
            pilot.update(DT, &right, &mut world);
        }
        assert_eq!(pilot.position().x, 4000.0);
    }

    #[test]
    fn walking_look_clamps_pitch() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        let look = ControlSnapshot {
            mouse_delta: Vec2::new(0.0, -5000.0),
            ..ControlSnapshot::idle()
        };
        pilot.update(DT, &look, &mut world);
        assert_eq!(pilot.rotation().x, FRAC_PI_2);
    }

    #[test]
    fn enter_rejects_missing_target_without_side_effects() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        let before = pilot.pose();
        assert_eq!(pilot.enter_aircraft(&mut world, None), Err(EnterError::NoTarget));
        assert_eq!(pilot.mode(), PilotMode::Walking);
        assert_eq!(pilot.possessed(), None);
        assert_eq!(pilot.pose(), before);
        assert!(pilot.drain_events().is_empty());

        let not_an_aircraft = world.spawn((42u32,));
        assert_eq!(
            pilot.enter_aircraft(&mut world, Some(not_an_aircraft)),
            Err(EnterError::UnknownAircraft(not_an_aircraft))
        );
        assert_eq!(pilot.mode(), PilotMode::Walking);
    }

    #[test]
    fn enter_rejects_distant_aircraft() {
        let mut world = World::new();
        let far = parked(&mut world, Archetype::Fighter, 100.0, 0.0);
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));
        let err = pilot.enter_aircraft(&mut world, Some(far)).unwrap_err();
        assert!(matches!(err, EnterError::OutOfRange { radius, .. } if radius == 15.0));
        assert!(!world.get::<&AircraftBody>(far).unwrap().is_flying());
        assert_eq!(pilot.mode(), PilotMode::Walking);
    }

    #[test]
    fn enter_possesses_and_snaps_to_the_aircraft() {
        let mut world = World::new();
        let jet = parked(&mut world, Archetype::Fighter, 8.0, 0.0);
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));

        pilot.enter_aircraft(&mut world, Some(jet)).unwrap();
        assert_eq!(pilot.mode(), PilotMode::Flying);
        assert_eq!(pilot.possessed(), Some(jet));
        assert_eq!(pilot.position(), Vec3::new(8.0, 3.0, 0.0));
        assert!(world.get::<&AircraftBody>(jet).unwrap().is_flying());
        assert_eq!(
            pilot.drain_events(),
            vec![PilotEvent::Entered {
                aircraft: jet,
                archetype: Archetype::Fighter
            }]
        );
        assert_eq!(
            pilot.enter_aircraft(&mut world, Some(jet)),
            Err(EnterError::AlreadyFlying)
        );
    }

    #[test]
    fn flying_pose_tracks_the_aircraft() {
        let mut world = World::new();
        let jet = parked(&mut world, Archetype::Fighter, 5.0, 0.0);
        world.get::<&mut AircraftBody>(jet).unwrap().position.y = 200.0;
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(5.0, 195.0, 0.0));
        pilot.enter_aircraft(&mut world, Some(jet)).unwrap();

        let climb = ControlSnapshot {
            flight: FlightInput {
                pitch: 1.0,
                throttle: 1.0,
                ..FlightInput::ZERO
            },
            ..ControlSnapshot::idle()
        };
        for _ in 0..30 {
            pilot.update(DT, &climb, &mut world);
            let body = world.get::<&AircraftBody>(jet).unwrap();
            assert_eq!(pilot.position(), body.position);
            assert_eq!(pilot.rotation(), body.rotation);
        }
    }

    #[test]
    fn cockpit_camera_sits_ahead_of_the_body() {
        let mut world = World::new();
        let cargo = parked(&mut world, Archetype::Cargo, 0.0, 5.0);
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));

        pilot.update(DT, &ControlSnapshot::idle(), &mut world);
        let walking = pilot.camera().position();
        assert!((walking.y - (1.8 + 1.7)).abs() < 1e-3);

        pilot.enter_aircraft(&mut world, Some(cargo)).unwrap();
        let pose = pilot.camera_pose(&world);
        assert!((pose.position - Vec3::new(0.0, 7.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn exit_steps_out_beside_the_aircraft() {
        let mut world = World::new();
        let heli = parked(&mut world, Archetype::Helicopter, 0.0, -6.0);
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));
        pilot.enter_aircraft(&mut world, Some(heli)).unwrap();

        assert!(pilot.exit_aircraft(&mut world));
        assert_eq!(pilot.mode(), PilotMode::Walking);
        assert_eq!(pilot.possessed(), None);
        assert_eq!(pilot.position(), Vec3::new(10.0, 1.8, -6.0));
        assert!(pilot.is_on_ground());
        let body = world.get::<&AircraftBody>(heli).unwrap();
        assert!(!body.is_flying());
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn exit_and_auto_land_are_no_ops_on_foot() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        let before = pilot.pose();
        assert!(!pilot.exit_aircraft(&mut world));
        assert!(!pilot.auto_land(&mut world));
        assert_eq!(pilot.pose(), before);
        assert!(pilot.drain_events().is_empty());
    }

    #[test]
    fn auto_land_keeps_the_pilot_aboard() {
        let mut world = World::new();
        let jet = parked(&mut world, Archetype::Generic, 0.0, 4.0);
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));
        pilot.enter_aircraft(&mut world, Some(jet)).unwrap();
        {
            let mut body = world.get::<&mut AircraftBody>(jet).unwrap();
            body.position.y = 40.0;
            body.rotation = Vec3::new(0.2, 0.9, -0.3);
        }

        assert!(pilot.auto_land(&mut world));
        assert_eq!(pilot.mode(), PilotMode::Flying);
        let body = world.get::<&AircraftBody>(jet).unwrap();
        assert_eq!(body.position.y, 3.0);
        assert_eq!(body.rotation, Vec3::new(0.0, 0.9, 0.0));
        assert_eq!(body.velocity, Vec3::ZERO);
        assert!(body.is_flying());
    }

    #[test]
    fn interact_boards_a_lone_aircraft() {
        let mut world = World::new();
        let jet = parked(&mut world, Archetype::Fighter, 6.0, 0.0);
        parked(&mut world, Archetype::Cargo, 60.0, 0.0);
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));

        pilot.update(DT, &interact(), &mut world);
        assert_eq!(pilot.possessed(), Some(jet));
    }

    #[test]
    fn interact_with_several_in_range_asks_for_a_choice() {
        let mut world = World::new();
        let near = parked(&mut world, Archetype::Helicopter, 4.0, 0.0);
        let nearer = parked(&mut world, Archetype::Fighter, 0.0, 3.0);
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));

        pilot.update(DT, &interact(), &mut world);
        assert_eq!(pilot.mode(), PilotMode::Walking);
        let events = pilot.drain_events();
        let [PilotEvent::SelectionRequested(candidates)] = events.as_slice() else {
            panic!("expected a selection request, got {:?}", events);
        };
        let order: Vec<Entity> = candidates.iter().map(|c| c.entity).collect();
        assert_eq!(order, vec![nearer, near]);
        assert!(pilot.is_highlighted(near) && pilot.is_highlighted(nearer));

        pilot.enter_aircraft(&mut world, Some(near)).unwrap();
        assert_eq!(pilot.possessed(), Some(near));
        assert!(pilot.nearby_aircraft().is_empty());
    }

    #[test]
    fn scan_is_throttled() {
        let mut world = World::new();
        let mut pilot = pilot_on_flat();
        pilot.place_at(Vec3::new(0.0, 1.8, 0.0));
        pilot.update(DT, &ControlSnapshot::idle(), &mut world);
        assert!(pilot.nearby_aircraft().is_empty());

        let jet = parked(&mut world, Archetype::Fighter, 5.0, 0.0);
        pilot.update(DT, &ControlSnapshot::idle(), &mut world);
        assert!(pilot.nearby_aircraft().is_empty(), "cache not refreshed yet");

        for _ in 0..6 {
            pilot.update(DT, &ControlSnapshot::idle(), &mut world);
        }
        assert!(pilot.is_highlighted(jet));
    }
}
