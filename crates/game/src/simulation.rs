//! Frame-stepped simulation: the pilot plus every aircraft, advanced once per
//! frame with the same clamped `dt`.

use std::rc::Rc;

use engine_core::{
    clamp_dt, ControlSnapshot, FlightInput, RenderSample, RenderSampleRaw, Terrain, Time, Vec3,
};
use flight::{AircraftBody, Archetype, REST_HEIGHT};
use hecs::{Entity, World};

use crate::camera::{Camera, CameraSink, CameraUniform};
use crate::config::GameConfig;
use crate::hud::HudReadout;
use crate::pilot::{EnterError, PilotController, PilotEvent};

pub struct Simulation<C: CameraSink = Camera> {
    world: World,
    terrain: Rc<dyn Terrain>,
    pilot: PilotController<C>,
    max_frame_dt: f32,
    paused: bool,
    elapsed: f32,
    ticks: u64,
}

impl<C: CameraSink> Simulation<C> {
    /// Build the world described by `config`: its terrain, its fleet and the pilot at spawn.
    pub fn new(config: &GameConfig, camera: C) -> Self {
        Self::with_terrain(config, config.terrain.build(), camera)
    }

    /// Same as `new` with an explicit height field.
    pub fn with_terrain(config: &GameConfig, terrain: Rc<dyn Terrain>, camera: C) -> Self {
        let pilot = PilotController::new(config.pilot.clone(), terrain.clone(), camera)
            .with_look(config.mouse_sensitivity, config.flight_look_scale);
        let mut sim = Self {
            world: World::new(),
            terrain,
            pilot,
            max_frame_dt: config.frame_dt_limit(),
            paused: false,
            elapsed: 0.0,
            ticks: 0,
        };
        for spawn in &config.fleet {
            sim.spawn_aircraft(spawn.archetype(), spawn.x, spawn.z, spawn.heading);
        }
        log::info!("Airbase ready with {} aircraft", config.fleet.len());
        sim
    }

    /// Park a new aircraft resting on the ground at (x, z).
    pub fn spawn_aircraft(&mut self, archetype: Archetype, x: f32, z: f32, heading: f32) -> Entity {
        let ground = self.terrain.ground_height(x, z);
        let mut body =
            AircraftBody::with_heading(archetype, Vec3::new(x, ground + REST_HEIGHT, z), heading);
        body.settle_on_ground(ground);
        self.world.spawn((body,))
    }

    /// Place an aircraft anywhere, e.g. already airborne.
    pub fn spawn_aircraft_at(&mut self, archetype: Archetype, position: Vec3) -> Entity {
        self.world.spawn((AircraftBody::new(archetype, position),))
    }

    /// Advance one frame. `raw_dt` is clamped to the configured step limit; non-finite or
    /// negative values count as zero. Returns the dt actually used.
    pub fn step(&mut self, raw_dt: f32, controls: &ControlSnapshot) -> f32 {
        if self.paused {
            return 0.0;
        }
        let dt = clamp_dt(raw_dt, self.max_frame_dt);
        if dt < raw_dt {
            log::debug!("Frame dt {:.3}s clamped to {:.3}s", raw_dt, dt);
        }

        self.pilot.update(dt, controls, &mut self.world);

        let possessed = self.pilot.possessed();
        let terrain = self.terrain.as_ref();
        for (entity, body) in self.world.query_mut::<&mut AircraftBody>() {
            if Some(entity) != possessed {
                body.update(dt, &FlightInput::ZERO, terrain);
            }
        }

        self.elapsed += dt;
        self.ticks += 1;
        dt
    }

    /// Advance by the wall-clock delta measured by `time`.
    pub fn step_with_time(&mut self, time: &Time, controls: &ControlSnapshot) -> f32 {
        self.step(time.clamped_delta_seconds(self.max_frame_dt), controls)
    }

    /// Stop stepping, e.g. while the window is hidden.
    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("Simulation paused");
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::info!("Simulation resumed");
            self.paused = false;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Simulated seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn terrain(&self) -> &dyn Terrain {
        self.terrain.as_ref()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pilot(&self) -> &PilotController<C> {
        &self.pilot
    }

    pub fn pilot_mut(&mut self) -> &mut PilotController<C> {
        &mut self.pilot
    }

    pub fn aircraft(&self, entity: Entity) -> Option<hecs::Ref<'_, AircraftBody>> {
        self.world.get::<&AircraftBody>(entity).ok()
    }

    pub fn aircraft_mut(&mut self, entity: Entity) -> Option<hecs::RefMut<'_, AircraftBody>> {
        self.world.get::<&mut AircraftBody>(entity).ok()
    }

    /// Every aircraft entity, in spawn order.
    pub fn aircraft_entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .world
            .query::<&AircraftBody>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        entities.sort_by_key(|e| e.id());
        entities
    }

    /// Board an aircraft chosen from a selection request.
    pub fn select_aircraft(&mut self, entity: Entity) -> Result<(), EnterError> {
        self.pilot.enter_aircraft(&mut self.world, Some(entity))
    }

    pub fn exit_aircraft(&mut self) -> bool {
        self.pilot.exit_aircraft(&mut self.world)
    }

    pub fn drain_events(&mut self) -> Vec<PilotEvent> {
        self.pilot.drain_events()
    }

    /// What the renderer samples this frame, one entry per aircraft.
    pub fn render_samples(&self) -> Vec<(Entity, RenderSample)> {
        let mut samples: Vec<(Entity, RenderSample)> = self
            .world
            .query::<&AircraftBody>()
            .iter()
            .map(|(entity, body)| (entity, body.render_sample(self.pilot.is_highlighted(entity))))
            .collect();
        samples.sort_by_key(|(e, _)| e.id());
        samples
    }

    /// Render samples packed for instanced GPU upload, same order as `render_samples`.
    pub fn render_instances(&self) -> Vec<RenderSampleRaw> {
        self.render_samples()
            .iter()
            .map(|(_, sample)| RenderSampleRaw::from(sample))
            .collect()
    }

    pub fn hud(&self) -> HudReadout {
        match self.pilot.possessed().and_then(|e| self.aircraft(e)) {
            Some(body) => HudReadout::flying(&body),
            None => HudReadout::walking(
                self.pilot.position(),
                self.pilot.velocity(),
                self.pilot.nearby_aircraft(),
            ),
        }
    }
}

impl Simulation<Camera> {
    /// View-projection and eye position for the current camera, ready for upload.
    pub fn camera_uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(self.pilot.camera())
    }
}
