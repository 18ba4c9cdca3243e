//! Headless airbase session: walk to the nearest fighter, board it, climb out
//! and step back down, logging the HUD once per simulated second.

use std::path::Path;

use anyhow::{bail, Context, Result};
use engine_core::Vec3;
use flight::{wrap_angle, Archetype};
use game::{Camera, GameConfig, PilotEvent, PilotMode, Simulation};
use hecs::Entity;
use input::{ElementState, InputState, KeyCode};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Stop walking and press E this close to the aircraft.
const BOARDING_DISTANCE: f32 = 8.0;
const WALK_TIMEOUT: f32 = 60.0;
const CLIMB_SECONDS: f32 = 4.0;
const CRUISE_SECONDS: f32 = 3.0;

struct Session {
    sim: Simulation<Camera>,
    input: InputState,
    mouse_sensitivity: f32,
    next_report: f32,
}

impl Session {
    fn new(config: &GameConfig) -> Self {
        let mut input = InputState::new();
        input.set_cursor_locked(true);
        Self {
            sim: Simulation::new(config, Camera::default()),
            input,
            mouse_sensitivity: config.mouse_sensitivity,
            next_report: 0.0,
        }
    }

    fn press(&mut self, key: KeyCode) {
        self.input.process_keyboard(key, ElementState::Pressed);
    }

    fn release(&mut self, key: KeyCode) {
        self.input.process_keyboard(key, ElementState::Released);
    }

    /// Run one frame and return what the pilot reported.
    fn frame(&mut self) -> Vec<PilotEvent> {
        let controls = self.input.snapshot();
        self.sim.step(FRAME_DT, &controls);
        self.input.begin_frame();

        if self.sim.elapsed_seconds() >= self.next_report {
            log::info!("[{:5.1}s] {}", self.sim.elapsed_seconds(), self.sim.hud());
            self.next_report += 1.0;
        }
        self.sim.drain_events()
    }

    fn run_for(&mut self, seconds: f32) -> Vec<PilotEvent> {
        let until = self.sim.elapsed_seconds() + seconds;
        let mut events = Vec::new();
        while self.sim.elapsed_seconds() < until {
            events.extend(self.frame());
        }
        events
    }

    /// Swing the walking view toward `point` with one mouse movement.
    fn face(&mut self, point: Vec3) {
        let to = point - self.sim.pilot().position();
        let desired = (-to.x).atan2(-to.z);
        let turn = wrap_angle(self.sim.pilot().rotation().y - desired);
        self.input
            .process_mouse_motion(((turn / self.mouse_sensitivity) as f64, 0.0));
        // Motion reaches the snapshot on the following frame.
        self.frame();
        self.frame();
    }

    fn nearest(&self, archetype: Archetype) -> Option<(Entity, Vec3)> {
        let from = self.sim.pilot().position();
        self.sim
            .aircraft_entities()
            .into_iter()
            .filter_map(|e| {
                let body = self.sim.aircraft(e)?;
                (body.archetype() == archetype).then_some((e, body.position))
            })
            .min_by(|a, b| a.1.distance(from).total_cmp(&b.1.distance(from)))
    }

    fn walk_to(&mut self, target: Vec3) -> Result<()> {
        self.face(target);
        self.press(KeyCode::KeyW);
        let deadline = self.sim.elapsed_seconds() + WALK_TIMEOUT;
        while self.sim.pilot().position().distance(target) > BOARDING_DISTANCE {
            if self.sim.elapsed_seconds() > deadline {
                bail!("pilot never reached the aircraft at {:?}", target);
            }
            self.frame();
        }
        self.release(KeyCode::KeyW);
        self.frame();
        Ok(())
    }

    fn board(&mut self, target: Entity) -> Result<()> {
        self.press(KeyCode::KeyE);
        let events = self.frame();
        self.release(KeyCode::KeyE);

        for event in events {
            match event {
                PilotEvent::Entered { .. } => return Ok(()),
                PilotEvent::SelectionRequested(candidates) => {
                    log::info!("{} aircraft in range, picking the fighter", candidates.len());
                    return self
                        .sim
                        .select_aircraft(target)
                        .context("boarding the selected fighter");
                }
                _ => {}
            }
        }
        bail!("pressing E did not board anything")
    }

    fn fly(&mut self) {
        self.press(KeyCode::Space);
        self.press(KeyCode::KeyS);
        self.run_for(CLIMB_SECONDS);
        self.release(KeyCode::KeyS);
        self.run_for(CRUISE_SECONDS);
        self.release(KeyCode::Space);
    }

    fn exit(&mut self) -> Result<()> {
        self.press(KeyCode::Escape);
        let events = self.frame();
        self.release(KeyCode::Escape);
        if self.sim.pilot().mode() != PilotMode::Walking {
            bail!("still aboard after Escape: {:?}", events);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from(Path::new(&path))
            .with_context(|| format!("loading config from {}", path))?,
        None => GameConfig::load(),
    };

    log::info!("Starting airbase session");
    let mut session = Session::new(&config);

    let (fighter, parked_at) = session
        .nearest(Archetype::Fighter)
        .context("no fighter parked on the airbase")?;

    session.walk_to(parked_at)?;
    session.board(fighter)?;
    session.fly();
    session.exit()?;
    session.run_for(2.0);

    log::info!(
        "Session over after {:.1}s simulated ({} ticks)",
        session.sim.elapsed_seconds(),
        session.sim.tick_count()
    );
    Ok(())
}
