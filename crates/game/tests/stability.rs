use engine_core::{ControlSnapshot, FlightInput, Vec2, WalkInput};
use game::{Camera, GameConfig, Simulation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn axis(rng: &mut StdRng) -> f32 {
    rng.gen_range(-1..=1) as f32
}

fn random_controls(rng: &mut StdRng) -> ControlSnapshot {
    ControlSnapshot {
        flight: FlightInput {
            pitch: axis(rng),
            yaw: axis(rng),
            roll: axis(rng),
            throttle: axis(rng),
        },
        walk: WalkInput {
            x: axis(rng),
            z: axis(rng),
        },
        interact: rng.gen_bool(0.05),
        exit: rng.gen_bool(0.01),
        run: rng.gen_bool(0.5),
        jump: rng.gen_bool(0.05),
        mouse_delta: Vec2::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0)),
        pointer_locked: rng.gen_bool(0.8),
    }
}

#[test]
fn random_sessions_stay_finite() {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(0xA1B);
    for session in 0..100 {
        let mut sim = Simulation::new(&config, Camera::default());
        for tick in 0..200 {
            // Occasionally feed a stalled frame; the clamp has to absorb it.
            let dt = if rng.gen_bool(0.02) {
                rng.gen_range(0.5..5.0)
            } else {
                rng.gen_range(0.0..=1.0 / 30.0)
            };
            sim.step(dt, &random_controls(&mut rng));

            let pilot = sim.pilot().pose();
            assert!(pilot.is_finite(), "session {} tick {}: pilot {:?}", session, tick, pilot);
            for (entity, sample) in sim.render_samples() {
                assert!(
                    sample.pose.is_finite(),
                    "session {} tick {}: {:?} {:?}",
                    session,
                    tick,
                    entity,
                    sample.pose
                );
                let body = sim.aircraft(entity).unwrap();
                assert!(body.velocity.is_finite());
                assert!(body.fault().is_none());
                let limits = body.archetype().spec().control;
                assert!(body.rotation.x.abs() <= limits.pitch_limit);
                assert!(body.rotation.z.abs() <= limits.roll_limit);
            }
        }
    }
}
