//! Game configuration (look, timing, terrain, pilot, fleet). Loaded from config.ron at startup.

use engine_core::{Terrain, Vec3, MAX_FRAME_DT};
use flight::Archetype;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use terrain::{AirbaseTerrain, FlatTerrain, NoiseTerrain, NoiseTerrainConfig, AIRBASE_PARKING};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("max_frame_dt must be in (0, {max}], got {value}")]
    FrameDt { value: f32, max: f32 },
}

/// Persistent game settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Radians of walking look per pixel of mouse motion.
    #[serde(default = "default_mouse_sensitivity")]
    pub mouse_sensitivity: f32,
    /// Extra factor on mouse look while flying.
    #[serde(default = "default_flight_look_scale")]
    pub flight_look_scale: f32,
    /// Upper bound on a single simulation step (seconds).
    #[serde(default = "default_max_frame_dt")]
    pub max_frame_dt: f32,
    #[serde(default)]
    pub terrain: TerrainChoice,
    #[serde(default)]
    pub pilot: PilotConfig,
    #[serde(default = "default_fleet")]
    pub fleet: Vec<AircraftSpawn>,
}

fn default_mouse_sensitivity() -> f32 {
    0.001
}
fn default_flight_look_scale() -> f32 {
    0.3
}
fn default_max_frame_dt() -> f32 {
    MAX_FRAME_DT
}
fn default_fleet() -> Vec<AircraftSpawn> {
    AIRBASE_PARKING
        .iter()
        .map(|spot| AircraftSpawn {
            kind: spot.kind.to_string(),
            x: spot.x,
            z: spot.z,
            heading: 0.0,
        })
        .collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: default_mouse_sensitivity(),
            flight_look_scale: default_flight_look_scale(),
            max_frame_dt: default_max_frame_dt(),
            terrain: TerrainChoice::default(),
            pilot: PilotConfig::default(),
            fleet: default_fleet(),
        }
    }
}

/// Which height field the world uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum TerrainChoice {
    /// Rolling hills around the runways.
    #[default]
    Airbase,
    Flat { height: f32 },
    Noise {
        seed: u64,
        height_scale: f32,
        frequency: f64,
    },
}

impl TerrainChoice {
    pub fn build(&self) -> Rc<dyn Terrain> {
        match self {
            TerrainChoice::Airbase => Rc::new(AirbaseTerrain),
            TerrainChoice::Flat { height } => Rc::new(FlatTerrain::new(*height)),
            TerrainChoice::Noise {
                seed,
                height_scale,
                frequency,
            } => Rc::new(NoiseTerrain::new(NoiseTerrainConfig {
                seed: *seed,
                height_scale: *height_scale,
                frequency: *frequency,
                ..Default::default()
            })),
        }
    }
}

/// Walking body tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Upward speed of a jump (m/s).
    pub jump_power: f32,
    /// Downward acceleration while airborne (m/s^2).
    pub gravity: f32,
    /// Body height above the ground when standing.
    pub eye_height: f32,
    /// Camera height above the body.
    pub camera_height: f32,
    /// Aircraft closer than this can be boarded.
    pub interaction_radius: f32,
    /// Seconds between nearby-aircraft scans.
    pub scan_interval: f32,
    /// Walking is confined to |x|, |z| <= this.
    pub world_bound: f32,
    /// Sideways distance from the aircraft when climbing out.
    pub exit_offset: f32,
    pub spawn: Vec3,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            walk_speed: 10.0,
            run_speed: 20.0,
            jump_power: 8.0,
            gravity: 25.0,
            eye_height: 1.8,
            camera_height: 1.7,
            interaction_radius: 15.0,
            scan_interval: 0.1,
            world_bound: 4000.0,
            exit_offset: 10.0,
            spawn: Vec3::new(0.0, 2.0, 50.0),
        }
    }
}

/// One parked aircraft placed at world population time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftSpawn {
    /// Archetype name; unknown names become `generic`.
    pub kind: String,
    pub x: f32,
    pub z: f32,
    /// Initial yaw in radians.
    #[serde(default)]
    pub heading: f32,
}

impl AircraftSpawn {
    pub fn archetype(&self) -> Archetype {
        Archetype::from_name(&self.kind.to_ascii_lowercase())
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dt = self.max_frame_dt;
        if dt.is_finite() && dt > 0.0 && dt <= MAX_FRAME_DT {
            Ok(())
        } else {
            Err(ConfigError::FrameDt {
                value: dt,
                max: MAX_FRAME_DT,
            })
        }
    }

    /// The step limit to run with: `max_frame_dt` when valid, `MAX_FRAME_DT` otherwise.
    pub fn frame_dt_limit(&self) -> f32 {
        match self.validate() {
            Ok(()) => self.max_frame_dt,
            Err(e) => {
                log::warn!("{}, stepping with {}s", e, MAX_FRAME_DT);
                MAX_FRAME_DT
            }
        }
    }

    /// Pretty-printed RON, e.g. to seed a config file.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
