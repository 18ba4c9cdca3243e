//! Fractal noise height field.
//!
//! **Seed-based determinism:** all noise derives from `config.seed`, so the same
//! seed produces the same height at every (x, z) regardless of query order.

use engine_core::Terrain;
use noise::{NoiseFn, Perlin, Simplex};

/// Derive a deterministic u32 noise seed from a world seed and an offset.
#[inline]
fn deterministic_noise_seed(seed: u64, offset: u64) -> u32 {
    ((seed.wrapping_add(offset))
        .wrapping_mul(0x9e3779b97f4a7c15_u64)
        .wrapping_add(offset.wrapping_mul(0x6c078965_u64))
        >> 32) as u32
}

/// Configuration for a noise height field.
#[derive(Debug, Clone)]
pub struct NoiseTerrainConfig {
    /// Peak-to-trough height in world units.
    pub height_scale: f32,
    /// Height subtracted after scaling, so the field straddles zero.
    pub base: f32,
    /// Noise frequency (lower = smoother).
    pub frequency: f64,
    /// Number of octaves for fractal noise.
    pub octaves: u32,
    /// Lacunarity (frequency multiplier per octave).
    pub lacunarity: f64,
    /// Persistence (amplitude multiplier per octave).
    pub persistence: f64,
    pub seed: u64,
}

impl Default for NoiseTerrainConfig {
    fn default() -> Self {
        Self {
            height_scale: 30.0,
            base: 10.0,
            frequency: 0.004,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 0,
        }
    }
}

/// Perlin/Simplex fBm terrain.
pub struct NoiseTerrain {
    perlin: Perlin,
    simplex: Simplex,
    config: NoiseTerrainConfig,
}

impl NoiseTerrain {
    pub fn new(config: NoiseTerrainConfig) -> Self {
        Self {
            perlin: Perlin::new(deterministic_noise_seed(config.seed, 0)),
            simplex: Simplex::new(deterministic_noise_seed(config.seed, 1)),
            config,
        }
    }

    pub fn config(&self) -> &NoiseTerrainConfig {
        &self.config
    }

    /// Normalized fractal noise in [0, 1].
    fn fractal_noise(&self, x: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.config.frequency;
        let mut max_value = 0.0;

        for _ in 0..self.config.octaves.max(1) {
            // Mix Perlin and Simplex for variety
            let perlin_sample = self.perlin.get([x * frequency, z * frequency]);
            let simplex_sample = self
                .simplex
                .get([x * frequency + 1000.0, z * frequency + 1000.0]);

            value += (perlin_sample * 0.7 + simplex_sample * 0.3) * amplitude;
            max_value += amplitude;

            amplitude *= self.config.persistence;
            frequency *= self.config.lacunarity;
        }

        ((value / max_value + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl Terrain for NoiseTerrain {
    fn ground_height(&self, x: f32, z: f32) -> f32 {
        let n = self.fractal_noise(x as f64, z as f64) as f32;
        n * self.config.height_scale - self.config.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Same seed must produce identical heights (replayability).
    #[test]
    fn noise_terrain_deterministic_same_seed() {
        let config = NoiseTerrainConfig {
            seed: 98765,
            ..Default::default()
        };
        let a = NoiseTerrain::new(config.clone());
        let b = NoiseTerrain::new(config);
        for i in 0..32 {
            let (x, z) = (i as f32 * 13.7, i as f32 * -7.3);
            assert_eq!(a.ground_height(x, z), b.ground_height(x, z));
        }
    }

    #[test]
    fn noise_terrain_different_seed_different_heights() {
        let a = NoiseTerrain::new(NoiseTerrainConfig {
            seed: 11111,
            ..Default::default()
        });
        let b = NoiseTerrain::new(NoiseTerrainConfig {
            seed: 22222,
            ..Default::default()
        });
        let differs = (0..64).any(|i| {
            let (x, z) = (i as f32 * 31.0 + 0.5, i as f32 * 17.0 + 0.5);
            a.ground_height(x, z) != b.ground_height(x, z)
        });
        assert!(differs);
    }

    #[test]
    fn noise_terrain_stays_within_scale() {
        let config = NoiseTerrainConfig::default();
        let (lo, hi) = (-config.base, config.height_scale - config.base);
        let t = NoiseTerrain::new(config);
        for i in 0..200 {
            let h = t.ground_height(i as f32 * 23.0, i as f32 * -11.0);
            assert!(h >= lo && h <= hi, "height {} outside [{}, {}]", h, lo, hi);
        }
    }
}
