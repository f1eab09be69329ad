use std::f32::consts::{FRAC_PI_3, FRAC_PI_8};
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::BodyKind;

/// Galaxy configuration, fixed at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalaxyConfig {
    /// Characteristic disc radius; bodies beyond twice this are recycled
    pub galaxy_radius: f32,
    /// Gravitational constant
    pub gravity: f32,
    /// Pairs at or below this distance do not interact
    pub min_distance: f32,
    /// Wall-clock frame time multiplier
    pub simulation_speed: f32,
    /// Number of bodies of each spawnable kind
    pub population: Population,
    pub attractor: AttractorConfig,
    /// Shift every body each tick so the attractor sits at the origin
    pub recenter_on_attractor: bool,
    pub force_scheme: ForceScheme,
    pub workers: WorkerCount,
    /// Random seed for deterministic runs (None = seeded from OS entropy)
    pub seed: Option<u64>,
    pub dark_matter_motion: DarkMatterMotion,
    /// Angular speed (rad per simulated time unit) of the innermost dark matter
    /// under differential rotation
    pub dark_matter_angular_speed: f32,
    /// Initial speed as a fraction of the spawn distance
    pub orbital_speed_factor: f32,
    /// Extra rotation of the initial velocity around the disc normal
    pub velocity_bias_angle: f32,
    /// Occasionally tint stars with an outlier color
    pub star_outliers: bool,
    pub profiles: SpawnProfiles,
    /// Emit a statistics line every this many ticks (0 = never)
    pub log_every_ticks: u32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            galaxy_radius: GALAXY_RADIUS,
            gravity: G,
            min_distance: MIN_DISTANCE,
            simulation_speed: SIMULATION_SPEED,
            population: Population::default(),
            attractor: AttractorConfig::default(),
            recenter_on_attractor: true,
            force_scheme: ForceScheme::OwnedAccumulation,
            workers: WorkerCount::Hardware,
            seed: Some(2),
            dark_matter_motion: DarkMatterMotion::DifferentialRotation,
            dark_matter_angular_speed: 0.05,
            orbital_speed_factor: 0.25,
            velocity_bias_angle: FRAC_PI_3,
            star_outliers: true,
            profiles: SpawnProfiles::default(),
            log_every_ticks: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
    pub stars: usize,
    pub gas_clumps: usize,
    pub dust_clouds: usize,
    pub dark_matter: usize,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            stars: 499,
            gas_clumps: 500,
            dust_clouds: 200,
            dark_matter: 100,
        }
    }
}

impl Population {
    /// Configured count for a kind; the attractor is always exactly one
    pub fn count(&self, kind: BodyKind) -> usize {
        match kind {
            BodyKind::CentralAttractor => 1,
            BodyKind::Star => self.stars,
            BodyKind::GasClump => self.gas_clumps,
            BodyKind::DustCloud => self.dust_clouds,
            BodyKind::DarkMatter => self.dark_matter,
        }
    }

    /// Total store size including the attractor
    pub fn total(&self) -> usize {
        1 + self.stars + self.gas_clumps + self.dust_clouds + self.dark_matter
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractorConfig {
    pub mass: f32,
    pub radius: f32,
    pub motion: AttractorMotion,
}

impl Default for AttractorConfig {
    fn default() -> Self {
        Self {
            mass: ATTRACTOR_MASS,
            radius: ATTRACTOR_RADIUS,
            motion: AttractorMotion::Fixed,
        }
    }
}

/// Whether the black hole responds to the pull of other bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttractorMotion {
    /// Pinned; acts as a force source only
    Fixed,
    /// Integrated like every other body
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DarkMatterMotion {
    /// Ordinary pairwise gravity
    Gravitational,
    /// Deterministic rotation about the disc normal, faster near the core
    DifferentialRotation,
}

/// How pairwise contributions are accumulated in the force pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceScheme {
    /// Every body sums the pull of all others into its own velocity.
    /// Each pair is evaluated twice, but a body is only written by the worker
    /// that owns its index, so any worker count is safe.
    OwnedAccumulation,
    /// Each unordered pair is evaluated once and both bodies are updated.
    /// Writes cross partition boundaries, so this runs on a single worker.
    ReactionPairs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerCount {
    /// Use the hardware concurrency, or `FALLBACK_WORKERS` if unknown
    Hardware,
    Fixed(usize),
}

impl WorkerCount {
    pub fn resolve(&self) -> usize {
        match *self {
            Self::Fixed(k) => k,
            Self::Hardware => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(FALLBACK_WORKERS),
        }
    }
}

/// Disc sampling parameters for one kind.
///
/// Distances are fractions of the galaxy radius, so `t` (normalized radius)
/// ranges over `[inner, outer]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnProfile {
    pub inner: f32,
    pub outer: f32,
    /// Half-width of the out-of-disc tilt at the center, shrinking linearly to zero at t = 1
    pub tilt: f32,
    /// Mass at t = 0
    pub mass_center: f32,
    /// Mass at t = 1
    pub mass_edge: f32,
}

impl SpawnProfile {
    /// Linear mass interpolation in normalized radius
    pub fn mass_at(&self, t: f32) -> f32 {
        self.mass_center + (self.mass_edge - self.mass_center) * t
    }

    fn validate(&self, kind: BodyKind) -> Result<(), ConfigError> {
        let invalid = |reason: &'static str| -> Result<(), ConfigError> {
            Err(ConfigError::InvalidProfile { kind, reason })
        };
        if !(self.inner > 0.0) {
            return invalid("inner bound must be positive");
        }
        if !(self.outer > self.inner) || !self.outer.is_finite() {
            return invalid("outer bound must exceed inner bound");
        }
        if !(self.tilt >= 0.0) || !self.tilt.is_finite() {
            return invalid("tilt must be non-negative and finite");
        }
        if !self.mass_center.is_finite() || !self.mass_edge.is_finite() {
            return invalid("mass endpoints must be finite");
        }
        // Mass is linear in t, so positive at both ends means positive throughout
        if !(self.mass_at(self.inner) > 0.0) || !(self.mass_at(self.outer) > 0.0) {
            return invalid("mass must stay positive across the spawn range");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnProfiles {
    pub star: SpawnProfile,
    pub gas_clump: SpawnProfile,
    pub dust_cloud: SpawnProfile,
    pub dark_matter: SpawnProfile,
}

impl Default for SpawnProfiles {
    fn default() -> Self {
        Self {
            star: SpawnProfile {
                inner: 15.0 / GALAXY_RADIUS,
                outer: 1.0,
                tilt: FRAC_PI_3,
                mass_center: 8.0,
                mass_edge: 0.5,
            },
            gas_clump: SpawnProfile {
                inner: 20.0 / GALAXY_RADIUS,
                outer: 1.0,
                tilt: FRAC_PI_3,
                mass_center: 10.0,
                mass_edge: 0.5,
            },
            dust_cloud: SpawnProfile {
                inner: 0.5,
                outer: 1.0,
                tilt: FRAC_PI_3,
                mass_center: 3.0,
                mass_edge: 1.0,
            },
            dark_matter: SpawnProfile {
                inner: 0.5,
                outer: 1.5,
                tilt: FRAC_PI_8,
                mass_center: 20.0,
                mass_edge: 30.0,
            },
        }
    }
}

impl SpawnProfiles {
    /// Profile for a spawnable kind; None for the attractor
    pub fn get(&self, kind: BodyKind) -> Option<&SpawnProfile> {
        match kind {
            BodyKind::CentralAttractor => None,
            BodyKind::Star => Some(&self.star),
            BodyKind::GasClump => Some(&self.gas_clump),
            BodyKind::DustCloud => Some(&self.dust_cloud),
            BodyKind::DarkMatter => Some(&self.dark_matter),
        }
    }
}

impl GalaxyConfig {
    /// Reject settings that would produce NaNs or an ill-formed population
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("galaxy_radius", self.galaxy_radius)?;
        positive("gravity", self.gravity)?;
        positive("simulation_speed", self.simulation_speed)?;
        positive("attractor mass", self.attractor.mass)?;
        if !(self.min_distance >= 0.0) || !self.min_distance.is_finite() {
            return Err(ConfigError::InvalidGuard(self.min_distance));
        }
        finite("dark_matter_angular_speed", self.dark_matter_angular_speed)?;
        finite("orbital_speed_factor", self.orbital_speed_factor)?;
        finite("velocity_bias_angle", self.velocity_bias_angle)?;

        for kind in BodyKind::SPAWNABLE {
            if self.population.count(kind) == 0 {
                return Err(ConfigError::EmptyPopulation(kind));
            }
            if let Some(profile) = self.profiles.get(kind) {
                profile.validate(kind)?;
            }
        }

        let workers = match self.workers {
            WorkerCount::Fixed(0) => return Err(ConfigError::ZeroWorkers),
            other => other.resolve(),
        };
        if self.force_scheme == ForceScheme::ReactionPairs && workers > 1 {
            return Err(ConfigError::ReactionPairsInParallel(workers));
        }

        Ok(())
    }

    /// Outer spawn radius of dark matter in world units
    pub fn dark_matter_outer_radius(&self) -> f32 {
        self.profiles.dark_matter.outer * self.galaxy_radius
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GalaxyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_scalars() {
        let mut config = GalaxyConfig::default();
        config.galaxy_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "galaxy_radius", .. })
        ));

        let mut config = GalaxyConfig::default();
        config.gravity = -4.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "gravity", .. })
        ));

        let mut config = GalaxyConfig::default();
        config.gravity = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_population() {
        let mut config = GalaxyConfig::default();
        config.population.dust_clouds = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPopulation(BodyKind::DustCloud))
        );
    }

    #[test]
    fn test_rejects_profile_touching_center() {
        let mut config = GalaxyConfig::default();
        config.profiles.star.inner = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProfile { kind: BodyKind::Star, .. })
        ));
    }

    #[test]
    fn test_rejects_mass_crossing_zero() {
        let mut config = GalaxyConfig::default();
        // Falls to zero before the outer bound
        config.profiles.dark_matter.mass_center = 10.0;
        config.profiles.dark_matter.mass_edge = -5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProfile { kind: BodyKind::DarkMatter, .. })
        ));
    }

    #[test]
    fn test_rejects_infinite_tilt() {
        let mut config = GalaxyConfig::default();
        config.profiles.gas_clump.tilt = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProfile { kind: BodyKind::GasClump, .. })
        ));
    }

    #[test]
    fn test_rejects_infinite_mass_endpoint() {
        let mut config = GalaxyConfig::default();
        config.profiles.star.mass_edge = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProfile { kind: BodyKind::Star, .. })
        ));

        let mut config = GalaxyConfig::default();
        config.profiles.dust_cloud.mass_center = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProfile { kind: BodyKind::DustCloud, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_velocity_settings() {
        let mut config = GalaxyConfig::default();
        config.orbital_speed_factor = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "orbital_speed_factor", .. })
        ));

        let mut config = GalaxyConfig::default();
        config.velocity_bias_angle = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "velocity_bias_angle", .. })
        ));
    }

    #[test]
    fn test_dark_matter_speed_may_be_negative_but_finite() {
        let mut config = GalaxyConfig::default();
        config.dark_matter_angular_speed = -0.05;
        assert_eq!(config.validate(), Ok(()));

        config.dark_matter_angular_speed = f32::NAN;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { name: "dark_matter_angular_speed", .. }));
        assert!(err.to_string().ends_with("must be finite, got NaN"));
    }

    #[test]
    fn test_worker_rules() {
        let mut config = GalaxyConfig::default();
        config.workers = WorkerCount::Fixed(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroWorkers));

        config.workers = WorkerCount::Fixed(4);
        config.force_scheme = ForceScheme::ReactionPairs;
        assert_eq!(config.validate(), Err(ConfigError::ReactionPairsInParallel(4)));

        config.workers = WorkerCount::Fixed(1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_hardware_workers_resolve_to_at_least_one() {
        assert!(WorkerCount::Hardware.resolve() >= 1);
        assert_eq!(WorkerCount::Fixed(32).resolve(), 32);
    }

    #[test]
    fn test_mass_interpolation() {
        let star = SpawnProfiles::default().star;
        assert_eq!(star.mass_at(0.0), 8.0);
        assert_eq!(star.mass_at(1.0), 0.5);
        assert!((star.mass_at(0.5) - 4.25).abs() < 1e-6);
    }
}
