use galaxy_core::GalaxyConfig;
use glam::Vec3;

/// Newtonian attraction with a hard minimum-distance cutoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Gravitational constant
    pub g: f32,
    /// Pairs at or below this separation do not interact
    pub min_distance: f32,
}

impl Gravity {
    pub fn new(g: f32, min_distance: f32) -> Self {
        Self { g, min_distance }
    }

    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self::new(config.gravity, config.min_distance)
    }

    /// Force magnitude `G * m_a * m_b / d^2`, or None inside the guard
    pub fn magnitude(&self, mass_a: f32, mass_b: f32, distance: f32) -> Option<f32> {
        if distance <= self.min_distance || distance <= 0.0 {
            return None;
        }
        // m_a * m_b first so the result does not depend on argument order
        Some(self.g * (mass_a * mass_b) / (distance * distance))
    }

    /// Force on body `a` pulling it toward body `b`.
    ///
    /// Swapping the arguments yields exactly the negated vector, which lets the
    /// reaction-pair and owned-accumulation schemes agree bit for bit on each pair.
    pub fn force(&self, pos_a: Vec3, mass_a: f32, pos_b: Vec3, mass_b: f32) -> Option<Vec3> {
        let delta = pos_b - pos_a;
        let distance = delta.length();
        let magnitude = self.magnitude(mass_a, mass_b, distance)?;
        Some(delta / distance * magnitude)
    }
}
