use galaxy_core::*;
use rand::Rng;

use crate::spawn::spawn_body;

/// What the warden decided for one body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    /// Drifted past `ESCAPE_RADIUS_FACTOR * galaxy_radius`
    Escaped,
    /// Dust that fell inside `galaxy_radius / DUST_BURN_DIVISOR`
    BurnedUp,
}

/// Respawns performed by one warden pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryReport {
    pub escaped: usize,
    pub burned_up: usize,
}

impl BoundaryReport {
    pub fn total(&self) -> usize {
        self.escaped + self.burned_up
    }
}

impl std::ops::AddAssign for BoundaryReport {
    fn add_assign(&mut self, rhs: Self) {
        self.escaped += rhs.escaped;
        self.burned_up += rhs.burned_up;
    }
}

pub fn inspect(body: &Body, galaxy_radius: f32) -> Verdict {
    let distance = body.distance_from_origin();
    let escaped = distance > ESCAPE_RADIUS_FACTOR * galaxy_radius;
    match body.kind {
        BodyKind::CentralAttractor => Verdict::Keep,
        BodyKind::Star | BodyKind::GasClump | BodyKind::DarkMatter if escaped => Verdict::Escaped,
        BodyKind::Star | BodyKind::GasClump | BodyKind::DarkMatter => Verdict::Keep,
        BodyKind::DustCloud if escaped => Verdict::Escaped,
        BodyKind::DustCloud if distance < galaxy_radius / DUST_BURN_DIVISOR => Verdict::BurnedUp,
        BodyKind::DustCloud => Verdict::Keep,
    }
}

/// Respawn, in place, every body that left the valid volume.
/// Runs after position integration, one body at a time.
pub fn enforce(bodies: &mut [Body], config: &GalaxyConfig, rng: &mut impl Rng) -> BoundaryReport {
    let mut report = BoundaryReport::default();
    for body in bodies.iter_mut() {
        match inspect(body, config.galaxy_radius) {
            Verdict::Keep => continue,
            Verdict::Escaped => report.escaped += 1,
            Verdict::BurnedUp => report.burned_up += 1,
        }
        *body = spawn_body(body.kind, config, rng);
    }
    report
}
