use std::f32::consts::TAU;

use galaxy_core::*;
use glam::{Quat, Vec3};
use rand::Rng;

/// Axis the disc rotates around
pub const DISC_NORMAL: Vec3 = Vec3::Z;

/// In-plane axis used to tilt a body out of the disc
pub const TILT_AXIS: Vec3 = Vec3::X;

/// Chance that a freshly spawned star is tinted red
const STAR_RED_CHANCE: f64 = 0.01;

/// Chance that a freshly spawned star is tinted blue (rolled independently, wins over red)
const STAR_BLUE_CHANCE: f64 = 0.001;

/// Build the full initial population: the attractor at index 0, then each
/// spawnable kind in `BodyKind::SPAWNABLE` order.
pub fn populate(config: &GalaxyConfig, rng: &mut impl Rng) -> BodyStore {
    let mut bodies = Vec::with_capacity(config.population.total());
    bodies.push(spawn_body(BodyKind::CentralAttractor, config, rng));

    for kind in BodyKind::SPAWNABLE {
        for _ in 0..config.population.count(kind) {
            bodies.push(spawn_body(kind, config, rng));
        }
    }

    BodyStore::new(bodies)
}

/// Sample a fresh state for a body of `kind`.
///
/// Every spawnable kind shares one skeleton:
/// 1. pick an angle around the disc and a distance inside the kind's band
/// 2. tilt the point out of the disc by an angle that shrinks toward the rim
/// 3. spin it around the disc normal to get the position
/// 4. velocity is the same offset, scaled down and turned a little further
///    around the normal, which gives a roughly orbital but biased start
/// 5. mass is interpolated in the normalized radius, visuals follow from it
///
/// The attractor is not sampled; it always comes back at rest at the origin.
pub fn spawn_body(kind: BodyKind, config: &GalaxyConfig, rng: &mut impl Rng) -> Body {
    let Some(profile) = config.profiles.get(kind) else {
        return Body::attractor(config.attractor.mass, config.attractor.radius);
    };

    let radius = config.galaxy_radius;
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(profile.inner * radius..profile.outer * radius);
    let t = distance / radius;
    let eccentricity = rng.gen_range(-profile.tilt..=profile.tilt) * (1.0 - t);

    let offset_from_disc = Quat::from_axis_angle(TILT_AXIS, eccentricity) * Vec3::new(0.0, distance, 0.0);
    let around_center = Quat::from_axis_angle(DISC_NORMAL, angle) * offset_from_disc;

    let position = around_center;
    let velocity = Quat::from_axis_angle(DISC_NORMAL, config.velocity_bias_angle)
        * (around_center * config.orbital_speed_factor);
    let mass = profile.mass_at(t);

    let (color, visual_radius) = appearance(kind, mass, t, config, rng);
    Body::new(kind, position, velocity, mass).with_appearance(color, visual_radius)
}

/// Color and visual radius for a freshly spawned body
fn appearance(
    kind: BodyKind,
    mass: f32,
    t: f32,
    config: &GalaxyConfig,
    rng: &mut impl Rng,
) -> (Rgba, f32) {
    match kind {
        BodyKind::CentralAttractor => (palette::BLACK, config.attractor.radius),
        BodyKind::Star => {
            let core = palette::GOLD.lerp(palette::WHITE, t);
            let rim = palette::WHITE.lerp(palette::SKYBLUE, t);
            let mut color = core.lerp(rim, t);
            if config.star_outliers {
                if rng.gen_bool(STAR_RED_CHANCE) {
                    color = palette::RED;
                }
                if rng.gen_bool(STAR_BLUE_CHANCE) {
                    color = palette::BLUE;
                }
            }
            (color, mass.powf(RADIUS_EXPONENT))
        }
        BodyKind::GasClump => (
            palette::BLUE.lerp(palette::VIOLET, t).with_alpha(127),
            mass * GAS_RADIUS_SCALE,
        ),
        BodyKind::DustCloud => {
            let color = palette::BEIGE
                .lerp(palette::BROWN, t)
                .lerp(palette::DARKBROWN, t)
                .with_alpha(160);
            (color, mass.powf(RADIUS_EXPONENT))
        }
        BodyKind::DarkMatter => (palette::BLANK, 0.0),
    }
}
