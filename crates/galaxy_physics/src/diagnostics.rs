use galaxy_core::Body;
use glam::Vec3;

/// Total kinetic energy `sum(0.5 * m * v^2)`
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * b.mass as f64 * b.velocity.length_squared() as f64)
        .sum()
}

/// Total linear momentum
pub fn total_momentum(bodies: &[Body]) -> Vec3 {
    bodies.iter().map(|b| b.velocity * b.mass).sum()
}

/// Mass-weighted center of the store, origin when empty
pub fn center_of_mass(bodies: &[Body]) -> Vec3 {
    let total_mass: f32 = bodies.iter().map(|b| b.mass).sum();
    if total_mass <= 0.0 {
        return Vec3::ZERO;
    }
    bodies.iter().map(|b| b.position * b.mass).sum::<Vec3>() / total_mass
}

/// True when no body carries a NaN or infinite component
pub fn all_finite(bodies: &[Body]) -> bool {
    bodies
        .iter()
        .all(|b| b.position.is_finite() && b.velocity.is_finite() && b.mass.is_finite())
}
