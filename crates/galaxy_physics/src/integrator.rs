use galaxy_core::*;
use glam::{Quat, Vec3};

use crate::forces::Gravity;
use crate::partition::for_each_partition;
use crate::spawn::DISC_NORMAL;

/// Explicit Euler integrator for the whole body store.
///
/// A step is two strictly ordered passes: velocities are updated from
/// positions frozen at the start of the step, then positions are advanced from
/// the new velocities.
#[derive(Debug, Clone)]
pub struct ForceIntegrator {
    pub gravity: Gravity,
    pub scheme: ForceScheme,
    pub workers: usize,
    pub attractor_motion: AttractorMotion,
    pub dark_matter_motion: DarkMatterMotion,
    pub recenter_on_attractor: bool,
    /// Radius at which dark matter rotation speed bottoms out
    pub dark_matter_outer_radius: f32,
    pub dark_matter_angular_speed: f32,
}

impl ForceIntegrator {
    pub fn from_config(config: &GalaxyConfig) -> Self {
        Self {
            gravity: Gravity::from_config(config),
            scheme: config.force_scheme,
            workers: config.workers.resolve(),
            attractor_motion: config.attractor.motion,
            dark_matter_motion: config.dark_matter_motion,
            recenter_on_attractor: config.recenter_on_attractor,
            dark_matter_outer_radius: config.dark_matter_outer_radius(),
            dark_matter_angular_speed: config.dark_matter_angular_speed,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Whether the velocity pass updates bodies of this kind.
    /// Every body is a force source regardless.
    pub fn receives_gravity(&self, kind: BodyKind) -> bool {
        match kind {
            BodyKind::CentralAttractor => self.attractor_motion == AttractorMotion::Free,
            BodyKind::DarkMatter => self.dark_matter_motion == DarkMatterMotion::Gravitational,
            BodyKind::Star | BodyKind::GasClump | BodyKind::DustCloud => true,
        }
    }

    /// Velocity pass followed by position pass. A non-positive `dt` is a no-op.
    pub fn step(&self, bodies: &mut [Body], dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        self.accelerate(bodies, dt);
        self.advance_positions(bodies, dt);
    }

    /// Add `F * dt / m` from every interacting pair to the receiving bodies
    pub fn accelerate(&self, bodies: &mut [Body], dt: f32) {
        match self.scheme {
            ForceScheme::OwnedAccumulation => self.accumulate_owned(bodies, dt),
            ForceScheme::ReactionPairs => self.accumulate_pairs(bodies, dt),
        }
    }

    /// Each worker owns a contiguous index range and sums the pull of every
    /// other body into the bodies it owns. Partner state comes from a frozen
    /// copy, so no worker reads or writes another worker's bodies.
    fn accumulate_owned(&self, bodies: &mut [Body], dt: f32) {
        let sources: Vec<(Vec3, f32)> = bodies.iter().map(|b| (b.position, b.mass)).collect();
        let sources = sources.as_slice();

        for_each_partition(bodies, self.workers, |range, owned| {
            for (i, body) in range.zip(owned.iter_mut()) {
                if !self.receives_gravity(body.kind) {
                    continue;
                }
                let mut force = Vec3::ZERO;
                for (j, &(position, mass)) in sources.iter().enumerate() {
                    if j == i {
                        continue;
                    }
                    if let Some(f) = self.gravity.force(body.position, body.mass, position, mass) {
                        force += f;
                    }
                }
                body.velocity += force * (dt / body.mass);
            }
        });
    }

    /// Visit each unordered pair once and apply the reaction to the partner.
    /// Writes land on both sides of the pair, so this always runs on the
    /// calling thread.
    fn accumulate_pairs(&self, bodies: &mut [Body], dt: f32) {
        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            let a_receives = self.receives_gravity(a.kind);

            for b in tail.iter_mut() {
                let Some(f) = self.gravity.force(a.position, a.mass, b.position, b.mass) else {
                    continue;
                };
                if a_receives {
                    a.velocity += f * (dt / a.mass);
                }
                if self.receives_gravity(b.kind) {
                    b.velocity -= f * (dt / b.mass);
                }
            }
        }
    }

    /// `position += velocity * dt`, dark matter rotation, then optional recentering
    pub fn advance_positions(&self, bodies: &mut [Body], dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        for body in bodies.iter_mut() {
            match body.kind {
                BodyKind::DarkMatter
                    if self.dark_matter_motion == DarkMatterMotion::DifferentialRotation =>
                {
                    self.rotate_dark_matter(body, dt);
                }
                BodyKind::CentralAttractor if self.attractor_motion == AttractorMotion::Fixed => {}
                _ => body.position += body.velocity * dt,
            }
        }

        if self.recenter_on_attractor {
            recenter(bodies);
        }
    }

    /// Rotate about the disc normal by `speed * (1 - t^2) * dt`, where `t` is the
    /// normalized radius capped at the dark matter outer radius. Velocity is the
    /// realized displacement over `dt`, kept for debug views.
    fn rotate_dark_matter(&self, body: &mut Body, dt: f32) {
        let t = (body.distance_from_origin() / self.dark_matter_outer_radius).min(1.0);
        let angle = self.dark_matter_angular_speed * (1.0 - t * t) * dt;
        let rotated = Quat::from_axis_angle(DISC_NORMAL, angle) * body.position;
        body.velocity = (rotated - body.position) / dt;
        body.position = rotated;
    }
}

/// Shift every body so the central attractor sits at the origin
pub fn recenter(bodies: &mut [Body]) {
    let Some(center) = bodies
        .iter()
        .find(|b| b.kind == BodyKind::CentralAttractor)
        .map(|b| b.position)
    else {
        return;
    };
    if center == Vec3::ZERO {
        return;
    }
    for body in bodies.iter_mut() {
        body.position -= center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::populate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pair_integrator(scheme: ForceScheme) -> ForceIntegrator {
        let mut config = GalaxyConfig::default();
        config.gravity = 6.0;
        config.min_distance = 1.0;
        config.force_scheme = scheme;
        config.recenter_on_attractor = false;
        ForceIntegrator::from_config(&config).with_workers(1)
    }

    fn two_bodies() -> Vec<Body> {
        vec![
            Body::new(BodyKind::Star, Vec3::ZERO, Vec3::ZERO, 1.0),
            Body::new(BodyKind::Star, Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO, 1.0),
        ]
    }

    fn galaxy(seed: u64) -> (GalaxyConfig, Vec<Body>) {
        let mut config = GalaxyConfig::default();
        config.population = Population {
            stars: 120,
            gas_clumps: 80,
            dust_clouds: 40,
            dark_matter: 20,
        };
        config.dark_matter_motion = DarkMatterMotion::Gravitational;
        config.attractor.motion = AttractorMotion::Free;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let bodies = populate(&config, &mut rng).as_slice().to_vec();
        (config, bodies)
    }

    #[test]
    fn test_two_bodies_pull_together_symmetrically() {
        let integrator = pair_integrator(ForceScheme::ReactionPairs);
        let mut bodies = two_bodies();
        integrator.accelerate(&mut bodies, 0.1);

        let va = bodies[0].velocity;
        let vb = bodies[1].velocity;
        assert!(va.length() > 0.0 && vb.length() > 0.0);
        // A moves toward +x (toward B), B toward -x
        assert!(va.x > 0.0 && vb.x < 0.0);
        assert_eq!(va.length(), vb.length());
        // G * m * m / d^2 * dt / m = 6 / 10000 * 0.1
        assert!((va.x - 6.0e-5).abs() < 1e-9);
    }

    #[test]
    fn test_schemes_agree_on_two_bodies() {
        let mut reaction = two_bodies();
        let mut owned = two_bodies();
        pair_integrator(ForceScheme::ReactionPairs).accelerate(&mut reaction, 0.1);
        pair_integrator(ForceScheme::OwnedAccumulation).accelerate(&mut owned, 0.1);
        assert_eq!(reaction[0].velocity, owned[0].velocity);
        assert_eq!(reaction[1].velocity, owned[1].velocity);
    }

    #[test]
    fn test_guard_blocks_close_pairs() {
        let mut config = GalaxyConfig::default();
        config.min_distance = 15.0;
        config.recenter_on_attractor = false;
        let integrator = ForceIntegrator::from_config(&config).with_workers(1);

        let mut bodies = vec![
            Body::new(BodyKind::Star, Vec3::ZERO, Vec3::ZERO, 1.0),
            Body::new(BodyKind::Star, Vec3::new(15.0, 0.0, 0.0), Vec3::ZERO, 1.0),
        ];
        let before = bodies.clone();
        integrator.accelerate(&mut bodies, 0.1);
        assert_eq!(bodies, before);
    }

    #[test]
    fn test_one_worker_matches_eight_workers() {
        let (config, initial) = galaxy(42);
        let serial = ForceIntegrator::from_config(&config).with_workers(1);
        let parallel = ForceIntegrator::from_config(&config).with_workers(8);

        let mut a = initial.clone();
        let mut b = initial;
        for _ in 0..3 {
            serial.step(&mut a, 0.05);
            parallel.step(&mut b, 0.05);
        }
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.velocity, y.velocity);
            assert_eq!(x.position, y.position);
        }
    }

    #[test]
    fn test_owned_matches_reaction_pairs_within_tolerance() {
        let (mut config, initial) = galaxy(8);
        config.force_scheme = ForceScheme::ReactionPairs;
        let reaction = ForceIntegrator::from_config(&config).with_workers(1);
        config.force_scheme = ForceScheme::OwnedAccumulation;
        let owned = ForceIntegrator::from_config(&config).with_workers(6);

        let mut a = initial.clone();
        let mut b = initial;
        reaction.accelerate(&mut a, 0.1);
        owned.accelerate(&mut b, 0.1);
        for (x, y) in a.iter().zip(&b) {
            let scale = x.velocity.length().max(1.0);
            assert!((x.velocity - y.velocity).length() / scale < 1e-3);
        }
    }

    #[test]
    fn test_fixed_attractor_stays_put_but_still_pulls() {
        let mut config = GalaxyConfig::default();
        config.recenter_on_attractor = false;
        let integrator = ForceIntegrator::from_config(&config).with_workers(2);

        let mut bodies = vec![
            Body::attractor(1000.0, 15.0),
            Body::new(BodyKind::Star, Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO, 1.0),
        ];
        integrator.step(&mut bodies, 0.1);

        assert_eq!(bodies[0].position, Vec3::ZERO);
        assert_eq!(bodies[0].velocity, Vec3::ZERO);
        assert!(bodies[1].velocity.y < 0.0);
        assert!(bodies[1].position.y < 100.0);
    }

    #[test]
    fn test_free_attractor_is_recentered() {
        let mut config = GalaxyConfig::default();
        config.attractor.motion = AttractorMotion::Free;
        config.recenter_on_attractor = true;
        let integrator = ForceIntegrator::from_config(&config).with_workers(1);

        let mut bodies = vec![
            Body::attractor(1000.0, 15.0),
            Body::new(BodyKind::Star, Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO, 500.0),
        ];
        integrator.step(&mut bodies, 0.5);

        assert_eq!(bodies[0].position, Vec3::ZERO);
        assert!(bodies[0].velocity.y > 0.0);
        // Separation is preserved by the shift
        assert!(bodies[1].position.y < 100.0);
    }

    #[test]
    fn test_dark_matter_rotation_keeps_radius() {
        let config = GalaxyConfig::default();
        let integrator = ForceIntegrator::from_config(&config).with_workers(1);

        let start = Vec3::new(150.0, 0.0, 10.0);
        let mut bodies = vec![
            Body::attractor(config.attractor.mass, config.attractor.radius),
            Body::new(BodyKind::DarkMatter, start, Vec3::ZERO, 25.0),
        ];
        integrator.step(&mut bodies, 1.0);

        let dm = bodies[1];
        assert!((dm.position.length() - start.length()).abs() < 1e-3);
        assert!((dm.position.z - start.z).abs() < 1e-4);
        // Counter-clockwise about +Z
        assert!(dm.position.y > 0.0);
        assert!((dm.velocity - (dm.position - start)).length() < 1e-5);

        integrator.step(&mut bodies, 0.5);
        let moved = bodies[1].position - dm.position;
        assert!((bodies[1].velocity - moved / 0.5).length() < 1e-4);
    }

    #[test]
    fn test_zero_dt_step_leaves_store_untouched() {
        let config = GalaxyConfig::default();
        let integrator = ForceIntegrator::from_config(&config).with_workers(1);
        let mut bodies = vec![
            Body::attractor(config.attractor.mass, config.attractor.radius),
            Body::new(BodyKind::DarkMatter, Vec3::new(150.0, 0.0, 0.0), Vec3::ZERO, 25.0),
            Body::new(BodyKind::Star, Vec3::new(0.0, 80.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 2.0),
        ];
        let before = bodies.clone();

        integrator.step(&mut bodies, 0.0);
        integrator.step(&mut bodies, -1.0);
        assert_eq!(bodies, before);
        assert!(bodies.iter().all(|b| b.velocity.is_finite()));
    }

    #[test]
    fn test_dark_matter_inner_orbits_turn_faster() {
        let config = GalaxyConfig::default();
        let integrator = ForceIntegrator::from_config(&config).with_workers(1);

        let inner = Vec3::new(50.0, 0.0, 0.0);
        let outer = Vec3::new(300.0, 0.0, 0.0);
        let mut bodies = vec![
            Body::new(BodyKind::DarkMatter, inner, Vec3::ZERO, 25.0),
            Body::new(BodyKind::DarkMatter, outer, Vec3::ZERO, 25.0),
        ];
        integrator.advance_positions(&mut bodies, 2.0);

        let turned = |p: Vec3| p.y.atan2(p.x);
        assert!(turned(bodies[0].position) > turned(bodies[1].position));
    }

    #[test]
    fn test_positions_use_updated_velocity() {
        let integrator = pair_integrator(ForceScheme::OwnedAccumulation);
        let mut bodies = vec![Body::new(
            BodyKind::GasClump,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            1.0,
        )];
        integrator.step(&mut bodies, 0.5);
        assert_eq!(bodies[0].position, Vec3::new(10.0, 1.0, 0.0));
    }
}
