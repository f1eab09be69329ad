use bevy::prelude::*;
use galaxy_core::*;
use galaxy_physics::boundary::{self, BoundaryReport};
use galaxy_physics::{ForceIntegrator, diagnostics, spawn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::clock::FrameClock;

/// Outcome of one call to `GalaxyState::tick`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Simulated time step requested for the tick
    pub dt: f32,
    /// False when the tick was skipped (paused or non-positive dt)
    pub advanced: bool,
    pub boundary: BoundaryReport,
}

/// The whole simulated galaxy, tracked as a Bevy Resource.
///
/// Owns the body store, the random source used for every (re)spawn, and the
/// frame clock. Renderers read `bodies()` or `snapshot()`; nothing outside
/// this type mutates the store.
#[derive(Resource)]
pub struct GalaxyState {
    config: GalaxyConfig,
    bodies: BodyStore,
    integrator: ForceIntegrator,
    rng: ChaCha8Rng,
    pub clock: FrameClock,
    /// Ticks that actually advanced the simulation
    pub tick_count: u64,
    /// Accumulated simulated time
    pub sim_time: f64,
    /// Respawns since startup
    pub respawns: BoundaryReport,
    respawns_since_log: BoundaryReport,
}

impl GalaxyState {
    /// Validate the configuration, seed the random source and spawn the population
    pub fn new(config: GalaxyConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let bodies = spawn::populate(&config, &mut rng);
        let integrator = ForceIntegrator::from_config(&config);

        info!(
            "Spawned galaxy: {} stars, {} gas clumps, {} dust clouds, {} dark matter around a {:.3e} mass attractor",
            bodies.count(BodyKind::Star),
            bodies.count(BodyKind::GasClump),
            bodies.count(BodyKind::DustCloud),
            bodies.count(BodyKind::DarkMatter),
            config.attractor.mass,
        );
        info!(
            "Force pass: {:?} on {} workers, seed {}",
            config.force_scheme,
            integrator.workers,
            config.seed.map_or_else(|| "from entropy".to_string(), |s| s.to_string()),
        );

        Ok(Self {
            clock: FrameClock::new(config.simulation_speed),
            config,
            bodies,
            integrator,
            rng,
            tick_count: 0,
            sim_time: 0.0,
            respawns: BoundaryReport::default(),
            respawns_since_log: BoundaryReport::default(),
        })
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        self.bodies.as_slice()
    }

    pub fn store(&self) -> &BodyStore {
        &self.bodies
    }

    /// Render records for every body, in store order
    pub fn snapshot(&self) -> Vec<RenderBody> {
        self.bodies.iter().map(RenderBody::from).collect()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.clock.paused != paused {
            self.toggle_pause();
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.clock.toggle_pause();
        info!("Simulation {}", if paused { "paused" } else { "resumed" });
        paused
    }

    /// Advance by one rendered frame of `frame_secs` wall-clock seconds,
    /// honoring the clock's speed factor and pause flag
    pub fn advance_frame(&mut self, frame_secs: f32) -> TickReport {
        let dt = self.clock.sim_dt(frame_secs);
        self.tick(dt, self.clock.paused)
    }

    /// One simulation step: gravity, then positions, then the boundary warden.
    /// A paused tick or one with `dt <= 0` changes nothing and spawns nothing.
    pub fn tick(&mut self, dt: f32, paused: bool) -> TickReport {
        if paused || !(dt > 0.0) {
            return TickReport { dt, ..default() };
        }

        let bodies = self.bodies.as_mut_slice();
        self.integrator.step(bodies, dt);
        let boundary = boundary::enforce(bodies, &self.config, &mut self.rng);

        self.tick_count += 1;
        self.sim_time += dt as f64;
        self.respawns += boundary;
        self.respawns_since_log += boundary;

        if self.config.log_every_ticks > 0 && self.tick_count % self.config.log_every_ticks as u64 == 0 {
            self.log_stats();
        }

        TickReport {
            dt,
            advanced: true,
            boundary,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        diagnostics::kinetic_energy(self.bodies.as_slice())
    }

    fn log_stats(&mut self) {
        let bodies = self.bodies.as_slice();
        info!(
            "Tick {} (t = {:.1}): {} respawned ({} escaped, {} burned up), KE {:.4e}, COM {:.2}",
            self.tick_count,
            self.sim_time,
            self.respawns_since_log.total(),
            self.respawns_since_log.escaped,
            self.respawns_since_log.burned_up,
            diagnostics::kinetic_energy(bodies),
            diagnostics::center_of_mass(bodies),
        );
        if !diagnostics::all_finite(bodies) {
            warn!("Non-finite body state after tick {}", self.tick_count);
        }
        self.respawns_since_log = BoundaryReport::default();
    }
}
