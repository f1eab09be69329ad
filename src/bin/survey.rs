//! Runs a handful of seeded galaxies headless and reports how each one behaves:
//! respawn rates per kind of boundary event, kinetic energy drift and momentum.

use galaxy_core::{BodyKind, ForceScheme, GalaxyConfig, WorkerCount};
use galaxy_physics::diagnostics;
use galaxy_sim::GalaxyState;

const SEEDS: [u64; 6] = [2, 7, 42, 1000, 7919, 31337];
const TICKS: u32 = 1200;
const FRAME_SECS: f32 = 1.0 / 60.0;

struct Outcome {
    seed: u64,
    escaped: usize,
    burned_up: usize,
    energy_start: f64,
    energy_end: f64,
    momentum_end: f32,
    finite: bool,
}

fn run(config: GalaxyConfig) -> Option<Outcome> {
    let seed = config.seed?;
    let mut galaxy = match GalaxyState::new(config) {
        Ok(galaxy) => galaxy,
        Err(err) => {
            eprintln!("seed {seed}: {err}");
            return None;
        }
    };
    let energy_start = galaxy.kinetic_energy();
    for _ in 0..TICKS {
        galaxy.advance_frame(FRAME_SECS);
    }
    let bodies = galaxy.bodies();
    Some(Outcome {
        seed,
        escaped: galaxy.respawns.escaped,
        burned_up: galaxy.respawns.burned_up,
        energy_start,
        energy_end: galaxy.kinetic_energy(),
        momentum_end: diagnostics::total_momentum(bodies).length(),
        finite: diagnostics::all_finite(bodies),
    })
}

fn main() {
    let scheme = match std::env::args().nth(1).as_deref() {
        Some("pairs") => ForceScheme::ReactionPairs,
        _ => ForceScheme::OwnedAccumulation,
    };
    let workers = match scheme {
        ForceScheme::ReactionPairs => WorkerCount::Fixed(1),
        ForceScheme::OwnedAccumulation => WorkerCount::Hardware,
    };

    eprintln!("Surveying {} galaxies, {} ticks each, {:?}...", SEEDS.len(), TICKS, scheme);

    let outcomes: Vec<Outcome> = SEEDS
        .iter()
        .filter_map(|&seed| {
            run(GalaxyConfig {
                seed: Some(seed),
                force_scheme: scheme,
                workers,
                log_every_ticks: 0,
                ..GalaxyConfig::default()
            })
        })
        .collect();

    let population = GalaxyConfig::default().population;
    let dust = population.count(BodyKind::DustCloud);
    println!(
        "{:>7} {:>9} {:>10} {:>12} {:>12} {:>8} {:>11} {:>6}",
        "seed", "escaped", "burned up", "KE start", "KE end", "KE x", "|p| end", "finite"
    );
    for o in &outcomes {
        let ratio = if o.energy_start > 0.0 { o.energy_end / o.energy_start } else { 0.0 };
        println!(
            "{:>7} {:>9} {:>10} {:>12.4e} {:>12.4e} {:>8.2} {:>11.3e} {:>6}",
            o.seed, o.escaped, o.burned_up, o.energy_start, o.energy_end, ratio, o.momentum_end, o.finite
        );
    }

    if outcomes.is_empty() {
        return;
    }
    let n = outcomes.len() as f64;
    let escaped = outcomes.iter().map(|o| o.escaped).sum::<usize>() as f64 / n;
    let burned = outcomes.iter().map(|o| o.burned_up).sum::<usize>() as f64 / n;
    println!();
    println!("Mean escapes per galaxy:   {escaped:.1} over {} bodies", population.total());
    println!("Mean burn-ups per galaxy:  {burned:.1} over {dust} dust clouds");
    println!(
        "Galaxies with non-finite state: {}",
        outcomes.iter().filter(|o| !o.finite).count()
    );
}
