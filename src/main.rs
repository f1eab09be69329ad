use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use galaxy_core::GalaxyConfig;
use galaxy_sim::{GalaxyState, SimulationPlugin};

/// Frames to run before exiting, overridable with `GALAXY_FRAMES`
const DEFAULT_FRAMES: u32 = 3600;

#[derive(Resource)]
struct FrameBudget(u32);

fn main() -> AppExit {
    let mut config = GalaxyConfig::default();
    if let Some(seed) = env_parse::<u64>("GALAXY_SEED") {
        config.seed = Some(seed);
    }
    let frames = env_parse("GALAXY_FRAMES").unwrap_or(DEFAULT_FRAMES);

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
        LogPlugin::default(),
    ));

    let galaxy = match GalaxyState::new(config) {
        Ok(galaxy) => galaxy,
        Err(err) => {
            error!("Invalid galaxy configuration: {err}");
            return AppExit::error();
        }
    };

    app.insert_resource(galaxy)
        .insert_resource(FrameBudget(frames))
        .add_plugins(SimulationPlugin)
        .add_systems(Last, count_frames)
        .run()
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}

fn count_frames(mut budget: ResMut<FrameBudget>, galaxy: Res<GalaxyState>, mut exit: EventWriter<AppExit>) {
    if budget.0 == 0 {
        let respawns = galaxy.respawns;
        info!(
            "Done after {} ticks (t = {:.1}): {} escaped, {} burned up",
            galaxy.tick_count, galaxy.sim_time, respawns.escaped, respawns.burned_up,
        );
        exit.send(AppExit::Success);
        return;
    }
    budget.0 -= 1;
}
