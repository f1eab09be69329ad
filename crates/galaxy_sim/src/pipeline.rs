use bevy::prelude::*;

use super::galaxy::GalaxyState;

/// Request from a presentation layer to flip the pause flag
#[derive(Event, Debug, Clone, Copy)]
pub struct TogglePause;

/// Bevy plugin for the simulation pipeline.
/// Expects a `GalaxyState` resource to be inserted by the app.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TogglePause>()
            .add_systems(Update, (apply_pause_requests, simulation_tick).chain());
    }
}

fn apply_pause_requests(mut requests: EventReader<TogglePause>, mut galaxy: ResMut<GalaxyState>) {
    for _ in requests.read() {
        galaxy.toggle_pause();
    }
}

/// One frame of simulation, scaled by the galaxy's clock
pub fn simulation_tick(mut galaxy: ResMut<GalaxyState>, time: Res<Time>) {
    galaxy.advance_frame(time.delta_secs());
}
