pub mod clock;
pub mod galaxy;
pub mod pipeline;

pub use clock::FrameClock;
pub use galaxy::{GalaxyState, TickReport};
pub use pipeline::{SimulationPlugin, TogglePause};
