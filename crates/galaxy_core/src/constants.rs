// Simulation units
// - Distance: 1 unit ~ a few light years, so the disc spans a few hundred units
// - Mass: 1 unit = 1 solar mass
// - Time: whatever one wall-clock second scaled by the simulation speed gives
// G is tuned rather than physical; values between 4 and 9 give a stable disc.

/// Gravitational constant in simulation units
pub const G: f32 = 4.0;

/// Characteristic radius of the galactic disc
pub const GALAXY_RADIUS: f32 = 250.0;

/// Pairs closer than this do not interact (stands in for collision/merge)
pub const MIN_DISTANCE: f32 = 15.0;

/// Wall-clock seconds are multiplied by this to get simulated time
pub const SIMULATION_SPEED: f32 = 10.0;

/// Mass of the central black hole
pub const ATTRACTOR_MASS: f32 = 4.154e4;

/// Visual radius of the central black hole
pub const ATTRACTOR_RADIUS: f32 = 15.0;

/// Bodies further than this many galaxy radii from the origin are recycled
pub const ESCAPE_RADIUS_FACTOR: f32 = 2.0;

/// Dust closer than `galaxy_radius / DUST_BURN_DIVISOR` burns up and is recycled
pub const DUST_BURN_DIVISOR: f32 = 3.0;

/// Exponent of the mass-radius relation used for stars and dust
pub const RADIUS_EXPONENT: f32 = 0.8;

/// Gas clumps are drawn at `mass * GAS_RADIUS_SCALE`
pub const GAS_RADIUS_SCALE: f32 = 8.0;

/// Worker count used when the hardware concurrency cannot be queried
pub const FALLBACK_WORKERS: usize = 8;
