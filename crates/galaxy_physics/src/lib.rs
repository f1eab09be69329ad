pub mod boundary;
pub mod diagnostics;
pub mod forces;
pub mod integrator;
pub mod partition;
pub mod spawn;

pub use boundary::BoundaryReport;
pub use forces::Gravity;
pub use integrator::ForceIntegrator;
