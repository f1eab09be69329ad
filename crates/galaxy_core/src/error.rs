use thiserror::Error;

use crate::types::BodyKind;

/// Startup configuration rejected by `GalaxyConfig::validate`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("minimum distance guard must be non-negative and finite, got {0}")]
    InvalidGuard(f32),
    #[error("population of {} must be at least 1", .0.name())]
    EmptyPopulation(BodyKind),
    #[error("spawn profile for {}: {reason}", .kind.name())]
    InvalidProfile { kind: BodyKind, reason: &'static str },
    #[error("fixed worker count must be at least 1")]
    ZeroWorkers,
    #[error("reaction-pair forces write both bodies of a pair and need exactly one worker, got {0}")]
    ReactionPairsInParallel(usize),
}
