//! Arena error types.

use std::path::PathBuf;

use ffa_geom::Volume;
use thiserror::Error;

/// Problems loading or validating an [`ArenaConfig`](crate::ArenaConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the config schema.
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    /// A zone's `from` corner exceeds its `to` corner on some axis.
    #[error("zone {name} has from > to: {volume:?}")]
    InvalidVolume { name: &'static str, volume: Volume },

    /// The arena cannot hold the rebuilt layers.
    #[error("arena {volume:?} is too small to rebuild (needs at least 3 x 5 x 3)")]
    ArenaTooSmall { volume: Volume },

    /// The spawn search height falls outside the arena.
    #[error("spawn height offset {offset} is outside the arena's {height} block height")]
    InvalidSpawnHeight { offset: i32, height: u32 },

    #[error("roof clearance {0} must be non-negative and stay within the world")]
    InvalidRoofClearance(i32),

    #[error("fill cell limit must be at least 1")]
    ZeroCellLimit,

    #[error("kill credit threshold must be a positive finite number, got {0}")]
    InvalidThreshold(f32),
}

/// A host fill call that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    /// The region addresses more cells than one host call allows.
    #[error("fill of {cells} cells exceeds the host limit of {limit}")]
    TooLarge { cells: u64, limit: u64 },

    /// The host rejected the call for another reason.
    #[error("host fill failed: {0}")]
    Host(String),
}
