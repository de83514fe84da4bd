//! A host world kept entirely in memory.
//!
//! [`SimWorld`] stores blocks, players, non-player entities and scoreboard
//! objectives, enforces the host fill cell limit, runs on a manually advanced
//! clock and records every outbound side effect in an [`Outbound`] log.

mod world;

pub use world::{AIR, Outbound, SimPlayer, SimWorld};
