//! Free-for-all arena engine.
//!
//! ```text
//!  host events ──▶ EventQueue ──flush──▶ observers ─┐
//!                                                    ▼
//!  Scheduler ── Playtime, ZoneScan, ProtectionSweep ──▶ ArenaController ──▶ Host
//!            ── Leaderboard, ArenaReset ─┘             │  DamageLedger
//!                                                      │  SpawnProtection
//!                                                      │  membership
//!                                                      └─ RebuildPlan ─▶ BulkFiller
//! ```
//!
//! The embedding server implements [`Host`], builds an [`ArenaServer`] and
//! calls [`ArenaServer::tick`] every game tick.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod fill;
pub mod host;
pub mod leaderboard;
pub mod ledger;
pub mod ops;
pub mod protection;
pub mod rebuild;
mod reset;
pub mod scores;
mod server;
mod session;
pub mod spawn;
mod systems;
pub mod zones;

pub use config::ArenaConfig;
pub use controller::ArenaController;
pub use error::{ConfigError, FillError};
pub use server::{ArenaServer, TickStats};
pub use session::Session;
