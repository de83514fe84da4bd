//! Arena geometry.
//!
//! Integer block coordinates, real-valued entity positions, closed inclusive
//! volumes and the partitioner that splits oversized volumes into pieces a
//! single bulk fill can address.
//!
//! ```text
//!   Volume (absolute, inclusive)
//!        │  to_cuboid()
//!        ▼
//!   Cuboid at origin ──partition(limit)──▶ [Cuboid, Cuboid, ...]
//!                                               │  offset by volume.from
//!                                               ▼
//!                                          [Volume, Volume, ...]
//! ```

pub mod partition;
pub mod pos;
pub mod volume;

pub use partition::{Cuboid, partition};
pub use pos::{BlockPos, Position, Rotation};
pub use volume::Volume;

/// Maximum number of cells a single host fill may address.
pub const FILL_CELL_LIMIT: u64 = 32_768;
