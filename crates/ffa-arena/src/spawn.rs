//! Random arena spawn search.

use ffa_geom::{BlockPos, Position, Volume};
use rand::Rng;

use crate::config::SpawnSearchConfig;
use crate::host::Blocks;

/// Where a joining player is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnPick {
    /// A random location with air at the spawn height.
    Found(Position),
    /// Every attempt hit a solid block; the horizontal center is used.
    Fallback(Position),
}

impl SpawnPick {
    #[must_use]
    pub const fn position(self) -> Position {
        match self {
            Self::Found(position) | Self::Fallback(position) => position,
        }
    }
}

fn coordinate<R: Rng + ?Sized>(rng: &mut R, from: i32, to: i32) -> i32 {
    if from < to { rng.gen_range(from..to) } else { from }
}

/// Try up to `config.attempts` uniform random columns of `arena` at
/// `config.height_offset` above its floor.
pub fn find_arena_spawn<B, R>(blocks: &B, arena: &Volume, config: &SpawnSearchConfig, rng: &mut R) -> SpawnPick
where
    B: Blocks + ?Sized,
    R: Rng + ?Sized,
{
    let y = arena.from.y.saturating_add(config.height_offset);

    for _ in 0..config.attempts {
        let x = coordinate(rng, arena.from.x, arena.to.x);
        let z = coordinate(rng, arena.from.z, arena.to.z);
        let pos = BlockPos::new(x, y, z);
        if blocks.is_air(pos) {
            return SpawnPick::Found(pos.to_position());
        }
    }

    let center = arena.floor_center();
    SpawnPick::Fallback(Position::new(center.x, f64::from(y), center.z))
}
