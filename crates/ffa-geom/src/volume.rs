//! Closed inclusive axis-aligned volumes.

use serde::{Deserialize, Serialize};

use crate::partition::{Cuboid, partition};
use crate::pos::{BlockPos, Position};

/// Closed inclusive cuboid between two block corners.
///
/// `from` is componentwise `<=` `to`. [`Volume::new`] normalises its corners;
/// volumes read from config are checked with [`Volume::is_well_formed`].
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Volume {
    pub from: BlockPos,
    pub to: BlockPos,
}

impl Volume {
    /// Volume spanning two corners given in any order.
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            from: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            to: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Single-block volume.
    pub const fn block(pos: BlockPos) -> Self {
        Self { from: pos, to: pos }
    }

    pub const fn is_well_formed(&self) -> bool {
        self.from.x <= self.to.x && self.from.y <= self.to.y && self.from.z <= self.to.z
    }

    /// Whether `point` lies inside, boundary included.
    pub fn contains(&self, point: Position) -> bool {
        point.x >= f64::from(self.from.x)
            && point.y >= f64::from(self.from.y)
            && point.z >= f64::from(self.from.z)
            && point.x <= f64::from(self.to.x)
            && point.y <= f64::from(self.to.y)
            && point.z <= f64::from(self.to.z)
    }

    pub const fn contains_block(&self, pos: BlockPos) -> bool {
        pos.x >= self.from.x
            && pos.y >= self.from.y
            && pos.z >= self.from.z
            && pos.x <= self.to.x
            && pos.y <= self.to.y
            && pos.z <= self.to.z
    }

    /// Extent along each axis in blocks, `(width, height, depth)`.
    pub const fn extents(&self) -> (u32, u32, u32) {
        (
            self.to.x.abs_diff(self.from.x) + 1,
            self.to.y.abs_diff(self.from.y) + 1,
            self.to.z.abs_diff(self.from.z) + 1,
        )
    }

    pub const fn cell_count(&self) -> u64 {
        let (w, h, d) = self.extents();
        w as u64 * h as u64 * d as u64
    }

    /// Midpoint of the horizontal extent at the volume's floor.
    pub fn floor_center(&self) -> Position {
        Position::new(
            f64::from(self.from.x) + f64::from(self.to.x - self.from.x) / 2.0,
            f64::from(self.from.y),
            f64::from(self.from.z) + f64::from(self.to.z - self.from.z) / 2.0,
        )
    }

    /// Zero-origin cuboid with this volume's extents.
    pub const fn to_cuboid(&self) -> Cuboid {
        let (w, h, d) = self.extents();
        Cuboid::new(0, 0, 0, w, h, d)
    }

    /// Absolute volume covered by `cuboid` when its origin is this volume's
    /// `from` corner.
    pub const fn sub_volume(&self, cuboid: &Cuboid) -> Volume {
        let from = self.from.offset(cuboid.x as i32, cuboid.y as i32, cuboid.z as i32);
        let to = from.offset(
            cuboid.w as i32 - 1,
            cuboid.h as i32 - 1,
            cuboid.d as i32 - 1,
        );
        Volume { from, to }
    }

    /// Split into disjoint volumes of at most `limit` cells each, in
    /// partitioner order.
    pub fn split(&self, limit: u64) -> Vec<Volume> {
        partition(self.to_cuboid(), limit)
            .iter()
            .map(|cuboid| self.sub_volume(cuboid))
            .collect()
    }
}
