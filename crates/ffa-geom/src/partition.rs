//! Cell-limited volume partitioning.
//!
//! A cuboid larger than the limit is cut along its longest axis (ties go to
//! width, then height, then depth). The first slice is as thick as the limit
//! allows, never thinner than one cell, and both the slice and the remainder
//! are partitioned again. Leaves come out depth-first, slice before remainder.

/// Cuboid given by an origin offset and positive extents.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct Cuboid {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub w: u32,
    pub h: u32,
    pub d: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    Width,
    Height,
    Depth,
}

impl Cuboid {
    pub const fn new(x: u32, y: u32, z: u32, w: u32, h: u32, d: u32) -> Self {
        Self { x, y, z, w, h, d }
    }

    pub const fn volume(&self) -> u64 {
        self.w as u64 * self.h as u64 * self.d as u64
    }

    const fn longest_axis(&self) -> Axis {
        if self.w >= self.h && self.w >= self.d {
            Axis::Width
        } else if self.h >= self.w && self.h >= self.d {
            Axis::Height
        } else {
            Axis::Depth
        }
    }

    /// Cut into a slice of thickness `len` along `axis` and the remainder.
    const fn cut(&self, axis: Axis, len: u32) -> (Self, Self) {
        let Self { x, y, z, w, h, d } = *self;
        match axis {
            Axis::Width => (
                Self::new(x, y, z, len, h, d),
                Self::new(x + len, y, z, w - len, h, d),
            ),
            Axis::Height => (
                Self::new(x, y, z, w, len, d),
                Self::new(x, y + len, z, w, h - len, d),
            ),
            Axis::Depth => (
                Self::new(x, y, z, w, h, len),
                Self::new(x, y, z + len, w, h, d - len),
            ),
        }
    }

    const fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Width => self.w,
            Axis::Height => self.h,
            Axis::Depth => self.d,
        }
    }
}

/// Split `cuboid` into disjoint cuboids that tile it exactly, each holding at
/// most `limit` cells.
///
/// Extents must be at least one. A `limit` of zero is treated as one.
pub fn partition(cuboid: Cuboid, limit: u64) -> Vec<Cuboid> {
    debug_assert!(
        cuboid.w > 0 && cuboid.h > 0 && cuboid.d > 0,
        "cuboid extents must be positive: {cuboid:?}"
    );

    let limit = limit.max(1);
    let mut leaves = Vec::new();
    // Explicit stack: push remainder before slice so the slice pops first.
    let mut stack = vec![cuboid];

    while let Some(current) = stack.pop() {
        if current.volume() <= limit {
            leaves.push(current);
            continue;
        }

        let axis = current.longest_axis();
        let extent = current.extent(axis);
        let cross_section = current.volume() / u64::from(extent);
        let fit = (limit / cross_section).min(u64::from(extent)) as u32;
        let (slice, remainder) = current.cut(axis, fit.max(1));

        stack.push(remainder);
        stack.push(slice);
    }

    leaves
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks disjointness and exact coverage by painting every cell.
    fn assert_exact_tiling(whole: Cuboid, pieces: &[Cuboid], limit: u64) {
        let (w, h, d) = (whole.w as usize, whole.h as usize, whole.d as usize);
        let mut painted = vec![false; w * h * d];

        for piece in pieces {
            assert!(piece.volume() <= limit.max(1), "{piece:?} exceeds {limit}");
            assert!(piece.w > 0 && piece.h > 0 && piece.d > 0);
            for px in piece.x..piece.x + piece.w {
                for py in piece.y..piece.y + piece.h {
                    for pz in piece.z..piece.z + piece.d {
                        let index = (px as usize * h + py as usize) * d + pz as usize;
                        assert!(!painted[index], "cell ({px},{py},{pz}) covered twice");
                        painted[index] = true;
                    }
                }
            }
        }

        assert!(painted.iter().all(|&cell| cell), "not every cell was covered");
    }

    #[test]
    fn fitting_cuboid_is_returned_unsplit() {
        let cuboid = Cuboid::new(0, 0, 0, 32, 32, 32);
        assert_eq!(partition(cuboid, 32_768), vec![cuboid]);
    }

    #[test]
    fn splits_along_longest_axis_first() {
        let pieces = partition(Cuboid::new(0, 0, 0, 10, 2, 2), 8);
        assert_eq!(
            pieces,
            vec![
                Cuboid::new(0, 0, 0, 2, 2, 2),
                Cuboid::new(2, 0, 0, 2, 2, 2),
                Cuboid::new(4, 0, 0, 2, 2, 2),
                Cuboid::new(6, 0, 0, 2, 2, 2),
                Cuboid::new(8, 0, 0, 2, 2, 2),
            ]
        );
    }

    #[test]
    fn ties_prefer_width_then_height() {
        let pieces = partition(Cuboid::new(0, 0, 0, 4, 4, 4), 32);
        assert_eq!(pieces[0], Cuboid::new(0, 0, 0, 2, 4, 4));

        let pieces = partition(Cuboid::new(0, 0, 0, 2, 4, 4), 16);
        assert_eq!(pieces[0], Cuboid::new(0, 0, 0, 2, 2, 4));
    }

    #[test]
    fn forced_unit_slice_still_terminates() {
        // Cross-section alone exceeds the limit.
        let whole = Cuboid::new(0, 0, 0, 6, 5, 5);
        let pieces = partition(whole, 4);
        assert_exact_tiling(whole, &pieces, 4);
    }

    #[test]
    fn limit_of_one_yields_unit_cells() {
        let whole = Cuboid::new(0, 0, 0, 3, 2, 4);
        let pieces = partition(whole, 1);
        assert_eq!(pieces.len(), 24);
        assert_exact_tiling(whole, &pieces, 1);
    }

    #[test]
    fn zero_limit_behaves_like_one() {
        let whole = Cuboid::new(0, 0, 0, 2, 1, 1);
        assert_eq!(partition(whole, 0).len(), 2);
    }

    #[test]
    fn tiles_exactly_for_assorted_shapes_and_limits() {
        let shapes = [
            (1, 1, 1),
            (7, 3, 5),
            (13, 1, 17),
            (2, 19, 3),
            (9, 9, 9),
            (31, 4, 6),
        ];
        let limits = [1, 2, 3, 7, 16, 50, 64, 100, 729, 10_000];

        for (w, h, d) in shapes {
            let whole = Cuboid::new(0, 0, 0, w, h, d);
            for limit in limits {
                let pieces = partition(whole, limit);
                assert!(!pieces.is_empty());
                assert_exact_tiling(whole, &pieces, limit);
            }
        }
    }

    #[test]
    fn arena_sized_region_respects_host_limit() {
        let whole = Cuboid::new(0, 0, 0, 181, 26, 181);
        let pieces = partition(whole, crate::FILL_CELL_LIMIT);
        let total: u64 = pieces.iter().map(Cuboid::volume).sum();
        assert_eq!(total, whole.volume());
        assert!(pieces.iter().all(|p| p.volume() <= crate::FILL_CELL_LIMIT));
    }
}
