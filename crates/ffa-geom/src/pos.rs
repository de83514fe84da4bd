use serde::{Deserialize, Serialize};

/// Integer block coordinate.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Real-valued entity location.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Facing direction in degrees.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Position of this block's minimum corner.
    pub fn to_position(self) -> Position {
        Position::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Rotation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_corner_keeps_negative_coordinates() {
        assert_eq!(
            BlockPos::new(-1, 64, 10).to_position(),
            Position::new(-1.0, 64.0, 10.0)
        );
    }

    #[test]
    fn offset_moves_each_axis() {
        assert_eq!(
            BlockPos::new(1, 2, 3).offset(-1, 4, 0),
            BlockPos::new(0, 6, 3)
        );
    }
}
