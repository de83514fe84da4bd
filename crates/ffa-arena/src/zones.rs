//! Named arena zones and per-position classification.

use bitflags::bitflags;
use ffa_geom::{BlockPos, Position, Volume};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Zones containing a position. Zones may overlap, so several flags can
    /// be set at once.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ZoneFlags: u8 {
        const LOBBY = 1 << 0;
        const PRE_ARENA = 1 << 1;
        const JOIN_PAD = 1 << 2;
        const ARENA = 1 << 3;
    }
}

/// The four named volumes, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    pub lobby: Volume,
    pub pre_arena: Volume,
    pub join_pad: Volume,
    pub arena: Volume,
}

impl Zones {
    /// Every zone containing `position`, each tested independently.
    #[must_use]
    pub fn classify(&self, position: Position) -> ZoneFlags {
        let mut flags = ZoneFlags::empty();
        flags.set(ZoneFlags::LOBBY, self.lobby.contains(position));
        flags.set(ZoneFlags::PRE_ARENA, self.pre_arena.contains(position));
        flags.set(ZoneFlags::JOIN_PAD, self.join_pad.contains(position));
        flags.set(ZoneFlags::ARENA, self.arena.contains(position));
        flags
    }

    /// Zones with their config names.
    pub fn named(&self) -> [(&'static str, &Volume); 4] {
        [
            ("lobby", &self.lobby),
            ("pre_arena", &self.pre_arena),
            ("join_pad", &self.join_pad),
            ("arena", &self.arena),
        ]
    }
}

impl Default for Zones {
    fn default() -> Self {
        Self {
            lobby: Volume::new(BlockPos::new(9990, -40, 9990), BlockPos::new(10010, -28, 10010)),
            pre_arena: Volume::new(BlockPos::new(9992, -1, 9994), BlockPos::new(10008, 5, 10009)),
            join_pad: Volume::new(BlockPos::new(9999, 0, 10006), BlockPos::new(10001, 3, 10008)),
            arena: Volume::new(BlockPos::new(19910, -64, 19910), BlockPos::new(20090, -39, 20090)),
        }
    }
}
