//! Arena configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "admins": ["alice"], "reset": { "period_ticks": 12000 } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use ffa_geom::{FILL_CELL_LIMIT, Position, Rotation};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::zones::Zones;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub zones: Zones,
    pub world_spawn: SpawnPoint,
    /// Player names that receive operator diagnostics and keep their game
    /// mode in the lobby.
    pub admins: Vec<String>,
    /// Kit names; players carry a `kit_<name>` tag per selected kit.
    pub kits: Vec<String>,
    pub combat: CombatConfig,
    pub spawn_search: SpawnSearchConfig,
    pub reset: ResetConfig,
    pub materials: Materials,
    pub fill: FillConfig,
    pub intervals: Intervals,
    pub leaderboard: LeaderboardConfig,
    /// Entity type id to ticks until the entity is removed.
    pub despawn_ticks: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPoint {
    pub position: Position,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Cumulative damage an attacker needs to be credited with an indirect
    /// kill.
    pub kill_credit_threshold: f32,
    pub spawn_protection_secs: f32,
    /// Killstreaks divisible by this get the large banner.
    pub banner_every: i32,
    /// Killstreaks divisible by this are announced server-wide.
    pub broadcast_every: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSearchConfig {
    pub attempts: u32,
    /// Blocks above the arena floor where players are placed.
    pub height_offset: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetConfig {
    pub period_ticks: u64,
    pub countdown_secs: u32,
    /// Air layers cleared above the roof.
    pub roof_clearance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Materials {
    pub ground: String,
    pub filler: String,
    pub surface: String,
    pub air: String,
    pub roof: String,
    pub wall: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    pub cell_limit: u64,
    /// Extra attempts per failed sub-region before it is reported and skipped.
    pub retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intervals {
    pub zone_scan: u64,
    pub protection_sweep: u64,
    pub playtime: u64,
    pub leaderboard: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub min_kills: i32,
    pub size: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            zones: Zones::default(),
            world_spawn: SpawnPoint::default(),
            admins: ["BioTomateDE", "HeiligTomate", "latuskati", "Tomatigga"]
                .map(String::from)
                .to_vec(),
            kits: ["samurai", "sniper", "tank", "fighter", "maceling", "newgen"]
                .map(String::from)
                .to_vec(),
            combat: CombatConfig::default(),
            spawn_search: SpawnSearchConfig::default(),
            reset: ResetConfig::default(),
            materials: Materials::default(),
            fill: FillConfig::default(),
            intervals: Intervals::default(),
            leaderboard: LeaderboardConfig::default(),
            despawn_ticks: BTreeMap::from([
                ("minecraft:arrow".to_owned(), 100),
                ("minecraft:item".to_owned(), 500),
            ]),
        }
    }
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            position: Position::new(10000.0, -39.0, 10000.0),
            rotation: Rotation::new(-90.0, 0.0),
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            kill_credit_threshold: 5.0,
            spawn_protection_secs: 5.0,
            banner_every: 5,
            broadcast_every: 10,
        }
    }
}

impl Default for SpawnSearchConfig {
    fn default() -> Self {
        Self {
            attempts: 20,
            height_offset: 4,
        }
    }
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            period_ticks: ffa_tick::seconds(5 * 60),
            countdown_secs: 6,
            roof_clearance: 6,
        }
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self {
            ground: "minecraft:allow".to_owned(),
            filler: "minecraft:dirt".to_owned(),
            surface: "minecraft:grass_block".to_owned(),
            air: "minecraft:air".to_owned(),
            roof: "minecraft:barrier".to_owned(),
            wall: "minecraft:bedrock".to_owned(),
        }
    }
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            cell_limit: FILL_CELL_LIMIT,
            retries: 1,
        }
    }
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            zone_scan: 2,
            protection_sweep: 10,
            playtime: 1,
            leaderboard: 500,
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            min_kills: 20,
            size: 10,
        }
    }
}

impl ArenaConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        info!("Loaded arena config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, volume) in self.zones.named() {
            if !volume.is_well_formed() {
                return Err(ConfigError::InvalidVolume {
                    name,
                    volume: *volume,
                });
            }
        }

        let (w, h, d) = self.zones.arena.extents();
        if w < 3 || h < 5 || d < 3 {
            return Err(ConfigError::ArenaTooSmall {
                volume: self.zones.arena,
            });
        }

        let offset = self.spawn_search.height_offset;
        if !u32::try_from(offset).is_ok_and(|offset| offset < h) {
            return Err(ConfigError::InvalidSpawnHeight { offset, height: h });
        }

        let clearance = self.reset.roof_clearance;
        if clearance < 0 || self.zones.arena.to.y.checked_add(clearance).is_none() {
            return Err(ConfigError::InvalidRoofClearance(clearance));
        }

        if self.fill.cell_limit == 0 {
            return Err(ConfigError::ZeroCellLimit);
        }

        let threshold = self.combat.kill_credit_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        Ok(())
    }

    /// Tags identifying each configured kit.
    pub fn kit_tags(&self) -> impl Iterator<Item = String> + '_ {
        self.kits.iter().map(|kit| format!("kit_{kit}"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use ffa_geom::{BlockPos, Volume};

    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ArenaConfig::default();
        config.validate().unwrap();
        assert_eq!(config.reset.period_ticks, 6000);
        assert!(config.admins.iter().any(|admin| admin == "latuskati"));
    }

    #[test]
    fn kit_tags() {
        let config = ArenaConfig::default();
        let tags: Vec<_> = config.kit_tags().collect();
        assert_eq!(tags[0], "kit_samurai");
        assert_eq!(tags.len(), 6);
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "admins": ["alice"], "reset": {{ "countdown_secs": 3 }} }}"#
        )
        .unwrap();

        let config = ArenaConfig::load(file.path()).unwrap();
        assert_eq!(config.admins, vec!["alice".to_owned()]);
        assert_eq!(config.reset.countdown_secs, 3);
        assert_eq!(config.reset.period_ticks, 6000);
        assert_eq!(config.fill.cell_limit, 32_768);
    }

    #[test]
    fn load_rejects_inverted_zone() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "zones": {{
                "lobby": {{ "from": {{ "x": 0, "y": 0, "z": 0 }}, "to": {{ "x": 10, "y": 10, "z": 10 }} }},
                "pre_arena": {{ "from": {{ "x": 0, "y": 0, "z": 0 }}, "to": {{ "x": 10, "y": 10, "z": 10 }} }},
                "join_pad": {{ "from": {{ "x": 5, "y": 0, "z": 0 }}, "to": {{ "x": 1, "y": 10, "z": 10 }} }},
                "arena": {{ "from": {{ "x": 0, "y": 0, "z": 0 }}, "to": {{ "x": 10, "y": 10, "z": 10 }} }}
            }} }}"#
        )
        .unwrap();

        let err = ArenaConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVolume { name: "join_pad", .. }));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArenaConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            ArenaConfig::load(file.path()).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn flat_arena_is_rejected() {
        let mut config = ArenaConfig::default();
        config.zones.arena = Volume::new(BlockPos::new(0, 0, 0), BlockPos::new(20, 2, 20));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ArenaTooSmall { .. })
        ));
    }

    #[test]
    fn spawn_height_must_stay_inside_the_arena() {
        let mut config = ArenaConfig::default();
        let (_, height, _) = config.zones.arena.extents();

        config.spawn_search.height_offset = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSpawnHeight { offset: i32::MAX, .. })
        ));

        config.spawn_search.height_offset = -1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSpawnHeight { .. })));

        config.spawn_search.height_offset = height as i32 - 1;
        config.validate().unwrap();
    }

    #[test]
    fn roof_clearance_is_bounded() {
        let mut config = ArenaConfig::default();

        config.reset.roof_clearance = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRoofClearance(i32::MAX))
        ));

        config.reset.roof_clearance = -3;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRoofClearance(-3))));

        config.reset.roof_clearance = 0;
        config.validate().unwrap();
    }

    #[test]
    fn zero_cell_limit_is_rejected() {
        let mut config = ArenaConfig::default();
        config.fill.cell_limit = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCellLimit)));
    }
}
