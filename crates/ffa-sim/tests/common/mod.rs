#![allow(dead_code)]

use ffa_arena::config::SpawnPoint;
use ffa_arena::events::PlayerSpawned;
use ffa_arena::host::{Directory as _, EntityId, PlayerId};
use ffa_arena::zones::Zones;
use ffa_arena::{ArenaConfig, ArenaServer};
use ffa_geom::{BlockPos, Position, Rotation, Volume};
use ffa_sim::{Outbound, SimWorld};

pub const SPAWN: Position = Position::new(0.0, 1.0, 0.0);
pub const LOBBY: Position = Position::new(3.0, 1.0, 3.0);
pub const PAD: Position = Position::new(25.0, 1.0, 5.0);
pub const ARENA_FLOOR_Y: i32 = 0;
pub const INSIDE_ARENA: Position = Position::new(110.0, 4.0, 110.0);
pub const NOWHERE: Position = Position::new(50.0, 50.0, 50.0);

/// Compact layout so rebuilds stay cheap.
pub fn config() -> ArenaConfig {
    ArenaConfig {
        zones: Zones {
            lobby: Volume::new(BlockPos::new(-10, -5, -10), BlockPos::new(10, 5, 10)),
            pre_arena: Volume::new(BlockPos::new(20, 0, 0), BlockPos::new(30, 5, 10)),
            join_pad: Volume::new(BlockPos::new(24, 0, 4), BlockPos::new(26, 2, 6)),
            arena: Volume::new(
                BlockPos::new(100, ARENA_FLOOR_Y, 100),
                BlockPos::new(120, 10, 120),
            ),
        },
        world_spawn: SpawnPoint {
            position: SPAWN,
            rotation: Rotation::new(-90.0, 0.0),
        },
        admins: vec!["op".to_owned()],
        ..ArenaConfig::default()
    }
}

pub struct Harness {
    pub server: ArenaServer<SimWorld>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(config())
    }

    pub fn with_config(config: ArenaConfig) -> Self {
        Self::with_world(SimWorld::new(), config)
    }

    pub fn with_world(world: SimWorld, config: ArenaConfig) -> Self {
        config.validate().unwrap();
        Self {
            server: ArenaServer::new(world, config, 7),
        }
    }

    pub fn world(&self) -> &SimWorld {
        self.server.host()
    }

    pub fn world_mut(&mut self) -> &mut SimWorld {
        self.server.host_mut()
    }

    pub fn ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.server.tick();
        }
    }

    /// Run long enough for at least one zone scan.
    pub fn scan(&mut self) {
        self.ticks(2);
    }

    /// Connect and deliver the initial spawn.
    pub fn join(&mut self, name: &str) -> PlayerId {
        let player = self.world_mut().connect(name);
        self.server.post(PlayerSpawned {
            player,
            initial: true,
        });
        self.ticks(1);
        player
    }

    /// Walk onto the join pad and get placed in the arena.
    pub fn enter_arena(&mut self, player: PlayerId) {
        self.world_mut().move_player(player, PAD);
        self.scan();
        assert!(self.server.arena().is_member(player), "{player:?} did not join");
    }

    pub fn position(&self, player: PlayerId) -> Position {
        self.world().position(player).unwrap()
    }

    pub fn score(&self, objective: &str, player: PlayerId) -> Option<i32> {
        self.world()
            .objective_scores(objective)
            .into_iter()
            .find(|&(p, _)| p == player)
            .map(|(_, score)| score)
    }

    pub fn messages_to(&self, player: PlayerId) -> Vec<String> {
        self.world()
            .outbound()
            .iter()
            .filter_map(|out| match out {
                Outbound::Message { player: p, text } if *p == player => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn subtitles_to(&self, player: PlayerId) -> Vec<String> {
        self.world()
            .outbound()
            .iter()
            .filter_map(|out| match out {
                Outbound::Title { player: p, title } if *p == player => title.subtitle.clone(),
                _ => None,
            })
            .collect()
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.world()
            .outbound()
            .iter()
            .filter_map(|out| match out {
                Outbound::Broadcast(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn sounds_to(&self, player: PlayerId) -> Vec<&'static str> {
        self.world()
            .outbound()
            .iter()
            .filter_map(|out| match out {
                Outbound::Sound { player: p, sound } if *p == player => Some(sound.id),
                _ => None,
            })
            .collect()
    }
}

pub fn entity(player: PlayerId) -> EntityId {
    EntityId::from(player)
}
