use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use ffa_arena::FillError;
use ffa_arena::fill::FillOptions;
use ffa_arena::host::{
    Blocks, Directory, EffectSpec, EntityId, GameMode, Host, PlayerControl, PlayerId, Scoreboard, Sound, Title,
};
use ffa_geom::{BlockPos, FILL_CELL_LIMIT, Position, Rotation, Volume};
use hashbrown::HashMap;
use tracing::{trace, warn};

/// Block id stored as absence.
pub const AIR: &str = "minecraft:air";

/// A connected player.
#[derive(Debug, Clone, PartialEq)]
pub struct SimPlayer {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub rotation: Rotation,
    pub game_mode: GameMode,
    pub tags: BTreeSet<String>,
    /// Effects applied since the last clear, oldest first.
    pub effects: Vec<EffectSpec>,
    pub inventory: Vec<String>,
    pub jump_enabled: bool,
}

/// Side effects the world has been asked to show players.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Broadcast(String),
    Message { player: PlayerId, text: String },
    Title { player: PlayerId, title: Title },
    Sound { player: PlayerId, sound: Sound },
    Teleport { player: PlayerId, to: Position },
    Killed(EntityId),
}

#[derive(Debug, Clone, Default)]
struct Objective {
    display_name: String,
    scores: BTreeMap<PlayerId, i32>,
}

#[derive(Debug)]
pub struct SimWorld {
    players: BTreeMap<PlayerId, SimPlayer>,
    entities: BTreeMap<EntityId, String>,
    next_id: u64,
    blocks: HashMap<BlockPos, String>,
    cell_limit: u64,
    fill_calls: usize,
    failing_fills: usize,
    objectives: BTreeMap<String, Objective>,
    origin: Instant,
    elapsed: Duration,
    outbound: Vec<Outbound>,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimWorld {
    #[must_use]
    pub fn new() -> Self {
        Self::with_cell_limit(FILL_CELL_LIMIT)
    }

    /// World whose fill call rejects regions above `cell_limit` cells.
    #[must_use]
    pub fn with_cell_limit(cell_limit: u64) -> Self {
        Self {
            players: BTreeMap::new(),
            entities: BTreeMap::new(),
            next_id: 1,
            blocks: HashMap::new(),
            cell_limit,
            fill_calls: 0,
            failing_fills: 0,
            objectives: BTreeMap::new(),
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            outbound: Vec::new(),
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Connect a player at the origin in survival mode.
    pub fn connect(&mut self, name: &str) -> PlayerId {
        let id = PlayerId(self.allocate_id());
        self.players.insert(
            id,
            SimPlayer {
                id,
                name: name.to_owned(),
                position: Position::default(),
                rotation: Rotation::default(),
                game_mode: GameMode::Survival,
                tags: BTreeSet::new(),
                effects: Vec::new(),
                inventory: Vec::new(),
                jump_enabled: true,
            },
        );
        trace!("{name} connected as {id:?}");
        id
    }

    /// Returns whether the player was connected.
    pub fn disconnect(&mut self, player: PlayerId) -> bool {
        self.players.remove(&player).is_some()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&SimPlayer> {
        self.players.get(&player)
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut SimPlayer> {
        self.players.get_mut(&player)
    }

    #[must_use]
    pub fn find_player(&self, name: &str) -> Option<PlayerId> {
        self.players.values().find(|p| p.name == name).map(|p| p.id)
    }

    /// Walk a player to `position`. Unknown players are ignored.
    pub fn move_player(&mut self, player: PlayerId, position: Position) {
        if let Some(p) = self.players.get_mut(&player) {
            p.position = position;
        }
    }

    pub fn spawn_entity(&mut self, type_id: &str) -> EntityId {
        let id = EntityId(self.allocate_id());
        self.entities.insert(id, type_id.to_owned());
        id
    }

    #[must_use]
    pub fn entity_exists(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Block at `pos`, air when never set.
    #[must_use]
    pub fn block(&self, pos: BlockPos) -> &str {
        self.blocks.get(&pos).map_or(AIR, String::as_str)
    }

    pub fn set_block(&mut self, pos: BlockPos, block: &str) {
        if block == AIR {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block.to_owned());
        }
    }

    /// Number of non-air blocks.
    #[must_use]
    pub fn solid_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Host fill calls made so far, failed ones included.
    #[must_use]
    pub const fn fill_calls(&self) -> usize {
        self.fill_calls
    }

    /// Make the next `count` fill calls fail.
    pub const fn fail_next_fills(&mut self, count: usize) {
        self.failing_fills = count;
    }

    pub fn advance(&mut self, by: Duration) {
        self.elapsed += by;
    }

    #[must_use]
    pub fn outbound(&self) -> &[Outbound] {
        &self.outbound
    }

    pub fn take_outbound(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outbound)
    }

    /// Scores of one objective in player id order.
    #[must_use]
    pub fn objective_scores(&self, objective: &str) -> Vec<(PlayerId, i32)> {
        self.objectives
            .get(objective)
            .map(|o| o.scores.iter().map(|(&p, &s)| (p, s)).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn objective_display_name(&self, objective: &str) -> Option<&str> {
        self.objectives.get(objective).map(|o| o.display_name.as_str())
    }
}

impl Directory for SimWorld {
    fn players(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }

    fn as_player(&self, entity: EntityId) -> Option<PlayerId> {
        let player = PlayerId(entity.0);
        self.players.contains_key(&player).then_some(player)
    }

    fn is_connected(&self, player: PlayerId) -> bool {
        self.players.contains_key(&player)
    }

    fn name(&self, player: PlayerId) -> Option<&str> {
        self.players.get(&player).map(|p| p.name.as_str())
    }

    fn position(&self, player: PlayerId) -> Option<Position> {
        self.players.get(&player).map(|p| p.position)
    }

    fn game_mode(&self, player: PlayerId) -> Option<GameMode> {
        self.players.get(&player).map(|p| p.game_mode)
    }

    fn broadcast(&mut self, message: &str) {
        self.outbound.push(Outbound::Broadcast(message.to_owned()));
    }

    fn kill(&mut self, entity: EntityId) {
        if self.entities.remove(&entity).is_some() {
            self.outbound.push(Outbound::Killed(entity));
        }
    }
}

impl Blocks for SimWorld {
    fn fill(&mut self, region: Volume, block: &str, options: &FillOptions) -> Result<(), FillError> {
        self.fill_calls += 1;

        let cells = region.cell_count();
        if cells > self.cell_limit {
            return Err(FillError::TooLarge {
                cells,
                limit: self.cell_limit,
            });
        }
        if self.failing_fills > 0 {
            self.failing_fills -= 1;
            return Err(FillError::Host("injected failure".to_owned()));
        }

        for x in region.from.x..=region.to.x {
            for y in region.from.y..=region.to.y {
                for z in region.from.z..=region.to.z {
                    let pos = BlockPos::new(x, y, z);
                    if options.replace.as_deref().is_some_and(|only| self.block(pos) != only) {
                        continue;
                    }
                    self.set_block(pos, block);
                }
            }
        }
        Ok(())
    }

    fn is_air(&self, pos: BlockPos) -> bool {
        !self.blocks.contains_key(&pos)
    }
}

impl Scoreboard for SimWorld {
    fn has_objective(&self, objective: &str) -> bool {
        self.objectives.contains_key(objective)
    }

    fn add_objective(&mut self, objective: &str, display_name: &str) {
        self.objectives
            .entry(objective.to_owned())
            .or_insert_with(|| Objective {
                display_name: display_name.to_owned(),
                scores: BTreeMap::new(),
            });
    }

    fn score(&self, objective: &str, player: PlayerId) -> Option<i32> {
        self.objectives.get(objective)?.scores.get(&player).copied()
    }

    fn set_score(&mut self, objective: &str, player: PlayerId, value: i32) {
        match self.objectives.get_mut(objective) {
            Some(o) => {
                o.scores.insert(player, value);
            }
            None => warn!("set_score on missing objective {objective}"),
        }
    }

    fn clear_objective(&mut self, objective: &str) {
        if let Some(o) = self.objectives.get_mut(objective) {
            o.scores.clear();
        }
    }
}

impl PlayerControl for SimWorld {
    fn send_message(&mut self, player: PlayerId, message: &str) {
        if self.players.contains_key(&player) {
            self.outbound.push(Outbound::Message {
                player,
                text: message.to_owned(),
            });
        }
    }

    fn show_title(&mut self, player: PlayerId, title: &Title) {
        if self.players.contains_key(&player) {
            self.outbound.push(Outbound::Title {
                player,
                title: title.clone(),
            });
        }
    }

    fn add_effect(&mut self, player: PlayerId, effect: EffectSpec) {
        if let Some(p) = self.players.get_mut(&player) {
            p.effects.push(effect);
        }
    }

    fn clear_effects(&mut self, player: PlayerId) {
        if let Some(p) = self.players.get_mut(&player) {
            p.effects.clear();
        }
    }

    fn play_sound(&mut self, player: PlayerId, sound: Sound) {
        if self.players.contains_key(&player) {
            self.outbound.push(Outbound::Sound { player, sound });
        }
    }

    fn teleport(&mut self, player: PlayerId, to: Position, facing: Option<Rotation>) {
        let Some(p) = self.players.get_mut(&player) else {
            return;
        };
        p.position = to;
        if let Some(rotation) = facing {
            p.rotation = rotation;
        }
        self.outbound.push(Outbound::Teleport { player, to });
    }

    fn set_game_mode(&mut self, player: PlayerId, mode: GameMode) {
        if let Some(p) = self.players.get_mut(&player) {
            p.game_mode = mode;
        }
    }

    fn clear_inventory(&mut self, player: PlayerId) {
        if let Some(p) = self.players.get_mut(&player) {
            p.inventory.clear();
        }
    }

    fn set_jump_enabled(&mut self, player: PlayerId, enabled: bool) {
        if let Some(p) = self.players.get_mut(&player) {
            p.jump_enabled = enabled;
        }
    }

    fn remove_tag(&mut self, player: PlayerId, tag: &str) {
        if let Some(p) = self.players.get_mut(&player) {
            p.tags.remove(tag);
        }
    }
}

impl Host for SimWorld {
    fn now(&self) -> Instant {
        self.origin + self.elapsed
    }
}
