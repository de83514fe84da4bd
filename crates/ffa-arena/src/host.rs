//! Collaborator interfaces the arena drives.
//!
//! The arena never owns world state. Everything it reads or changes goes
//! through these traits, implemented by the embedding game server (or by
//! `ffa-sim` in tests and the console runner).

use std::time::Instant;

use ffa_geom::{BlockPos, Position, Rotation, Volume};
use serde::{Deserialize, Serialize};

use crate::error::FillError;
use crate::fill::FillOptions;

/// Any entity known to the host, players included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// An entity the host has confirmed is a connected player.
///
/// Obtained through [`Directory::as_player`], the validity check every handler
/// runs before touching an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl From<PlayerId> for EntityId {
    fn from(player: PlayerId) -> Self {
        Self(player.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusEffect {
    Absorption,
    InstantHealth,
    Regeneration,
    Resistance,
    Saturation,
    Weakness,
}

impl StatusEffect {
    /// Namespaced effect id.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Absorption => "minecraft:absorption",
            Self::InstantHealth => "minecraft:instant_health",
            Self::Regeneration => "minecraft:regeneration",
            Self::Resistance => "minecraft:resistance",
            Self::Saturation => "minecraft:saturation",
            Self::Weakness => "minecraft:weakness",
        }
    }
}

/// A timed status effect application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSpec {
    pub effect: StatusEffect,
    pub duration_ticks: u32,
    pub amplifier: u8,
    pub show_particles: bool,
}

impl EffectSpec {
    #[must_use]
    pub const fn new(effect: StatusEffect, duration_ticks: u32, amplifier: u8) -> Self {
        Self {
            effect,
            duration_ticks,
            amplifier,
            show_particles: true,
        }
    }

    #[must_use]
    pub const fn hidden(self) -> Self {
        Self {
            show_particles: false,
            ..self
        }
    }
}

/// A sound played to one player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sound {
    pub id: &'static str,
    pub volume: f32,
    pub pitch: f32,
}

impl Sound {
    #[must_use]
    pub const fn new(id: &'static str, pitch: f32) -> Self {
        Self {
            id,
            volume: 1.0,
            pitch,
        }
    }

    #[must_use]
    pub const fn loud(self, volume: f32) -> Self {
        Self { volume, ..self }
    }
}

/// On-screen title text with fade timings in ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub title: String,
    pub subtitle: Option<String>,
    pub fade_in: u32,
    pub stay: u32,
    pub fade_out: u32,
}

impl Title {
    pub fn title(text: impl Into<String>, fade_in: u32, stay: u32, fade_out: u32) -> Self {
        Self {
            title: text.into(),
            subtitle: None,
            fade_in,
            stay,
            fade_out,
        }
    }

    /// Subtitle under an empty title.
    pub fn subtitle(text: impl Into<String>, fade_in: u32, stay: u32, fade_out: u32) -> Self {
        Self {
            title: String::new(),
            subtitle: Some(text.into()),
            fade_in,
            stay,
            fade_out,
        }
    }
}

/// Connected actors and server-wide messaging.
pub trait Directory {
    /// All connected players in a stable order.
    fn players(&self) -> Vec<PlayerId>;

    /// `Some` when `entity` is a valid, connected player.
    fn as_player(&self, entity: EntityId) -> Option<PlayerId>;

    fn is_connected(&self, player: PlayerId) -> bool;

    fn name(&self, player: PlayerId) -> Option<&str>;

    fn position(&self, player: PlayerId) -> Option<Position>;

    fn game_mode(&self, player: PlayerId) -> Option<GameMode>;

    /// Chat message to every connected player.
    fn broadcast(&mut self, message: &str);

    /// Remove a (non-player) entity from the world. Unknown ids are ignored.
    fn kill(&mut self, entity: EntityId);
}

/// World block access.
pub trait Blocks {
    /// Fill `region` with `block` in one host call.
    ///
    /// Hosts reject regions above their per-call cell limit.
    fn fill(&mut self, region: Volume, block: &str, options: &FillOptions) -> Result<(), FillError>;

    fn is_air(&self, pos: BlockPos) -> bool;
}

/// Named integer counters per player.
pub trait Scoreboard {
    fn has_objective(&self, objective: &str) -> bool;

    fn add_objective(&mut self, objective: &str, display_name: &str);

    /// `None` when the player has no score yet (or the objective is missing).
    fn score(&self, objective: &str, player: PlayerId) -> Option<i32>;

    fn set_score(&mut self, objective: &str, player: PlayerId, value: i32);

    /// Remove every participant from an objective.
    fn clear_objective(&mut self, objective: &str);
}

/// Per-player side effects.
pub trait PlayerControl {
    fn send_message(&mut self, player: PlayerId, message: &str);

    fn show_title(&mut self, player: PlayerId, title: &Title);

    fn add_effect(&mut self, player: PlayerId, effect: EffectSpec);

    fn clear_effects(&mut self, player: PlayerId);

    fn play_sound(&mut self, player: PlayerId, sound: Sound);

    fn teleport(&mut self, player: PlayerId, to: Position, facing: Option<Rotation>);

    fn set_game_mode(&mut self, player: PlayerId, mode: GameMode);

    fn clear_inventory(&mut self, player: PlayerId);

    fn set_jump_enabled(&mut self, player: PlayerId, enabled: bool);

    fn remove_tag(&mut self, player: PlayerId, tag: &str);
}

/// Everything the arena needs from the embedding server.
pub trait Host: Directory + Blocks + Scoreboard + PlayerControl {
    /// Wall-clock instant used for spawn protection expiry.
    fn now(&self) -> Instant;
}
