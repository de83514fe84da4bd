//! Host events the arena observes.
//!
//! After-events ([`PlayerSpawned`], [`PlayerLeft`], [`EntityHurt`],
//! [`EntityDied`], [`EntitySpawned`]) are queued with
//! [`ArenaServer::post`](crate::ArenaServer::post) and handled on the next
//! tick. Before-events ([`ItemUse`], [`ItemUseOn`]) are dispatched with
//! [`ArenaServer::before`](crate::ArenaServer::before) while the host waits
//! for the verdict.

use ffa_geom::BlockPos;

use crate::host::{EntityId, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DamageCause {
    EntityAttack,
    Projectile,
    Fall,
    Fire,
    Lava,
    Void,
    #[default]
    Other,
}

/// What caused a hurt or death.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DamageSource {
    pub cause: DamageCause,
    /// Entity that dealt the damage, if any.
    pub damager: Option<EntityId>,
    /// Projectile type id when the damage came from one.
    pub projectile: Option<String>,
}

impl DamageSource {
    /// Melee hit by `damager`.
    #[must_use]
    pub const fn attack(damager: EntityId) -> Self {
        Self {
            cause: DamageCause::EntityAttack,
            damager: Some(damager),
            projectile: None,
        }
    }

    /// Projectile of type `projectile` shot by `shooter`.
    pub fn projectile(shooter: EntityId, projectile: impl Into<String>) -> Self {
        Self {
            cause: DamageCause::Projectile,
            damager: Some(shooter),
            projectile: Some(projectile.into()),
        }
    }

    /// Damage with no responsible entity.
    #[must_use]
    pub const fn environment(cause: DamageCause) -> Self {
        Self {
            cause,
            damager: None,
            projectile: None,
        }
    }
}

/// A player (re)spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSpawned {
    pub player: PlayerId,
    /// First spawn after joining.
    pub initial: bool,
}

/// A player disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLeft {
    pub player: PlayerId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityHurt {
    pub victim: EntityId,
    pub amount: f32,
    pub source: DamageSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDied {
    pub victim: EntityId,
    pub source: DamageSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpawned {
    pub entity: EntityId,
    pub type_id: String,
}

/// A player is about to use an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUse {
    pub player: PlayerId,
    pub item: String,
}

/// A player is about to use an item on a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUseOn {
    pub player: PlayerId,
    pub item: String,
    pub block: BlockPos,
}
