//! Arena lifecycle: zone transitions, kill credit and arena resets.

use std::time::Duration;

use ffa_event::EventResult;
use ffa_geom::Position;
use hashbrown::HashSet;
use rand::Rng;
use tracing::{debug, info};

use crate::config::ArenaConfig;
use crate::events::{EntityDied, EntityHurt, ItemUse, ItemUseOn, PlayerLeft, PlayerSpawned};
use crate::fill::BulkFiller;
use crate::host::{EffectSpec, GameMode, Host, PlayerId, Sound, StatusEffect, Title};
use crate::leaderboard::{self, Standing};
use crate::ledger::DamageLedger;
use crate::ops::Operators;
use crate::protection::SpawnProtection;
use crate::rebuild::{RebuildPlan, RebuildReport};
use crate::scores::{DEATHS, KILLS, KILLSTREAK, PLAYTIME, Scores};
use crate::spawn::{SpawnPick, find_arena_spawn};
use crate::zones::ZoneFlags;

const ENDER_PEARL: &str = "minecraft:ender_pearl";

const KILL_CONFIRM: Sound = Sound::new("dig.snow", 1.0);
const KILL_CONFIRM_HIGH: Sound = Sound::new("break.amethyst_cluster", 1.7);
const LEVEL_UP: Sound = Sound::new("random.levelup", 1.0);
const ARENA_ENTER: Sound = Sound::new("random.levelup", 0.5).loud(1000.0);
const PROTECTION_EXPIRED: Sound = Sound::new("random.anvil_land", 0.8).loud(1000.0);

const LOBBY_BUFFS: [EffectSpec; 3] = [
    EffectSpec::new(StatusEffect::Saturation, 60, 0).hidden(),
    EffectSpec::new(StatusEffect::Resistance, 60, 0).hidden(),
    EffectSpec::new(StatusEffect::InstantHealth, 60, 0).hidden(),
];

const ARRIVAL_EFFECTS: [EffectSpec; 2] = [
    EffectSpec::new(StatusEffect::Weakness, 100, 0),
    EffectSpec::new(StatusEffect::Resistance, 100, 0),
];

const KILL_REWARDS: [EffectSpec; 3] = [
    EffectSpec::new(StatusEffect::Absorption, 600, 0),
    EffectSpec::new(StatusEffect::Regeneration, 100, 2),
    EffectSpec::new(StatusEffect::Saturation, 20, 0),
];

/// Confirmation sound for a projectile hit, by projectile type.
fn projectile_sound(projectile: &str) -> Option<Sound> {
    match projectile {
        "minecraft:arrow" => Some(Sound::new("random.orb", 0.5)),
        "minecraft:snowball" => Some(Sound::new("random.orb", 1.0)),
        "minecraft:fishing_hook" => Some(Sound::new("random.bow", 2.0)),
        _ => None,
    }
}

/// Owns all per-session arena state.
///
/// Membership, the damage ledger and spawn protection live here and are only
/// touched from the tick thread through the handlers below.
#[derive(Debug)]
pub struct ArenaController {
    config: ArenaConfig,
    operators: Operators,
    ledger: DamageLedger,
    protection: SpawnProtection,
    members: HashSet<PlayerId>,
    filler: BulkFiller,
    rebuild: RebuildPlan,
}

impl ArenaController {
    #[must_use]
    pub fn new(config: ArenaConfig) -> Self {
        let operators = Operators::new(config.admins.clone());
        let ledger = DamageLedger::new(config.combat.kill_credit_threshold);
        let protection = SpawnProtection::new(
            Duration::try_from_secs_f32(config.combat.spawn_protection_secs).unwrap_or(Duration::ZERO),
        );
        let filler = BulkFiller::new(config.fill.cell_limit, config.fill.retries);
        let rebuild = RebuildPlan::for_arena(&config.zones.arena, &config.materials, config.reset.roof_clearance);

        Self {
            config,
            operators,
            ledger,
            protection,
            members: HashSet::new(),
            filler,
            rebuild,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    #[must_use]
    pub const fn operators(&self) -> &Operators {
        &self.operators
    }

    #[must_use]
    pub const fn ledger(&self) -> &DamageLedger {
        &self.ledger
    }

    #[must_use]
    pub const fn protection(&self) -> &SpawnProtection {
        &self.protection
    }

    #[must_use]
    pub fn is_member(&self, player: PlayerId) -> bool {
        self.members.contains(&player)
    }

    /// Arena members in id order.
    #[must_use]
    pub fn members(&self) -> Vec<PlayerId> {
        let mut members: Vec<_> = self.members.iter().copied().collect();
        members.sort_unstable();
        members
    }

    /// Whether `player` is inside an unexpired spawn protection window.
    pub fn is_protected<H: Host + ?Sized>(&self, host: &H, player: PlayerId) -> bool {
        self.protection.is_protected(player, host.now())
    }

    /// Apply zone transitions for every connected player.
    pub fn scan_zones<H, R>(&mut self, host: &mut H, rng: &mut R)
    where
        H: Host + ?Sized,
        R: Rng + ?Sized,
    {
        for player in host.players() {
            if let Some(position) = host.position(player) {
                self.scan_player(host, rng, player, position);
            }
        }
    }

    /// Zone transitions for one player at `position`, in precedence order.
    /// Returns the zones the position is in.
    pub fn scan_player<H, R>(&mut self, host: &mut H, rng: &mut R, player: PlayerId, position: Position) -> ZoneFlags
    where
        H: Host + ?Sized,
        R: Rng + ?Sized,
    {
        let zones = self.config.zones.classify(position);

        if zones.contains(ZoneFlags::ARENA) {
            if !self.members.contains(&player) {
                debug!("{player:?} is in the arena without membership, returning to spawn");
                self.move_to_spawn(host, player);
                return zones;
            }
        } else {
            self.leave_arena(host, player);
        }

        if zones.contains(ZoneFlags::LOBBY)
            && !matches!(host.game_mode(player), Some(GameMode::Creative | GameMode::Spectator))
        {
            host.clear_inventory(player);
        }

        if zones.intersects(ZoneFlags::LOBBY | ZoneFlags::PRE_ARENA) {
            let is_admin = host.name(player).is_some_and(|name| self.operators.contains(name));
            if !is_admin {
                host.set_game_mode(player, GameMode::Adventure);
            }
            for effect in LOBBY_BUFFS {
                host.add_effect(player, effect);
            }
        }

        if zones.contains(ZoneFlags::JOIN_PAD) {
            self.enter_arena(host, rng, player);
        }

        zones
    }

    /// Grant membership and protection and place `player` in the arena.
    pub fn enter_arena<H, R>(&mut self, host: &mut H, rng: &mut R, player: PlayerId)
    where
        H: Host + ?Sized,
        R: Rng + ?Sized,
    {
        self.members.insert(player);
        self.protection.grant(player, host.now());

        for effect in ARRIVAL_EFFECTS {
            host.add_effect(player, effect);
        }

        let pick = find_arena_spawn(&*host, &self.config.zones.arena, &self.config.spawn_search, rng);
        if let SpawnPick::Fallback(position) = pick {
            self.operators.warn(
                host,
                &format!(
                    "No free arena spawn after {} attempts, using center {:.1} {:.1} {:.1}",
                    self.config.spawn_search.attempts, position.x, position.y, position.z
                ),
            );
        }

        host.teleport(player, pick.position(), None);
        host.play_sound(player, ARENA_ENTER);
        host.set_jump_enabled(player, true);
        debug!("{player:?} entered the arena");
    }

    /// Drop membership, protection and kit tags. Returns whether the player
    /// was a member.
    pub fn leave_arena<H: Host + ?Sized>(&mut self, host: &mut H, player: PlayerId) -> bool {
        let was_member = self.members.remove(&player);
        self.protection.revoke(player);
        for tag in self.config.kit_tags() {
            host.remove_tag(player, &tag);
        }
        if was_member {
            debug!("{player:?} left the arena");
        }
        was_member
    }

    /// Reset a player to world spawn.
    pub fn move_to_spawn<H: Host + ?Sized>(&self, host: &mut H, player: PlayerId) {
        let spawn = self.config.world_spawn;
        host.clear_inventory(player);
        host.clear_effects(player);
        host.teleport(player, spawn.position, Some(spawn.rotation));
        host.set_jump_enabled(player, true);
    }

    pub fn on_player_spawned<H: Host + ?Sized>(&self, host: &mut H, event: &PlayerSpawned) {
        if !host.is_connected(event.player) {
            return;
        }
        self.move_to_spawn(host, event.player);
        if event.initial {
            host.play_sound(event.player, LEVEL_UP);
            host.show_title(event.player, &Title::title("§aWelcome!", 30, 40, 30));
        }
    }

    /// Record player-on-player damage.
    pub fn on_hurt<H: Host + ?Sized>(&mut self, host: &mut H, event: &EntityHurt) {
        let Some(victim) = host.as_player(event.victim) else {
            return;
        };
        let Some(attacker) = event.source.damager.and_then(|entity| host.as_player(entity)) else {
            return;
        };

        if let Some(sound) = event.source.projectile.as_deref().and_then(projectile_sound) {
            host.play_sound(attacker, sound);
        }

        self.ledger.record(victim, attacker, event.amount);
    }

    /// Score a player death. Returns the credited killer, if any.
    pub fn on_death<H: Host + ?Sized>(&mut self, host: &mut H, event: &EntityDied) -> Option<PlayerId> {
        let victim = host.as_player(event.victim)?;
        let direct = event.source.damager.and_then(|entity| host.as_player(entity));

        let mut scores = Scores::new(&mut *host, &self.operators);
        scores.add(DEATHS, victim, 1);
        scores.set(KILLSTREAK, victim, 0);

        let Some(killer) = self
            .ledger
            .resolve_killer(victim, direct)
            .filter(|&killer| host.is_connected(killer))
        else {
            debug!("{victim:?} died with nobody credited ({:?})", event.source.cause);
            return None;
        };

        Scores::new(&mut *host, &self.operators).add(KILLS, killer, 1);
        host.play_sound(killer, KILL_CONFIRM);
        host.play_sound(killer, KILL_CONFIRM_HIGH);

        if self.members.contains(&killer) {
            let streak = Scores::new(&mut *host, &self.operators).add(KILLSTREAK, killer, 1);
            self.announce_streak(host, killer, streak);
            for effect in KILL_REWARDS {
                host.add_effect(killer, effect);
            }
        }

        info!("{killer:?} killed {victim:?}");
        Some(killer)
    }

    fn announce_streak<H: Host + ?Sized>(&self, host: &mut H, killer: PlayerId, streak: i32) {
        let suffix = if streak == 1 { "" } else { "s" };
        let combat = &self.config.combat;

        let title = if combat.banner_every > 0 && streak % combat.banner_every == 0 {
            Title::subtitle(format!("§6§l{streak} §r§6kill{suffix}!"), 0, 35, 5)
        } else {
            Title::subtitle(format!("\n\n§e{streak} kill{suffix}"), 0, 25, 5)
        };
        host.show_title(killer, &title);

        if combat.broadcast_every > 0 && streak % combat.broadcast_every == 0 {
            let name = host.name(killer).unwrap_or("Someone").to_owned();
            host.broadcast(&format!("§6{name} is on a killing spree!"));
        }
    }

    /// Forget everything held for a disconnected player.
    pub fn on_player_left(&mut self, event: &PlayerLeft) {
        self.ledger.forget(event.player);
        self.members.remove(&event.player);
        self.protection.revoke(event.player);
        debug!("{:?} left, session state purged", event.player);
    }

    /// Ender pearls only work for arena members.
    #[must_use]
    pub fn check_item_use(&self, event: &ItemUse) -> EventResult {
        if event.item == ENDER_PEARL && !self.members.contains(&event.player) {
            EventResult::Cancel
        } else {
            EventResult::Allow
        }
    }

    /// Boats cannot be placed.
    #[must_use]
    pub fn check_item_use_on(&self, event: &ItemUseOn) -> EventResult {
        if event.item.contains("boat") {
            EventResult::Cancel
        } else {
            EventResult::Allow
        }
    }

    /// Remove expired protection windows and tell their players.
    pub fn sweep_protection<H: Host + ?Sized>(&mut self, host: &mut H) -> Vec<PlayerId> {
        let expired = self.protection.sweep(host.now());
        for &player in &expired {
            if !host.is_connected(player) {
                continue;
            }
            host.show_title(player, &Title::subtitle("§cYour spawn protection has expired.", 2, 40, 10));
            host.play_sound(player, PROTECTION_EXPIRED);
        }
        expired
    }

    /// One tick of playtime for every connected player.
    pub fn tick_playtime<H: Host + ?Sized>(&self, host: &mut H) {
        let players = host.players();
        let mut scores = Scores::new(host, &self.operators);
        for player in players {
            scores.add(PLAYTIME, player, 1);
        }
    }

    pub fn refresh_leaderboard<H: Host + ?Sized>(&self, host: &mut H) -> Vec<Standing> {
        leaderboard::refresh(host, &self.operators, &self.config.leaderboard)
    }

    /// Subtitle for one second of the reset countdown.
    pub fn announce_countdown<H: Host + ?Sized>(&self, host: &mut H, remaining: u32) {
        let title = Title::subtitle(format!("\n\n§2Clearing arena in §e{remaining}§2..."), 0, 25, 30);
        for player in host.players() {
            host.show_title(player, &title);
        }
    }

    /// Clear and rebuild the arena volume.
    pub fn rebuild_arena<H: Host + ?Sized>(&self, host: &mut H) -> RebuildReport {
        host.broadcast("§aClearing Arena...");
        let report = self.rebuild.execute(host, &self.filler);

        if !report.is_complete() {
            let failed: Vec<_> = report.failed_steps().collect();
            self.operators.warn(
                host,
                &format!("Arena rebuild incomplete, failed steps: {}", failed.join(", ")),
            );
        }

        host.broadcast("§aArena cleared!");
        let title = Title::subtitle("\n\n§aArena cleared!", 3, 28, 21);
        for player in host.players() {
            host.show_title(player, &title);
        }
        report
    }
}
