//! Recurring tasks and event observers that drive the arena.

use ffa_event::EventBus;
use ffa_tick::Flow;
use tracing::debug;

use crate::events::{EntityDied, EntityHurt, EntitySpawned, ItemUse, ItemUseOn, PlayerLeft, PlayerSpawned};
use crate::host::Host;
use crate::reset;
use crate::session::Session;

/// Register the arena's tasks, in the order they run within a tick, and its
/// event observers.
pub fn register<H: Host + 'static>(session: &mut Session<H>, bus: &mut EventBus<Session<H>>) {
    let intervals = session.arena.config().intervals;
    let reset_period = session.arena.config().reset.period_ticks;
    let tasks = &mut session.tasks;

    tasks.run_interval("Playtime", intervals.playtime, |s: &mut Session<H>| {
        s.arena.tick_playtime(&mut s.host);
        Flow::Continue
    });

    tasks.run_interval("ZoneScan", intervals.zone_scan, |s: &mut Session<H>| {
        let Session { host, arena, rng, .. } = s;
        arena.scan_zones(host, rng);
        Flow::Continue
    });

    tasks.run_interval("ProtectionSweep", intervals.protection_sweep, |s: &mut Session<H>| {
        let Session { host, arena, .. } = s;
        arena.sweep_protection(host);
        Flow::Continue
    });

    tasks.run_interval("Leaderboard", intervals.leaderboard, |s: &mut Session<H>| {
        s.arena.refresh_leaderboard(&mut s.host);
        Flow::Continue
    });

    tasks.run_interval("ArenaReset", reset_period, |s: &mut Session<H>| {
        reset::start_countdown(s);
        Flow::Continue
    });

    bus.after::<PlayerSpawned, _>(|s, event| s.arena.on_player_spawned(&mut s.host, event));

    bus.after::<EntityHurt, _>(|s, event| {
        let Session { host, arena, .. } = s;
        arena.on_hurt(host, event);
    });

    bus.after::<EntityDied, _>(|s, event| {
        let Session { host, arena, .. } = s;
        arena.on_death(host, event);
    });

    bus.after::<PlayerLeft, _>(|s, event| s.arena.on_player_left(event));

    bus.after::<EntitySpawned, _>(|s, event| {
        let Some(&ticks) = s.arena.config().despawn_ticks.get(&event.type_id) else {
            return;
        };
        let entity = event.entity;
        debug!("{} {entity:?} despawns in {ticks} ticks", event.type_id);
        s.tasks.run_after("Despawn", ticks, move |s: &mut Session<H>| s.host.kill(entity));
    });

    bus.before::<ItemUse, _>(|s, event| s.arena.check_item_use(event));
    bus.before::<ItemUseOn, _>(|s, event| s.arena.check_item_use_on(event));
}
