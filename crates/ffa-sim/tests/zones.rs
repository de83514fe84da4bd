mod common;

use std::time::Duration;

use common::{Harness, INSIDE_ARENA, LOBBY, NOWHERE, SPAWN, config};
use ffa_arena::fill::FillOptions;
use ffa_arena::host::{Blocks as _, GameMode, Host as _};
use ffa_geom::{BlockPos, Position, Volume};
use pretty_assertions::assert_eq;

#[test]
fn initial_spawn_goes_to_world_spawn_with_welcome() {
    let mut h = Harness::new();
    let p = h.join("alice");

    assert_eq!(h.position(p), SPAWN);
    assert!(h.sounds_to(p).contains(&"random.levelup"));
    let welcomed = h.world().outbound().iter().any(|out| {
        matches!(out, ffa_sim::Outbound::Title { player, title } if *player == p && title.title == "§aWelcome!")
    });
    assert!(welcomed);
}

#[test]
fn join_pad_grants_membership_and_places_in_arena() {
    let mut h = Harness::new();
    let p = h.join("alice");
    let start = h.world().now();

    h.enter_arena(p);

    let arena = config().zones.arena;
    let position = h.position(p);
    assert!(arena.contains(position));
    assert!((position.y - 4.0).abs() < f64::EPSILON);
    assert!(h.server.arena().is_protected(h.world(), p));
    assert_eq!(
        h.server.arena().protection().expiry(p),
        Some(start + Duration::from_secs(5))
    );
    assert!(h.world().player(p).unwrap().jump_enabled);
}

#[test]
fn lobby_and_arrival_effects_are_base_level() {
    let mut h = Harness::new();
    let p = h.join("alice");
    h.enter_arena(p);

    let effects: Vec<_> = h
        .world()
        .player(p)
        .unwrap()
        .effects
        .iter()
        .map(|e| (e.effect.id(), e.amplifier, e.show_particles))
        .collect();

    assert!(effects.contains(&("minecraft:resistance", 0, false)));
    assert!(effects.contains(&("minecraft:instant_health", 0, false)));
    assert!(effects.contains(&("minecraft:weakness", 0, true)));
    assert!(effects.contains(&("minecraft:resistance", 0, true)));
    assert!(effects.iter().all(|&(_, amplifier, _)| amplifier == 0), "{effects:?}");
}

#[test]
fn leaving_the_arena_drops_membership_and_kit_tags() {
    let mut h = Harness::new();
    let p = h.join("alice");
    h.enter_arena(p);

    let tags = &mut h.world_mut().player_mut(p).unwrap().tags;
    tags.insert("kit_sniper".to_owned());
    tags.insert("vip".to_owned());

    h.world_mut().move_player(p, NOWHERE);
    h.scan();

    assert!(!h.server.arena().is_member(p));
    assert!(h.server.arena().protection().is_empty());
    let tags: Vec<_> = h.world().player(p).unwrap().tags.iter().cloned().collect();
    assert_eq!(tags, vec!["vip".to_owned()]);
}

#[test]
fn reentering_without_the_pad_returns_to_spawn() {
    let mut h = Harness::new();
    let p = h.join("alice");
    h.enter_arena(p);

    h.world_mut().move_player(p, LOBBY);
    h.scan();
    assert!(!h.server.arena().is_member(p));

    h.world_mut().move_player(p, INSIDE_ARENA);
    h.scan();

    assert_eq!(h.position(p), SPAWN);
    assert!(!h.server.arena().is_member(p));
}

#[test]
fn lobby_clears_inventory_and_forces_adventure() {
    let mut h = Harness::new();
    let p = h.join("alice");
    h.world_mut().player_mut(p).unwrap().inventory.push("minecraft:diamond_sword".to_owned());

    h.world_mut().move_player(p, LOBBY);
    h.scan();

    let player = h.world().player(p).unwrap();
    assert!(player.inventory.is_empty());
    assert_eq!(player.game_mode, GameMode::Adventure);
    assert!(
        player
            .effects
            .iter()
            .any(|e| e.effect.id() == "minecraft:saturation" && !e.show_particles)
    );
}

#[test]
fn admins_keep_creative_and_inventory_in_lobby() {
    let mut h = Harness::new();
    let op = h.join("op");
    {
        let player = h.world_mut().player_mut(op).unwrap();
        player.game_mode = GameMode::Creative;
        player.inventory.push("minecraft:command_block".to_owned());
    }

    h.world_mut().move_player(op, LOBBY);
    h.scan();

    let player = h.world().player(op).unwrap();
    assert_eq!(player.game_mode, GameMode::Creative);
    assert_eq!(player.inventory, vec!["minecraft:command_block".to_owned()]);
}

#[test]
fn protection_expires_after_five_seconds() {
    let mut h = Harness::new();
    let p = h.join("alice");
    h.enter_arena(p);

    h.world_mut().advance(Duration::from_millis(4900));
    h.ticks(20);
    assert!(h.server.arena().is_protected(h.world(), p));
    assert!(
        !h.subtitles_to(p)
            .iter()
            .any(|s| s.contains("spawn protection has expired"))
    );

    h.world_mut().advance(Duration::from_millis(100));
    h.ticks(10);

    assert!(!h.server.arena().is_protected(h.world(), p));
    assert!(h.server.arena().protection().is_empty());
    assert!(
        h.subtitles_to(p)
            .iter()
            .any(|s| s.contains("spawn protection has expired"))
    );
    assert!(h.sounds_to(p).contains(&"random.anvil_land"));
    assert!(h.server.arena().is_member(p));
}

#[test]
fn blocked_arena_falls_back_to_center_and_warns_operators() {
    let mut h = Harness::new();
    let op = h.join("op");
    let p = h.join("alice");

    let spawn_layer = Volume::new(BlockPos::new(100, 4, 100), BlockPos::new(120, 4, 120));
    h.world_mut()
        .fill(spawn_layer, "minecraft:stone", &FillOptions::default())
        .unwrap();

    h.enter_arena(p);

    assert_eq!(h.position(p), Position::new(110.0, 4.0, 110.0));
    assert!(
        h.messages_to(op)
            .iter()
            .any(|m| m.contains("No free arena spawn after 20 attempts"))
    );
}
