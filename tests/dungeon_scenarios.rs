mod common;

use common::{place_enemy, place_item, scripted_engine};
use gatecrawl::dungeon::combat::EnemyOutcome;
use gatecrawl::dungeon::types::{FragmentKind, POTION, SHIELD_FRAGMENT, SWORD_FRAGMENT};
use gatecrawl::dungeon::{DungeonError, RoomId, ScriptedDice, ENTRY_ROOM};

const S: &str = "alice";

#[test]
fn blocked_exit_keeps_traveler_in_place() {
    let mut engine = scripted_engine(ScriptedDice::new());
    let reply = engine.move_player(S, "north").expect("valid direction");
    assert!(!reply.moved);
    assert_eq!(reply.room, ENTRY_ROOM);
    assert_eq!(reply.description, "You can't go that way!");
    assert_eq!(engine.game_state(S).current_room, ENTRY_ROOM);
}

#[test]
fn invalid_direction_is_rejected_without_side_effects() {
    let mut engine = scripted_engine(ScriptedDice::new().with_chances([true]));
    let err = engine.move_player(S, "up").unwrap_err();
    assert!(matches!(err, DungeonError::InvalidDirection(ref d) if d == "up"));
    assert!(err.is_rejection());
    assert_eq!(engine.dice_mut().remaining(), (0, 1));
    assert_eq!(engine.game_state(S).current_room, ENTRY_ROOM);
}

#[test]
fn direction_words_must_be_exact_lowercase() {
    let mut engine = scripted_engine(ScriptedDice::new());
    for token in ["South", "SOUTH", " south ", "east\n"] {
        let err = engine.move_player(S, token).unwrap_err();
        assert!(
            matches!(err, DungeonError::InvalidDirection(ref d) if d == token),
            "{:?} should be rejected, got {:?}",
            token,
            err
        );
    }
    assert_eq!(engine.game_state(S).current_room, ENTRY_ROOM);
    assert_eq!(engine.world().counters.spawned(), 0);
}

#[test]
fn entering_guard_room_spawns_enemy_and_item() {
    // enemy chance, Orc, item chance, Potion
    let dice = ScriptedDice::new()
        .with_chances([true, true])
        .with_ints([2, 0]);
    let mut engine = scripted_engine(dice);
    let reply = engine.move_player(S, "south").expect("move");
    assert!(reply.moved);
    assert_eq!(reply.room, RoomId(3));
    assert_eq!(engine.status(S).room, "Guard Room");

    let room = engine.world().rooms.room(RoomId(3)).unwrap();
    assert_eq!(room.enemy.as_ref().map(|e| (e.name.as_str(), e.health)), Some(("Orc", 50)));
    assert_eq!(room.item.as_deref(), Some(POTION));
    assert_eq!(engine.world().counters.spawned(), 1);
    assert!(reply.description.contains("You found a Potion! Type 'pickup' to collect it."));
    assert!(reply.description.ends_with("A wild Orc appears! Type 'Fight' to engage."));
}

#[test]
fn reentry_only_rolls_for_empty_slots() {
    let dice = ScriptedDice::new()
        .with_chances([true, false])
        .with_ints([0]);
    let mut engine = scripted_engine(dice);
    engine.move_player(S, "east").unwrap();
    engine.move_player(S, "west").unwrap();
    // Back into the Hallway: the Goblin is still there, only the item slot rolls.
    engine.dice_mut().push_chance(true);
    engine.dice_mut().push_int(1);
    engine.move_player(S, "east").unwrap();
    let hallway = engine.world().rooms.room(RoomId(2)).unwrap();
    assert_eq!(hallway.enemy.as_ref().unwrap().name, "Goblin");
    assert_eq!(hallway.item.as_deref(), Some(SWORD_FRAGMENT));
    assert_eq!(engine.world().counters.spawned(), 1);
}

#[test]
fn quota_exhausted_stops_enemy_rolls() {
    let mut engine = scripted_engine(ScriptedDice::new());
    for _ in 0..20 {
        engine.world_mut().counters.record_spawn();
    }
    engine.dice_mut().push_chance(false);
    engine.move_player(S, "south").unwrap();
    // Only the item roll was taken.
    assert_eq!(engine.dice_mut().remaining(), (0, 0));
    assert!(engine.world().rooms.room(RoomId(3)).unwrap().enemy.is_none());
}

#[test]
fn full_pack_refuses_pickup() {
    let mut engine = scripted_engine(ScriptedDice::new());
    for _ in 0..3 {
        engine.world_mut().inventory.add(POTION).unwrap();
    }
    place_item(&mut engine, 1, POTION);
    let reply = engine.pickup(S);
    assert_eq!(reply.message, "Traveler can't carry more than 3 Potions!");
    assert_eq!(engine.world().inventory.count("potion"), 3);
    assert_eq!(
        engine.world().rooms.room(ENTRY_ROOM).unwrap().item.as_deref(),
        Some(POTION)
    );
}

#[test]
fn killing_blow_has_no_counter_attack() {
    let mut engine = scripted_engine(ScriptedDice::new().with_ints([15, 9]));
    place_enemy(&mut engine, 1, "Goblin", 10);
    let reply = engine.fight(S);
    let report = reply.combat.expect("fight happened");
    assert_eq!(report.enemy, EnemyOutcome::Defeated);
    assert_eq!(report.damage_taken, 0);
    assert_eq!(engine.world().counters.killed(), 1);
    assert_eq!(engine.game_state(S).health, 100);
    assert!(engine.world().rooms.room(ENTRY_ROOM).unwrap().enemy.is_none());
    assert!(reply.message.contains("The Goblin is defeated!"));
}

#[test]
fn wounded_enemy_strikes_back() {
    let mut engine = scripted_engine(ScriptedDice::new().with_ints([10, 10]));
    place_enemy(&mut engine, 1, "Orc", 50);
    let report = engine.fight(S).combat.expect("fight happened");
    assert_eq!(report.enemy, EnemyOutcome::Wounded { remaining: 40 });
    assert_eq!(engine.game_state(S).health, 90);
    assert_eq!(
        engine.world().rooms.room(ENTRY_ROOM).unwrap().enemy.as_ref().unwrap().health,
        40
    );
}

#[test]
fn heal_without_potions_changes_nothing() {
    let mut engine = scripted_engine(ScriptedDice::new());
    engine.session_mut(S).health = 40;
    let reply = engine.heal(S);
    assert_eq!(reply.message, "Traveler has no potions!");
    assert_eq!(engine.game_state(S).health, 40);
}

#[test]
fn no_enemy_and_nothing_to_pick_up_are_soft() {
    let mut engine = scripted_engine(ScriptedDice::new());
    assert_eq!(engine.fight(S).message, "There's no enemy here.");
    assert_eq!(engine.pickup(S).message, "There's nothing to pick up here.");
    assert!(engine.fight(S).combat.is_none());
}

#[test]
fn fragment_breaks_during_fight() {
    // attack, counter, sword break roll
    let dice = ScriptedDice::new().with_ints([8, 5]).with_chances([true]);
    let mut engine = scripted_engine(dice);
    engine.world_mut().inventory.add(SWORD_FRAGMENT).unwrap();
    place_enemy(&mut engine, 1, "Skeleton", 40);
    let reply = engine.fight(S);
    let report = reply.combat.unwrap();
    assert_eq!(report.damage_dealt, 10);
    assert_eq!(report.broken, vec![FragmentKind::Sword]);
    assert_eq!(engine.world().inventory.count(SWORD_FRAGMENT), 0);
    assert_eq!(engine.world().inventory.count(SHIELD_FRAGMENT), 0);
    assert!(reply.message.contains("One of your Sword Fragment broke"));
}

#[test]
fn both_fragment_kinds_break_in_one_exchange() {
    // attack, counter, sword break roll, shield break roll
    let dice = ScriptedDice::new()
        .with_ints([10, 10])
        .with_chances([true, true]);
    let mut engine = scripted_engine(dice);
    let inventory = &mut engine.world_mut().inventory;
    let old_shield = inventory.add(SHIELD_FRAGMENT).unwrap();
    inventory.add(SWORD_FRAGMENT).unwrap();
    let new_shield = inventory.add(SHIELD_FRAGMENT).unwrap();
    place_enemy(&mut engine, 1, "Dark Mage", 60);

    let reply = engine.fight(S);
    let report = reply.combat.unwrap();
    // 10 * 5/4 with one sword, 10 * 70/100 with two shields
    assert_eq!(report.damage_dealt, 12);
    assert_eq!(report.damage_taken, 7);
    assert_eq!(report.broken, vec![FragmentKind::Sword, FragmentKind::Shield]);

    let inventory = &engine.world().inventory;
    assert_eq!(inventory.count(SWORD_FRAGMENT), 0);
    assert_eq!(inventory.count(SHIELD_FRAGMENT), 1);
    assert_eq!(inventory.oldest(SHIELD_FRAGMENT).unwrap().id, new_shield);
    assert_ne!(old_shield, new_shield);
    assert!(reply
        .message
        .contains("One of your Sword Fragment and Shield Fragment broke during the fight!"));
    assert_eq!(engine.game_state(S).health, 93);
}

#[test]
fn shield_breaks_without_sword_roll() {
    // attack, counter, shield break roll only
    let dice = ScriptedDice::new().with_ints([8, 15]).with_chances([true]);
    let mut engine = scripted_engine(dice);
    engine.world_mut().inventory.add(SHIELD_FRAGMENT).unwrap();
    place_enemy(&mut engine, 1, "Orc", 50);
    let report = engine.fight(S).combat.unwrap();
    assert_eq!(report.damage_taken, 12);
    assert_eq!(report.broken, vec![FragmentKind::Shield]);
    assert_eq!(engine.world().inventory.count(SHIELD_FRAGMENT), 0);
    assert_eq!(engine.dice_mut().remaining(), (0, 0));
}

#[test]
fn restart_clears_world_but_keeps_quota() {
    let dice = ScriptedDice::new().with_chances([true, true]).with_ints([4, 2]);
    let mut engine = scripted_engine(dice);
    engine.start_game(S);
    engine.move_player(S, "south").unwrap();
    engine.pickup(S);
    engine.session_mut(S).health = 12;

    let reply = engine.restart(S);
    assert!(reply.message.contains("returns to the dungeon entrance"));
    let state = engine.game_state(S);
    assert!(!state.started);
    assert_eq!(state.health, 100);
    assert_eq!(state.current_room, ENTRY_ROOM);
    let world = engine.world();
    assert!(world.inventory.is_empty());
    assert_eq!(world.counters.spawned(), 0);
    assert_eq!(world.counters.total(), 20);
    assert!(world.rooms.room(RoomId(3)).unwrap().enemy.is_none());
}

#[test]
fn reset_world_marks_session_not_started() {
    let mut engine = scripted_engine(ScriptedDice::new());
    engine.start_game(S);
    engine.world_mut().inventory.add(POTION).unwrap();
    let reply = engine.reset_world(S);
    assert_eq!(reply.message, "Dungeon reset. Traveler awaits a new adventure!");
    assert!(!engine.game_state(S).started);
    assert!(engine.world().inventory.is_empty());
}

#[test]
fn inventory_is_shared_between_sessions() {
    let mut engine = scripted_engine(ScriptedDice::new());
    place_item(&mut engine, 1, POTION);
    engine.pickup("alice");
    engine.session_mut("bob").health = 50;
    assert!(engine.heal("bob").message.contains("80 HP"));
    assert_eq!(engine.status("alice").inventory_counts.get("potion"), None);
}

#[test]
fn queries_never_mutate() {
    let mut engine = scripted_engine(ScriptedDice::new());
    place_enemy(&mut engine, 1, "Zombie", 35);
    let world_before = engine.world().clone();
    let status = engine.status("ghost");
    let state = engine.game_state("ghost");
    assert_eq!(status.health, 100);
    assert_eq!(status.remaining_enemies, 20);
    assert!(!state.started);
    assert_eq!(engine.world(), &world_before);
    assert!(engine.sessions().get("ghost").is_none());
}
