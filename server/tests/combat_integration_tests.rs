//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Combat resolver integration tests

use galycherry_common::{DamageType, Enemy, InventoryItem, ItemCategory, ItemStats, Player, Skills};
use galycherry_server::catalog::{Catalog, Definitions};
use galycherry_server::engine::{ability, combat, equipment};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn goblin() -> Enemy {
    Catalog::builtin().enemy("Goblin").unwrap()
}

#[test]
fn test_base_attack_against_goblin() {
    let mut player = Player::new("Hero");
    player.skills = Skills::uniform(0);
    let mut enemy = goblin();

    assert_eq!(combat::attack_damage(&player, DamageType::Physical), 5);
    let outcome = combat::resolve_attack(&player, DamageType::Physical, &mut enemy);
    assert_eq!(outcome.damage, 3);
    assert_eq!(enemy.health, 47);
}

#[test]
fn test_default_hero_against_goblin() {
    let player = Player::new("Hero");
    let mut enemy = goblin();

    let outcome = combat::resolve_attack(&player, DamageType::Physical, &mut enemy);
    assert_eq!(outcome.damage, 4);
    assert_eq!(outcome.enemy_health, 46);
}

#[test]
fn test_berserker_rage_doubles_roll() {
    let mut player = Player::new("Hero");
    let mut orc = Catalog::builtin().enemy("Orc").unwrap();
    orc.health = 25;

    let mut rng = StdRng::seed_from_u64(42);
    let mut probe = rng.clone();
    let roll = combat::roll_enemy_damage(&orc, &player, &mut probe);
    let expected = combat::effective_damage(roll * 2, combat::player_defense(&player) * 2);

    let report = combat::defend(&mut player, &orc, &mut rng);
    assert!(report.special_ability_used);
    assert_eq!(report.damage_taken, expected);
    assert_eq!(player.health, 100 - expected);
    assert_eq!(
        report.log[0],
        "Orc uses Berserker Rage: Deals double damage when below 30% health"
    );
}

#[test]
fn test_special_ability_dormant_above_threshold() {
    let mut player = Player::new("Hero");
    let mut orc = Catalog::builtin().enemy("Orc").unwrap();
    orc.health = 31;

    let mut rng = StdRng::seed_from_u64(3);
    let report = combat::defend(&mut player, &orc, &mut rng);
    assert!(!report.special_ability_used);
}

#[test]
fn test_fight_goblin_to_victory() {
    let mut player = Player::new("Hero");
    let mut enemy = goblin();
    let mut rng = StdRng::seed_from_u64(11);

    let mut rounds = 0;
    let report = loop {
        rounds += 1;
        let report = combat::attack(&mut player, &mut enemy, &mut rng);
        if report.enemy_defeated {
            break report;
        }
        assert!(!report.player_defeated);
        assert_eq!(report.log.len(), 2);
    };

    assert_eq!(rounds, 13);
    assert_eq!(enemy.health, 0);
    assert_eq!(report.experience_gained, 15);
    assert_eq!(report.gold_gained, 10);
    assert_eq!(player.experience, 15);
    assert_eq!(player.gold, 60);
    assert!(player.is_alive());
}

#[test]
fn test_defeat_grants_level_up() {
    let mut player = Player::new("Hero");
    player.experience = 90;
    player.health = 30;
    let mut enemy = goblin();
    enemy.health = 1;

    let mut rng = StdRng::seed_from_u64(5);
    let report = combat::attack(&mut player, &mut enemy, &mut rng);

    assert!(report.enemy_defeated);
    assert!(report.leveled_up);
    assert_eq!(player.level, 2);
    assert_eq!(player.max_health, 120);
    assert_eq!(player.health, 120);
    assert_eq!(player.experience, 0);
    assert_eq!(report.damage_taken, 0);
    assert_eq!(
        report.log.last().unwrap(),
        "Level Up! Your max health has increased!"
    );
}

#[test]
fn test_player_can_be_defeated() {
    let mut player = Player::new("Hero");
    player.health = 1;
    let mut enemy = goblin();

    let mut rng = StdRng::seed_from_u64(9);
    let report = combat::attack(&mut player, &mut enemy, &mut rng);

    assert!(report.player_defeated);
    assert_eq!(player.health, 0);
    assert_eq!(report.log.last().unwrap(), "You have been defeated!");
}

#[test]
fn test_equipment_changes_the_exchange() {
    let mut player = Player::new("Hero");
    player.inventory.add(
        InventoryItem::new(100, "Iron Sword", 1)
            .with_category(ItemCategory::Weapon)
            .with_stats(ItemStats {
                attack: 5,
                ..Default::default()
            }),
    );
    equipment::equip_weapon(&mut player, 100).unwrap();

    let mut enemy = goblin();
    let outcome = combat::resolve_attack(&player, DamageType::Physical, &mut enemy);
    assert_eq!(outcome.damage, 9);

    // Losing the item drops its bonus even though the slot still names it
    player.inventory.remove(100, 1).unwrap();
    assert_eq!(player.equipped_weapon, Some(100));
    assert_eq!(
        combat::attack_damage(&player, DamageType::Physical),
        6
    );
}

#[test]
fn test_fireball_inflicts_burning() {
    let catalog = Catalog::builtin();
    let mut player = Player::new("Mage");
    player.level = 2;
    player.magic = 4;
    ability::learn_ability(&mut player, catalog.ability(3).unwrap());

    let mut enemy = Enemy::new("Training Dummy", 200, 1, 1, 0);
    let mut rng = StdRng::seed_from_u64(1);
    let report =
        combat::ability_attack(&mut player, 3, &mut enemy, &mut rng, chrono::Utc::now()).unwrap();

    assert_eq!(report.damage_dealt, 26);
    assert_eq!(enemy.health, 174);
    assert_eq!(player.stamina, 85);
    assert_eq!(report.log[0], "You used Fireball and dealt 26 damage to Training Dummy!");
    assert_eq!(report.log[1], "Fireball inflicts Burning for 6 seconds!");
    assert!(report.inflicted_effect.is_some());
    assert!(player.status_effects.is_empty());
}
