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

//! Game service integration tests

use galycherry_common::{InventoryItem, StatusEffectKind, StatusEffectTemplate};
use galycherry_server::catalog::Catalog;
use galycherry_server::engine::{DefinitionKind, EngineError};
use galycherry_server::events::GameEvent;
use galycherry_server::persistence::{MemoryPlayerStore, PlayerStore};
use galycherry_server::service::{GameService, ServiceError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};

fn service() -> GameService<MemoryPlayerStore, Catalog> {
    GameService::with_rng(
        MemoryPlayerStore::new(),
        Catalog::builtin(),
        StdRng::seed_from_u64(2024),
    )
}

#[tokio::test]
async fn test_hunt_until_goblin_falls() {
    let service = service();
    let hero = service.create_player("Hero").await.unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    service.events().subscribe(move |event| {
        sink.lock().unwrap().push(event.clone());
    });

    let mut enemy = service.spawn_enemy("Goblin").unwrap();
    let outcome = loop {
        let outcome = service.attack(hero.id, enemy).await.unwrap();
        if outcome.report.enemy_defeated {
            break outcome;
        }
        enemy = outcome.enemy;
    };

    service.events().process_events();
    let events = seen.lock().unwrap();
    assert!(matches!(
        events.last(),
        Some(GameEvent::EnemyDefeated { experience: 15, gold: 10, .. })
    ));
    assert_eq!(outcome.player.gold, 60);

    let stored = service.player(hero.id).await.unwrap();
    assert_eq!(stored.experience, 15);
    assert_eq!(stored, outcome.player);
}

#[tokio::test]
async fn test_craft_then_equip_through_service() {
    let service = service();
    let mut hero = service.create_player("Hero").await.unwrap();
    hero.skills.crafting = 5;
    hero.inventory.add(InventoryItem::new(1, "Iron Ingot", 2));
    hero.inventory.add(InventoryItem::new(2, "Wood", 1));
    service.store().save(&hero).await.unwrap();

    let outcome = service.craft(hero.id, 1).await.unwrap();
    assert_eq!(outcome.player.skills.crafting, 6);

    let (player, sword) = service.equip_weapon(hero.id, outcome.report.output.id).await.unwrap();
    assert_eq!(sword.name, "Iron Sword");
    assert_eq!(player.equipped_weapon, Some(sword.id));
}

#[tokio::test]
async fn test_failed_operation_leaves_store_untouched() {
    let service = service();
    let hero = service.create_player("Hero").await.unwrap();

    let err = service.brew(hero.id, 1).await.unwrap_err();
    assert!(matches!(err, ServiceError::Engine(EngineError::SkillTooLow { .. })));

    let err = service.use_ability(hero.id, 3, service.spawn_enemy("Wolf").unwrap()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        EngineError::not_found(DefinitionKind::Ability, 3).to_string()
    );

    assert_eq!(service.player(hero.id).await.unwrap(), hero);
}

#[tokio::test]
async fn test_ability_effect_is_reported_not_attached() {
    let service = service();
    let mut hero = service.create_player("Mage").await.unwrap();
    hero.level = 2;
    hero.magic = 4;
    service.store().save(&hero).await.unwrap();
    service.learn_ability(hero.id, 3).await.unwrap();

    let orc = service.spawn_enemy("Orc").unwrap();
    let outcome = service.use_ability(hero.id, 3, orc).await.unwrap();
    let effect = outcome.report.inflicted_effect.unwrap();

    assert_eq!(effect.kind, StatusEffectKind::Burning);
    assert_eq!(outcome.player.stamina, 85);
    assert!(outcome.player.status_effects.is_empty());
    // 26 attack against Orc defense 5
    assert_eq!(outcome.enemy.health, 79);
}

#[tokio::test]
async fn test_active_poison_ticks_before_exchange() {
    let service = service();
    let hero = service.create_player("Hero").await.unwrap();
    let poison = StatusEffectTemplate {
        kind: StatusEffectKind::Poisoned,
        damage: 6,
        duration: 600,
    };
    service
        .apply_status_effect(hero.id, poison.instantiate(chrono::Utc::now()))
        .await
        .unwrap();

    let goblin = service.spawn_enemy("Goblin").unwrap();
    let outcome = service.defend(hero.id, goblin).await.unwrap();

    assert_eq!(outcome.log[0], "Poisoned deals 4 damage to you!");
    assert_eq!(outcome.player.status_effects.len(), 1);
    assert_eq!(outcome.player.health, 100 - 4 - outcome.report.damage_taken);
}

#[test]
fn test_unknown_player_outside_runtime_macro() {
    let service = service();
    let missing = uuid::Uuid::new_v4();
    let result = tokio_test::block_on(service.player(missing));
    assert!(matches!(result, Err(ServiceError::PlayerNotFound(id)) if id == missing));
}
