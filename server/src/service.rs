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

//! Game service
//!
//! Every mutating operation runs under a per-player lock:
//! load, reconcile status effects (combat only), run the engine, save.
//! The engine works on the loaded copy, so a rejected operation is never
//! saved and the stored player stays as it was.

use crate::catalog::Definitions;
use crate::engine::combat::{self, CombatReport};
use crate::engine::crafting::{self, TransactionReport};
use crate::engine::error::{DefinitionKind, EngineError};
use crate::engine::{ability, equipment, status};
use crate::events::{EventBus, GameEvent};
use crate::persistence::{PlayerStore, StoreError};
use chrono::Utc;
use dashmap::DashMap;
use galycherry_common::{
    AbilityId, Enemy, FormulaId, InventoryItem, ItemId, Player, RecipeId, StatusEffect,
};
use metrics::counter;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("player {0} not found")]
    PlayerNotFound(Uuid),

    #[error("unknown enemy: {0}")]
    UnknownEnemy(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Updated state after a combat exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatOutcome {
    pub player: Player,
    pub enemy: Enemy,
    /// Status effect lines followed by the exchange lines
    pub log: Vec<String>,
    pub report: CombatReport,
}

/// Updated state after a craft or brew
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    pub player: Player,
    pub report: TransactionReport,
}

/// Which equipment slot an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Weapon,
    Armor,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Weapon => "weapon",
            Slot::Armor => "armor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exchange {
    Attack,
    Defend,
    Ability,
}

impl Exchange {
    fn as_str(&self) -> &'static str {
        match self {
            Exchange::Attack => "attack",
            Exchange::Defend => "defend",
            Exchange::Ability => "ability",
        }
    }
}

pub struct GameService<S, D> {
    store: S,
    definitions: D,
    events: EventBus,
    locks: DashMap<Uuid, Arc<tokio::sync::Mutex<()>>>,
    rng: Mutex<StdRng>,
}

impl<S: PlayerStore, D: Definitions> GameService<S, D> {
    pub fn new(store: S, definitions: D) -> Self {
        Self::with_rng(store, definitions, StdRng::from_os_rng())
    }

    /// Build a service with a fixed random source
    pub fn with_rng(store: S, definitions: D, rng: StdRng) -> Self {
        Self {
            store,
            definitions,
            events: EventBus::new(),
            locks: DashMap::new(),
            rng: Mutex::new(rng),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn definitions(&self) -> &D {
        &self.definitions
    }

    fn lock_for(&self, id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        self.locks.entry(id).or_default().value().clone()
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn load(&self, id: Uuid) -> ServiceResult<Player> {
        self.store
            .get(id)
            .await?
            .ok_or(ServiceError::PlayerNotFound(id))
    }

    /// Load, mutate and save one player under its lock
    async fn mutate<T, F>(&self, id: Uuid, operation: F) -> ServiceResult<(Player, T)>
    where
        F: FnOnce(&mut Player) -> Result<T, EngineError>,
    {
        let result = {
            let lock = self.lock_for(id);
            let _guard = lock.lock().await;

            self.apply(id, operation).await
        };

        // Nobody else is waiting on this player, forget its lock
        self.locks
            .remove_if(&id, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    async fn apply<T, F>(&self, id: Uuid, operation: F) -> ServiceResult<(Player, T)>
    where
        F: FnOnce(&mut Player) -> Result<T, EngineError>,
    {
        let mut player = self.load(id).await?;
        let value = operation(&mut player)?;
        self.store.save(&player).await?;
        Ok((player, value))
    }

    /// Create and store a fresh level 1 player
    pub async fn create_player(&self, name: &str) -> ServiceResult<Player> {
        let player = Player::new(name);
        self.store.save(&player).await?;
        counter!("galycherry_players_created_total").increment(1);
        tracing::info!("Created player {} ({})", player.name, player.id);
        Ok(player)
    }

    pub async fn player(&self, id: Uuid) -> ServiceResult<Player> {
        self.load(id).await
    }

    /// A fresh enemy from the catalog
    pub fn spawn_enemy(&self, name: &str) -> ServiceResult<Enemy> {
        self.definitions
            .enemy(name)
            .ok_or_else(|| ServiceError::UnknownEnemy(name.to_string()))
    }

    fn publish_expired(&self, player: &Player, expired: &[StatusEffect]) {
        for effect in expired {
            self.events.publish(GameEvent::StatusEffectExpired {
                player: player.id,
                kind: effect.kind,
            });
        }
    }

    fn publish_combat(&self, exchange: Exchange, player: &Player, enemy: &Enemy, report: &CombatReport) {
        counter!("galycherry_combat_exchanges_total", "action" => exchange.as_str()).increment(1);

        let event = match exchange {
            Exchange::Defend => GameEvent::PlayerDefended {
                player: player.id,
                enemy: enemy.name.clone(),
                damage_taken: report.damage_taken,
            },
            _ => GameEvent::PlayerAttacked {
                player: player.id,
                enemy: enemy.name.clone(),
                damage_dealt: report.damage_dealt,
                damage_taken: report.damage_taken,
            },
        };
        self.events.publish(event);

        if report.enemy_defeated {
            counter!("galycherry_enemies_defeated_total").increment(1);
            self.events.publish(GameEvent::EnemyDefeated {
                player: player.id,
                enemy: enemy.name.clone(),
                experience: report.experience_gained,
                gold: report.gold_gained,
            });
        }
        if report.player_defeated {
            self.events.publish(GameEvent::PlayerDefeated {
                player: player.id,
                enemy: enemy.name.clone(),
            });
        }
        self.publish_level_up(player, report.leveled_up);
    }

    fn publish_level_up(&self, player: &Player, leveled_up: bool) {
        if leveled_up {
            counter!("galycherry_level_ups_total").increment(1);
            self.events.publish(GameEvent::LeveledUp {
                player: player.id,
                new_level: player.level,
            });
        }
    }

    async fn exchange<F>(
        &self,
        id: Uuid,
        exchange: Exchange,
        mut enemy: Enemy,
        resolve: F,
    ) -> ServiceResult<CombatOutcome>
    where
        F: FnOnce(&mut Player, &mut Enemy, &mut StdRng) -> Result<CombatReport, EngineError>,
    {
        let (player, (reconciliation, report)) = self
            .mutate(id, |player| {
                let reconciliation = status::reconcile(player, Utc::now());
                let report = resolve(player, &mut enemy, &mut *self.rng())?;
                Ok((reconciliation, report))
            })
            .await?;

        self.publish_expired(&player, &reconciliation.expired);
        self.publish_combat(exchange, &player, &enemy, &report);

        let mut log = reconciliation.log;
        log.extend(report.log.iter().cloned());
        Ok(CombatOutcome {
            player,
            enemy,
            log,
            report,
        })
    }

    /// Basic attack against a caller supplied enemy
    pub async fn attack(&self, id: Uuid, enemy: Enemy) -> ServiceResult<CombatOutcome> {
        self.exchange(id, Exchange::Attack, enemy, |player, enemy, rng| {
            Ok(combat::attack(player, enemy, rng))
        })
        .await
    }

    pub async fn defend(&self, id: Uuid, enemy: Enemy) -> ServiceResult<CombatOutcome> {
        self.exchange(id, Exchange::Defend, enemy, |player, enemy, rng| {
            Ok(combat::defend(player, enemy, rng))
        })
        .await
    }

    /// Attack with a learned ability
    pub async fn use_ability(
        &self,
        id: Uuid,
        ability_id: AbilityId,
        enemy: Enemy,
    ) -> ServiceResult<CombatOutcome> {
        self.exchange(id, Exchange::Ability, enemy, |player, enemy, rng| {
            combat::ability_attack(player, ability_id, enemy, rng, Utc::now())
        })
        .await
    }

    pub async fn craft(&self, id: Uuid, recipe_id: RecipeId) -> ServiceResult<TransactionOutcome> {
        let recipe = self
            .definitions
            .recipe(recipe_id)
            .ok_or_else(|| EngineError::not_found(DefinitionKind::Recipe, recipe_id))?;

        let (player, report) = self
            .mutate(id, |player| crafting::craft(player, &recipe))
            .await?;

        counter!("galycherry_items_crafted_total").increment(1);
        self.events.publish(GameEvent::ItemCrafted {
            player: player.id,
            recipe: recipe_id,
            item: report.output.id,
        });
        self.publish_level_up(&player, report.leveled_up);
        Ok(TransactionOutcome { player, report })
    }

    pub async fn brew(&self, id: Uuid, formula_id: FormulaId) -> ServiceResult<TransactionOutcome> {
        let formula = self
            .definitions
            .formula(formula_id)
            .ok_or_else(|| EngineError::not_found(DefinitionKind::Formula, formula_id))?;

        let (player, report) = self
            .mutate(id, |player| crafting::brew(player, &formula))
            .await?;

        counter!("galycherry_potions_brewed_total").increment(1);
        self.events.publish(GameEvent::PotionBrewed {
            player: player.id,
            formula: formula_id,
            item: report.output.id,
        });
        self.publish_level_up(&player, report.leveled_up);
        Ok(TransactionOutcome { player, report })
    }

    /// Teach a catalog ability. Learning a known ability changes nothing.
    pub async fn learn_ability(&self, id: Uuid, ability_id: AbilityId) -> ServiceResult<Player> {
        let definition = self
            .definitions
            .ability(ability_id)
            .ok_or_else(|| EngineError::not_found(DefinitionKind::Ability, ability_id))?;

        let (player, learned) = self
            .mutate(id, |player| Ok(ability::learn_ability(player, definition)))
            .await?;

        if learned {
            self.events.publish(GameEvent::AbilityLearned {
                player: player.id,
                ability: ability_id,
            });
        }
        Ok(player)
    }

    async fn equip(&self, id: Uuid, slot: Slot, item_id: ItemId) -> ServiceResult<(Player, InventoryItem)> {
        let (player, item) = self
            .mutate(id, |player| match slot {
                Slot::Weapon => equipment::equip_weapon(player, item_id),
                Slot::Armor => equipment::equip_armor(player, item_id),
            })
            .await?;

        self.events.publish(GameEvent::ItemEquipped {
            player: player.id,
            item: item_id,
            slot: slot.as_str().to_string(),
        });
        Ok((player, item))
    }

    pub async fn equip_weapon(&self, id: Uuid, item_id: ItemId) -> ServiceResult<(Player, InventoryItem)> {
        self.equip(id, Slot::Weapon, item_id).await
    }

    pub async fn equip_armor(&self, id: Uuid, item_id: ItemId) -> ServiceResult<(Player, InventoryItem)> {
        self.equip(id, Slot::Armor, item_id).await
    }

    pub async fn apply_status_effect(&self, id: Uuid, effect: StatusEffect) -> ServiceResult<Player> {
        let kind = effect.kind;
        let (player, ()) = self
            .mutate(id, |player| {
                status::apply_status_effect(player, effect);
                Ok(())
            })
            .await?;

        self.events.publish(GameEvent::StatusEffectApplied {
            player: player.id,
            kind,
        });
        Ok(player)
    }
}
