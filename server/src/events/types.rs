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

//! Event type definitions

use galycherry_common::{AbilityId, FormulaId, ItemId, RecipeId, StatusEffectKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the service announces after a committed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    // Combat
    PlayerAttacked {
        player: Uuid,
        enemy: String,
        damage_dealt: i32,
        damage_taken: i32,
    },
    PlayerDefended {
        player: Uuid,
        enemy: String,
        damage_taken: i32,
    },
    EnemyDefeated {
        player: Uuid,
        enemy: String,
        experience: i32,
        gold: i32,
    },
    PlayerDefeated {
        player: Uuid,
        enemy: String,
    },

    // Progression
    LeveledUp {
        player: Uuid,
        new_level: i32,
    },

    // Status effects
    StatusEffectApplied {
        player: Uuid,
        kind: StatusEffectKind,
    },
    StatusEffectExpired {
        player: Uuid,
        kind: StatusEffectKind,
    },

    // Crafting and alchemy
    ItemCrafted {
        player: Uuid,
        recipe: RecipeId,
        item: ItemId,
    },
    PotionBrewed {
        player: Uuid,
        formula: FormulaId,
        item: ItemId,
    },

    // Abilities and equipment
    AbilityLearned {
        player: Uuid,
        ability: AbilityId,
    },
    ItemEquipped {
        player: Uuid,
        item: ItemId,
        slot: String,
    },
}

impl GameEvent {
    /// Player the event concerns
    pub fn player(&self) -> Uuid {
        match self {
            GameEvent::PlayerAttacked { player, .. }
            | GameEvent::PlayerDefended { player, .. }
            | GameEvent::EnemyDefeated { player, .. }
            | GameEvent::PlayerDefeated { player, .. }
            | GameEvent::LeveledUp { player, .. }
            | GameEvent::StatusEffectApplied { player, .. }
            | GameEvent::StatusEffectExpired { player, .. }
            | GameEvent::ItemCrafted { player, .. }
            | GameEvent::PotionBrewed { player, .. }
            | GameEvent::AbilityLearned { player, .. }
            | GameEvent::ItemEquipped { player, .. } => *player,
        }
    }
}
