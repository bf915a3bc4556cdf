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

//! Galycherry Common Types
//!
//! This crate defines the canonical data model shared across Galycherry:
//! - Player state (attributes, skills, quests, achievements)
//! - Inventory ledger and item descriptors
//! - Combat definitions (damage types, abilities, status effects, enemies)
//! - Crafting recipes and alchemy formulas

pub mod combat;
pub mod crafting;
pub mod item;
pub mod player;

pub use combat::{
    AbilityId, CombatAbility, DamageType, Enemy, SpecialAbility, StatusEffect, StatusEffectKind,
    StatusEffectTemplate,
};
pub use crafting::{AlchemyFormula, CraftingRecipe, FormulaId, RecipeId, RecipeInput};
pub use item::{Inventory, InventoryItem, ItemCategory, ItemId, ItemStats, Shortfall};
pub use player::{
    Achievement, Attribute, Discipline, Player, PlayerQuest, QuestStatus, Skills,
};
