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

//! Crafting recipes and alchemy formulas

use crate::item::{InventoryItem, ItemId};
use serde::{Deserialize, Serialize};

pub type RecipeId = u32;
pub type FormulaId = u32;

/// One required input of a recipe or formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl RecipeInput {
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// Crafting recipe definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftingRecipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub skill_level: i32,
    pub experience: i32,
    pub materials: Vec<RecipeInput>,
    pub output_item: InventoryItem,
}

/// Alchemy formula definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlchemyFormula {
    pub id: FormulaId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub skill_level: i32,
    pub experience: i32,
    pub ingredients: Vec<RecipeInput>,
    pub output_potion: InventoryItem,
}
