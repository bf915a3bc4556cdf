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

//! Items and the inventory ledger
//!
//! The [`Inventory`] is a ledger of item identity to quantity, split into four
//! buckets by [`ItemCategory`]. Entries never hold a zero quantity: consuming
//! the last unit of an item removes its entry.

use crate::crafting::RecipeInput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Item identity, shared by definitions and inventory entries
pub type ItemId = u32;

/// Equipment stats. All zero for consumables and materials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
    pub attack: i32,
    pub defense: i32,
    pub magic_power: i32,
    pub durability: i32,
}

/// Inventory bucket an item is filed under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Consumable,
    #[default]
    Material,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "weapon",
            ItemCategory::Armor => "armor",
            ItemCategory::Consumable => "consumable",
            ItemCategory::Material => "material",
        }
    }
}

/// A stack of one item held by a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    #[serde(default)]
    pub category: ItemCategory,
    #[serde(default)]
    pub stats: ItemStats,
}

impl InventoryItem {
    /// Create a material stack with zeroed stats
    pub fn new(id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            quantity,
            category: ItemCategory::Material,
            stats: ItemStats::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_stats(mut self, stats: ItemStats) -> Self {
        self.stats = stats;
        self
    }
}

/// The first input a ledger could not cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("item {item} short: {available} of {required}")]
pub struct Shortfall {
    pub item: ItemId,
    pub required: u32,
    pub available: u32,
}

/// Player inventory ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default)]
    pub weapons: Vec<InventoryItem>,
    #[serde(default)]
    pub armor: Vec<InventoryItem>,
    #[serde(default)]
    pub consumables: Vec<InventoryItem>,
    #[serde(default)]
    pub materials: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, category: ItemCategory) -> &[InventoryItem] {
        match category {
            ItemCategory::Weapon => &self.weapons,
            ItemCategory::Armor => &self.armor,
            ItemCategory::Consumable => &self.consumables,
            ItemCategory::Material => &self.materials,
        }
    }

    fn bucket_mut(&mut self, category: ItemCategory) -> &mut Vec<InventoryItem> {
        match category {
            ItemCategory::Weapon => &mut self.weapons,
            ItemCategory::Armor => &mut self.armor,
            ItemCategory::Consumable => &mut self.consumables,
            ItemCategory::Material => &mut self.materials,
        }
    }

    fn buckets(&self) -> impl Iterator<Item = &InventoryItem> {
        self.weapons
            .iter()
            .chain(self.armor.iter())
            .chain(self.consumables.iter())
            .chain(self.materials.iter())
    }

    /// Find an entry by identity in any bucket
    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.buckets().find(|item| item.id == id)
    }

    /// Quantity held of an item, zero when absent
    pub fn quantity(&self, id: ItemId) -> u32 {
        self.buckets()
            .filter(|item| item.id == id)
            .map(|item| item.quantity)
            .sum()
    }

    pub fn has(&self, id: ItemId, quantity: u32) -> bool {
        self.quantity(id) >= quantity
    }

    /// Number of distinct entries across all buckets
    pub fn len(&self) -> usize {
        self.buckets().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add an item, merging into an existing entry with the same identity.
    pub fn add(&mut self, item: InventoryItem) {
        if item.quantity == 0 {
            return;
        }
        for category in [
            ItemCategory::Weapon,
            ItemCategory::Armor,
            ItemCategory::Consumable,
            ItemCategory::Material,
        ] {
            if let Some(existing) = self
                .bucket_mut(category)
                .iter_mut()
                .find(|existing| existing.id == item.id)
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                return;
            }
        }
        self.bucket_mut(item.category).push(item);
    }

    /// Remove up to `quantity` of an item. Entries reaching zero are dropped.
    pub fn remove(&mut self, id: ItemId, quantity: u32) -> Result<(), Shortfall> {
        let available = self.quantity(id);
        if available < quantity {
            return Err(Shortfall {
                item: id,
                required: quantity,
                available,
            });
        }

        let mut remaining = quantity;
        for category in [
            ItemCategory::Weapon,
            ItemCategory::Armor,
            ItemCategory::Consumable,
            ItemCategory::Material,
        ] {
            let bucket = self.bucket_mut(category);
            for item in bucket.iter_mut().filter(|item| item.id == id) {
                if remaining == 0 {
                    break;
                }
                let taken = item.quantity.min(remaining);
                item.quantity -= taken;
                remaining -= taken;
            }
            bucket.retain(|item| item.quantity > 0);
        }
        Ok(())
    }

    /// Sum requirements per item so repeated entries are checked together.
    fn totals(requirements: &[RecipeInput]) -> BTreeMap<ItemId, u32> {
        let mut totals = BTreeMap::new();
        for requirement in requirements {
            let total: &mut u32 = totals.entry(requirement.item_id).or_default();
            *total = total.saturating_add(requirement.quantity);
        }
        totals
    }

    /// First requirement the ledger cannot cover, if any
    pub fn shortfall(&self, requirements: &[RecipeInput]) -> Option<Shortfall> {
        Self::totals(requirements)
            .into_iter()
            .map(|(item, required)| Shortfall {
                item,
                required,
                available: self.quantity(item),
            })
            .find(|shortfall| shortfall.available < shortfall.required)
    }

    /// Consume every requirement or nothing at all.
    pub fn consume_all(&mut self, requirements: &[RecipeInput]) -> Result<(), Shortfall> {
        if let Some(shortfall) = self.shortfall(requirements) {
            return Err(shortfall);
        }
        for (item, required) in Self::totals(requirements) {
            self.remove(item, required)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add(InventoryItem::new(1, "Iron Ingot", 3));
        inventory.add(InventoryItem::new(2, "Wood", 1));
        inventory.add(
            InventoryItem::new(10, "Iron Sword", 1).with_category(ItemCategory::Weapon),
        );
        inventory
    }

    #[test]
    fn test_add_merges_by_identity() {
        let mut inventory = stocked();
        inventory.add(InventoryItem::new(1, "Iron Ingot", 2));
        assert_eq!(inventory.quantity(1), 5);
        assert_eq!(inventory.materials.len(), 2);
    }

    #[test]
    fn test_add_files_new_items_by_category() {
        let inventory = stocked();
        assert_eq!(inventory.weapons.len(), 1);
        assert_eq!(inventory.bucket(ItemCategory::Weapon)[0].name, "Iron Sword");
        assert!(inventory.bucket(ItemCategory::Armor).is_empty());
    }

    #[test]
    fn test_remove_drops_empty_entries() {
        let mut inventory = stocked();
        inventory.remove(2, 1).unwrap();
        assert!(inventory.get(2).is_none());
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_remove_rejects_overdraw() {
        let mut inventory = stocked();
        let err = inventory.remove(1, 4).unwrap_err();
        assert_eq!(err.required, 4);
        assert_eq!(err.available, 3);
        assert_eq!(inventory.quantity(1), 3);
    }

    #[test]
    fn test_consume_all_is_all_or_nothing() {
        let mut inventory = stocked();
        let before = inventory.clone();
        let requirements = [RecipeInput::new(1, 2), RecipeInput::new(3, 1)];

        let err = inventory.consume_all(&requirements).unwrap_err();
        assert_eq!(err.item, 3);
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_duplicate_requirements_are_summed() {
        let inventory = stocked();
        let requirements = [RecipeInput::new(1, 2), RecipeInput::new(1, 2)];
        let shortfall = inventory.shortfall(&requirements).unwrap();
        assert_eq!(shortfall.required, 4);
        assert_eq!(shortfall.available, 3);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let item = InventoryItem::new(1, "Iron Ingot", 2).with_stats(ItemStats {
            magic_power: 3,
            ..Default::default()
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["stats"]["magicPower"], 3);
        assert_eq!(json["category"], "material");
    }
}
