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

//! Equipment slots
//!
//! A slot holds an item id. The item must sit in the matching inventory
//! bucket when equipped. If it later leaves the inventory the slot simply
//! stops contributing stats.

use super::error::{DefinitionKind, EngineError, EngineResult};
use galycherry_common::{InventoryItem, ItemCategory, ItemId, Player};

fn held(player: &Player, item_id: ItemId, category: ItemCategory) -> EngineResult<InventoryItem> {
    player
        .inventory
        .bucket(category)
        .iter()
        .find(|item| item.id == item_id)
        .cloned()
        .ok_or_else(|| EngineError::not_found(DefinitionKind::Item, item_id))
}

/// Equip a held weapon, replacing any current one
pub fn equip_weapon(player: &mut Player, item_id: ItemId) -> EngineResult<InventoryItem> {
    let item = held(player, item_id, ItemCategory::Weapon)?;
    player.equipped_weapon = Some(item_id);
    tracing::debug!("{} equipped {}", player.name, item.name);
    Ok(item)
}

/// Equip held armor, replacing any current piece
pub fn equip_armor(player: &mut Player, item_id: ItemId) -> EngineResult<InventoryItem> {
    let item = held(player, item_id, ItemCategory::Armor)?;
    player.equipped_armor = Some(item_id);
    tracing::debug!("{} equipped {}", player.name, item.name);
    Ok(item)
}

/// Clear the weapon slot, returning what was in it
pub fn unequip_weapon(player: &mut Player) -> Option<ItemId> {
    player.equipped_weapon.take()
}

/// Clear the armor slot, returning what was in it
pub fn unequip_armor(player: &mut Player) -> Option<ItemId> {
    player.equipped_armor.take()
}
