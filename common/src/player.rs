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

//! Player state shared between the engine and its stores
//!
//! A [`Player`] is owned by the engine for the duration of one request and by
//! the store between requests. It upholds:
//! - `0 <= health <= max_health`
//! - `0 <= stamina <= max_stamina`
//! - `experience < experience_to_level`

use crate::combat::{AbilityId, CombatAbility, StatusEffect};
use crate::item::{Inventory, InventoryItem, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw player attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Strength,
    Dexterity,
    Magic,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Dexterity => "dexterity",
            Attribute::Magic => "magic",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Combat,
    Fishing,
    Cooking,
    Farming,
    Crafting,
    Alchemy,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Combat => "combat",
            Discipline::Fishing => "fishing",
            Discipline::Cooking => "cooking",
            Discipline::Farming => "farming",
            Discipline::Crafting => "crafting",
            Discipline::Alchemy => "alchemy",
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player skill levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    pub combat: i32,
    pub fishing: i32,
    pub cooking: i32,
    pub farming: i32,
    pub crafting: i32,
    pub alchemy: i32,
}

impl Skills {
    /// Every skill at the same level
    pub fn uniform(level: i32) -> Self {
        Self {
            combat: level,
            fishing: level,
            cooking: level,
            farming: level,
            crafting: level,
            alchemy: level,
        }
    }

    pub fn get(&self, discipline: Discipline) -> i32 {
        match discipline {
            Discipline::Combat => self.combat,
            Discipline::Fishing => self.fishing,
            Discipline::Cooking => self.cooking,
            Discipline::Farming => self.farming,
            Discipline::Crafting => self.crafting,
            Discipline::Alchemy => self.alchemy,
        }
    }

    fn get_mut(&mut self, discipline: Discipline) -> &mut i32 {
        match discipline {
            Discipline::Combat => &mut self.combat,
            Discipline::Fishing => &mut self.fishing,
            Discipline::Cooking => &mut self.cooking,
            Discipline::Farming => &mut self.farming,
            Discipline::Crafting => &mut self.crafting,
            Discipline::Alchemy => &mut self.alchemy,
        }
    }

    /// Raise one skill by a single level, returning the new level
    pub fn increment(&mut self, discipline: Discipline) -> i32 {
        let skill = self.get_mut(discipline);
        *skill += 1;
        *skill
    }
}

impl Default for Skills {
    fn default() -> Self {
        Self::uniform(1)
    }
}

/// Quest progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
}

/// Player's record of a quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQuest {
    pub id: u32,
    pub quest_id: u32,
    pub status: QuestStatus,
    pub progress: i32,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub reward: String,
}

/// Player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub stamina: i32,
    pub max_stamina: i32,
    pub level: i32,
    pub experience: i32,
    pub experience_to_level: i32,
    pub gold: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub magic: i32,
    pub skills: Skills,
    pub inventory: Inventory,
    #[serde(default)]
    pub status_effects: Vec<StatusEffect>,
    /// Abilities this player has learned
    #[serde(default)]
    pub abilities: Vec<CombatAbility>,
    #[serde(default)]
    pub equipped_weapon: Option<ItemId>,
    #[serde(default)]
    pub equipped_armor: Option<ItemId>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub active_quests: Vec<PlayerQuest>,
    #[serde(default)]
    pub completed_quests: Vec<PlayerQuest>,
    #[serde(default)]
    pub skill_points: i32,
    #[serde(default)]
    pub skill_cap: i32,
}

impl Player {
    /// Create a fresh level 1 character
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            health: 100,
            max_health: 100,
            stamina: 100,
            max_stamina: 100,
            level: 1,
            experience: 0,
            experience_to_level: 100,
            gold: 50,
            strength: 0,
            dexterity: 0,
            magic: 0,
            skills: Skills::default(),
            inventory: Inventory::new(),
            status_effects: Vec::new(),
            abilities: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            achievements: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            skill_points: 0,
            skill_cap: 100,
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Magic => self.magic,
        }
    }

    pub fn ability(&self, id: AbilityId) -> Option<&CombatAbility> {
        self.abilities.iter().find(|ability| ability.id == id)
    }

    /// Equipped weapon, if it is still held
    pub fn weapon(&self) -> Option<&InventoryItem> {
        self.equipped_weapon.and_then(|id| self.inventory.get(id))
    }

    /// Equipped armor, if it is still held
    pub fn armor(&self) -> Option<&InventoryItem> {
        self.equipped_armor.and_then(|id| self.inventory.get(id))
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
