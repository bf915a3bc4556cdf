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

//! Engine validation errors

use galycherry_common::{Attribute, Discipline, ItemId, Shortfall};
use thiserror::Error;

/// Kind of definition a lookup failed to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Ability,
    Recipe,
    Formula,
    Item,
}

impl std::fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DefinitionKind::Ability => "Ability",
            DefinitionKind::Recipe => "Recipe",
            DefinitionKind::Formula => "Formula",
            DefinitionKind::Item => "Item",
        })
    }
}

/// Expected outcomes of validation. None of these are faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The discipline skill is below the recipe or formula requirement.
    #[error("{discipline} skill level {required} required (current: {current})")]
    SkillTooLow {
        discipline: Discipline,
        required: i32,
        current: i32,
    },

    /// An input is missing from the inventory or held in too small a quantity.
    #[error("Not enough of item {item}: {required} required, {available} available")]
    InsufficientResources {
        item: ItemId,
        required: u32,
        available: u32,
    },

    /// The ability, recipe, formula or item is unknown.
    #[error("{kind} {id} not found")]
    NotFound { kind: DefinitionKind, id: u32 },

    /// The player level is below the ability requirement.
    #[error("Level {required} required (current: {current})")]
    LevelTooLow { required: i32, current: i32 },

    /// The named attribute is below the ability requirement.
    #[error("{stat} {required} required (current: {current})")]
    StatTooLow {
        stat: Attribute,
        required: i32,
        current: i32,
    },

    /// Not enough stamina to pay for the ability.
    #[error("Not enough stamina: {required} required, {available} available")]
    InsufficientStamina { required: i32, available: i32 },
}

impl EngineError {
    pub fn not_found(kind: DefinitionKind, id: u32) -> Self {
        EngineError::NotFound { kind, id }
    }
}

impl From<Shortfall> for EngineError {
    fn from(shortfall: Shortfall) -> Self {
        EngineError::InsufficientResources {
            item: shortfall.item,
            required: shortfall.required,
            available: shortfall.available,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
