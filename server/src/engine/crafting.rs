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

//! Crafting and alchemy transactions
//!
//! Recipes and formulas share one protocol:
//! 1. Reject if the discipline skill is below the requirement.
//! 2. Reject if any input is missing or short.
//! 3. Consume every input.
//! 4. Merge the output into the inventory.
//! 5. Grant the experience reward.
//! 6. Raise the discipline skill by one.
//!
//! Validation happens before any mutation, so a rejected transaction leaves
//! the player exactly as it was.

use super::error::{EngineError, EngineResult};
use super::progression;
use galycherry_common::{
    AlchemyFormula, CraftingRecipe, Discipline, InventoryItem, Player, RecipeInput,
};
use serde::{Deserialize, Serialize};

/// Anything that turns inputs into an output through a discipline
pub trait Blueprint {
    fn name(&self) -> &str;
    fn discipline(&self) -> Discipline;
    fn skill_level(&self) -> i32;
    fn inputs(&self) -> &[RecipeInput];
    fn output(&self) -> &InventoryItem;
    fn experience(&self) -> i32;
}

impl Blueprint for CraftingRecipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn discipline(&self) -> Discipline {
        Discipline::Crafting
    }

    fn skill_level(&self) -> i32 {
        self.skill_level
    }

    fn inputs(&self) -> &[RecipeInput] {
        &self.materials
    }

    fn output(&self) -> &InventoryItem {
        &self.output_item
    }

    fn experience(&self) -> i32 {
        self.experience
    }
}

impl Blueprint for AlchemyFormula {
    fn name(&self) -> &str {
        &self.name
    }

    fn discipline(&self) -> Discipline {
        Discipline::Alchemy
    }

    fn skill_level(&self) -> i32 {
        self.skill_level
    }

    fn inputs(&self) -> &[RecipeInput] {
        &self.ingredients
    }

    fn output(&self) -> &InventoryItem {
        &self.output_potion
    }

    fn experience(&self) -> i32 {
        self.experience
    }
}

/// Result of a successful transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReport {
    pub output: InventoryItem,
    pub experience: i32,
    pub skill_level: i32,
    pub leveled_up: bool,
    pub log: Vec<String>,
}

/// Validate without mutating anything
pub fn check<B: Blueprint + ?Sized>(player: &Player, blueprint: &B) -> EngineResult<()> {
    let discipline = blueprint.discipline();
    let current = player.skills.get(discipline);
    if current < blueprint.skill_level() {
        return Err(EngineError::SkillTooLow {
            discipline,
            required: blueprint.skill_level(),
            current,
        });
    }

    if let Some(shortfall) = player.inventory.shortfall(blueprint.inputs()) {
        return Err(shortfall.into());
    }
    Ok(())
}

/// Run the shared transaction protocol
pub fn perform<B: Blueprint + ?Sized>(
    player: &mut Player,
    blueprint: &B,
) -> EngineResult<TransactionReport> {
    if let Err(err) = check(player, blueprint) {
        tracing::warn!("{} cannot make {}: {}", player.name, blueprint.name(), err);
        return Err(err);
    }

    player.inventory.consume_all(blueprint.inputs())?;
    let output = blueprint.output().clone();
    player.inventory.add(output.clone());

    let mut log = Vec::new();
    let verb = match blueprint.discipline() {
        Discipline::Alchemy => "brewed",
        _ => "crafted",
    };
    log.push(format!("Successfully {} {}!", verb, output.name));

    let experience = blueprint.experience();
    let leveled_up = progression::grant_experience(player, experience);
    log.push(format!("You gained {} experience!", experience));
    if leveled_up {
        log.push("Level Up! Your max health has increased!".to_string());
    }

    let skill_level = player.skills.increment(blueprint.discipline());
    log.push(format!(
        "Your {} skill is now {}!",
        blueprint.discipline(),
        skill_level
    ));

    tracing::info!(
        "{} {} {} ({} skill {})",
        player.name,
        verb,
        output.name,
        blueprint.discipline(),
        skill_level
    );

    Ok(TransactionReport {
        output,
        experience,
        skill_level,
        leveled_up,
        log,
    })
}

/// Craft an item from a recipe
pub fn craft(player: &mut Player, recipe: &CraftingRecipe) -> EngineResult<TransactionReport> {
    perform(player, recipe)
}

/// Brew a potion from a formula
pub fn brew(player: &mut Player, formula: &AlchemyFormula) -> EngineResult<TransactionReport> {
    perform(player, formula)
}
