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

//! Definition catalog
//!
//! Recipes, formulas, abilities and enemy templates. Loaded from YAML, or
//! the built-in content when no file is configured.
//!
//! ```yaml
//! enemies:
//!   - name: Goblin
//!     maxHealth: 50
//!     level: 1
//!     maxDamage: 5
//!     defense: 2
//! recipes: []
//! formulas: []
//! abilities: []
//! ```

use galycherry_common::{
    AbilityId, AlchemyFormula, Attribute, CombatAbility, CraftingRecipe, DamageType, Enemy,
    FormulaId, InventoryItem, ItemCategory, ItemStats, RecipeId, RecipeInput, SpecialAbility,
    StatusEffectKind, StatusEffectTemplate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lookup of game definitions by id or name
pub trait Definitions: Send + Sync {
    fn recipe(&self, id: RecipeId) -> Option<CraftingRecipe>;
    fn formula(&self, id: FormulaId) -> Option<AlchemyFormula>;
    fn ability(&self, id: AbilityId) -> Option<CombatAbility>;
    /// A fresh, fully healed enemy. Names match case-insensitively.
    fn enemy(&self, name: &str) -> Option<Enemy>;
}

/// Enemy as written in a catalog file. Health always starts full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyTemplate {
    pub name: String,
    pub max_health: i32,
    pub level: i32,
    pub max_damage: i32,
    pub defense: i32,
    #[serde(default = "default_attack_speed")]
    pub attack_speed: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_ability: Option<SpecialAbility>,
}

fn default_attack_speed() -> i32 {
    1
}

impl EnemyTemplate {
    pub fn spawn(&self) -> Enemy {
        let mut enemy = Enemy::new(
            self.name.clone(),
            self.max_health,
            self.level,
            self.max_damage,
            self.defense,
        );
        enemy.attack_speed = self.attack_speed;
        enemy.special_ability = self.special_ability.clone();
        enemy
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    enemies: Vec<EnemyTemplate>,
    #[serde(default)]
    recipes: Vec<CraftingRecipe>,
    #[serde(default)]
    formulas: Vec<AlchemyFormula>,
    #[serde(default)]
    abilities: Vec<CombatAbility>,
}

/// In-memory definition catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    enemies: BTreeMap<String, EnemyTemplate>,
    recipes: BTreeMap<RecipeId, CraftingRecipe>,
    formulas: BTreeMap<FormulaId, AlchemyFormula>,
    abilities: BTreeMap<AbilityId, CombatAbility>,
}

impl Catalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a YAML file
    pub fn load(path: &str) -> Result<Catalog, String> {
        let file: CatalogFile = serde_yaml::from_reader(
            std::fs::File::open(path).map_err(|e| format!("Failed to open catalog file: {}", e))?,
        )
        .map_err(|e| format!("Failed to parse catalog file: {}", e))?;

        let mut catalog = Catalog::new();
        file.enemies.into_iter().for_each(|e| catalog.add_enemy(e));
        file.recipes.into_iter().for_each(|r| catalog.add_recipe(r));
        file.formulas.into_iter().for_each(|f| catalog.add_formula(f));
        file.abilities.into_iter().for_each(|a| catalog.add_ability(a));

        tracing::info!(
            "Loaded catalog from {}: {} enemies, {} recipes, {} formulas, {} abilities",
            path,
            catalog.enemies.len(),
            catalog.recipes.len(),
            catalog.formulas.len(),
            catalog.abilities.len()
        );
        Ok(catalog)
    }

    /// Load from a path if one is given, otherwise use the built-in content
    pub fn load_or_builtin(path: Option<&str>) -> Result<Catalog, String> {
        match path {
            Some(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::builtin()),
        }
    }

    pub fn add_enemy(&mut self, enemy: EnemyTemplate) {
        self.enemies.insert(enemy.name.to_lowercase(), enemy);
    }

    pub fn add_recipe(&mut self, recipe: CraftingRecipe) {
        self.recipes.insert(recipe.id, recipe);
    }

    pub fn add_formula(&mut self, formula: AlchemyFormula) {
        self.formulas.insert(formula.id, formula);
    }

    pub fn add_ability(&mut self, ability: CombatAbility) {
        self.abilities.insert(ability.id, ability);
    }

    pub fn enemy_names(&self) -> impl Iterator<Item = &str> {
        self.enemies.values().map(|enemy| enemy.name.as_str())
    }

    /// The stock game content
    pub fn builtin() -> Self {
        let mut catalog = Catalog::new();

        catalog.add_enemy(EnemyTemplate {
            name: "Goblin".to_string(),
            max_health: 50,
            level: 1,
            max_damage: 5,
            defense: 2,
            attack_speed: 2,
            special_ability: None,
        });
        catalog.add_enemy(EnemyTemplate {
            name: "Wolf".to_string(),
            max_health: 75,
            level: 2,
            max_damage: 8,
            defense: 3,
            attack_speed: 3,
            special_ability: Some(SpecialAbility {
                name: "Pack Tactics".to_string(),
                description: "Attacks with increased ferocity when wounded".to_string(),
                cooldown: 3,
                effect: "Deals 50% more damage for 2 turns".to_string(),
            }),
        });
        catalog.add_enemy(EnemyTemplate {
            name: "Orc".to_string(),
            max_health: 100,
            level: 3,
            max_damage: 12,
            defense: 5,
            attack_speed: 1,
            special_ability: Some(SpecialAbility {
                name: "Berserker Rage".to_string(),
                description: "Increases attack power when health is low".to_string(),
                cooldown: 5,
                effect: "Deals double damage when below 30% health".to_string(),
            }),
        });

        catalog.add_recipe(CraftingRecipe {
            id: 1,
            name: "Iron Sword".to_string(),
            description: "A basic iron sword".to_string(),
            skill_level: 5,
            experience: 50,
            materials: vec![RecipeInput::new(1, 2), RecipeInput::new(2, 1)],
            output_item: InventoryItem::new(100, "Iron Sword", 1)
                .with_description("A basic iron sword")
                .with_category(ItemCategory::Weapon)
                .with_stats(ItemStats {
                    attack: 5,
                    durability: 100,
                    ..Default::default()
                }),
        });

        catalog.add_formula(AlchemyFormula {
            id: 1,
            name: "Health Potion".to_string(),
            description: "Restores 20 health".to_string(),
            skill_level: 3,
            experience: 30,
            ingredients: vec![RecipeInput::new(3, 1), RecipeInput::new(4, 1)],
            output_potion: InventoryItem::new(200, "Health Potion", 1)
                .with_description("Restores 20 health")
                .with_category(ItemCategory::Consumable),
        });

        catalog.add_ability(CombatAbility {
            id: 1,
            name: "Power Strike".to_string(),
            description: "A heavy two-handed blow".to_string(),
            damage_type: DamageType::Physical,
            stamina_cost: 10,
            cooldown: 3,
            base_damage: 8,
            status_effect: None,
            required_level: 1,
            required_stat: Attribute::Strength,
            required_stat_value: 0,
        });
        catalog.add_ability(CombatAbility {
            id: 2,
            name: "Aimed Shot".to_string(),
            description: "A carefully placed arrow".to_string(),
            damage_type: DamageType::Ranged,
            stamina_cost: 12,
            cooldown: 4,
            base_damage: 10,
            status_effect: Some(StatusEffectTemplate {
                kind: StatusEffectKind::Bleeding,
                damage: 1,
                duration: 4,
            }),
            required_level: 2,
            required_stat: Attribute::Dexterity,
            required_stat_value: 3,
        });
        catalog.add_ability(CombatAbility {
            id: 3,
            name: "Fireball".to_string(),
            description: "Hurl a ball of fire".to_string(),
            damage_type: DamageType::Magic,
            stamina_cost: 15,
            cooldown: 5,
            base_damage: 12,
            status_effect: Some(StatusEffectTemplate {
                kind: StatusEffectKind::Burning,
                damage: 2,
                duration: 6,
            }),
            required_level: 2,
            required_stat: Attribute::Magic,
            required_stat_value: 4,
        });

        catalog
    }
}

impl Definitions for Catalog {
    fn recipe(&self, id: RecipeId) -> Option<CraftingRecipe> {
        self.recipes.get(&id).cloned()
    }

    fn formula(&self, id: FormulaId) -> Option<AlchemyFormula> {
        self.formulas.get(&id).cloned()
    }

    fn ability(&self, id: AbilityId) -> Option<CombatAbility> {
        self.abilities.get(&id).cloned()
    }

    fn enemy(&self, name: &str) -> Option<Enemy> {
        self.enemies
            .get(&name.to_lowercase())
            .map(EnemyTemplate::spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_enemies() {
        let catalog = Catalog::builtin();

        let goblin = catalog.enemy("goblin").unwrap();
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.health, 50);
        assert_eq!(goblin.defense, 2);
        assert!(goblin.special_ability.is_none());

        let orc = catalog.enemy("Orc").unwrap();
        assert_eq!(orc.health, orc.max_health);
        assert_eq!(orc.special_ability.unwrap().name, "Berserker Rage");

        assert!(catalog.enemy("Dragon").is_none());
        assert_eq!(catalog.enemy_names().count(), 3);
    }

    #[test]
    fn test_builtin_recipes_and_formulas() {
        let catalog = Catalog::builtin();

        let sword = catalog.recipe(1).unwrap();
        assert_eq!(sword.skill_level, 5);
        assert_eq!(sword.experience, 50);
        assert_eq!(sword.output_item.category, ItemCategory::Weapon);

        let potion = catalog.formula(1).unwrap();
        assert_eq!(potion.skill_level, 3);
        assert_eq!(potion.ingredients.len(), 2);
        assert!(catalog.recipe(9).is_none());
    }

    #[test]
    fn test_builtin_abilities() {
        let catalog = Catalog::builtin();
        let fireball = catalog.ability(3).unwrap();
        assert_eq!(fireball.damage_type, DamageType::Magic);
        assert_eq!(
            fireball.status_effect.unwrap().kind,
            StatusEffectKind::Burning
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("catalog.yaml");
        std::fs::write(
            &file_path,
            r#"
enemies:
  - name: Slime
    maxHealth: 20
    level: 1
    maxDamage: 3
    defense: 0
recipes:
  - id: 7
    name: Stone Axe
    skillLevel: 1
    experience: 10
    materials:
      - itemId: 5
        quantity: 2
    outputItem:
      id: 70
      name: Stone Axe
      quantity: 1
      category: weapon
abilities:
  - id: 4
    name: Frost Bolt
    damageType: magic
    staminaCost: 8
    baseDamage: 6
    requiredStat: magic
    statusEffect:
      kind: frozen
      duration: 3
"#,
        )
        .unwrap();

        let catalog = Catalog::load(file_path.to_str().unwrap()).unwrap();

        let slime = catalog.enemy("SLIME").unwrap();
        assert_eq!(slime.health, 20);
        assert_eq!(slime.attack_speed, 1);

        let axe = catalog.recipe(7).unwrap();
        assert_eq!(axe.materials, vec![RecipeInput::new(5, 2)]);
        assert_eq!(axe.output_item.category, ItemCategory::Weapon);

        let bolt = catalog.ability(4).unwrap();
        assert_eq!(bolt.status_effect.unwrap().damage, 0);
        assert!(catalog.formula(1).is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load("non_existent_catalog.yaml");
        assert!(result.unwrap_err().starts_with("Failed to open catalog file"));
    }

    #[test]
    fn test_load_or_builtin() {
        let catalog = Catalog::load_or_builtin(None).unwrap();
        assert!(catalog.enemy("Wolf").is_some());
        let catalog = Catalog::load_or_builtin(Some("")).unwrap();
        assert!(catalog.recipe(1).is_some());
    }
}
