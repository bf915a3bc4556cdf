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

//! Combat resolver
//!
//! # Formulas
//!
//! ```text
//! attack  = 5 + combat + 2 * stat(damage_type) + weapon.attack
//! defense = 2 + combat / 2 + strength / 2 + dexterity / 3 + armor.defense
//! dealt   = max(1, attack - target_defense)
//! enemy   = max(1, roll[1, max_damage] - combat / 2)
//! ```
//!
//! Damage is floored at 1 so every exchange makes progress. An enemy at or
//! below 30% of its maximum health with a special ability doubles its
//! outgoing damage for the exchange.
//!
//! Each exchange is one request: the enemy is supplied by the caller, mutated
//! in place and handed back. Nothing about the enemy is remembered.

use super::ability;
use super::error::EngineResult;
use super::progression;
use chrono::{DateTime, Utc};
use galycherry_common::{AbilityId, DamageType, Enemy, Player, StatusEffect};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const BASE_ATTACK: i32 = 5;
pub const BASE_DEFENSE: i32 = 2;

/// Fraction of maximum health at which an enemy special ability fires
pub const SPECIAL_ABILITY_THRESHOLD: f64 = 0.3;

/// Outcome of a single player strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: i32,
    pub enemy_health: i32,
}

/// Everything that happened during one exchange, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatReport {
    pub log: Vec<String>,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub enemy_defeated: bool,
    pub player_defeated: bool,
    pub special_ability_used: bool,
    pub experience_gained: i32,
    pub gold_gained: i32,
    pub leveled_up: bool,
    /// Effect produced by an ability. Left for the caller to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflicted_effect: Option<StatusEffect>,
}

/// Player attack damage for a damage type, before target mitigation
pub fn attack_damage(player: &Player, damage_type: DamageType) -> i32 {
    let mut damage = BASE_ATTACK + player.skills.combat;
    damage += player.attribute(damage_type.attribute()) * 2;

    if let Some(weapon) = player.weapon() {
        damage += weapon.stats.attack;
    }
    damage
}

/// Player passive defense
pub fn player_defense(player: &Player) -> i32 {
    let mut defense = BASE_DEFENSE + player.skills.combat / 2;
    defense += player.strength / 2 + player.dexterity / 3;

    if let Some(armor) = player.armor() {
        defense += armor.stats.defense;
    }
    defense
}

/// Damage that gets through a defense. Never below 1.
pub fn effective_damage(attack: i32, defense: i32) -> i32 {
    (attack - defense).max(1)
}

/// Apply incoming damage to a player through passive defense.
///
/// Returns the damage applied.
pub fn take_damage(player: &mut Player, damage: i32) -> i32 {
    let effective = effective_damage(damage, player_defense(player));
    lose_health(player, effective);
    effective
}

/// Subtract health without mitigation, clamping at 0
pub fn lose_health(player: &mut Player, amount: i32) {
    player.health = (player.health - amount.max(0)).max(0);
}

/// Roll the damage an enemy deals to a player.
///
/// The roll is uniform over `[1, max_damage]`, then reduced by half the
/// player's combat skill and floored at 1.
pub fn roll_enemy_damage<R: Rng + ?Sized>(enemy: &Enemy, player: &Player, rng: &mut R) -> i32 {
    let base = rng.random_range(1..=enemy.max_damage.max(1));
    (base - player.skills.combat / 2).max(1)
}

/// Whether the enemy's special ability fires this exchange
pub fn special_ability_triggered(enemy: &Enemy) -> bool {
    enemy.special_ability.is_some()
        && enemy.health <= (enemy.max_health as f64 * SPECIAL_ABILITY_THRESHOLD) as i32
}

/// Strike an enemy, clamping its health at 0
fn strike(enemy: &mut Enemy, damage: i32) {
    enemy.health = (enemy.health - damage).max(0);
}

/// Resolve a player attack against an enemy
pub fn resolve_attack(player: &Player, damage_type: DamageType, enemy: &mut Enemy) -> AttackOutcome {
    let damage = effective_damage(attack_damage(player, damage_type), enemy.defense);
    strike(enemy, damage);
    tracing::debug!(
        "{} hit {} for {} ({} remaining)",
        player.name,
        enemy.name,
        damage,
        enemy.health
    );
    AttackOutcome {
        damage,
        enemy_health: enemy.health,
    }
}

/// Enemy outgoing damage for this exchange, with the special ability applied
fn enemy_outgoing<R: Rng + ?Sized>(
    player: &Player,
    enemy: &Enemy,
    rng: &mut R,
    report: &mut CombatReport,
) -> i32 {
    let mut damage = roll_enemy_damage(enemy, player, rng);
    if special_ability_triggered(enemy) {
        if let Some(special) = &enemy.special_ability {
            report
                .log
                .push(format!("{} uses {}: {}", enemy.name, special.name, special.effect));
            damage *= 2;
            report.special_ability_used = true;
        }
    }
    damage
}

fn check_player_defeated(player: &Player, report: &mut CombatReport) {
    if !player.is_alive() {
        report.player_defeated = true;
        report.log.push("You have been defeated!".to_string());
        tracing::info!("{} was defeated", player.name);
    }
}

/// Enemy attacks the player through passive defense
fn retaliate<R: Rng + ?Sized>(
    player: &mut Player,
    enemy: &Enemy,
    rng: &mut R,
    report: &mut CombatReport,
) {
    let damage = enemy_outgoing(player, enemy, rng, report);
    let taken = take_damage(player, damage);
    report.damage_taken += taken;
    report
        .log
        .push(format!("{} dealt {} damage to you!", enemy.name, taken));
    check_player_defeated(player, report);
}

/// Grant experience and gold for a defeated enemy
fn award_defeat(player: &mut Player, enemy: &Enemy, report: &mut CombatReport) {
    report.enemy_defeated = true;
    report.log.push(format!("You defeated {}!", enemy.name));

    let experience = progression::experience_for_defeat(player.level, enemy.level);
    let gold = progression::gold_for_defeat(enemy.level);
    player.gold += gold;
    report.experience_gained = experience;
    report.gold_gained = gold;
    report.log.push(format!(
        "You gained {} experience and {} gold!",
        experience, gold
    ));

    if progression::grant_experience(player, experience) {
        report.leveled_up = true;
        report
            .log
            .push("Level Up! Your max health has increased!".to_string());
    }
}

/// Basic physical attack. The enemy retaliates if it survives.
pub fn attack<R: Rng + ?Sized>(player: &mut Player, enemy: &mut Enemy, rng: &mut R) -> CombatReport {
    let mut report = CombatReport::default();

    let outcome = resolve_attack(player, DamageType::Physical, enemy);
    report.damage_dealt = outcome.damage;
    report.log.push(format!(
        "You dealt {} damage to {}!",
        outcome.damage, enemy.name
    ));

    if enemy.is_defeated() {
        award_defeat(player, enemy, &mut report);
    } else {
        retaliate(player, enemy, rng, &mut report);
    }
    report
}

/// Defend for a turn. Incoming damage is reduced by twice the player's defense.
pub fn defend<R: Rng + ?Sized>(player: &mut Player, enemy: &Enemy, rng: &mut R) -> CombatReport {
    let mut report = CombatReport::default();

    let defense = player_defense(player) * 2;
    let damage = enemy_outgoing(player, enemy, rng, &mut report);
    let taken = effective_damage(damage, defense);
    lose_health(player, taken);
    report.damage_taken = taken;

    report
        .log
        .push(format!("You defended against {}'s attack!", enemy.name));
    report.log.push(format!("You took {} damage!", taken));
    check_player_defeated(player, &mut report);
    report
}

/// Attack with a learned ability. The enemy retaliates if it survives.
///
/// Any status effect the ability carries is returned in the report and is not
/// attached to anyone.
pub fn ability_attack<R: Rng + ?Sized>(
    player: &mut Player,
    ability_id: AbilityId,
    enemy: &mut Enemy,
    rng: &mut R,
    now: DateTime<Utc>,
) -> EngineResult<CombatReport> {
    let (damage, effect) = ability::use_ability(player, ability_id, now)?;
    let name = player
        .ability(ability_id)
        .map(|ability| ability.name.clone())
        .unwrap_or_default();

    let mut report = CombatReport::default();
    let dealt = effective_damage(damage, enemy.defense);
    strike(enemy, dealt);
    report.damage_dealt = dealt;
    report.log.push(format!(
        "You used {} and dealt {} damage to {}!",
        name, dealt, enemy.name
    ));
    if let Some(effect) = &effect {
        report.log.push(format!(
            "{} inflicts {} for {} seconds!",
            name, effect.kind, effect.duration
        ));
    }
    report.inflicted_effect = effect;

    if enemy.is_defeated() {
        award_defeat(player, enemy, &mut report);
    } else {
        retaliate(player, enemy, rng, &mut report);
    }
    Ok(report)
}
