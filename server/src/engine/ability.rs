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

//! Ability resolver

use super::combat;
use super::error::{DefinitionKind, EngineError, EngineResult};
use chrono::{DateTime, Utc};
use galycherry_common::{AbilityId, CombatAbility, Player, StatusEffect};

/// Check every requirement of an ability without spending anything
pub fn check_requirements(player: &Player, ability: &CombatAbility) -> EngineResult<()> {
    if player.level < ability.required_level {
        return Err(EngineError::LevelTooLow {
            required: ability.required_level,
            current: player.level,
        });
    }

    let stat = player.attribute(ability.required_stat);
    if stat < ability.required_stat_value {
        return Err(EngineError::StatTooLow {
            stat: ability.required_stat,
            required: ability.required_stat_value,
            current: stat,
        });
    }

    if player.stamina < ability.stamina_cost {
        return Err(EngineError::InsufficientStamina {
            required: ability.stamina_cost,
            available: player.stamina,
        });
    }
    Ok(())
}

/// Use a known ability.
///
/// Stamina is only spent once every requirement passed. The returned effect
/// starts at `now` and is not attached to the player.
pub fn use_ability(
    player: &mut Player,
    ability_id: AbilityId,
    now: DateTime<Utc>,
) -> EngineResult<(i32, Option<StatusEffect>)> {
    let ability = player
        .ability(ability_id)
        .cloned()
        .ok_or_else(|| EngineError::not_found(DefinitionKind::Ability, ability_id))?;

    if let Err(err) = check_requirements(player, &ability) {
        tracing::debug!("{} cannot use {}: {}", player.name, ability.name, err);
        return Err(err);
    }

    player.stamina -= ability.stamina_cost;
    let damage = ability.base_damage + combat::attack_damage(player, ability.damage_type);
    let effect = ability
        .status_effect
        .map(|template| template.instantiate(now));

    tracing::debug!(
        "{} used {} for {} damage ({} stamina left)",
        player.name,
        ability.name,
        damage,
        player.stamina
    );
    Ok((damage, effect))
}

/// Teach a player an ability. Returns false if it was already known.
pub fn learn_ability(player: &mut Player, ability: CombatAbility) -> bool {
    if player.ability(ability.id).is_some() {
        return false;
    }
    player.abilities.push(ability);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use galycherry_common::{Attribute, DamageType, StatusEffectKind, StatusEffectTemplate};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap()
    }

    fn fireball() -> CombatAbility {
        CombatAbility {
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
        }
    }

    fn mage() -> Player {
        let mut player = Player::new("Mage");
        player.level = 2;
        player.magic = 4;
        learn_ability(&mut player, fireball());
        player
    }

    #[test]
    fn test_unknown_ability() {
        let mut player = mage();
        let err = use_ability(&mut player, 99, now()).unwrap_err();
        assert_eq!(err, EngineError::not_found(DefinitionKind::Ability, 99));
    }

    #[test]
    fn test_level_checked_before_stat_and_stamina() {
        let mut player = mage();
        player.level = 1;
        player.magic = 0;
        player.stamina = 0;
        let err = use_ability(&mut player, 3, now()).unwrap_err();
        assert_eq!(err, EngineError::LevelTooLow { required: 2, current: 1 });
    }

    #[test]
    fn test_stat_too_low() {
        let mut player = mage();
        player.magic = 3;
        let err = use_ability(&mut player, 3, now()).unwrap_err();
        assert_eq!(
            err,
            EngineError::StatTooLow {
                stat: Attribute::Magic,
                required: 4,
                current: 3
            }
        );
    }

    #[test]
    fn test_insufficient_stamina_spends_nothing() {
        let mut player = mage();
        player.stamina = 14;
        let err = use_ability(&mut player, 3, now()).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientStamina {
                required: 15,
                available: 14
            }
        );
        assert_eq!(player.stamina, 14);
    }

    #[test]
    fn test_successful_use() {
        let mut player = mage();
        let (damage, effect) = use_ability(&mut player, 3, now()).unwrap();

        // 12 base + 5 + combat 1 + 2 * magic 4
        assert_eq!(damage, 26);
        assert_eq!(player.stamina, 85);

        let effect = effect.unwrap();
        assert_eq!(effect.kind, StatusEffectKind::Burning);
        assert_eq!(effect.end_time, now() + Duration::seconds(6));
        assert!(player.status_effects.is_empty());
    }

    #[test]
    fn test_endless_effect_duration() {
        let mut player = mage();
        player.abilities[0].status_effect = Some(StatusEffectTemplate {
            kind: StatusEffectKind::Stunned,
            damage: 0,
            duration: i64::MAX,
        });

        let (_, effect) = use_ability(&mut player, 3, now()).unwrap();
        let effect = effect.unwrap();
        assert_eq!(effect.end_time, DateTime::<Utc>::MAX_UTC);
        assert!(!effect.is_expired(now()));
    }

    #[test]
    fn test_learn_is_idempotent() {
        let mut player = mage();
        assert!(!learn_ability(&mut player, fireball()));
        assert_eq!(player.abilities.len(), 1);
    }
}
