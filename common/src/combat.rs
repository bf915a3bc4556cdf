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

//! Combat definitions: damage types, abilities, status effects and enemies

use crate::player::Attribute;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub type AbilityId = u32;

/// Damage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Physical,
    Ranged,
    Magic,
}

impl DamageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Physical => "physical",
            DamageType::Ranged => "ranged",
            DamageType::Magic => "magic",
        }
    }

    /// Attribute that scales attacks of this type
    pub fn attribute(&self) -> Attribute {
        match self {
            DamageType::Physical => Attribute::Strength,
            DamageType::Ranged => Attribute::Dexterity,
            DamageType::Magic => Attribute::Magic,
        }
    }
}

/// Status effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusEffectKind {
    Stunned,
    Poisoned,
    Burning,
    Bleeding,
    Frozen,
    Weakened,
    Strengthened,
    Slowed,
    Hasted,
}

impl StatusEffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusEffectKind::Stunned => "Stunned",
            StatusEffectKind::Poisoned => "Poisoned",
            StatusEffectKind::Burning => "Burning",
            StatusEffectKind::Bleeding => "Bleeding",
            StatusEffectKind::Frozen => "Frozen",
            StatusEffectKind::Weakened => "Weakened",
            StatusEffectKind::Strengthened => "Strengthened",
            StatusEffectKind::Slowed => "Slowed",
            StatusEffectKind::Hasted => "Hasted",
        }
    }
}

impl std::fmt::Display for StatusEffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effect an ability inflicts, before it has been given an end time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffectTemplate {
    pub kind: StatusEffectKind,
    #[serde(default)]
    pub damage: i32,
    /// Seconds
    pub duration: i64,
}

impl StatusEffectTemplate {
    /// Start the effect at `now`.
    ///
    /// Durations past the representable range saturate at the earliest or
    /// latest possible end time.
    pub fn instantiate(&self, now: DateTime<Utc>) -> StatusEffect {
        let end_time = Duration::try_seconds(self.duration)
            .and_then(|duration| now.checked_add_signed(duration))
            .unwrap_or(if self.duration < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });

        StatusEffect {
            kind: self.kind,
            damage: self.damage,
            duration: self.duration,
            end_time,
        }
    }
}

/// Timed effect attached to a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Damage dealt on every reconciliation while active
    #[serde(default)]
    pub damage: i32,
    pub duration: i64,
    pub end_time: DateTime<Utc>,
}

impl StatusEffect {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_time
    }
}

/// Special combat move a player can learn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatAbility {
    pub id: AbilityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub damage_type: DamageType,
    pub stamina_cost: i32,
    /// Seconds. Descriptive, not enforced.
    #[serde(default)]
    pub cooldown: i32,
    pub base_damage: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_effect: Option<StatusEffectTemplate>,
    #[serde(default)]
    pub required_level: i32,
    pub required_stat: Attribute,
    #[serde(default)]
    pub required_stat_value: i32,
}

/// Enemy special move, triggered when the enemy is badly hurt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialAbility {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cooldown: i32,
    pub effect: String,
}

/// Opposing combatant. Supplied by the caller every turn, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub level: i32,
    pub max_damage: i32,
    pub defense: i32,
    #[serde(default)]
    pub attack_speed: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_ability: Option<SpecialAbility>,
}

impl Enemy {
    pub fn new(name: impl Into<String>, max_health: i32, level: i32, max_damage: i32, defense: i32) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            level,
            max_damage,
            defense,
            attack_speed: 1,
            special_ability: None,
        }
    }

    pub fn with_special_ability(mut self, ability: SpecialAbility) -> Self {
        self.special_ability = Some(ability);
        self
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_template_instantiation() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let template = StatusEffectTemplate {
            kind: StatusEffectKind::Burning,
            damage: 3,
            duration: 10,
        };
        let effect = template.instantiate(now);
        assert_eq!(effect.end_time, now + Duration::seconds(10));
        assert!(!effect.is_expired(now));
        assert!(effect.is_expired(now + Duration::seconds(10)));
    }

    #[test]
    fn test_oversized_duration_saturates() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let forever = StatusEffectTemplate {
            kind: StatusEffectKind::Frozen,
            damage: 0,
            duration: i64::MAX / 100,
        };
        let effect = forever.instantiate(now);
        assert_eq!(effect.end_time, DateTime::<Utc>::MAX_UTC);
        assert!(!effect.is_expired(now));

        let long_gone = StatusEffectTemplate {
            duration: i64::MIN / 100,
            ..forever
        };
        let effect = long_gone.instantiate(now);
        assert_eq!(effect.end_time, DateTime::<Utc>::MIN_UTC);
        assert!(effect.is_expired(now));
    }

    #[test]
    fn test_damage_type_names() {
        assert_eq!(DamageType::Physical.as_str(), "physical");
        assert_eq!(DamageType::Ranged.attribute(), Attribute::Dexterity);
        assert_eq!(DamageType::Magic.attribute(), Attribute::Magic);
    }

    #[test]
    fn test_ability_deserializes_wire_shape() {
        let ability: CombatAbility = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Fireball",
                "damageType": "magic",
                "staminaCost": 15,
                "cooldown": 5,
                "baseDamage": 12,
                "statusEffect": {"kind": "burning", "damage": 2, "duration": 6},
                "requiredLevel": 2,
                "requiredStat": "magic",
                "requiredStatValue": 4
            }"#,
        )
        .unwrap();
        assert_eq!(ability.damage_type, DamageType::Magic);
        assert_eq!(ability.required_stat, Attribute::Magic);
        assert_eq!(ability.status_effect.unwrap().kind, StatusEffectKind::Burning);
    }
}
