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

//! Progression engine
//!
//! ## Level Up
//! A grant is checked against the threshold once. Crossing it raises the
//! level by one, adds [`HEALTH_PER_LEVEL`] maximum health, restores health
//! fully, resets experience to 0 (any remainder is lost) and grows the next
//! threshold by half, rounded down. A single grant never yields more than one
//! level.
//!
//! ## Defeat Rewards
//! ```text
//! experience = max(0, 10 + 5 * enemy_level + 2 * (enemy_level - player_level))
//! gold       = 10 * enemy_level
//! ```

use galycherry_common::Player;

/// Maximum health gained per level
pub const HEALTH_PER_LEVEL: i32 = 20;

/// Add experience and level up once if the threshold is reached.
///
/// Negative grants are ignored. Returns whether the player leveled up.
pub fn grant_experience(player: &mut Player, amount: i32) -> bool {
    player.experience += amount.max(0);

    if player.experience < player.experience_to_level {
        return false;
    }

    player.level += 1;
    player.max_health += HEALTH_PER_LEVEL;
    player.health = player.max_health;
    player.experience = 0;
    player.experience_to_level = player.experience_to_level * 3 / 2;

    tracing::info!(
        "{} reached level {} (next at {})",
        player.name,
        player.level,
        player.experience_to_level
    );
    true
}

/// Experience for defeating an enemy of the given level
pub fn experience_for_defeat(player_level: i32, enemy_level: i32) -> i32 {
    let base = 10 + enemy_level * 5;
    (base + 2 * (enemy_level - player_level)).max(0)
}

/// Gold for defeating an enemy of the given level
pub fn gold_for_defeat(enemy_level: i32) -> i32 {
    enemy_level * 10
}
