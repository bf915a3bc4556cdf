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

//! Status effect tracker

use super::combat;
use chrono::{DateTime, Utc};
use galycherry_common::{Player, StatusEffect};

/// Result of reconciling a player's effects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Effects that ran out and were dropped
    pub expired: Vec<StatusEffect>,
    /// Total periodic damage applied
    pub damage_taken: i32,
    pub log: Vec<String>,
}

/// Attach an effect to a player
pub fn apply_status_effect(player: &mut Player, effect: StatusEffect) {
    tracing::debug!("{} is now {}", player.name, effect.kind);
    player.status_effects.push(effect);
}

/// Expire finished effects and apply periodic damage from the rest.
///
/// Periodic damage goes through passive defense like any other hit.
pub fn reconcile(player: &mut Player, now: DateTime<Utc>) -> Reconciliation {
    let mut reconciliation = Reconciliation::default();

    let (expired, active): (Vec<_>, Vec<_>) = std::mem::take(&mut player.status_effects)
        .into_iter()
        .partition(|effect| effect.is_expired(now));

    for effect in active.iter().filter(|effect| effect.damage > 0) {
        let taken = combat::take_damage(player, effect.damage);
        reconciliation.damage_taken += taken;
        reconciliation
            .log
            .push(format!("{} deals {} damage to you!", effect.kind, taken));
    }

    for effect in &expired {
        reconciliation
            .log
            .push(format!("{} has worn off.", effect.kind));
    }

    player.status_effects = active;
    reconciliation.expired = expired;
    reconciliation
}
