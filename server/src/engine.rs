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

//! Player engine
//!
//! Pure rules over a [`Player`](galycherry_common::Player). Nothing in here
//! touches storage, and every operation either succeeds or returns an
//! [`EngineError`] with the player untouched.

pub mod ability;
pub mod combat;
pub mod crafting;
pub mod equipment;
pub mod error;
pub mod progression;
pub mod status;

pub use combat::CombatReport;
pub use crafting::{Blueprint, TransactionReport};
pub use error::{DefinitionKind, EngineError, EngineResult};
pub use status::Reconciliation;
