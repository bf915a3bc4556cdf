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

//! Galycherry Server
//!
//! Player combat and progression for a turn-based RPG backend. The
//! [`engine`] holds the rules as pure functions over a player. The
//! [`service`] wraps them with storage, per-player locking, events and
//! metrics.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod events;
pub mod persistence;
pub mod service;

pub use catalog::{Catalog, Definitions};
pub use engine::{EngineError, EngineResult};
pub use persistence::{MemoryPlayerStore, PgPlayerStore, PlayerStore, StoreError};
pub use service::{GameService, ServiceError, ServiceResult};
