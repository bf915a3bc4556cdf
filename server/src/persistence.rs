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

//! Player persistence
//!
//! The engine never touches storage. The service loads a player through a
//! [`PlayerStore`], runs the engine on a copy and saves the copy back only
//! when the operation succeeded.

use async_trait::async_trait;
use galycherry_common::Player;
use sqlx::PgPool;
use sqlx::types::Json;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage failures. These are faults, not game outcomes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("player document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Load and save players by id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Player>, StoreError>;
    async fn save(&self, player: &Player) -> Result<(), StoreError>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryPlayerStore {
    players: RwLock<HashMap<Uuid, Player>>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.players.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.players.read().await.is_empty()
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn get(&self, id: Uuid) -> Result<Option<Player>, StoreError> {
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn save(&self, player: &Player) -> Result<(), StoreError> {
        self.players
            .write()
            .await
            .insert(player.id, player.clone());
        Ok(())
    }
}

/// PostgreSQL store. One row per player with the whole player as JSONB.
#[derive(Debug, Clone)]
pub struct PgPlayerStore {
    pool: PgPool,
}

impl PgPlayerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool
    pub fn database(&self) -> &PgPool {
        &self.pool
    }

    /// Create the players table if it does not exist
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS players (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                document JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("players table ready");
        Ok(())
    }
}

#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn get(&self, id: Uuid) -> Result<Option<Player>, StoreError> {
        let row = sqlx::query_as::<_, (Json<Player>,)>(
            r#"
            SELECT document
            FROM players
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(Json(player),)| player))
    }

    async fn save(&self, player: &Player) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO players (id, name, document, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                document = EXCLUDED.document,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(player.id)
        .bind(&player.name)
        .bind(Json(player))
        .execute(&self.pool)
        .await?;

        tracing::debug!("saved player {} ({})", player.name, player.id);
        Ok(())
    }
}
