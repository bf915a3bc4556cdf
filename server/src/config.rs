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

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_env_field::EnvField;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to configuration file",
        default_value = "server/config.yaml"
    )]
    pub config_file: String,

    #[arg(
        short = 'e',
        long = "env",
        help = "Path to environment file",
        default_value = "server/.env"
    )]
    pub env_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create a new level 1 player
    Create { name: String },

    /// Show a stored player
    Show { player: uuid::Uuid },

    /// Attack an enemy
    Attack {
        player: uuid::Uuid,
        enemy: String,
        /// Enemy health carried over from the previous exchange
        #[arg(long)]
        health: Option<i32>,
    },

    /// Defend against an enemy
    Defend {
        player: uuid::Uuid,
        enemy: String,
        #[arg(long)]
        health: Option<i32>,
    },

    /// Attack an enemy with a learned ability
    Ability {
        player: uuid::Uuid,
        ability: u32,
        enemy: String,
        #[arg(long)]
        health: Option<i32>,
    },

    /// Craft an item from a recipe
    Craft { player: uuid::Uuid, recipe: u32 },

    /// Brew a potion from a formula
    Brew { player: uuid::Uuid, formula: u32 },

    /// Learn an ability from the catalog
    Learn { player: uuid::Uuid, ability: u32 },

    /// Equip a held weapon or armor
    Equip {
        player: uuid::Uuid,
        #[arg(value_enum)]
        slot: SlotArg,
        item: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SlotArg {
    Weapon,
    Armor,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub store: EnvField<StoreBackend>,
    /// Catalog file. Empty means the built-in content.
    #[serde(default)]
    pub catalog: EnvField<String>,
}

impl Configuration {
    pub fn load(path: &str) -> Result<Configuration, String> {
        let conf = serde_yaml::from_reader(
            std::fs::File::open(path).map_err(|e| format!("Failed to open config file: {}", e))?,
        )
        .map_err(|e| format!("Failed to parse config file: {}", e))?;

        Ok(conf)
    }

    /// Catalog path, if one is configured
    pub fn catalog_path(&self) -> Option<&str> {
        let path = self.catalog.as_str();
        (!path.is_empty()).then_some(path)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: EnvField<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Where players are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory. State lasts for a single command.
    Memory,
    #[default]
    Postgres,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres => "postgres",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tracing::debug!("Parsing store backend from string: {}", s);
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(format!("Unknown store backend: {}", other)),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
