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

use clap::Parser;
use galycherry_server::catalog::Catalog;
use galycherry_server::config::{Arguments, Command, Configuration, SlotArg, StoreBackend};
use galycherry_server::persistence::{MemoryPlayerStore, PgPlayerStore, PlayerStore};
use galycherry_server::service::{CombatOutcome, GameService};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_combat(outcome: &CombatOutcome) -> Result<(), Box<dyn std::error::Error>> {
    for line in &outcome.log {
        println!("{}", line);
    }
    print_json(outcome)
}

async fn run<S: PlayerStore>(
    service: GameService<S, Catalog>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    service.events().subscribe(|event| {
        tracing::info!("Event: {:?}", event);
    });

    // Enemies are stateless between commands, so carry health in by hand.
    let spawn = |name: &str, health: Option<i32>| {
        service.spawn_enemy(name).map(|mut enemy| {
            if let Some(health) = health {
                enemy.health = health.clamp(0, enemy.max_health);
            }
            enemy
        })
    };

    match command {
        Command::Create { name } => {
            let player = service.create_player(&name).await?;
            println!("Created {} ({})", player.name, player.id);
            print_json(&player)?;
        }
        Command::Show { player } => {
            print_json(&service.player(player).await?)?;
        }
        Command::Attack {
            player,
            enemy,
            health,
        } => {
            let enemy = spawn(&enemy, health)?;
            print_combat(&service.attack(player, enemy).await?)?;
        }
        Command::Defend {
            player,
            enemy,
            health,
        } => {
            let enemy = spawn(&enemy, health)?;
            print_combat(&service.defend(player, enemy).await?)?;
        }
        Command::Ability {
            player,
            ability,
            enemy,
            health,
        } => {
            let enemy = spawn(&enemy, health)?;
            print_combat(&service.use_ability(player, ability, enemy).await?)?;
        }
        Command::Craft { player, recipe } => {
            let outcome = service.craft(player, recipe).await?;
            outcome.report.log.iter().for_each(|line| println!("{}", line));
            print_json(&outcome)?;
        }
        Command::Brew { player, formula } => {
            let outcome = service.brew(player, formula).await?;
            outcome.report.log.iter().for_each(|line| println!("{}", line));
            print_json(&outcome)?;
        }
        Command::Learn { player, ability } => {
            let player = service.learn_ability(player, ability).await?;
            print_json(&player.abilities)?;
        }
        Command::Equip { player, slot, item } => {
            let (_, item) = match slot {
                SlotArg::Weapon => service.equip_weapon(player, item).await?,
                SlotArg::Armor => service.equip_armor(player, item).await?,
            };
            println!("Equipped {}", item.name);
            print_json(&item)?;
        }
    }

    service.events().process_events();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load arguments from the command line
    let arguments: Arguments = Parser::parse();

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables from .env file if specified
    if let Some(ref env_file) = arguments.env_file {
        if std::path::Path::new(env_file).exists() {
            tracing::debug!("Loading environment variables from file: {}", env_file);
            dotenv::from_filename(env_file).ok();
        }
    } else {
        tracing::debug!("Loading environment variables from default file");
        dotenv::dotenv().ok();
    }

    // A missing config file means defaults
    let config = if std::path::Path::new(&arguments.config_file).exists() {
        Configuration::load(&arguments.config_file)?
    } else {
        tracing::debug!("No configuration at {}, using defaults", arguments.config_file);
        Configuration::default()
    };
    tracing::debug!("Configuration loaded: {:?}", config);

    let catalog = Catalog::load_or_builtin(config.catalog_path())?;

    match *config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using the memory store, nothing will outlive this command");
            run(GameService::new(MemoryPlayerStore::new(), catalog), arguments.command).await
        }
        StoreBackend::Postgres => {
            tracing::info!("Connecting to Database at {}", &config.database.url);
            let database = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;

            let store = PgPlayerStore::new(database);
            store.init().await?;
            run(GameService::new(store, catalog), arguments.command).await
        }
    }
}
