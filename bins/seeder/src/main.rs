//! Operation type seeder for Tallybook.
//!
//! Applies pending migrations, inserts any missing canonical operation types
//! and prints the resulting catalog. Safe to run any number of times.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tallybook_core::ledger::OperationCatalog;
use tallybook_db::{OperationTypeRepository, migration::Migrator};
use tallybook_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            AppConfig::load()
                .context("DATABASE_URL is not set and configuration could not be loaded")?
                .database
                .url
        }
    };

    println!("Connecting to database...");
    let db = tallybook_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Applying migrations...");
    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    println!("Seeding operation types...");
    let catalog = OperationCatalog::new(Arc::new(OperationTypeRepository::new(db)));
    let report = catalog.seed().await?;
    println!(
        "Inserted {}, already present {}",
        report.inserted.len(),
        report.existing.len()
    );

    for record in catalog.list().await? {
        println!("  {:>2}  {}", record.id, record.description);
    }

    println!("Seeding complete!");
    Ok(())
}
