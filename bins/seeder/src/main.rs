//! Demo data seeder for Tally development.
//!
//! Onboards a few clients with opening balances. Clients whose name already
//! exists are skipped, so the seeder can be re-run.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use rust_decimal::Decimal;
use tally_core::client::ClientService;
use tally_db::DbUnitOfWork;

/// Demo clients and their opening balances, in cents.
const DEMO_CLIENTS: &[(&str, i64)] = &[
    ("Ada Lovelace", 1_250_000),
    ("Grace Hopper", 830_050),
    ("Alan Turing", 12_300),
    ("Edsger Dijkstra", 100),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = tally_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let clients = ClientService::new(Arc::new(DbUnitOfWork::new(db)));

    let existing: Vec<String> = clients
        .list_clients()
        .await?
        .into_iter()
        .map(|c| c.client.name)
        .collect();

    println!("Seeding clients...");
    for (name, cents) in DEMO_CLIENTS {
        if existing.iter().any(|n| n == name) {
            println!("  {name} already exists, skipping...");
            continue;
        }
        let created = clients
            .create_account_and_client(name, Decimal::new(*cents, 2))
            .await
            .with_context(|| format!("Failed to seed {name}"))?;
        println!(
            "  {name}: account {} opened with {}",
            created.account.number(),
            created.account.balance()
        );
    }

    println!("Seeding complete!");
    Ok(())
}
