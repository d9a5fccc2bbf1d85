//! Database migration runner for Tally.
//!
//! Reads `DATABASE_URL` from the environment or `.env`.
//!
//! Usage:
//!   migrator up      - Apply the accounts, clients and transfers schema
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show which migrations are applied
//!   migrator fresh   - Drop every table and migrate from scratch

use sea_orm_migration::prelude::*;
use tally_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}
