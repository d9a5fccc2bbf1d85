//! Initial schema: accounts, clients and transfers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(CLIENTS_SQL).await?;
        db.execute_unprepared(TRANSFERS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS transfers CASCADE;
             DROP TABLE IF EXISTS clients CASCADE;
             DROP TABLE IF EXISTS accounts CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const ACCOUNTS_SQL: &str = r"
-- Accounts; number is assigned by the database
CREATE TABLE accounts (
    number SERIAL PRIMARY KEY,
    balance NUMERIC NOT NULL DEFAULT 0,
    -- Optimistic concurrency counter, bumped on every balance update
    version BIGINT NOT NULL DEFAULT 0
);
";

const CLIENTS_SQL: &str = r"
-- Clients; each owns exactly one account
CREATE TABLE clients (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    account_number INTEGER NOT NULL UNIQUE REFERENCES accounts(number) ON DELETE CASCADE,
    CONSTRAINT chk_client_name_not_blank CHECK (length(btrim(name)) > 0)
);
";

const TRANSFERS_SQL: &str = r"
-- Transfer attempts, successful or not. Append-only.
-- No foreign keys: rejected attempts may reference unknown accounts.
CREATE TABLE transfers (
    id BIGSERIAL PRIMARY KEY,
    origin_account_number INTEGER NOT NULL,
    destination_account_number INTEGER NOT NULL,
    amount NUMERIC NOT NULL,
    success BOOLEAN NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- History lookups by either side, newest first
CREATE INDEX idx_transfers_origin ON transfers(origin_account_number, created_at DESC, id DESC);
CREATE INDEX idx_transfers_destination ON transfers(destination_account_number, created_at DESC, id DESC);
";
