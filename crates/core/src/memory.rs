//! In-memory implementation of the persistence ports.
//!
//! `MemoryStore` behaves like a small transactional database:
//! - standalone writes through [`UnitOfWork`] are durable immediately;
//! - a [`Session`] works on a private copy of the tables and journals its
//!   writes; `commit` replays the journal against the live tables under one
//!   lock, so either every write lands or none does;
//! - identifiers come from sequences shared by all sessions and are not
//!   reused after a rollback (like PostgreSQL sequences);
//! - account updates are version-checked, both inside the session and again
//!   at commit.
//!
//! [`FailPoint`]s let tests inject backend failures at any step.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tally_shared::types::{AccountNumber, ClientId, TransferId};

use crate::account::Account;
use crate::client::{Client, ClientWithAccount};
use crate::ports::{
    AccountStore, ClientStore, Session, StorageError, StorageResult, TransferStore, UnitOfWork,
};
use crate::transfer::{SettledTransfer, Transfer};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    /// `AccountStore::find_by_number`.
    AccountLookup,
    /// `AccountStore::add`.
    AccountInsert,
    /// `AccountStore::update`.
    AccountUpdate,
    /// `TransferStore::add`.
    TransferInsert,
    /// `TransferStore::all` / `list_for_account`.
    TransferList,
    /// `ClientStore::add`.
    ClientInsert,
    /// `UnitOfWork::begin`.
    Begin,
    /// `Session::save_changes`.
    SaveChanges,
    /// `Session::commit`.
    Commit,
    /// `Session::rollback`.
    Rollback,
}

/// Transaction counters, for assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Sessions opened.
    pub begins: u32,
    /// Sessions committed.
    pub commits: u32,
    /// Sessions rolled back explicitly.
    pub rollbacks: u32,
}

#[derive(Debug, Clone)]
struct ClientRow {
    id: ClientId,
    name: String,
    account_number: AccountNumber,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    accounts: BTreeMap<AccountNumber, Account>,
    clients: BTreeMap<ClientId, ClientRow>,
    transfers: Vec<Transfer>,
}

#[derive(Debug, Clone)]
enum Write {
    InsertAccount(Account),
    UpdateAccount(Account),
    InsertClient(ClientRow),
    InsertTransfer(Transfer),
}

impl Tables {
    fn apply(&mut self, write: Write) -> StorageResult<()> {
        match write {
            Write::InsertAccount(account) => {
                self.accounts.insert(account.number(), account);
            }
            Write::UpdateAccount(account) => {
                let stored = self
                    .accounts
                    .get_mut(&account.number())
                    .ok_or_else(|| StorageError::NotFound(format!("account {}", account.number())))?;
                if stored.version() != account.version() {
                    return Err(StorageError::Conflict(account.number()));
                }
                *stored = Account::restore(account.number(), account.balance(), account.version() + 1);
            }
            Write::InsertClient(row) => {
                if !self.accounts.contains_key(&row.account_number) {
                    return Err(StorageError::NotFound(format!("account {}", row.account_number)));
                }
                if self
                    .clients
                    .values()
                    .any(|existing| existing.account_number == row.account_number)
                {
                    return Err(StorageError::Backend(format!(
                        "account {} already belongs to a client",
                        row.account_number
                    )));
                }
                self.clients.insert(row.id, row);
            }
            Write::InsertTransfer(transfer) => self.transfers.push(transfer),
        }
        Ok(())
    }

    fn with_account(&self, row: &ClientRow) -> StorageResult<ClientWithAccount> {
        let account = self.accounts.get(&row.account_number).cloned().ok_or_else(|| {
            StorageError::NotFound(format!("account {} of client {}", row.account_number, row.id))
        })?;
        Ok(ClientWithAccount {
            client: Client {
                id: row.id,
                name: row.name.clone(),
                account_number: row.account_number,
            },
            account,
        })
    }
}

#[derive(Debug, Default)]
struct Sequences {
    account: AtomicI32,
    client: AtomicI32,
    transfer: AtomicI64,
}

impl Sequences {
    fn next_account(&self) -> AccountNumber {
        AccountNumber::new(self.account.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn next_client(&self) -> ClientId {
        ClientId::new(self.client.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn next_transfer(&self) -> TransferId {
        TransferId::new(self.transfer.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Debug, Default)]
struct Faults {
    /// Number of calls that still succeed before the point starts failing.
    armed: HashMap<FailPoint, u32>,
}

#[derive(Debug, Default)]
struct Shared {
    tables: Mutex<Tables>,
    sequences: Sequences,
    faults: Mutex<Faults>,
    stats: Mutex<SessionStats>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Shared {
    fn check(&self, point: FailPoint) -> StorageResult<()> {
        let mut faults = lock(&self.faults);
        match faults.armed.get_mut(&point) {
            Some(0) => Err(StorageError::Backend(format!("injected failure at {point:?}"))),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Thread-safe in-memory store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call to `point` fail from now on.
    pub fn fail_on(&self, point: FailPoint) {
        self.fail_after(point, 0);
    }

    /// Lets `calls` calls to `point` succeed, then fails every later one.
    pub fn fail_after(&self, point: FailPoint, calls: u32) {
        lock(&self.shared.faults).armed.insert(point, calls);
    }

    /// Removes every injected failure.
    pub fn clear_failures(&self) {
        lock(&self.shared.faults).armed.clear();
    }

    /// Opens an account directly, bypassing the ports.
    pub fn seed_account(&self, balance: Decimal) -> AccountNumber {
        let number = self.shared.sequences.next_account();
        lock(&self.shared.tables)
            .accounts
            .insert(number, Account::restore(number, balance, 0));
        number
    }

    /// Current committed balance of an account.
    #[must_use]
    pub fn balance_of(&self, number: AccountNumber) -> Option<Decimal> {
        lock(&self.shared.tables)
            .accounts
            .get(&number)
            .map(Account::balance)
    }

    /// Committed accounts, ordered by number.
    #[must_use]
    pub fn accounts_snapshot(&self) -> Vec<Account> {
        lock(&self.shared.tables).accounts.values().cloned().collect()
    }

    /// Committed transfer records, in insertion order.
    #[must_use]
    pub fn transfers_snapshot(&self) -> Vec<Transfer> {
        lock(&self.shared.tables).transfers.clone()
    }

    /// Transaction counters.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        *lock(&self.shared.stats)
    }

    fn write(&self, write: Write) -> StorageResult<()> {
        lock(&self.shared.tables).apply(write)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_number(&self, number: AccountNumber) -> StorageResult<Option<Account>> {
        self.shared.check(FailPoint::AccountLookup)?;
        Ok(lock(&self.shared.tables).accounts.get(&number).cloned())
    }

    async fn add(&self, opening_balance: Decimal) -> StorageResult<Account> {
        self.shared.check(FailPoint::AccountInsert)?;
        let account = Account::restore(self.shared.sequences.next_account(), opening_balance, 0);
        self.write(Write::InsertAccount(account.clone()))?;
        Ok(account)
    }

    async fn update(&self, account: &Account) -> StorageResult<()> {
        self.shared.check(FailPoint::AccountUpdate)?;
        self.write(Write::UpdateAccount(account.clone()))
    }
}

#[async_trait]
impl TransferStore for MemoryStore {
    async fn add(&self, transfer: &SettledTransfer) -> StorageResult<Transfer> {
        self.shared.check(FailPoint::TransferInsert)?;
        let record = transfer.to_record(self.shared.sequences.next_transfer());
        self.write(Write::InsertTransfer(record.clone()))?;
        Ok(record)
    }

    async fn all(&self) -> StorageResult<Vec<Transfer>> {
        self.shared.check(FailPoint::TransferList)?;
        Ok(lock(&self.shared.tables).transfers.clone())
    }
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn add(&self, name: &str, account_number: AccountNumber) -> StorageResult<Client> {
        self.shared.check(FailPoint::ClientInsert)?;
        let row = ClientRow {
            id: self.shared.sequences.next_client(),
            name: name.to_string(),
            account_number,
        };
        self.write(Write::InsertClient(row.clone()))?;
        Ok(Client {
            id: row.id,
            name: row.name,
            account_number,
        })
    }

    async fn all(&self) -> StorageResult<Vec<ClientWithAccount>> {
        let tables = lock(&self.shared.tables);
        tables.clients.values().map(|row| tables.with_account(row)).collect()
    }

    async fn find_by_account_number(
        &self,
        number: AccountNumber,
    ) -> StorageResult<Option<ClientWithAccount>> {
        let tables = lock(&self.shared.tables);
        tables
            .clients
            .values()
            .find(|row| row.account_number == number)
            .map(|row| tables.with_account(row))
            .transpose()
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    fn accounts(&self) -> &dyn AccountStore {
        self
    }

    fn transfers(&self) -> &dyn TransferStore {
        self
    }

    fn clients(&self) -> &dyn ClientStore {
        self
    }

    async fn begin(&self) -> StorageResult<Box<dyn Session>> {
        self.shared.check(FailPoint::Begin)?;
        lock(&self.shared.stats).begins += 1;
        let working = lock(&self.shared.tables).clone();
        Ok(Box::new(MemorySession {
            shared: Arc::clone(&self.shared),
            state: Mutex::new(SessionState {
                working,
                journal: Vec::new(),
            }),
        }))
    }
}

#[derive(Debug)]
struct SessionState {
    working: Tables,
    journal: Vec<Write>,
}

/// A transaction over a [`MemoryStore`]. Dropping it discards its writes.
#[derive(Debug)]
pub struct MemorySession {
    shared: Arc<Shared>,
    state: Mutex<SessionState>,
}

impl MemorySession {
    fn write(&self, write: Write) -> StorageResult<()> {
        let mut state = lock(&self.state);
        state.working.apply(write.clone())?;
        state.journal.push(write);
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemorySession {
    async fn find_by_number(&self, number: AccountNumber) -> StorageResult<Option<Account>> {
        self.shared.check(FailPoint::AccountLookup)?;
        Ok(lock(&self.state).working.accounts.get(&number).cloned())
    }

    async fn add(&self, opening_balance: Decimal) -> StorageResult<Account> {
        self.shared.check(FailPoint::AccountInsert)?;
        let account = Account::restore(self.shared.sequences.next_account(), opening_balance, 0);
        self.write(Write::InsertAccount(account.clone()))?;
        Ok(account)
    }

    async fn update(&self, account: &Account) -> StorageResult<()> {
        self.shared.check(FailPoint::AccountUpdate)?;
        self.write(Write::UpdateAccount(account.clone()))
    }
}

#[async_trait]
impl TransferStore for MemorySession {
    async fn add(&self, transfer: &SettledTransfer) -> StorageResult<Transfer> {
        self.shared.check(FailPoint::TransferInsert)?;
        let record = transfer.to_record(self.shared.sequences.next_transfer());
        self.write(Write::InsertTransfer(record.clone()))?;
        Ok(record)
    }

    async fn all(&self) -> StorageResult<Vec<Transfer>> {
        self.shared.check(FailPoint::TransferList)?;
        Ok(lock(&self.state).working.transfers.clone())
    }
}

#[async_trait]
impl ClientStore for MemorySession {
    async fn add(&self, name: &str, account_number: AccountNumber) -> StorageResult<Client> {
        self.shared.check(FailPoint::ClientInsert)?;
        let row = ClientRow {
            id: self.shared.sequences.next_client(),
            name: name.to_string(),
            account_number,
        };
        self.write(Write::InsertClient(row.clone()))?;
        Ok(Client {
            id: row.id,
            name: row.name,
            account_number,
        })
    }

    async fn all(&self) -> StorageResult<Vec<ClientWithAccount>> {
        let state = lock(&self.state);
        let tables = &state.working;
        tables.clients.values().map(|row| tables.with_account(row)).collect()
    }

    async fn find_by_account_number(
        &self,
        number: AccountNumber,
    ) -> StorageResult<Option<ClientWithAccount>> {
        let state = lock(&self.state);
        let tables = &state.working;
        tables
            .clients
            .values()
            .find(|row| row.account_number == number)
            .map(|row| tables.with_account(row))
            .transpose()
    }
}

#[async_trait]
impl Session for MemorySession {
    fn accounts(&self) -> &dyn AccountStore {
        self
    }

    fn transfers(&self) -> &dyn TransferStore {
        self
    }

    fn clients(&self) -> &dyn ClientStore {
        self
    }

    async fn save_changes(&self) -> StorageResult<()> {
        self.shared.check(FailPoint::SaveChanges)
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        self.shared.check(FailPoint::Commit)?;
        let journal = std::mem::take(&mut lock(&self.state).journal);

        let mut live = lock(&self.shared.tables);
        let mut next = live.clone();
        for write in journal {
            next.apply(write)?;
        }
        *live = next;
        drop(live);

        lock(&self.shared.stats).commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StorageResult<()> {
        lock(&self.shared.stats).rollbacks += 1;
        self.shared.check(FailPoint::Rollback)
    }
}
