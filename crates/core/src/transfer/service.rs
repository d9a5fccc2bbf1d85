//! Transfer engine.
//!
//! Validates an attempt, records rejections, and moves balances atomically.

use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::ConfigurationSource;
use tally_shared::types::AccountNumber;
use tracing::{error, info, warn};

use super::audit::AuditRecorder;
use super::error::TransferError;
use super::policy::{Rejection, TransferLimits, TransferPolicy};
use super::types::{AccountRole, Transfer, TransferRequest};
use crate::account::Account;
use crate::ports::{UnitOfWork, with_transaction};

/// Accounts that passed validation.
struct Validated {
    origin: Account,
    /// `None` for a self-transfer.
    destination: Option<Account>,
}

/// Funds-transfer service.
///
/// Holds no per-request state; every attempt reloads the limits and the
/// accounts it touches.
pub struct TransferService {
    uow: Arc<dyn UnitOfWork>,
    config: Arc<dyn ConfigurationSource>,
}

/// Orders two accounts by ascending number.
///
/// Concurrent transfers in opposite directions then lock rows in the same order.
pub(super) fn in_lock_order(first: Account, second: Account) -> [Account; 2] {
    if first.number() <= second.number() {
        [first, second]
    } else {
        [second, first]
    }
}

impl TransferService {
    /// Creates a service over a unit of work and a configuration source.
    #[must_use]
    pub fn new(uow: Arc<dyn UnitOfWork>, config: Arc<dyn ConfigurationSource>) -> Self {
        Self { uow, config }
    }

    /// Moves `amount` from `origin` to `destination`.
    ///
    /// Rejected attempts are recorded with `success = false` before the
    /// rejection is returned. A committed [`Transfer`] is returned only after
    /// both balance updates and the record landed in one transaction.
    ///
    /// # Errors
    ///
    /// - `AmountOutOfRange`, `AccountNotFound`, `TransferNotAllowed` for
    ///   rejected attempts
    /// - `MissingConfiguration` / `InvalidConfiguration` if the limits cannot
    ///   be read (nothing is recorded)
    /// - `ConcurrentModification` if an account changed since it was loaded
    /// - `Unexpected` for storage failures
    pub async fn create_transfer(
        &self,
        origin: AccountNumber,
        destination: AccountNumber,
        amount: Decimal,
    ) -> Result<Transfer, TransferError> {
        self.execute(TransferRequest::new(origin, destination, amount)).await
    }

    /// Evaluates and settles a pending request.
    pub async fn execute(&self, request: TransferRequest) -> Result<Transfer, TransferError> {
        let limits = TransferLimits::from_source(self.config.as_ref())?;

        match self.validate(&limits, &request).await? {
            Ok(validated) => self.commit(request, validated).await,
            Err(rejection) => Err(self.reject(request, rejection).await),
        }
    }

    /// Transfers touching `number`, newest first.
    pub async fn list_transfers_for_account(
        &self,
        number: AccountNumber,
    ) -> Result<Vec<Transfer>, TransferError> {
        Ok(self.uow.transfers().list_for_account(number).await?)
    }

    /// Runs the policy checks in order. The outer error is operational, the
    /// inner one is a rejection to be recorded.
    async fn validate(
        &self,
        limits: &TransferLimits,
        request: &TransferRequest,
    ) -> Result<Result<Validated, Rejection>, TransferError> {
        if let Err(rejection) = TransferPolicy::check_amount(limits, request.amount) {
            return Ok(Err(rejection));
        }

        let accounts = self.uow.accounts();

        let found = accounts.find_by_number(request.origin).await?;
        let origin = match TransferPolicy::require_account(AccountRole::Origin, request.origin, found)
        {
            Ok(account) => account,
            Err(rejection) => return Ok(Err(rejection)),
        };

        let destination = if request.is_self_transfer() {
            None
        } else {
            let found = accounts.find_by_number(request.destination).await?;
            match TransferPolicy::require_account(AccountRole::Destination, request.destination, found)
            {
                Ok(account) => Some(account),
                Err(rejection) => return Ok(Err(rejection)),
            }
        };

        if let Err(rejection) = TransferPolicy::check_affordable(&origin, request.amount) {
            return Ok(Err(rejection));
        }

        Ok(Ok(Validated {
            origin,
            destination,
        }))
    }

    async fn commit(
        &self,
        request: TransferRequest,
        validated: Validated,
    ) -> Result<Transfer, TransferError> {
        let Validated {
            mut origin,
            mut destination,
        } = validated;
        let amount = request.amount;

        origin.debit(amount)?;
        match destination.as_mut() {
            Some(destination) => destination.credit(amount)?,
            None => origin.credit(amount)?,
        }

        let updates: Vec<Account> = match destination {
            Some(destination) => in_lock_order(origin, destination).into(),
            None => vec![origin],
        };

        let settled = request.approve();
        let transfer = with_transaction::<_, TransferError, _>(self.uow.as_ref(), move |session| {
            Box::pin(async move {
                for account in &updates {
                    session.accounts().update(account).await?;
                }
                let transfer = session.transfers().add(&settled).await?;
                session.save_changes().await?;
                Ok(transfer)
            })
        })
        .await
        .inspect_err(|e| {
            if e.is_retryable() {
                warn!(error = %e, "Transfer aborted by concurrent update");
            } else {
                error!(error = %e, "Transfer failed to persist");
            }
        })?;

        info!(
            transfer_id = %transfer.id,
            origin = %transfer.origin_account_number,
            destination = %transfer.destination_account_number,
            amount = %transfer.amount,
            "Transfer committed"
        );
        Ok(transfer)
    }

    /// Records a failed attempt and returns its rejection.
    ///
    /// An audit write failure is logged; the rejection is still returned.
    async fn reject(&self, request: TransferRequest, rejection: Rejection) -> TransferError {
        let err = TransferError::from(rejection);
        warn!(
            origin = %request.origin,
            destination = %request.destination,
            amount = %request.amount,
            reason = err.error_code(),
            "Transfer rejected"
        );

        let settled = request.reject();
        if let Err(audit_err) = AuditRecorder::new(self.uow.transfers()).record(&settled).await {
            error!(error = %audit_err, "Failed to record rejected transfer");
        }
        err
    }
}
