//! Property-based tests for TransferService.
//!
//! - Conservation: origin + destination is unchanged by any attempt
//! - An attempt succeeds iff the amount is in range and affordable
//! - Every attempt leaves exactly one record

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::StaticConfig;

use super::policy::{MAX_TRANSFER_VALUE_KEY, MIN_TRANSFER_VALUE_KEY};
use super::service::TransferService;
use crate::memory::MemoryStore;

/// Strategy to generate balances (0.00 to 10,000.00).
fn balance() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate requested amounts (0.01 to 20,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..2_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_transfer_conserves_money(
        origin_balance in balance(),
        destination_balance in balance(),
        amount in amount(),
    ) {
        let store = MemoryStore::new();
        let origin = store.seed_account(origin_balance);
        let destination = store.seed_account(destination_balance);
        let config = StaticConfig::new()
            .with(MIN_TRANSFER_VALUE_KEY, "0.01")
            .with(MAX_TRANSFER_VALUE_KEY, "10000");
        let service = TransferService::new(Arc::new(store.clone()), Arc::new(config));

        let result = run(service.create_transfer(origin, destination, amount));

        let after_origin = store.balance_of(origin).unwrap();
        let after_destination = store.balance_of(destination).unwrap();
        prop_assert_eq!(after_origin + after_destination, origin_balance + destination_balance);

        let expected_success = amount <= Decimal::from(10_000)
            && origin_balance > Decimal::ZERO
            && origin_balance >= amount;
        prop_assert_eq!(result.is_ok(), expected_success);

        if expected_success {
            prop_assert_eq!(after_origin, origin_balance - amount);
            prop_assert_eq!(after_destination, destination_balance + amount);
        } else {
            prop_assert_eq!(after_origin, origin_balance);
        }

        let records = store.transfers_snapshot();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].success, expected_success);
    }
}
