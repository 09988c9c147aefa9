//! Withdrawal, payment-method, and connection workflow tests.

use std::time::Duration;

use chrono::Utc;

use crate::errors::ProtocolError;
use crate::invariants;
use crate::storage::Store;
use crate::types::{
    ConnectionStatus, PaymentMethod, PaymentMethodDetails, TransactionStatus, TransactionType,
    User, UserRole,
};
use crate::{Delays, Platform};

const CREATOR: u64 = 1;
const DONOR: u64 = 2;
const NEW_DONOR: u64 = 3;
const BANK_METHOD: u64 = 40;
const DONOR_METHOD: u64 = 41;

fn test_delays() -> Delays {
    Delays {
        confirmation: Duration::from_millis(10),
        review_timeout: Duration::from_millis(500),
        withdrawal_processing: Duration::from_millis(100),
        withdrawal_settlement: Duration::from_millis(200),
        connection_accept: Duration::from_millis(300),
    }
}

fn test_user(id: u64, role: UserRole, balance: i128) -> User {
    User {
        id,
        name: format!("user-{id}"),
        role,
        balance,
        reserved: 0,
        interests: vec![],
        total_raised: 0,
        active_projects: 0,
        total_invested: 0,
        active_investments: 0,
    }
}

fn bank_method(id: u64, user_id: u64, is_default: bool) -> PaymentMethod {
    PaymentMethod {
        id,
        user_id,
        details: PaymentMethodDetails::BankAccount {
            bank_name: "Stanbic Bank Uganda".to_string(),
            account_number: "9030012345678".to_string(),
            account_name: format!("user-{user_id}"),
        },
        is_default,
        created_at: Utc::now(),
    }
}

fn setup() -> Platform {
    let mut store = Store::default();
    store.users = vec![
        test_user(CREATOR, UserRole::Creator, 100_000),
        test_user(DONOR, UserRole::Donor, 250_000),
        test_user(NEW_DONOR, UserRole::Donor, 50_000),
    ];
    store.payment_methods = vec![
        bank_method(BANK_METHOD, CREATOR, true),
        bank_method(DONOR_METHOD, DONOR, true),
    ];
    store.reserve_ids_through(100);
    Platform::with_delays(store, test_delays())
}

// ─────────────────────────────────────────────────────────
// Withdrawals
// ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn withdrawal_exceeding_balance_is_rejected() {
    let platform = setup();
    let err = platform
        .initiate_withdrawal(CREATOR, 150_000, BANK_METHOD)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProtocolError::InsufficientBalance {
            requested: 150_000,
            available: 100_000,
        }
    );

    // No request or transaction was created.
    assert!(platform.transactions_by_user(CREATOR).await.is_empty());
    assert_eq!(platform.user(CREATOR).await.unwrap().reserved, 0);
}

#[tokio::test(start_paused = true)]
async fn withdrawal_walks_through_lifecycle_and_debits_late() {
    let platform = setup();

    let request = platform
        .initiate_withdrawal(CREATOR, 20_000, BANK_METHOD)
        .await
        .unwrap();
    assert_eq!(request.status, TransactionStatus::Pending);

    // Paired transaction correlates by stable keys in both directions.
    let txs = platform.transactions_by_user(CREATOR).await;
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, request.transaction_id);
    assert_eq!(txs[0].withdrawal_request_id, Some(request.id));
    assert_eq!(txs[0].tx_type, TransactionType::Withdrawal);
    assert_eq!(txs[0].status, TransactionStatus::Pending);

    // Balance untouched at initiation; funds merely held.
    let user = platform.user(CREATOR).await.unwrap();
    assert_eq!(user.balance, 100_000);
    assert_eq!(user.reserved, 20_000);

    // Processing phase.
    tokio::time::sleep(Duration::from_millis(150)).await;
    let request = platform.withdrawal_request(request.id).await.unwrap();
    assert_eq!(request.status, TransactionStatus::Processing);
    assert!(request.processed_at.is_some());
    let txs = platform.transactions_by_user(CREATOR).await;
    assert_eq!(txs[0].status, TransactionStatus::Processing);
    assert_eq!(platform.user(CREATOR).await.unwrap().balance, 100_000);

    // Settlement: only now is the balance debited.
    tokio::time::sleep(Duration::from_millis(250)).await;
    let request = platform.withdrawal_request(request.id).await.unwrap();
    assert_eq!(request.status, TransactionStatus::Completed);
    assert!(request.completed_at.is_some());
    let txs = platform.transactions_by_user(CREATOR).await;
    assert_eq!(txs[0].status, TransactionStatus::Completed);
    assert!(txs[0].tx_hash.as_deref().unwrap_or("").starts_with("0x"));

    let user = platform.user(CREATOR).await.unwrap();
    assert_eq!(user.balance, 80_000);
    assert_eq!(user.reserved, 0);
    invariants::assert_balances_non_negative(&[user]);
}

#[tokio::test(start_paused = true)]
async fn held_funds_block_a_second_withdrawal() {
    let platform = setup();

    platform
        .initiate_withdrawal(CREATOR, 60_000, BANK_METHOD)
        .await
        .unwrap();

    // The first withdrawal has not settled, but its hold already counts.
    let err = platform
        .initiate_withdrawal(CREATOR, 60_000, BANK_METHOD)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProtocolError::InsufficientBalance {
            requested: 60_000,
            available: 40_000,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn withdrawal_requires_owned_payment_method() {
    let platform = setup();
    let err = platform
        .initiate_withdrawal(CREATOR, 1_000, DONOR_METHOD)
        .await
        .unwrap_err();
    assert_eq!(err, ProtocolError::NotAuthorized(CREATOR));
}

#[tokio::test(start_paused = true)]
async fn withdrawal_rejects_non_positive_amount() {
    let platform = setup();
    assert_eq!(
        platform
            .initiate_withdrawal(CREATOR, 0, BANK_METHOD)
            .await
            .unwrap_err(),
        ProtocolError::InvalidAmount(0)
    );
}

// ─────────────────────────────────────────────────────────
// Payment methods
// ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn first_payment_method_becomes_default() {
    let platform = setup();
    // A fresh user with no methods yet.
    let first = platform
        .add_payment_method(
            NEW_DONOR,
            PaymentMethodDetails::MobileMoney {
                provider: "MTN_MOBILE_MONEY".to_string(),
                phone_number: "+256772000111".to_string(),
                registered_name: "user-3".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(first.is_default);

    // A second method does not steal the default.
    let second = platform
        .add_payment_method(
            NEW_DONOR,
            PaymentMethodDetails::MobileMoney {
                provider: "AIRTEL_MONEY".to_string(),
                phone_number: "+256752000333".to_string(),
                registered_name: "user-3".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(!second.is_default);

    let methods = platform.payment_methods_by_user(NEW_DONOR).await;
    assert_eq!(methods.len(), 2);
    invariants::assert_single_default(&methods, NEW_DONOR);
}

#[tokio::test(start_paused = true)]
async fn set_default_clears_siblings() {
    let platform = setup();
    let second = platform
        .add_payment_method(
            CREATOR,
            PaymentMethodDetails::MobileMoney {
                provider: "AIRTEL_MONEY".to_string(),
                phone_number: "+256752000222".to_string(),
                registered_name: "user-1".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(!second.is_default);

    platform
        .set_default_payment_method(CREATOR, second.id)
        .await
        .unwrap();

    let methods = platform.payment_methods_by_user(CREATOR).await;
    invariants::assert_single_default(&methods, CREATOR);
    let default = methods.iter().find(|pm| pm.is_default).unwrap();
    assert_eq!(default.id, second.id);
}

#[tokio::test(start_paused = true)]
async fn payment_method_management_requires_owner() {
    let platform = setup();
    assert_eq!(
        platform
            .set_default_payment_method(DONOR, BANK_METHOD)
            .await
            .unwrap_err(),
        ProtocolError::NotAuthorized(DONOR)
    );
    assert_eq!(
        platform
            .delete_payment_method(DONOR, BANK_METHOD)
            .await
            .unwrap_err(),
        ProtocolError::NotAuthorized(DONOR)
    );
}

#[tokio::test(start_paused = true)]
async fn delete_payment_method_removes_it() {
    let platform = setup();
    platform
        .delete_payment_method(CREATOR, BANK_METHOD)
        .await
        .unwrap();
    assert!(platform.payment_methods_by_user(CREATOR).await.is_empty());
}

// ─────────────────────────────────────────────────────────
// Connections
// ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn duplicate_connection_request_is_rejected() {
    let platform = setup();

    let request = platform
        .request_connection(CREATOR, DONOR, Some("hello".to_string()))
        .await
        .unwrap();
    assert_eq!(request.status, ConnectionStatus::Pending);
    assert_eq!(
        platform.connection_status(CREATOR, DONOR).await,
        ConnectionStatus::Pending
    );

    // Before auto-accept fires, a second request must not stack.
    let err = platform
        .request_connection(CREATOR, DONOR, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProtocolError::ConnectionAlreadyExists {
            creator_id: CREATOR,
            donor_id: DONOR,
            status: ConnectionStatus::Pending,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn connection_auto_accepts_after_delay() {
    let platform = setup();
    platform
        .request_connection(CREATOR, DONOR, None)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(
        platform.connection_status(CREATOR, DONOR).await,
        ConnectionStatus::Connected
    );

    // Still no second relationship allowed once connected.
    let err = platform
        .request_connection(CREATOR, DONOR, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionAlreadyExists { .. }));
}

#[tokio::test(start_paused = true)]
async fn connection_requires_correct_roles() {
    let platform = setup();
    // Donor cannot initiate as the creator side.
    assert_eq!(
        platform
            .request_connection(DONOR, CREATOR, None)
            .await
            .unwrap_err(),
        ProtocolError::NotAuthorized(DONOR)
    );
    assert_eq!(
        platform.connection_status(CREATOR, DONOR).await,
        ConnectionStatus::None
    );
}

// ─────────────────────────────────────────────────────────
// Query ordering
// ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn transactions_query_returns_newest_first() {
    let platform = setup();
    platform
        .initiate_withdrawal(CREATOR, 1_000, BANK_METHOD)
        .await
        .unwrap();
    platform
        .initiate_withdrawal(CREATOR, 2_000, BANK_METHOD)
        .await
        .unwrap();

    let txs = platform.transactions_by_user(CREATOR).await;
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].amount, 2_000);
    assert_eq!(txs[1].amount, 1_000);
}
