//! Integration tests for the ledger repositories.
//!
//! Each test runs against a fresh in-memory `SQLite` database with the
//! ledger migration applied.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};

use tallybook_core::ledger::{
    AccountLedger, AccountRepository as _, LedgerError, NewTransaction, OperationCatalog,
    OperationTypeRepository as _, PostTransactionInput, RepositoryError, TransactionRecorder,
    TransactionRepository as _,
};
use tallybook_db::{
    AccountRepository, OperationTypeRepository, TransactionRepository,
    migration::{Migrator, MigratorTrait},
};
use tallybook_shared::types::{AccountId, OperationTypeId};

async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

async fn seeded() -> DatabaseConnection {
    let db = setup().await;
    OperationCatalog::new(Arc::new(OperationTypeRepository::new(db.clone())))
        .seed()
        .await
        .expect("Failed to seed operation types");
    db
}

fn recorder(
    db: &DatabaseConnection,
) -> TransactionRecorder<AccountRepository, OperationTypeRepository, TransactionRepository> {
    TransactionRecorder::new(
        AccountLedger::new(Arc::new(AccountRepository::new(db.clone()))),
        OperationCatalog::new(Arc::new(OperationTypeRepository::new(db.clone()))),
        Arc::new(TransactionRepository::new(db.clone())),
    )
}

// ============================================================================
// Schema
// ============================================================================

#[tokio::test]
async fn test_migration_can_be_rolled_back_and_reapplied() {
    let db = setup().await;
    Migrator::down(&db, None).await.expect("Failed to roll back");
    Migrator::up(&db, None).await.expect("Failed to reapply");

    let repo = AccountRepository::new(db);
    assert!(repo.create_account("123").await.is_ok());
}

// ============================================================================
// Operation type catalog
// ============================================================================

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = setup().await;
    let catalog = OperationCatalog::new(Arc::new(OperationTypeRepository::new(db)));

    let first = catalog.seed().await.expect("first seed");
    let second = catalog.seed().await.expect("second seed");

    assert_eq!(first.inserted.len(), 4);
    assert!(second.is_noop());

    let rows = catalog.list().await.expect("list");
    let rows: Vec<(i32, &str)> = rows
        .iter()
        .map(|r| (r.id.into_inner(), r.description.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "PURCHASE"),
            (2, "INSTALLMENT PURCHASE"),
            (3, "WITHDRAWAL"),
            (4, "PAYMENT"),
        ]
    );
}

#[tokio::test]
async fn test_duplicate_operation_type_is_unique_violation() {
    let db = seeded().await;
    let repo = OperationTypeRepository::new(db);

    let result = repo
        .create_operation_type(&tallybook_core::OperationType::Payment.into())
        .await;
    assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
}

#[tokio::test]
async fn test_seed_keeps_existing_descriptions() {
    let db = setup().await;
    let repo = Arc::new(OperationTypeRepository::new(db));
    repo.create_operation_type(&tallybook_core::ledger::OperationTypeRecord {
        id: OperationTypeId::new(4),
        description: "PAGAMENTO".to_string(),
    })
    .await
    .expect("insert custom row");

    let catalog = OperationCatalog::new(Arc::clone(&repo));
    let report = catalog.seed().await.expect("seed");
    assert_eq!(report.existing, vec![OperationTypeId::new(4)]);

    let payment = repo
        .find_operation_type(OperationTypeId::new(4))
        .await
        .expect("lookup")
        .expect("row exists");
    assert_eq!(payment.description, "PAGAMENTO");
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_create_and_find_account() {
    let db = setup().await;
    let repo = AccountRepository::new(db);

    let created = repo.create_account("12345678900").await.expect("create");
    assert!(created.id.is_positive());

    let by_id = repo.find_account(created.id).await.expect("find").expect("exists");
    assert_eq!(by_id, created);

    let by_document = repo
        .find_account_by_document("12345678900")
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(by_document.id, created.id);
}

#[tokio::test]
async fn test_find_missing_account() {
    let db = setup().await;
    let repo = AccountRepository::new(db);

    assert!(repo.find_account(AccountId::new(999_999)).await.expect("find").is_none());
    assert!(repo.find_account_by_document("nope").await.expect("find").is_none());
}

#[tokio::test]
async fn test_duplicate_document_is_unique_violation() {
    let db = setup().await;
    let repo = AccountRepository::new(db);

    repo.create_account("555").await.expect("create");
    let result = repo.create_account("555").await;

    assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
}

#[tokio::test]
async fn test_concurrent_creates_admit_one_account() {
    let db = setup().await;
    let ledger = AccountLedger::new(Arc::new(AccountRepository::new(db)));

    let results = join_all((0..8).map(|_| ledger.create("777"))).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::DuplicateDocument(_))))
        .count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}

// ============================================================================
// Transactions
// ============================================================================

#[tokio::test]
async fn test_transactions_are_stored_with_normalized_sign() {
    let db = seeded().await;
    let account = AccountRepository::new(db.clone())
        .create_account("111")
        .await
        .expect("create account");
    let recorder = recorder(&db);

    let post = |op: i32, amount| PostTransactionInput {
        account_id: Some(account.id),
        operation_type_id: Some(OperationTypeId::new(op)),
        amount: Some(amount),
    };

    let payment = recorder.post(post(4, dec!(100))).await.expect("payment");
    let purchase = recorder.post(post(1, dec!(50))).await.expect("purchase");
    let withdrawal = recorder.post(post(3, dec!(-18.5))).await.expect("withdrawal");

    assert_eq!(payment.amount, dec!(100));
    assert_eq!(purchase.amount, dec!(-50));
    assert_eq!(withdrawal.amount, dec!(-18.5));
    assert!(payment.id < purchase.id && purchase.id < withdrawal.id);
    assert_eq!(purchase.account_id, account.id);
}

#[tokio::test]
async fn test_unknown_references_are_rejected() {
    let db = seeded().await;
    let account = AccountRepository::new(db.clone())
        .create_account("222")
        .await
        .expect("create account");
    let recorder = recorder(&db);

    let err = recorder
        .post(PostTransactionInput {
            account_id: Some(AccountId::new(999_999)),
            operation_type_id: Some(OperationTypeId::new(1)),
            amount: Some(dec!(10)),
        })
        .await
        .expect_err("unknown account");
    assert!(matches!(err, LedgerError::UnknownAccount(_)));

    let err = recorder
        .post(PostTransactionInput {
            account_id: Some(account.id),
            operation_type_id: Some(OperationTypeId::new(5)),
            amount: Some(dec!(10)),
        })
        .await
        .expect_err("unknown operation type");
    assert!(matches!(err, LedgerError::UnknownOperationType(_)));
}

#[tokio::test]
async fn test_foreign_keys_are_enforced() {
    let db = seeded().await;
    let repo = TransactionRepository::new(db);

    let result = repo
        .create_transaction(NewTransaction {
            account_id: AccountId::new(42),
            operation_type_id: OperationTypeId::new(1),
            amount: dec!(-1),
            event_date: Utc::now(),
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::Backend(_))));
}
