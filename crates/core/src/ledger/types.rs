//! Ledger domain types.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tallybook_shared::types::{AccountId, OperationTypeId, TransactionId};

use super::error::LedgerError;
use crate::operation::OperationType;

/// Decimal places kept for stored amounts.
pub const AMOUNT_SCALE: u32 = 4;

/// Largest storable amount magnitude, `NUMERIC(16, 4)`.
pub const MAX_AMOUNT: Decimal =
    Decimal::from_parts(0x6FC0_FFFF, 0x0023_86F2, 0, false, AMOUNT_SCALE);

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier.
    pub id: AccountId,
    /// Caller-visible natural key, unique across all accounts.
    pub document_number: String,
}

/// A row of the operation type reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTypeRecord {
    /// Operation type identifier.
    pub id: OperationTypeId,
    /// Human-readable description.
    pub description: String,
}

impl From<OperationType> for OperationTypeRecord {
    fn from(op: OperationType) -> Self {
        Self {
            id: op.id(),
            description: op.description().to_string(),
        }
    }
}

/// A validated transaction ready to be appended to the ledger.
///
/// `amount` is already normalized to the operation type's sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Account the transaction belongs to.
    pub account_id: AccountId,
    /// Operation type of the transaction.
    pub operation_type_id: OperationTypeId,
    /// Signed amount.
    pub amount: Decimal,
    /// UTC timestamp of the posting.
    pub event_date: DateTime<Utc>,
}

/// An immutable ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier.
    pub id: TransactionId,
    /// Account the transaction belongs to.
    pub account_id: AccountId,
    /// Operation type of the transaction.
    pub operation_type_id: OperationTypeId,
    /// Signed amount (negative for debits, positive for credits).
    pub amount: Decimal,
    /// UTC timestamp of the posting.
    pub event_date: DateTime<Utc>,
}

/// Raw input for posting a transaction, as received at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostTransactionInput {
    /// Account to post against.
    pub account_id: Option<AccountId>,
    /// Operation type identifier.
    pub operation_type_id: Option<OperationTypeId>,
    /// Amount in any sign.
    pub amount: Option<Decimal>,
}

/// A posting request whose required fields are all present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingRequest {
    /// Account to post against (positive).
    pub account_id: AccountId,
    /// Operation type identifier.
    pub operation_type_id: OperationTypeId,
    /// Amount in any sign, rounded to [`AMOUNT_SCALE`] and non-zero.
    pub amount: Decimal,
}

impl PostTransactionInput {
    /// Checks that every required field is present and well-formed.
    ///
    /// The amount is rounded half away from zero to [`AMOUNT_SCALE`] places
    /// first, so an amount that would be stored as zero counts as missing.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field, or
    /// [`LedgerError::AmountOutOfRange`] when the amount exceeds [`MAX_AMOUNT`].
    pub fn require(&self) -> Result<PostingRequest, LedgerError> {
        let account_id = self
            .account_id
            .ok_or(LedgerError::MissingField("account_id"))?;
        let operation_type_id = self
            .operation_type_id
            .ok_or(LedgerError::MissingField("operation_type_id"))?;
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;

        if !account_id.is_positive() {
            return Err(LedgerError::InvalidAccountId(account_id.to_string()));
        }

        let amount =
            amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if amount.is_zero() {
            return Err(LedgerError::MissingField("amount"));
        }
        if amount.abs() > MAX_AMOUNT {
            return Err(LedgerError::AmountOutOfRange(amount));
        }

        Ok(PostingRequest {
            account_id,
            operation_type_id,
            amount,
        })
    }
}

/// Outcome of seeding the operation type catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Operation types written by this run.
    pub inserted: Vec<OperationTypeId>,
    /// Operation types that were already present and left untouched.
    pub existing: Vec<OperationTypeId>,
}

impl SeedReport {
    /// Returns true if this run wrote nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.inserted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn full_input() -> PostTransactionInput {
        PostTransactionInput {
            account_id: Some(AccountId::new(1)),
            operation_type_id: Some(OperationTypeId::new(4)),
            amount: Some(dec!(123.45)),
        }
    }

    #[test]
    fn test_require_accepts_complete_input() {
        let req = full_input().require().unwrap();
        assert_eq!(req.account_id, AccountId::new(1));
        assert_eq!(req.operation_type_id, OperationTypeId::new(4));
        assert_eq!(req.amount, dec!(123.45));
    }

    #[test]
    fn test_require_reports_missing_fields() {
        let input = PostTransactionInput {
            account_id: None,
            ..full_input()
        };
        assert!(matches!(input.require(), Err(LedgerError::MissingField("account_id"))));

        let input = PostTransactionInput {
            operation_type_id: None,
            ..full_input()
        };
        assert!(matches!(
            input.require(),
            Err(LedgerError::MissingField("operation_type_id"))
        ));

        let input = PostTransactionInput {
            amount: None,
            ..full_input()
        };
        assert!(matches!(input.require(), Err(LedgerError::MissingField("amount"))));

        assert!(matches!(
            PostTransactionInput::default().require(),
            Err(LedgerError::MissingField("account_id"))
        ));
    }

    fn with_amount(amount: Decimal) -> PostTransactionInput {
        PostTransactionInput {
            amount: Some(amount),
            ..full_input()
        }
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative_zero(dec!(-0.0))]
    #[case::below_scale(dec!(0.00001))]
    #[case::negative_below_scale(dec!(-0.00004))]
    fn test_amount_that_rounds_to_zero_is_missing(#[case] amount: Decimal) {
        assert!(matches!(
            with_amount(amount).require(),
            Err(LedgerError::MissingField("amount"))
        ));
    }

    #[rstest]
    #[case::huge(dec!(1000000000000000))]
    #[case::just_over(dec!(1000000000000))]
    #[case::rounds_over(dec!(999999999999.99995))]
    #[case::negative(dec!(-1000000000000))]
    fn test_amount_beyond_column_range_is_rejected(#[case] amount: Decimal) {
        assert!(matches!(
            with_amount(amount).require(),
            Err(LedgerError::AmountOutOfRange(_))
        ));
    }

    #[rstest]
    #[case::smallest(dec!(0.00005), dec!(0.0001))]
    #[case::half_away_from_zero(dec!(-2.00005), dec!(-2.0001))]
    #[case::truncated(dec!(1.23444), dec!(1.2344))]
    #[case::largest(dec!(999999999999.9999), dec!(999999999999.9999))]
    #[case::largest_negative(dec!(-999999999999.9999), dec!(-999999999999.9999))]
    fn test_amount_is_rounded_to_column_scale(#[case] raw: Decimal, #[case] stored: Decimal) {
        assert_eq!(with_amount(raw).require().unwrap().amount, stored);
    }

    #[test]
    fn test_max_amount_matches_column() {
        assert_eq!(MAX_AMOUNT, dec!(999999999999.9999));
        assert_eq!(MAX_AMOUNT.scale(), AMOUNT_SCALE);
    }

    #[test]
    fn test_require_rejects_non_positive_account() {
        let input = PostTransactionInput {
            account_id: Some(AccountId::new(0)),
            ..full_input()
        };
        assert!(matches!(input.require(), Err(LedgerError::InvalidAccountId(_))));
    }

    #[test]
    fn test_record_from_operation_type() {
        let record = OperationTypeRecord::from(OperationType::InstallmentPurchase);
        assert_eq!(record.id, OperationTypeId::new(2));
        assert_eq!(record.description, "INSTALLMENT PURCHASE");
    }
}
