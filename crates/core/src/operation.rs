//! Operation types and the sign rule they impose on ledger amounts.
//!
//! Every transaction is tagged with one of a small, closed set of operation
//! types. The type alone decides whether the stored amount is a debit
//! (negative) or a credit (positive); the sign supplied by the caller is
//! never trusted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::OperationTypeId;

/// Direction in which an operation moves an account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Money leaving the account, stored as a negative amount.
    Debit,
    /// Money entering the account, stored as a positive amount.
    Credit,
}

impl Polarity {
    /// Forces the sign of `amount` to match this polarity.
    ///
    /// Zero stays zero (never a signed zero).
    #[must_use]
    pub fn apply(self, amount: Decimal) -> Decimal {
        if amount.is_zero() {
            return Decimal::ZERO;
        }
        match self {
            Self::Debit => -amount.abs(),
            Self::Credit => amount.abs(),
        }
    }
}

/// The canonical operation types.
///
/// Discriminants are the identifiers persisted in the `operation_types`
/// reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum OperationType {
    /// Single-payment card purchase.
    Purchase = 1,
    /// Purchase split into installments.
    InstallmentPurchase = 2,
    /// Cash withdrawal.
    Withdrawal = 3,
    /// Payment towards the account.
    Payment = 4,
}

impl OperationType {
    /// All operation types, ordered by identifier.
    pub const ALL: [Self; 4] = [
        Self::Purchase,
        Self::InstallmentPurchase,
        Self::Withdrawal,
        Self::Payment,
    ];

    /// Returns the persisted identifier.
    #[must_use]
    pub const fn id(self) -> OperationTypeId {
        OperationTypeId::new(self as i32)
    }

    /// Returns the canonical description seeded into the catalog.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Purchase => "PURCHASE",
            Self::InstallmentPurchase => "INSTALLMENT PURCHASE",
            Self::Withdrawal => "WITHDRAWAL",
            Self::Payment => "PAYMENT",
        }
    }

    /// Returns whether this operation debits or credits the account.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Purchase | Self::InstallmentPurchase | Self::Withdrawal => Polarity::Debit,
            Self::Payment => Polarity::Credit,
        }
    }

    /// Looks up an operation type by its persisted identifier.
    #[must_use]
    pub fn from_id(id: OperationTypeId) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.id() == id)
    }

    /// Normalizes `amount` to the sign this operation requires.
    #[must_use]
    pub fn normalize(self, amount: Decimal) -> Decimal {
        self.polarity().apply(amount)
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Normalizes `amount` by the operation type identified by `operation_type_id`.
///
/// Identifiers outside the canonical set pass the amount through unchanged;
/// callers must reject unknown operation types before relying on the result.
#[must_use]
pub fn normalize_amount(operation_type_id: OperationTypeId, amount: Decimal) -> Decimal {
    match OperationType::from_id(operation_type_id) {
        Some(op) => op.normalize(amount),
        None => amount,
    }
}
