//! `SeaORM` entity definitions.

pub mod accounts;
pub mod operation_types;
pub mod transactions;

pub mod prelude {
    //! Entity re-exports.
    pub use super::accounts::Entity as Accounts;
    pub use super::operation_types::Entity as OperationTypes;
    pub use super::transactions::Entity as Transactions;
}
