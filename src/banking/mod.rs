//! This module contains the domain model of the banking back-office
//!
//! The server owns every business rule (balances, overdrafts, ledger). The client only mirrors
//! customers and reads transactions, and talks to the server through the [`BankingApi`] trait.
//! The [`crate::http`] module provides the REST implementation.
//

mod api;
mod customer;
mod transaction;

pub use api::{ApiError, BankingApi, Result as ApiResult};
pub use customer::{Customer, CustomerDetails, CustomerId};
pub use transaction::{Transaction, TransactionKind, TransactionReceipt, TransactionRequest};
