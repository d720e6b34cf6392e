use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use super::{
  customer::{Customer, CustomerDetails, CustomerId},
  transaction::{Transaction, TransactionReceipt, TransactionRequest},
};

pub type Result<T> = core::result::Result<T, ApiError>;

/// The two ways a call to the banking server can fail.
/// Neither is retried: the triggering action is abandoned and the user is told.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
  /// The request never produced a usable response (network, decoding, malformed data).
  #[error("{0}")]
  Transport(String),

  /// The server answered with a non-success status, optionally explaining why.
  #[error("Server responded with status {status}")]
  Application {
    status: u16,
    message: Option<String>,
  },
}

impl ApiError {
  pub fn transport<E: std::fmt::Display>(error: E) -> Self {
    ApiError::Transport(error.to_string())
  }

  /// The `error` field sent by the server, if any.
  pub fn server_message(&self) -> Option<&str> {
    match self {
      ApiError::Application {
        message: Some(message),
        ..
      } => Some(message.as_str()),
      _ => None,
    }
  }
}

/// Interface to the banking server.
/// Every call is a single request with a single outcome, the server being the only source of truth.
#[async_trait]
pub trait BankingApi {
  /// All the customers, in the order the server returns them.
  async fn list_customers(&self) -> Result<Vec<Customer>>;

  async fn create_customer(&self, details: CustomerDetails) -> Result<Customer>;

  async fn update_customer(&self, id: CustomerId, details: CustomerDetails) -> Result<Customer>;

  async fn delete_customer(&self, id: CustomerId) -> Result<()>;

  /// Ask the server to apply a deposit, withdrawal or transfer on the `id` account.
  async fn transact(&self, id: CustomerId, request: TransactionRequest)
    -> Result<TransactionReceipt>;

  async fn balance(&self, id: CustomerId) -> Result<Decimal>;

  /// The mini statement of a customer, possibly empty.
  async fn transactions(&self, id: CustomerId) -> Result<Vec<Transaction>>;
}
