use std::convert::TryFrom;

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::banking::{self, ApiError, CustomerId, TransactionKind};

/// Format used by the server for every timestamp
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A deserializable customer record
#[derive(Debug, Deserialize)]
pub struct Customer {
  id: CustomerId,
  account_number: String,
  first_name: String,
  last_name: String,
  email: String,
  phone: String,
  balance: Decimal,
  #[serde(default)]
  account_status: Option<String>,
  #[serde(default)]
  kyc_verified: bool,
  created_at: String,
}

impl TryFrom<Customer> for banking::Customer {
  type Error = ApiError;

  fn try_from(customer: Customer) -> Result<Self, Self::Error> {
    Ok(banking::Customer {
      created_at: parse_timestamp(&customer.created_at)?,
      id: customer.id,
      account_number: customer.account_number,
      first_name: customer.first_name,
      last_name: customer.last_name,
      email: customer.email,
      phone: customer.phone,
      balance: customer.balance,
      account_status: customer.account_status,
      kyc_verified: customer.kyc_verified,
    })
  }
}

/// The body of customer create and update requests
#[derive(Debug, Serialize)]
pub struct CustomerPayload {
  first_name: String,
  last_name: String,
  email: String,
  phone: String,
}

impl From<banking::CustomerDetails> for CustomerPayload {
  fn from(details: banking::CustomerDetails) -> Self {
    Self {
      first_name: details.first_name,
      last_name: details.last_name,
      email: details.email,
      phone: details.phone,
    }
  }
}

/// The types of transactions reported by the server
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
  Deposit,
  Withdraw,
  Transfer,
}

impl From<TransactionType> for TransactionKind {
  fn from(transaction_type: TransactionType) -> Self {
    match transaction_type {
      TransactionType::Deposit => TransactionKind::Deposit,
      TransactionType::Withdraw => TransactionKind::Withdraw,
      TransactionType::Transfer => TransactionKind::Transfer,
    }
  }
}

/// A deserializable statement entry
#[derive(Debug, Deserialize)]
pub struct Transaction {
  transaction_type: TransactionType,
  amount: Decimal,
  balance_after: Decimal,
  #[serde(default)]
  description: Option<String>,
  created_at: String,
}

impl TryFrom<Transaction> for banking::Transaction {
  type Error = ApiError;

  fn try_from(transaction: Transaction) -> Result<Self, Self::Error> {
    Ok(banking::Transaction {
      kind: transaction.transaction_type.into(),
      amount: transaction.amount,
      balance_after: transaction.balance_after,
      description: transaction.description,
      created_at: parse_timestamp(&transaction.created_at)?,
    })
  }
}

/// The body of deposit, withdraw and transfer requests
#[derive(Debug, PartialEq, Serialize)]
pub struct AmountRequest {
  amount: Decimal,
  #[serde(skip_serializing_if = "Option::is_none")]
  to_customer_id: Option<CustomerId>,
}

impl From<banking::TransactionRequest> for AmountRequest {
  fn from(request: banking::TransactionRequest) -> Self {
    Self {
      amount: request.amount,
      to_customer_id: request.to_customer_id,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
  message: String,
  #[serde(default)]
  fraud_alert: Option<String>,
}

impl From<MessageResponse> for banking::TransactionReceipt {
  fn from(response: MessageResponse) -> Self {
    banking::TransactionReceipt {
      message: response.message,
      fraud_alert: response.fraud_alert,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct BalanceResponse {
  pub balance: Decimal,
}

/// The payload of non-success responses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
  #[serde(default)]
  pub error: Option<String>,
}

/// Parse a server timestamp, falling back to RFC 3339 for servers that send ISO dates.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ApiError> {
  NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
    .or_else(|_| DateTime::parse_from_rfc3339(value).map(|date_time| date_time.naive_utc()))
    .map_err(|err| ApiError::Transport(format!("Invalid timestamp '{}': {}", value, err)))
}
