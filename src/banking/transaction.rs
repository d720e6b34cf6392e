use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::CustomerId;

/// The money movements a customer account supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
  Deposit,
  Withdraw,
  Transfer,
}

impl TransactionKind {
  /// The name used by the server, both in paths and in transaction records.
  pub fn as_str(&self) -> &'static str {
    match self {
      TransactionKind::Deposit => "deposit",
      TransactionKind::Withdraw => "withdraw",
      TransactionKind::Transfer => "transfer",
    }
  }
}

impl fmt::Display for TransactionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A ledger entry computed by the server. The client only displays it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
  pub kind: TransactionKind,
  pub amount: Decimal,
  pub balance_after: Decimal,
  pub description: Option<String>,
  pub created_at: NaiveDateTime,
}

/// A request to move money from (or into) a customer account.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
  pub kind: TransactionKind,
  pub amount: Decimal,
  /// Only set for transfers.
  pub to_customer_id: Option<CustomerId>,
}

impl TransactionRequest {
  pub fn deposit(amount: Decimal) -> Self {
    Self {
      kind: TransactionKind::Deposit,
      amount,
      to_customer_id: None,
    }
  }

  pub fn withdraw(amount: Decimal) -> Self {
    Self {
      kind: TransactionKind::Withdraw,
      amount,
      to_customer_id: None,
    }
  }

  pub fn transfer(amount: Decimal, to_customer_id: CustomerId) -> Self {
    Self {
      kind: TransactionKind::Transfer,
      amount,
      to_customer_id: Some(to_customer_id),
    }
  }
}

/// The server confirmation of an accepted transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionReceipt {
  pub message: String,
  pub fraud_alert: Option<String>,
}
