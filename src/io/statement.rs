use serde::Serialize;

use crate::banking;

/// Number of decimals exported for money
const EXPORT_DECIMALS: u32 = 2;

/// A statement entry used to serialize into a CSV file
#[derive(Debug, PartialEq, Serialize)]
pub struct StatementRow {
  created_at: String,
  transaction_type: &'static str,
  amount: String,
  balance_after: String,
  description: String,
}

impl From<banking::Transaction> for StatementRow {
  /// A conversion between the domain representation of a transaction into a serializable structure
  fn from(transaction: banking::Transaction) -> Self {
    StatementRow {
      created_at: transaction
        .created_at
        .format("%Y-%m-%d %H:%M:%S")
        .to_string(),
      transaction_type: transaction.kind.as_str(),
      amount: with_export_precision(transaction.amount),
      balance_after: with_export_precision(transaction.balance_after),
      description: transaction.description.unwrap_or_default(),
    }
  }
}

fn with_export_precision(mut value: rust_decimal::Decimal) -> String {
  value.rescale(EXPORT_DECIMALS);
  value.to_string()
}

#[cfg(test)]
mod tests {

  use chrono::NaiveDate;
  use rust_decimal_macros::dec;

  use super::*;
  use crate::banking::TransactionKind;

  #[test]
  fn from_banking_transaction() {
    let transaction = banking::Transaction {
      kind: TransactionKind::Withdraw,
      amount: dec!(50.5),
      balance_after: dec!(49.999),
      description: None,
      created_at: NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .unwrap(),
    };

    assert_eq!(
      StatementRow::from(transaction),
      StatementRow {
        created_at: "2024-03-05 10:30:00".to_string(),
        transaction_type: "withdraw",
        amount: "50.50".to_string(),
        balance_after: "50.00".to_string(),
        description: "".to_string(),
      }
    )
  }
}
