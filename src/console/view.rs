//! Read-only view models rendered by a [`super::Frontend`]
//!
//! Views are plain data built from the client state, their `Display` implementation is the terminal rendering.

use std::fmt;

use rust_decimal::Decimal;

use super::format::{format_currency, format_date};
use super::state::Section;
use crate::banking::{Customer, Transaction};

/// Separator between table columns
const COLUMN_GAP: &str = "  ";

pub const NO_TRANSACTIONS: &str = "No transactions found";

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
  Cells(Vec<String>),
  /// A single cell spanning every column.
  Placeholder(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
  pub headers: Vec<&'static str>,
  pub rows: Vec<Row>,
}

impl Table {
  fn column_widths(&self) -> Vec<usize> {
    let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
    for row in &self.rows {
      if let Row::Cells(cells) = row {
        for (width, cell) in widths.iter_mut().zip(cells) {
          *width = (*width).max(cell.chars().count());
        }
      }
    }
    widths
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let widths = self.column_widths();
    writeln!(f, "{}", render_line(self.headers.iter().copied(), &widths))?;
    let total_width =
      widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    writeln!(f, "{}", "-".repeat(total_width))?;
    for row in &self.rows {
      match row {
        Row::Cells(cells) => {
          writeln!(f, "{}", render_line(cells.iter().map(String::as_str), &widths))?
        }
        Row::Placeholder(text) => writeln!(f, "{}", text)?,
      }
    }
    Ok(())
  }
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
  cells
    .zip(widths)
    .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
    .collect::<Vec<_>>()
    .join(COLUMN_GAP)
    .trim_end()
    .to_string()
}

/// The customer list with one row per cached customer.
pub fn customers_table(customers: &[Customer]) -> Table {
  Table {
    headers: vec!["Account", "Name", "Email", "Phone", "Balance"],
    rows: customers
      .iter()
      .map(|customer| {
        Row::Cells(vec![
          customer.account_number.clone(),
          customer.full_name(),
          customer.email.clone(),
          customer.phone.clone(),
          format_currency(customer.balance),
        ])
      })
      .collect(),
  }
}

/// The mini statement. An empty statement gets a single placeholder row.
pub fn statement_table(transactions: &[Transaction]) -> Table {
  let rows = if transactions.is_empty() {
    vec![Row::Placeholder(NO_TRANSACTIONS.to_string())]
  } else {
    transactions
      .iter()
      .map(|transaction| {
        Row::Cells(vec![
          format_date(transaction.created_at),
          transaction.kind.as_str().to_uppercase(),
          format_currency(transaction.amount),
          format_currency(transaction.balance_after),
          transaction
            .description
            .clone()
            .unwrap_or_else(|| "-".to_string()),
        ])
      })
      .collect()
  };

  Table {
    headers: vec!["Date", "Type", "Amount", "Balance After", "Description"],
    rows,
  }
}

/// Aggregates computed only from the cached customers.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
  pub total_customers: usize,
  pub total_balance: Decimal,
  /// No endpoint reports it, so it is always zero.
  pub today_transactions: usize,
  pub active_accounts: usize,
}

impl Dashboard {
  pub fn from_customers(customers: &[Customer]) -> Self {
    Self {
      total_customers: customers.len(),
      total_balance: customers.iter().map(|customer| customer.balance).sum(),
      today_transactions: 0,
      active_accounts: customers.len(),
    }
  }
}

impl fmt::Display for Dashboard {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Total customers:     {}", self.total_customers)?;
    writeln!(
      f,
      "Total balance:       {}",
      format_currency(self.total_balance)
    )?;
    writeln!(f, "Today transactions:  {}", self.today_transactions)?;
    writeln!(f, "Active accounts:     {}", self.active_accounts)
  }
}

/// Everything the console can display
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
  Dashboard(Dashboard),
  Customers(Table),
  CustomerDetails(Vec<(&'static str, String)>),
  Balance { account: String, balance: String },
  Statement(Table),
}

impl Panel {
  /// The section this panel is displayed in.
  pub fn section(&self) -> Section {
    match self {
      Panel::Dashboard(_) => Section::Dashboard,
      Panel::Customers(_) | Panel::CustomerDetails(_) => Section::Customers,
      Panel::Balance { .. } | Panel::Statement(_) => Section::Reports,
    }
  }

  pub fn customer_details(customer: &Customer) -> Self {
    Panel::CustomerDetails(vec![
      ("Account Number", customer.account_number.clone()),
      ("Name", customer.full_name()),
      ("Email", customer.email.clone()),
      ("Phone", customer.phone.clone()),
      ("Balance", format_currency(customer.balance)),
      (
        "Status",
        customer
          .account_status
          .clone()
          .unwrap_or_else(|| "-".to_string()),
      ),
      (
        "KYC",
        if customer.kyc_verified {
          "verified"
        } else {
          "not verified"
        }
        .to_string(),
      ),
      ("Created", format_date(customer.created_at)),
    ])
  }
}

impl fmt::Display for Panel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Panel::Dashboard(dashboard) => write!(f, "== Dashboard ==\n{}", dashboard),
      Panel::Customers(table) => write!(f, "== Customers ==\n{}", table),
      Panel::CustomerDetails(fields) => {
        writeln!(f, "== Customer Details ==")?;
        for (name, value) in fields {
          writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
      }
      Panel::Balance { account, balance } => {
        writeln!(f, "== Balance ==\n{}: {}", account, balance)
      }
      Panel::Statement(table) => write!(f, "== Mini Statement ==\n{}", table),
    }
  }
}

#[cfg(test)]
mod tests {

  use chrono::NaiveDate;
  use indoc::indoc;
  use rust_decimal_macros::dec;

  use super::*;
  use crate::banking::TransactionKind;

  #[test]
  fn dashboard_aggregates() {
    let customers = vec![
      Customer::new(1, "Asha", "Rao", dec!(100.00)),
      Customer::new(2, "Ravi", "Kumar", dec!(250.50)),
    ];

    let dashboard = Dashboard::from_customers(&customers);

    assert_eq!(dashboard.total_customers, 2);
    assert_eq!(format_currency(dashboard.total_balance), "₹350.50");
    assert_eq!(dashboard.today_transactions, 0);
    assert_eq!(
      dashboard.to_string(),
      indoc! { "
        Total customers:     2
        Total balance:       ₹350.50
        Today transactions:  0
        Active accounts:     2
      " }
    );
  }

  #[test]
  fn dashboard_empty_cache() {
    let dashboard = Dashboard::from_customers(&[]);

    assert_eq!(
      dashboard,
      Dashboard {
        total_customers: 0,
        total_balance: dec!(0),
        today_transactions: 0,
        active_accounts: 0,
      }
    );
  }

  #[test]
  fn statement_table_empty() {
    let table = statement_table(&[]);

    assert_eq!(
      table.rows,
      vec![Row::Placeholder("No transactions found".to_string())]
    );
    assert_eq!(
      table.to_string(),
      indoc! { "
        Date  Type  Amount  Balance After  Description
        ----------------------------------------------
        No transactions found
      " }
    );
  }

  #[test]
  fn statement_table_rows() {
    let transactions = vec![
      Transaction {
        kind: TransactionKind::Deposit,
        amount: dec!(100),
        balance_after: dec!(350.5),
        description: Some("Cash deposit".to_string()),
        created_at: NaiveDate::from_ymd_opt(2024, 3, 5)
          .and_then(|date| date.and_hms_opt(10, 30, 0))
          .unwrap(),
      },
      Transaction {
        kind: TransactionKind::Transfer,
        amount: dec!(20.25),
        balance_after: dec!(330.25),
        description: None,
        created_at: NaiveDate::from_ymd_opt(2024, 3, 6)
          .and_then(|date| date.and_hms_opt(9, 0, 0))
          .unwrap(),
      },
    ];

    let table = statement_table(&transactions);

    assert_eq!(
      table.to_string(),
      indoc! { "
        Date         Type      Amount   Balance After  Description
        -----------------------------------------------------------
        05 Mar 2024  DEPOSIT   ₹100.00  ₹350.50        Cash deposit
        06 Mar 2024  TRANSFER  ₹20.25   ₹330.25        -
      " }
    );
  }

  #[test]
  fn customers_table_rows() {
    let customers = vec![Customer::new(1, "Asha", "Rao", dec!(100))];

    let table = customers_table(&customers);

    assert_eq!(
      table.rows,
      vec![Row::Cells(vec![
        "ACC00000001".to_string(),
        "Asha Rao".to_string(),
        "asha@bank.test".to_string(),
        "9800000000".to_string(),
        "₹100.00".to_string(),
      ])]
    );
  }

  #[test]
  fn panels_belong_to_sections() {
    let customer = Customer::new(1, "Asha", "Rao", dec!(100));
    let cases = vec![
      (Panel::Dashboard(Dashboard::from_customers(&[])), Section::Dashboard),
      (Panel::Customers(customers_table(&[])), Section::Customers),
      (Panel::customer_details(&customer), Section::Customers),
      (
        Panel::Balance {
          account: "ACC00000001".to_string(),
          balance: "₹100.00".to_string(),
        },
        Section::Reports,
      ),
      (Panel::Statement(statement_table(&[])), Section::Reports),
    ];

    for (panel, section) in cases {
      assert_eq!(panel.section(), section);
    }
  }

  #[test]
  fn customer_details_panel() {
    let customer = Customer::new(1, "Asha", "Rao", dec!(100));

    assert_eq!(
      Panel::customer_details(&customer).to_string(),
      indoc! { "
        == Customer Details ==
        Account Number: ACC00000001
        Name: Asha Rao
        Email: asha@bank.test
        Phone: 9800000000
        Balance: ₹100.00
        Status: pending
        KYC: not verified
        Created: 05 Mar 2024
      " }
    );
  }
}
