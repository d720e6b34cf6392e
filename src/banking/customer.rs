use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Alias for a customer ID
pub type CustomerId = u32;

/// A customer record as returned by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
  pub id: CustomerId,
  pub account_number: String,
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  /// Never negative by server policy, but the client does not check it.
  pub balance: Decimal,
  pub account_status: Option<String>,
  pub kyc_verified: bool,
  pub created_at: NaiveDateTime,
}

impl Customer {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  #[cfg(test)]
  pub fn new(id: CustomerId, first_name: &str, last_name: &str, balance: Decimal) -> Self {
    Self {
      id,
      account_number: format!("ACC{:08}", id),
      first_name: first_name.to_string(),
      last_name: last_name.to_string(),
      email: format!("{}@bank.test", first_name.to_lowercase()),
      phone: "9800000000".to_string(),
      balance,
      account_status: Some("pending".to_string()),
      kyc_verified: false,
      created_at: chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .unwrap(),
    }
  }
}

/// The editable fields of a customer, sent on creation and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDetails {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
}

impl From<&Customer> for CustomerDetails {
  fn from(customer: &Customer) -> Self {
    Self {
      first_name: customer.first_name.clone(),
      last_name: customer.last_name.clone(),
      email: customer.email.clone(),
      phone: customer.phone.clone(),
    }
  }
}
