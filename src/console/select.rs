use crate::banking::{Customer, CustomerId};

/// Label of the empty option every customer select starts with
pub const PLACEHOLDER: &str = "Choose customer...";

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
  pub id: CustomerId,
  pub label: String,
}

impl From<&Customer> for SelectOption {
  fn from(customer: &Customer) -> Self {
    Self {
      id: customer.id,
      label: format!("{} - {}", customer.account_number, customer.full_name()),
    }
  }
}

/// A drop-down of customers. Only ids offered as options can be selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerSelect {
  options: Vec<SelectOption>,
  selected: Option<CustomerId>,
}

impl CustomerSelect {
  pub fn options(&self) -> &[SelectOption] {
    &self.options
  }

  pub fn selected(&self) -> Option<CustomerId> {
    self.selected
  }

  /// Select `id` if it is one of the options, returning whether it was.
  pub fn choose(&mut self, id: CustomerId) -> bool {
    let known = self.options().iter().any(|option| option.id == id);
    if known {
      self.selected = Some(id);
    }
    known
  }

  /// Go back to the placeholder option.
  pub fn clear(&mut self) {
    self.selected = None;
  }

  /// Rebuild the options from `customers`, keeping the selection only if that customer still exists.
  pub fn refresh(&mut self, customers: &[Customer]) {
    self.options = customers.iter().map(SelectOption::from).collect();
    self.selected = self
      .selected
      .filter(|id| customers.iter().any(|customer| customer.id == *id));
  }

  /// Label of the current selection, or the placeholder.
  pub fn label(&self) -> &str {
    self
      .selected
      .and_then(|id| self.options().iter().find(|option| option.id == id))
      .map(|option| option.label.as_str())
      .unwrap_or(PLACEHOLDER)
  }
}
