use std::fmt;

use clap::ValueEnum;

use super::select::CustomerSelect;
use crate::banking::{Customer, CustomerDetails, CustomerId, Transaction, TransactionKind};

/// The areas of the console. Only the current one is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
  Dashboard,
  Customers,
  Transactions,
  Reports,
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Section::Dashboard => "dashboard",
      Section::Customers => "customers",
      Section::Transactions => "transactions",
      Section::Reports => "reports",
    };
    f.write_str(name)
  }
}

/// Everything the console remembers between two user actions.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
  /// Mirror of the server customer list, replaced wholesale on every reload.
  pub customers: Vec<Customer>,
  pub current_section: Section,
  pub customer_dialog: CustomerDialog,
  pub forms: Forms,
  /// Last statement fetched, kept for exporting.
  pub statement: Option<Statement>,
}

impl ClientState {
  pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
    self.customers.iter().find(|customer| customer.id == id)
  }
}

impl Default for ClientState {
  fn default() -> Self {
    Self {
      customers: Vec::new(),
      current_section: Section::Dashboard,
      customer_dialog: CustomerDialog::default(),
      forms: Forms::default(),
      statement: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
  pub customer_id: CustomerId,
  pub transactions: Vec<Transaction>,
}

pub const NEW_CUSTOMER_TITLE: &str = "Add New Customer";
pub const EDIT_CUSTOMER_TITLE: &str = "Edit Customer";

/// The dialog used to create and edit customers
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDialog {
  pub visible: bool,
  pub title: &'static str,
  pub form: CustomerForm,
}

impl CustomerDialog {
  pub fn open_new(&mut self) {
    self.reset();
    self.visible = true;
  }

  pub fn open_edit(&mut self, customer: &Customer) {
    self.form = CustomerForm {
      id: Some(customer.id),
      details: CustomerDetails::from(customer),
    };
    self.title = EDIT_CUSTOMER_TITLE;
    self.visible = true;
  }

  pub fn close(&mut self) {
    self.visible = false;
  }

  pub fn reset(&mut self) {
    self.form = CustomerForm::default();
    self.title = NEW_CUSTOMER_TITLE;
  }
}

impl Default for CustomerDialog {
  fn default() -> Self {
    Self {
      visible: false,
      title: NEW_CUSTOMER_TITLE,
      form: CustomerForm::default(),
    }
  }
}

/// The customer form. An `id` means the customer already exists and is being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerForm {
  pub id: Option<CustomerId>,
  pub details: CustomerDetails,
}

/// A deposit, withdrawal or transfer form.
/// The amount is kept as typed and only validated on submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
  pub source: CustomerSelect,
  /// Only transfers have a destination.
  pub destination: Option<CustomerSelect>,
  pub amount: String,
}

impl TransactionForm {
  pub fn with_destination() -> Self {
    Self {
      destination: Some(CustomerSelect::default()),
      ..Self::default()
    }
  }

  pub fn reset(&mut self) {
    self.source.clear();
    if let Some(destination) = self.destination.as_mut() {
      destination.clear();
    }
    self.amount.clear();
  }

  fn selects_mut(&mut self) -> impl Iterator<Item = &mut CustomerSelect> {
    std::iter::once(&mut self.source).chain(self.destination.as_mut())
  }
}

/// All the forms offering a customer select
#[derive(Debug, Clone, PartialEq)]
pub struct Forms {
  pub deposit: TransactionForm,
  pub withdraw: TransactionForm,
  pub transfer: TransactionForm,
  pub balance: CustomerSelect,
  pub statement: CustomerSelect,
}

impl Forms {
  pub fn transaction(&self, kind: TransactionKind) -> &TransactionForm {
    match kind {
      TransactionKind::Deposit => &self.deposit,
      TransactionKind::Withdraw => &self.withdraw,
      TransactionKind::Transfer => &self.transfer,
    }
  }

  pub fn transaction_mut(&mut self, kind: TransactionKind) -> &mut TransactionForm {
    match kind {
      TransactionKind::Deposit => &mut self.deposit,
      TransactionKind::Withdraw => &mut self.withdraw,
      TransactionKind::Transfer => &mut self.transfer,
    }
  }

  /// Every customer select across the forms.
  pub fn selects_mut(&mut self) -> impl Iterator<Item = &mut CustomerSelect> {
    self
      .deposit
      .selects_mut()
      .chain(self.withdraw.selects_mut())
      .chain(self.transfer.selects_mut())
      .chain(std::iter::once(&mut self.balance))
      .chain(std::iter::once(&mut self.statement))
  }
}

impl Default for Forms {
  fn default() -> Self {
    Self {
      deposit: TransactionForm::default(),
      withdraw: TransactionForm::default(),
      transfer: TransactionForm::with_destination(),
      balance: CustomerSelect::default(),
      statement: CustomerSelect::default(),
    }
  }
}
