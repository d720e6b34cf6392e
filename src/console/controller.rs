use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::format::format_currency;
use super::frontend::{Frontend, Notification};
use super::state::{ClientState, Section, Statement};
use super::view::{customers_table, statement_table, Dashboard, Panel};
use crate::banking::{ApiError, BankingApi, CustomerId, TransactionKind, TransactionRequest};

const INVALID_TRANSACTION: &str = "Please enter valid customer and amount";
const INVALID_TRANSFER: &str = "Please select different customers for transfer";
const MISSING_CUSTOMER: &str = "Please select a customer";
const DELETE_QUESTION: &str = "Are you sure you want to delete this customer?";

/// The banking back-office console.
///
/// It owns the [`ClientState`] and handles one user action per method:
/// - actions are translated into [`BankingApi`] calls, one request at a time
/// - outcomes are reported through the [`Frontend`], failures never stop the console
/// - every change is confirmed by the server and then re-fetched, there are no optimistic updates
///
/// Requests are neither sequenced nor versioned. A slow response can therefore overwrite fresher state,
/// the same way it would in any client that trusts the last response it gets.
pub struct BankingConsole<A, F> {
  api: A,
  frontend: F,
  state: ClientState,
}

impl<A, F> BankingConsole<A, F>
where
  A: BankingApi,
  F: Frontend,
{
  pub fn new(api: A, frontend: F) -> Self {
    Self {
      api,
      frontend,
      state: ClientState::default(),
    }
  }

  pub fn state(&self) -> &ClientState {
    &self.state
  }

  pub fn state_mut(&mut self) -> &mut ClientState {
    &mut self.state
  }

  pub fn frontend_mut(&mut self) -> &mut F {
    &mut self.frontend
  }

  /// Open the console on `section` and fetch the customers.
  pub async fn start(&mut self, section: Section) {
    self.state.current_section = section;
    self.load_customers().await;
  }

  /// Navigate to `section`, refreshing what it shows.
  pub async fn show_section(&mut self, section: Section) {
    debug!(%section, "showing section");
    self.state.current_section = section;
    match section {
      Section::Dashboard => self.update_dashboard(),
      Section::Customers => self.load_customers().await,
      Section::Transactions | Section::Reports => self.update_customer_dropdowns(),
    }
  }

  /// Replace the cache with the server customer list and refresh every view depending on it.
  pub async fn load_customers(&mut self) {
    match self.api.list_customers().await {
      Ok(customers) => {
        debug!(count = customers.len(), "customers loaded");
        self.state.customers = customers;
        self.update_customers_table();
        self.update_customer_dropdowns();
        self.update_dashboard();
      }
      Err(err) => {
        warn!(error = %err, "failed to load customers");
        self.notify(Notification::error(format!(
          "Failed to load customers: {}",
          err
        )));
      }
    }
  }

  pub fn update_customers_table(&mut self) {
    let table = customers_table(&self.state.customers);
    self.render(Panel::Customers(table));
  }

  /// Rebuild every customer select, keeping selections whose customer still exists.
  pub fn update_customer_dropdowns(&mut self) {
    let ClientState {
      customers, forms, ..
    } = &mut self.state;
    for select in forms.selects_mut() {
      select.refresh(customers);
    }
  }

  pub fn update_dashboard(&mut self) {
    let dashboard = Dashboard::from_customers(&self.state.customers);
    self.render(Panel::Dashboard(dashboard));
  }

  /// Open the customer dialog with an empty form.
  pub fn new_customer(&mut self) {
    self.state.customer_dialog.open_new();
  }

  /// Open the customer dialog filled with a cached customer. Unknown customers are ignored.
  pub fn edit_customer(&mut self, id: CustomerId) {
    let ClientState {
      customers,
      customer_dialog,
      ..
    } = &mut self.state;
    if let Some(customer) = customers.iter().find(|customer| customer.id == id) {
      customer_dialog.open_edit(customer);
    }
  }

  pub fn view_customer_details(&mut self, id: CustomerId) {
    if let Some(panel) = self.state.customer(id).map(Panel::customer_details) {
      self.render(panel);
    }
  }

  /// Submit the customer dialog, updating the customer if it has an id or creating it otherwise.
  pub async fn save_customer(&mut self) {
    let form = self.state.customer_dialog.form.clone();
    let result = match form.id {
      Some(id) => self.api.update_customer(id, form.details).await,
      None => self.api.create_customer(form.details).await,
    };

    match result {
      Ok(customer) => {
        info!(id = customer.id, "customer saved");
        let message = if form.id.is_some() {
          "Customer updated successfully!"
        } else {
          "Customer created successfully!"
        };
        self.notify(Notification::success(message));
        self.state.customer_dialog.close();
        self.state.customer_dialog.reset();
        self.load_customers().await;
      }
      Err(err) => self.notify_failure(err, "Failed to save customer"),
    }
  }

  /// Delete a customer once the user confirms.
  ///
  /// Unlike the other actions, the server error message is not shown to the user, only logged.
  pub async fn delete_customer(&mut self, id: CustomerId) {
    if !self.frontend.confirm(DELETE_QUESTION) {
      debug!(id, "customer deletion cancelled");
      return;
    }

    match self.api.delete_customer(id).await {
      Ok(()) => {
        info!(id, "customer deleted");
        self.notify(Notification::success("Customer deleted successfully!"));
        self.load_customers().await;
      }
      Err(err) => self.notify_generic_failure(err, "Failed to delete customer"),
    }
  }

  /// Submit the deposit, withdraw or transfer form.
  ///
  /// Only the obvious mistakes are caught here (missing customer, non positive amount, transfer to self).
  /// Balances, overdrafts and atomicity are the server business.
  pub async fn perform_transaction(&mut self, kind: TransactionKind) {
    let form = self.state.forms.transaction(kind);

    let (customer_id, amount) = match (form.source.selected(), parse_amount(&form.amount)) {
      (Some(customer_id), Some(amount)) => (customer_id, amount),
      _ => return self.notify(Notification::error(INVALID_TRANSACTION)),
    };

    let request = match kind {
      TransactionKind::Deposit => TransactionRequest::deposit(amount),
      TransactionKind::Withdraw => TransactionRequest::withdraw(amount),
      TransactionKind::Transfer => {
        match form.destination.as_ref().and_then(|select| select.selected()) {
          Some(to_customer_id) if to_customer_id != customer_id => {
            TransactionRequest::transfer(amount, to_customer_id)
          }
          _ => return self.notify(Notification::error(INVALID_TRANSFER)),
        }
      }
    };

    match self.api.transact(customer_id, request).await {
      Ok(receipt) => {
        info!(customer_id, %kind, %amount, "transaction accepted");
        self.notify(Notification::success(receipt.message));
        if let Some(alert) = receipt.fraud_alert {
          self.notify(Notification::warning(alert));
        }
        self.state.forms.transaction_mut(kind).reset();
        self.load_customers().await;
        self.update_dashboard();
      }
      Err(err) => self.notify_failure(err, "Transaction failed"),
    }
  }

  pub async fn check_balance(&mut self) {
    let customer_id = match self.state.forms.balance.selected() {
      Some(customer_id) => customer_id,
      None => return self.notify(Notification::error(MISSING_CUSTOMER)),
    };

    match self.api.balance(customer_id).await {
      Ok(balance) => {
        let account = self.state.forms.balance.label().to_string();
        self.render(Panel::Balance {
          account,
          balance: format_currency(balance),
        });
      }
      Err(err) => self.notify_generic_failure(err, "Failed to get balance"),
    }
  }

  /// Fetch and display the mini statement of the selected customer.
  /// The previous statement is dropped first, so a failure never leaves a stale one behind.
  pub async fn generate_statement(&mut self) {
    self.state.statement = None;
    let customer_id = match self.state.forms.statement.selected() {
      Some(customer_id) => customer_id,
      None => return self.notify(Notification::error(MISSING_CUSTOMER)),
    };

    match self.api.transactions(customer_id).await {
      Ok(transactions) => {
        debug!(customer_id, count = transactions.len(), "statement loaded");
        let table = statement_table(&transactions);
        self.state.statement = Some(Statement {
          customer_id,
          transactions,
        });
        self.render(Panel::Statement(table));
      }
      Err(err) => self.notify_generic_failure(err, "Failed to generate statement"),
    }
  }

  /// Only panels of the current section are displayed, the others would be hidden anyway.
  fn render(&mut self, panel: Panel) {
    if panel.section() == self.state.current_section {
      self.frontend.render(panel);
    }
  }

  fn notify(&mut self, notification: Notification) {
    self.frontend.notify(notification);
  }

  /// Report a failure showing the server message when there is one.
  fn notify_failure(&mut self, err: ApiError, fallback: &str) {
    let message = match (err.server_message(), &err) {
      (Some(message), _) => message.to_string(),
      (None, ApiError::Application { .. }) => fallback.to_string(),
      (None, ApiError::Transport(cause)) => format!("{}: {}", fallback, cause),
    };
    self.notify(Notification::error(message));
  }

  /// Report a failure without the server message.
  fn notify_generic_failure(&mut self, err: ApiError, fallback: &str) {
    let message = match err {
      ApiError::Application { status, message } => {
        warn!(status, error = ?message, "{}", fallback);
        fallback.to_string()
      }
      ApiError::Transport(cause) => format!("{}: {}", fallback, cause),
    };
    self.notify(Notification::error(message));
  }
}

/// A strictly positive amount, or `None`. Scientific notation (`1e3`) is accepted.
fn parse_amount(input: &str) -> Option<Decimal> {
  let input = input.trim();
  Decimal::from_str(input)
    .or_else(|_| Decimal::from_scientific(input))
    .ok()
    .filter(|amount| *amount > Decimal::ZERO)
}
