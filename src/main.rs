mod banking;
mod config;
mod console;
mod http;
mod io;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::banking::{BankingApi, CustomerId, TransactionKind};
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::console::{BankingConsole, CustomerSelect, Frontend, Notification, Section, TerminalFrontend};
use crate::http::HttpBankingApi;
use crate::io::{CsvStatementWriter, StatementWriter};

/// Back-office console for the banking REST API.
#[derive(Debug, Parser)]
#[command(name = "bank-console", version)]
struct Cli {
  /// Banking API base URL.
  #[arg(long, env = "BANK_API_URL", default_value = DEFAULT_BASE_URL)]
  base_url: String,

  /// Log level (trace, debug, info, warn, error).
  #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
  log_level: String,

  /// Enable JSON log output.
  #[arg(long, env = "JSON_LOGS")]
  json_logs: bool,

  /// Skip confirmation prompts (like deleting a customer).
  #[arg(long, short = 'y')]
  yes: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Show the dashboard summary.
  Dashboard,

  /// Manage customers.
  Customers {
    #[command(subcommand)]
    action: CustomersCommand,
  },

  /// Deposit money into a customer account.
  Deposit(AmountArgs),

  /// Withdraw money from a customer account.
  Withdraw(AmountArgs),

  /// Transfer money between two customers.
  Transfer {
    #[arg(long)]
    from: CustomerId,
    #[arg(long)]
    to: CustomerId,
    #[arg(long)]
    amount: String,
  },

  /// Show the balance of a customer.
  Balance {
    #[arg(long)]
    customer: CustomerId,
  },

  /// Show the mini statement of a customer.
  Statement {
    #[arg(long)]
    customer: CustomerId,

    /// Also export the statement as CSV into this file.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
  },

  /// Start an interactive session.
  Shell,
}

#[derive(Debug, Subcommand)]
enum CustomersCommand {
  /// List every customer.
  List,
  /// Show the details of a customer.
  Show { id: CustomerId },
  /// Create a new customer.
  Create(NewCustomerArgs),
  /// Update a customer, keeping the fields not provided.
  Update {
    id: CustomerId,
    #[command(flatten)]
    fields: CustomerFieldsArgs,
  },
  /// Delete a customer.
  Delete { id: CustomerId },
}

#[derive(Debug, Args)]
struct AmountArgs {
  #[arg(long)]
  customer: CustomerId,
  #[arg(long)]
  amount: String,
}

#[derive(Debug, Args)]
struct NewCustomerArgs {
  #[arg(long)]
  first_name: String,
  #[arg(long)]
  last_name: String,
  #[arg(long)]
  email: String,
  #[arg(long)]
  phone: String,
}

#[derive(Debug, Args)]
struct CustomerFieldsArgs {
  #[arg(long)]
  first_name: Option<String>,
  #[arg(long)]
  last_name: Option<String>,
  #[arg(long)]
  email: Option<String>,
  #[arg(long)]
  phone: Option<String>,
}

/// A line typed in the interactive shell.
#[derive(Debug, Parser)]
#[command(name = "bank", no_binary_name = true, disable_version_flag = true)]
enum ShellLine {
  #[command(flatten)]
  Console(Command),

  /// Switch to another section.
  Section { name: Section },

  /// Leave the shell.
  #[command(alias = "quit")]
  Exit,
}

impl Command {
  /// The section a command belongs to, which is the one displayed while it runs.
  fn section(&self) -> Section {
    match self {
      Command::Dashboard | Command::Shell => Section::Dashboard,
      Command::Customers { .. } => Section::Customers,
      Command::Deposit(_) | Command::Withdraw(_) | Command::Transfer { .. } => {
        Section::Transactions
      }
      Command::Balance { .. } | Command::Statement { .. } => Section::Reports,
    }
  }
}

type Console = BankingConsole<
  HttpBankingApi,
  TerminalFrontend<std::io::Stdout, std::io::BufReader<std::io::Stdin>>,
>;

#[tokio::main]
async fn main() -> Result<()> {
  dotenvy::dotenv().ok();

  let cli = Cli::parse();
  init_tracing(&cli.log_level, cli.json_logs);

  let config = ClientConfig::new(&cli.base_url, cli.yes).context("Invalid configuration")?;
  info!(base_url = %config.base_url, "starting console");

  let api = HttpBankingApi::new(config.base_url);
  let frontend = TerminalFrontend::new(
    std::io::stdout(),
    std::io::BufReader::new(std::io::stdin()),
    config.assume_yes,
  );
  let mut console: Console = BankingConsole::new(api, frontend);

  match cli.command {
    Command::Shell => shell(&mut console).await,
    command => {
      console.start(command.section()).await;
      run(&mut console, command).await
    }
  }
}

/// Run the commands typed by the user until `exit` or the end of the input.
async fn shell(console: &mut Console) -> Result<()> {
  console.start(Section::Dashboard).await;

  loop {
    let prompt = format!("bank:{}> ", console.state().current_section);
    let line = match console
      .frontend_mut()
      .read_line(&prompt)
      .context("Failed to read the command")?
    {
      Some(line) => line,
      None => return Ok(()),
    };
    if line.is_empty() {
      continue;
    }

    match ShellLine::try_parse_from(line.split_whitespace()) {
      Ok(ShellLine::Exit) => return Ok(()),
      Ok(ShellLine::Section { name }) => console.show_section(name).await,
      Ok(ShellLine::Console(Command::Shell)) => {
        console
          .frontend_mut()
          .notify(Notification::warning("Already in the shell"));
      }
      Ok(ShellLine::Console(command)) => {
        console.show_section(command.section()).await;
        if let Err(err) = run(console, command).await {
          console
            .frontend_mut()
            .notify(Notification::error(format!("{:#}", err)));
        }
      }
      Err(err) => {
        // help and usage errors
        if let Err(print_err) = err.print() {
          warn!(error = %print_err, "failed to print the shell usage");
        }
      }
    }
  }
}

/// Apply a single command to the console.
async fn run<A, F>(console: &mut BankingConsole<A, F>, command: Command) -> Result<()>
where
  A: BankingApi,
  F: Frontend,
{
  debug!(?command, "running command");

  match command {
    // showing the section has already displayed them
    Command::Dashboard | Command::Shell => {}

    Command::Customers { action } => match action {
      CustomersCommand::List => {}
      CustomersCommand::Show { id } => {
        ensure_customer(console, id)?;
        console.view_customer_details(id);
      }
      CustomersCommand::Create(args) => {
        console.new_customer();
        let details = &mut console.state_mut().customer_dialog.form.details;
        details.first_name = args.first_name;
        details.last_name = args.last_name;
        details.email = args.email;
        details.phone = args.phone;
        console.save_customer().await;
      }
      CustomersCommand::Update { id, fields } => {
        ensure_customer(console, id)?;
        console.edit_customer(id);
        let details = &mut console.state_mut().customer_dialog.form.details;
        if let Some(first_name) = fields.first_name {
          details.first_name = first_name;
        }
        if let Some(last_name) = fields.last_name {
          details.last_name = last_name;
        }
        if let Some(email) = fields.email {
          details.email = email;
        }
        if let Some(phone) = fields.phone {
          details.phone = phone;
        }
        console.save_customer().await;
      }
      CustomersCommand::Delete { id } => console.delete_customer(id).await,
    },

    Command::Deposit(args) => {
      fill_transaction(console, TransactionKind::Deposit, args.customer, None, args.amount);
      console.perform_transaction(TransactionKind::Deposit).await;
    }
    Command::Withdraw(args) => {
      fill_transaction(console, TransactionKind::Withdraw, args.customer, None, args.amount);
      console.perform_transaction(TransactionKind::Withdraw).await;
    }
    Command::Transfer { from, to, amount } => {
      fill_transaction(console, TransactionKind::Transfer, from, Some(to), amount);
      console.perform_transaction(TransactionKind::Transfer).await;
    }

    Command::Balance { customer } => {
      select_customer(&mut console.state_mut().forms.balance, customer);
      console.check_balance().await;
    }
    Command::Statement { customer, csv } => {
      select_customer(&mut console.state_mut().forms.statement, customer);
      console.generate_statement().await;
      if let Some(path) = csv {
        export_statement(console, customer, path).await?;
      }
    }
  }

  Ok(())
}

fn ensure_customer<A, F>(console: &BankingConsole<A, F>, id: CustomerId) -> Result<()>
where
  A: BankingApi,
  F: Frontend,
{
  match console.state().customer(id) {
    Some(_) => Ok(()),
    None => anyhow::bail!("Customer {} not found", id),
  }
}

/// Choose `id` in the select, or leave it without selection when the customer is unknown.
fn select_customer(select: &mut CustomerSelect, id: CustomerId) {
  if !select.choose(id) {
    select.clear();
  }
}

fn fill_transaction<A, F>(
  console: &mut BankingConsole<A, F>,
  kind: TransactionKind,
  customer: CustomerId,
  destination: Option<CustomerId>,
  amount: String,
) where
  A: BankingApi,
  F: Frontend,
{
  let form = console.state_mut().forms.transaction_mut(kind);
  select_customer(&mut form.source, customer);
  if let (Some(select), Some(id)) = (form.destination.as_mut(), destination) {
    select_customer(select, id);
  }
  form.amount = amount;
}

/// Write the last statement fetched for `customer` into a CSV file.
/// Nothing is written when the statement could not be fetched, the failure has already been reported.
async fn export_statement<A, F>(
  console: &mut BankingConsole<A, F>,
  customer: CustomerId,
  path: PathBuf,
) -> Result<()>
where
  A: BankingApi,
  F: Frontend,
{
  let transactions = match &console.state().statement {
    Some(statement) if statement.customer_id == customer => statement.transactions.clone(),
    _ => return Ok(()),
  };

  let file = tokio::fs::File::create(&path)
    .await
    .with_context(|| format!("Failed to create {}", path.display()))?;
  let mut writer = CsvStatementWriter::new(file);
  writer
    .write_statement(transactions.into_iter())
    .await
    .with_context(|| format!("Failed to write the statement into {}", path.display()))?;

  info!(customer, path = %path.display(), "statement exported");
  console.frontend_mut().notify(Notification::success(format!(
    "Statement exported to {}",
    path.display()
  )));
  Ok(())
}

/// Logs go to stderr so they never mix with the console output.
fn init_tracing(level: &str, json: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

  if json {
    fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .json()
      .init();
  } else {
    fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .with_target(false)
      .init();
  }
}
