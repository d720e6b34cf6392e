use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::warn;

use super::view::Panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
  Success,
  Warning,
  Error,
}

/// A transient message about the outcome of a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub kind: NotificationKind,
  pub message: String,
}

impl Notification {
  pub fn success<S: Into<String>>(message: S) -> Self {
    Self {
      kind: NotificationKind::Success,
      message: message.into(),
    }
  }

  pub fn warning<S: Into<String>>(message: S) -> Self {
    Self {
      kind: NotificationKind::Warning,
      message: message.into(),
    }
  }

  pub fn error<S: Into<String>>(message: S) -> Self {
    Self {
      kind: NotificationKind::Error,
      message: message.into(),
    }
  }
}

impl fmt::Display for Notification {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let marker = match self.kind {
      NotificationKind::Success => "✔",
      NotificationKind::Warning => "!",
      NotificationKind::Error => "✖",
    };
    write!(f, "{} {}", marker, self.message)
  }
}

/// Interface between the console and the user.
/// Nothing here can fail from the console point of view: the console stays usable whatever happens.
pub trait Frontend {
  fn notify(&mut self, notification: Notification);
  /// Ask a yes/no question, returning whether the user agreed.
  fn confirm(&mut self, question: &str) -> bool;
  fn render(&mut self, panel: Panel);
}

/// Implementation of [`Frontend`] on a line-oriented terminal.
pub struct TerminalFrontend<W, R> {
  output: W,
  input: R,
  /// Answer yes to every confirmation without asking.
  assume_yes: bool,
}

impl<W, R> TerminalFrontend<W, R>
where
  W: Write,
  R: BufRead,
{
  pub fn new(output: W, input: R, assume_yes: bool) -> Self {
    Self {
      output,
      input,
      assume_yes,
    }
  }

  /// Show `prompt` and read the next line, `None` once the input is exhausted.
  pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
    write!(self.output, "{}", prompt)?;
    self.output.flush()?;
    let mut line = String::new();
    match self.input.read_line(&mut line)? {
      0 => Ok(None),
      _ => Ok(Some(line.trim().to_string())),
    }
  }

  fn write(&mut self, content: &dyn fmt::Display) {
    if let Err(err) = writeln!(self.output, "{}", content) {
      warn!(error = %err, "failed to write to the terminal");
    }
  }
}

impl<W, R> Frontend for TerminalFrontend<W, R>
where
  W: Write,
  R: BufRead,
{
  fn notify(&mut self, notification: Notification) {
    self.write(&notification);
  }

  fn confirm(&mut self, question: &str) -> bool {
    if self.assume_yes {
      return true;
    }
    match self.read_line(&format!("{} [y/N] ", question)) {
      Ok(Some(answer)) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
      Ok(None) => false,
      Err(err) => {
        warn!(error = %err, "failed to read the confirmation");
        false
      }
    }
  }

  fn render(&mut self, panel: Panel) {
    self.write(&panel);
  }
}
