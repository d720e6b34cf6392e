//! This module contains the back-office console: state, views and the controller driving them
//!
//! The [`BankingConsole`] talks to the server through a [`crate::banking::BankingApi`] and to the user through a [`Frontend`].
//! The [`TerminalFrontend`] is the line-oriented implementation used by the binary, others (a TUI, a web page) would
//! only need to implement [`Frontend`].
//!

mod controller;
mod format;
mod frontend;
mod select;
mod state;
mod view;

pub use controller::BankingConsole;
pub use frontend::{Frontend, Notification, TerminalFrontend};
pub use select::CustomerSelect;
pub use state::Section;
