//! This module contains the components needed to export data into files (specifically CSV)
//!
//! The [`writer`] module contains a statement writer into CSV.
//! It would be possible to add new file formats by implementing the [`StatementWriter`] trait.
//!
//! The [`statement`] module contains the structs needed to serialize data.
//! They are intentionally duplicated from the domain model to decouple the IO details from the domain logic and allow their evolution independently.
//!

mod statement;
mod writer;

pub use writer::{CsvStatementWriter, StatementWriter};
