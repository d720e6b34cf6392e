//! REST implementation of the [`crate::banking::BankingApi`]
//!
//! The [`wire`] module contains the JSON payloads exchanged with the server.
//! They are intentionally duplicated from the domain model so the wire format can evolve without touching the domain.
//!

mod client;
mod wire;

pub use client::HttpBankingApi;
