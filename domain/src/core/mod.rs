//! Core domain concepts shared across all subdomains.
//!
//! - [`subject::TradeSubject`] — the trade proposal being put to a vote
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod subject;
