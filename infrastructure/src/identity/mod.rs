//! Participant identity adapters

mod token;

pub use token::TokenIdentityResolver;
