//! Ballot and tally subdomain.
//!
//! - [`choice::VoteChoice`] — yes or no
//! - [`ballot::Ballot`] — one participant's recorded vote
//! - [`tally::Tally`] — derived yes/no counts for a session

pub mod ballot;
pub mod choice;
pub mod tally;
