//! Vote choice enum

use serde::{Deserialize, Serialize};

/// A participant's answer to the poll question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    pub fn as_str(&self) -> &str {
        match self {
            VoteChoice::Yes => "Yes",
            VoteChoice::No => "No",
        }
    }

    /// Parse a choice from user input (case-insensitive, accepts y/n)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(VoteChoice::Yes),
            "no" | "n" => Some(VoteChoice::No),
            _ => None,
        }
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
