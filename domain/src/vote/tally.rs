//! Derived vote counts

use crate::vote::choice::VoteChoice;
use serde::{Deserialize, Serialize};

/// Yes/no counts for one session, derived from stored ballots
///
/// A tally is a pure view: it is recomputed from the ballot store on every
/// read and never cached, so it can never drift from the recorded votes.
///
/// # Example
///
/// ```
/// use pitchpoll_domain::{Tally, VoteChoice};
///
/// let tally = Tally::from_choices([VoteChoice::Yes, VoteChoice::Yes, VoteChoice::Yes, VoteChoice::No]);
/// assert_eq!(tally.yes, 3);
/// assert_eq!(tally.no, 1);
/// assert_eq!(tally.yes_percent(), Some(75.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yes: usize,
    pub no: usize,
}

impl Tally {
    /// An empty tally (a session with no votes)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Count choices into a tally
    pub fn from_choices(choices: impl IntoIterator<Item = VoteChoice>) -> Self {
        let mut tally = Self::empty();
        for choice in choices {
            tally.add(choice);
        }
        tally
    }

    /// Add one vote to the count
    pub fn add(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::Yes => self.yes += 1,
            VoteChoice::No => self.no += 1,
        }
    }

    /// Total number of recorded votes
    pub fn total(&self) -> usize {
        self.yes + self.no
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Share of yes votes in percent; `None` when no votes were recorded
    pub fn yes_percent(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.yes as f64 / self.total() as f64 * 100.0)
    }

    /// Share of no votes in percent; `None` when no votes were recorded
    pub fn no_percent(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.no as f64 / self.total() as f64 * 100.0)
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} yes / {} no", self.yes, self.no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tally() {
        let tally = Tally::empty();
        assert_eq!(tally.total(), 0);
        assert!(tally.is_empty());
        assert_eq!(tally.yes_percent(), None);
        assert_eq!(tally.no_percent(), None);
    }

    #[test]
    fn test_from_choices() {
        let tally = Tally::from_choices([
            VoteChoice::Yes,
            VoteChoice::No,
            VoteChoice::Yes,
            VoteChoice::Yes,
        ]);
        assert_eq!(tally, Tally { yes: 3, no: 1 });
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let tally = Tally { yes: 1, no: 3 };
        assert_eq!(tally.yes_percent(), Some(25.0));
        assert_eq!(tally.no_percent(), Some(75.0));
    }

    #[test]
    fn test_display() {
        let tally = Tally { yes: 2, no: 5 };
        assert_eq!(tally.to_string(), "2 yes / 5 no");
    }
}
