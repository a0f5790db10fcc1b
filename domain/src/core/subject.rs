//! Trade subject value objects
//!
//! The subject of a poll is a concrete trade proposal: a ticker symbol,
//! a direction (buy or sell), and a share quantity.

use serde::{Deserialize, Serialize};

/// A stock ticker symbol (Value Object)
///
/// Tickers are normalized to uppercase with surrounding whitespace removed,
/// so `"aapl "` and `"AAPL"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Create a new ticker
    ///
    /// # Panics
    /// Panics if the symbol is empty or only whitespace
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::try_new(symbol).expect("Ticker cannot be empty")
    }

    /// Try to create a new ticker, returning None if invalid
    pub fn try_new(symbol: impl Into<String>) -> Option<Self> {
        let symbol = symbol.into();
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    /// Get the normalized symbol
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of the proposed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    pub fn as_str(&self) -> &str {
        match self {
            TradeDirection::Buy => "BUY",
            TradeDirection::Sell => "SELL",
        }
    }

    /// Parse a direction from user input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Some(TradeDirection::Buy),
            "SELL" => Some(TradeDirection::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The trade proposal being put to a vote (Value Object)
///
/// # Example
///
/// ```
/// use pitchpoll_domain::{Ticker, TradeDirection, TradeSubject};
///
/// let subject = TradeSubject::new(Ticker::new("AAPL"), TradeDirection::Buy, 100);
/// assert_eq!(subject.to_string(), "BUY 100 shares of AAPL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSubject {
    pub ticker: Ticker,
    pub direction: TradeDirection,
    pub quantity: u32,
}

impl TradeSubject {
    pub fn new(ticker: Ticker, direction: TradeDirection, quantity: u32) -> Self {
        Self {
            ticker,
            direction,
            quantity,
        }
    }
}

impl std::fmt::Display for TradeSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} shares of {}",
            self.direction, self.quantity, self.ticker
        )
    }
}
