use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Highest number on a single-zero wheel
pub const MAX_NUMBER: u8 = 36;

/// Number of pockets on a single-zero wheel
pub const WHEEL_SIZE: u8 = MAX_NUMBER + 1;

/// Supported wager categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BetType {
    // Outside bets
    #[serde(rename = "red/black")]
    RedBlack,
    #[serde(rename = "odd/even")]
    OddEven,
    #[serde(rename = "high/low")]
    HighLow,
    #[serde(rename = "column")]
    Column,
    #[serde(rename = "dozen")]
    Dozen,
    // Inside bets
    #[serde(rename = "straight")]
    Straight,
}

impl BetType {
    /// Every bet type in catalogue order
    pub const ALL: [BetType; 6] = [
        BetType::RedBlack,
        BetType::OddEven,
        BetType::HighLow,
        BetType::Column,
        BetType::Dozen,
        BetType::Straight,
    ];

    /// Wire name used in wagers and filters
    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::RedBlack => "red/black",
            BetType::OddEven => "odd/even",
            BetType::HighLow => "high/low",
            BetType::Column => "column",
            BetType::Dozen => "dozen",
            BetType::Straight => "straight",
        }
    }

    /// Single-number bets; everything else covers a range of pockets
    pub fn is_inside(&self) -> bool {
        matches!(self, BetType::Straight)
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BetType::ALL
            .into_iter()
            .find(|bet_type| bet_type.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownBetType(s.to_string()))
    }
}

/// Pocket color
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A winning wager from a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub bet_id: Uuid,
    pub amount: i64,
    pub currency: String,
}

/// Outcome of one round on a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub number: u8,
    pub color: Color,
    pub winners: Vec<Winner>,
}
