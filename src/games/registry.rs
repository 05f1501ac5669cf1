//! Bet type catalogue
//!
//! Each bet type carries the rule deciding which selections are legal and the
//! payout multiplier for a winning stake. The registry is built once and
//! shared by reference; nothing in it can be mutated after construction.

use crate::errors::ValidationError;
use crate::games::types::{BetType, MAX_NUMBER};
use std::collections::HashMap;
use std::fmt;

/// Predicate deciding whether a selection is legal for a bet type
pub type SelectionRule = fn(&str) -> bool;

/// Rule and multiplier for a single bet type
#[derive(Clone, Copy)]
pub struct BetTypeSpec {
    pub bet_type: BetType,
    pub multiplier: i64,
    rule: SelectionRule,
}

impl BetTypeSpec {
    pub fn new(bet_type: BetType, multiplier: i64, rule: SelectionRule) -> Self {
        Self {
            bet_type,
            multiplier,
            rule,
        }
    }

    /// Whether `selection` is legal for this bet type
    pub fn accepts(&self, selection: &str) -> bool {
        (self.rule)(selection)
    }
}

impl fmt::Debug for BetTypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BetTypeSpec")
            .field("bet_type", &self.bet_type)
            .field("multiplier", &self.multiplier)
            .finish_non_exhaustive()
    }
}

fn red_black(selection: &str) -> bool {
    matches!(selection, "red" | "black")
}

fn odd_even(selection: &str) -> bool {
    matches!(selection, "odd" | "even")
}

fn high_low(selection: &str) -> bool {
    matches!(selection, "high" | "low")
}

fn column(selection: &str) -> bool {
    matches!(selection, "1" | "2" | "3")
}

fn dozen(selection: &str) -> bool {
    matches!(selection, "1-12" | "13-24" | "25-36")
}

/// Canonical decimal in 0..=36. The resolver matches on `number.to_string()`,
/// so "07" or "+7" could never win and are rejected here.
fn straight(selection: &str) -> bool {
    match selection.parse::<u8>() {
        Ok(number) => number <= MAX_NUMBER && number.to_string() == selection,
        Err(_) => false,
    }
}

/// Immutable catalogue of bet types
#[derive(Debug, Clone)]
pub struct BetTypeRegistry {
    specs: HashMap<BetType, BetTypeSpec>,
}

impl BetTypeRegistry {
    /// Registry holding only the given specs
    pub fn from_specs(specs: impl IntoIterator<Item = BetTypeSpec>) -> Self {
        Self {
            specs: specs
                .into_iter()
                .map(|spec| (spec.bet_type, spec))
                .collect(),
        }
    }

    /// The full single-zero catalogue
    pub fn standard() -> Self {
        Self::from_specs([
            // Outside bets
            BetTypeSpec::new(BetType::RedBlack, 1, red_black),
            BetTypeSpec::new(BetType::OddEven, 1, odd_even),
            BetTypeSpec::new(BetType::HighLow, 1, high_low),
            BetTypeSpec::new(BetType::Column, 2, column),
            BetTypeSpec::new(BetType::Dozen, 2, dozen),
            // Inside bets
            BetTypeSpec::new(BetType::Straight, 35, straight),
        ])
    }

    pub fn get(&self, bet_type: BetType) -> Option<&BetTypeSpec> {
        self.specs.get(&bet_type)
    }

    /// Resolve a wire name to a registered spec
    pub fn lookup(&self, name: &str) -> Result<&BetTypeSpec, ValidationError> {
        let bet_type: BetType = name.parse()?;
        self.get(bet_type)
            .ok_or_else(|| ValidationError::UnknownBetType(name.to_string()))
    }

    pub fn multiplier(&self, bet_type: BetType) -> Option<i64> {
        self.get(bet_type).map(|spec| spec.multiplier)
    }

    /// Registered specs in catalogue order
    pub fn bet_types(&self) -> Vec<&BetTypeSpec> {
        BetType::ALL
            .iter()
            .filter_map(|bet_type| self.specs.get(bet_type))
            .collect()
    }

    /// Check a selection against the rule of the named bet type
    pub fn validate_selection(
        &self,
        bet_type: &str,
        selection: &str,
    ) -> Result<BetType, ValidationError> {
        let spec = self.lookup(bet_type)?;
        if !spec.accepts(selection) {
            return Err(ValidationError::InvalidSelection {
                bet_type: spec.bet_type.as_str(),
                selection: selection.to_string(),
            });
        }
        Ok(spec.bet_type)
    }
}

impl Default for BetTypeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
