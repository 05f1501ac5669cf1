//! Core domain records shared by the controllers and the stores

use crate::games::types::BetType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A configured surface with stake limits and a currency
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: Uuid,
    pub name: String,
    pub maximum_bet: i64,
    pub minimum_bet: i64,
    pub currency: String,
}

impl Table {
    /// Build a table without an identifier; create assigns one
    pub fn new(
        name: impl Into<String>,
        minimum_bet: i64,
        maximum_bet: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            maximum_bet,
            minimum_bet,
            currency: currency.into(),
        }
    }
}

/// A stake placed against a selection of a bet type on a table
///
/// `bet_type` holds the wire name (e.g. `"red/black"`) as received from the
/// presentation layer; it is checked against the registry before anything is
/// persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wager {
    pub id: Uuid,
    pub table_id: Uuid,
    pub selection: String,
    pub bet_type: String,
    pub amount: i64,
    pub currency: String,
}

impl Wager {
    /// Build a wager without an identifier; create assigns one
    pub fn new(
        table_id: Uuid,
        bet_type: impl Into<String>,
        selection: impl Into<String>,
        amount: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            table_id,
            selection: selection.into(),
            bet_type: bet_type.into(),
            amount,
            currency: currency.into(),
        }
    }
}

/// Match filter passed to `WagerStore::list`
///
/// Several filters combine with OR semantics; an empty filter list matches
/// every wager of the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WagerFilter {
    pub bet_type: BetType,
    pub selection: String,
}

impl WagerFilter {
    pub fn new(bet_type: BetType, selection: impl Into<String>) -> Self {
        Self {
            bet_type,
            selection: selection.into(),
        }
    }

    /// Whether a stored wager satisfies this filter
    pub fn matches(&self, wager: &Wager) -> bool {
        wager.bet_type == self.bet_type.as_str() && wager.selection == self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_records_have_nil_ids() {
        let table = Table::new("Main", 10, 1000, "GBP");
        assert!(table.id.is_nil());

        let wager = Wager::new(Uuid::new_v4(), "straight", "17", 50, "GBP");
        assert!(wager.id.is_nil());
        assert_eq!(wager.bet_type, "straight");
    }

    #[test]
    fn test_filter_matches_type_and_selection() {
        let table_id = Uuid::new_v4();
        let filter = WagerFilter::new(BetType::Straight, "14");

        assert!(filter.matches(&Wager::new(table_id, "straight", "14", 5, "EUR")));
        assert!(!filter.matches(&Wager::new(table_id, "straight", "15", 5, "EUR")));
        assert!(!filter.matches(&Wager::new(table_id, "column", "14", 5, "EUR")));
    }
}
