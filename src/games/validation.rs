//! Wager and table validators
//!
//! Structural checks run first; type-specific and limit rules only run on a
//! structurally complete record.

use crate::common::types::{Table, Wager};
use crate::config::TableRules;
use crate::errors::ValidationError;
use crate::games::registry::BetTypeRegistry;
use crate::games::types::BetType;
use std::sync::Arc;

/// Structural and selection checks for wagers
#[derive(Debug, Clone)]
pub struct WagerValidator {
    registry: Arc<BetTypeRegistry>,
}

impl WagerValidator {
    pub fn new(registry: Arc<BetTypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BetTypeRegistry {
        &self.registry
    }

    /// Validate a wager for creation, returning its parsed bet type
    pub fn validate(&self, wager: &Wager) -> Result<BetType, ValidationError> {
        Self::validate_structure(wager)?;
        self.registry
            .validate_selection(&wager.bet_type, &wager.selection)
    }

    /// Validate a wager for update; the identifier must be present too
    pub fn validate_update(&self, wager: &Wager) -> Result<BetType, ValidationError> {
        if wager.id.is_nil() {
            return Err(ValidationError::MissingField("id"));
        }
        self.validate(wager)
    }

    fn validate_structure(wager: &Wager) -> Result<(), ValidationError> {
        if wager.table_id.is_nil() {
            return Err(ValidationError::MissingField("table_id"));
        }
        if wager.selection.is_empty() {
            return Err(ValidationError::MissingField("selection"));
        }
        if wager.bet_type.is_empty() {
            return Err(ValidationError::MissingField("bet_type"));
        }
        if wager.amount <= 0 {
            return Err(ValidationError::NonPositiveAmount(wager.amount));
        }
        if wager.currency.is_empty() {
            return Err(ValidationError::MissingField("currency"));
        }
        Ok(())
    }
}

/// Limit and currency invariants for tables
#[derive(Debug, Clone)]
pub struct TableValidator {
    rules: TableRules,
}

impl TableValidator {
    pub fn new(rules: TableRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    /// Validate a table for creation
    pub fn validate(&self, table: &Table) -> Result<(), ValidationError> {
        if table.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if table.currency.is_empty() {
            return Err(ValidationError::MissingField("currency"));
        }

        let floor = self.rules.minimum_bet_floor;
        if table.minimum_bet < floor {
            return Err(ValidationError::LimitBelowFloor {
                field: "minimum_bet",
                floor,
                value: table.minimum_bet,
            });
        }
        if table.maximum_bet < table.minimum_bet {
            return Err(ValidationError::LimitsInverted {
                minimum: table.minimum_bet,
                maximum: table.maximum_bet,
            });
        }

        if !self.rules.currencies.iter().any(|c| *c == table.currency) {
            return Err(ValidationError::UnsupportedCurrency(table.currency.clone()));
        }

        Ok(())
    }

    /// Validate a table for update; the identifier must be present too
    pub fn validate_update(&self, table: &Table) -> Result<(), ValidationError> {
        if table.id.is_nil() {
            return Err(ValidationError::MissingField("id"));
        }
        self.validate(table)
    }
}

impl Default for TableValidator {
    fn default() -> Self {
        Self::new(TableRules::default())
    }
}
