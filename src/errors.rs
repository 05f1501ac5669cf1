//! Error types for the roulette wagering core
//!
//! Store and validation errors carry detail for logging. Controller errors are
//! deliberately coarse: callers only ever see the kind of failure.

use uuid::Uuid;

/// Root error type for the binary and configuration layer
#[derive(Debug, thiserror::Error)]
pub enum RouletteError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Wagering controller failures
    #[error("Wager error: {0}")]
    Wager(#[from] WagerError),

    /// Table controller failures
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Output encoding failures
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Missing required field: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Errors reported by a wager or table store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// An update or delete affected zero rows
    #[error("no matching record")]
    NoMatchingRecord,

    #[error("record {0} already exists")]
    Duplicate(Uuid),

    /// Driver or backend specific failure
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Structural or semantic rule violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("unknown bet type '{0}'")]
    UnknownBetType(String),

    #[error("selection '{selection}' is not valid for bet type {bet_type}")]
    InvalidSelection {
        bet_type: &'static str,
        selection: String,
    },

    #[error("{field} must be at least {floor}, got {value}")]
    LimitBelowFloor {
        field: &'static str,
        floor: i64,
        value: i64,
    },

    #[error("maximum bet {maximum} is below minimum bet {minimum}")]
    LimitsInverted { minimum: i64, maximum: i64 },

    #[error("unsupported currency '{0}'")]
    UnsupportedCurrency(String),
}

/// Failures surfaced by the wagering controller
///
/// `Update` and `Delete` remember whether the store reported zero affected
/// rows so callers can tell a missing record from a backend failure without
/// seeing backend detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WagerError {
    #[error("invalid bet")]
    Validation,

    #[error("unable to create bet")]
    Create,

    #[error("unable to fetch all bets")]
    List,

    #[error("unable to update bet")]
    Update { no_matching_record: bool },

    #[error("unable to delete bet")]
    Delete { no_matching_record: bool },
}

impl WagerError {
    /// True when the failed update/delete targeted a record that does not exist
    pub fn is_no_matching_record(&self) -> bool {
        matches!(
            self,
            WagerError::Update { no_matching_record: true }
                | WagerError::Delete { no_matching_record: true }
        )
    }
}

/// Failures surfaced by the table controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("invalid table")]
    Validation,

    #[error("unable to create table")]
    Create,

    #[error("unable to fetch all tables")]
    List,

    #[error("unable to update table")]
    Update { no_matching_record: bool },

    #[error("unable to delete table")]
    Delete { no_matching_record: bool },
}

impl TableError {
    /// True when the failed update/delete targeted a record that does not exist
    pub fn is_no_matching_record(&self) -> bool {
        matches!(
            self,
            TableError::Update { no_matching_record: true }
                | TableError::Delete { no_matching_record: true }
        )
    }
}

// Convenience type aliases for Results
pub type RouletteResult<T> = Result<T, RouletteError>;
pub type StoreResult<T> = Result<T, StoreError>;
