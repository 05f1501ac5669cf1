//! Controllers exposed to the presentation layer
//!
//! `WageringController` and `TableController` own validation, error mapping
//! and logging; the stores behind them are injected as trait objects.

pub mod locks;
pub mod tables;
pub mod wagering;

pub use locks::{TableGuard, TableLocks};
pub use tables::TableController;
pub use wagering::WageringController;
