//! Roulette - wagering core for single-zero roulette tables
//!
//! Tables carry stake limits and a currency; wagers are validated against a
//! bet type catalogue and resolved by drawing a number from a CSPRNG. Storage
//! sits behind the `WagerStore` and `TableStore` traits, with in-memory
//! implementations in [`storage`].
//!
//! ```no_run
//! use roulette::{
//!     BetTypeRegistry, MemoryTableStore, MemoryWagerStore, Table, TableController,
//!     TableValidator, Wager, WageringController,
//! };
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = TableController::new(Arc::new(MemoryTableStore::new()), TableValidator::default());
//! let wagers = WageringController::new(
//!     Arc::new(MemoryWagerStore::new()),
//!     Arc::new(BetTypeRegistry::standard()),
//! );
//!
//! let table_id = tables.create(Table::new("Main", 10, 1000, "GBP")).await?;
//! wagers.create(Wager::new(table_id, "straight", "17", 50, "GBP")).await?;
//! let round = wagers.play(table_id).await?;
//! println!("{} {} -> {} winner(s)", round.number, round.color, round.winners.len());
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod config;
pub mod errors;
pub mod games;
pub mod services;
pub mod storage;

pub use common::traits::{TableStore, WagerStore};
pub use common::types::{Table, Wager, WagerFilter};
pub use config::{ConfigLoader, RouletteConfig, TableRules};
pub use errors::{
    RouletteError, RouletteResult, StoreError, StoreResult, TableError, ValidationError, WagerError,
};
pub use games::{
    BetType, BetTypeRegistry, Color, ResolutionPolicy, RoundResult, TableValidator, WagerValidator,
    Winner,
};
pub use services::{TableController, WageringController};
pub use storage::{MemoryTableStore, MemoryWagerStore};
