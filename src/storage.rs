//! In-memory wager and table stores
//!
//! Rows live in `DashMap`s keyed by identifier. Each row keeps an insertion
//! sequence so listings come back in creation order. Deletes are soft: rows are
//! tombstoned the same way a relational backend would mark them.

use crate::common::traits::{TableStore, WagerStore};
use crate::common::types::{Table, Wager, WagerFilter};
use crate::errors::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Bookkeeping columns of a stored row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowTimestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Stored wager with bookkeeping columns
#[derive(Clone, Debug)]
struct WagerRow {
    wager: Wager,
    sequence: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl WagerRow {
    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Thread-safe in-memory `WagerStore` with soft deletes
#[derive(Clone, Default)]
pub struct MemoryWagerStore {
    rows: Arc<DashMap<Uuid, WagerRow>>,
    sequence: Arc<AtomicU64>,
}

impl MemoryWagerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live wagers across all tables
    pub fn len(&self) -> usize {
        self.rows.iter().filter(|row| row.is_live()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bookkeeping columns of a wager, including tombstoned ones
    pub fn timestamps(&self, id: Uuid) -> Option<RowTimestamps> {
        self.rows.get(&id).map(|row| RowTimestamps {
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[async_trait]
impl WagerStore for MemoryWagerStore {
    async fn create(&self, wager: &Wager) -> StoreResult<Uuid> {
        match self.rows.entry(wager.id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(wager.id)),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                slot.insert(WagerRow {
                    wager: wager.clone(),
                    sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                });
                Ok(wager.id)
            }
        }
    }

    async fn list(&self, table_id: Uuid, filters: &[WagerFilter]) -> StoreResult<Vec<Wager>> {
        let mut rows: Vec<(u64, Wager)> = self
            .rows
            .iter()
            .filter(|row| row.is_live() && row.wager.table_id == table_id)
            .filter(|row| filters.is_empty() || filters.iter().any(|f| f.matches(&row.wager)))
            .map(|row| (row.sequence, row.wager.clone()))
            .collect();

        rows.sort_by_key(|(sequence, _)| *sequence);
        Ok(rows.into_iter().map(|(_, wager)| wager).collect())
    }

    async fn update(&self, wager: &Wager) -> StoreResult<Uuid> {
        match self.rows.get_mut(&wager.id) {
            Some(mut row) if row.is_live() && row.wager.table_id == wager.table_id => {
                row.wager = wager.clone();
                row.updated_at = Utc::now();
                Ok(wager.id)
            }
            _ => Err(StoreError::NoMatchingRecord),
        }
    }

    async fn delete(&self, table_id: Uuid, id: Uuid) -> StoreResult<Uuid> {
        match self.rows.get_mut(&id) {
            Some(mut row) if row.is_live() && row.wager.table_id == table_id => {
                let now = Utc::now();
                row.deleted_at = Some(now);
                row.updated_at = now;
                Ok(id)
            }
            _ => Err(StoreError::NoMatchingRecord),
        }
    }
}

/// Stored table with bookkeeping columns
#[derive(Clone, Debug)]
struct TableRow {
    table: Table,
    sequence: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TableRow {
    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Thread-safe in-memory `TableStore` with soft deletes
#[derive(Clone, Default)]
pub struct MemoryTableStore {
    rows: Arc<DashMap<Uuid, TableRow>>,
    sequence: Arc<AtomicU64>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookkeeping columns of a table, including tombstoned ones
    pub fn timestamps(&self, id: Uuid) -> Option<RowTimestamps> {
        self.rows.get(&id).map(|row| RowTimestamps {
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn create(&self, table: &Table) -> StoreResult<Uuid> {
        match self.rows.entry(table.id) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(table.id)),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                slot.insert(TableRow {
                    table: table.clone(),
                    sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                });
                Ok(table.id)
            }
        }
    }

    async fn list(&self) -> StoreResult<Vec<Table>> {
        let mut rows: Vec<(u64, Table)> = self
            .rows
            .iter()
            .filter(|row| row.is_live())
            .map(|row| (row.sequence, row.table.clone()))
            .collect();

        rows.sort_by_key(|(sequence, _)| *sequence);
        Ok(rows.into_iter().map(|(_, table)| table).collect())
    }

    async fn update(&self, table: &Table) -> StoreResult<Uuid> {
        match self.rows.get_mut(&table.id) {
            Some(mut row) if row.is_live() => {
                row.table = table.clone();
                row.updated_at = Utc::now();
                Ok(table.id)
            }
            _ => Err(StoreError::NoMatchingRecord),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Uuid> {
        match self.rows.get_mut(&id) {
            Some(mut row) if row.is_live() => {
                let now = Utc::now();
                row.deleted_at = Some(now);
                row.updated_at = now;
                Ok(id)
            }
            _ => Err(StoreError::NoMatchingRecord),
        }
    }
}
