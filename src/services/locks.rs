//! Per-table async mutexes that only live while a table is in use

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

type LockMap = DashMap<Uuid, Arc<Mutex<()>>>;

/// Per-table exclusivity for wager mutation and round resolution
///
/// Holding the guard returned by `acquire` keeps every other operation on the
/// same table waiting; different tables never contend. An entry is removed as
/// soon as its last holder or waiter is gone.
#[derive(Clone, Default)]
pub struct TableLocks {
    /// Map of table_id -> table mutex
    locks: Arc<LockMap>,
}

/// Exclusive access to one table, released on drop
pub struct TableGuard {
    table_id: Uuid,
    locks: Arc<LockMap>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for TableGuard {
    fn drop(&mut self) {
        // Unlock first; the map then holds the only reference unless someone waits
        drop(self.guard.take());
        self.locks
            .remove_if(&self.table_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl TableLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a table
    pub async fn acquire(&self, table_id: Uuid) -> TableGuard {
        // Clone the Arc out so the shard lock is released before awaiting
        let lock = self
            .locks
            .entry(table_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;

        TableGuard {
            table_id,
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Number of tables currently held or waited on
    pub fn tracked_tables(&self) -> usize {
        self.locks.len()
    }
}
