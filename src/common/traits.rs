//! Storage seams consumed by the controllers
//!
//! Both stores are async so implementations may suspend for I/O; the in-memory
//! versions in `crate::storage` never do.

use crate::common::types::{Table, Wager, WagerFilter};
use crate::errors::StoreResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence interface for wagers
#[async_trait]
pub trait WagerStore: Send + Sync {
    /// Insert a new wager, returning its identifier
    async fn create(&self, wager: &Wager) -> StoreResult<Uuid>;

    /// Wagers of a table matching any of `filters` (all wagers when empty)
    async fn list(&self, table_id: Uuid, filters: &[WagerFilter]) -> StoreResult<Vec<Wager>>;

    /// Replace a wager; `NoMatchingRecord` when nothing was updated
    async fn update(&self, wager: &Wager) -> StoreResult<Uuid>;

    /// Remove a wager of a table; `NoMatchingRecord` when nothing was deleted
    async fn delete(&self, table_id: Uuid, id: Uuid) -> StoreResult<Uuid>;
}

/// Persistence interface for tables
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert a new table, returning its identifier
    async fn create(&self, table: &Table) -> StoreResult<Uuid>;

    /// All tables that have not been deleted
    async fn list(&self) -> StoreResult<Vec<Table>>;

    /// Replace a table; `NoMatchingRecord` when nothing was updated
    async fn update(&self, table: &Table) -> StoreResult<Uuid>;

    /// Logically remove a table; `NoMatchingRecord` when nothing was deleted
    async fn delete(&self, id: Uuid) -> StoreResult<Uuid>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;

    // Mock implementation for testing the object-safe seam
    struct EmptyWagerStore;

    #[async_trait]
    impl WagerStore for EmptyWagerStore {
        async fn create(&self, wager: &Wager) -> StoreResult<Uuid> {
            Ok(wager.id)
        }

        async fn list(&self, _table_id: Uuid, _filters: &[WagerFilter]) -> StoreResult<Vec<Wager>> {
            Ok(vec![])
        }

        async fn update(&self, _wager: &Wager) -> StoreResult<Uuid> {
            Err(StoreError::NoMatchingRecord)
        }

        async fn delete(&self, _table_id: Uuid, _id: Uuid) -> StoreResult<Uuid> {
            Err(StoreError::NoMatchingRecord)
        }
    }

    #[tokio::test]
    async fn test_store_is_usable_as_trait_object() {
        let store: std::sync::Arc<dyn WagerStore> = std::sync::Arc::new(EmptyWagerStore);
        assert!(store.list(Uuid::new_v4(), &[]).await.unwrap().is_empty());
        assert_eq!(
            store.delete(Uuid::new_v4(), Uuid::new_v4()).await,
            Err(StoreError::NoMatchingRecord)
        );
    }
}
