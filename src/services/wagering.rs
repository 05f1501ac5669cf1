//! Wagering controller
//!
//! Validates wagers before they reach the store, converts store failures into
//! coarse `WagerError` kinds (logging the cause), and runs rounds through the
//! `RoundResolver`. Mutations and rounds on the same table are serialized by
//! `TableLocks`.

use crate::common::traits::WagerStore;
use crate::common::types::Wager;
use crate::errors::{StoreError, WagerError};
use crate::games::registry::BetTypeRegistry;
use crate::games::resolver::{NumberSource, ResolutionPolicy, RoundResolver, SecureNumberSource};
use crate::games::types::RoundResult;
use crate::games::validation::WagerValidator;
use crate::services::locks::TableLocks;
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Orchestrates wager CRUD and round play for all tables
#[derive(Clone)]
pub struct WageringController {
    store: Arc<dyn WagerStore>,
    validator: WagerValidator,
    resolver: RoundResolver,
    locks: TableLocks,
}

impl WageringController {
    /// Controller drawing from the OS CSPRNG with the default resolution policy
    pub fn new(store: Arc<dyn WagerStore>, registry: Arc<BetTypeRegistry>) -> Self {
        Self::with_parts(
            store,
            registry,
            Arc::new(SecureNumberSource),
            ResolutionPolicy::default(),
        )
    }

    pub fn with_parts(
        store: Arc<dyn WagerStore>,
        registry: Arc<BetTypeRegistry>,
        source: Arc<dyn NumberSource>,
        policy: ResolutionPolicy,
    ) -> Self {
        let resolver = RoundResolver::new(Arc::clone(&store), source, Arc::clone(&registry), policy);
        Self {
            store,
            validator: WagerValidator::new(registry),
            resolver,
            locks: TableLocks::new(),
        }
    }

    /// Per-table lock map shared by every clone of this controller
    pub fn locks(&self) -> &TableLocks {
        &self.locks
    }

    /// Validate and persist a new wager under a freshly generated identifier
    pub async fn create(&self, mut wager: Wager) -> Result<Uuid, WagerError> {
        wager.id = Uuid::new_v4();

        if let Err(e) = self.validator.validate(&wager) {
            warn!(error = %e, table_id = %wager.table_id, "{}", WagerError::Validation);
            return Err(WagerError::Validation);
        }

        let _guard = self.locks.acquire(wager.table_id).await;
        match self.store.create(&wager).await {
            Ok(id) => {
                debug!(wager_id = %id, table_id = %wager.table_id, "Wager created");
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, table_id = %wager.table_id, "{}", WagerError::Create);
                Err(WagerError::Create)
            }
        }
    }

    /// All wagers placed on a table; a failure carries no partial data
    pub async fn list(&self, table_id: Uuid) -> Result<Vec<Wager>, WagerError> {
        self.store.list(table_id, &[]).await.map_err(|e| {
            error!(error = %e, %table_id, "{}", WagerError::List);
            WagerError::List
        })
    }

    /// Replace an existing wager; the identifier is immutable
    pub async fn update(&self, wager: Wager) -> Result<Uuid, WagerError> {
        if let Err(e) = self.validator.validate_update(&wager) {
            warn!(error = %e, wager_id = %wager.id, "{}", WagerError::Validation);
            return Err(WagerError::Validation);
        }

        let _guard = self.locks.acquire(wager.table_id).await;
        self.store.update(&wager).await.map_err(|e| {
            let failure = WagerError::Update {
                no_matching_record: e == StoreError::NoMatchingRecord,
            };
            error!(error = %e, wager_id = %wager.id, table_id = %wager.table_id, "{}", failure);
            failure
        })
    }

    /// Remove a wager from its table
    pub async fn delete(&self, table_id: Uuid, id: Uuid) -> Result<Uuid, WagerError> {
        if table_id.is_nil() || id.is_nil() {
            warn!(%table_id, wager_id = %id, "{}", WagerError::Validation);
            return Err(WagerError::Validation);
        }

        let _guard = self.locks.acquire(table_id).await;
        self.store.delete(table_id, id).await.map_err(|e| {
            let failure = WagerError::Delete {
                no_matching_record: e == StoreError::NoMatchingRecord,
            };
            error!(error = %e, %table_id, wager_id = %id, "{}", failure);
            failure
        })
    }

    /// Play one round on a table.
    ///
    /// Winning wagers stay on the table: calling `play` again without changes
    /// reports them again. Settling them is up to the caller.
    pub async fn play(&self, table_id: Uuid) -> Result<RoundResult, WagerError> {
        let _guard = self.locks.acquire(table_id).await;
        self.resolver.resolve(table_id).await.map_err(|e| {
            error!(error = %e, %table_id, "{}", WagerError::List);
            WagerError::List
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::WagerFilter;
    use crate::errors::StoreResult;
    use crate::games::resolver::FixedNumber;
    use crate::games::types::Color;
    use crate::storage::MemoryWagerStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that fails every call and counts how often it was reached
    #[derive(Default)]
    struct BrokenStore {
        calls: AtomicUsize,
    }

    impl BrokenStore {
        fn fail<T>(&self) -> StoreResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Backend("driver: relation \"bets\" does not exist".to_string()))
        }
    }

    #[async_trait]
    impl WagerStore for BrokenStore {
        async fn create(&self, _wager: &Wager) -> StoreResult<Uuid> {
            self.fail()
        }

        async fn list(&self, _table_id: Uuid, _filters: &[WagerFilter]) -> StoreResult<Vec<Wager>> {
            self.fail()
        }

        async fn update(&self, _wager: &Wager) -> StoreResult<Uuid> {
            self.fail()
        }

        async fn delete(&self, _table_id: Uuid, _id: Uuid) -> StoreResult<Uuid> {
            self.fail()
        }
    }

    fn controller(number: u8) -> (WageringController, Arc<MemoryWagerStore>) {
        let store = Arc::new(MemoryWagerStore::new());
        let controller = WageringController::with_parts(
            store.clone(),
            Arc::new(BetTypeRegistry::standard()),
            Arc::new(FixedNumber::new(number).unwrap()),
            ResolutionPolicy::default(),
        );
        (controller, store)
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_id() {
        let (controller, store) = controller(0);
        let table_id = Uuid::new_v4();

        let mut wager = Wager::new(table_id, "straight", "17", 50, "GBP");
        let supplied = Uuid::new_v4();
        wager.id = supplied;

        let id = controller.create(wager).await.unwrap();
        assert_ne!(id, supplied);
        assert!(!id.is_nil());
        assert_eq!(store.list(table_id, &[]).await.unwrap()[0].id, id);
    }

    #[tokio::test]
    async fn test_invalid_wager_never_reaches_store() {
        let store = Arc::new(BrokenStore::default());
        let controller = WageringController::new(store.clone(), Arc::new(BetTypeRegistry::standard()));
        let table_id = Uuid::new_v4();

        let bad = [
            Wager::new(table_id, "straight", "37", 50, "GBP"),
            Wager::new(table_id, "corner", "1", 50, "GBP"),
            Wager::new(table_id, "red/black", "red", 0, "GBP"),
            Wager::new(Uuid::nil(), "red/black", "red", 5, "GBP"),
            Wager::new(table_id, "red/black", "red", 5, ""),
        ];
        for wager in bad {
            assert_eq!(controller.create(wager.clone()).await, Err(WagerError::Validation));
            let mut update = wager;
            update.id = Uuid::new_v4();
            assert_eq!(controller.update(update).await, Err(WagerError::Validation));
        }

        assert_eq!(controller.delete(Uuid::nil(), Uuid::new_v4()).await, Err(WagerError::Validation));
        assert_eq!(controller.delete(table_id, Uuid::nil()).await, Err(WagerError::Validation));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failures_are_coarse() {
        let store = Arc::new(BrokenStore::default());
        let controller = WageringController::new(store.clone(), Arc::new(BetTypeRegistry::standard()));
        let table_id = Uuid::new_v4();

        let wager = Wager::new(table_id, "red/black", "black", 10, "USD");
        assert_eq!(controller.create(wager.clone()).await, Err(WagerError::Create));
        assert_eq!(controller.list(table_id).await, Err(WagerError::List));
        assert_eq!(controller.play(table_id).await, Err(WagerError::List));

        let mut update = wager;
        update.id = Uuid::new_v4();
        let err = controller.update(update).await.unwrap_err();
        assert_eq!(err, WagerError::Update { no_matching_record: false });
        assert!(!err.is_no_matching_record());

        let err = controller.delete(table_id, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err, WagerError::Delete { no_matching_record: false });
        assert_eq!(err.to_string(), "unable to delete bet");
        assert_eq!(store.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_update_replaces_wager() {
        let (controller, _store) = controller(0);
        let table_id = Uuid::new_v4();
        let id = controller
            .create(Wager::new(table_id, "dozen", "1-12", 20, "EUR"))
            .await
            .unwrap();

        let mut changed = Wager::new(table_id, "dozen", "25-36", 40, "EUR");
        changed.id = id;
        assert_eq!(controller.update(changed.clone()).await, Ok(id));
        assert_eq!(controller.list(table_id).await.unwrap(), vec![changed]);
    }

    #[tokio::test]
    async fn test_missing_records() {
        let (controller, _store) = controller(0);
        let table_id = Uuid::new_v4();

        let mut ghost = Wager::new(table_id, "straight", "5", 10, "GBP");
        ghost.id = Uuid::new_v4();
        let err = controller.update(ghost).await.unwrap_err();
        assert!(err.is_no_matching_record());
        assert_eq!(err.to_string(), "unable to update bet");

        let err = controller.delete(table_id, Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_no_matching_record());
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let (controller, _store) = controller(0);
        let table_id = Uuid::new_v4();
        for selection in ["1", "2", "3"] {
            controller
                .create(Wager::new(table_id, "column", selection, 10, "GBP"))
                .await
                .unwrap();
        }

        let first = controller.list(table_id).await.unwrap();
        let second = controller.list(table_id).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_play_reports_winners_without_settling() {
        let (controller, store) = controller(17);
        let table_id = Uuid::new_v4();
        let id = controller
            .create(Wager::new(table_id, "straight", "17", 50, "GBP"))
            .await
            .unwrap();
        controller
            .create(Wager::new(table_id, "red/black", "red", 10, "GBP"))
            .await
            .unwrap();

        let result = controller.play(table_id).await.unwrap();
        assert_eq!(result.number, 17);
        assert_eq!(result.color, Color::Black);
        assert_eq!(result.winners.len(), 1);
        assert_eq!(result.winners[0].bet_id, id);
        assert_eq!(result.winners[0].amount, 50);

        // Same wagers win again on the next round
        assert_eq!(controller.play(table_id).await.unwrap(), result);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_tables_leave_no_locks_behind() {
        let (controller, _store) = controller(5);

        for _ in 0..1000 {
            let result = controller.play(Uuid::new_v4()).await.unwrap();
            assert!(result.winners.is_empty());

            let err = controller
                .delete(Uuid::new_v4(), Uuid::new_v4())
                .await
                .unwrap_err();
            assert!(err.is_no_matching_record());
        }

        let table_id = Uuid::new_v4();
        let id = controller
            .create(Wager::new(table_id, "odd/even", "odd", 10, "GBP"))
            .await
            .unwrap();
        let mut changed = Wager::new(table_id, "odd/even", "even", 10, "GBP");
        changed.id = id;
        controller.update(changed).await.unwrap();

        assert_eq!(controller.locks().tracked_tables(), 0);
    }
}
