//! Table controller

use crate::common::traits::TableStore;
use crate::common::types::Table;
use crate::errors::{StoreError, TableError};
use crate::games::validation::TableValidator;
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Orchestrates table CRUD against a `TableStore`
#[derive(Clone)]
pub struct TableController {
    store: Arc<dyn TableStore>,
    validator: TableValidator,
}

impl TableController {
    pub fn new(store: Arc<dyn TableStore>, validator: TableValidator) -> Self {
        Self { store, validator }
    }

    /// Validate and persist a new table under a freshly generated identifier
    pub async fn create(&self, mut table: Table) -> Result<Uuid, TableError> {
        table.id = Uuid::new_v4();

        if let Err(e) = self.validator.validate(&table) {
            warn!(error = %e, name = %table.name, "{}", TableError::Validation);
            return Err(TableError::Validation);
        }

        match self.store.create(&table).await {
            Ok(id) => {
                debug!(table_id = %id, name = %table.name, "Table created");
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "{}", TableError::Create);
                Err(TableError::Create)
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Table>, TableError> {
        self.store.list().await.map_err(|e| {
            error!(error = %e, "{}", TableError::List);
            TableError::List
        })
    }

    /// Replace an existing table
    pub async fn update(&self, table: Table) -> Result<Uuid, TableError> {
        if let Err(e) = self.validator.validate_update(&table) {
            warn!(error = %e, table_id = %table.id, "{}", TableError::Validation);
            return Err(TableError::Validation);
        }

        self.store.update(&table).await.map_err(|e| {
            let failure = TableError::Update {
                no_matching_record: e == StoreError::NoMatchingRecord,
            };
            error!(error = %e, table_id = %table.id, "{}", failure);
            failure
        })
    }

    /// Logically remove a table
    pub async fn delete(&self, id: Uuid) -> Result<Uuid, TableError> {
        if id.is_nil() {
            warn!("{}: missing table id", TableError::Validation);
            return Err(TableError::Validation);
        }

        self.store.delete(id).await.map_err(|e| {
            let failure = TableError::Delete {
                no_matching_record: e == StoreError::NoMatchingRecord,
            };
            error!(error = %e, table_id = %id, "{}", failure);
            failure
        })
    }
}
