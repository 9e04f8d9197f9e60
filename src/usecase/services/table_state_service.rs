use std::sync::Arc;

use crate::domain::entities::table::{SavedTableState, TableKey};
use crate::usecase::ports::repo::{RepoError, TableStateRepository};

pub struct TableStateService {
    repo: Arc<dyn TableStateRepository>,
}

impl TableStateService {
    pub fn new(repo: Arc<dyn TableStateRepository>) -> Self {
        Self { repo }
    }

    pub fn init(&self) -> Result<(), RepoError> {
        self.repo.init()
    }

    pub fn restore(&self, key: &TableKey) -> Result<Option<SavedTableState>, RepoError> {
        let state = self.repo.load_state(key)?;
        tracing::debug!(table = %key.0, found = state.is_some(), "restored table state");
        Ok(state)
    }

    /// Skips the write when the state is empty and nothing was stored before.
    pub fn persist(&self, key: &TableKey, state: &SavedTableState) -> Result<(), RepoError> {
        if *state == SavedTableState::default() && self.repo.load_state(key)?.is_none() {
            return Ok(());
        }
        self.repo.save_state(key, state)?;
        tracing::info!(
            table = %key.0,
            filters = state.filters.len(),
            "persisted table state"
        );
        Ok(())
    }

    pub fn forget(&self, key: &TableKey) -> Result<(), RepoError> {
        self.repo.clear_state(key)
    }

    pub fn saved_tables(&self) -> Result<Vec<TableKey>, RepoError> {
        self.repo.list_keys()
    }
}
