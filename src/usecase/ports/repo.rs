use thiserror::Error;

use crate::domain::entities::table::{SavedTableState, TableKey};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    #[error("{0}")]
    Message(String),
}

pub trait TableStateRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn load_state(&self, key: &TableKey) -> Result<Option<SavedTableState>, RepoError>;
    fn save_state(&self, key: &TableKey, state: &SavedTableState) -> Result<(), RepoError>;
    fn clear_state(&self, key: &TableKey) -> Result<(), RepoError>;
    fn list_keys(&self) -> Result<Vec<TableKey>, RepoError>;
}
