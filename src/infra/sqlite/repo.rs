use std::path::PathBuf;

use crate::domain::entities::table::{SavedTableState, TableKey};
use crate::infra::sqlite::queries::{
    clear_table_state, list_table_keys, load_table_state, save_table_state,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{RepoError, TableStateRepository};

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl TableStateRepository for SqliteRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(|err| RepoError::Message(err.to_string()))
    }

    fn load_state(&self, key: &TableKey) -> Result<Option<SavedTableState>, RepoError> {
        load_table_state(&self.db_path, &key.0).map_err(|err| RepoError::Message(err.to_string()))
    }

    fn save_state(&self, key: &TableKey, state: &SavedTableState) -> Result<(), RepoError> {
        save_table_state(&self.db_path, &key.0, state)
            .map_err(|err| RepoError::Message(err.to_string()))
    }

    fn clear_state(&self, key: &TableKey) -> Result<(), RepoError> {
        clear_table_state(&self.db_path, &key.0).map_err(|err| RepoError::Message(err.to_string()))
    }

    fn list_keys(&self) -> Result<Vec<TableKey>, RepoError> {
        list_table_keys(&self.db_path)
            .map(|keys| keys.into_iter().map(TableKey).collect())
            .map_err(|err| RepoError::Message(err.to_string()))
    }
}
