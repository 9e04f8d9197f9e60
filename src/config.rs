use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

pub const DEFAULT_TABLE_KEY: &str = "symbols";
pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const DEFAULT_LOG_FILTER: &str = "info,portal_table=debug";

const DB_ENV: &str = "PORTAL_TABLE_DB";
const PAGE_SIZE_ENV: &str = "PORTAL_TABLE_PAGE_SIZE";
const LOG_ENV: &str = "PORTAL_TABLE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub table_key: String,
    /// `None` shows every row on a single page.
    pub page_size: Option<usize>,
    pub log_filter: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let db_path = match std::env::var_os(DB_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let page_size = match std::env::var(PAGE_SIZE_ENV) {
            Ok(text) => parse_page_size(&text)?,
            Err(_) => Some(DEFAULT_PAGE_SIZE),
        };
        let log_filter =
            std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            table_key: DEFAULT_TABLE_KEY.to_string(),
            page_size,
            log_filter,
        })
    }
}

/// `0` or `all` disables paging.
pub fn parse_page_size(text: &str) -> Result<Option<usize>> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    let size: usize = text
        .parse()
        .with_context(|| format!("invalid {PAGE_SIZE_ENV}: {text}"))?;
    Ok(Some(size).filter(|size| *size > 0))
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "portal-table")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("table_state.sqlite"))
}
