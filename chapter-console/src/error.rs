//! Console error type

use std::path::PathBuf;

use chapter_lib::error::AuthError;
use chapter_table::TableError;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid data in {path}: {source}")]
    Data {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("table error: {0}")]
    Table(#[from] TableError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("session error: {0}")]
    Auth(#[from] AuthError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no project in data file")]
    MissingProject,
}
