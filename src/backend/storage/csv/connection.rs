//! Handle to the data directory holding the CSV tables.

use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const BOOKS_FILE: &str = "books.csv";
pub const MEMBERS_FILE: &str = "members.csv";
pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const USERS_FILE: &str = "users.csv";

/// Cheap, cloneable pointer to the directory containing all data files.
/// Every store and service receives one explicitly; there is no shared
/// global file handle.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    pub fn new(base_directory: impl AsRef<Path>) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        if !base_directory.exists() {
            fs::create_dir_all(&base_directory)?;
            info!("Created data directory: {:?}", base_directory);
        }
        Ok(Self { base_directory })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn books_path(&self) -> PathBuf {
        self.base_directory.join(BOOKS_FILE)
    }

    pub fn members_path(&self) -> PathBuf {
        self.base_directory.join(MEMBERS_FILE)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.base_directory.join(TRANSACTIONS_FILE)
    }

    pub fn users_path(&self) -> PathBuf {
        self.base_directory.join(USERS_FILE)
    }

    /// Files the backup collaborator copies. Only files that exist are
    /// returned, so a fresh installation backs up cleanly.
    pub fn existing_data_files(&self) -> Vec<PathBuf> {
        [
            self.books_path(),
            self.members_path(),
            self.transactions_path(),
            self.users_path(),
        ]
        .into_iter()
        .filter(|p| p.exists())
        .collect()
    }
}
