//! Backup/restore collaborator: timestamped copies of the data files.
//!
//! Backups are plain directory copies under `backups/` next to the data
//! directory. Must not run while a mutating operation is in flight; with a
//! single synchronous menu loop that cannot happen.
use anyhow::{bail, Context, Result};
use chrono::Local;
use log::info;
use std::fs;
use std::path::PathBuf;

use crate::backend::storage::CsvConnection;

const BACKUP_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "backup_";

#[derive(Clone)]
pub struct BackupService {
    connection: CsvConnection,
}

impl BackupService {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn backup_root(&self) -> PathBuf {
        self.connection.base_directory().join(BACKUP_DIR)
    }

    /// Copy every existing data file into a fresh timestamped directory.
    /// Returns the backup name, e.g. `backup_2024-05-02_14-30-05`.
    pub fn backup_data(&self) -> Result<String> {
        let name = format!(
            "{}{}",
            BACKUP_PREFIX,
            Local::now().format("%Y-%m-%d_%H-%M-%S")
        );
        let target = self.backup_root().join(&name);
        fs::create_dir_all(&target).with_context(|| format!("creating {:?}", target))?;

        let mut copied = 0;
        for source in self.connection.existing_data_files() {
            // file_name is always present for the fixed table paths
            if let Some(file_name) = source.file_name() {
                fs::copy(&source, target.join(file_name))
                    .with_context(|| format!("copying {:?}", source))?;
                copied += 1;
            }
        }
        info!("Backed up {} files to {:?}", copied, target);
        Ok(name)
    }

    /// Backup names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        let root = self.backup_root();
        if !root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(BACKUP_PREFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        names.reverse();
        Ok(names)
    }

    /// Overwrite the live data files from a named backup.
    pub fn restore_backup(&self, name: &str) -> Result<u32> {
        let source_dir = self.backup_root().join(name);
        if !source_dir.is_dir() {
            bail!("Backup '{}' not found", name);
        }
        let mut restored = 0;
        for entry in fs::read_dir(&source_dir)? {
            let entry = entry?;
            let source = entry.path();
            if !source.is_file() {
                continue;
            }
            if let Some(file_name) = source.file_name() {
                let target = self.connection.base_directory().join(file_name);
                fs::copy(&source, &target)
                    .with_context(|| format!("restoring {:?}", target))?;
                restored += 1;
            }
        }
        info!("Restored {} files from backup '{}'", restored, name);
        Ok(restored)
    }
}
