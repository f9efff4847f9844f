//! # Backend Module
//!
//! Wires the storage layer and domain services together for the console
//! front end. Everything is synchronous; this is a single-user desktop
//! application with no async runtime.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use storage::CsvConnection;

use domain::{
    AuthService, BackupService, BookService, MemberService, ReportService, TransactionService,
};
use storage::{CsvStore, LibraryStore};

/// Main backend struct that orchestrates all services.
pub struct Backend {
    pub auth_service: AuthService,
    pub book_service: BookService,
    pub member_service: MemberService,
    pub transaction_service: TransactionService,
    pub report_service: ReportService,
    pub backup_service: BackupService,
}

impl Backend {
    /// Create a backend over a data directory, creating it if needed.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let connection = CsvConnection::new(data_dir)?;
        let store: Arc<dyn LibraryStore> = Arc::new(CsvStore::new(connection.clone()));

        Ok(Backend {
            auth_service: AuthService::new(connection.clone()),
            book_service: BookService::new(store.clone()),
            member_service: MemberService::new(store.clone()),
            transaction_service: TransactionService::new(store.clone()),
            report_service: ReportService::new(store.clone()),
            backup_service: BackupService::new(connection),
        })
    }
}
