//! # Storage Traits
//!
//! Abstraction over the durable tabular store so the domain layer can work
//! against any backend (CSV files today, a database later) without
//! modification. All operations are synchronous; this is a single-user
//! desktop application.

use anyhow::Result;
use crate::backend::domain::models::LibrarySnapshot;

/// The sole owner of durable state.
///
/// Callers follow a strict load → mutate → save cycle per operation: read
/// the full snapshot, change it in memory, write it back whole. Last save
/// wins; there is no merging and no caching across operations.
pub trait LibraryStore: Send + Sync {
    /// Read all three collections, creating any missing backing file and
    /// seeding it with its header row first.
    fn load(&self) -> Result<LibrarySnapshot>;

    /// Rewrite all three collections in full.
    fn save(&self, snapshot: &LibrarySnapshot) -> Result<()>;
}
