/// Test utilities providing a temp-directory-backed store per test.
///
/// RAII cleanup: the TempDir is dropped with the environment, so test data
/// is removed even when a test panics.
use anyhow::Result;
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::store::CsvStore;
use crate::backend::domain::models::{Book, LibrarySnapshot, Member};
use crate::backend::storage::traits::LibraryStore;

pub struct TestEnvironment {
    pub connection: CsvConnection,
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // keep alive until drop
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Environment plus a store pre-seeded with a book and a member, which is
/// what most transaction-flow tests start from.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub store: CsvStore,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let store = CsvStore::new(env.connection.clone());
        Ok(Self { env, store })
    }

    /// Seed the store with one book (given stock) and one member, returning
    /// their ids.
    pub fn seed_book_and_member(&self, quantity: u32) -> Result<(u32, u32)> {
        let mut snapshot = self.store.load()?;
        let book_id = snapshot.next_book_id();
        snapshot.books.push(Book::new(
            book_id,
            "The Pragmatic Programmer".into(),
            "Hunt & Thomas".into(),
            quantity,
        ));
        let member_id = snapshot.next_member_id();
        snapshot
            .members
            .push(Member::new(member_id, "Asha Rao".into(), "555-0101".into()));
        self.store.save(&snapshot)?;
        Ok((book_id, member_id))
    }

    pub fn snapshot(&self) -> Result<LibrarySnapshot> {
        self.store.load()
    }
}
