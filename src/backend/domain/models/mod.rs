//! Strongly-typed records for the three persisted collections, plus the
//! in-memory snapshot that owns stock and id-allocation logic.
//!
//! Rows are parsed into these types once at load time; nothing downstream
//! re-parses cell text.

pub mod book;
pub mod member;
pub mod transaction;

pub use book::{Book, BookInventoryView, BOOK_ID_SEED};
pub use member::{Member, MEMBER_ID_SEED};
pub use transaction::{
    calculate_fine, Transaction, DUE_DAYS, FINE_PER_DAY, TRANSACTION_ID_SEED,
};

use crate::backend::domain::errors::LibraryError;

/// Working copy of all durable state for the duration of one operation.
///
/// Every service operation reloads a fresh snapshot from the store, mutates
/// it, and saves it back; snapshots are never cached across operations. The
/// stock and lookup methods here are the only code that touches `quantity`,
/// so the ledger invariants live in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibrarySnapshot {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub transactions: Vec<Transaction>,
}

impl LibrarySnapshot {
    pub fn book(&self, book_id: u32) -> Option<&Book> {
        self.books.iter().find(|b| b.id == book_id)
    }

    pub fn member(&self, member_id: u32) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Take one copy of `book_id` out of stock.
    ///
    /// Refuses when the book is unknown or has no available copies, which is
    /// what keeps `quantity` from ever going negative.
    pub fn decrement_stock(&mut self, book_id: u32) -> Result<(), LibraryError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == book_id)
            .ok_or(LibraryError::BookNotFound(book_id))?;
        if book.quantity == 0 {
            return Err(LibraryError::OutOfStock(book_id));
        }
        book.quantity -= 1;
        Ok(())
    }

    /// Put one copy of `book_id` back into stock. No upper bound: the total
    /// number of copies is derived from open loans, not stored.
    pub fn increment_stock(&mut self, book_id: u32) -> Result<(), LibraryError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == book_id)
            .ok_or(LibraryError::BookNotFound(book_id))?;
        book.quantity += 1;
        Ok(())
    }

    /// Open loans currently referencing `book_id`.
    pub fn open_loans_for_book(&self, book_id: u32) -> u32 {
        self.transactions
            .iter()
            .filter(|t| t.book_id == book_id && t.is_open())
            .count() as u32
    }

    /// Whether `member_id` has at least one open loan. Guards member deletion.
    pub fn member_has_open_loan(&self, member_id: u32) -> bool {
        self.transactions
            .iter()
            .any(|t| t.member_id == member_id && t.is_open())
    }

    /// First open loan matching both ids, in storage order. When the same
    /// member holds the same title twice, the earliest-appearing row wins;
    /// that matches the legacy ledger scan and is deliberate.
    pub fn find_open_loan_mut(
        &mut self,
        member_id: u32,
        book_id: u32,
    ) -> Option<&mut Transaction> {
        self.transactions
            .iter_mut()
            .find(|t| t.member_id == member_id && t.book_id == book_id && t.is_open())
    }

    pub fn next_book_id(&self) -> u32 {
        next_id(self.books.last().map(|b| b.id), BOOK_ID_SEED)
    }

    pub fn next_member_id(&self) -> u32 {
        next_id(self.members.last().map(|m| m.id), MEMBER_ID_SEED)
    }

    pub fn next_transaction_id(&self) -> u32 {
        next_id(self.transactions.last().map(|t| t.id), TRANSACTION_ID_SEED)
    }
}

/// Incremental id allocation: one past the last row's id, falling back to the
/// seed when the collection is empty or the last id was unparsable (stored as
/// the 0 sentinel by the loader). Ids are never reused after deletions.
fn next_id(last: Option<u32>, seed: u32) -> u32 {
    match last {
        Some(0) | None => seed,
        Some(id) => id + 1,
    }
}
