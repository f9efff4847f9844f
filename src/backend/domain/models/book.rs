//! Domain model for a book.

/// First BookID handed out when the catalogue is empty.
pub const BOOK_ID_SEED: u32 = 101;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    /// Copies currently available for issue. Excludes open loans; the total
    /// number of copies is derived, never stored.
    pub quantity: u32,
}

impl Book {
    pub fn new(id: u32, title: String, author: String, quantity: u32) -> Self {
        Self {
            id,
            title,
            author,
            quantity,
        }
    }
}

/// A book together with counts derived from the transaction ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInventoryView {
    pub book: Book,
    /// Open loans currently referencing this book.
    pub issued: u32,
    /// Available + issued.
    pub total: u32,
}
