//! Command and result types for book operations.
use crate::backend::domain::models::{Book, BookInventoryView};

#[derive(Debug, Clone)]
pub struct AddBookCommand {
    pub title: String,
    pub author: String,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct AddBookResult {
    pub book: Book,
}

#[derive(Debug, Clone)]
pub struct ListBooksResult {
    pub books: Vec<BookInventoryView>,
}

/// Free-text search: matches an exact BookID or a case-insensitive
/// substring of the title.
#[derive(Debug, Clone)]
pub struct SearchBooksQuery {
    pub query: String,
}

#[derive(Debug, Clone)]
pub struct SearchBooksResult {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone)]
pub struct DeleteBookCommand {
    pub book_id: u32,
}
