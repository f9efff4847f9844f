//! Catalogue management for books.
use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::commands::books::{
    AddBookCommand, AddBookResult, DeleteBookCommand, ListBooksResult, SearchBooksQuery,
    SearchBooksResult,
};
use crate::backend::domain::errors::{LibraryError, LibraryResult};
use crate::backend::domain::models::{Book, BookInventoryView};
use crate::backend::storage::LibraryStore;

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn LibraryStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    pub fn add_book(&self, command: AddBookCommand) -> LibraryResult<AddBookResult> {
        let title = command.title.trim().to_string();
        let author = command.author.trim().to_string();
        if title.is_empty() {
            return Err(LibraryError::InvalidInput {
                field: "title",
                reason: "must not be empty",
            });
        }
        if author.is_empty() {
            return Err(LibraryError::InvalidInput {
                field: "author",
                reason: "must not be empty",
            });
        }

        let mut snapshot = self.store.load()?;
        let book = Book::new(snapshot.next_book_id(), title, author, command.quantity);
        info!("Adding book {}: {}", book.id, book.title);
        snapshot.books.push(book.clone());
        self.store.save(&snapshot)?;
        Ok(AddBookResult { book })
    }

    /// All books with their derived issued and total counts.
    pub fn list_books(&self) -> LibraryResult<ListBooksResult> {
        let snapshot = self.store.load()?;
        let books = snapshot
            .books
            .iter()
            .map(|book| {
                let issued = snapshot.open_loans_for_book(book.id);
                BookInventoryView {
                    total: book.quantity + issued,
                    issued,
                    book: book.clone(),
                }
            })
            .collect();
        Ok(ListBooksResult { books })
    }

    /// Match an exact BookID or a case-insensitive substring of the title.
    pub fn search_books(&self, query: SearchBooksQuery) -> LibraryResult<SearchBooksResult> {
        let needle = query.query.trim().to_lowercase();
        let snapshot = self.store.load()?;
        let books = snapshot
            .books
            .iter()
            .filter(|b| b.id.to_string() == needle || b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(SearchBooksResult { books })
    }

    /// Unconditional delete; open loans for the book are left in the ledger.
    pub fn delete_book(&self, command: DeleteBookCommand) -> LibraryResult<()> {
        let mut snapshot = self.store.load()?;
        let before = snapshot.books.len();
        snapshot.books.retain(|b| b.id != command.book_id);
        if snapshot.books.len() == before {
            warn!("Delete requested for unknown book {}", command.book_id);
            return Err(LibraryError::BookNotFound(command.book_id));
        }
        self.store.save(&snapshot)?;
        info!("Deleted book {}", command.book_id);
        Ok(())
    }
}
