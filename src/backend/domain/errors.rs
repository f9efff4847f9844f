//! Typed errors for the library domain.
//!
//! Every core operation reports failure as one of these variants so the
//! console layer can choose a message category (not-found, out-of-stock,
//! invalid-input, storage) without inspecting strings. Storage-level
//! failures (locked file, unwritable directory) are wrapped rather than
//! enumerated; the store recovers from corrupt cells itself by defaulting.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Book ID {0} not found")]
    BookNotFound(u32),

    #[error("Member ID {0} not found")]
    MemberNotFound(u32),

    #[error("Book ID {0} is out of stock")]
    OutOfStock(u32),

    #[error("No active loan for member {member_id} and book {book_id}")]
    NoActiveLoan { member_id: u32, book_id: u32 },

    #[error("Member {0} still has a book issued")]
    MemberHasActiveLoan(u32),

    #[error("{field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type LibraryResult<T> = Result<T, LibraryError>;
