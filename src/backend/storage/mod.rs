//! Storage layer: the durable-store abstraction and its CSV implementation.

pub mod csv;
pub mod traits;

pub use csv::{CsvConnection, CsvStore};
pub use traits::LibraryStore;
