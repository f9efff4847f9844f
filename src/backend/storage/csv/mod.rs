//! # CSV Storage Module
//!
//! File-based storage for the library: one CSV file per collection inside a
//! single data directory, full-file reads and staged all-or-nothing rewrites.
//!
//! ## File Format
//!
//! Each table carries a header row followed by data rows, dates in ISO
//! `YYYY-MM-DD`:
//! ```csv
//! TransactionID,MemberID,BookID,IssueDate,ReturnDate,Fine
//! 1,1001,101,2024-05-02,2024-05-12,30
//! 2,1002,103,2024-05-20,,0
//! ```

pub mod connection;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use store::CsvStore;
