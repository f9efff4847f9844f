//! # Library Tracker
//!
//! A single-user library management system: books, members, and
//! borrow/return transactions persisted as CSV tables, driven from a
//! menu-based console interface.
//!
//! The interesting part lives in [`backend::domain`]: the transaction
//! engine that issues and returns books while keeping stock counts, open
//! loans, and collected fines consistent with each other. The console in
//! [`cli`] is presentation glue around it.

pub mod backend;
pub mod cli;
