//! Command and result types for issue/return operations.
use chrono::NaiveDate;

use crate::backend::domain::models::Transaction;

#[derive(Debug, Clone)]
pub struct IssueBookCommand {
    pub member_id: u32,
    pub book_id: u32,
}

#[derive(Debug, Clone)]
pub struct IssueBookResult {
    /// The freshly created open loan.
    pub transaction: Transaction,
}

#[derive(Debug, Clone)]
pub struct ReturnBookCommand {
    pub member_id: u32,
    pub book_id: u32,
}

#[derive(Debug, Clone)]
pub struct ReturnBookResult {
    /// The loan as closed: return date and fine filled in.
    pub transaction: Transaction,
    pub return_date: NaiveDate,
    pub fine: i64,
}
