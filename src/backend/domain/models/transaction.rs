//! Domain model for a borrow/return transaction.
use chrono::NaiveDate;

/// First TransactionID handed out when the ledger is empty.
pub const TRANSACTION_ID_SEED: u32 = 1;

/// Grace period before fines accrue, in whole days.
pub const DUE_DAYS: i64 = 7;

/// Fine charged per day past the due window.
pub const FINE_PER_DAY: i64 = 10;

/// One loan record. Created open at issue time and closed exactly once at
/// return time; never reopened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: u32,
    pub member_id: u32,
    pub book_id: u32,
    /// `None` only for corrupt stored rows whose date failed to parse; such
    /// rows never accrue fines and are skipped by the overdue report.
    pub issue_date: Option<NaiveDate>,
    /// `None` means the loan is still open and the book is out.
    pub return_date: Option<NaiveDate>,
    /// Set once, at return time. Open loans always carry 0.
    pub fine: i64,
}

impl Transaction {
    pub fn open(id: u32, member_id: u32, book_id: u32, issue_date: NaiveDate) -> Self {
        Self {
            id,
            member_id,
            book_id,
            issue_date: Some(issue_date),
            return_date: None,
            fine: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Fine owed for a loan issued on `issue_date` and returned on `return_date`.
///
/// Whole days only; the first `DUE_DAYS` days are free, every day past that
/// costs `FINE_PER_DAY`. A return before the issue date (clock skew, edited
/// files) yields 0 rather than a negative fine.
pub fn calculate_fine(issue_date: Option<NaiveDate>, return_date: NaiveDate) -> i64 {
    let Some(issue_date) = issue_date else {
        // Unparsable issue date: non-fatal, no fine.
        return 0;
    };
    let days = (return_date - issue_date).num_days();
    if days > DUE_DAYS {
        (days - DUE_DAYS) * FINE_PER_DAY
    } else {
        0
    }
}
