//! Result types for the read-only reports.
use crate::backend::domain::models::Transaction;

#[derive(Debug, Clone)]
pub struct ActiveIssuesResult {
    pub transactions: Vec<Transaction>,
}

/// One overdue open loan. The fine here is an estimate against today, not
/// the amount that will eventually be charged at return time.
#[derive(Debug, Clone)]
pub struct OverdueEntry {
    pub transaction: Transaction,
    pub days_late: i64,
    pub estimated_fine: i64,
}

#[derive(Debug, Clone)]
pub struct OverdueReportResult {
    pub entries: Vec<OverdueEntry>,
    pub total_estimated_fine: i64,
}

#[derive(Debug, Clone)]
pub struct TotalFineResult {
    /// Sum of `fine` over every transaction; open loans contribute 0.
    pub total: i64,
}
