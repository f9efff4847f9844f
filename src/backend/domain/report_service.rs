//! Read-only reports derived from the transaction ledger.
use chrono::{Local, NaiveDate};
use log::debug;
use std::sync::Arc;

use crate::backend::domain::commands::reports::{
    ActiveIssuesResult, OverdueEntry, OverdueReportResult, TotalFineResult,
};
use crate::backend::domain::errors::LibraryResult;
use crate::backend::domain::models::{DUE_DAYS, FINE_PER_DAY};
use crate::backend::storage::LibraryStore;

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn LibraryStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// All open loans, in ledger order.
    pub fn active_issues(&self) -> LibraryResult<ActiveIssuesResult> {
        let snapshot = self.store.load()?;
        let transactions = snapshot
            .transactions
            .into_iter()
            .filter(|t| t.is_open())
            .collect::<Vec<_>>();
        debug!("{} active issues", transactions.len());
        Ok(ActiveIssuesResult { transactions })
    }

    /// Open loans past the due window, with fines estimated against today.
    /// The estimate uses the same rate as the real fine, which is only fixed
    /// at return time.
    pub fn overdue_report(&self) -> LibraryResult<OverdueReportResult> {
        self.overdue_report_on(Local::now().date_naive())
    }

    fn overdue_report_on(&self, today: NaiveDate) -> LibraryResult<OverdueReportResult> {
        let snapshot = self.store.load()?;
        let mut entries = Vec::new();
        for transaction in snapshot.transactions.into_iter().filter(|t| t.is_open()) {
            // Rows with corrupt issue dates cannot be aged; skip them.
            let Some(issue_date) = transaction.issue_date else {
                continue;
            };
            let days_passed = (today - issue_date).num_days();
            if days_passed > DUE_DAYS {
                let days_late = days_passed - DUE_DAYS;
                entries.push(OverdueEntry {
                    estimated_fine: days_late * FINE_PER_DAY,
                    days_late,
                    transaction,
                });
            }
        }
        let total_estimated_fine = entries.iter().map(|e| e.estimated_fine).sum();
        Ok(OverdueReportResult {
            entries,
            total_estimated_fine,
        })
    }

    /// Sum of fines across the whole ledger. Open loans carry 0 until they
    /// are returned, so this is the amount actually collected.
    pub fn total_fine_collected(&self) -> LibraryResult<TotalFineResult> {
        let snapshot = self.store.load()?;
        let total = snapshot.transactions.iter().map(|t| t.fine).sum();
        Ok(TotalFineResult { total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::Transaction;
    use crate::backend::storage::csv::test_utils::TestHelper;
    use chrono::Duration;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap() + Duration::days(offset)
    }

    fn seed_ledger(helper: &TestHelper) {
        let mut snapshot = helper.snapshot().unwrap();
        // Open, 10 days old by day(10): 3 days late.
        snapshot.transactions.push(Transaction::open(1, 1001, 101, day(0)));
        // Open but fresh.
        snapshot.transactions.push(Transaction::open(2, 1002, 102, day(9)));
        // Closed with a collected fine.
        snapshot.transactions.push(Transaction {
            return_date: Some(day(12)),
            fine: 50,
            ..Transaction::open(3, 1003, 103, day(0))
        });
        // Open with a corrupt issue date.
        snapshot.transactions.push(Transaction {
            issue_date: None,
            ..Transaction::open(4, 1004, 104, day(0))
        });
        helper.store.save(&snapshot).unwrap();
    }

    #[test]
    fn active_issues_lists_only_open_loans() {
        let helper = TestHelper::new().unwrap();
        seed_ledger(&helper);
        let service = ReportService::new(Arc::new(helper.store.clone()));

        let report = service.active_issues().unwrap();
        let ids: Vec<u32> = report.transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn overdue_report_ages_open_loans_against_today() {
        let helper = TestHelper::new().unwrap();
        seed_ledger(&helper);
        let service = ReportService::new(Arc::new(helper.store.clone()));

        let report = service.overdue_report_on(day(10)).unwrap();
        // Only transaction 1 is past the window; 2 is fresh, 3 is closed,
        // 4 has no usable issue date.
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].transaction.id, 1);
        assert_eq!(report.entries[0].days_late, 3);
        assert_eq!(report.entries[0].estimated_fine, 30);
        assert_eq!(report.total_estimated_fine, 30);
    }

    #[test]
    fn overdue_report_boundary_is_strictly_past_due_days() {
        let helper = TestHelper::new().unwrap();
        let mut snapshot = helper.snapshot().unwrap();
        snapshot.transactions.push(Transaction::open(1, 1001, 101, day(0)));
        helper.store.save(&snapshot).unwrap();
        let service = ReportService::new(Arc::new(helper.store.clone()));

        assert!(service.overdue_report_on(day(7)).unwrap().entries.is_empty());
        assert_eq!(service.overdue_report_on(day(8)).unwrap().entries.len(), 1);
    }

    #[test]
    fn total_fine_sums_closed_loans_only() {
        let helper = TestHelper::new().unwrap();
        seed_ledger(&helper);
        let service = ReportService::new(Arc::new(helper.store.clone()));

        assert_eq!(service.total_fine_collected().unwrap().total, 50);
    }
}
