//! Issue/return state machine and fine computation.
//!
//! Each operation follows the load → validate → mutate → save cycle. All
//! validation happens before any mutation, and the in-memory snapshot is
//! only written once everything has succeeded, so a failed operation leaves
//! durable state exactly as it was.
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::commands::transactions::{
    IssueBookCommand, IssueBookResult, ReturnBookCommand, ReturnBookResult,
};
use crate::backend::domain::errors::{LibraryError, LibraryResult};
use crate::backend::domain::models::{calculate_fine, Transaction};
use crate::backend::storage::LibraryStore;

#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn LibraryStore>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    pub fn issue_book(&self, command: IssueBookCommand) -> LibraryResult<IssueBookResult> {
        self.issue_book_on(command, Local::now().date_naive())
    }

    pub fn return_book(&self, command: ReturnBookCommand) -> LibraryResult<ReturnBookResult> {
        self.return_book_on(command, Local::now().date_naive())
    }

    /// Issue with an explicit date; the public wrapper passes today.
    fn issue_book_on(
        &self,
        command: IssueBookCommand,
        today: NaiveDate,
    ) -> LibraryResult<IssueBookResult> {
        let mut snapshot = self.store.load()?;

        if snapshot.member(command.member_id).is_none() {
            return Err(LibraryError::MemberNotFound(command.member_id));
        }

        let transaction_id = snapshot.next_transaction_id();
        // Fails with BookNotFound or OutOfStock before anything is recorded.
        snapshot.decrement_stock(command.book_id)?;

        let transaction =
            Transaction::open(transaction_id, command.member_id, command.book_id, today);
        snapshot.transactions.push(transaction.clone());
        self.store.save(&snapshot)?;

        info!(
            "Issued book {} to member {} (transaction {})",
            command.book_id, command.member_id, transaction_id
        );
        Ok(IssueBookResult { transaction })
    }

    /// Return with an explicit date; the public wrapper passes today.
    fn return_book_on(
        &self,
        command: ReturnBookCommand,
        today: NaiveDate,
    ) -> LibraryResult<ReturnBookResult> {
        let mut snapshot = self.store.load()?;

        // First open loan in storage order wins when the member holds the
        // same title more than once.
        let loan = snapshot
            .find_open_loan_mut(command.member_id, command.book_id)
            .ok_or(LibraryError::NoActiveLoan {
                member_id: command.member_id,
                book_id: command.book_id,
            })?;

        let fine = calculate_fine(loan.issue_date, today);
        loan.return_date = Some(today);
        loan.fine = fine;
        let transaction = loan.clone();

        // The book may have been deleted from the catalogue while out on
        // loan; the return still closes the loan in that case.
        match snapshot.increment_stock(command.book_id) {
            Ok(()) => {}
            Err(LibraryError::BookNotFound(id)) => {
                warn!("Returned book {} no longer in catalogue", id);
            }
            Err(e) => return Err(e),
        }

        self.store.save(&snapshot)?;

        info!(
            "Returned book {} from member {} (transaction {}, fine {})",
            command.book_id, command.member_id, transaction.id, fine
        );
        Ok(ReturnBookResult {
            transaction,
            return_date: today,
            fine,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::TestHelper;
    use chrono::Duration;

    fn setup() -> (TestHelper, TransactionService, u32, u32) {
        let helper = TestHelper::new().unwrap();
        let (book_id, member_id) = helper.seed_book_and_member(2).unwrap();
        let service = TransactionService::new(Arc::new(helper.store.clone()));
        (helper, service, book_id, member_id)
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap() + Duration::days(offset)
    }

    fn issue(
        service: &TransactionService,
        member_id: u32,
        book_id: u32,
        today: NaiveDate,
    ) -> LibraryResult<IssueBookResult> {
        service.issue_book_on(IssueBookCommand { member_id, book_id }, today)
    }

    fn ret(
        service: &TransactionService,
        member_id: u32,
        book_id: u32,
        today: NaiveDate,
    ) -> LibraryResult<ReturnBookResult> {
        service.return_book_on(ReturnBookCommand { member_id, book_id }, today)
    }

    #[test]
    fn issue_decrements_stock_and_opens_transaction() {
        let (helper, service, book_id, member_id) = setup();
        let result = issue(&service, member_id, book_id, day(0)).unwrap();

        assert_eq!(result.transaction.id, 1);
        assert!(result.transaction.is_open());
        assert_eq!(result.transaction.fine, 0);
        assert_eq!(result.transaction.issue_date, Some(day(0)));

        let snapshot = helper.snapshot().unwrap();
        assert_eq!(snapshot.book(book_id).unwrap().quantity, 1);
        assert_eq!(snapshot.transactions.len(), 1);
    }

    #[test]
    fn issue_rejects_unknown_member_without_mutating() {
        let (helper, service, book_id, _) = setup();
        let before = helper.snapshot().unwrap();

        let result = issue(&service, 9999, book_id, day(0));
        assert!(matches!(result, Err(LibraryError::MemberNotFound(9999))));
        assert_eq!(helper.snapshot().unwrap(), before);
    }

    #[test]
    fn issue_rejects_unknown_book_without_mutating() {
        let (helper, service, _, member_id) = setup();
        let before = helper.snapshot().unwrap();

        let result = issue(&service, member_id, 999, day(0));
        assert!(matches!(result, Err(LibraryError::BookNotFound(999))));
        assert_eq!(helper.snapshot().unwrap(), before);
    }

    #[test]
    fn issue_at_zero_stock_fails_and_leaves_state_unchanged() {
        let (helper, service, book_id, member_id) = setup();
        issue(&service, member_id, book_id, day(0)).unwrap();
        issue(&service, member_id, book_id, day(0)).unwrap();
        let before = helper.snapshot().unwrap();
        assert_eq!(before.book(book_id).unwrap().quantity, 0);

        let result = issue(&service, member_id, book_id, day(0));
        assert!(matches!(result, Err(LibraryError::OutOfStock(id)) if id == book_id));
        assert_eq!(helper.snapshot().unwrap(), before);
    }

    #[test]
    fn same_day_return_restores_stock_with_no_fine() {
        let (helper, service, book_id, member_id) = setup();
        issue(&service, member_id, book_id, day(0)).unwrap();

        let result = ret(&service, member_id, book_id, day(0)).unwrap();
        assert_eq!(result.fine, 0);
        assert_eq!(result.return_date, day(0));

        let snapshot = helper.snapshot().unwrap();
        assert_eq!(snapshot.book(book_id).unwrap().quantity, 2);
        assert!(!snapshot.transactions[0].is_open());
    }

    #[test]
    fn return_without_open_loan_is_rejected() {
        let (_helper, service, book_id, member_id) = setup();
        let result = ret(&service, member_id, book_id, day(0));
        assert!(matches!(result, Err(LibraryError::NoActiveLoan { .. })));
    }

    #[test]
    fn return_closes_earliest_open_loan_first() {
        let (helper, service, book_id, member_id) = setup();
        issue(&service, member_id, book_id, day(0)).unwrap();
        issue(&service, member_id, book_id, day(3)).unwrap();

        let result = ret(&service, member_id, book_id, day(3)).unwrap();
        assert_eq!(result.transaction.id, 1);

        let snapshot = helper.snapshot().unwrap();
        assert!(!snapshot.transactions[0].is_open());
        assert!(snapshot.transactions[1].is_open());
    }

    #[test]
    fn return_tolerates_book_deleted_while_on_loan() {
        let (helper, service, book_id, member_id) = setup();
        issue(&service, member_id, book_id, day(0)).unwrap();

        let mut snapshot = helper.snapshot().unwrap();
        snapshot.books.retain(|b| b.id != book_id);
        helper.store.save(&snapshot).unwrap();

        let result = ret(&service, member_id, book_id, day(1)).unwrap();
        assert!(!result.transaction.is_open());
        assert!(helper.snapshot().unwrap().transactions[0].return_date.is_some());
    }

    #[test]
    fn save_failure_during_issue_leaves_durable_state_unchanged() {
        let (helper, service, book_id, member_id) = setup();
        let before = helper.snapshot().unwrap();

        // Block the ledger rewrite so the save fails mid-operation.
        let blocker = helper
            .env
            .connection
            .transactions_path()
            .with_extension("tmp");
        std::fs::create_dir(&blocker).unwrap();

        let result = issue(&service, member_id, book_id, day(0));
        assert!(matches!(result, Err(LibraryError::Storage(_))));
        std::fs::remove_dir(&blocker).unwrap();

        // The stock decrement was not committed without its loan record.
        let after = helper.snapshot().unwrap();
        assert_eq!(after, before);
        assert_eq!(after.book(book_id).unwrap().quantity, 2);
        assert_eq!(after.open_loans_for_book(book_id), 0);
    }

    /// Book with one copy, two members competing for it.
    #[test]
    fn single_copy_contention_scenario() {
        let helper = TestHelper::new().unwrap();
        let (book_id, m1) = helper.seed_book_and_member(1).unwrap();
        let mut snapshot = helper.snapshot().unwrap();
        let m2 = snapshot.next_member_id();
        snapshot.members.push(
            crate::backend::domain::models::Member::new(m2, "Ben Okoye".into(), "555-0102".into()),
        );
        helper.store.save(&snapshot).unwrap();
        let service = TransactionService::new(Arc::new(helper.store.clone()));

        issue(&service, m1, book_id, day(0)).unwrap();
        assert_eq!(helper.snapshot().unwrap().book(book_id).unwrap().quantity, 0);

        let blocked = issue(&service, m2, book_id, day(0));
        assert!(matches!(blocked, Err(LibraryError::OutOfStock(id)) if id == book_id));

        let returned = ret(&service, m1, book_id, day(10)).unwrap();
        assert_eq!(returned.fine, 30);
        assert_eq!(helper.snapshot().unwrap().book(book_id).unwrap().quantity, 1);

        issue(&service, m2, book_id, day(10)).unwrap();
        assert_eq!(helper.snapshot().unwrap().book(book_id).unwrap().quantity, 0);
    }

    #[test]
    fn transaction_ids_continue_from_ledger_tail() {
        let (_helper, service, book_id, member_id) = setup();
        issue(&service, member_id, book_id, day(0)).unwrap();
        ret(&service, member_id, book_id, day(0)).unwrap();
        let second = issue(&service, member_id, book_id, day(1)).unwrap();
        assert_eq!(second.transaction.id, 2);
    }
}
