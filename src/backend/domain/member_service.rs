//! Register management for members.
use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::commands::members::{
    AddMemberCommand, AddMemberResult, DeleteMemberCommand, ListMembersResult, SearchMemberQuery,
    SearchMemberResult,
};
use crate::backend::domain::errors::{LibraryError, LibraryResult};
use crate::backend::domain::models::Member;
use crate::backend::storage::LibraryStore;

#[derive(Clone)]
pub struct MemberService {
    store: Arc<dyn LibraryStore>,
}

impl MemberService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    pub fn add_member(&self, command: AddMemberCommand) -> LibraryResult<AddMemberResult> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(LibraryError::InvalidInput {
                field: "name",
                reason: "must not be empty",
            });
        }

        let mut snapshot = self.store.load()?;
        let member = Member::new(
            snapshot.next_member_id(),
            name,
            command.phone.trim().to_string(),
        );
        info!("Adding member {}: {}", member.id, member.name);
        snapshot.members.push(member.clone());
        self.store.save(&snapshot)?;
        Ok(AddMemberResult { member })
    }

    pub fn list_members(&self) -> LibraryResult<ListMembersResult> {
        let snapshot = self.store.load()?;
        Ok(ListMembersResult {
            members: snapshot.members,
        })
    }

    pub fn search_member(&self, query: SearchMemberQuery) -> LibraryResult<SearchMemberResult> {
        let snapshot = self.store.load()?;
        Ok(SearchMemberResult {
            member: snapshot.member(query.member_id).cloned(),
        })
    }

    /// Guarded delete: a member still holding a book cannot be removed.
    pub fn delete_member(&self, command: DeleteMemberCommand) -> LibraryResult<()> {
        let mut snapshot = self.store.load()?;

        if snapshot.member_has_open_loan(command.member_id) {
            warn!(
                "Refusing to delete member {}: open loan on record",
                command.member_id
            );
            return Err(LibraryError::MemberHasActiveLoan(command.member_id));
        }

        let before = snapshot.members.len();
        snapshot.members.retain(|m| m.id != command.member_id);
        if snapshot.members.len() == before {
            return Err(LibraryError::MemberNotFound(command.member_id));
        }
        self.store.save(&snapshot)?;
        info!("Deleted member {}", command.member_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::Transaction;
    use crate::backend::storage::csv::test_utils::TestHelper;

    fn service(helper: &TestHelper) -> MemberService {
        MemberService::new(Arc::new(helper.store.clone()))
    }

    fn add(service: &MemberService, name: &str) -> Member {
        service
            .add_member(AddMemberCommand {
                name: name.into(),
                phone: "555-0101".into(),
            })
            .unwrap()
            .member
    }

    #[test]
    fn first_member_gets_seed_id_and_ids_increment() {
        let helper = TestHelper::new().unwrap();
        let service = service(&helper);
        assert_eq!(add(&service, "Asha Rao").id, 1001);
        assert_eq!(add(&service, "Ben Okoye").id, 1002);
    }

    #[test]
    fn search_finds_exact_id_only() {
        let helper = TestHelper::new().unwrap();
        let service = service(&helper);
        add(&service, "Asha Rao");

        let found = service
            .search_member(SearchMemberQuery { member_id: 1001 })
            .unwrap();
        assert_eq!(found.member.unwrap().name, "Asha Rao");

        let missing = service
            .search_member(SearchMemberQuery { member_id: 1002 })
            .unwrap();
        assert!(missing.member.is_none());
    }

    #[test]
    fn delete_refused_while_loan_is_open_then_allowed() {
        let helper = TestHelper::new().unwrap();
        let service = service(&helper);
        let member = add(&service, "Asha Rao");

        let issued = chrono::NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let mut snapshot = helper.snapshot().unwrap();
        snapshot
            .transactions
            .push(Transaction::open(1, member.id, 101, issued));
        helper.store.save(&snapshot).unwrap();

        let refused = service.delete_member(DeleteMemberCommand {
            member_id: member.id,
        });
        assert!(matches!(
            refused,
            Err(LibraryError::MemberHasActiveLoan(id)) if id == member.id
        ));

        // Close the loan; the same delete now succeeds.
        let mut snapshot = helper.snapshot().unwrap();
        snapshot.transactions[0].return_date = Some(issued);
        helper.store.save(&snapshot).unwrap();

        service
            .delete_member(DeleteMemberCommand {
                member_id: member.id,
            })
            .unwrap();
        assert!(helper.snapshot().unwrap().members.is_empty());
    }

    #[test]
    fn delete_unknown_member_reports_not_found() {
        let helper = TestHelper::new().unwrap();
        let result = service(&helper).delete_member(DeleteMemberCommand { member_id: 9999 });
        assert!(matches!(result, Err(LibraryError::MemberNotFound(9999))));
    }
}
