//! Command and result types for member operations.
use crate::backend::domain::models::Member;

#[derive(Debug, Clone)]
pub struct AddMemberCommand {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct AddMemberResult {
    pub member: Member,
}

#[derive(Debug, Clone)]
pub struct ListMembersResult {
    pub members: Vec<Member>,
}

#[derive(Debug, Clone)]
pub struct SearchMemberQuery {
    pub member_id: u32,
}

#[derive(Debug, Clone)]
pub struct SearchMemberResult {
    pub member: Option<Member>,
}

#[derive(Debug, Clone)]
pub struct DeleteMemberCommand {
    pub member_id: u32,
}
