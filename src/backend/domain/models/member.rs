//! Domain model for a library member.

/// First MemberID handed out when the register is empty.
pub const MEMBER_ID_SEED: u32 = 1001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub phone: String,
    /// Stored and round-tripped but NOT updated by issue/return. The legacy
    /// data carries this column without maintaining it, so we preserve it
    /// as-is rather than silently start keeping it in sync.
    pub books_issued: u32,
}

impl Member {
    pub fn new(id: u32, name: String, phone: String) -> Self {
        Self {
            id,
            name,
            phone,
            books_issued: 0,
        }
    }
}
