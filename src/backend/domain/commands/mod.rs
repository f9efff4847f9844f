//! Command and result structs exchanged between the console layer and the
//! domain services.

pub mod books;
pub mod members;
pub mod reports;
pub mod transactions;
