//! Domain layer: typed records, the command structs, and the services that
//! implement the library's business rules over a [`LibraryStore`].
//!
//! [`LibraryStore`]: crate::backend::storage::LibraryStore

pub mod auth_service;
pub mod backup_service;
pub mod book_service;
pub mod commands;
pub mod errors;
pub mod member_service;
pub mod models;
pub mod report_service;
pub mod transaction_service;

pub use auth_service::{AuthService, Role};
pub use backup_service::BackupService;
pub use book_service::BookService;
pub use errors::{LibraryError, LibraryResult};
pub use member_service::MemberService;
pub use report_service::ReportService;
pub use transaction_service::TransactionService;
