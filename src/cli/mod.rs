//! Console front end: login, menu loops, and error-to-message mapping.
//!
//! Pure glue. Every choice routes into a backend service and prints the
//! outcome; no business rules live here.

use anyhow::{bail, Result};
use std::io::{self, BufRead, Write};

use crate::backend::domain::commands::books::{
    AddBookCommand, DeleteBookCommand, SearchBooksQuery,
};
use crate::backend::domain::commands::members::{
    AddMemberCommand, DeleteMemberCommand, SearchMemberQuery,
};
use crate::backend::domain::commands::transactions::{IssueBookCommand, ReturnBookCommand};
use crate::backend::domain::LibraryError;
use crate::backend::Backend;

/// Map a domain error to the user-facing message category.
pub fn describe_error(error: &LibraryError) -> String {
    match error {
        LibraryError::BookNotFound(_)
        | LibraryError::MemberNotFound(_)
        | LibraryError::NoActiveLoan { .. } => format!("[INFO] {}", error),
        LibraryError::OutOfStock(_)
        | LibraryError::MemberHasActiveLoan(_)
        | LibraryError::InvalidInput { .. } => format!("[ERROR] {}", error),
        LibraryError::Storage(_) => format!(
            "[ERROR] {}. Close any program holding the data files and try again.",
            error
        ),
    }
}

/// Read one trimmed line; a 0-byte read means stdin is closed, which must
/// end the session rather than spin the menu loops on empty input.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!("end of input");
    }
    Ok(line.trim().to_string())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    read_trimmed_line(&mut io::stdin().lock())
}

fn prompt_u32(label: &str) -> Result<u32> {
    loop {
        match prompt(label)?.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("[ERROR] Please enter a number."),
        }
    }
}

/// Login loop, then the main menu. Returns when the user exits.
pub fn run(backend: &Backend) -> Result<()> {
    loop {
        println!("\nLIBRARY MANAGEMENT SYSTEM");
        println!("1. Login");
        println!("2. Exit");

        match prompt("Enter choice: ")?.as_str() {
            "1" => {
                let username = prompt("Username: ")?;
                let password = prompt("Password: ")?;
                match backend.auth_service.authenticate(&username, &password)? {
                    Some(role) => {
                        println!("\n[SUCCESS] Welcome, {}! Role: {}", username, role.as_str());
                        main_menu(backend, role.as_str())?;
                    }
                    None => println!("\n[ERROR] Invalid credentials. Please try again."),
                }
            }
            "2" => {
                println!("\n[INFO] Exiting system. Goodbye!");
                return Ok(());
            }
            _ => println!("\n[ERROR] Invalid choice. Please try again."),
        }
    }
}

fn main_menu(backend: &Backend, role: &str) -> Result<()> {
    loop {
        println!("\nMAIN MENU ({})", role);
        println!("1. Books Menu");
        println!("2. Members Menu");
        println!("3. Transactions Menu");
        println!("4. Reports Menu");
        println!("5. Backup/Restore");
        println!("6. Logout");

        match prompt("Enter choice: ")?.as_str() {
            "1" => books_menu(backend)?,
            "2" => members_menu(backend)?,
            "3" => transactions_menu(backend)?,
            "4" => reports_menu(backend)?,
            "5" => backup_menu(backend)?,
            "6" => {
                println!("\nLogging out...");
                return Ok(());
            }
            _ => println!("\n[ERROR] Invalid choice. Try again."),
        }
    }
}

fn books_menu(backend: &Backend) -> Result<()> {
    loop {
        println!("\nBOOKS MENU");
        println!("1. Add Book");
        println!("2. View Books");
        println!("3. Search Book");
        println!("4. Delete Book");
        println!("5. Back to Main Menu");

        match prompt("Enter choice: ")?.as_str() {
            "1" => {
                let title = prompt("Enter Book Title: ")?;
                let author = prompt("Enter Author Name: ")?;
                let quantity = prompt_u32("Enter Quantity: ")?;
                match backend.book_service.add_book(AddBookCommand {
                    title,
                    author,
                    quantity,
                }) {
                    Ok(result) => println!(
                        "\n[SUCCESS] Book added successfully.\nBook ID: {}",
                        result.book.id
                    ),
                    Err(e) => println!("\n{}", describe_error(&e)),
                }
            }
            "2" => match backend.book_service.list_books() {
                Ok(listing) if listing.books.is_empty() => println!("\n[INFO] No books found."),
                Ok(listing) => {
                    println!("\nLIBRARY BOOKS\n");
                    for view in listing.books {
                        println!(
                            "ID: {} | Title: {} | Author: {} | Available: {} | Issued: {} | Total: {}",
                            view.book.id,
                            view.book.title,
                            view.book.author,
                            view.book.quantity,
                            view.issued,
                            view.total
                        );
                    }
                }
                Err(e) => println!("\n{}", describe_error(&e)),
            },
            "3" => {
                let query = prompt("Enter Book ID or Title to search: ")?;
                match backend.book_service.search_books(SearchBooksQuery { query }) {
                    Ok(result) if result.books.is_empty() => {
                        println!("\n[INFO] No matching book found.")
                    }
                    Ok(result) => {
                        println!("\nSearch Results:");
                        for book in result.books {
                            println!(
                                "ID: {} | Title: {} | Author: {} | Qty: {}",
                                book.id, book.title, book.author, book.quantity
                            );
                        }
                    }
                    Err(e) => println!("\n{}", describe_error(&e)),
                }
            }
            "4" => {
                let book_id = prompt_u32("Enter Book ID to delete: ")?;
                match backend.book_service.delete_book(DeleteBookCommand { book_id }) {
                    Ok(()) => println!("\n[SUCCESS] Book deleted successfully."),
                    Err(e) => println!("\n{}", describe_error(&e)),
                }
            }
            "5" => return Ok(()),
            _ => println!("\n[ERROR] Invalid choice. Try again."),
        }
    }
}

fn members_menu(backend: &Backend) -> Result<()> {
    loop {
        println!("\nMEMBERS MENU");
        println!("1. Add Member");
        println!("2. View Members");
        println!("3. Search Member");
        println!("4. Delete Member");
        println!("5. Back to Main Menu");

        match prompt("Enter choice: ")?.as_str() {
            "1" => {
                let name = prompt("Enter Member Name: ")?;
                let phone = prompt("Enter Phone Number: ")?;
                match backend.member_service.add_member(AddMemberCommand { name, phone }) {
                    Ok(result) => println!(
                        "\n[SUCCESS] Member added successfully.\nMember ID: {}",
                        result.member.id
                    ),
                    Err(e) => println!("\n{}", describe_error(&e)),
                }
            }
            "2" => match backend.member_service.list_members() {
                Ok(listing) if listing.members.is_empty() => {
                    println!("\n[INFO] No members found.")
                }
                Ok(listing) => {
                    println!("\nLIBRARY MEMBERS\n");
                    for member in listing.members {
                        println!(
                            "ID: {} | Name: {} | Phone: {} | Books Issued: {}",
                            member.id, member.name, member.phone, member.books_issued
                        );
                    }
                }
                Err(e) => println!("\n{}", describe_error(&e)),
            },
            "3" => {
                let member_id = prompt_u32("Enter Member ID to search: ")?;
                match backend
                    .member_service
                    .search_member(SearchMemberQuery { member_id })
                {
                    Ok(result) => match result.member {
                        Some(member) => println!(
                            "\nMember Found:\nID: {} | Name: {} | Phone: {} | Books Issued: {}",
                            member.id, member.name, member.phone, member.books_issued
                        ),
                        None => println!("\n[INFO] Member not found."),
                    },
                    Err(e) => println!("\n{}", describe_error(&e)),
                }
            }
            "4" => {
                let member_id = prompt_u32("Enter Member ID to delete: ")?;
                match backend
                    .member_service
                    .delete_member(DeleteMemberCommand { member_id })
                {
                    Ok(()) => println!("\n[SUCCESS] Member deleted successfully."),
                    Err(e) => println!("\n{}", describe_error(&e)),
                }
            }
            "5" => return Ok(()),
            _ => println!("\n[ERROR] Invalid choice. Try again."),
        }
    }
}

fn transactions_menu(backend: &Backend) -> Result<()> {
    loop {
        println!("\nTRANSACTIONS MENU");
        println!("1. Issue Book");
        println!("2. Return Book");
        println!("3. Back to Main Menu");

        match prompt("Enter choice: ")?.as_str() {
            "1" => {
                let member_id = prompt_u32("Enter Member ID: ")?;
                let book_id = prompt_u32("Enter Book ID: ")?;
                match backend
                    .transaction_service
                    .issue_book(IssueBookCommand { member_id, book_id })
                {
                    Ok(result) => {
                        println!("\n[SUCCESS] Book issued successfully.");
                        println!("Transaction ID: {}", result.transaction.id);
                        if let Some(date) = result.transaction.issue_date {
                            println!("Issue Date: {}", date);
                        }
                    }
                    Err(e) => println!("\n{}", describe_error(&e)),
                }
            }
            "2" => {
                let member_id = prompt_u32("Enter Member ID: ")?;
                let book_id = prompt_u32("Enter Book ID: ")?;
                match backend
                    .transaction_service
                    .return_book(ReturnBookCommand { member_id, book_id })
                {
                    Ok(result) => {
                        println!("\n[SUCCESS] Book returned successfully.");
                        println!("Return Date: {}", result.return_date);
                        println!("Fine: Rs. {}", result.fine);
                    }
                    Err(e) => println!("\n{}", describe_error(&e)),
                }
            }
            "3" => return Ok(()),
            _ => println!("\n[ERROR] Invalid choice. Try again."),
        }
    }
}

fn reports_menu(backend: &Backend) -> Result<()> {
    loop {
        println!("\nREPORTS MENU");
        println!("1. View Active Issues");
        println!("2. View Overdue Books");
        println!("3. View Total Fine Collected");
        println!("4. Back to Main Menu");

        match prompt("Enter choice: ")?.as_str() {
            "1" => match backend.report_service.active_issues() {
                Ok(report) if report.transactions.is_empty() => {
                    println!("\n[INFO] No active issued books found (All returned).")
                }
                Ok(report) => {
                    println!("\nACTIVE ISSUED BOOKS\n");
                    for t in &report.transactions {
                        let issued = t
                            .issue_date
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "unknown".into());
                        println!(
                            "Trans ID: {} | Member: {} | Book: {} | Issued: {}",
                            t.id, t.member_id, t.book_id, issued
                        );
                    }
                    println!("\nTotal Books Currently Issued: {}", report.transactions.len());
                }
                Err(e) => println!("\n{}", describe_error(&e)),
            },
            "2" => match backend.report_service.overdue_report() {
                Ok(report) if report.entries.is_empty() => {
                    println!("\n[INFO] No overdue books found.")
                }
                Ok(report) => {
                    println!("\nOVERDUE (LATE) BOOKS\n");
                    for entry in &report.entries {
                        println!(
                            "LATE! Member: {} | Book: {} | Days Late: {} | Est. Fine: Rs. {}",
                            entry.transaction.member_id,
                            entry.transaction.book_id,
                            entry.days_late,
                            entry.estimated_fine
                        );
                    }
                    println!("Total Estimated Fine: Rs. {}", report.total_estimated_fine);
                }
                Err(e) => println!("\n{}", describe_error(&e)),
            },
            "3" => match backend.report_service.total_fine_collected() {
                Ok(report) => {
                    println!("\nTOTAL FINE COLLECTED");
                    println!("Total Amount: Rs. {}", report.total);
                }
                Err(e) => println!("\n{}", describe_error(&e)),
            },
            "4" => return Ok(()),
            _ => println!("\n[ERROR] Invalid choice. Try again."),
        }
    }
}

fn backup_menu(backend: &Backend) -> Result<()> {
    loop {
        println!("\nBACKUP/RESTORE MENU");
        println!("1. Create Backup");
        println!("2. List Backups");
        println!("3. Restore Backup");
        println!("4. Back to Main Menu");

        match prompt("Enter choice: ")?.as_str() {
            "1" => match backend.backup_service.backup_data() {
                Ok(name) => println!("\n[SUCCESS] Backup created: {}", name),
                Err(e) => println!("\n[ERROR] Backup failed: {}", e),
            },
            "2" => match backend.backup_service.list_backups() {
                Ok(names) if names.is_empty() => println!("\n[INFO] No backups found."),
                Ok(names) => {
                    println!("\nAVAILABLE BACKUPS\n");
                    for name in names {
                        println!("{}", name);
                    }
                }
                Err(e) => println!("\n[ERROR] {}", e),
            },
            "3" => {
                let name = prompt("Enter backup name to restore: ")?;
                match backend.backup_service.restore_backup(&name) {
                    Ok(count) => {
                        println!("\n[SUCCESS] Restored {} files from '{}'.", count, name)
                    }
                    Err(e) => println!("\n[ERROR] Restore failed: {}", e),
                }
            }
            "4" => return Ok(()),
            _ => println!("\n[ERROR] Invalid choice. Try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_stdin_ends_input_instead_of_looping() {
        let mut closed = std::io::Cursor::new("");
        assert!(read_trimmed_line(&mut closed).is_err());

        let mut line = std::io::Cursor::new("  42 \n");
        assert_eq!(read_trimmed_line(&mut line).unwrap(), "42");
    }

    #[test]
    fn error_messages_fall_into_distinct_categories() {
        assert!(describe_error(&LibraryError::BookNotFound(104)).starts_with("[INFO]"));
        assert!(describe_error(&LibraryError::OutOfStock(104)).starts_with("[ERROR]"));
        assert!(describe_error(&LibraryError::Storage(anyhow::anyhow!("locked")))
            .contains("Close any program"));
    }
}
