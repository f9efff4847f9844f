//! CSV-backed implementation of [`LibraryStore`].
//!
//! One file per collection, header row first. Reads parse every cell into
//! the typed records once; numeric cells that fail to parse are recovered
//! locally by defaulting (ids to the 0 sentinel, quantities and fines to 0)
//! with a warning, never surfaced as a fatal error. A save rewrites all
//! three tables: each is staged to a temp file first and the staged files
//! are renamed into place only once every table has written cleanly, so a
//! failed save leaves the previous state intact as a unit.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{Reader, StringRecord, Writer};
use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use super::connection::CsvConnection;
use crate::backend::domain::models::{Book, LibrarySnapshot, Member, Transaction};
use crate::backend::storage::traits::LibraryStore;

const BOOK_HEADERS: [&str; 4] = ["BookID", "Title", "Author", "Quantity"];
const MEMBER_HEADERS: [&str; 4] = ["MemberID", "Name", "Phone", "BooksIssued"];
const TRANSACTION_HEADERS: [&str; 6] = [
    "TransactionID",
    "MemberID",
    "BookID",
    "IssueDate",
    "ReturnDate",
    "Fine",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct CsvStore {
    connection: CsvConnection,
}

impl CsvStore {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Create `path` with its header row if it does not exist yet.
    fn ensure_file_exists(path: &Path, headers: &[&str]) -> Result<()> {
        if path.exists() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .with_context(|| format!("creating {:?}", path))?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(headers)?;
        csv_writer.flush()?;
        debug!("Seeded {:?} with header row", path);
        Ok(())
    }

    fn read_rows(path: &Path) -> Result<Vec<StringRecord>> {
        let file = File::open(path).with_context(|| format!("opening {:?}", path))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));
        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result.with_context(|| format!("reading {:?}", path))?;
            // Skip fully blank rows, as left behind by manual edits.
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record);
        }
        Ok(rows)
    }

    /// Write the full table to a sibling temp file, returning its path. The
    /// caller renames it into place once every table has staged cleanly.
    fn stage_rows(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<PathBuf> {
        let temp_path = path.with_extension("tmp");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("writing {:?}", temp_path))?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(headers)?;
        for row in rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(temp_path)
    }

    fn read_books(&self) -> Result<Vec<Book>> {
        let path = self.connection.books_path();
        Self::ensure_file_exists(&path, &BOOK_HEADERS)?;
        let books = Self::read_rows(&path)?
            .iter()
            .map(|record| Book {
                id: parse_numeric_cell(record.get(0), "BookID"),
                title: cell_text(record.get(1)),
                author: cell_text(record.get(2)),
                quantity: parse_numeric_cell(record.get(3), "Quantity"),
            })
            .collect();
        Ok(books)
    }

    fn read_members(&self) -> Result<Vec<Member>> {
        let path = self.connection.members_path();
        Self::ensure_file_exists(&path, &MEMBER_HEADERS)?;
        let members = Self::read_rows(&path)?
            .iter()
            .map(|record| Member {
                id: parse_numeric_cell(record.get(0), "MemberID"),
                name: cell_text(record.get(1)),
                phone: cell_text(record.get(2)),
                books_issued: parse_numeric_cell(record.get(3), "BooksIssued"),
            })
            .collect();
        Ok(members)
    }

    fn read_transactions(&self) -> Result<Vec<Transaction>> {
        let path = self.connection.transactions_path();
        Self::ensure_file_exists(&path, &TRANSACTION_HEADERS)?;
        let transactions = Self::read_rows(&path)?
            .iter()
            .map(|record| {
                let issue_date = parse_date_cell(record.get(3), "IssueDate");
                Transaction {
                    id: parse_numeric_cell(record.get(0), "TransactionID"),
                    member_id: parse_numeric_cell(record.get(1), "MemberID"),
                    book_id: parse_numeric_cell(record.get(2), "BookID"),
                    issue_date,
                    return_date: parse_return_date_cell(record.get(4), issue_date),
                    fine: parse_numeric_cell(record.get(5), "Fine"),
                }
            })
            .collect();
        Ok(transactions)
    }

    fn book_rows(books: &[Book]) -> Vec<Vec<String>> {
        books
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.title.clone(),
                    b.author.clone(),
                    b.quantity.to_string(),
                ]
            })
            .collect()
    }

    fn member_rows(members: &[Member]) -> Vec<Vec<String>> {
        members
            .iter()
            .map(|m| {
                vec![
                    m.id.to_string(),
                    m.name.clone(),
                    m.phone.clone(),
                    m.books_issued.to_string(),
                ]
            })
            .collect()
    }

    fn transaction_rows(transactions: &[Transaction]) -> Vec<Vec<String>> {
        transactions
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.member_id.to_string(),
                    t.book_id.to_string(),
                    format_date_cell(t.issue_date),
                    format_date_cell(t.return_date),
                    t.fine.to_string(),
                ]
            })
            .collect()
    }
}

impl LibraryStore for CsvStore {
    fn load(&self) -> Result<LibrarySnapshot> {
        let snapshot = LibrarySnapshot {
            books: self.read_books()?,
            members: self.read_members()?,
            transactions: self.read_transactions()?,
        };
        debug!(
            "Loaded snapshot: {} books, {} members, {} transactions",
            snapshot.books.len(),
            snapshot.members.len(),
            snapshot.transactions.len()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &LibrarySnapshot) -> Result<()> {
        let tables = [
            (
                self.connection.books_path(),
                &BOOK_HEADERS[..],
                Self::book_rows(&snapshot.books),
            ),
            (
                self.connection.members_path(),
                &MEMBER_HEADERS[..],
                Self::member_rows(&snapshot.members),
            ),
            (
                self.connection.transactions_path(),
                &TRANSACTION_HEADERS[..],
                Self::transaction_rows(&snapshot.transactions),
            ),
        ];

        // Stage every table before renaming any of them: a write failure on
        // one table must not leave another already replaced, or stock counts
        // and the transaction ledger could disagree on disk.
        let mut staged = Vec::with_capacity(tables.len());
        for (path, headers, rows) in &tables {
            match Self::stage_rows(path, headers, rows) {
                Ok(temp_path) => staged.push((temp_path, path.clone())),
                Err(e) => {
                    for (temp_path, _) in &staged {
                        let _ = fs::remove_file(temp_path);
                    }
                    return Err(e);
                }
            }
        }
        for (temp_path, path) in staged {
            fs::rename(&temp_path, &path).with_context(|| format!("replacing {:?}", path))?;
        }
        Ok(())
    }
}

fn cell_text(raw: Option<&str>) -> String {
    raw.unwrap_or("").trim().to_string()
}

/// Parse a numeric cell, defaulting on corruption. Ids parsed as 0 are
/// treated as absent by id allocation, which then restarts from its seed.
fn parse_numeric_cell<T: Default + std::str::FromStr>(raw: Option<&str>, column: &str) -> T {
    let raw = raw.unwrap_or("").trim();
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            if !raw.is_empty() {
                warn!("Unparsable {} cell '{}', defaulting", column, raw);
            }
            T::default()
        }
    }
}

fn parse_date_cell(raw: Option<&str>, column: &str) -> Option<NaiveDate> {
    let raw = raw.unwrap_or("").trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("Unparsable {} cell '{}', treating as absent", column, raw);
            None
        }
    }
}

/// A non-empty ReturnDate cell means the loan is closed even when the date
/// itself is corrupt, so fall back to the issue date (then the epoch) rather
/// than silently reopening the loan.
fn parse_return_date_cell(raw: Option<&str>, issue_date: Option<NaiveDate>) -> Option<NaiveDate> {
    let trimmed = raw.unwrap_or("").trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(
                "Unparsable ReturnDate cell '{}', keeping loan closed",
                trimmed
            );
            Some(issue_date.unwrap_or_default())
        }
    }
}

fn format_date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
