//! Login collaborator: checks credentials against the users table.
//!
//! Plaintext credentials in `users.csv`, matching the legacy data files.
//! This sits outside the core contract; it gates the menus, nothing more.
use anyhow::{Context, Result};
use csv::{Reader, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::backend::storage::CsvConnection;

const USER_HEADERS: [&str; 3] = ["Username", "Password", "Role"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Librarian,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Librarian => "LIBRARIAN",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "LIBRARIAN" => Some(Role::Librarian),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    connection: CsvConnection,
}

impl AuthService {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Seed `users.csv` with the default accounts if it does not exist yet.
    pub fn ensure_default_users(&self) -> Result<()> {
        let path = self.connection.users_path();
        if path.exists() {
            return Ok(());
        }
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("creating {:?}", path))?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(USER_HEADERS)?;
        csv_writer.write_record(["admin", "admin123", "ADMIN"])?;
        csv_writer.write_record(["librarian", "lib123", "LIBRARIAN"])?;
        csv_writer.flush()?;
        info!("Seeded default user accounts");
        Ok(())
    }

    /// Check credentials; `None` means no matching account.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<Role>> {
        self.ensure_default_users()?;
        let path = self.connection.users_path();
        let file = File::open(&path).with_context(|| format!("opening {:?}", path))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));
        for result in csv_reader.records() {
            let record = result?;
            let stored_user = record.get(0).unwrap_or("").trim();
            let stored_pass = record.get(1).unwrap_or("").trim();
            if stored_user == username && stored_pass == password {
                return Ok(Role::parse(record.get(2).unwrap_or("")));
            }
        }
        Ok(None)
    }
}
