//! Database models for Maeve
//!
//! Row types returned by the query modules, plus insert payloads.
//!
//! # SQLite Adaptations
//! - Booleans stored as INTEGER 0/1
//! - Privilege lists stored as JSON strings (SQLite has no native array type)
//! - Timestamps stored as TEXT (`CURRENT_TIMESTAMP` format)

use crate::book::BookRecord;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registered member
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub server_id: Option<i64>,
    pub about_me: Option<String>,
    pub is_private: bool,
    pub privileges: String, // JSON array
    pub created_at: String,
    pub updated_at: String,
}

impl UserRow {
    /// Decode the privileges column; a corrupt value reads as no privileges
    pub fn get_privileges(&self) -> Vec<String> {
        serde_json::from_str(&self.privileges).unwrap_or_default()
    }
}

/// Stored book with its owner and bookkeeping columns
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct BookRow {
    pub book_id: i64,
    pub user_id: i64,
    pub title: String,
    pub author: Option<String>,
    pub read_year: Option<i32>,
    pub interest: Option<i32>,
    pub review: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookRow> for BookRecord {
    fn from(row: BookRow) -> Self {
        BookRecord {
            title: row.title,
            author: row.author,
            read_year: row.read_year,
            interest: row.interest,
            review: row.review,
        }
    }
}

/// New member for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub user_id: i64,
    pub name: String,
    pub server_id: Option<i64>,
    pub is_private: bool,
    pub privileges: Vec<String>,
}

impl NewUser {
    pub fn new(user_id: i64, name: String) -> Self {
        Self {
            user_id,
            name,
            server_id: None,
            is_private: false,
            privileges: Vec::new(),
        }
    }

    pub fn with_server(mut self, server_id: Option<i64>) -> Self {
        self.server_id = server_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(privileges: &str) -> UserRow {
        UserRow {
            id: 1,
            user_id: 42,
            name: "reader".to_string(),
            server_id: None,
            about_me: None,
            is_private: false,
            privileges: privileges.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_privileges_decode() {
        assert_eq!(row(r#"["moderator"]"#).get_privileges(), vec!["moderator".to_string()]);
        assert!(row("[]").get_privileges().is_empty());
        assert!(row("not json").get_privileges().is_empty());
    }
}
