//! Error types for Maeve
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are categorized by domain (input, records, database, configuration)
//! so the command layer can decide what to show to a chat member and what
//! only belongs in the logs.

use thiserror::Error;

/// Result type alias using our MaeveError type
pub type Result<T> = std::result::Result<T, MaeveError>;

/// Main error type for Maeve
///
/// Each variant includes a descriptive error message and the context needed
/// to build a reply for the member who issued the command.
#[derive(Error, Debug)]
pub enum MaeveError {
    // ===== Input Errors =====

    /// Generic input validation error (an absent title is the common case)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===== Record Errors =====

    /// Database record not found
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// The member has no profile yet
    #[error("User {user_id} is not registered")]
    UserNotRegistered { user_id: i64 },

    /// The member already ran the registration command
    #[error("User {user_id} is already registered")]
    UserAlreadyRegistered { user_id: i64 },

    /// A book with the same title is already on the member's list
    #[error("Book '{title}' is already on the list")]
    DuplicateBook { title: String },

    /// The member hides their booklist from others
    #[error("Profile of '{name}' is private")]
    ProfilePrivate { name: String },

    /// The member could not be resolved by the chat platform
    #[error("Member not found: {0}")]
    MemberNotFound(i64),

    // ===== Database Errors =====

    /// Database schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    // ===== Configuration Errors =====

    /// Configuration file error or invalid setting
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ===== File Errors =====

    /// Generic file I/O error
    #[error("File I/O error: {0}")]
    FileIoError(String),

    // ===== External Library Errors =====

    /// IO error from std::io
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// SQLx database error
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// TOML config parse error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl MaeveError {
    /// Check if the error was caused by what the member typed or asked for
    ///
    /// These are answered in the chat; everything else is logged and
    /// replaced by a generic apology.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            MaeveError::InvalidInput(_)
                | MaeveError::RecordNotFound(_)
                | MaeveError::UserNotRegistered { .. }
                | MaeveError::UserAlreadyRegistered { .. }
                | MaeveError::DuplicateBook { .. }
                | MaeveError::ProfilePrivate { .. }
                | MaeveError::MemberNotFound(_)
        )
    }

    /// Check if this is a database error
    pub fn is_database_error(&self) -> bool {
        matches!(
            self,
            MaeveError::MigrationFailed(_) | MaeveError::SqlxError(_)
        )
    }

    /// Get user-friendly error message for display in the chat
    pub fn user_message(&self) -> String {
        match self {
            MaeveError::InvalidInput(msg) => msg.clone(),
            MaeveError::RecordNotFound(what) => format!("Could not find {}.", what),
            MaeveError::UserNotRegistered { .. } => {
                "You don't have a profile yet. Use the start command first.".to_string()
            }
            MaeveError::UserAlreadyRegistered { .. } => {
                "You already have a profile.".to_string()
            }
            MaeveError::DuplicateBook { title } => {
                format!("\"{}\" is already on your list.", title)
            }
            MaeveError::ProfilePrivate { name } => {
                format!("{} keeps their booklist private.", name)
            }
            MaeveError::MemberNotFound(_) => {
                "That member is not on any server I know.".to_string()
            }
            _ => "Something went wrong on my side. Please try again later.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_shown_verbatim() {
        let err = MaeveError::InvalidInput("Title can not be empty".to_string());
        assert!(err.is_user_error());
        assert!(!err.is_database_error());
        assert_eq!(err.user_message(), "Title can not be empty");
    }

    #[test]
    fn test_internal_errors_are_hidden() {
        let err = MaeveError::MigrationFailed("table Books already exists".to_string());
        assert!(err.is_database_error());
        assert!(!err.is_user_error());
        assert!(!err.user_message().contains("Books"));
    }

    #[test]
    fn test_duplicate_book_message() {
        let err = MaeveError::DuplicateBook {
            title: "Dune".to_string(),
        };
        assert_eq!(err.user_message(), "\"Dune\" is already on your list.");
        assert_eq!(err.to_string(), "Book 'Dune' is already on the list");
    }

    #[test]
    fn test_sqlx_errors_are_database_errors() {
        let err = MaeveError::from(sqlx::Error::RowNotFound);
        assert!(err.is_database_error());
        assert!(!err.is_user_error());

        let err = MaeveError::UserNotRegistered { user_id: 3 };
        assert!(!err.is_database_error());
    }
}
