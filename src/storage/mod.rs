// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.


//! Database storage and models
//!
//! This module handles all database operations using SQLite via sqlx.
//!
//! # Database Schema
//! - Users: member registry, "about me" text, privacy flag
//! - Books: every member's logged books, keyed by (user_id, title)
//!
//! # Usage Example
//! ```no_run
//! use maeve_core::book::BookRecord;
//! use maeve_core::storage::{books, users, Database, NewUser};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./maeve.db").await?;
//!
//! users::insert_user(db.pool(), &NewUser::new(42, "reader".to_string())).await?;
//! books::insert_book(db.pool(), 42, &BookRecord::new("Solaris")).await?;
//!
//! let list = books::list_book_records(db.pool(), 42).await?;
//! # Ok(())
//! # }
//! ```

pub mod books;
pub mod database;
pub mod migrations;
pub mod models;
pub mod users;

pub use database::Database;
pub use models::{BookRow, NewUser, UserRow};
