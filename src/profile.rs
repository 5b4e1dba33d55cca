// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Member profile: registry data plus reading statistics

use crate::error::{MaeveError, Result};
use crate::storage::{books, users, Database, UserRow};
use serde::{Deserialize, Serialize};

/// "About me" texts longer than this are cropped
pub const MAX_ABOUT_ME_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBookStats {
    pub books: i64,
    pub reviews: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub name: String,
    /// Server the member registered from
    pub start_guild_id: Option<i64>,
    pub about_me: Option<String>,
    pub is_private: bool,
    pub stats: UserBookStats,
}

impl UserProfile {
    /// Load a member's profile and count their books and reviews
    ///
    /// # Errors
    /// `UserNotRegistered` when the member has no row.
    pub async fn load(db: &Database, user_id: i64) -> Result<Self> {
        let user = users::find_user(db.pool(), user_id)
            .await?
            .ok_or(MaeveError::UserNotRegistered { user_id })?;

        let stats = UserBookStats {
            books: books::count_books(db.pool(), user_id).await?,
            reviews: books::count_reviews(db.pool(), user_id).await?,
        };

        Ok(Self::from_row(user, stats))
    }

    pub fn from_row(user: UserRow, stats: UserBookStats) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            start_guild_id: user.server_id,
            about_me: user.about_me,
            is_private: user.is_private,
            stats,
        }
    }

    /// Text lines of the profile card, title first
    pub fn card_lines(&self) -> Vec<String> {
        let about = match self.about_me.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => "Nothing here yet",
        };
        let privacy = if self.is_private {
            "Booklist: private"
        } else {
            "Booklist: public"
        };

        vec![
            self.name.clone(),
            format!("About me: {}", about),
            privacy.to_string(),
            format!("Books: {}, reviews: {}", self.stats.books, self.stats.reviews),
        ]
    }
}
