// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Booklist browsing session
//!
//! One session backs one interactive booklist message: five navigation
//! buttons plus a member dropdown. The session owns its [`PageCursor`];
//! choosing another member from the dropdown fetches that member's latest
//! list and starts a fresh cursor.

use crate::book::BookRecord;
use crate::booklist::{book_count_label, PageCursor, RenderSettings, RenderedPage};
use crate::config::BotConfig;
use crate::error::{MaeveError, Result};
use crate::storage::{books, users, Database, UserRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Buttons under the booklist message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    GetReview,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Up,
        Button::GetReview,
        Button::Down,
        Button::Right,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Button::Left => "⬅️",
            Button::Right => "➡️",
            Button::Up => "⬆️",
            Button::Down => "⬇️",
            Button::GetReview => "see review",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

/// What the chat message should show after an interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewUpdate {
    Page(RenderedPage),
    Review { title: String, review: String },
    Notice(String),
}

/// One entry of the member dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub user_id: i64,
    pub name: String,
    /// e.g. "3 books"
    pub label: String,
}

/// Whose list is on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOwner {
    pub user_id: i64,
    pub name: String,
}

/// State of one open booklist message
///
/// Interactions on one message are delivered one at a time; a session is
/// not meant to be shared between messages or driven concurrently.
#[derive(Debug)]
pub struct BooklistSession {
    owner: Option<ListOwner>,
    cursor: PageCursor,
    items_per_page: NonZeroUsize,
    render: RenderSettings,
    timeout: Duration,
    last_interaction: DateTime<Utc>,
}

impl BooklistSession {
    /// Open a session on the first public member's list
    ///
    /// With no public members the session shows a single empty page.
    pub async fn open(
        db: &Database,
        items_per_page: NonZeroUsize,
        render: RenderSettings,
        timeout: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let first = users::list_public_users(db.pool()).await?.into_iter().next();

        let (owner, snapshot) = match first {
            Some(user) => {
                let snapshot = books::list_book_records(db.pool(), user.user_id).await?;
                (Some(owner_of(&user)), snapshot)
            }
            None => (None, Vec::new()),
        };

        tracing::debug!(
            owner = ?owner.as_ref().map(|o| &o.name),
            books = snapshot.len(),
            "Opened booklist session"
        );

        Ok(Self {
            owner,
            cursor: Self::cursor_for(snapshot, items_per_page, &render),
            items_per_page,
            render,
            timeout,
            last_interaction: now,
        })
    }

    pub async fn open_with_config(
        db: &Database,
        config: &BotConfig,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        Self::open(
            db,
            config.page_size(),
            config.render_settings(),
            config.view_timeout(),
            now,
        )
        .await
    }

    /// Dropdown entries: every public member with their book count
    pub async fn directory(db: &Database) -> Result<Vec<DirectoryEntry>> {
        let mut entries = Vec::new();
        for user in users::list_public_users(db.pool()).await? {
            let count = books::count_books(db.pool(), user.user_id).await?;
            entries.push(DirectoryEntry {
                user_id: user.user_id,
                label: book_count_label(count.max(0) as usize),
                name: user.name,
            });
        }
        Ok(entries)
    }

    /// Switch to another member's list, fetched fresh from the store
    ///
    /// # Errors
    /// `RecordNotFound` for an unknown name, `ProfilePrivate` for a member
    /// who hides their list.
    pub async fn select_member(
        &mut self,
        db: &Database,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<RenderedPage> {
        let user = users::find_user_by_name(db.pool(), name)
            .await?
            .ok_or_else(|| MaeveError::RecordNotFound(format!("member \"{}\"", name)))?;

        if user.is_private {
            return Err(MaeveError::ProfilePrivate { name: user.name });
        }

        let snapshot = books::list_book_records(db.pool(), user.user_id).await?;
        tracing::debug!(member = %user.name, books = snapshot.len(), "Switched booklist");

        self.cursor = Self::cursor_for(snapshot, self.items_per_page, &self.render);
        self.owner = Some(owner_of(&user));
        self.last_interaction = now;

        Ok(self.render())
    }

    /// Handle a button press
    pub fn press(&mut self, button: Button, now: DateTime<Utc>) -> ViewUpdate {
        self.last_interaction = now;

        match button {
            Button::Left => {
                self.cursor.advance_page(-1);
            }
            Button::Right => {
                self.cursor.advance_page(1);
            }
            Button::Up => {
                self.cursor.move_focus(-1);
            }
            Button::Down => {
                self.cursor.move_focus(1);
            }
            Button::GetReview => return self.focused_review(),
        }

        ViewUpdate::Page(self.render())
    }

    /// Full review of the book in focus
    pub fn focused_review(&self) -> ViewUpdate {
        match self.cursor.book_in_focus() {
            None => ViewUpdate::Notice("No book selected".to_string()),
            Some(book) if !book.has_review() => {
                ViewUpdate::Notice(format!("\"{}\" has no review yet", book.title))
            }
            Some(book) => ViewUpdate::Review {
                title: book.title.clone(),
                review: book.review.clone().unwrap_or_default(),
            },
        }
    }

    pub fn render(&self) -> RenderedPage {
        self.cursor.render_page()
    }

    pub fn owner(&self) -> Option<&ListOwner> {
        self.owner.as_ref()
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn render_settings(&self) -> &RenderSettings {
        &self.render
    }

    /// True once the session saw no interaction for the whole timeout
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let idle = now.signed_duration_since(self.last_interaction);
        match idle.to_std() {
            Ok(idle) => idle >= self.timeout,
            Err(_) => false, // `now` before the last interaction
        }
    }

    fn cursor_for(
        snapshot: Vec<BookRecord>,
        items_per_page: NonZeroUsize,
        render: &RenderSettings,
    ) -> PageCursor {
        PageCursor::new(snapshot, items_per_page).with_render_settings(render.clone())
    }
}

fn owner_of(user: &UserRow) -> ListOwner {
    ListOwner {
        user_id: user.user_id,
        name: user.name.clone(),
    }
}
