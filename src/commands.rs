// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Member commands
//!
//! Each command resolves the member, runs the book and registry operations
//! against the store and produces the text lines of the reply. The chat
//! platform integration turns a [`Reply`] (or a [`MaeveError`]'s
//! `user_message`) into whatever it sends back.

use crate::book::normalizer::crop;
use crate::book::{Clock, Normalizer, RawBookFields};
use crate::booklist::book_count_label;
use crate::config::BotConfig;
use crate::error::{MaeveError, Result};
use crate::gateway::{in_app_user_name, PresentationGateway};
use crate::profile::{UserProfile, MAX_ABOUT_ME_LEN};
use crate::storage::{books, users, Database, NewUser, UserRow};
use crate::view::BooklistSession;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Text lines sent back to the member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub lines: Vec<String>,
}

impl Reply {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Command handlers bound to one store, gateway and configuration
pub struct Commands<'a, G: PresentationGateway> {
    db: &'a Database,
    gateway: &'a G,
    config: &'a BotConfig,
    normalizer: Normalizer,
}

impl<'a, G: PresentationGateway> Commands<'a, G> {
    pub fn new(db: &'a Database, gateway: &'a G, config: &'a BotConfig) -> Self {
        Self {
            db,
            gateway,
            config,
            normalizer: Normalizer::new(config.normalizer_settings()),
        }
    }

    /// Replace the clock used to judge read years
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.normalizer = self.normalizer.with_clock(clock);
        self
    }

    /// Register the member under their chat name
    pub async fn start(&self, user_id: i64) -> Result<Reply> {
        let member = self
            .gateway
            .find_member(user_id)
            .ok_or(MaeveError::MemberNotFound(user_id))?;

        let name = in_app_user_name(&member);
        let user = NewUser::new(user_id, name.clone()).with_server(member.guild_id);
        users::insert_user(self.db.pool(), &user).await?;

        tracing::info!(user_id, name = %name, "Registered member");

        Ok(Reply::line(format!(
            "Welcome, {}! Add your first book with {}add",
            name, self.config.command_prefix
        )))
    }

    /// Normalize and store a new book
    ///
    /// A book whose fields had to be dropped or cropped is still stored;
    /// the reply then explains what changed.
    pub async fn add_book(&self, user_id: i64, fields: &RawBookFields) -> Result<Reply> {
        self.require_user(user_id).await?;

        let outcome = self.normalizer.normalize_fields(fields)?;
        books::insert_book(self.db.pool(), user_id, &outcome.record).await?;

        tracing::debug!(
            user_id,
            title = %outcome.record.title,
            clean = outcome.clean,
            "Added book"
        );

        let mut reply = Reply::line(format!("Added {}", outcome.record));
        if outcome.was_adjusted() {
            reply.push(outcome.message());
        }
        Ok(reply)
    }

    /// Replace the book titled `old_title` with freshly normalized fields
    pub async fn update_book(
        &self,
        user_id: i64,
        old_title: &str,
        fields: &RawBookFields,
    ) -> Result<Reply> {
        self.require_user(user_id).await?;

        let outcome = self.normalizer.normalize_fields(fields)?;
        books::update_book_by_title(self.db.pool(), user_id, old_title, &outcome.record).await?;

        tracing::debug!(user_id, old_title, title = %outcome.record.title, "Updated book");

        let mut reply = Reply::line(format!("Updated {}", outcome.record));
        if outcome.was_adjusted() {
            reply.push(outcome.message());
        }
        Ok(reply)
    }

    /// Set a book's review; empty text removes it
    pub async fn review_book(&self, user_id: i64, title: &str, review: &str) -> Result<Reply> {
        self.require_user(user_id).await?;

        let review = review.trim();
        if review.is_empty() {
            books::set_review(self.db.pool(), user_id, title, None).await?;
            return Ok(Reply::line(format!("Removed the review of \"{}\"", title)));
        }

        books::set_review(self.db.pool(), user_id, title, Some(review)).await?;
        Ok(Reply::line(format!("Saved your review of \"{}\"", title)))
    }

    pub async fn delete_book(&self, user_id: i64, title: &str) -> Result<Reply> {
        self.require_user(user_id).await?;

        books::delete_book_by_title(self.db.pool(), user_id, title).await?;
        tracing::debug!(user_id, title, "Deleted book");

        Ok(Reply::line(format!("Deleted \"{}\"", title)))
    }

    /// Numbered listing of the member's books
    pub async fn show_books(&self, user_id: i64) -> Result<Reply> {
        self.require_user(user_id).await?;

        let records = books::list_book_records(self.db.pool(), user_id).await?;
        if records.is_empty() {
            return Ok(Reply::line("Your booklist is empty"));
        }

        let mut reply = Reply::line(format!("Your booklist ({}):", book_count_label(records.len())));
        for (i, record) in records.iter().enumerate() {
            reply.push(format!("#{} {}", i + 1, record));
        }
        Ok(reply)
    }

    pub async fn profile(&self, user_id: i64) -> Result<Reply> {
        let profile = UserProfile::load(self.db, user_id).await?;
        Ok(Reply {
            lines: profile.card_lines(),
        })
    }

    /// Replace the "about me" text, cropped to [`MAX_ABOUT_ME_LEN`] characters
    pub async fn set_about_me(&self, user_id: i64, text: &str) -> Result<Reply> {
        let text = text.trim();
        let cropped = crop(text, MAX_ABOUT_ME_LEN);
        let stored = cropped.as_deref().unwrap_or(text);
        let about_me = (!stored.is_empty()).then_some(stored);

        users::update_about_me(self.db.pool(), user_id, about_me).await?;

        let mut reply = Reply::line("Updated your profile");
        if cropped.is_some() {
            reply.push(format!("About me cropped to {} characters", MAX_ABOUT_ME_LEN));
        }
        Ok(reply)
    }

    /// Flip whether others may browse the member's booklist
    pub async fn toggle_privacy(&self, user_id: i64) -> Result<Reply> {
        let user = self.require_user(user_id).await?;
        let is_private = !user.is_private;

        users::set_privacy(self.db.pool(), user_id, is_private).await?;
        tracing::debug!(user_id, is_private, "Changed booklist privacy");

        Ok(Reply::line(if is_private {
            "Your booklist is now private"
        } else {
            "Your booklist is now public"
        }))
    }

    /// Open an interactive booklist starting at the first public member
    pub async fn open_booklist(&self) -> Result<BooklistSession> {
        BooklistSession::open_with_config(self.db, self.config, Utc::now()).await
    }

    async fn require_user(&self, user_id: i64) -> Result<UserRow> {
        users::find_user(self.db.pool(), user_id)
            .await?
            .ok_or(MaeveError::UserNotRegistered { user_id })
    }
}
