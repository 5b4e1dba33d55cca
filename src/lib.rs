// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Maeve core: the reading log behind the book club bot
//!
//! - [`book`]: book records and the field normalizer
//! - [`booklist`]: paging and rendering of a member's booklist
//! - [`storage`]: SQLite store for members and books
//! - [`commands`]: member commands built on the above
//! - [`view`]: interactive booklist sessions
//!
//! The chat platform integration sits behind [`gateway::PresentationGateway`].

pub mod book;
pub mod booklist;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod profile;
pub mod storage;
pub mod view;

pub use book::{BookRecord, NormalizationOutcome, Normalizer, RawBookFields};
pub use booklist::{PageCursor, RenderedPage};
pub use commands::{Commands, Reply};
pub use config::BotConfig;
pub use error::{MaeveError, Result};
pub use gateway::{Member, PresentationGateway};
pub use storage::Database;
pub use view::{BooklistSession, Button, ViewUpdate};
