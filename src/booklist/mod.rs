// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Paginated booklist view model
//!
//! A [`PageCursor`] holds a read-only snapshot of one member's books and
//! two wrap-around positions: the page on screen and the book in focus on
//! that page. [`RenderedPage`] is what the chat embed is built from.
//!
//! # Page arithmetic
//! `total_pages = len / items_per_page + 1`, so a list that is an exact
//! multiple of the page size gets a trailing page of placeholders
//! (10 books at 5 per page show 3 pages). An empty list still has one page.

pub mod cursor;
pub mod render;

pub use cursor::PageCursor;
pub use render::{BookLine, RenderSettings, RenderedPage, Slot};

/// Dropdown description for a member with `count` books
pub fn book_count_label(count: usize) -> String {
    match count {
        1 => "1 book".to_string(),
        n => format!("{} books", n),
    }
}
