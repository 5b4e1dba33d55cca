// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Wrap-around navigation over a booklist snapshot
//!
//! The cursor never touches the store. A view session fetches the list once
//! when it opens and must build a new cursor to see later changes.
//!
//! Navigation takes `&mut self`; one cursor belongs to one view session and
//! calls on it are expected to be serialized by that session.

use super::render::{RenderSettings, RenderedPage};
use crate::book::BookRecord;
use std::num::NonZeroUsize;

#[derive(Debug, Clone)]
pub struct PageCursor {
    snapshot: Vec<BookRecord>,
    items_per_page: NonZeroUsize,
    current_page: usize,
    focus_index: usize,
    render: RenderSettings,
}

impl PageCursor {
    /// Cursor on page 1 with the first slot in focus
    pub fn new(snapshot: Vec<BookRecord>, items_per_page: NonZeroUsize) -> Self {
        Self {
            snapshot,
            items_per_page,
            current_page: 1,
            focus_index: 1,
            render: RenderSettings::default(),
        }
    }

    /// Cursor at an explicit position
    ///
    /// Out-of-range positions follow the same wrap rule as navigation:
    /// anything below 1 lands on the last value, anything past the end on 1.
    pub fn with_position(
        snapshot: Vec<BookRecord>,
        items_per_page: NonZeroUsize,
        current_page: i64,
        focus_index: i64,
    ) -> Self {
        let mut cursor = Self::new(snapshot, items_per_page);
        cursor.current_page = wrap(current_page, cursor.total_pages());
        cursor.focus_index = wrap(focus_index, cursor.items_per_page.get());
        cursor
    }

    pub fn with_render_settings(mut self, render: RenderSettings) -> Self {
        self.render = render;
        self
    }

    pub fn snapshot(&self) -> &[BookRecord] {
        &self.snapshot
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page.get()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    pub fn render_settings(&self) -> &RenderSettings {
        &self.render
    }

    /// `len / items_per_page + 1`, never less than 1
    ///
    /// A list that fills its pages exactly gets one extra, empty page.
    pub fn total_pages(&self) -> usize {
        self.snapshot.len() / self.items_per_page.get() + 1
    }

    /// Move by `delta` pages, wrapping at both ends; returns the new page
    pub fn advance_page(&mut self, delta: i64) -> usize {
        let target = (self.current_page as i64).saturating_add(delta);
        self.current_page = wrap(target, self.total_pages());
        self.current_page
    }

    /// Move the focus by `delta` slots, wrapping within the page size
    ///
    /// The bound is the nominal page size, so on a short last page the focus
    /// can rest on a placeholder slot.
    pub fn move_focus(&mut self, delta: i64) -> usize {
        let target = (self.focus_index as i64).saturating_add(delta);
        self.focus_index = wrap(target, self.items_per_page.get());
        self.focus_index
    }

    /// Books on the current page, padded with `None` to the page size
    pub fn page_books(&self) -> Vec<Option<&BookRecord>> {
        let per_page = self.items_per_page.get();
        let start = (self.current_page - 1) * per_page;
        (start..start + per_page)
            .map(|i| self.snapshot.get(i))
            .collect()
    }

    /// The book in the focused slot, `None` when focus is on padding
    pub fn book_in_focus(&self) -> Option<&BookRecord> {
        let index = (self.current_page - 1) * self.items_per_page.get() + (self.focus_index - 1);
        self.snapshot.get(index)
    }

    pub fn render_page(&self) -> RenderedPage {
        RenderedPage::from_cursor(self)
    }
}

/// Wrap rule shared by pages and focus: below 1 goes to `upper`, above
/// `upper` goes to 1
fn wrap(target: i64, upper: usize) -> usize {
    if target < 1 {
        upper
    } else if target > upper as i64 {
        1
    } else {
        target as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booklist::Slot;

    fn books(n: usize) -> Vec<BookRecord> {
        (1..=n).map(|i| BookRecord::new(format!("Book {}", i))).collect()
    }

    fn per_page(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_total_pages_for_partial_last_page() {
        let cursor = PageCursor::new(books(12), per_page(5));
        assert_eq!(cursor.total_pages(), 3);
    }

    #[test]
    fn test_exact_multiple_gets_trailing_empty_page() {
        let mut cursor = PageCursor::new(books(10), per_page(5));
        assert_eq!(cursor.total_pages(), 3);

        cursor.advance_page(-1);
        assert_eq!(cursor.current_page(), 3);

        let page = cursor.render_page();
        assert_eq!(page.book_count(), 0);
        assert_eq!(page.placeholder_count(), 5);
    }

    #[test]
    fn test_last_page_is_padded() {
        let mut cursor = PageCursor::new(books(12), per_page(5));
        cursor.advance_page(1);
        cursor.advance_page(1);

        let page = cursor.render_page();
        assert_eq!(page.page, 3);
        assert_eq!(page.slots.len(), 5);
        assert_eq!(page.book_count(), 2);
        assert_eq!(page.placeholder_count(), 3);
        assert_eq!(page.slots[0].as_book().unwrap().title, "Book 11");
        assert_eq!(page.slots[1].as_book().unwrap().title, "Book 12");
        assert!(page.slots[2..].iter().all(Slot::is_placeholder));
    }

    #[test]
    fn test_empty_snapshot_has_one_page_of_placeholders() {
        let mut cursor = PageCursor::new(Vec::new(), per_page(5));
        assert_eq!(cursor.total_pages(), 1);

        assert_eq!(cursor.advance_page(1), 1);
        assert_eq!(cursor.advance_page(-1), 1);
        assert_eq!(cursor.move_focus(-1), 5);

        let page = cursor.render_page();
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.placeholder_count(), 5);
        assert!(page.focused().is_none());
        assert!(cursor.book_in_focus().is_none());
    }

    #[test]
    fn test_page_wraps_both_ways() {
        let mut cursor = PageCursor::new(books(12), per_page(5));
        assert_eq!(cursor.advance_page(-1), 3);
        assert_eq!(cursor.advance_page(1), 1);
    }

    #[test]
    fn test_page_steps_are_invertible() {
        for len in [0, 1, 4, 5, 12, 23] {
            let total = PageCursor::new(books(len), per_page(5)).total_pages();
            for start in 1..=total {
                let mut cursor =
                    PageCursor::with_position(books(len), per_page(5), start as i64, 1);
                cursor.advance_page(1);
                cursor.advance_page(-1);
                assert_eq!(cursor.current_page(), start, "len {} start {}", len, start);

                cursor.advance_page(-1);
                cursor.advance_page(1);
                assert_eq!(cursor.current_page(), start, "len {} start {}", len, start);
            }
        }
    }

    #[test]
    fn test_focus_steps_are_invertible() {
        for start in 1..=5 {
            let mut cursor = PageCursor::with_position(books(7), per_page(5), 1, start);
            cursor.move_focus(1);
            cursor.move_focus(-1);
            assert_eq!(cursor.focus_index(), start as usize);

            cursor.move_focus(-1);
            cursor.move_focus(1);
            assert_eq!(cursor.focus_index(), start as usize);
        }
    }

    #[test]
    fn test_focus_wraps_within_page_size() {
        let mut cursor = PageCursor::new(books(12), per_page(5));
        assert_eq!(cursor.move_focus(-1), 5);
        assert_eq!(cursor.move_focus(1), 1);
    }

    #[test]
    fn test_focus_can_rest_on_placeholder() {
        let mut cursor = PageCursor::with_position(books(12), per_page(5), 3, 1);
        cursor.move_focus(1);
        cursor.move_focus(1);
        assert_eq!(cursor.focus_index(), 3);
        assert!(cursor.book_in_focus().is_none());

        let page = cursor.render_page();
        assert!(page.slots[2].is_placeholder());
        assert!(page.focused().is_none());
    }

    #[test]
    fn test_focus_marks_the_right_book() {
        let mut cursor = PageCursor::new(books(7), per_page(5));
        cursor.move_focus(1);
        cursor.advance_page(1);

        assert_eq!(cursor.book_in_focus().unwrap().title, "Book 7");
        let page = cursor.render_page();
        let focused = page.focused().unwrap();
        assert_eq!(focused.title, "Book 7");
        assert_eq!(focused.display_title(), "**->>> Book 7 <<<-**");
        assert!(!page.slots[0].as_book().unwrap().in_focus);
    }

    #[test]
    fn test_large_deltas_do_not_panic() {
        let mut cursor = PageCursor::new(books(3), per_page(2));
        assert_eq!(cursor.advance_page(i64::MAX), 1);
        assert_eq!(cursor.advance_page(i64::MIN), 2);
        assert_eq!(cursor.move_focus(-7), 2);
        assert_eq!(cursor.move_focus(7), 1);
    }

    #[test]
    fn test_with_position_wraps_out_of_range_values() {
        let cursor = PageCursor::with_position(books(12), per_page(5), 0, 9);
        assert_eq!(cursor.current_page(), 3);
        assert_eq!(cursor.focus_index(), 1);
    }
}
