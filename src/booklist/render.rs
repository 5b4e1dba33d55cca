//! Display-ready form of one booklist page

use super::cursor::PageCursor;
use crate::book::normalizer::crop;
use crate::book::BookRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Reviews longer than this many characters are cut and marked
    pub review_preview_len: usize,
    /// Repeated once per interest point
    pub interest_glyph: String,
    /// Written right after the read year
    pub year_suffix: String,
    /// Appended to a cut review
    pub ellipsis: String,
    /// Shown for empty slots and for books with nothing but a title
    pub placeholder: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            review_preview_len: 100,
            interest_glyph: "📡".to_string(),
            year_suffix: " г.".to_string(),
            ellipsis: "...".to_string(),
            placeholder: "***".to_string(),
        }
    }
}

/// One row of a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Slot {
    /// Padding on a short (or empty) last page
    Placeholder,
    Book(BookLine),
}

impl Slot {
    pub fn as_book(&self) -> Option<&BookLine> {
        match self {
            Slot::Book(line) => Some(line),
            Slot::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }
}

/// Display fragments of one book; absent fields are empty strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLine {
    pub title: String,
    pub in_focus: bool,
    pub author: String,
    pub read_year: String,
    pub interest: String,
    pub review: String,
}

impl BookLine {
    pub fn from_record(book: &BookRecord, in_focus: bool, settings: &RenderSettings) -> Self {
        Self {
            title: book.title.clone(),
            in_focus,
            author: book.author.clone().unwrap_or_default(),
            read_year: book
                .read_year
                .map(|year| format!("{}{}", year, settings.year_suffix))
                .unwrap_or_default(),
            interest: show_interest(book.interest, &settings.interest_glyph),
            review: show_review(book.review.as_deref(), settings),
        }
    }

    /// Embed field name; the focused book is visibly marked
    pub fn display_title(&self) -> String {
        if self.in_focus {
            format!("**->>> {} <<<-**", self.title)
        } else {
            self.title.clone()
        }
    }

    /// Embed field value: the non-empty fragments separated by spaces
    pub fn display_value(&self, placeholder: &str) -> String {
        let value = [&self.author, &self.read_year, &self.interest, &self.review]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        if value.is_empty() {
            placeholder.to_string()
        } else {
            value
        }
    }
}

/// The page currently on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPage {
    /// 1-based page number
    pub page: usize,
    pub total_pages: usize,
    /// Exactly `items_per_page` slots
    pub slots: Vec<Slot>,
}

impl RenderedPage {
    pub fn from_cursor(cursor: &PageCursor) -> Self {
        let settings = cursor.render_settings();
        let focus = cursor.focus_index();

        let slots = cursor
            .page_books()
            .into_iter()
            .enumerate()
            .map(|(i, book)| match book {
                Some(book) => Slot::Book(BookLine::from_record(book, i + 1 == focus, settings)),
                None => Slot::Placeholder,
            })
            .collect();

        Self {
            page: cursor.current_page(),
            total_pages: cursor.total_pages(),
            slots,
        }
    }

    pub fn book_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_placeholder()).count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.slots.len() - self.book_count()
    }

    /// The book line marked as in focus, if focus rests on a real book
    pub fn focused(&self) -> Option<&BookLine> {
        self.slots
            .iter()
            .filter_map(Slot::as_book)
            .find(|line| line.in_focus)
    }

    /// (name, value) pairs, one per slot, in the shape of embed fields
    pub fn fields(&self, placeholder: &str) -> Vec<(String, String)> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Placeholder => (placeholder.to_string(), placeholder.to_string()),
                Slot::Book(line) => (line.display_title(), line.display_value(placeholder)),
            })
            .collect()
    }

    /// Plain-text rendering used by the CLI and in logs
    pub fn to_text(&self, placeholder: &str) -> String {
        let mut lines = vec![format!("Page {}/{}", self.page, self.total_pages)];
        for (name, value) in self.fields(placeholder) {
            lines.push(format!("{}\n    {}", name, value));
        }
        lines.join("\n")
    }
}

fn show_interest(interest: Option<i32>, glyph: &str) -> String {
    match interest {
        Some(n) if n > 0 => glyph.repeat(n as usize),
        _ => String::new(),
    }
}

fn show_review(review: Option<&str>, settings: &RenderSettings) -> String {
    match review {
        Some(text) if !text.is_empty() => match crop(text, settings.review_preview_len) {
            Some(cut) => format!("{}{}", cut, settings.ellipsis),
            None => text.to_string(),
        },
        _ => String::new(),
    }
}
