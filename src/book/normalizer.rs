// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Book field normalization
//!
//! Turns raw member input into a [`BookRecord`] plus a report of what had to
//! be changed. Every field is checked independently and all results are
//! collected before the outcome is assembled.
//!
//! | field     | empty            | too long / too high     | too low             |
//! |-----------|------------------|-------------------------|---------------------|
//! | title     | `InvalidInput`   | cropped, still clean    | -                   |
//! | author    | absent           | cropped, still clean    | -                   |
//! | read_year | absent           | cleared, not clean      | cleared, not clean  |
//! | interest  | absent           | cleared, not clean      | cleared, not clean  |
//!
//! Cropping never costs a member their book; an implausible year or rating
//! is dropped and reported.

use super::clock::{Clock, SystemClock};
use super::record::{BookRecord, RawBookFields};
use crate::error::{MaeveError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const MAX_TITLE_LEN: usize = 300;
pub const MAX_AUTHOR_LEN: usize = 300;
pub const MIN_READ_YEAR: i32 = 1900;
pub const MIN_INTEREST: i32 = 1;

/// Interest scale of the current rating buttons (1..=3)
pub const DEFAULT_INTEREST_UPPER_BOUND: i32 = 3;
/// Interest scale used by older book logs (1..=5)
pub const LEGACY_INTEREST_UPPER_BOUND: i32 = 5;

/// Separator between adjustment messages in a reply
const MESSAGE_SEPARATOR: &str = ".\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerSettings {
    /// Maximum title length in characters
    pub max_title_len: usize,
    /// Maximum author length in characters
    pub max_author_len: usize,
    /// Earliest accepted read year (inclusive)
    pub min_read_year: i32,
    /// Highest accepted interest rating (inclusive)
    pub interest_upper_bound: i32,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            max_title_len: MAX_TITLE_LEN,
            max_author_len: MAX_AUTHOR_LEN,
            min_read_year: MIN_READ_YEAR,
            interest_upper_bound: DEFAULT_INTEREST_UPPER_BOUND,
        }
    }
}

impl NormalizerSettings {
    pub fn with_interest_upper_bound(mut self, bound: i32) -> Self {
        self.interest_upper_bound = bound;
        self
    }
}

/// A change the normalizer made to one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldAdjustment {
    TitleCropped,
    AuthorCropped,
    YearTooBig,
    YearTooSmall,
    InterestTooBig,
    InterestTooSmall,
}

impl FieldAdjustment {
    pub fn message(&self) -> &'static str {
        match self {
            FieldAdjustment::TitleCropped => "Title cropped",
            FieldAdjustment::AuthorCropped => "Author cropped",
            FieldAdjustment::YearTooBig => "Year is bigger than the present year",
            FieldAdjustment::YearTooSmall => "Year value is too small",
            FieldAdjustment::InterestTooBig => "Interest value is too big",
            FieldAdjustment::InterestTooSmall => "Interest value is too small",
        }
    }

    /// Whether the field value was dropped rather than kept in a shorter form
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            FieldAdjustment::TitleCropped | FieldAdjustment::AuthorCropped
        )
    }
}

impl fmt::Display for FieldAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of normalizing one set of raw fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationOutcome {
    pub record: BookRecord,
    /// False when any field value had to be dropped
    pub clean: bool,
    /// Adjustments in field order: title, author, read year, interest
    pub adjustments: Vec<FieldAdjustment>,
}

impl NormalizationOutcome {
    pub fn messages(&self) -> Vec<&'static str> {
        self.adjustments.iter().map(FieldAdjustment::message).collect()
    }

    /// All adjustment messages joined into the text shown to the member
    ///
    /// Empty when nothing was adjusted.
    pub fn message(&self) -> String {
        self.messages().join(MESSAGE_SEPARATOR)
    }

    pub fn was_adjusted(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Per-field result: the kept value, whether it passed, and what changed
struct FieldCheck<T> {
    value: T,
    passed: bool,
    adjustment: Option<FieldAdjustment>,
}

impl<T> FieldCheck<T> {
    fn pass(value: T) -> Self {
        Self {
            value,
            passed: true,
            adjustment: None,
        }
    }

    fn adjusted(value: T, adjustment: FieldAdjustment) -> Self {
        Self {
            value,
            passed: !adjustment.is_rejection(),
            adjustment: Some(adjustment),
        }
    }
}

/// Validates and clamps raw book fields
///
/// Pure apart from reading the current year from its [`Clock`].
#[derive(Clone)]
pub struct Normalizer {
    settings: NormalizerSettings,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("settings", &self.settings)
            .field("current_year", &self.clock.current_year())
            .finish()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerSettings::default())
    }
}

impl Normalizer {
    pub fn new(settings: NormalizerSettings) -> Self {
        Self {
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &NormalizerSettings {
        &self.settings
    }

    /// Normalize the four member-supplied fields
    ///
    /// # Errors
    /// Returns `InvalidInput` when the title is absent or empty. No partial
    /// outcome is produced in that case.
    pub fn normalize(
        &self,
        title: Option<&str>,
        author: Option<&str>,
        read_year: Option<i32>,
        interest: Option<i32>,
    ) -> Result<NormalizationOutcome> {
        let title = self.check_title(title);
        let author = self.check_author(author);
        let read_year = self.check_read_year(read_year);
        let interest = self.check_interest(interest);

        let title = title?;

        let clean = title.passed && author.passed && read_year.passed && interest.passed;
        let adjustments = [
            title.adjustment,
            author.adjustment,
            read_year.adjustment,
            interest.adjustment,
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(NormalizationOutcome {
            record: BookRecord {
                title: title.value,
                author: author.value,
                read_year: read_year.value,
                interest: interest.value,
                review: None,
            },
            clean,
            adjustments,
        })
    }

    pub fn normalize_fields(&self, fields: &RawBookFields) -> Result<NormalizationOutcome> {
        self.normalize(
            fields.title.as_deref(),
            fields.author.as_deref(),
            fields.read_year,
            fields.interest,
        )
    }

    fn check_title(&self, title: Option<&str>) -> Result<FieldCheck<String>> {
        let title = match title {
            Some(t) if !t.is_empty() => t,
            _ => {
                return Err(MaeveError::InvalidInput(
                    "Title can not be empty".to_string(),
                ))
            }
        };

        Ok(match crop(title, self.settings.max_title_len) {
            Some(cropped) => FieldCheck::adjusted(cropped, FieldAdjustment::TitleCropped),
            None => FieldCheck::pass(title.to_string()),
        })
    }

    fn check_author(&self, author: Option<&str>) -> FieldCheck<Option<String>> {
        let author = match author {
            Some(a) if !a.is_empty() => a,
            _ => return FieldCheck::pass(None),
        };

        match crop(author, self.settings.max_author_len) {
            Some(cropped) => FieldCheck::adjusted(Some(cropped), FieldAdjustment::AuthorCropped),
            None => FieldCheck::pass(Some(author.to_string())),
        }
    }

    fn check_read_year(&self, read_year: Option<i32>) -> FieldCheck<Option<i32>> {
        match read_year {
            None => FieldCheck::pass(None),
            Some(year) if year > self.clock.current_year() => {
                FieldCheck::adjusted(None, FieldAdjustment::YearTooBig)
            }
            Some(year) if year < self.settings.min_read_year => {
                FieldCheck::adjusted(None, FieldAdjustment::YearTooSmall)
            }
            Some(year) => FieldCheck::pass(Some(year)),
        }
    }

    fn check_interest(&self, interest: Option<i32>) -> FieldCheck<Option<i32>> {
        match interest {
            None => FieldCheck::pass(None),
            Some(value) if value > self.settings.interest_upper_bound => {
                FieldCheck::adjusted(None, FieldAdjustment::InterestTooBig)
            }
            Some(value) if value < MIN_INTEREST => {
                FieldCheck::adjusted(None, FieldAdjustment::InterestTooSmall)
            }
            Some(value) => FieldCheck::pass(Some(value)),
        }
    }
}

/// First `max_chars` characters of `text`, or `None` if it already fits
pub(crate) fn crop(text: &str, max_chars: usize) -> Option<String> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Some(text[..byte_idx].to_string()),
        None => None,
    }
}
