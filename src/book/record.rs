// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Book record as members see it

use serde::{Deserialize, Serialize};
use std::fmt;

/// One logged book
///
/// The title is the record's identity within a member's list: the store
/// looks books up and mutates them by title equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: Option<String>,
    pub read_year: Option<i32>,
    pub interest: Option<i32>,
    pub review: Option<String>,
}

impl BookRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            read_year: None,
            interest: None,
            review: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_read_year(mut self, read_year: i32) -> Self {
        self.read_year = Some(read_year);
        self
    }

    pub fn with_interest(mut self, interest: i32) -> Self {
        self.interest = Some(interest);
        self
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }

    pub fn has_review(&self) -> bool {
        self.review.as_deref().is_some_and(|r| !r.is_empty())
    }
}

impl fmt::Display for BookRecord {
    /// One-line summary used by the plain-text book listing
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.title)?;
        if let Some(author) = &self.author {
            write!(f, " ({})", author)?;
        }
        write!(f, ".")?;
        if let Some(year) = self.read_year {
            write!(f, " Read in {}.", year)?;
        }
        if let Some(interest) = self.interest {
            write!(f, " I{}", interest)?;
        }
        Ok(())
    }
}

/// Book fields exactly as a member typed them, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBookFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub read_year: Option<i32>,
    pub interest: Option<i32>,
}

impl RawBookFields {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_full_record() {
        let book = BookRecord::new("Solaris")
            .with_author("Stanisław Lem")
            .with_read_year(2021)
            .with_interest(3);
        assert_eq!(book.to_string(), "\"Solaris\" (Stanisław Lem). Read in 2021. I3");
    }

    #[test]
    fn test_display_title_only() {
        assert_eq!(BookRecord::new("Solaris").to_string(), "\"Solaris\".");
    }

    #[test]
    fn test_empty_review_is_not_a_review() {
        let book = BookRecord::new("Solaris").with_review("");
        assert!(!book.has_review());
        assert!(book.clone().with_review("Ocean!").has_review());
    }
}
