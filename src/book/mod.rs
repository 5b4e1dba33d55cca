// Maeve - Reading Log Bot for Book Clubs
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! Book records and input normalization
//!
//! Members type book fields by hand, so everything that reaches the store
//! goes through the [`Normalizer`] first:
//! - title is mandatory, long titles and authors are cropped
//! - read year and interest are range-checked and dropped when implausible
//!
//! The normalizer reads the current year from an injectable [`Clock`].

pub mod clock;
pub mod normalizer;
pub mod record;

pub use clock::{Clock, FixedClock, SystemClock};
pub use normalizer::{FieldAdjustment, NormalizationOutcome, Normalizer, NormalizerSettings};
pub use record::{BookRecord, RawBookFields};
