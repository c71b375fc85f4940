//! Request forms
//!
//! Every field is optional on the wire so a missing field becomes a
//! validation message instead of a 400 from the extractor.

pub mod auth;
pub mod choices;
pub mod main;
pub mod validators;

use std::collections::BTreeMap;

pub use choices::{Choice, Gender, Race, Rank};

pub const REQUIRED: &str = "This field is required.";

/// Validation messages keyed by field name
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Messages for one field, empty when it is valid
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// `Ok(value)` when nothing was recorded
    pub fn finish<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    /// Record a "required" error when the value is missing or blank
    pub fn required<'a>(
        &mut self,
        field: &'static str,
        value: &'a Option<String>,
    ) -> Option<&'a str> {
        let present = validators::present(value);
        if present.is_none() {
            self.add(field, REQUIRED);
        }
        present
    }

    /// Record a length error unless `value` has `min..=max` characters
    pub fn length(&mut self, field: &'static str, value: &str, min: usize, max: usize) {
        if validators::length_between(value, min, max) {
            return;
        }
        let message = if min == 0 {
            format!("Field cannot be longer than {max} characters.")
        } else {
            format!("Field must be between {min} and {max} characters long.")
        };
        self.add(field, message);
    }

    /// Parse an optional integer field
    pub fn optional_int<T: std::str::FromStr>(
        &mut self,
        field: &'static str,
        value: &Option<String>,
    ) -> Option<T> {
        let raw = validators::present(value)?;
        let parsed = validators::parse_int(raw);
        if parsed.is_none() {
            self.add(field, "Not a valid integer value.");
        }
        parsed
    }

    /// Parse a required integer field
    pub fn required_int<T: std::str::FromStr>(
        &mut self,
        field: &'static str,
        value: &Option<String>,
    ) -> Option<T> {
        if validators::present(value).is_none() {
            self.add(field, REQUIRED);
            return None;
        }
        self.optional_int(field, value)
    }

    /// Parse an optional `YYYY-MM-DD` date
    pub fn optional_date(
        &mut self,
        field: &'static str,
        value: &Option<String>,
    ) -> Option<chrono::NaiveDate> {
        let raw = validators::present(value)?;
        let parsed = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
        if parsed.is_none() {
            self.add(field, "Not a valid date value.");
        }
        parsed
    }

    /// Optional choice field; blank and "Not Sure" are kept as given
    pub fn optional_choice<C: Choice>(
        &mut self,
        field: &'static str,
        value: &Option<String>,
    ) -> Option<String> {
        let raw = validators::present(value)?;
        if C::is_valid(raw) {
            Some(raw.to_string())
        } else {
            self.add(field, "Not a valid choice");
            None
        }
    }

    /// Optional text limited to word characters
    pub fn word(
        &mut self,
        field: &'static str,
        value: &Option<String>,
        max: usize,
    ) -> Option<String> {
        let raw = validators::present(value)?;
        if !validators::is_word_chars(raw) {
            self.add(field, "Only letters, numbers and underscores are allowed.");
        }
        self.length(field, raw, 0, max);
        Some(raw.to_string())
    }
}

/// Raw field value for re-rendering a form
pub fn raw(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
