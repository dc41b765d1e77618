//! Untyped form input and its validation errors.
//!
//! Form submissions arrive as a bag of string fields. Entity parsers read
//! from a [`FormFields`] and either produce a typed record or a
//! [`ValidationError`] listing every offending field.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All problems found in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid form input: {}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Message for `field`, if it was rejected.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Raw submitted fields, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    /// Parse `name=value` pairs, e.g. from command-line arguments.
    pub fn parse_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Result<Self, ValidationError> {
        let mut fields = Self::new();
        let mut errors = Vec::new();
        for pair in pairs {
            match pair.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() => {
                    fields.insert(name.trim(), value);
                }
                _ => errors.push(FieldError {
                    field: pair.to_string(),
                    message: "is not a name=value pair".to_string(),
                }),
            }
        }
        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(ValidationError { errors })
        }
    }

    /// Trimmed, non-empty value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Collects field errors while an entity is being parsed.
#[derive(Debug)]
pub(crate) struct FormReader<'a> {
    fields: &'a FormFields,
    errors: Vec<FieldError>,
}

impl<'a> FormReader<'a> {
    pub(crate) fn new(fields: &'a FormFields) -> Self {
        Self {
            fields,
            errors: Vec::new(),
        }
    }

    fn raw(&self, name: &str) -> Option<&'a str> {
        let fields: &'a FormFields = self.fields;
        fields.get(name)
    }

    fn reject(&mut self, name: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: name.to_string(),
            message: message.into(),
        });
    }

    pub(crate) fn required_text(&mut self, name: &str) -> String {
        match self.raw(name) {
            Some(value) => value.to_string(),
            None => {
                self.reject(name, "is required");
                String::new()
            }
        }
    }

    pub(crate) fn optional_text(&mut self, name: &str) -> Option<String> {
        self.raw(name).map(str::to_string)
    }

    pub(crate) fn required_number<T: FromStr + Default>(&mut self, name: &str) -> T {
        match self.raw(name) {
            Some(value) => self.number(name, value),
            None => {
                self.reject(name, "is required");
                T::default()
            }
        }
    }

    pub(crate) fn optional_number<T: FromStr + Default>(&mut self, name: &str) -> T {
        match self.raw(name) {
            Some(value) => self.number(name, value),
            None => T::default(),
        }
    }

    /// Required `f64` that must be finite; `inf` and `NaN` parse but are rejected.
    pub(crate) fn required_decimal(&mut self, name: &str) -> f64 {
        let value = self.required_number(name);
        self.finite(name, value)
    }

    pub(crate) fn optional_decimal(&mut self, name: &str) -> f64 {
        let value = self.optional_number(name);
        self.finite(name, value)
    }

    fn finite(&mut self, name: &str, value: f64) -> f64 {
        if value.is_finite() {
            value
        } else {
            self.reject(name, "must be a finite number");
            0.0
        }
    }

    fn number<T: FromStr + Default>(&mut self, name: &str, value: &str) -> T {
        match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                self.reject(name, format!("must be a number, got '{}'", value));
                T::default()
            }
        }
    }

    /// Reject `name` unless `ok` holds.
    pub(crate) fn check(&mut self, name: &str, ok: bool, message: &str) {
        if !ok {
            self.reject(name, message);
        }
    }

    /// Comma-separated list.
    pub(crate) fn list(&mut self, name: &str) -> Vec<String> {
        self.raw(name)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}
