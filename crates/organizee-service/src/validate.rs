use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use organizee_data::Role;

use crate::{ServiceError, ServiceResult};

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validation messages collected across a whole input, so a form
/// can render every problem at once instead of the first.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message recorded for a field
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message.as_str())
    }

    /// Require a non blank text field
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.push(field, message);
        }
    }

    /// Require a syntactically valid email address
    pub fn email(&mut self, field: &str, value: &str) {
        if !value.validate_email() {
            self.push(field, "Invalid email address.");
        }
    }

    /// Parse a role name
    pub fn role(&mut self, field: &str, value: &str) -> Option<Role> {
        match Role::parse(value) {
            Some(role) => Some(role),
            None => {
                self.push(field, "Invalid role.");
                None
            }
        }
    }

    /// Parse a required YYYY-MM-DD date field
    pub fn date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.push(field, "Invalid date.");
                None
            }
        }
    }

    /// Parse an optional date field. Blank counts as not provided.
    pub fn date_opt(&mut self, field: &str, value: Option<&str>) -> Option<NaiveDate> {
        match value {
            Some(value) if !value.trim().is_empty() => self.date(field, value),
            _ => None,
        }
    }

    /// Parse an event timestamp. Accepts RFC 3339 as well as the
    /// datetime-local form without seconds or offset.
    pub fn datetime(&mut self, field: &str, value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(value) {
            return Some(date.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
            if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
                return Some(date.and_utc());
            }
        }
        self.push(field, "Invalid date.");
        None
    }

    /// Amounts are whole rupiah and must be positive
    pub fn amount(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.push(field, "Amount must be greater than 0.");
        }
    }

    /// Calendar month, 1 through 12
    pub fn month(&mut self, field: &str, value: u32) {
        if !(1..=12).contains(&value) {
            self.push(field, "Invalid month.");
        }
    }

    /// A password that must be present, e.g. on sign up
    pub fn required_password(&mut self, field: &str, value: &str) {
        if value.chars().count() < 5 {
            self.push(field, "Password must be at least 5 characters.");
        }
    }

    /// An optional password change. Blank means keep the current
    /// credential; otherwise both fields must agree and the
    /// minimum length applies. Returns the accepted password.
    pub fn password_change(
        &mut self,
        password: Option<&str>,
        confirm: Option<&str>,
    ) -> Option<String> {
        let password = password.unwrap_or("");
        if password.is_empty() {
            return None;
        }
        let before = self.len();
        self.required_password("password", password);
        if confirm.unwrap_or("") != password {
            self.push("confirm_password", "Passwords do not match.");
        }
        if self.len() == before {
            Some(password.to_string())
        } else {
            None
        }
    }

    /// Fail with everything collected so far, or pass
    pub fn check(self) -> ServiceResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Invalid(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}
