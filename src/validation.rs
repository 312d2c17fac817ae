use std::fmt;

use chrono::NaiveDate;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn blank(field: &'static str) -> Self {
        Self::new(field, "can't be blank")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Every field error recorded during one validity check, in the order found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Messages recorded against `field`.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        for error in &self.errors {
            if !fields.contains(&error.field) {
                fields.push(error.field);
            }
        }
        fields
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parses a calendar date written as `YYYY-MM-DD` or `YYYY/MM/DD`.
/// Blank input is an absent date, not an error.
pub fn parse_date(value: &str, field: &'static str) -> Result<Option<NaiveDate>, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(Some)
        .ok_or_else(|| FieldError::new(field, format!("is not a valid date: {trimmed}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_optional_trims() {
        assert_eq!(trim_optional(Some("  hi  ")), Some("hi".to_string()));
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
        assert_eq!(trim_optional(None), None);
    }

    #[test]
    fn parse_date_accepts_dashes_and_slashes() {
        let expected = NaiveDate::from_ymd_opt(2019, 11, 28);
        assert_eq!(parse_date("2019-11-28", "start_date").unwrap(), expected);
        assert_eq!(parse_date("2019/11/28", "start_date").unwrap(), expected);
    }

    #[test]
    fn parse_date_treats_blank_as_absent() {
        assert_eq!(parse_date("  ", "end_date").unwrap(), None);
    }

    #[test]
    fn parse_date_rejects_garbage_on_the_named_field() {
        let err = parse_date("next tuesday", "end_date").unwrap_err();
        assert_eq!(err.field, "end_date");
    }

    #[test]
    fn errors_collect_in_order_and_dedupe_fields() {
        let mut errors = ValidationErrors::new();
        errors.add(FieldError::blank("name"));
        errors.add(FieldError::blank("location"));
        errors.add(FieldError::new("name", "is odd"));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.fields(), vec!["name", "location"]);
        assert_eq!(errors.on("name"), vec!["can't be blank", "is odd"]);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
