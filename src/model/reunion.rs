use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::ids::Id;
use crate::validation::{FieldError, ValidationErrors};

/// Publication lifecycle of a reunion. Drafts may be incomplete; published
/// reunions must carry every descriptive field and both dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReunionState {
    #[default]
    Draft,
    Published,
}

impl ReunionState {
    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ReunionState::Draft),
            "published" => Some(ReunionState::Published),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ReunionState::Draft => "draft",
            ReunionState::Published => "published",
        }
    }
}

/// A reunion event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reunion {
    pub id: Id<Reunion>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub state: ReunionState,
    pub discarded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reunion {
    /// A blank draft with a fresh id.
    pub fn create() -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            name: None,
            description: None,
            location: None,
            start_date: None,
            end_date: None,
            state: ReunionState::Draft,
            discarded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Inclusive day count between the two dates; `None` unless both are set.
    pub fn duration(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }

    pub fn is_published(&self) -> bool {
        self.state == ReunionState::Published
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded_at.is_some()
    }

    pub fn is_kept(&self) -> bool {
        !self.is_discarded()
    }

    /// Sets the soft-delete marker. Discarding twice keeps the first timestamp.
    pub fn discard(&mut self, at: DateTime<Utc>) {
        if self.discarded_at.is_none() {
            self.discarded_at = Some(at);
        }
    }

    /// Runs the date-ordering rule and, for published reunions, the
    /// required-field rule. Every violation is reported, not just the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.is_published() {
            if self.name.is_none() {
                errors.add(FieldError::blank("name"));
            }
            if self.description.is_none() {
                errors.add(FieldError::blank("description"));
            }
            if self.location.is_none() {
                errors.add(FieldError::blank("location"));
            }
            if self.start_date.is_none() {
                errors.add(FieldError::blank("start_date"));
            }
            if self.end_date.is_none() {
                errors.add(FieldError::blank("end_date"));
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.add(FieldError::new(
                    "end_date",
                    "must not be earlier than start_date",
                ));
            }
        }

        errors.into_result()
    }
}
