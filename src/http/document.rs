//! JSON:API request and response documents for the `reunions` resource.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Reunion, ReunionState};
use crate::ops::reunion_ops::ReunionParams;
use crate::validation::{self, ValidationErrors};

pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";
pub const RESOURCE_TYPE: &str = "reunions";

/// Top-level `{"data": ...}` wrapper.
#[derive(Debug, Serialize)]
pub struct Document<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ResourceObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: ReunionAttributes,
}

#[derive(Debug, Serialize)]
pub struct ReunionAttributes {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub state: ReunionState,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration: Option<i64>,
}

impl From<&Reunion> for ResourceObject {
    fn from(reunion: &Reunion) -> Self {
        Self {
            id: reunion.id.to_string(),
            kind: RESOURCE_TYPE,
            attributes: ReunionAttributes {
                name: reunion.name.clone(),
                description: reunion.description.clone(),
                location: reunion.location.clone(),
                state: reunion.state,
                start_date: reunion.start_date,
                end_date: reunion.end_date,
                duration: reunion.duration(),
            },
        }
    }
}

/// Incoming create/update document. `data.type` may be omitted; when present
/// it must be `reunions`.
#[derive(Debug, Deserialize)]
pub struct RequestDocument {
    pub data: RequestData,
}

#[derive(Debug, Deserialize)]
pub struct RequestData {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub attributes: AttributesPayload,
}

/// Permitted attributes. Unknown keys (including `state`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct AttributesPayload {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub start_date: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub end_date: Option<Option<String>>,
    #[serde(default)]
    pub duration: Option<Value>,
}

impl AttributesPayload {
    /// Parses dates and the duration hint. Unparseable dates are reported
    /// per attribute; an unusable duration is simply "no duration".
    pub fn into_params(self) -> Result<ReunionParams, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let start_date = parse_date_attr(self.start_date, "start_date", &mut errors);
        let end_date = parse_date_attr(self.end_date, "end_date", &mut errors);
        errors.into_result()?;

        Ok(ReunionParams {
            name: self.name,
            description: self.description,
            location: self.location,
            start_date,
            end_date,
            duration: duration_hint(self.duration.as_ref()),
        })
    }
}

fn parse_date_attr(
    raw: Option<Option<String>>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<Option<NaiveDate>> {
    match raw {
        None => None,
        Some(None) => Some(None),
        Some(Some(s)) => match validation::parse_date(&s, field) {
            Ok(date) => Some(date),
            Err(e) => {
                errors.add(e);
                None
            }
        },
    }
}

fn duration_hint(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => leading_integer(s),
        _ => 0,
    }
}

/// Reads the signed integer a string starts with, so `"3 days"` is 3 and
/// `"2.5"` is 2. No leading digits, or too many to fit, reads as 0.
fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let sign_len = s.len() - unsigned.len();
    s[..sign_len + digits].parse().unwrap_or(0)
}

#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

#[derive(Debug, Serialize)]
pub struct ErrorSource {
    pub pointer: String,
}

impl ErrorDocument {
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        Self {
            errors: errors
                .iter()
                .map(|e| ErrorObject {
                    status: "400".into(),
                    title: format!("Invalid {}", e.field),
                    detail: e.to_string(),
                    source: Some(ErrorSource {
                        pointer: format!("/data/attributes/{}", e.field),
                    }),
                })
                .collect(),
        }
    }

    pub fn single(status: u16, title: &str, detail: impl Into<String>, pointer: Option<&str>) -> Self {
        Self {
            errors: vec![ErrorObject {
                status: status.to_string(),
                title: title.to_string(),
                detail: detail.into(),
                source: pointer.map(|p| ErrorSource {
                    pointer: p.to_string(),
                }),
            }],
        }
    }
}
