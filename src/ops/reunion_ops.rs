use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::db::reunion_repo;
use crate::error::{ReunionError, ReunionResult};
use crate::model::{Id, Reunion, ReunionState};
use crate::ops::reunion_dates::{self, DateHint};
use crate::validation::trim_optional;

/// Attribute changes for create and update.
///
/// The outer `Option` says whether the attribute was supplied at all; the
/// inner one whether it was supplied as a value or as an explicit clear.
/// `duration` only feeds date reconciliation and is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReunionParams {
    pub name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub duration: i64,
}

impl ReunionParams {
    fn date_hint(&self) -> DateHint {
        DateHint::new(self.start_date.flatten(), self.end_date.flatten(), self.duration)
    }

    fn apply_to(&self, reunion: &mut Reunion) {
        if let Some(name) = &self.name {
            reunion.name = trim_optional(name.as_deref());
        }
        if let Some(desc) = &self.description {
            reunion.description = trim_optional(desc.as_deref());
        }
        if let Some(loc) = &self.location {
            reunion.location = trim_optional(loc.as_deref());
        }
        if let Some(start) = self.start_date {
            reunion.start_date = start;
        }
        if let Some(end) = self.end_date {
            reunion.end_date = end;
        }
        let resolution = reunion_dates::calculate_from(reunion, &self.date_hint());
        tracing::debug!(id = %reunion.id, ?resolution, "reconciled reunion dates");
    }
}

pub fn create_reunion(conn: &Connection, params: &ReunionParams) -> ReunionResult<Reunion> {
    let mut reunion = Reunion::create();
    params.apply_to(&mut reunion);
    reunion.validate()?;

    reunion_repo::insert(conn, &reunion)?;
    info!(id = %reunion.id, "created reunion");
    Ok(reunion)
}

/// Fetches a reunion that is still open to the API: missing ids are
/// `NotFound`, soft-deleted ones `Discarded`.
pub fn get_reunion(conn: &Connection, reunion_id: Id<Reunion>) -> ReunionResult<Reunion> {
    let reunion = reunion_repo::find_by_id(conn, reunion_id)?
        .ok_or_else(|| ReunionError::not_found(reunion_id))?;

    if reunion.is_discarded() {
        warn!(id = %reunion_id, "rejected access to discarded reunion");
        return Err(ReunionError::discarded(reunion_id));
    }
    Ok(reunion)
}

pub fn update_reunion(
    conn: &Connection,
    reunion_id: Id<Reunion>,
    params: &ReunionParams,
) -> ReunionResult<Reunion> {
    let mut updated = get_reunion(conn, reunion_id)?;

    params.apply_to(&mut updated);
    updated.validate()?;

    reunion_repo::update(conn, &mut updated)?;
    info!(id = %reunion_id, "updated reunion");
    Ok(updated)
}

/// Soft-deletes the reunion; the row stays in storage.
pub fn discard_reunion(conn: &Connection, reunion_id: Id<Reunion>) -> ReunionResult<Reunion> {
    let mut reunion = get_reunion(conn, reunion_id)?;

    reunion.discard(Utc::now());
    reunion_repo::update(conn, &mut reunion)?;
    info!(id = %reunion_id, "discarded reunion");
    Ok(reunion)
}

/// Moves the reunion to `Published` if it passes the publish validation.
/// On failure nothing is written and the stored state is unchanged.
pub fn publish_reunion(conn: &Connection, reunion_id: Id<Reunion>) -> ReunionResult<Reunion> {
    let mut reunion = get_reunion(conn, reunion_id)?;

    reunion.state = ReunionState::Published;
    if let Err(errors) = reunion.validate() {
        warn!(id = %reunion_id, fields = ?errors.fields(), "publish rejected");
        return Err(errors.into());
    }

    reunion_repo::update(conn, &mut reunion)?;
    info!(id = %reunion_id, "published reunion");
    Ok(reunion)
}
