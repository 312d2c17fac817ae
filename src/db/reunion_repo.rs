use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};

use crate::error::{ReunionError, ReunionResult};
use crate::model::{Id, Reunion, ReunionState};

const REUNION_COLUMNS: &str = "id, name, description, location, start_date, end_date, state, discarded_at, created_at, updated_at";

/// Which rows a query may see. Every read names its scope explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Rows without a soft-delete marker.
    Kept,
    /// Soft-deleted rows only.
    Discarded,
    /// Everything, soft-deleted or not.
    All,
}

impl Scope {
    fn where_clause(&self) -> &'static str {
        match self {
            Scope::Kept => "WHERE discarded_at IS NULL",
            Scope::Discarded => "WHERE discarded_at IS NOT NULL",
            Scope::All => "",
        }
    }
}

pub fn insert(conn: &Connection, reunion: &Reunion) -> ReunionResult<()> {
    conn.execute(
        &format!("INSERT INTO reunions ({REUNION_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
        params![
            reunion.id.value.to_string(),
            reunion.name,
            reunion.description,
            reunion.location,
            reunion.start_date.map(|d| d.to_string()),
            reunion.end_date.map(|d| d.to_string()),
            reunion.state.to_db_str(),
            reunion.discarded_at.map(|t| t.to_rfc3339()),
            reunion.created_at.to_rfc3339(),
            reunion.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Writes every mutable column and stamps `updated_at`.
pub fn update(conn: &Connection, reunion: &mut Reunion) -> ReunionResult<()> {
    let updated_at = Utc::now();
    let changed = conn.execute(
        "UPDATE reunions SET name = ?1, description = ?2, location = ?3, start_date = ?4,
         end_date = ?5, state = ?6, discarded_at = ?7, updated_at = ?8
         WHERE id = ?9",
        params![
            reunion.name,
            reunion.description,
            reunion.location,
            reunion.start_date.map(|d| d.to_string()),
            reunion.end_date.map(|d| d.to_string()),
            reunion.state.to_db_str(),
            reunion.discarded_at.map(|t| t.to_rfc3339()),
            updated_at.to_rfc3339(),
            reunion.id.value.to_string(),
        ],
    )?;

    if changed == 0 {
        return Err(ReunionError::not_found(reunion.id));
    }
    reunion.updated_at = updated_at;
    Ok(())
}

/// Looks a reunion up regardless of its soft-delete marker; the caller decides
/// what a discarded row means.
pub fn find_by_id(conn: &Connection, id: Id<Reunion>) -> ReunionResult<Option<Reunion>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REUNION_COLUMNS} FROM reunions WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.value.to_string()], |row| {
        Ok(row_to_reunion(row))
    });

    match result {
        Ok(reunion) => Ok(Some(reunion?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Up to `limit` reunions in `scope`, oldest first.
pub fn find_page(conn: &Connection, scope: Scope, limit: u32) -> ReunionResult<Vec<Reunion>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REUNION_COLUMNS} FROM reunions {} ORDER BY rowid LIMIT ?1",
        scope.where_clause()
    ))?;

    let reunions = stmt
        .query_map(params![i64::from(limit)], |row| Ok(row_to_reunion(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(reunions)
}

pub fn count(conn: &Connection, scope: Scope) -> ReunionResult<usize> {
    let n: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM reunions {}", scope.where_clause()),
        [],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

/// Published rows, discarded or not.
pub fn count_published(conn: &Connection) -> ReunionResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM reunions WHERE state = ?1",
        params![ReunionState::Published.to_db_str()],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

fn row_to_reunion(row: &Row<'_>) -> ReunionResult<Reunion> {
    let id_str: String = row.get(0)?;
    let state_str: String = row.get(6)?;

    let state = ReunionState::from_db_str(&state_str)
        .ok_or_else(|| ReunionError::InvalidData(format!("unknown state `{state_str}`")))?;

    Ok(Reunion {
        id: id_str
            .parse::<Id<Reunion>>()
            .map_err(|e| ReunionError::InvalidData(format!("invalid reunion id `{id_str}`: {e}")))?,
        name: row.get(1)?,
        description: row.get(2)?,
        location: row.get(3)?,
        start_date: parse_stored_date(row.get(4)?)?,
        end_date: parse_stored_date(row.get(5)?)?,
        state,
        discarded_at: row
            .get::<_, Option<String>>(7)?
            .map(|s| parse_stored_timestamp(&s))
            .transpose()?,
        created_at: parse_stored_timestamp(&row.get::<_, String>(8)?)?,
        updated_at: parse_stored_timestamp(&row.get::<_, String>(9)?)?,
    })
}

fn parse_stored_date(value: Option<String>) -> ReunionResult<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|e| ReunionError::InvalidData(format!("Invalid date `{s}`: {e}")))
        })
        .transpose()
}

fn parse_stored_timestamp(value: &str) -> ReunionResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ReunionError::InvalidData(format!("Invalid timestamp `{value}`: {e}")))
}
