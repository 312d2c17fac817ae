use rusqlite::Connection;

use crate::db::reunion_repo::{self, Scope};
use crate::error::ReunionResult;
use crate::model::Reunion;

/// Maximum number of reunions returned by any listing.
pub const LIST_LIMIT: u32 = 20;

/// Reunions that have not been discarded.
pub fn kept_reunions(conn: &Connection) -> ReunionResult<Vec<Reunion>> {
    reunion_repo::find_page(conn, Scope::Kept, LIST_LIMIT)
}

/// Every reunion, discarded ones included.
pub fn reunions_with_soft_delete(conn: &Connection) -> ReunionResult<Vec<Reunion>> {
    reunion_repo::find_page(conn, Scope::All, LIST_LIMIT)
}

/// Row counts by lifecycle, reported when the server starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inventory {
    pub kept: usize,
    pub discarded: usize,
    pub published: usize,
}

pub fn inventory(conn: &Connection) -> ReunionResult<Inventory> {
    Ok(Inventory {
        kept: reunion_repo::count(conn, Scope::Kept)?,
        discarded: reunion_repo::count(conn, Scope::Discarded)?,
        published: reunion_repo::count_published(conn)?,
    })
}
