use chrono::{Days, NaiveDate};
use rusqlite::Connection;
use tracing::info;

use crate::db::reunion_repo;
use crate::error::{ReunionError, ReunionResult};
use crate::model::{Reunion, ReunionState};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub created: usize,
    pub published: usize,
    pub drafts: usize,
}

/// Inserts `count` sample reunions starting 1 to 20 days after `today`,
/// each lasting 2 to 21 days, alternating published and draft.
/// All rows are written in one transaction.
pub fn seed_reunions(conn: &Connection, count: usize, today: NaiveDate) -> ReunionResult<SeedStats> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = SeedStats::default();

    for i in 0..count {
        let reunion = sample_reunion(i, today)?;
        reunion_repo::insert(&tx, &reunion)?;

        stats.created += 1;
        match reunion.state {
            ReunionState::Published => stats.published += 1,
            ReunionState::Draft => stats.drafts += 1,
        }
    }

    tx.commit()?;
    info!(created = stats.created, published = stats.published, "seeded reunions");
    Ok(stats)
}

fn sample_reunion(i: usize, today: NaiveDate) -> ReunionResult<Reunion> {
    let lead = (i as u64 * 7) % 20 + 1;
    let span = (i as u64 * 3) % 20 + 1;
    let start = today
        .checked_add_days(Days::new(lead))
        .ok_or_else(|| ReunionError::InvalidData(format!("seed start date overflows from {today}")))?;
    let end = start
        .checked_add_days(Days::new(span))
        .ok_or_else(|| ReunionError::InvalidData(format!("seed end date overflows from {start}")))?;

    let mut reunion = Reunion::create();
    reunion.name = Some(format!("Reunion {i}"));
    reunion.description = Some(format!("Description for {i}"));
    reunion.location = Some(format!("Location for {i}"));
    reunion.start_date = Some(start);
    reunion.end_date = Some(end);
    reunion.state = if i % 2 == 0 {
        ReunionState::Published
    } else {
        ReunionState::Draft
    };
    reunion.validate()?;
    Ok(reunion)
}
