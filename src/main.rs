use anyhow::Context;
use chrono::Utc;
use clap::Parser;

use reunions::config::ServerConfig;
use reunions::db::schema;
use reunions::http::{self, AppState};
use reunions::logging::init_logging;
use reunions::queries::reunion_queries;
use reunions::seed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.log_format);
    config.validate()?;

    let conn = schema::open(&config.database)
        .with_context(|| format!("failed to open database {}", config.database.display()))?;

    if let Some(count) = config.seed {
        let stats = seed::seed_reunions(&conn, count, Utc::now().date_naive())
            .context("failed to seed sample reunions")?;
        tracing::info!(
            created = stats.created,
            published = stats.published,
            drafts = stats.drafts,
            "sample data ready"
        );
    }

    let inventory = reunion_queries::inventory(&conn).context("failed to count reunions")?;
    tracing::info!(
        kept = inventory.kept,
        discarded = inventory.discarded,
        published = inventory.published,
        "database ready"
    );

    http::serve(config.bind, AppState::new(conn)).await
}
