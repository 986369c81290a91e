//! One-shot CSV-to-store loader: parses the whole semicolon-delimited
//! file, then replaces the entire `visa_stats` table. Any parse error
//! aborts before the store is touched.

use anyhow::Context;
use tracing::info;
use visa_stats_backend::{
    config::init_config,
    database::pool::create_pool,
    services::{backup_service::BackupService, stats_service::StatsService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;

    let csv_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "stats_visa.csv".to_string());

    let file = std::fs::File::open(&csv_path)
        .with_context(|| format!("cannot open {}", csv_path))?;
    let records = BackupService::read_csv(file)
        .with_context(|| format!("cannot parse {}", csv_path))?;
    info!("parsed {} records from {}", records.len(), csv_path);

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let service = StatsService::new(pool);
    service.replace_all(&records).await?;
    info!("visa_stats table replaced with {} records", records.len());

    Ok(())
}
