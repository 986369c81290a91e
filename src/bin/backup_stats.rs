//! One-shot store-to-CSV snapshot: reads every record and writes the
//! semicolon-delimited backup file.

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

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let service = StatsService::new(pool);
    let stats = service.list_all().await?;

    let file = std::fs::File::create(&csv_path)
        .with_context(|| format!("cannot create {}", csv_path))?;
    BackupService::write_csv(file, &stats)?;
    info!("wrote {} records to {}", stats.len(), csv_path);

    Ok(())
}
