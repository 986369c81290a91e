pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::stats_service::StatsService;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub stats_service: StatsService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let stats_service = StatsService::new(pool.clone());

        Self {
            pool,
            stats_service,
        }
    }
}
