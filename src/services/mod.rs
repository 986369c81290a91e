pub mod aggregate_service;
pub mod backup_service;
pub mod export_service;
pub mod stats_service;
