use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::config::get_config;
use crate::error::Result;
use crate::services::export_service::ExportService;
use crate::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/export: the full record set as an XLSX download, generated
/// on demand. The filename embeds the configured country label and the
/// current date.
pub async fn export_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.stats_service.list_all().await?;
    let buffer = ExportService::generate_stats_xlsx(&stats)?;

    let date = chrono::Utc::now().format("%Y-%m-%d");
    let filename = match &get_config().country_label {
        Some(label) => format!("visa_stats_{}_{}.xlsx", label, date),
        None => format!("visa_stats_{}.xlsx", date),
    };
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
