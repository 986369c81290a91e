use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::dto::visa_stats_dto::{DashboardStatsResponse, StatsQuery, SubmitVisaStatRequest};
use crate::error::Result;
use crate::services::aggregate_service::{self, StatsFilter};
use crate::AppState;

/// POST /api/visa-stats: persist one experience and return the full
/// record including the assigned id and derived waiting time.
pub async fn submit_stat(
    State(state): State<AppState>,
    Json(payload): Json<SubmitVisaStatRequest>,
) -> Result<impl IntoResponse> {
    let stat = state.stats_service.submit(payload).await?;
    Ok(Json(stat))
}

/// GET /api/visa-stats: every record, insertion order.
pub async fn list_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.stats_service.list_all().await?;
    Ok(Json(stats))
}

/// GET /api/visa-stats/summary: filtered waiting-time statistics for
/// the dashboard.
pub async fn summary_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse> {
    let stats = state.stats_service.list_all().await?;

    let filter = StatsFilter {
        city: query.city,
        visa_center: query.visa_center,
        period: query.period.unwrap_or_default(),
    };
    let filtered = aggregate_service::filter_stats(stats, &filter, Utc::now().date_naive());

    let response = DashboardStatsResponse {
        total: filtered.len(),
        summary: aggregate_service::summarize(&filtered),
        series: aggregate_service::series_by_date(&filtered),
    };
    Ok(Json(response))
}
