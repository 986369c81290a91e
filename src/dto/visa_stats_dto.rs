use serde::{Deserialize, Serialize};

use crate::services::aggregate_service::{Period, SeriesPoint, WaitingSummary};

/// Everything the form submits: the full record minus `id` and
/// `waiting_days`, both of which the server derives. Dates arrive as
/// strings and are parsed at the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitVisaStatRequest {
    pub city: String,
    pub visa_application_date: String,
    pub visa_issue_date: String,
    #[serde(default)]
    pub travel_purpose: String,
    #[serde(default)]
    pub planned_travel_date: Option<String>,
    #[serde(default)]
    pub additional_doc_request: bool,
    #[serde(default)]
    pub tickets_purchased: bool,
    #[serde(default)]
    pub hotels_purchased: bool,
    #[serde(default)]
    pub employment_certificate: String,
    #[serde(default)]
    pub financial_guarantee: Option<f64>,
    #[serde(default)]
    pub comments: String,
    pub visa_center: String,
    pub visa_status: String,
    #[serde(default)]
    pub visa_issued_for_days: Option<i64>,
    #[serde(default)]
    pub corridor_days: Option<i64>,
    #[serde(default)]
    pub past_visas_trips: String,
    #[serde(default)]
    pub consul: String,
    #[serde(default)]
    pub planned_stay_in_country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsQuery {
    pub city: Option<String>,
    pub visa_center: Option<String>,
    pub period: Option<Period>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatsResponse {
    pub total: usize,
    pub summary: WaitingSummary,
    pub series: Vec<SeriesPoint>,
}
