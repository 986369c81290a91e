use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The flat-format field list, `city` first. Both the CSV adapters and
/// the spreadsheet export derive their column sets from this; `id` is
/// store-assigned and never part of the flat representation.
pub const CSV_FIELDS: [&str; 19] = [
    "city",
    "visa_application_date",
    "visa_issue_date",
    "waiting_days",
    "travel_purpose",
    "planned_travel_date",
    "additional_doc_request",
    "tickets_purchased",
    "hotels_purchased",
    "employment_certificate",
    "financial_guarantee",
    "comments",
    "visa_center",
    "visa_status",
    "visa_issued_for_days",
    "corridor_days",
    "past_visas_trips",
    "consul",
    "planned_stay_in_country",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VisaStat {
    pub id: i64,
    pub city: String,
    pub visa_application_date: NaiveDate,
    pub visa_issue_date: Option<NaiveDate>,
    pub waiting_days: i64,
    pub travel_purpose: String,
    pub planned_travel_date: Option<NaiveDate>,
    pub additional_doc_request: bool,
    pub tickets_purchased: bool,
    pub hotels_purchased: bool,
    pub employment_certificate: String,
    pub financial_guarantee: Option<f64>,
    pub comments: String,
    pub visa_center: String,
    /// "1" = issued, "0" = refused.
    pub visa_status: String,
    pub visa_issued_for_days: Option<i64>,
    pub corridor_days: Option<i64>,
    pub past_visas_trips: String,
    pub consul: String,
    pub planned_stay_in_country: String,
}

/// A record as it exists before the store assigns an id: the submission
/// gateway builds one after deriving `waiting_days`, and the bulk
/// importer parses one per CSV line.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVisaStat {
    pub city: String,
    pub visa_application_date: NaiveDate,
    pub visa_issue_date: Option<NaiveDate>,
    pub waiting_days: i64,
    pub travel_purpose: String,
    pub planned_travel_date: Option<NaiveDate>,
    pub additional_doc_request: bool,
    pub tickets_purchased: bool,
    pub hotels_purchased: bool,
    pub employment_certificate: String,
    pub financial_guarantee: Option<f64>,
    pub comments: String,
    pub visa_center: String,
    pub visa_status: String,
    pub visa_issued_for_days: Option<i64>,
    pub corridor_days: Option<i64>,
    pub past_visas_trips: String,
    pub consul: String,
    pub planned_stay_in_country: String,
}

impl NewVisaStat {
    pub fn into_stat(self, id: i64) -> VisaStat {
        VisaStat {
            id,
            city: self.city,
            visa_application_date: self.visa_application_date,
            visa_issue_date: self.visa_issue_date,
            waiting_days: self.waiting_days,
            travel_purpose: self.travel_purpose,
            planned_travel_date: self.planned_travel_date,
            additional_doc_request: self.additional_doc_request,
            tickets_purchased: self.tickets_purchased,
            hotels_purchased: self.hotels_purchased,
            employment_certificate: self.employment_certificate,
            financial_guarantee: self.financial_guarantee,
            comments: self.comments,
            visa_center: self.visa_center,
            visa_status: self.visa_status,
            visa_issued_for_days: self.visa_issued_for_days,
            corridor_days: self.corridor_days,
            past_visas_trips: self.past_visas_trips,
            consul: self.consul,
            planned_stay_in_country: self.planned_stay_in_country,
        }
    }
}

impl From<VisaStat> for NewVisaStat {
    fn from(stat: VisaStat) -> Self {
        Self {
            city: stat.city,
            visa_application_date: stat.visa_application_date,
            visa_issue_date: stat.visa_issue_date,
            waiting_days: stat.waiting_days,
            travel_purpose: stat.travel_purpose,
            planned_travel_date: stat.planned_travel_date,
            additional_doc_request: stat.additional_doc_request,
            tickets_purchased: stat.tickets_purchased,
            hotels_purchased: stat.hotels_purchased,
            employment_certificate: stat.employment_certificate,
            financial_guarantee: stat.financial_guarantee,
            comments: stat.comments,
            visa_center: stat.visa_center,
            visa_status: stat.visa_status,
            visa_issued_for_days: stat.visa_issued_for_days,
            corridor_days: stat.corridor_days,
            past_visas_trips: stat.past_visas_trips,
            consul: stat.consul,
            planned_stay_in_country: stat.planned_stay_in_country,
        }
    }
}
