use crate::dto::visa_stats_dto::SubmitVisaStatRequest;
use crate::error::{Error, Result};
use crate::models::visa_stat::{NewVisaStat, VisaStat};
use crate::utils::date::parse_date;
use sqlx::SqlitePool;

const INSERT_SQL: &str = "INSERT INTO visa_stats (
        city, visa_application_date, visa_issue_date, waiting_days, travel_purpose,
        planned_travel_date, additional_doc_request, tickets_purchased, hotels_purchased,
        employment_certificate, financial_guarantee, comments, visa_center, visa_status,
        visa_issued_for_days, corridor_days, past_visas_trips, consul, planned_stay_in_country
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

#[derive(Clone)]
pub struct StatsService {
    pool: SqlitePool,
}

impl StatsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Submission gateway: parse the two dates, derive `waiting_days`,
    /// persist, return the enriched record. An issue date before the
    /// application date yields a negative value and is stored as-is.
    pub async fn submit(&self, req: SubmitVisaStatRequest) -> Result<VisaStat> {
        let application_date = parse_date(&req.visa_application_date).ok_or_else(|| {
            Error::Validation(format!(
                "Invalid visa_application_date: {}",
                req.visa_application_date
            ))
        })?;
        let issue_date = parse_date(&req.visa_issue_date).ok_or_else(|| {
            Error::Validation(format!("Invalid visa_issue_date: {}", req.visa_issue_date))
        })?;
        let planned_travel_date = match req.planned_travel_date.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw).ok_or_else(|| {
                Error::Validation(format!("Invalid planned_travel_date: {}", raw))
            })?),
        };

        let waiting_days = (issue_date - application_date).num_days();

        let stat = NewVisaStat {
            city: req.city,
            visa_application_date: application_date,
            visa_issue_date: Some(issue_date),
            waiting_days,
            travel_purpose: req.travel_purpose,
            planned_travel_date,
            additional_doc_request: req.additional_doc_request,
            tickets_purchased: req.tickets_purchased,
            hotels_purchased: req.hotels_purchased,
            employment_certificate: req.employment_certificate,
            financial_guarantee: req.financial_guarantee,
            comments: req.comments,
            visa_center: req.visa_center,
            visa_status: req.visa_status,
            visa_issued_for_days: req.visa_issued_for_days,
            corridor_days: req.corridor_days,
            past_visas_trips: req.past_visas_trips,
            consul: req.consul,
            planned_stay_in_country: req.planned_stay_in_country,
        };

        let id = self.insert(&stat).await?;
        Ok(stat.into_stat(id))
    }

    pub async fn insert(&self, stat: &NewVisaStat) -> Result<i64> {
        let result = bind_stat(sqlx::query(INSERT_SQL), stat)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list_all(&self) -> Result<Vec<VisaStat>> {
        let stats =
            sqlx::query_as::<_, VisaStat>("SELECT * FROM visa_stats ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(stats)
    }

    /// Full-replace load for the bulk importer: the table is cleared and
    /// refilled inside one transaction, so readers never observe a
    /// half-loaded state.
    pub async fn replace_all(&self, stats: &[NewVisaStat]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM visa_stats").execute(&mut *tx).await?;
        for stat in stats {
            bind_stat(sqlx::query(INSERT_SQL), stat)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

fn bind_stat<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    stat: &'q NewVisaStat,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(&stat.city)
        .bind(stat.visa_application_date)
        .bind(stat.visa_issue_date)
        .bind(stat.waiting_days)
        .bind(&stat.travel_purpose)
        .bind(stat.planned_travel_date)
        .bind(stat.additional_doc_request)
        .bind(stat.tickets_purchased)
        .bind(stat.hotels_purchased)
        .bind(&stat.employment_certificate)
        .bind(stat.financial_guarantee)
        .bind(&stat.comments)
        .bind(&stat.visa_center)
        .bind(&stat.visa_status)
        .bind(stat.visa_issued_for_days)
        .bind(stat.corridor_days)
        .bind(&stat.past_visas_trips)
        .bind(&stat.consul)
        .bind(&stat.planned_stay_in_country)
}
