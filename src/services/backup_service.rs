use crate::error::{Error, Result};
use crate::models::visa_stat::{NewVisaStat, VisaStat, CSV_FIELDS};
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::{Read, Write};

/// Semicolon-delimited flat-file adapter, shared by the operator
/// binaries. The whole file is parsed before anything is returned, so
/// the importer can only ever replace the table with a fully valid set.
pub struct BackupService;

impl BackupService {
    pub fn read_csv<R: Read>(reader: R) -> Result<Vec<NewVisaStat>> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(reader);

        let mut stats = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            // Header is line 1.
            let line = idx + 2;
            stats.push(parse_record(&record, line)?);
        }
        Ok(stats)
    }

    pub fn write_csv<W: Write>(writer: W, stats: &[VisaStat]) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(writer);

        wtr.write_record(CSV_FIELDS)?;
        for stat in stats {
            wtr.write_record(csv_record(stat))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn csv_record(stat: &VisaStat) -> [String; 19] {
    [
        stat.city.clone(),
        stat.visa_application_date.to_string(),
        opt_date(stat.visa_issue_date),
        stat.waiting_days.to_string(),
        stat.travel_purpose.clone(),
        opt_date(stat.planned_travel_date),
        stat.additional_doc_request.to_string(),
        stat.tickets_purchased.to_string(),
        stat.hotels_purchased.to_string(),
        stat.employment_certificate.clone(),
        stat.financial_guarantee
            .map(|v| v.to_string())
            .unwrap_or_default(),
        stat.comments.clone(),
        stat.visa_center.clone(),
        stat.visa_status.clone(),
        stat.visa_issued_for_days
            .map(|v| v.to_string())
            .unwrap_or_default(),
        stat.corridor_days.map(|v| v.to_string()).unwrap_or_default(),
        stat.past_visas_trips.clone(),
        stat.consul.clone(),
        stat.planned_stay_in_country.clone(),
    ]
}

fn opt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Columns are read positionally in `CSV_FIELDS` order; in particular
/// the first column is always `city`, even when a BOM corrupts the
/// header cell (legacy exports carry one).
fn parse_record(record: &StringRecord, line: usize) -> Result<NewVisaStat> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    Ok(NewVisaStat {
        city: field(0).to_string(),
        visa_application_date: required_date(field(1), "visa_application_date", line)?,
        visa_issue_date: optional_date(field(2), "visa_issue_date", line)?,
        waiting_days: required_i64(field(3), "waiting_days", line)?,
        travel_purpose: field(4).to_string(),
        planned_travel_date: optional_date(field(5), "planned_travel_date", line)?,
        additional_doc_request: parse_bool(field(6)),
        tickets_purchased: parse_bool(field(7)),
        hotels_purchased: parse_bool(field(8)),
        employment_certificate: field(9).to_string(),
        financial_guarantee: optional_f64(field(10), "financial_guarantee", line)?,
        comments: field(11).to_string(),
        visa_center: field(12).to_string(),
        visa_status: field(13).to_string(),
        visa_issued_for_days: optional_i64(field(14), "visa_issued_for_days", line)?,
        corridor_days: optional_i64(field(15), "corridor_days", line)?,
        past_visas_trips: field(16).to_string(),
        consul: field(17).to_string(),
        planned_stay_in_country: field(18).to_string(),
    })
}

/// Boolean fields match the literal text "true", case-insensitively.
fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

fn required_date(raw: &str, name: &str, line: usize) -> Result<NaiveDate> {
    parse_date(raw)
        .ok_or_else(|| Error::Parse(format!("line {}: invalid {}: {:?}", line, name, raw)))
}

fn optional_date(raw: &str, name: &str, line: usize) -> Result<Option<NaiveDate>> {
    if raw.is_empty() {
        return Ok(None);
    }
    required_date(raw, name, line).map(Some)
}

fn required_i64(raw: &str, name: &str, line: usize) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::Parse(format!("line {}: invalid {}: {:?}", line, name, raw)))
}

/// Empty or absent numeric cells load as NULL, not as an error.
fn optional_i64(raw: &str, name: &str, line: usize) -> Result<Option<i64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    required_i64(raw, name, line).map(Some)
}

fn optional_f64(raw: &str, name: &str, line: usize) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| Error::Parse(format!("line {}: invalid {}: {:?}", line, name, raw)))
}
