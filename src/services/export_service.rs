use crate::error::Result;
use crate::models::visa_stat::{VisaStat, CSV_FIELDS};
use rust_xlsxwriter::*;

pub struct ExportService;

impl ExportService {
    /// Generate a styled single-sheet XLSX workbook from the full
    /// record set.
    pub fn generate_stats_xlsx(stats: &[VisaStat]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Visa Stats")?;

        let header_bg = Color::RGB(0x0F172A); // Slate 900
        let header_text = Color::White;
        let alt_row = Color::RGB(0xF8FAFC); // Slate 50
        let border_color = Color::RGB(0xE2E8F0); // Slate 200
        let status_issued = Color::RGB(0x10B981); // Emerald
        let status_refused = Color::RGB(0xEF4444); // Red

        // "id" first, then the flat-format schema.
        worksheet.set_column_width(0, 8.0)?;
        let widths = [
            18.0, 16.0, 16.0, 12.0, 24.0, 16.0, 12.0, 12.0, 12.0, 24.0, 14.0, 40.0, 14.0, 10.0,
            12.0, 12.0, 30.0, 18.0, 24.0,
        ];
        for (i, width) in widths.iter().enumerate() {
            worksheet.set_column_width((i + 1) as u16, *width)?;
        }

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        worksheet.set_row_height(0, 28)?;
        worksheet.write_string_with_format(0, 0, "id", &header_format)?;
        for (i, name) in CSV_FIELDS.iter().enumerate() {
            worksheet.write_string_with_format(0, (i + 1) as u16, *name, &header_format)?;
        }

        for (idx, stat) in stats.iter().enumerate() {
            let row = 1 + idx as u32;
            let bg = if idx % 2 == 0 { alt_row } else { Color::White };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let wrap_fmt = base_fmt.clone().set_text_wrap();

            worksheet.write_number_with_format(row, 0, stat.id as f64, &center_fmt)?;
            worksheet.write_string_with_format(row, 1, &stat.city, &base_fmt)?;
            worksheet.write_string_with_format(
                row,
                2,
                &stat.visa_application_date.to_string(),
                &center_fmt,
            )?;
            let issue = stat
                .visa_issue_date
                .map(|d| d.to_string())
                .unwrap_or_default();
            worksheet.write_string_with_format(row, 3, &issue, &center_fmt)?;
            worksheet.write_number_with_format(row, 4, stat.waiting_days as f64, &center_fmt)?;
            worksheet.write_string_with_format(row, 5, &stat.travel_purpose, &base_fmt)?;
            let planned = stat
                .planned_travel_date
                .map(|d| d.to_string())
                .unwrap_or_default();
            worksheet.write_string_with_format(row, 6, &planned, &center_fmt)?;
            worksheet.write_boolean_with_format(
                row,
                7,
                stat.additional_doc_request,
                &center_fmt,
            )?;
            worksheet.write_boolean_with_format(row, 8, stat.tickets_purchased, &center_fmt)?;
            worksheet.write_boolean_with_format(row, 9, stat.hotels_purchased, &center_fmt)?;
            worksheet.write_string_with_format(
                row,
                10,
                &stat.employment_certificate,
                &base_fmt,
            )?;
            match stat.financial_guarantee {
                Some(amount) => {
                    worksheet.write_number_with_format(row, 11, amount, &center_fmt)?;
                }
                None => {
                    worksheet.write_string_with_format(row, 11, "", &center_fmt)?;
                }
            }
            worksheet.write_string_with_format(row, 12, &stat.comments, &wrap_fmt)?;
            worksheet.write_string_with_format(row, 13, &stat.visa_center, &center_fmt)?;

            let (status_label, status_color) = match stat.visa_status.as_str() {
                "1" => ("issued", status_issued),
                "0" => ("refused", status_refused),
                other => (other, Color::RGB(0x64748B)),
            };
            let status_fmt = Format::new()
                .set_font_size(10)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(status_color)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            worksheet.write_string_with_format(row, 14, status_label, &status_fmt)?;

            write_opt_number(worksheet, row, 15, stat.visa_issued_for_days, &center_fmt)?;
            write_opt_number(worksheet, row, 16, stat.corridor_days, &center_fmt)?;
            worksheet.write_string_with_format(row, 17, &stat.past_visas_trips, &wrap_fmt)?;
            worksheet.write_string_with_format(row, 18, &stat.consul, &base_fmt)?;
            worksheet.write_string_with_format(
                row,
                19,
                &stat.planned_stay_in_country,
                &base_fmt,
            )?;
        }

        worksheet.set_freeze_panes(1, 0)?;
        if !stats.is_empty() {
            worksheet.autofilter(0, 0, stats.len() as u32, CSV_FIELDS.len() as u16)?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

fn write_opt_number(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<i64>,
    format: &Format,
) -> Result<()> {
    match value {
        Some(v) => {
            worksheet.write_number_with_format(row, col, v as f64, format)?;
        }
        None => {
            worksheet.write_string_with_format(row, col, "", format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn generates_a_workbook_even_for_an_empty_store() {
        let buffer = ExportService::generate_stats_xlsx(&[]).expect("workbook");
        // XLSX files are zip archives.
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn generates_a_workbook_with_rows() {
        let stat = VisaStat {
            id: 1,
            city: "Москва".to_string(),
            visa_application_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            visa_issue_date: NaiveDate::from_ymd_opt(2024, 1, 11),
            waiting_days: 10,
            travel_purpose: "туризм".to_string(),
            planned_travel_date: None,
            additional_doc_request: false,
            tickets_purchased: false,
            hotels_purchased: false,
            employment_certificate: String::new(),
            financial_guarantee: Some(2000.0),
            comments: String::new(),
            visa_center: "VMS".to_string(),
            visa_status: "0".to_string(),
            visa_issued_for_days: None,
            corridor_days: None,
            past_visas_trips: String::new(),
            consul: String::new(),
            planned_stay_in_country: String::new(),
        };
        let buffer = ExportService::generate_stats_xlsx(&[stat]).expect("workbook");
        assert!(!buffer.is_empty());
    }
}
