use chrono::NaiveDate;

/// The single date-parse edge. ISO 8601 is the canonical wire format;
/// legacy flat files and the old form submit path carry `DD.MM.YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d.%m.%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2024-01-11"),
            NaiveDate::from_ymd_opt(2024, 1, 11)
        );
    }

    #[test]
    fn parses_legacy_dotted_dates() {
        assert_eq!(
            parse_date("11.01.2024"),
            NaiveDate::from_ymd_opt(2024, 1, 11)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
    }
}
