//! Shared utility functions for TDP calculator crates.

/// Date utility functions
pub mod dates {
    use chrono::{Local, NaiveDate};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Today's date in the local timezone
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Build a date-stamped file name, e.g. `tdp_report_2024-06-15.csv`
    pub fn date_stamped_filename(stem: &str, date: &NaiveDate, extension: &str) -> String {
        format!("{}_{}.{}", stem, format_date(date), extension)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_compact_format() {
            assert!(parse_date("20230615").is_err());
        }

        #[test]
        fn test_date_stamped_filename() {
            let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
            assert_eq!(
                date_stamped_filename("tdp_report", &date, "csv"),
                "tdp_report_2024-01-05.csv"
            );
        }
    }
}

/// Number formatting
pub mod numbers {
    /// Format with a fixed number of decimal places.
    /// Negative zero is written as zero.
    pub fn format_fixed(value: f64, places: usize) -> String {
        let formatted = format!("{:.*}", places, value);
        if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
            formatted[1..].to_string()
        } else {
            formatted
        }
    }

    /// Format with thousands separators and a fixed number of decimal places,
    /// e.g. `1234567.891` with 2 places becomes `1,234,567.89`.
    pub fn format_grouped(value: f64, places: usize) -> String {
        let fixed = format_fixed(value, places);
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", fixed.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };
        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        match frac_part {
            Some(f) => format!("{}{}.{}", sign, grouped, f),
            None => format!("{}{}", sign, grouped),
        }
    }

}
