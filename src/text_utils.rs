use chrono::NaiveDate;

/// Date formats accepted in front matter. Time-of-day is tolerated but
/// discarded, the site only orders and displays calendar dates.
const DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

pub fn parse_date(buf: &str) -> Result<NaiveDate, String> {
    let buf = buf.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(buf, fmt) {
            return Ok(date);
        }
        if let Ok(date_time) = chrono::NaiveDateTime::parse_from_str(buf, fmt) {
            return Ok(date_time.date());
        }
    }
    Err(format!("Unable to parse date {}", buf))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Long form used on post pages, e.g. "January 15, 2024".
pub fn format_display_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
