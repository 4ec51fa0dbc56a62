/// Format a zork amount with thousands separators, e.g. `-1,250 zorks`
pub fn format_zorks(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    let unit = if amount.unsigned_abs() == 1 { "zork" } else { "zorks" };
    format!("{}{} {}", sign, grouped, unit)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        // Try to parse YYYY-MM-DD format
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zorks() {
        assert_eq!(format_zorks(0), "0 zorks");
        assert_eq!(format_zorks(1), "1 zork");
        assert_eq!(format_zorks(999), "999 zorks");
        assert_eq!(format_zorks(1200), "1,200 zorks");
        assert_eq!(format_zorks(1234567), "1,234,567 zorks");
        assert_eq!(format_zorks(-1250), "-1,250 zorks");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2021-09-14T10:30:00Z"), "Sep 14, 2021");
        assert_eq!(format_date("2021-09-14 10:30"), "2021-09-14");
        assert_eq!(format_date("soon"), "soon");
    }
}
