//! Text helpers shared by the console actions.

use serde_json::Value;

/// `=====` rule of the given width.
pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Formats a number with thousands separators, e.g. `1234567.891` -> `1,234,567.89`.
pub fn grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `$1,234.56`, or `N/A` when the value is missing.
pub fn dollars(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("${}", grouped(v, decimals)),
        None => "N/A".to_string(),
    }
}

/// `+1.25%`, or `N/A` when the value is missing.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v),
        None => "N/A".to_string(),
    }
}

/// "new york" -> "New York"
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Renders a JSON field for display: strings without quotes, missing fields as `N/A`.
pub fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}

/// First `max_chars` characters of the compact JSON rendering.
pub fn preview(value: &Value, max_chars: usize) -> String {
    value.to_string().chars().take(max_chars).collect()
}

/// Keeps file names inside the output directory: anything but letters, digits, `-`, `_`
/// and `.` becomes `_`.
pub fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(0.0, 2), "0.00");
        assert_eq!(grouped(999.999, 2), "1,000.00");
        assert_eq!(grouped(43250.123, 2), "43,250.12");
        assert_eq!(grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(grouped(850000000000.4, 0), "850,000,000,000");
        assert_eq!(grouped(-1234.5, 1), "-1,234.5");
        assert_eq!(grouped(-0.001, 2), "0.00");
    }

    #[test]
    fn test_dollars_and_percent() {
        assert_eq!(dollars(Some(1500.0), 2), "$1,500.00");
        assert_eq!(dollars(None, 2), "N/A");
        assert_eq!(percent(Some(1.234)), "+1.23%");
        assert_eq!(percent(Some(-0.5)), "-0.50%");
        assert_eq!(percent(None), "N/A");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("  rio de  JANEIRO "), "Rio De Janeiro");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_field() {
        let post = json!({"id": 101, "title": "Hello", "body": null});
        assert_eq!(field(&post, "id"), "101");
        assert_eq!(field(&post, "title"), "Hello");
        assert_eq!(field(&post, "body"), "N/A");
        assert_eq!(field(&post, "missing"), "N/A");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let value = json!({"text": "ééééé"});
        assert_eq!(preview(&value, 10), "{\"text\":\"é");
        assert_eq!(preview(&json!([1, 2]), 60), "[1,2]");
    }

    #[test]
    fn test_safe_file_name() {
        assert_eq!(safe_file_name("bitcoin_data.json"), "bitcoin_data.json");
        assert_eq!(safe_file_name("new york_weather.json"), "new_york_weather.json");
        assert_eq!(safe_file_name("../../etc/passwd"), "_.._etc_passwd");
    }
}
