// Display formatting for numbers, money and dates (en-US conventions)
use chrono::NaiveDateTime;

/// `1234.5` -> `$1,234.50`
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Fraction to percent: `0.1234` -> `12.34%`
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Thousands separators with at most two fraction digits, trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    #[default]
    Short,
    Long,
    Time,
    Full,
}

pub fn format_date(date: &NaiveDateTime, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Short => "%-m/%-d/%Y",
        DateStyle::Long => "%A, %B %-d, %Y",
        DateStyle::Time => "%-I:%M:%S %p",
        DateStyle::Full => "%a %b %d %Y %H:%M:%S",
    };
    date.format(pattern).to_string()
}
