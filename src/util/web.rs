// Small helpers that stood in for browser built-ins
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `_` followed by nine random base-36 characters.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("_{}", suffix)
}

pub fn validate_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
        .is_match(email)
}

/// `value` as a percentage of `total`; `None` when `total` is zero.
pub fn calculate_percentage(value: f64, total: f64) -> Option<f64> {
    if total == 0.0 {
        None
    } else {
        Some(value / total * 100.0)
    }
}

/// Look up `param` in a raw query string (with or without the leading `?`).
pub fn get_query_param(query: &str, param: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key) == param).then(|| decode(value))
        })
        .next()
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}
