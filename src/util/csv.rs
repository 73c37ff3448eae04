// Naive CSV text parsing: split on newlines and commas, no quoting rules
use std::collections::HashMap;

pub type CsvRecord = HashMap<String, String>;

/// First line is the header row. Blank lines are skipped, every field is
/// trimmed, and rows shorter than the header are padded with empty strings.
pub fn parse_csv(text: &str) -> Vec<CsvRecord> {
    let mut lines = text.split('\n');
    let headers: Vec<String> = match lines.next() {
        Some(line) => line.split(',').map(|h| h.trim().to_string()).collect(),
        None => return Vec::new(),
    };

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let field = fields.get(i).map(|f| f.trim()).unwrap_or_default();
                    (header.clone(), field.to_string())
                })
                .collect()
        })
        .collect()
}
