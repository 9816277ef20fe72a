//! Reporting-date header detection
//!
//! OCR output from a scanned financial statement has no structure beyond
//! "lines of text". The header row of the statement is the line carrying
//! the reporting-period dates, so this module finds the line with the most
//! date-shaped tokens and treats its dates as the table's columns.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one-or-two-digit month and day with a four-digit year, e.g.
/// "12/31/2024". No calendar validation: OCR noise like "13/45/2024" still
/// matches, and downstream treats the label as an opaque column key.
static DATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}/\d{1,2}/\d{4}").unwrap());

/// Result of scanning the input for a date header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateHeaderResult {
    /// De-duplicated date labels in first-occurrence order. Column index is
    /// purely positional; labels are never reordered chronologically.
    pub labels: Vec<String>,
    /// 0-based index of the winning line, or `None` if no line had any
    /// date token
    pub line_index: Option<usize>,
    /// Raw date-token match count on the winning line (before
    /// de-duplication)
    pub match_count: usize,
}

/// Scan all lines and pick the one most likely to be the report header.
///
/// The line with the strictly greatest date-token count wins; ties are
/// broken in favor of the earliest line. A line with zero matches cannot
/// win, so inputs without any date token yield an empty label list.
pub fn detect_date_header(lines: &[String]) -> DateHeaderResult {
    let mut best: Option<(usize, Vec<&str>)> = None;

    for (idx, line) in lines.iter().enumerate() {
        let matches: Vec<&str> = DATE_TOKEN_RE.find_iter(line).map(|m| m.as_str()).collect();
        if matches.is_empty() {
            continue;
        }

        let beats_current = match &best {
            Some((_, current)) => matches.len() > current.len(),
            None => true,
        };
        if beats_current {
            best = Some((idx, matches));
        }
    }

    match best {
        Some((line_index, matches)) => {
            let match_count = matches.len();
            let labels = dedup_first_occurrence(&matches);
            log::debug!(
                "date header: line {} with {} token(s), {} distinct column(s)",
                line_index,
                match_count,
                labels.len()
            );
            DateHeaderResult {
                labels,
                line_index: Some(line_index),
                match_count,
            }
        }
        None => {
            log::debug!(
                "date header: no date tokens found in {} line(s)",
                lines.len()
            );
            DateHeaderResult {
                labels: Vec::new(),
                line_index: None,
                match_count: 0,
            }
        }
    }
}

/// Convenience wrapper returning only the ordered column labels
pub fn detect_date_columns(lines: &[String]) -> Vec<String> {
    detect_date_header(lines).labels
}

/// De-duplicate tokens preserving the position of each first occurrence.
/// An OCR'd header that repeats a date still yields one column per
/// distinct label.
fn dedup_first_occurrence(tokens: &[&str]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(tokens.len());
    for &token in tokens {
        if !labels.iter().any(|l| l == token) {
            labels.push(token.to_string());
        }
    }
    labels
}
