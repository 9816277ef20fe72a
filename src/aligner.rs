//! Field value alignment
//!
//! For each registered line item, find the line mentioning it, pull out the
//! numeric tokens, and assign them to date columns by shared ordinal
//! position. OCR output loses the visual column grid, so position in the
//! token list is the only alignment signal available.
//!
//! Nothing in this module fails: a field that cannot be located, or a
//! value that cannot be parsed, degrades to an absent cell rather than an
//! error. One field's bad line never affects another field's row.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::registry::{FieldRegistry, FieldSpec};

/// Optionally-signed digit groups with comma thousands separators, e.g.
/// "624,894,000" or "-1,234" or "9". Decimals are deliberately excluded:
/// an OCR'd decimal point truncates the token at the point.
static NUMERIC_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d{1,3}(?:,\d{3})*").unwrap());

/// Outcome of parsing one numeric-shaped token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericToken {
    Parsed(i64),
    /// Token matched the numeric pattern but failed integer conversion.
    /// Dropped from the value list, never promoted to an absent cell.
    Skipped,
}

/// One output row: a field name and one optional value per date column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub name: String,
    /// `None` marks "no value extracted", distinct from a true zero
    pub values: Vec<Option<i64>>,
}

/// Extract every numeric-shaped token from a line, tagging parse failures
pub fn scan_numeric_tokens(line: &str) -> Vec<NumericToken> {
    NUMERIC_TOKEN_RE
        .find_iter(line)
        .map(|m| {
            let cleaned = m.as_str().replace(',', "");
            match cleaned.parse::<i64>() {
                Ok(value) => NumericToken::Parsed(value),
                Err(_) => {
                    log::warn!("skipping unparsable numeric token {:?}", m.as_str());
                    NumericToken::Skipped
                }
            }
        })
        .collect()
}

/// Align one field's values to `column_count` date columns.
///
/// The first line mentioning the field wins; later mentions are ignored
/// even if they carry more numbers. Values fill columns left to right,
/// surplus values are discarded, and short lines leave trailing columns
/// absent.
pub fn align_field(lines: &[String], spec: &FieldSpec, column_count: usize) -> Vec<Option<i64>> {
    let mut values: Vec<Option<i64>> = Vec::with_capacity(column_count);

    if let Some((idx, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, line)| spec.matches_line(line))
    {
        log::debug!("field {:?}: matched line {}", spec.name, idx);
        let parsed = scan_numeric_tokens(line)
            .into_iter()
            .filter_map(|t| match t {
                NumericToken::Parsed(v) => Some(v),
                NumericToken::Skipped => None,
            });
        values.extend(parsed.take(column_count).map(Some));
    } else {
        log::debug!("field {:?}: no matching line", spec.name);
    }

    values.resize(column_count, None);
    values
}

/// Produce one row per registry entry, in registry order. Fields are
/// aligned independently; date detection must already be final because
/// the column count fixes every row's width.
pub fn align_fields(
    lines: &[String],
    registry: &FieldRegistry,
    column_count: usize,
) -> Vec<FieldRow> {
    registry
        .iter()
        .map(|spec| FieldRow {
            name: spec.name.clone(),
            values: align_field(lines, spec, column_count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldSpec;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scan_plain_and_separated_numbers() {
        let tokens = scan_numeric_tokens("Total Assets 1,234 5,678 9");
        assert_eq!(
            tokens,
            vec![
                NumericToken::Parsed(1234),
                NumericToken::Parsed(5678),
                NumericToken::Parsed(9),
            ]
        );
    }

    #[test]
    fn test_scan_negative_numbers() {
        let tokens = scan_numeric_tokens("Working Capital -12,196,000 7,434");
        assert_eq!(
            tokens,
            vec![NumericToken::Parsed(-12_196_000), NumericToken::Parsed(7434)]
        );
    }

    #[test]
    fn test_scan_decimal_truncates_at_point() {
        // "1,234.56" yields 1234 then 56: the pattern has no decimal arm
        let tokens = scan_numeric_tokens("Total Debt 1,234.56");
        assert_eq!(
            tokens,
            vec![NumericToken::Parsed(1234), NumericToken::Parsed(56)]
        );
    }

    #[test]
    fn test_scan_overflowing_token_is_skipped() {
        // Well past i64 range once commas are stripped, so the token is
        // tagged rather than parsed
        let tokens = scan_numeric_tokens("99,999,999,999,999,999,999 1,234");
        assert_eq!(
            tokens,
            vec![NumericToken::Skipped, NumericToken::Parsed(1234)]
        );
    }

    #[test]
    fn test_scan_empty_line() {
        assert!(scan_numeric_tokens("").is_empty());
        assert!(scan_numeric_tokens("no numbers here").is_empty());
    }

    #[test]
    fn test_align_exact_fit() {
        let input = lines(&["Total Assets 1,234 5,678 9"]);
        let spec = FieldSpec::substring("Total Assets");
        assert_eq!(
            align_field(&input, &spec, 3),
            vec![Some(1234), Some(5678), Some(9)]
        );
    }

    #[test]
    fn test_align_short_line_pads_with_absent() {
        let input = lines(&["Total Assets 1,234"]);
        let spec = FieldSpec::substring("Total Assets");
        assert_eq!(align_field(&input, &spec, 3), vec![Some(1234), None, None]);
    }

    #[test]
    fn test_align_surplus_values_discarded() {
        let input = lines(&["Total Assets 1 2 3 4 5"]);
        let spec = FieldSpec::substring("Total Assets");
        assert_eq!(
            align_field(&input, &spec, 3),
            vec![Some(1), Some(2), Some(3)]
        );
    }

    #[test]
    fn test_align_skipped_token_dropped_not_absent() {
        // The overflowing token disappears from the value list entirely:
        // the next value shifts left into its column instead of the slot
        // going absent, and the run does not abort
        let input = lines(&["Total Assets 99,999,999,999,999,999,999 1,234"]);
        let spec = FieldSpec::substring("Total Assets");
        assert_eq!(align_field(&input, &spec, 2), vec![Some(1234), None]);
    }

    #[test]
    fn test_align_missing_field_all_absent() {
        let input = lines(&["Total Liabilities 1,234"]);
        let spec = FieldSpec::substring("Total Assets");
        assert_eq!(align_field(&input, &spec, 3), vec![None, None, None]);
    }

    #[test]
    fn test_align_zero_columns_yields_empty_row() {
        let input = lines(&["Total Assets 1,234"]);
        let spec = FieldSpec::substring("Total Assets");
        assert_eq!(align_field(&input, &spec, 0), Vec::<Option<i64>>::new());
    }

    #[test]
    fn test_first_matching_line_wins() {
        let input = lines(&[
            "Total Assets 1,234",
            "Total Assets 9,999 8,888 7,777",
        ]);
        let spec = FieldSpec::substring("Total Assets");
        assert_eq!(align_field(&input, &spec, 3), vec![Some(1234), None, None]);
    }

    #[test]
    fn test_zero_value_distinct_from_absent() {
        let input = lines(&["Net Debt 0 0"]);
        let spec = FieldSpec::substring("Net Debt");
        assert_eq!(align_field(&input, &spec, 3), vec![Some(0), Some(0), None]);
    }

    #[test]
    fn test_fields_aligned_independently() {
        let input = lines(&["Total Assets 1 2 3"]);
        let registry = crate::registry::FieldRegistry::new(vec![
            FieldSpec::substring("Total Assets"),
            FieldSpec::substring("Total Equity"),
        ]);

        let rows = align_fields(&input, &registry, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].values, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(rows[1].values, vec![None, None, None]);
    }

    #[test]
    fn test_rows_are_rectangular() {
        let input = lines(&["Total Assets 1", "Total Equity 1 2 3 4 5 6"]);
        let registry = crate::registry::FieldRegistry::new(vec![
            FieldSpec::substring("Total Assets"),
            FieldSpec::substring("Total Equity"),
        ]);

        let rows = align_fields(&input, &registry, 4);
        for row in &rows {
            assert_eq!(row.values.len(), 4);
        }
    }
}
