//! Structured table extraction from OCR'd financial statements
//!
//! This crate provides:
//! - Detection of the reporting-date header line in unstructured OCR text
//! - Positional alignment of each line item's numeric values to those dates
//! - Assembly and CSV serialization of the resulting table
//!
//! OCR output is unreliable (merged columns, inconsistent spacing, partial
//! line loss), so extraction works purely on positional and lexical
//! heuristics and degrades to absent cells instead of failing: the table
//! artifact is always produced, possibly with missing values.

pub mod aligner;
pub mod detector;
pub mod registry;
pub mod table;

pub use aligner::{align_field, align_fields, scan_numeric_tokens, FieldRow, NumericToken};
pub use detector::{detect_date_columns, detect_date_header, DateHeaderResult};
pub use registry::{FieldRegistry, FieldSpec, MatchMode};
pub use table::FinancialTable;

use std::io::BufRead;

/// Configuration for one extraction run
///
/// Replaces any ambient state: the line source arrives as an argument, the
/// output sink is whatever the caller serializes to, and the schema lives
/// here.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Output schema; defaults to the 15 balance-sheet line items
    pub registry: FieldRegistry,
}

/// High-level extraction result with run diagnostics
#[derive(Debug)]
pub struct ExtractResult {
    /// The assembled table
    pub table: FinancialTable,
    /// Line index of the winning date header, if one was found
    pub header_line: Option<usize>,
    /// Count of fields for which at least one value was extracted
    pub fields_matched: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Run the full pipeline on in-memory lines: date detection, then field
/// alignment, then assembly.
///
/// Pure function of its inputs and infallible: malformed text narrows the
/// output, it never raises.
pub fn extract_table(lines: &[String], options: &ExtractOptions) -> FinancialTable {
    let header = detector::detect_date_header(lines);
    let rows = aligner::align_fields(lines, &options.registry, header.labels.len());
    FinancialTable::assemble(header.labels, rows)
}

/// Run extraction over a reader supplying OCR text, with diagnostics
pub fn extract_table_from_reader<R: BufRead>(
    reader: R,
    options: &ExtractOptions,
) -> Result<ExtractResult, ExtractError> {
    let start = std::time::Instant::now();

    let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;

    let header = detector::detect_date_header(&lines);
    let header_line = header.line_index;
    let rows = aligner::align_fields(&lines, &options.registry, header.labels.len());
    let table = FinancialTable::assemble(header.labels, rows);

    Ok(ExtractResult {
        fields_matched: table.fields_with_values(),
        header_line,
        table,
        processing_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Errors at the I/O boundary. The extraction algorithms themselves never
/// fail; only reading input or writing the artifact can.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
