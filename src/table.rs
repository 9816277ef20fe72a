//! Table assembly and serialization
//!
//! Combines the detected date columns and the aligned field rows into one
//! rectangular table, and writes it out as CSV. In memory, fields are rows
//! and dates are columns; the serialized artifact transposes that — one
//! CSV record per date, one CSV column per field — because that is the
//! schema downstream consumers read.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::aligner::FieldRow;
use crate::ExtractError;

/// The extracted statement: date columns plus one row per registered field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancialTable {
    dates: Vec<String>,
    rows: Vec<FieldRow>,
}

impl FinancialTable {
    /// Build a table, normalizing every row to the date-column count so
    /// the rectangular invariant holds regardless of input
    pub fn assemble(dates: Vec<String>, mut rows: Vec<FieldRow>) -> Self {
        let width = dates.len();
        for row in &mut rows {
            row.values.resize(width, None);
        }
        Self { dates, rows }
    }

    /// Date labels, in header (positional) order
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Field rows, in registry order
    pub fn rows(&self) -> &[FieldRow] {
        &self.rows
    }

    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    pub fn field_count(&self) -> usize {
        self.rows.len()
    }

    /// True when no date columns were detected (the serialized artifact is
    /// then a header row only)
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Row for a field name, if registered
    pub fn row(&self, name: &str) -> Option<&FieldRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// One cell: `None` if the field is unknown, the date index is out of
    /// range, or no value was extracted
    pub fn cell(&self, name: &str, date_idx: usize) -> Option<i64> {
        self.row(name)
            .and_then(|r| r.values.get(date_idx))
            .copied()
            .flatten()
    }

    /// Count of fields with at least one extracted value
    pub fn fields_with_values(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.values.iter().any(Option::is_some))
            .count()
    }

    /// Serialize as CSV: header `Date,<field>,...`, one record per date.
    /// Absent cells become empty strings, never "None" or "0".
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExtractError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.rows.len() + 1);
        header.push("Date");
        header.extend(self.rows.iter().map(|r| r.name.as_str()));
        csv_writer.write_record(&header)?;

        for (date_idx, date) in self.dates.iter().enumerate() {
            let mut record = Vec::with_capacity(self.rows.len() + 1);
            record.push(date.clone());
            for row in &self.rows {
                record.push(match row.values[date_idx] {
                    Some(value) => value.to_string(),
                    None => String::new(),
                });
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Serialize to a file path
    pub fn write_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ExtractError> {
        let file = File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }

    /// Serialize to an in-memory CSV string
    pub fn to_csv_string(&self) -> Result<String, ExtractError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        // csv output of UTF-8 records is UTF-8
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
