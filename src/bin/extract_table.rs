//! CLI tool for extracting a financial table from OCR text

use statement_extractor::{extract_table_from_reader, ExtractOptions};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <ocr_text.txt> [output.csv]", args[0]);
        eprintln!("       {} <ocr_text.txt> [output.csv] --json", args[0]);
        process::exit(1);
    }

    let text_path = &args[1];
    let output_path = args.get(2).filter(|a| !a.starts_with("--"));
    let json_output = args.iter().skip(2).any(|a| a == "--json");

    let file = match File::open(text_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening {}: {}", text_path, e);
            process::exit(1);
        }
    };

    let result = match extract_table_from_reader(BufReader::new(file), &ExtractOptions::default())
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading {}: {}", text_path, e);
            process::exit(1);
        }
    };

    // In --json mode stdout carries the summary line only; CSV goes to a
    // file or nowhere
    let write_result = match output_path {
        Some(path) => result.table.write_csv_file(path),
        None if json_output => Ok(()),
        None => result.table.write_csv(io::stdout().lock()),
    };
    if let Err(e) = write_result {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }

    if json_output {
        println!(
            r#"{{"date_columns":{},"fields":{},"fields_matched":{},"header_line":{},"processing_time_ms":{}}}"#,
            result.table.date_count(),
            result.table.field_count(),
            result.fields_matched,
            result
                .header_line
                .map(|i| i.to_string())
                .unwrap_or_else(|| "null".to_string()),
            result.processing_time_ms
        );
    } else if let Some(path) = output_path {
        eprintln!(
            "Extracted {} date column(s), {}/{} field(s) with values -> {}",
            result.table.date_count(),
            result.fields_matched,
            result.table.field_count(),
            path
        );
    }
}
