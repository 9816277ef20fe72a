//! Debug tool: show per-line date-token counts and the winning header line

use statement_extractor::detector::detect_date_header;
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <ocr_text.txt>", args[0]);
        process::exit(1);
    }

    let text = match fs::read_to_string(&args[1]) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
    let result = detect_date_header(&lines);

    for (idx, line) in lines.iter().enumerate() {
        let marker = if result.line_index == Some(idx) {
            " <== header"
        } else {
            ""
        };
        let preview: String = line.chars().take(60).collect();
        println!("{:4}: {}{}", idx, preview, marker);
    }

    println!();
    match result.line_index {
        Some(idx) => {
            println!(
                "Header line {}: {} token(s), {} distinct column(s)",
                idx,
                result.match_count,
                result.labels.len()
            );
            for (col, label) in result.labels.iter().enumerate() {
                println!("  column {}: {}", col, label);
            }
        }
        None => println!("No date tokens found in {} line(s)", lines.len()),
    }
}
