// ============================================================
// CSV PARSER
// ============================================================
// Parse decoded delimited text into headers and records, then a typed table

use csv::ReaderBuilder;
use std::collections::HashSet;
use tracing::debug;

use super::ColumnAnalyzer;
use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// CSV parser over already-decoded text
pub struct CsvParser {
    /// Delimiter character (default: comma). Cells are never trimmed.
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Header row and records as text, before names are finalised and types inferred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCsv {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Split content into header and records.
    ///
    /// Fails on unterminated quotes and on ragged rows. When every record has
    /// exactly one field more than the header, the first field is a row label
    /// and is dropped.
    pub fn parse_content(&self, content: &str) -> Result<RawCsv> {
        check_quotes_terminated(content, self.delimiter)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() {
            return Err(AppError::ParseError("no columns to parse".to_string()));
        }

        let mut records = Vec::new();
        let mut lines = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);
            lines.push(line);
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let width = headers.len();
        let has_row_labels =
            !records.is_empty() && records.iter().all(|r: &Vec<String>| r.len() == width + 1);

        if has_row_labels {
            debug!(rows = records.len(), "Dropping implicit row label column");
            for record in &mut records {
                record.remove(0);
            }
        } else if let Some((record, line)) = records
            .iter()
            .zip(&lines)
            .find(|(r, _)| r.len() != width)
        {
            return Err(AppError::ParseError(format!(
                "line {}: expected {} fields, found {}",
                line,
                width,
                record.len()
            )));
        }

        Ok(RawCsv { headers, records })
    }

    /// Parse content straight into a typed table
    pub fn parse_table(&self, content: &str) -> Result<Table> {
        self.parse_content(content)?.into_table()
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        let sample_lines: Vec<_> = content.lines().take(10).collect();
        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

impl RawCsv {
    pub fn map_headers<F: Fn(&str) -> String>(self, f: F) -> Self {
        Self {
            headers: self.headers.iter().map(|h| f(h)).collect(),
            records: self.records,
        }
    }

    /// Finalise column names and infer column types
    pub fn into_table(self) -> Result<Table> {
        let names = unique_headers(&self.headers);
        let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(self.records.len()); names.len()];
        for record in self.records {
            for (column, value) in columns.iter_mut().zip(record) {
                column.push(value);
            }
        }

        let columns = names
            .into_iter()
            .zip(columns)
            .map(|(name, values)| ColumnAnalyzer::build_column(name, values))
            .collect();

        Table::new(columns)
    }
}

/// Empty names become `Unnamed: <index>`, repeats get `.1`, `.2`, ...
fn unique_headers(headers: &[String]) -> Vec<String> {
    let named: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if h.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                h.clone()
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(named.len());
    for name in &named {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) || (candidate != *name && named.contains(&candidate)) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        taken.insert(candidate.clone());
        result.push(candidate);
    }
    result
}

/// Reject a quoted field that runs to the end of the input
fn check_quotes_terminated(content: &str, delimiter: u8) -> Result<()> {
    let delimiter = char::from(delimiter);
    let mut at_field_start = true;
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut opened_at = 0usize;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }

        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        if c == '"' && at_field_start {
            in_quotes = true;
            opened_at = line;
            at_field_start = false;
        } else {
            at_field_start = c == delimiter || c == '\n' || c == '\r';
        }
    }

    if in_quotes {
        return Err(AppError::ParseError(format!(
            "unterminated quoted field starting on line {}",
            opened_at
        )));
    }
    Ok(())
}
