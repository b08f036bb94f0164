// ============================================================
// COLUMN ANALYZER
// ============================================================
// Infer per-column types from raw cell text

use crate::domain::table::{CellValue, Column, ColumnType};

/// Infers a column type from its cells and converts them.
///
/// A column is integer if every non-empty cell parses as `i64`, float if every
/// non-empty cell parses as a finite `f64`, otherwise text. Empty cells are null.
pub struct ColumnAnalyzer;

impl ColumnAnalyzer {
    pub fn infer_type<S: AsRef<str>>(values: &[S]) -> ColumnType {
        let non_empty: Vec<&str> = values
            .iter()
            .map(|v| AsRef::<str>::as_ref(v))
            .filter(|v| !v.is_empty())
            .collect();
        if non_empty.is_empty() {
            return ColumnType::Text;
        }

        let mut all_integer = true;
        for value in non_empty {
            if all_integer && parse_integer(value).is_some() {
                continue;
            }
            all_integer = false;
            if parse_float(value).is_none() {
                return ColumnType::Text;
            }
        }

        if all_integer {
            ColumnType::Integer
        } else {
            ColumnType::Float
        }
    }

    /// Build a typed column from raw cell text
    pub fn build_column(name: String, values: Vec<String>) -> Column {
        let kind = Self::infer_type(&values);
        let cells = values
            .into_iter()
            .map(|value| Self::convert_cell(value, kind))
            .collect();
        Column::new(name, kind, cells)
    }

    fn convert_cell(value: String, kind: ColumnType) -> CellValue {
        if value.is_empty() {
            return CellValue::Null;
        }
        match kind {
            ColumnType::Integer => parse_integer(&value)
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Text(value)),
            ColumnType::Float => parse_float(&value)
                .map(CellValue::Float)
                .unwrap_or(CellValue::Text(value)),
            ColumnType::Text | ColumnType::DateTime => CellValue::Text(value),
        }
    }
}

fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

fn parse_float(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
