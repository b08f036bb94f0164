// ============================================================
// TABLE EDITOR
// ============================================================
// Column selection, renaming and substring filtering

use std::collections::HashSet;

use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{Column, EditStep, Table};

/// Keep the named columns in the requested order.
///
/// An empty selection keeps every column.
pub fn select<S: AsRef<str>>(table: &Table, names: &[S]) -> Result<Table> {
    if names.is_empty() {
        return Ok(table.clone());
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if !seen.insert(name) {
            return Err(AppError::ValidationError(format!(
                "column '{}' selected more than once",
                name
            )));
        }
        columns.push(table.require_column(name)?.clone());
    }

    Table::new(columns)
}

/// Change one column label. Data and column order are preserved.
pub fn rename(table: &Table, old_name: &str, new_name: &str) -> Result<Table> {
    table.require_column(old_name)?;

    if new_name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "new column name must not be empty".to_string(),
        ));
    }
    if old_name == new_name {
        return Ok(table.clone());
    }
    if table.column(new_name).is_some() {
        return Err(AppError::ValidationError(format!(
            "a column named '{}' already exists",
            new_name
        )));
    }

    let columns = table
        .columns()
        .iter()
        .map(|c| {
            if c.name() == old_name {
                c.renamed(new_name)
            } else {
                c.clone()
            }
        })
        .collect();

    Table::new(columns)
}

/// Keep rows whose stringified cell in `column_name` contains `substring`.
///
/// Case-sensitive. Null cells never match. Relative row order is kept.
pub fn filter(table: &Table, column_name: &str, substring: &str) -> Result<Table> {
    let column = table.require_column(column_name)?;

    let keep: Vec<usize> = column
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.is_null() && cell.to_display_string().contains(substring))
        .map(|(idx, _)| idx)
        .collect();

    debug!(
        column = column_name,
        kept = keep.len(),
        total = table.row_count(),
        "Rows filtered"
    );

    let columns: Vec<Column> = table.columns().iter().map(|c| c.take_rows(&keep)).collect();
    Table::new(columns)
}

/// Replay editor steps in order, stopping at the first failure
pub fn apply_edits(table: &Table, steps: &[EditStep]) -> Result<Table> {
    steps.iter().try_fold(table.clone(), |current, step| match step {
        EditStep::Select { columns } => select(&current, columns),
        EditStep::Rename { from, to } => rename(&current, from, to),
        EditStep::Filter { column, value } => filter(&current, column, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{CellValue, ColumnType};

    fn cities() -> Table {
        Table::new(vec![
            Column::new(
                "Stadt",
                ColumnType::Text,
                vec![
                    CellValue::Text("Berlin".into()),
                    CellValue::Text("Hamburg".into()),
                    CellValue::Text("Berlin".into()),
                    CellValue::Null,
                ],
            ),
            Column::new(
                "Wert",
                ColumnType::Float,
                vec![
                    CellValue::Float(1.5),
                    CellValue::Float(2.0),
                    CellValue::Float(3.25),
                    CellValue::Float(4.0),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_filter_keeps_matching_rows_in_order() {
        let filtered = filter(&cities(), "Stadt", "Berlin").unwrap();

        assert_eq!(filtered.column_names(), vec!["Stadt", "Wert"]);
        assert_eq!(filtered.row_count(), 2);
        assert_eq!(
            filtered.column("Wert").unwrap().cells(),
            &[CellValue::Float(1.5), CellValue::Float(3.25)]
        );
    }

    #[test]
    fn test_filter_is_case_sensitive_and_skips_null() {
        assert_eq!(filter(&cities(), "Stadt", "berlin").unwrap().row_count(), 0);
        assert_eq!(filter(&cities(), "Stadt", "").unwrap().row_count(), 3);
    }

    #[test]
    fn test_filter_on_numeric_column_uses_display_text() {
        let filtered = filter(&cities(), "Wert", ".0").unwrap();
        assert_eq!(
            filtered.column("Stadt").unwrap().cells(),
            &[CellValue::Text("Hamburg".into()), CellValue::Null]
        );
    }

    #[test]
    fn test_filter_missing_column() {
        let err = filter(&cities(), "Land", "x").unwrap_err();
        assert_eq!(err, AppError::ColumnNotFound("Land".into()));
    }

    #[test]
    fn test_rename_preserves_data_and_order() {
        let table = cities();
        let renamed = rename(&table, "Stadt", "Ort").unwrap();

        assert_eq!(renamed.column_names(), vec!["Ort", "Wert"]);
        assert_eq!(
            renamed.column("Ort").unwrap().cells(),
            table.column("Stadt").unwrap().cells()
        );
        assert_eq!(table.column_names(), vec!["Stadt", "Wert"]);
    }

    #[test]
    fn test_rename_validation() {
        let table = cities();
        assert_eq!(
            rename(&table, "Land", "x").unwrap_err(),
            AppError::ColumnNotFound("Land".into())
        );
        assert_eq!(rename(&table, "Stadt", " ").unwrap_err().kind(), "validation_error");
        assert_eq!(rename(&table, "Stadt", "Wert").unwrap_err().kind(), "validation_error");
        assert_eq!(rename(&table, "Stadt", "Stadt").unwrap(), table);
    }

    #[test]
    fn test_select_reorders_columns() {
        let selected = select(&cities(), &["Wert", "Stadt"]).unwrap();
        assert_eq!(selected.column_names(), vec!["Wert", "Stadt"]);
        assert_eq!(selected.row_count(), 4);
    }

    #[test]
    fn test_select_validation() {
        let table = cities();
        let none: [&str; 0] = [];
        assert_eq!(select(&table, &none).unwrap(), table);
        assert_eq!(select(&table, &["Stadt", "Stadt"]).unwrap_err().kind(), "validation_error");
        assert_eq!(
            select(&table, &["Land"]).unwrap_err(),
            AppError::ColumnNotFound("Land".into())
        );
    }

    #[test]
    fn test_apply_edits_in_order() {
        let steps = vec![
            EditStep::Rename {
                from: "Stadt".into(),
                to: "Ort".into(),
            },
            EditStep::Filter {
                column: "Ort".into(),
                value: "Berlin".into(),
            },
            EditStep::Select {
                columns: vec!["Wert".into()],
            },
        ];
        let edited = apply_edits(&cities(), &steps).unwrap();
        assert_eq!(edited.column_names(), vec!["Wert"]);
        assert_eq!(edited.row_count(), 2);
    }

    #[test]
    fn test_apply_edits_stops_at_first_error() {
        let steps = vec![EditStep::Filter {
            column: "Stadt".into(),
            value: "x".into(),
        }, EditStep::Rename {
            from: "Land".into(),
            to: "x".into(),
        }];
        assert_eq!(
            apply_edits(&cities(), &steps).unwrap_err(),
            AppError::ColumnNotFound("Land".into())
        );
    }
}
