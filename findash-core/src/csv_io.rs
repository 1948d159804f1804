//! Delimited text loading and export.
//!
//! Loading coerces rather than rejects: a row whose date does not parse is
//! dropped, and a value that is not a finite number becomes missing. Both are
//! counted and logged. Export writes the columns back in their source order
//! with the layout's date format, so a loaded file downloads unchanged.

use crate::dates::{parse_with, DAY_MONTH_YEAR_FORMAT, ISO_DATE_FORMAT};
use crate::error::{DashError, Result};
use crate::table::{Column, Row, Table};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{info, warn};
use std::path::Path;

/// Describes which columns of a delimited file hold what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    pub date_column: String,
    pub date_format: String,
    pub category_column: Option<String>,
    /// `None` treats every column other than date and category as a value column.
    pub value_columns: Option<Vec<String>>,
    pub delimiter: u8,
}

impl CsvLayout {
    pub fn new(date_column: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            date_column: date_column.into(),
            date_format: date_format.into(),
            category_column: None,
            value_columns: None,
            delimiter: b',',
        }
    }

    /// The local stock price file: `date` (DD-MM-YYYY), `stock`, `price`.
    pub fn stock_prices() -> Self {
        Self::new("date", DAY_MONTH_YEAR_FORMAT)
            .with_category("stock")
            .with_values(["price"])
    }

    /// A file with an ISO `YYYY-MM-DD` date column and numeric columns after it.
    pub fn iso(date_column: impl Into<String>) -> Self {
        Self::new(date_column, ISO_DATE_FORMAT)
    }

    pub fn with_category(mut self, column: impl Into<String>) -> Self {
        self.category_column = Some(column.into());
        self
    }

    pub fn with_values<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Where each table column lives in the source record.
struct Projection {
    columns: Vec<Column>,
    date_idx: usize,
    category_idx: Option<usize>,
    value_idx: Vec<usize>,
}

fn project(headers: &StringRecord, layout: &CsvLayout) -> Result<Projection> {
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);
    let missing = |name: &str| DashError::unavailable(format!("Missing required column '{name}'"));

    let date_idx = find(&layout.date_column).ok_or_else(|| missing(&layout.date_column))?;
    let category_idx = match &layout.category_column {
        Some(name) => Some(find(name).ok_or_else(|| missing(name))?),
        None => None,
    };
    if let Some(wanted) = &layout.value_columns {
        for name in wanted {
            find(name).ok_or_else(|| missing(name))?;
        }
    }

    let mut columns = Vec::new();
    let mut value_idx = Vec::new();
    for (i, header) in headers.iter().enumerate() {
        let name = header.trim().to_string();
        if i == date_idx {
            columns.push(Column::Date(name));
        } else if Some(i) == category_idx {
            columns.push(Column::Category(name));
        } else if layout
            .value_columns
            .as_ref()
            .map(|wanted| wanted.contains(&name))
            .unwrap_or(true)
        {
            value_idx.push(i);
            columns.push(Column::Value(name));
        }
    }

    Ok(Projection {
        columns,
        date_idx,
        category_idx,
        value_idx,
    })
}

/// Parse a numeric field, treating blanks and anything non-finite as missing.
fn parse_value(raw: &str) -> Option<f64> {
    match raw.trim() {
        "" => None,
        s => s.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

/// Load a table from delimited text.
pub fn load_csv_str(data: &str, layout: &CsvLayout) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(layout.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());
    let headers = rdr.headers()?.clone();
    let projection = project(&headers, layout)?;

    let mut rows = Vec::new();
    let mut dropped = 0u32;
    let mut coerced = 0u32;
    for result in rdr.records() {
        let record = result?;
        let raw_date = record.get(projection.date_idx).unwrap_or("");
        let Some(date) = parse_with(raw_date, &layout.date_format) else {
            dropped += 1;
            continue;
        };
        let category = projection
            .category_idx
            .map(|i| record.get(i).unwrap_or("").trim().to_string());
        let values = projection
            .value_idx
            .iter()
            .map(|&i| {
                let raw = record.get(i).unwrap_or("");
                let value = parse_value(raw);
                if value.is_none() && !raw.trim().is_empty() {
                    coerced += 1;
                }
                value
            })
            .collect();
        rows.push(Row {
            date,
            category,
            values,
        });
    }

    if dropped > 0 {
        warn!("Dropped {} rows with unparseable dates", dropped);
    }
    if coerced > 0 {
        warn!("Coerced {} non-numeric values to missing", coerced);
    }
    info!("Loaded {} rows", rows.len());
    Table::new(projection.columns, rows)
}

/// Load a table from a delimited file on disk.
pub fn load_csv_file(path: impl AsRef<Path>, layout: &CsvLayout) -> Result<Table> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|e| {
        DashError::unavailable(format!("Cannot read {}: {}", path.display(), e))
    })?;
    load_csv_str(&data, layout)
}

/// Serialize a table to delimited text, dates in `date_format` and missing
/// values as empty fields.
pub fn write_csv(table: &Table, date_format: &str) -> Result<String> {
    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(table.columns().iter().map(Column::name))?;

    for row in table.rows() {
        let mut values = row.values.iter();
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|column| match column {
                Column::Date(_) => row.date.format(date_format).to_string(),
                Column::Category(_) => row.category.clone().unwrap_or_default(),
                Column::Value(_) => values
                    .next()
                    .copied()
                    .flatten()
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            })
            .collect();
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| DashError::unavailable(format!("Failed to flush CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| DashError::unavailable(format!("Invalid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const STOCK_CSV: &str = "\
date,price,stock
03-01-2024,101.5,AAPL
01-01-2024,100,AAPL
02-01-2024,n/a,MSFT
not-a-date,5,MSFT
02-01-2024,300,MSFT
";

    #[test]
    fn test_load_stock_prices() {
        let table = load_csv_str(STOCK_CSV, &CsvLayout::stock_prices()).unwrap();
        assert_eq!(table.len(), 4, "row with a bad date is dropped");
        assert_eq!(table.date_column(), "date");
        assert_eq!(table.category_column(), Some("stock"));
        assert_eq!(table.value_columns(), vec!["price"]);

        let first = &table.rows()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.values, vec![Some(100.0)]);
        // non-numeric price coerced to missing, not rejected
        assert_eq!(table.rows()[1].values, vec![None]);
        assert_eq!(table.rows()[3].values, vec![Some(101.5)]);
    }

    #[test]
    fn test_missing_column_is_unavailable() {
        let err = load_csv_str("date,close\n01-01-2024,1\n", &CsvLayout::stock_prices()).unwrap_err();
        assert!(matches!(err, DashError::DataUnavailable(_)));
        assert!(err.to_string().contains("stock"));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = load_csv_file("/definitely/not/here.csv", &CsvLayout::stock_prices()).unwrap_err();
        assert!(matches!(err, DashError::DataUnavailable(_)));
    }

    #[test]
    fn test_iso_layout_takes_all_remaining_columns() {
        let csv = "Date,CPI,Unemployment Rate\n2020-01-01,258.7,3.5\n2020-02-01,.,3.5\n";
        let table = load_csv_str(csv, &CsvLayout::iso("Date")).unwrap();
        assert_eq!(table.value_columns(), vec!["CPI", "Unemployment Rate"]);
        assert_eq!(table.rows()[1].values, vec![None, Some(3.5)]);
    }

    #[test]
    fn test_download_reproduces_rows() {
        let source = "\
date,price,stock
01-01-2024,100,AAPL
02-01-2024,100.25,AAPL
02-01-2024,,MSFT
03-01-2024,301,MSFT
";
        let layout = CsvLayout::stock_prices();
        let table = load_csv_str(source, &layout).unwrap();
        let exported = write_csv(&table, &layout.date_format).unwrap();
        assert_eq!(
            exported.lines().collect::<Vec<_>>(),
            source.lines().collect::<Vec<_>>()
        );
        let reloaded = load_csv_str(&exported, &layout).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn test_download_via_file() {
        let layout = CsvLayout::stock_prices();
        let table = load_csv_str(STOCK_CSV, &layout).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(&path, write_csv(&table, &layout.date_format).unwrap()).unwrap();
        let reloaded = load_csv_file(&path, &layout).unwrap();
        assert_eq!(reloaded, table);
    }
}
