use crate::error::{DashError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named column and the role it plays in a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Date(String),
    Category(String),
    Value(String),
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Date(name) | Column::Category(name) | Column::Value(name) => name,
        }
    }
}

/// One row: a date, an optional instrument tag and one slot per value column.
/// `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub date: NaiveDate,
    pub category: Option<String>,
    pub values: Vec<Option<f64>>,
}

/// A single (date, value) observation within a [`Series`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Rows of a table sharing one category value, projected onto one value column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

impl Series {
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }
}

/// Immutable in-memory dataset.
///
/// Columns keep the order they had in the source so the table can be written
/// back out unchanged. Rows are always sorted ascending by date; the sort is
/// stable, so rows sharing a date keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// An empty table with the given column shape.
    pub fn empty(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table, checking every row against the column shape.
    pub fn new(columns: Vec<Column>, mut rows: Vec<Row>) -> Result<Self> {
        let date_columns = columns
            .iter()
            .filter(|c| matches!(c, Column::Date(_)))
            .count();
        if date_columns != 1 {
            return Err(DashError::unavailable(format!(
                "A table needs exactly one date column, found {date_columns}"
            )));
        }
        let has_category = columns.iter().any(|c| matches!(c, Column::Category(_)));
        let value_count = columns
            .iter()
            .filter(|c| matches!(c, Column::Value(_)))
            .count();

        for (i, row) in rows.iter().enumerate() {
            if row.values.len() != value_count {
                return Err(DashError::unavailable(format!(
                    "Row {i} has {} values, expected {value_count}",
                    row.values.len()
                )));
            }
            if row.category.is_some() != has_category {
                return Err(DashError::unavailable(format!(
                    "Row {i} does not match the table's category column"
                )));
            }
        }

        rows.sort_by_key(|r| r.date);
        Ok(Self { columns, rows })
    }

    /// Concatenate tables of the same shape. An empty list yields an empty
    /// table with `columns`.
    pub fn concat(columns: Vec<Column>, tables: Vec<Table>) -> Result<Self> {
        let mut rows = Vec::new();
        for table in tables {
            if table.columns != columns {
                return Err(DashError::unavailable(
                    "Cannot combine tables with different columns",
                ));
            }
            rows.extend(table.rows);
        }
        Table::new(columns, rows)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn date_column(&self) -> &str {
        self.columns
            .iter()
            .find_map(|c| match c {
                Column::Date(name) => Some(name.as_str()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn category_column(&self) -> Option<&str> {
        self.columns.iter().find_map(|c| match c {
            Column::Category(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn value_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter_map(|c| match c {
                Column::Value(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn value_index(&self, name: &str) -> Option<usize> {
        self.value_columns().iter().position(|c| *c == name)
    }

    /// Distinct category values in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|r| r.category.as_ref())
            .filter(|c| seen.insert(c.as_str()))
            .cloned()
            .collect()
    }

    /// Rows whose category is one of `selected`.
    pub fn filter_categories(&self, selected: &[String]) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|r| {
                r.category
                    .as_ref()
                    .map(|c| selected.contains(c))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Rows dated within `start..=end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// The last `n` rows.
    pub fn tail(&self, n: usize) -> Table {
        let skip = self.rows.len().saturating_sub(n);
        Table {
            columns: self.columns.clone(),
            rows: self.rows[skip..].to_vec(),
        }
    }

    /// Rows of page `page` (zero based) when split into pages of `page_size`.
    pub fn page(&self, page: usize, page_size: usize) -> &[Row] {
        if page_size == 0 {
            return &[];
        }
        let start = (page * page_size).min(self.rows.len());
        let end = (start + page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.rows.len().div_ceil(page_size)
    }

    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let idx = self.require_value(name)?;
        Ok(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// Project `value_column` into one series per category, in order of first
    /// appearance. A table without a category column yields a single series
    /// named after the value column.
    pub fn series(&self, value_column: &str) -> Result<Vec<Series>> {
        let idx = self.require_value(value_column)?;
        if self.category_column().is_none() {
            return Ok(vec![Series {
                name: value_column.to_string(),
                points: self
                    .rows
                    .iter()
                    .map(|r| Point {
                        date: r.date,
                        value: r.values[idx],
                    })
                    .collect(),
            }]);
        }

        let mut series: Vec<Series> = self
            .categories()
            .into_iter()
            .map(|name| Series {
                name,
                points: Vec::new(),
            })
            .collect();
        for row in &self.rows {
            if let Some(category) = &row.category {
                if let Some(s) = series.iter_mut().find(|s| &s.name == category) {
                    s.points.push(Point {
                        date: row.date,
                        value: row.values[idx],
                    });
                }
            }
        }
        Ok(series)
    }

    fn require_value(&self, name: &str) -> Result<usize> {
        self.value_index(name)
            .ok_or_else(|| DashError::unavailable(format!("Column '{name}' is not in the data")))
    }
}
