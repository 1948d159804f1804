//! Macroeconomic indicators from the FRED observations API.
//!
//! One request per configured indicator between a start and end date; the
//! series are outer-joined on date into a single wide table with one value
//! column per indicator label. FRED reports missing observations as ".",
//! which becomes a missing value.

use crate::dates::{parse_with, year_end, year_start, ISO_DATE_FORMAT};
use crate::error::{DashError, Result};
use crate::table::{Column, Point, Row, Series, Table};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

#[cfg(feature = "api")]
use crate::{
    cache::FetchCache,
    config::{ApiConfig, Indicator},
    dates::format_date,
};
#[cfg(feature = "api")]
use log::{info, warn};
#[cfg(feature = "api")]
use reqwest::{Client, StatusCode};

pub const DATE_COLUMN: &str = "Date";

/// Message shown when a year range returns nothing.
pub const NO_DATA_MESSAGE: &str = "No data retrieved. Try adjusting the year range.";

/// Exact inputs of an indicator fetch; doubles as the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacroQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MacroQuery {
    /// January 1st of `start_year` through December 31st of `end_year`.
    pub fn for_years(start_year: i32, end_year: i32) -> Result<Self> {
        if start_year > end_year {
            return Err(DashError::invalid("Start year must be before end year."));
        }
        Ok(Self {
            start: year_start(start_year)?,
            end: year_end(end_year)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// Parse one observations response into a series named `label`.
pub fn parse_observations(label: &str, body: &str) -> Result<Series> {
    let response: ObservationsResponse = serde_json::from_str(body)?;
    if let Some(msg) = response.error_message {
        return Err(DashError::unavailable(format!("{label}: {msg}")));
    }
    let points = response
        .observations
        .iter()
        .filter_map(|o| {
            let date = parse_with(&o.date, ISO_DATE_FORMAT)?;
            let value = o.value.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            Some(Point { date, value })
        })
        .collect();
    Ok(Series {
        name: label.to_string(),
        points,
    })
}

/// Outer-join series on date. A date missing from one series is a missing
/// value in that column.
pub fn join_series(series: Vec<Series>) -> Result<Table> {
    let width = series.len();
    let mut by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for (col, s) in series.iter().enumerate() {
        for point in &s.points {
            let slot = by_date.entry(point.date).or_insert_with(|| vec![None; width]);
            if point.value.is_some() {
                slot[col] = point.value;
            }
        }
    }

    let mut columns = vec![Column::Date(DATE_COLUMN.to_string())];
    columns.extend(series.iter().map(|s| Column::Value(s.name.clone())));
    let rows = by_date
        .into_iter()
        .map(|(date, values)| Row {
            date,
            category: None,
            values,
        })
        .collect();
    Table::new(columns, rows)
}

/// Join fetched series and reject a range with no observations at all.
pub fn finish_join(series: Vec<Series>) -> Result<Table> {
    let table = join_series(series)?;
    if table.is_empty() {
        return Err(DashError::unavailable(NO_DATA_MESSAGE));
    }
    Ok(table)
}

/// HTTP client for FRED series observations.
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct MacroClient {
    http: Client,
    base_url: String,
    api_key: String,
    indicators: Vec<Indicator>,
}

#[cfg(feature = "api")]
impl MacroClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.macro_api_url.trim_end_matches('/').to_string(),
            api_key: config.macro_api_key.clone(),
            indicators: config.indicators.clone(),
        }
    }

    async fn fetch_indicator(&self, indicator: &Indicator, query: &MacroQuery) -> Result<Series> {
        let url = format!("{}/fred/series/observations", self.base_url);
        let start = format_date(&query.start);
        let end = format_date(&query.end);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("series_id", indicator.series_id.as_str()),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", start.as_str()),
                ("observation_end", end.as_str()),
            ])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            warn!(
                "Bad response status for {}: {}",
                indicator.series_id,
                response.status()
            );
            return Err(DashError::unavailable(format!(
                "Indicator API returned {} for {}",
                response.status(),
                indicator.label
            )));
        }
        let body = response.text().await?;
        parse_observations(&indicator.label, &body)
    }

    /// Fetch every configured indicator for `query` as one wide table.
    pub async fn fetch(&self, query: &MacroQuery) -> Result<Table> {
        info!(
            "Fetching {} indicators from {} to {}",
            self.indicators.len(),
            query.start,
            query.end
        );
        let mut series = Vec::with_capacity(self.indicators.len());
        for indicator in &self.indicators {
            series.push(self.fetch_indicator(indicator, query).await?);
        }
        finish_join(series)
    }
}

/// [`MacroClient`] behind a cache keyed by the date range.
#[cfg(feature = "api")]
#[derive(Clone)]
pub struct CachedIndicators {
    client: MacroClient,
    cache: FetchCache<MacroQuery>,
}

#[cfg(feature = "api")]
impl CachedIndicators {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: MacroClient::new(config),
            cache: FetchCache::new(),
        }
    }

    pub async fn fetch(&self, query: &MacroQuery) -> Result<Table> {
        self.cache
            .get_or_fetch(*query, || self.client.fetch(query))
            .await
    }

    pub fn cache(&self) -> &FetchCache<MacroQuery> {
        &self.cache
    }
}
