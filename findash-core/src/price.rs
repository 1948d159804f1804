//! Daily closing prices from the remote chart API.
//!
//! Each symbol is fetched separately and the results are concatenated into
//! one table tagged by the `Stock` column. Response parsing is kept free of
//! the HTTP client so it can be exercised without network access.

use crate::error::{DashError, Result};
use crate::table::{Column, Row, Table};
use chrono::DateTime;
use serde::Deserialize;

#[cfg(feature = "api")]
use crate::{cache::FetchCache, config::ApiConfig};
#[cfg(feature = "api")]
use log::{info, warn};
#[cfg(feature = "api")]
use reqwest::{Client, StatusCode};

pub const DATE_COLUMN: &str = "Date";
pub const CLOSE_COLUMN: &str = "Close";
pub const SYMBOL_COLUMN: &str = "Stock";

/// Lookback window requested when none is given.
pub const DEFAULT_RANGE: &str = "1y";
/// Bar size requested when none is given.
pub const DEFAULT_INTERVAL: &str = "1d";

/// Shape of every price table, populated or not.
pub fn price_columns() -> Vec<Column> {
    vec![
        Column::Date(DATE_COLUMN.to_string()),
        Column::Value(CLOSE_COLUMN.to_string()),
        Column::Category(SYMBOL_COLUMN.to_string()),
    ]
}

/// Exact inputs of a price fetch; doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriceQuery {
    pub symbols: Vec<String>,
    pub range: String,
    pub interval: String,
}

impl PriceQuery {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            range: DEFAULT_RANGE.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = interval.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartFault>,
}

#[derive(Debug, Deserialize)]
struct ChartFault {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Parse a chart API response body into a price table for `symbol`.
pub fn parse_chart_response(symbol: &str, body: &str) -> Result<Table> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;
    if let Some(fault) = envelope.chart.error {
        return Err(DashError::unavailable(format!(
            "Price API error for {symbol}: {} {}",
            fault.code, fault.description
        )));
    }
    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DashError::unavailable(format!("No price data returned for {symbol}")))?;
    if result.timestamp.is_empty() {
        return Err(DashError::unavailable(format!(
            "No price data returned for {symbol}"
        )));
    }
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut rows = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let Some(moment) = DateTime::from_timestamp(*ts, 0) else {
            continue;
        };
        let close = closes.get(i).copied().flatten().filter(|v| v.is_finite());
        rows.push(Row {
            date: moment.date_naive(),
            category: Some(symbol.to_string()),
            values: vec![close],
        });
    }
    Table::new(price_columns(), rows)
}

/// HTTP client for the chart API.
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct PriceClient {
    http: Client,
    base_url: String,
}

#[cfg(feature = "api")]
impl PriceClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.price_api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one symbol's closes for `range` at `interval`.
    pub async fn fetch_symbol(&self, symbol: &str, range: &str, interval: &str) -> Result<Table> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        info!("Fetching {} closes for {} ({})", range, symbol, interval);
        let response = self
            .http
            .get(&url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            warn!("Bad response status for {}: {}", symbol, response.status());
            return Err(DashError::unavailable(format!(
                "Price API returned {} for {}",
                response.status(),
                symbol
            )));
        }
        let body = response.text().await?;
        parse_chart_response(symbol, &body)
    }

    /// Fetch every symbol of `query` and concatenate. No symbols yields an
    /// empty table with the price columns.
    pub async fn fetch(&self, query: &PriceQuery) -> Result<Table> {
        let mut tables = Vec::with_capacity(query.symbols.len());
        for symbol in &query.symbols {
            tables.push(
                self.fetch_symbol(symbol, &query.range, &query.interval)
                    .await?,
            );
        }
        Table::concat(price_columns(), tables)
    }
}

/// [`PriceClient`] behind a cache keyed by the full query.
#[cfg(feature = "api")]
#[derive(Clone)]
pub struct CachedPrices {
    client: PriceClient,
    cache: FetchCache<PriceQuery>,
}

#[cfg(feature = "api")]
impl CachedPrices {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: PriceClient::new(config),
            cache: FetchCache::new(),
        }
    }

    pub async fn fetch(&self, query: &PriceQuery) -> Result<Table> {
        self.cache
            .get_or_fetch(query.clone(), || self.client.fetch(query))
            .await
    }

    pub fn cache(&self) -> &FetchCache<PriceQuery> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // trimmed /v8/finance/chart/AAPL?range=1y&interval=1d response
    const CHART_JSON: &str = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","currency":"USD"},
        "timestamp":[1704205800,1704292200,1704378600],
        "indicators":{"quote":[{"open":[187.1,184.2,182.1],"close":[185.64,null,181.91]}],
        "adjclose":[{"adjclose":[184.9,183.6,181.2]}]}}],"error":null}}"#;

    #[test]
    fn test_parse_chart_response() {
        let table = parse_chart_response("AAPL", CHART_JSON).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.categories(), vec!["AAPL"]);
        assert_eq!(
            table.rows()[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(
            table.column(CLOSE_COLUMN).unwrap(),
            vec![Some(185.64), None, Some(181.91)]
        );
    }

    #[test]
    fn test_parse_chart_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("ZZZZ", body).unwrap_err();
        assert!(matches!(err, DashError::DataUnavailable(_)));
        assert!(err.to_string().contains("delisted"));
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        let empty = r#"{"chart":{"result":[{"timestamp":[],"indicators":{"quote":[{"close":[]}]}}],"error":null}}"#;
        assert!(parse_chart_response("AAPL", empty).is_err());
        assert!(parse_chart_response("AAPL", "<html>").is_err());
    }

    #[test]
    fn test_query_defaults() {
        let query = PriceQuery::new(vec!["AAPL".into()]);
        assert_eq!(query.range, "1y");
        assert_eq!(query.interval, "1d");
        assert_ne!(query, query.clone().with_range("6mo"));
    }
}
