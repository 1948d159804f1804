//! Remote data source configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRICE_API_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_MACRO_API_URL: &str = "https://api.stlouisfed.org";

/// A macroeconomic series and the label it is charted under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Indicator {
    pub series_id: String,
    pub label: String,
}

impl Indicator {
    pub fn new(series_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            label: label.into(),
        }
    }
}

/// Monthly indicators offered by the economic dashboard.
pub fn default_indicators() -> Vec<Indicator> {
    vec![
        Indicator::new("CPIAUCSL", "CPI"),
        Indicator::new("UNRATE", "Unemployment Rate"),
        Indicator::new("FEDFUNDS", "Fed Funds Rate"),
        Indicator::new("INDPRO", "Industrial Production"),
        Indicator::new("PAYEMS", "Nonfarm Payrolls"),
        Indicator::new("M2SL", "M2 Money Supply"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub price_api_url: String,
    pub macro_api_url: String,
    pub macro_api_key: String,
    pub indicators: Vec<Indicator>,
}

/// Runtime environment first, then the value baked in at compile time, then
/// `fallback`. Web builds have no process environment, so only the last two
/// apply there.
fn setting(name: &str, baked: Option<&str>, fallback: &str) -> String {
    std::env::var(name)
        .ok()
        .or_else(|| baked.map(str::to_string))
        .unwrap_or_else(|| fallback.to_string())
}

impl Default for ApiConfig {
    /// Reads `FINDASH_PRICE_API_URL`, `FINDASH_MACRO_API_URL` and
    /// `FRED_API_KEY`. Web builds pick them up at compile time, which is how
    /// they are pointed at a same-origin proxy.
    fn default() -> Self {
        Self {
            price_api_url: setting(
                "FINDASH_PRICE_API_URL",
                option_env!("FINDASH_PRICE_API_URL"),
                DEFAULT_PRICE_API_URL,
            ),
            macro_api_url: setting(
                "FINDASH_MACRO_API_URL",
                option_env!("FINDASH_MACRO_API_URL"),
                DEFAULT_MACRO_API_URL,
            ),
            macro_api_key: setting("FRED_API_KEY", option_env!("FRED_API_KEY"), ""),
            indicators: default_indicators(),
        }
    }
}

impl ApiConfig {
    pub fn with_price_api_url(mut self, url: impl Into<String>) -> Self {
        self.price_api_url = url.into();
        self
    }

    pub fn with_macro_api_url(mut self, url: impl Into<String>) -> Self {
        self.macro_api_url = url.into();
        self
    }

    pub fn with_macro_api_key(mut self, key: impl Into<String>) -> Self {
        self.macro_api_key = key.into();
        self
    }

    pub fn with_indicators(mut self, indicators: Vec<Indicator>) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn indicator_labels(&self) -> Vec<String> {
        self.indicators.iter().map(|i| i.label.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_override_defaults() {
        let config = ApiConfig::default()
            .with_price_api_url("http://localhost:9000")
            .with_macro_api_key("k")
            .with_indicators(vec![Indicator::new("UNRATE", "Unemployment")]);
        assert_eq!(config.price_api_url, "http://localhost:9000");
        assert_eq!(config.macro_api_key, "k");
        assert_eq!(config.indicator_labels(), vec!["Unemployment"]);
    }

    #[test]
    fn test_setting_prefers_baked_value_over_fallback() {
        let unset = "FINDASH_TEST_UNSET_SETTING";
        assert_eq!(setting(unset, Some("/proxy/fred"), DEFAULT_MACRO_API_URL), "/proxy/fred");
        assert_eq!(setting(unset, None, DEFAULT_MACRO_API_URL), DEFAULT_MACRO_API_URL);
    }

    #[test]
    fn test_default_catalogue_has_distinct_labels() {
        let labels: Vec<String> = default_indicators().into_iter().map(|i| i.label).collect();
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(labels.len(), deduped.len());
        assert!(labels.len() >= 2);
    }
}
