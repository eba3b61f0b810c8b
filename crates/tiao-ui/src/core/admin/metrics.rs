//! Headline metrics strip of the admin dashboard.

use tiao_config::NumberLocale;
use tiao_protocol::Metrics;

use crate::core::format::{currency, fixed};

/// Formatted metrics, ready for text nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricsView {
    /// Vault balance (`$1,000`).
    pub vault: String,
    /// Inflation index with two decimals.
    pub inflation: String,
    /// Tax rate with one decimal and a percent sign.
    pub taxrate: String,
    /// Collected today (`$340`).
    pub today: String,
}

impl MetricsView {
    /// Format `metrics`, substituting defaults for missing values.
    #[must_use]
    pub fn from_metrics(metrics: &Metrics, locale: NumberLocale) -> Self {
        Self {
            vault: currency(metrics.vault.unwrap_or(0.0), locale),
            inflation: fixed(metrics.inflation.unwrap_or(1.0), 2),
            taxrate: format!("{}%", fixed(metrics.taxrate.unwrap_or(0.0), 1)),
            today: currency(metrics.today.unwrap_or(0.0), locale),
        }
    }
}

impl Default for MetricsView {
    fn default() -> Self {
        Self::from_metrics(&Metrics::default(), NumberLocale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_metrics_use_neutral_defaults() {
        let view = MetricsView::default();
        assert_eq!(view.vault, "$0");
        assert_eq!(view.inflation, "1.00");
        assert_eq!(view.taxrate, "0.0%");
        assert_eq!(view.today, "$0");
    }

    #[test]
    fn metrics_are_formatted_per_field() {
        let view = MetricsView::from_metrics(
            &Metrics {
                vault: Some(1_000.0),
                inflation: Some(1.025),
                taxrate: Some(2.5),
                today: Some(340.7),
            },
            NumberLocale::EnUs,
        );
        assert_eq!(view.vault, "$1,000");
        assert_eq!(view.taxrate, "2.5%");
        assert_eq!(view.today, "$340");
    }
}
