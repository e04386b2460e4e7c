//! Trend data export/import: the crate's only owned wire contract.
//!
//! The payload serializes with camelCase keys and must round-trip losslessly
//! through export followed by import. Validation order on import is fixed:
//! parse first (`ImportFailure`), then check the required top-level keys
//! (`InvalidFormat`).

use super::{PeriodSummary, TrendAnalysis, TrendInsights, TrendMetrics, TrendPatterns, TrendPredictions};
use crate::core::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Formats `export_trend_data` understands.
pub const SUPPORTED_EXPORT_FORMATS: &[&str] = &["json"];

const REQUIRED_KEYS: &[&str] = &["period", "metrics", "insights"];

/// The serialized trend payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendExport {
    pub period: PeriodSummary,
    pub metrics: TrendMetrics,
    pub patterns: TrendPatterns,
    pub predictions: Option<TrendPredictions>,
    pub insights: TrendInsights,
    pub exported_at: DateTime<Utc>,
}

/// Serialize a trend analysis for storage or transport.
pub fn export_trend_data(analysis: &TrendAnalysis, format: &str) -> Result<String> {
    if !SUPPORTED_EXPORT_FORMATS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(format))
    {
        return Err(Error::UnsupportedExportFormat(format.to_string()));
    }

    let export = TrendExport {
        period: analysis.period.clone(),
        metrics: analysis.metrics.clone(),
        patterns: analysis.patterns.clone(),
        predictions: analysis.predictions.clone(),
        insights: analysis.insights.clone(),
        exported_at: Utc::now(),
    };
    serde_json::to_string_pretty(&export).map_err(|e| Error::External(e.into()))
}

/// Parse previously exported trend data.
pub fn import_trend_data(data: &str) -> Result<TrendExport> {
    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|e| Error::ImportFailure(e.to_string()))?;

    for key in REQUIRED_KEYS {
        if value.get(key).is_none() {
            return Err(Error::InvalidFormat(format!(
                "missing required key `{key}`"
            )));
        }
    }

    serde_json::from_value(value).map_err(|e| Error::InvalidFormat(e.to_string()))
}
