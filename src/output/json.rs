use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::quality::{inspect, QualityFinding};
use crate::analysis::AnalysisResult;
use crate::view::DisplayMode;

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `--output json` payload: the result plus how it was produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub model: &'a str,
    pub display_mode: DisplayMode,
    pub findings: Vec<QualityFinding>,
    pub result: &'a AnalysisResult,
}

impl<'a> ResultDocument<'a> {
    pub fn new(
        result: &'a AnalysisResult,
        model: &'a str,
        display_mode: DisplayMode,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at,
            model,
            display_mode,
            findings: inspect(result),
            result,
        }
    }
}

/// Reads a saved result, either bare or wrapped in a [`ResultDocument`].
pub fn parse_saved(text: &str) -> Result<AnalysisResult> {
    let value: Value = serde_json::from_str(text).context("saved result is not valid JSON")?;
    let inner = match value.get("result") {
        Some(inner) if value.get("generatedAt").is_some() => inner.clone(),
        _ => value,
    };
    serde_json::from_value(inner).context("saved JSON does not match the analysis result shape")
}
