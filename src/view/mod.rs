pub mod controller;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{AnalysisResult, BrandLabel};

pub use controller::{ViewController, ViewError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    #[serde(rename = "analysis")]
    Analysis,
    #[serde(rename = "brandA")]
    BrandA,
    #[serde(rename = "brandB")]
    BrandB,
}

#[derive(Debug, Error)]
#[error("unknown display mode: {0} (expected analysis, brandA or brandB)")]
pub struct DisplayModeParseError(String);

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [Self::Analysis, Self::BrandA, Self::BrandB];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::BrandA => "brandA",
            Self::BrandB => "brandB",
        }
    }

    pub fn brand(&self) -> Option<BrandLabel> {
        match self {
            Self::Analysis => None,
            Self::BrandA => Some(BrandLabel::VerticalAi),
            Self::BrandB => Some(BrandLabel::Vert),
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Analysis => "Full Analysis",
            Self::BrandA => "\"Vertical AI\" Layout (Draft)",
            Self::BrandB => "\"Vert\" Layout (Draft)",
        }
    }
}

impl Display for DisplayMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_slug())
    }
}

impl FromStr for DisplayMode {
    type Err = DisplayModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "analysis" | "full" => Ok(Self::Analysis),
            "branda" | "verticalai" => Ok(Self::BrandA),
            "brandb" | "vert" => Ok(Self::BrandB),
            _ => Err(DisplayModeParseError(s.to_string())),
        }
    }
}

/// Coarse screen state derived from [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "mode", rename_all = "snake_case")]
pub enum ViewPhase {
    AwaitingKey,
    Idle,
    Loading,
    Error,
    Ready(DisplayMode),
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub analysis_result: Option<AnalysisResult>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub is_key_selected: bool,
    pub display_mode: DisplayMode,
    /// Set once the key environment is found missing; no action recovers.
    pub environment_unavailable: bool,
    pub generated_at: Option<DateTime<Utc>>,
}

impl ViewState {
    pub fn phase(&self) -> ViewPhase {
        if self.is_loading {
            ViewPhase::Loading
        } else if self.last_error.is_some() {
            ViewPhase::Error
        } else if !self.is_key_selected {
            ViewPhase::AwaitingKey
        } else if self.analysis_result.is_some() {
            ViewPhase::Ready(self.display_mode)
        } else {
            ViewPhase::Idle
        }
    }
}
