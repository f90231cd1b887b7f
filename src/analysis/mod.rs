pub mod client;
pub mod error;
pub mod prompt;
pub mod quality;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fmt::{Display, Formatter};

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

pub use client::AnalysisClient;
pub use error::AnalysisError;

/// Full structured reply for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub architectural_scaffolding: String,
    pub code_sequencing: String,
    pub tech_stack_selection: String,
    pub framework_comparisons: Vec<FrameworkComparison>,
    pub simulation_results: Vec<SimulationResult>,
    pub six_hat_exercise: Vec<SixHatEntry>,
    pub markdown_outline: String,
    pub executive_summary: String,
    pub saas_architecture: SaasArchitecture,
    pub process_mining_script_outline: ScriptOutline,
    pub predictive_analytics_process_script_outline: ScriptOutline,
    pub predictive_analytics_market_script_outline: ScriptOutline,
    #[serde(rename = "verticalAILayoutDescription")]
    pub vertical_ai_layout_description: String,
    pub vert_layout_description: String,
    pub brand_comparison_simulation: BrandComparisonSimulation,
}

impl AnalysisResult {
    pub const FIELD_NAMES: [&'static str; 15] = [
        "architecturalScaffolding",
        "codeSequencing",
        "techStackSelection",
        "frameworkComparisons",
        "simulationResults",
        "sixHatExercise",
        "markdownOutline",
        "executiveSummary",
        "saasArchitecture",
        "processMiningScriptOutline",
        "predictiveAnalyticsProcessScriptOutline",
        "predictiveAnalyticsMarketScriptOutline",
        "verticalAILayoutDescription",
        "vertLayoutDescription",
        "brandComparisonSimulation",
    ];

    /// Layout description backing a brand skin, `None` when blank.
    pub fn layout_description(&self, brand: BrandLabel) -> Option<&str> {
        let raw = match brand {
            BrandLabel::VerticalAi => self.vertical_ai_layout_description.as_str(),
            BrandLabel::Vert => self.vert_layout_description.as_str(),
        };
        if raw.trim().is_empty() {
            None
        } else {
            Some(raw)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkDetails {
    pub name: String,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkComparison {
    pub industry: String,
    pub framework1: FrameworkDetails,
    pub framework2: FrameworkDetails,
}

impl FrameworkComparison {
    pub fn frameworks(&self) -> [&FrameworkDetails; 2] {
        [&self.framework1, &self.framework2]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub industry: String,
    pub framework: String,
    pub path: String,
    #[serde(deserialize_with = "deserialize_likelihood")]
    #[schemars(with = "f64")]
    pub likelihood: u8,
    pub outcome_summary: String,
}

impl SimulationResult {
    pub fn tier(&self) -> LikelihoodTier {
        LikelihoodTier::from_likelihood(self.likelihood)
    }
}

/// Display bucket for a simulation likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LikelihoodTier {
    Favorable,
    Uncertain,
    Unfavorable,
}

impl LikelihoodTier {
    pub fn from_likelihood(likelihood: u8) -> Self {
        match likelihood {
            70..=u8::MAX => Self::Favorable,
            40..=69 => Self::Uncertain,
            _ => Self::Unfavorable,
        }
    }
}

fn deserialize_likelihood<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("likelihood must be a finite number"));
    }
    let clamped = raw.round().clamp(0.0, 100.0);
    if clamped != raw {
        warn!("simulation likelihood {raw} normalized to {clamped}");
    }
    Ok(clamped as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hat {
    #[serde(rename = "White Hat", alias = "White")]
    White,
    #[serde(rename = "Red Hat", alias = "Red")]
    Red,
    #[serde(rename = "Black Hat", alias = "Black")]
    Black,
    #[serde(rename = "Yellow Hat", alias = "Yellow")]
    Yellow,
    #[serde(rename = "Green Hat", alias = "Green")]
    Green,
    #[serde(rename = "Blue Hat", alias = "Blue")]
    Blue,
}

impl Hat {
    pub const ALL: [Hat; 6] = [
        Hat::White,
        Hat::Red,
        Hat::Black,
        Hat::Yellow,
        Hat::Green,
        Hat::Blue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::White => "White Hat",
            Self::Red => "Red Hat",
            Self::Black => "Black Hat",
            Self::Yellow => "Yellow Hat",
            Self::Green => "Green Hat",
            Self::Blue => "Blue Hat",
        }
    }
}

impl Display for Hat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SixHatEntry {
    #[schemars(with = "String")]
    pub hat: Hat,
    pub focus: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureLayer {
    pub components: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataStorage {
    pub strategy: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaasArchitecture {
    pub overview: String,
    pub data_ingestion: ArchitectureLayer,
    pub processing_layer: ArchitectureLayer,
    pub ai_ml_deployment: ArchitectureLayer,
    pub api_gateways: ArchitectureLayer,
    pub user_interface: ArchitectureLayer,
    pub data_storage: DataStorage,
    pub cloud_provider_focus: String,
    pub scalability_resilience_cost: String,
}

impl SaasArchitecture {
    pub fn layers(&self) -> [(&'static str, &ArchitectureLayer); 5] {
        [
            ("Data Ingestion", &self.data_ingestion),
            ("Processing Layer", &self.processing_layer),
            ("AI/ML Model Deployment", &self.ai_ml_deployment),
            ("API Gateways", &self.api_gateways),
            ("User Interface", &self.user_interface),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(transform = require_optimizations)]
pub struct ScriptOutline {
    pub name: String,
    pub description: String,
    pub key_functions: Vec<String>,
    pub input_output: String,
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_optimizations: Option<Vec<String>>,
}

// Required on the wire; parsing still tolerates a reply without it.
fn require_optimizations(schema: &mut schemars::Schema) {
    let Some(Value::Array(required)) = schema.ensure_object().get_mut("required") else {
        return;
    };
    let name = Value::from("potentialOptimizations");
    if !required.contains(&name) {
        required.push(name);
    }
}

impl ScriptOutline {
    pub fn optimizations(&self) -> &[String] {
        self.potential_optimizations.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    pub persona: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrandLabel {
    #[serde(rename = "Vertical AI")]
    VerticalAi,
    #[serde(rename = "Vert")]
    Vert,
}

impl BrandLabel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VerticalAi => "Vertical AI",
            Self::Vert => "Vert",
        }
    }

    /// Matches a free-form brand label, ignoring case and surrounding space.
    pub fn from_label(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "vertical ai" | "verticalai" | "vertical_ai" => Some(Self::VerticalAi),
            "vert" => Some(Self::Vert),
            _ => None,
        }
    }
}

impl Display for BrandLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DialogueEntry {
    pub timestamp: String,
    pub participant_name: String,
    pub dialogue: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_brand_label"
    )]
    #[schemars(with = "Option<String>")]
    pub brand_reacted_to: Option<BrandLabel>,
}

// Unrecognized labels fall back to neutral styling instead of failing the reply.
fn deserialize_brand_label<'de, D>(deserializer: D) -> Result<Option<BrandLabel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(BrandLabel::from_label))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandFeedback {
    pub brand_name: String,
    pub overall_sentiment: String,
    pub key_positive_points: Vec<String>,
    pub key_negative_points: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandComparisonSimulation {
    pub participants: Vec<Participant>,
    pub dialogue_log: Vec<DialogueEntry>,
    #[serde(rename = "verticalAIAnalysis")]
    pub vertical_ai_analysis: BrandFeedback,
    pub vert_analysis: BrandFeedback,
    pub overall_branding_recommendation: String,
}
