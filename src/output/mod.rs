pub mod html;
pub mod json;
pub mod page;
pub mod text;

use crate::analysis::{
    AnalysisResult, BrandComparisonSimulation, BrandLabel, FrameworkComparison, SaasArchitecture,
    ScriptOutline, SimulationResult, SixHatEntry,
};

pub const PLACEHOLDER: &str = "No content available.";

/// Presentation variant of one section. Each renderer handles every variant.
#[derive(Debug, Clone, Copy)]
pub enum SectionContent<'a> {
    Text(&'a str),
    Markdown(&'a str),
    Frameworks(&'a [FrameworkComparison]),
    Simulations(&'a [SimulationResult]),
    SixHats(&'a [SixHatEntry]),
    Saas(&'a SaasArchitecture),
    Script(&'a ScriptOutline),
    BrandComparison(&'a BrandComparisonSimulation),
}

impl SectionContent<'_> {
    /// Blank content renders as [`PLACEHOLDER`].
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) | Self::Markdown(text) => text.trim().is_empty(),
            Self::Frameworks(items) => items.is_empty(),
            Self::Simulations(items) => items.is_empty(),
            Self::SixHats(items) => items.is_empty(),
            Self::Saas(_) | Self::Script(_) | Self::BrandComparison(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub title: &'static str,
    pub content: SectionContent<'a>,
}

/// Sections of the full analysis in display order.
pub fn sections(result: &AnalysisResult) -> Vec<Section<'_>> {
    use SectionContent::*;

    let section = |title, content| Section { title, content };
    vec![
        section("Executive Summary", Text(&result.executive_summary)),
        section("High-Level SaaS Architecture", Saas(&result.saas_architecture)),
        section(
            "Architectural Scaffolding",
            Text(&result.architectural_scaffolding),
        ),
        section("Code Sequencing", Text(&result.code_sequencing)),
        section("Tech Stack Selection", Text(&result.tech_stack_selection)),
        section("Framework Comparisons", Frameworks(&result.framework_comparisons)),
        section("Simulation Results", Simulations(&result.simulation_results)),
        section("Six Hat Exercise", SixHats(&result.six_hat_exercise)),
        section(
            "Brand Concept: Vertical AI Layout Description",
            Text(&result.vertical_ai_layout_description),
        ),
        section(
            "Brand Concept: Vert Layout Description",
            Text(&result.vert_layout_description),
        ),
        section(
            "Brand Comparison Focus Group Simulation",
            BrandComparison(&result.brand_comparison_simulation),
        ),
        section(
            "Core Process Mining Engine Outline",
            Script(&result.process_mining_script_outline),
        ),
        section(
            "Predictive Analytics (Process) Script Outline",
            Script(&result.predictive_analytics_process_script_outline),
        ),
        section(
            "Predictive Analytics (Market & Consumer) Script Outline",
            Script(&result.predictive_analytics_market_script_outline),
        ),
        section(
            "Strategic Paths & Outcomes (Outline)",
            Markdown(&result.markdown_outline),
        ),
    ]
}

/// Static chrome of a mock brand dashboard. Only the description is dynamic.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSkin {
    pub brand: BrandLabel,
    pub platform_name: &'static str,
    pub greeting: &'static str,
    pub header_buttons: [&'static str; 2],
    pub nav_items: [&'static str; 4],
    pub active_nav: usize,
    pub heading: &'static str,
    pub metrics_title: &'static str,
    pub metrics: [(&'static str, &'static str); 3],
    pub flow_title: &'static str,
    pub flow_placeholder: &'static str,
    pub alerts_title: &'static str,
    pub alerts: [&'static str; 2],
    /// CSS class suffix used by the HTML renderer.
    pub theme: &'static str,
}

const VERTICAL_AI_SKIN: DashboardSkin = DashboardSkin {
    brand: BrandLabel::VerticalAi,
    platform_name: "Vertical AI Platform",
    greeting: "Welcome, Executive User",
    header_buttons: ["Dashboard", "Reports"],
    nav_items: [
        "Overview",
        "Process Optimization",
        "Predictive Analytics",
        "Settings",
    ],
    active_nav: 1,
    heading: "Dashboard Overview",
    metrics_title: "KPIs at a Glance",
    metrics: [
        ("Total Cases", "1,245"),
        ("Avg Cycle Time", "2.3 days"),
        ("Bottlenecks", "3 identified"),
    ],
    flow_title: "Real-time Process Flow",
    flow_placeholder: "Dynamic Process Map Placeholder",
    alerts_title: "Predictive Alerts",
    alerts: [
        "Order #12345: SLA risk (90% likely)",
        "Resource R1: High utilization next 24h",
    ],
    theme: "corporate",
};

const VERT_SKIN: DashboardSkin = DashboardSkin {
    brand: BrandLabel::Vert,
    platform_name: "Vert Vibes",
    greeting: "Hey there, Innovator!",
    header_buttons: ["Insight Hub", "Community"],
    nav_items: [
        "The Big Picture",
        "Flow Alchemy",
        "Future Whispers",
        "Growth Seeds",
    ],
    active_nav: 1,
    heading: "Your Flow Garden",
    metrics_title: "Health Metrics",
    metrics: [
        ("Total Adventures", "~1.2K"),
        ("Zen Flow Time", "2 days average"),
        ("Sticky Spots", "Few & Far Between"),
    ],
    flow_title: "Journey Visualization",
    flow_placeholder: "Organic Flow Journey Map Placeholder",
    alerts_title: "Intuitive Foresight",
    alerts: [
        "Order #12345: Might need a friendly nudge (70% likely)",
        "Team 'Sunbeam': Could use more kombucha next sprint",
    ],
    theme: "relaxed",
};

pub fn skin(brand: BrandLabel) -> &'static DashboardSkin {
    match brand {
        BrandLabel::VerticalAi => &VERTICAL_AI_SKIN,
        BrandLabel::Vert => &VERT_SKIN,
    }
}
