use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::analysis::{
    AnalysisResult, ArchitectureLayer, BrandComparisonSimulation, BrandFeedback, BrandLabel,
    FrameworkComparison, Hat, LikelihoodTier, SaasArchitecture, ScriptOutline, SimulationResult,
    SixHatEntry,
};
use crate::output::{sections, skin, DashboardSkin, Section, SectionContent, PLACEHOLDER};
use crate::view::DisplayMode;

fn esc(text: &str) -> String {
    encode_text(text).into_owned()
}

fn list(out: &mut String, class: &str, items: &[String]) {
    let _ = write!(out, "<ul class=\"{}\">", encode_double_quoted_attribute(class));
    for item in items {
        let _ = write!(out, "<li>{}</li>", esc(item));
    }
    out.push_str("</ul>");
}

fn labeled_list(out: &mut String, label: &str, class: &str, items: &[String]) {
    let _ = write!(out, "<p class=\"label {class}\">{}</p>", esc(label));
    list(out, "bullets", items);
}

fn tier_class(tier: LikelihoodTier) -> &'static str {
    match tier {
        LikelihoodTier::Favorable => "tier-favorable",
        LikelihoodTier::Uncertain => "tier-uncertain",
        LikelihoodTier::Unfavorable => "tier-unfavorable",
    }
}

fn hat_class(hat: Hat) -> &'static str {
    match hat {
        Hat::White => "hat-white",
        Hat::Red => "hat-red",
        Hat::Black => "hat-black",
        Hat::Yellow => "hat-yellow",
        Hat::Green => "hat-green",
        Hat::Blue => "hat-blue",
    }
}

fn brand_class(brand: Option<BrandLabel>) -> &'static str {
    match brand {
        Some(BrandLabel::VerticalAi) => "brand-vertical-ai",
        Some(BrandLabel::Vert) => "brand-vert",
        None => "brand-neutral",
    }
}

pub fn render_section(section: &Section<'_>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<section class=\"analysis-section\"><h2>{}</h2>",
        esc(section.title)
    );
    if section.content.is_blank() {
        let _ = write!(out, "<p class=\"placeholder\">{PLACEHOLDER}</p>");
    } else {
        match section.content {
            SectionContent::Text(text) => {
                let _ = write!(out, "<p class=\"prose\">{}</p>", esc(text));
            }
            SectionContent::Markdown(text) => {
                let _ = write!(out, "<pre class=\"markdown\">{}</pre>", esc(text));
            }
            SectionContent::Frameworks(items) => render_frameworks(&mut out, items),
            SectionContent::Simulations(items) => render_simulations(&mut out, items),
            SectionContent::SixHats(items) => render_six_hats(&mut out, items),
            SectionContent::Saas(arch) => render_saas(&mut out, arch),
            SectionContent::Script(script) => render_script(&mut out, script),
            SectionContent::BrandComparison(sim) => render_brand_comparison(&mut out, sim),
        }
    }
    out.push_str("</section>");
    out
}

fn render_frameworks(out: &mut String, comparisons: &[FrameworkComparison]) {
    out.push_str("<div class=\"frameworks\">");
    for comparison in comparisons {
        let _ = write!(
            out,
            "<div class=\"comparison\"><h3>{} Industry</h3><div class=\"pair\">",
            esc(&comparison.industry)
        );
        for framework in comparison.frameworks() {
            let _ = write!(
                out,
                "<div class=\"card\"><h4>{}</h4><p>{}</p>",
                esc(&framework.name),
                esc(&framework.description)
            );
            labeled_list(out, "Pros:", "pros", &framework.pros);
            labeled_list(out, "Cons:", "cons", &framework.cons);
            labeled_list(out, "Tech Stack:", "stack", &framework.tech_stack);
            out.push_str("</div>");
        }
        out.push_str("</div></div>");
    }
    out.push_str("</div>");
}

fn render_simulations(out: &mut String, simulations: &[SimulationResult]) {
    out.push_str(
        "<table class=\"simulations\"><thead><tr><th>Industry</th><th>Framework</th>\
<th>Path</th><th>Likelihood</th><th>Outcome Summary</th></tr></thead><tbody>",
    );
    for sim in simulations {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td>\
<td><span class=\"badge {}\">{}%</span></td><td>{}</td></tr>",
            esc(&sim.industry),
            esc(&sim.framework),
            esc(&sim.path),
            tier_class(sim.tier()),
            sim.likelihood,
            esc(&sim.outcome_summary)
        );
    }
    out.push_str("</tbody></table>");
}

fn render_six_hats(out: &mut String, entries: &[SixHatEntry]) {
    out.push_str("<div class=\"hats\">");
    for entry in entries {
        let _ = write!(
            out,
            "<div class=\"hat {}\"><h4>{}</h4><p class=\"focus\">Focus: {}</p><p>{}</p></div>",
            hat_class(entry.hat),
            esc(entry.hat.label()),
            esc(&entry.focus),
            esc(&entry.summary)
        );
    }
    out.push_str("</div>");
}

fn render_layer(out: &mut String, heading: &str, layer: &ArchitectureLayer) {
    let _ = write!(out, "<div class=\"layer\"><p class=\"label\">{}:</p>", esc(heading));
    out.push_str("<ul class=\"bullets\">");
    for component in &layer.components {
        let _ = write!(out, "<li>{}</li>", esc(component));
    }
    let _ = write!(
        out,
        "<li class=\"technologies\">Technologies: {}</li></ul></div>",
        esc(&layer.technologies.join(", "))
    );
}

fn render_saas(out: &mut String, arch: &SaasArchitecture) {
    let _ = write!(
        out,
        "<div class=\"saas\"><p class=\"prose\">{}</p>\
<p><strong>Cloud Provider Focus:</strong> {}</p>\
<p class=\"prose\"><strong>Scalability, Resilience &amp; Cost-effectiveness:</strong> {}</p>\
<h4>Key Components:</h4><div class=\"layers\">",
        esc(&arch.overview),
        esc(&arch.cloud_provider_focus),
        esc(&arch.scalability_resilience_cost)
    );
    for (heading, layer) in arch.layers() {
        render_layer(out, heading, layer);
    }
    let _ = write!(
        out,
        "<div class=\"layer\"><p class=\"label\">Data Storage:</p><p>Strategy: {}</p>\
<ul class=\"bullets\"><li class=\"technologies\">Technologies: {}</li></ul></div></div></div>",
        esc(&arch.data_storage.strategy),
        esc(&arch.data_storage.technologies.join(", "))
    );
}

fn render_script(out: &mut String, script: &ScriptOutline) {
    let _ = write!(
        out,
        "<div class=\"script\"><h4>{}</h4><p class=\"prose\">{}</p>",
        esc(&script.name),
        esc(&script.description)
    );
    labeled_list(out, "Key Functions:", "functions", &script.key_functions);
    let _ = write!(
        out,
        "<p><strong>Input/Output:</strong> {}</p>",
        esc(&script.input_output)
    );
    labeled_list(out, "Dependencies:", "dependencies", &script.dependencies);
    if !script.optimizations().is_empty() {
        labeled_list(
            out,
            "Potential Optimizations:",
            "optimizations",
            script.optimizations(),
        );
    }
    out.push_str("</div>");
}

fn render_feedback(out: &mut String, feedback: &BrandFeedback) {
    let brand = BrandLabel::from_label(&feedback.brand_name);
    let _ = write!(
        out,
        "<div class=\"card feedback\"><h4 class=\"{}\">{} Feedback Summary</h4>\
<p><strong>Overall Sentiment:</strong> {}</p>",
        brand_class(brand),
        esc(&feedback.brand_name),
        esc(&feedback.overall_sentiment)
    );
    labeled_list(out, "Key Positive Points:", "pros", &feedback.key_positive_points);
    labeled_list(out, "Key Negative Points:", "cons", &feedback.key_negative_points);
    labeled_list(out, "Recommendations:", "stack", &feedback.recommendations);
    out.push_str("</div>");
}

fn render_brand_comparison(out: &mut String, sim: &BrandComparisonSimulation) {
    out.push_str("<div class=\"brand-comparison\"><h4>Focus Group Participants:</h4><div class=\"participants\">");
    for participant in &sim.participants {
        let _ = write!(
            out,
            "<div class=\"participant\"><p class=\"name\">{}</p><p class=\"persona\">{}</p>\
<p class=\"location\">{}</p></div>",
            esc(&participant.name),
            esc(&participant.persona),
            esc(&participant.location)
        );
    }
    out.push_str("</div><h4>Simulated Dialogue Log:</h4><div class=\"dialogue\">");
    for entry in &sim.dialogue_log {
        let _ = write!(
            out,
            "<p><span class=\"timestamp\">{}</span> <strong class=\"{}\">{}:</strong> {}</p>",
            esc(&entry.timestamp),
            brand_class(entry.brand_reacted_to),
            esc(&entry.participant_name),
            esc(&entry.dialogue)
        );
    }
    out.push_str("</div><div class=\"feedback-pair\">");
    render_feedback(out, &sim.vertical_ai_analysis);
    render_feedback(out, &sim.vert_analysis);
    let _ = write!(
        out,
        "</div><div class=\"recommendation\"><h4>Overall Branding Recommendation:</h4>\
<p class=\"prose\">{}</p></div></div>",
        esc(&sim.overall_branding_recommendation)
    );
}

pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::from("<div class=\"analysis\">");
    for section in sections(result) {
        out.push_str(&render_section(&section));
    }
    out.push_str("</div>");
    out
}

pub fn render_skin(skin: &DashboardSkin, description: &str) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"skin skin-{}\"><header><h2>{}</h2><div class=\"actions\"><span>{}</span>",
        skin.theme,
        esc(skin.platform_name),
        esc(skin.greeting)
    );
    for button in skin.header_buttons {
        let _ = write!(out, "<button type=\"button\">{}</button>", esc(button));
    }
    out.push_str("</div></header><div class=\"skin-body\"><nav>");
    for (idx, item) in skin.nav_items.iter().enumerate() {
        let class = if idx == skin.active_nav { "nav-item active" } else { "nav-item" };
        let _ = write!(out, "<div class=\"{class}\">{}</div>", esc(item));
    }
    let _ = write!(
        out,
        "</nav><main><h3>{}</h3><p class=\"description\">{}</p><div class=\"cards\">\
<div class=\"card\"><h4>{}</h4>",
        esc(skin.heading),
        esc(description),
        esc(skin.metrics_title)
    );
    for (label, value) in skin.metrics {
        let _ = write!(out, "<p>{}: <strong>{}</strong></p>", esc(label), esc(value));
    }
    let _ = write!(
        out,
        "</div><div class=\"card\"><h4>{}</h4><div class=\"map\">{}</div></div>\
<div class=\"card\"><h4>{}</h4><ul class=\"bullets\">",
        esc(skin.flow_title),
        esc(skin.flow_placeholder),
        esc(skin.alerts_title)
    );
    for alert in skin.alerts {
        let _ = write!(out, "<li>{}</li>", esc(alert));
    }
    out.push_str("</ul></div></div></main></div></div>");
    out
}

/// Rendering for `mode`; brand modes without a description show the full analysis.
pub fn render_mode(result: &AnalysisResult, mode: DisplayMode) -> String {
    if let Some(brand) = mode.brand() {
        if let Some(description) = result.layout_description(brand) {
            return render_skin(skin(brand), description);
        }
    }
    render_analysis(result)
}

#[cfg(test)]
mod tests {
    use super::{render_analysis, render_mode, render_section};
    use crate::analysis::fixtures::sample_result;
    use crate::output::{Section, SectionContent, PLACEHOLDER};
    use crate::view::DisplayMode;

    #[test]
    fn full_analysis_has_no_placeholders() {
        let html = render_analysis(&sample_result());
        assert!(!html.contains(PLACEHOLDER));
        assert!(html.contains("<h2>Executive Summary</h2>"));
        assert!(html.contains("Manufacturing Industry"));
        assert!(html.contains("badge tier-favorable\">82%"));
        assert!(html.contains("badge tier-unfavorable\">35%"));
        assert!(html.contains("hat hat-green"));
        assert!(html.contains("Potential Optimizations:"));
        assert!(html.contains("Scalability, Resilience &amp; Cost-effectiveness"));
    }

    #[test]
    fn blank_sections_render_placeholder() {
        let html = render_section(&Section {
            title: "Code Sequencing",
            content: SectionContent::Text("   "),
        });
        assert!(html.contains(PLACEHOLDER));
    }

    #[test]
    fn escapes_model_text() {
        let mut result = sample_result();
        result.executive_summary = "<script>alert(1)</script>".to_string();
        let html = render_analysis(&result);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn dialogue_names_are_tinted_by_brand() {
        let html = render_analysis(&sample_result());
        assert!(html.contains("<strong class=\"brand-vertical-ai\">Dana:</strong>"));
        assert!(html.contains("<strong class=\"brand-vert\">Marcus:</strong>"));
        assert!(html.contains("<strong class=\"brand-neutral\">Dana:</strong>"));
    }

    #[test]
    fn brand_skin_embeds_the_exact_description() {
        let result = sample_result();
        let html = render_mode(&result, DisplayMode::BrandA);
        assert!(html.contains("Vertical AI Platform"));
        assert!(html.contains(&result.vertical_ai_layout_description));
        assert!(!html.contains("<h2>Executive Summary</h2>"));

        let html = render_mode(&result, DisplayMode::BrandB);
        assert!(html.contains("Vert Vibes"));
        assert!(html.contains(&result.vert_layout_description));
    }

    #[test]
    fn brand_mode_without_description_shows_analysis() {
        let mut result = sample_result();
        result.vertical_ai_layout_description.clear();
        let html = render_mode(&result, DisplayMode::BrandA);
        assert!(html.contains("<h2>Executive Summary</h2>"));
        assert!(!html.contains("Vertical AI Platform"));
    }
}
