use std::fmt::Write;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::analysis::{
    AnalysisResult, BrandComparisonSimulation, BrandLabel, FrameworkComparison, Hat,
    LikelihoodTier, SaasArchitecture, ScriptOutline, SimulationResult, SixHatEntry,
};
use crate::output::{sections, skin, DashboardSkin, Section, SectionContent, PLACEHOLDER};
use crate::view::DisplayMode;

fn new_table(color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table
}

fn tier_color(tier: LikelihoodTier) -> Color {
    match tier {
        LikelihoodTier::Favorable => Color::Green,
        LikelihoodTier::Uncertain => Color::Yellow,
        LikelihoodTier::Unfavorable => Color::Red,
    }
}

fn hat_color(hat: Hat) -> Color {
    match hat {
        Hat::White => Color::White,
        Hat::Red => Color::Red,
        Hat::Black => Color::DarkGrey,
        Hat::Yellow => Color::Yellow,
        Hat::Green => Color::Green,
        Hat::Blue => Color::Blue,
    }
}

fn brand_color(brand: Option<BrandLabel>) -> Option<Color> {
    match brand {
        Some(BrandLabel::VerticalAi) => Some(Color::Blue),
        Some(BrandLabel::Vert) => Some(Color::Green),
        None => None,
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading(out: &mut String, title: &str, underline: char) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", underline.to_string().repeat(title.chars().count()));
}

pub fn render_section(section: &Section<'_>, color: bool) -> String {
    let mut out = String::new();
    heading(&mut out, section.title, '=');
    if section.content.is_blank() {
        let _ = writeln!(out, "{PLACEHOLDER}");
        return out;
    }
    match section.content {
        SectionContent::Text(text) | SectionContent::Markdown(text) => {
            let _ = writeln!(out, "{}", text.trim_end());
        }
        SectionContent::Frameworks(items) => render_frameworks(&mut out, items, color),
        SectionContent::Simulations(items) => render_simulations(&mut out, items, color),
        SectionContent::SixHats(items) => render_six_hats(&mut out, items, color),
        SectionContent::Saas(arch) => render_saas(&mut out, arch, color),
        SectionContent::Script(script) => render_script(&mut out, script),
        SectionContent::BrandComparison(sim) => render_brand_comparison(&mut out, sim, color),
    }
    out
}

fn render_frameworks(out: &mut String, comparisons: &[FrameworkComparison], color: bool) {
    for comparison in comparisons {
        heading(out, &format!("{} Industry", comparison.industry), '-');
        let [first, second] = comparison.frameworks();
        let mut table = new_table(color);
        table.set_header(vec!["", first.name.as_str(), second.name.as_str()]);
        table.add_row(vec![
            "Description",
            first.description.as_str(),
            second.description.as_str(),
        ]);
        table.add_row(Row::from(vec![
            Cell::new("Pros").fg(Color::Green),
            Cell::new(bullets(&first.pros)),
            Cell::new(bullets(&second.pros)),
        ]));
        table.add_row(Row::from(vec![
            Cell::new("Cons").fg(Color::Red),
            Cell::new(bullets(&first.cons)),
            Cell::new(bullets(&second.cons)),
        ]));
        table.add_row(Row::from(vec![
            Cell::new("Tech Stack").fg(Color::Magenta),
            Cell::new(bullets(&first.tech_stack)),
            Cell::new(bullets(&second.tech_stack)),
        ]));
        let _ = writeln!(out, "{table}");
    }
}

fn render_simulations(out: &mut String, simulations: &[SimulationResult], color: bool) {
    let mut table = new_table(color);
    table.set_header(vec![
        "Industry",
        "Framework",
        "Path",
        "Likelihood",
        "Outcome Summary",
    ]);
    for sim in simulations {
        table.add_row(Row::from(vec![
            Cell::new(&sim.industry),
            Cell::new(&sim.framework),
            Cell::new(&sim.path),
            Cell::new(format!("{}%", sim.likelihood)).fg(tier_color(sim.tier())),
            Cell::new(&sim.outcome_summary),
        ]));
    }
    let _ = writeln!(out, "{table}");
}

fn render_six_hats(out: &mut String, entries: &[SixHatEntry], color: bool) {
    let mut table = new_table(color);
    table.set_header(vec!["Hat", "Focus", "Summary"]);
    for entry in entries {
        table.add_row(Row::from(vec![
            Cell::new(entry.hat.label()).fg(hat_color(entry.hat)),
            Cell::new(&entry.focus),
            Cell::new(&entry.summary),
        ]));
    }
    let _ = writeln!(out, "{table}");
}

fn render_saas(out: &mut String, arch: &SaasArchitecture, color: bool) {
    let _ = writeln!(out, "{}\n", arch.overview.trim_end());
    let _ = writeln!(out, "Cloud Provider Focus: {}", arch.cloud_provider_focus);
    let _ = writeln!(
        out,
        "Scalability, Resilience & Cost-effectiveness: {}\n",
        arch.scalability_resilience_cost
    );
    let mut table = new_table(color);
    table.set_header(vec!["Key Component", "Details", "Technologies"]);
    for (name, layer) in arch.layers() {
        table.add_row(vec![
            name.to_string(),
            bullets(&layer.components),
            layer.technologies.join(", "),
        ]);
    }
    table.add_row(vec![
        "Data Storage".to_string(),
        format!("Strategy: {}", arch.data_storage.strategy),
        arch.data_storage.technologies.join(", "),
    ]);
    let _ = writeln!(out, "{table}");
}

fn render_script(out: &mut String, script: &ScriptOutline) {
    heading(out, &script.name, '-');
    let _ = writeln!(out, "{}\n", script.description.trim_end());
    let _ = writeln!(out, "Key Functions:\n{}\n", bullets(&script.key_functions));
    let _ = writeln!(out, "Input/Output: {}\n", script.input_output);
    let _ = writeln!(out, "Dependencies:\n{}", bullets(&script.dependencies));
    if !script.optimizations().is_empty() {
        let _ = writeln!(
            out,
            "\nPotential Optimizations:\n{}",
            bullets(script.optimizations())
        );
    }
}

fn render_brand_comparison(out: &mut String, sim: &BrandComparisonSimulation, color: bool) {
    heading(out, "Focus Group Participants", '-');
    let mut table = new_table(color);
    table.set_header(vec!["Name", "Persona", "Location"]);
    for participant in &sim.participants {
        table.add_row(vec![
            participant.name.as_str(),
            participant.persona.as_str(),
            participant.location.as_str(),
        ]);
    }
    let _ = writeln!(out, "{table}\n");

    heading(out, "Simulated Dialogue Log", '-');
    let mut table = new_table(color);
    table.set_header(vec!["Time", "Participant", "Dialogue"]);
    for entry in &sim.dialogue_log {
        let mut name = Cell::new(&entry.participant_name);
        if let Some(tint) = brand_color(entry.brand_reacted_to) {
            name = name.fg(tint);
        }
        table.add_row(Row::from(vec![
            Cell::new(&entry.timestamp),
            name,
            Cell::new(&entry.dialogue),
        ]));
    }
    let _ = writeln!(out, "{table}\n");

    let (a, b) = (&sim.vertical_ai_analysis, &sim.vert_analysis);
    let mut table = new_table(color);
    table.set_header(vec![
        "Feedback Summary".to_string(),
        a.brand_name.clone(),
        b.brand_name.clone(),
    ]);
    table.add_row(vec![
        "Overall Sentiment".to_string(),
        a.overall_sentiment.clone(),
        b.overall_sentiment.clone(),
    ]);
    table.add_row(vec![
        "Key Positive Points".to_string(),
        bullets(&a.key_positive_points),
        bullets(&b.key_positive_points),
    ]);
    table.add_row(vec![
        "Key Negative Points".to_string(),
        bullets(&a.key_negative_points),
        bullets(&b.key_negative_points),
    ]);
    table.add_row(vec![
        "Recommendations".to_string(),
        bullets(&a.recommendations),
        bullets(&b.recommendations),
    ]);
    let _ = writeln!(out, "{table}\n");

    let _ = writeln!(
        out,
        "Overall Branding Recommendation:\n{}",
        sim.overall_branding_recommendation.trim_end()
    );
}

pub fn render_analysis(result: &AnalysisResult, color: bool) -> String {
    sections(result)
        .iter()
        .map(|section| render_section(section, color))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_skin(skin: &DashboardSkin, description: &str, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}    {}    [{}]",
        skin.platform_name,
        skin.greeting,
        skin.header_buttons.join("] [")
    );
    let nav = skin
        .nav_items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            if idx == skin.active_nav {
                format!("> {item} <")
            } else {
                item.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{nav}\n");
    heading(&mut out, skin.heading, '=');
    let _ = writeln!(out, "{}\n", description.trim_end());

    let mut table = new_table(color);
    table.set_header(vec![skin.metrics_title, skin.flow_title, skin.alerts_title]);
    let metrics = skin
        .metrics
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    let alerts = skin
        .alerts
        .iter()
        .map(|alert| format!("• {alert}"))
        .collect::<Vec<_>>()
        .join("\n");
    table.add_row(vec![metrics, format!("[{}]", skin.flow_placeholder), alerts]);
    let _ = writeln!(out, "{table}");
    out
}

pub fn render_mode(result: &AnalysisResult, mode: DisplayMode, color: bool) -> String {
    if let Some(brand) = mode.brand() {
        if let Some(description) = result.layout_description(brand) {
            return render_skin(skin(brand), description, color);
        }
    }
    render_analysis(result, color)
}
