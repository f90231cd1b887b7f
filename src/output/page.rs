//! The single screen served by `serve`, assembled for every view state.

use std::fmt::Write;

use chrono::{Datelike, Utc};
use html_escape::encode_text;

use crate::output::html::render_mode;
use crate::view::{DisplayMode, ViewPhase, ViewState};

pub const BILLING_URL: &str = "https://ai.google.dev/gemini-api/docs/billing";
pub const LOADING_MESSAGE: &str = "Analyzing business models, comparing frameworks, running simulations, and crafting strategic insights...";

const STYLESHEET: &str = r#"
body{font-family:system-ui,sans-serif;background:#f9fafb;color:#1f2937;margin:0;padding:2rem}
header,footer{text-align:center}header h1{font-size:2.5rem;margin-bottom:.5rem}header h1 span{color:#2563eb}
main{max-width:72rem;margin:0 auto}section.analysis-section,.panel{background:#fff;border-radius:.5rem;box-shadow:0 4px 12px rgba(0,0,0,.08);padding:1.5rem;margin-bottom:2rem}
.prose{white-space:pre-wrap;line-height:1.6}.placeholder{color:#6b7280}pre.markdown{white-space:pre-wrap;background:#f3f4f6;padding:1rem;border-radius:.375rem}
.error{background:#fee2e2;border:1px solid #f87171;color:#b91c1c;padding:.75rem 1rem;border-radius:.375rem;margin-bottom:2rem}
.modes{display:flex;justify-content:center;gap:1rem;margin-bottom:2rem}.modes form{display:inline}
button{background:#e5e7eb;border:0;border-radius:9999px;padding:.5rem 1.5rem;font-weight:600;cursor:pointer}button.primary,.modes button.active{background:#2563eb;color:#fff}
.pair,.hats,.layers,.participants,.feedback-pair,.cards{display:grid;grid-template-columns:repeat(auto-fit,minmax(16rem,1fr));gap:1rem}
.card,.participant,.layer{border:1px solid #dbeafe;border-radius:.5rem;padding:1rem;background:#fff}
table.simulations{width:100%;border-collapse:collapse}table.simulations th{background:#2563eb;color:#fff;text-align:left;padding:.5rem}table.simulations td{padding:.5rem;border-bottom:1px solid #e5e7eb}
.badge{border-radius:9999px;padding:.125rem .75rem;font-size:.75rem;font-weight:600}.tier-favorable{background:#dcfce7;color:#166534}.tier-uncertain{background:#fef9c3;color:#854d0e}.tier-unfavorable{background:#fee2e2;color:#991b1b}
.hat{border-radius:.5rem;padding:1rem}.hat-white{background:#fff;border:1px solid #d1d5db}.hat-red{background:#ef4444;color:#fff}.hat-black{background:#1f2937;color:#fff}.hat-yellow{background:#facc15}.hat-green{background:#22c55e;color:#fff}.hat-blue{background:#3b82f6;color:#fff}
.brand-vertical-ai{color:#1d4ed8}.brand-vert{color:#15803d}.brand-neutral{color:#1f2937}.timestamp{color:#6b7280;font-size:.75rem}
.skin{border-radius:.5rem;overflow:hidden;box-shadow:0 4px 12px rgba(0,0,0,.12)}.skin header{display:flex;justify-content:space-between;align-items:center;padding:1rem;text-align:left}.skin .skin-body{display:flex}.skin nav{width:16rem;padding:1rem}.skin main{flex:1;padding:1.5rem}
.skin .nav-item{padding:.5rem .75rem;border-radius:.375rem}.skin .map{height:6rem;display:flex;align-items:center;justify-content:center;border-radius:.375rem}
.skin-corporate header{background:#1d4ed8;color:#fff}.skin-corporate nav{background:#1f2937;color:#e5e7eb}.skin-corporate .nav-item.active{background:#2563eb}.skin-corporate main{background:#f3f4f6}.skin-corporate .map{background:#e5e7eb;color:#6b7280}
.skin-relaxed header{background:#65a30d;color:#fefce8}.skin-relaxed nav{background:#ecfccb;color:#365314}.skin-relaxed .nav-item.active{background:#bef264}.skin-relaxed main{background:#fefce8}.skin-relaxed .map{background:#d9f99d;color:#4d7c0f}
"#;

fn post_button(action: &str, label: &str, class: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\"><button type=\"submit\" class=\"{class}\">{}</button></form>",
        encode_text(label)
    )
}

fn key_prompt() -> String {
    format!(
        "<div class=\"panel key-prompt\"><h2>API Key Required</h2>\
<p>To generate advanced AI business strategies, a valid Google Cloud API key is required. \
Please select an API key from a paid GCP project.</p>{}\
<p>Learn more about billing: <a href=\"{BILLING_URL}\" target=\"_blank\" rel=\"noopener noreferrer\">ai.google.dev/gemini-api/docs/billing</a></p></div>",
        post_button("/key/select", "Select Your API Key", "primary")
    )
}

fn idle_prompt() -> String {
    format!(
        "<div class=\"panel idle\"><h2>Ready to Generate Your AI Strategy?</h2>\
<p>Click the button below to initiate a comprehensive analysis based on your business needs.</p>{}</div>",
        post_button("/generate", "Generate AI Business Strategy", "primary")
    )
}

fn mode_switch(current: DisplayMode) -> String {
    let mut out = String::from("<div class=\"modes\">");
    for mode in DisplayMode::ALL {
        let class = if mode == current { "active" } else { "" };
        out.push_str(&post_button(
            &format!("/mode/{}", mode.as_slug()),
            mode.button_label(),
            class,
        ));
    }
    out.push_str(&post_button("/generate", "Regenerate", "primary"));
    out.push_str("</div>");
    out
}

/// Main area of the screen for `state`, without the surrounding document.
pub fn render_body(state: &ViewState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.last_error {
        let _ = write!(
            out,
            "<div class=\"error\" role=\"alert\"><strong>Error: </strong><span>{}</span></div>",
            encode_text(error)
        );
    }
    if state.environment_unavailable {
        return out;
    }
    match state.phase() {
        ViewPhase::AwaitingKey => out.push_str(&key_prompt()),
        ViewPhase::Loading => {
            let _ = write!(
                out,
                "<div class=\"panel loading\" aria-busy=\"true\"><p>{LOADING_MESSAGE}</p></div>"
            );
        }
        ViewPhase::Error if !state.is_key_selected => out.push_str(&key_prompt()),
        ViewPhase::Error => out.push_str(&post_button("/generate", "Try Again", "primary")),
        ViewPhase::Idle => out.push_str(&idle_prompt()),
        ViewPhase::Ready(mode) => {
            if let Some(result) = &state.analysis_result {
                out.push_str(&mode_switch(mode));
                out.push_str(&render_mode(result, mode));
            }
        }
    }
    out
}

pub fn render_page(state: &ViewState) -> String {
    let refresh = if state.is_loading {
        "<meta http-equiv=\"refresh\" content=\"3\">"
    } else {
        ""
    };
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">{refresh}\
<title>AI Business Strategy Generator</title><style>{STYLESHEET}</style></head><body>\
<header><h1>AI Business <span>Strategy Generator</span></h1>\
<p>Unlocking unparalleled insights and strategic roadmaps for AI integration to revolutionize your business.</p></header>\
<main>{}</main><footer>&copy; {} AI Business Strategy Generator. All rights reserved.</footer></body></html>",
        render_body(state),
        Utc::now().year()
    )
}
