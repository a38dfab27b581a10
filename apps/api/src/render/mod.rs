//! Turns the model's HTML answer into markup that is safe to drop into the page.
//!
//! The completion endpoint is asked for an HTML fragment and whatever comes back
//! is attacker-influenced (the prompt embeds free user text). `Sanitized` strips
//! scripts, event handlers and `javascript:` URLs while keeping the tables, lists
//! and inline styles the prompts ask for. `Trusted` passes the fragment through
//! untouched and must be opted into explicitly.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Sanitized,
    Trusted,
}

impl FromStr for RenderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sanitized" | "safe" => Ok(RenderMode::Sanitized),
            "trusted" | "raw" => Ok(RenderMode::Trusted),
            other => anyhow::bail!("RENDER_MODE must be 'sanitized' or 'trusted', got '{other}'"),
        }
    }
}

/// Produces the markup shown in the result container.
pub fn render_html(raw: &str, mode: RenderMode) -> String {
    match mode {
        RenderMode::Trusted => raw.to_string(),
        RenderMode::Sanitized => sanitize(raw),
    }
}

fn sanitize(raw: &str) -> String {
    // ammonia's defaults already cover tables, lists, headings and inline
    // formatting. The prompts rely on inline styles for colours and gradients.
    ammonia::Builder::default()
        .add_tags(&["caption", "col", "colgroup", "meter", "progress"])
        .add_generic_attributes(&["style", "align", "width", "colspan", "rowspan"])
        .add_tag_attributes("meter", &["value", "min", "max", "low", "high", "optimum"])
        .add_tag_attributes("progress", &["value", "max"])
        .clean(raw)
        .to_string()
}
