use panconf_core::{
    format_json, to_dict, to_flat, to_set_cli, write_nodes, Element, ForceList, JsonStyle,
};

use crate::classify::ConfigClassification;
use crate::error::PanConfigError;

/// Output formats the command line can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Xml,
    Json,
    Flat,
    SetCli,
}

/// Knobs shared by every renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub json_style: JsonStyle,
    pub flat_prefix: String,
    pub set_prefix: String,
    pub collapse_members: bool,
    pub forcelist: ForceList,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            json_style: JsonStyle::Pretty,
            flat_prefix: "./".to_string(),
            set_prefix: "set ".to_string(),
            collapse_members: false,
            forcelist: ForceList::default(),
        }
    }
}

/// Render already-selected nodes as text in one format.
///
/// Line-oriented formats are newline-joined; no nodes renders as an empty
/// string for every format except JSON, which renders an empty object.
pub fn render(
    nodes: &[&Element],
    kind: OutputKind,
    opts: &RenderOptions,
) -> Result<String, PanConfigError> {
    let text = match kind {
        OutputKind::Xml => write_nodes(nodes)?,
        OutputKind::Json => format_json(&to_dict(nodes, &opts.forcelist), opts.json_style)?,
        OutputKind::Flat => to_flat(nodes, &opts.flat_prefix).join("\n"),
        OutputKind::SetCli => {
            to_set_cli(nodes, &opts.set_prefix, opts.collapse_members).join("\n")
        }
    };
    Ok(text)
}

/// One-line `key=value` summary of a classification.
pub fn render_classification(classification: &ConfigClassification) -> String {
    fn flag(value: Option<bool>) -> &'static str {
        match value {
            Some(true) => "true",
            Some(false) => "false",
            None => "unknown",
        }
    }

    format!(
        "version={} panorama={} multi_vsys={}",
        classification.version.as_deref().unwrap_or("unknown"),
        flag(classification.is_orchestrator),
        flag(classification.has_multiple_vsys),
    )
}
