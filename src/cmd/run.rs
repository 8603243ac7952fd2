use serde::Serialize;
use serde_json::{json, to_string, to_string_pretty, Value};
use tracing::trace_span;

use super::parser::{Command, OutputFormat, ToolOpts};
use crate::config::ViewerConfig;
use crate::inventory::{load_inventory, Result};
use crate::navigation::ViewerSession;
use crate::render::{to_dot, to_view};

fn format_json<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Concise => to_string(value)?,
        OutputFormat::Pretty | OutputFormat::Text => to_string_pretty(value)?,
    })
}

/// Resolve the effective config: file (if any) first, then command line.
pub fn effective_config(opts: &ToolOpts) -> Result<ViewerConfig> {
    let base = match &opts.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    Ok(base.merged_with(opts.config_overrides()))
}

/// Execute the command against already loaded inventory text and produce
/// what should be printed.
pub fn run_with_source(opts: &ToolOpts, config: &ViewerConfig, source: String) -> Result<String> {
    let span = trace_span!("run", cmd = ?opts.cmd);
    let _span_guard = span.enter();

    let mut session = ViewerSession::new(source, config.root_name(), config.build_options());
    if let Some(err) = session.error() {
        return Err(err.clone());
    }

    match &opts.cmd {
        Command::Graph => {
            let graph = session.graph().map(|g| g.to_json()).unwrap_or(Value::Null);
            format_json(&graph, opts.output_format)
        }
        Command::Elements { .. } => match session.graph() {
            Some(graph) => format_json(&to_view(graph, config.layout())?, opts.output_format),
            None => Ok(String::new()),
        },
        Command::Dot => Ok(session.graph().map(to_dot).unwrap_or_default()),
        Command::Select { id } => {
            let info = session.select(id);
            let panel = session.detail_panel();
            if opts.output_format == OutputFormat::Text {
                return Ok(panel.to_string());
            }
            format_json(
                &json!({ "selection": info, "panel": panel }),
                opts.output_format,
            )
        }
        Command::Find { label } => {
            let request = session.navigate_to_label(label);
            if opts.output_format == OutputFormat::Text {
                return Ok(match &request {
                    Some(_) => session.detail_panel().to_string(),
                    None => format!("No node labelled {:?}\n", label),
                });
            }
            format_json(&request, opts.output_format)
        }
    }
}

pub fn run(opts: &ToolOpts) -> Result<String> {
    let config = effective_config(opts)?;
    let source = load_inventory(&config.inventory_path())?;
    run_with_source(opts, &config, source)
}
