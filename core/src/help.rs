//! Help text rendering for an option table.

use crate::config::ParserConfig;
use crate::grammar::OptionTable;
use crate::types::OptionSpec;

/// Renders a usage line followed by one aligned row per option.
///
/// # Examples
///
/// ```
/// use optgroup_core::{OptionTable, ParserConfig, render_help};
///
/// let table: OptionTable = "! -i --input <string> | Input file\n?^1 -q | Quiet".parse().unwrap();
/// let help = render_help(&table, &ParserConfig::default().with_program_name("tool"));
///
/// assert!(help.starts_with("Usage: tool [OPTIONS] [ARGS]..."));
/// assert!(help.contains("-i, --input <string>"));
/// assert!(help.contains("Input file (required)"));
/// assert!(help.contains("Quiet (XOR group 1)"));
/// ```
pub fn render_help(table: &OptionTable, config: &ParserConfig) -> String {
    let program = config.program_name.as_deref().unwrap_or("program");
    let mut out = format!("Usage: {program} [OPTIONS] [ARGS]...\n");

    if table.is_empty() {
        return out;
    }

    let rows: Vec<(String, String)> = table
        .iter()
        .map(|(_, spec)| (signature(spec), description(spec)))
        .collect();
    let width = rows.iter().map(|(sig, _)| sig.chars().count()).max().unwrap_or(0);

    out.push_str("\nOptions:\n");
    for (sig, desc) in rows {
        if desc.is_empty() {
            out.push_str(&format!("  {sig}\n"));
        } else {
            out.push_str(&format!("  {sig:<width$}  {desc}\n"));
        }
    }
    out
}

fn signature(spec: &OptionSpec) -> String {
    let mut sig = spec.spellings.join(", ");
    if let Some(param) = &spec.param {
        sig.push_str(&format!(" <{}>", param.declared));
    }
    sig
}

fn description(spec: &OptionSpec) -> String {
    let mut notes = Vec::new();
    if !spec.optional {
        notes.push("required".to_string());
    }
    if !spec.unique {
        notes.push("repeatable".to_string());
    }
    if spec.group.is_numbered() {
        notes.push(spec.group.to_string());
    }

    match (spec.help.is_empty(), notes.is_empty()) {
        (true, true) => String::new(),
        (true, false) => format!("({})", notes.join(", ")),
        (false, true) => spec.help.clone(),
        (false, false) => format!("{} ({})", spec.help, notes.join(", ")),
    }
}
