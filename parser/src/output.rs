//! Output formatting for parsed records.

use keyref_core::Command;

use crate::driver::ParseStats;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
    /// Only the number of records.
    Count,
}

/// Formats records in the requested output format.
pub fn format_commands(commands: &[Command], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(commands)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(commands).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(commands_to_markdown(commands)),
        OutputFormat::Table => Ok(commands_to_table(commands)),
        OutputFormat::Count => Ok(commands.len().to_string()),
    }
}

/// Formats parse counters in the requested output format.
pub fn format_stats(stats: &ParseStats, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(stats)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(stats).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        _ => Ok(format!(
            "lines: {}  rows: {}  continuations: {}  rejected: {}  abandoned: {}  sections: {}",
            stats.lines_read,
            stats.data_rows,
            stats.continuation_rows,
            stats.rejected_rows,
            stats.abandoned_commands,
            stats.sections_entered.join(", ")
        )),
    }
}

fn commands_to_markdown(commands: &[Command]) -> String {
    let mut out = String::new();
    let mut current_mode: Option<&str> = None;

    for cmd in commands {
        if current_mode != Some(cmd.mode.as_str()) {
            if current_mode.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("## {}\n\n", cmd.mode));
            out.push_str("| Tag | Keys | Flags | Description |\n");
            out.push_str("|-----|------|-------|-------------|\n");
            current_mode = Some(cmd.mode.as_str());
        }
        let tag = cmd.tag.as_deref().unwrap_or("");
        let flags = cmd.flags.as_deref().unwrap_or("");
        out.push_str(&format!(
            "| {} | `{}` | {flags} | {} |\n",
            escape_cell(tag),
            escape_cell(&cmd.chars).replace('`', "\\`"),
            escape_cell(&cmd.description)
        ));
    }

    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn commands_to_table(commands: &[Command]) -> String {
    let mut out = String::new();

    let mode_width = commands.iter().map(|c| c.mode.len()).max().unwrap_or(0);
    let chars_width = commands
        .iter()
        .map(|c| c.chars.len())
        .max()
        .unwrap_or(0)
        .min(24);

    for cmd in commands {
        let marks = match (cmd.is_cursor_movement, cmd.is_undoable) {
            (true, true) => "12",
            (true, false) => "1 ",
            (false, true) => " 2",
            (false, false) => "  ",
        };
        out.push_str(&format!(
            "{:<mode_width$}  {:<chars_width$}  {marks}  {}\n",
            cmd.mode, cmd.chars, cmd.description
        ));
    }

    out
}
