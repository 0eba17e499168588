//! Report formatting and printing utilities.
//!
//! Kept out of `core` so hooklens can be used as a library without any
//! terminal output.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{AnalysisReport, ComponentInfo, Diagnostic, Location};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print every component as a text block, followed by a summary line.
pub fn print_text(report: &AnalysisReport) {
    print_text_to(report, &mut io::stdout().lock());
}

pub fn print_text_to<W: Write>(report: &AnalysisReport, writer: &mut W) {
    for component in &report.components {
        print_component(component, writer);
        let _ = writeln!(writer);
    }
    print_summary_to(report, writer);
}

/// Print the components as a pretty JSON array.
pub fn print_json(report: &AnalysisReport) -> Result<()> {
    print_json_to(report, &mut io::stdout().lock())
}

pub fn print_json_to<W: Write>(report: &AnalysisReport, writer: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(&report.components)
        .context("Failed to serialize components")?;
    writeln!(writer, "{}", json).context("Failed to write output")?;
    Ok(())
}

pub fn print_summary_to<W: Write>(report: &AnalysisReport, writer: &mut W) {
    let files = report.files_analyzed;
    let components = report.components.len();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Analyzed {} {} - {} {} found",
            files,
            if files == 1 { "file" } else { "files" },
            components,
            if components == 1 { "component" } else { "components" }
        )
        .green()
    );
}

/// Print recovered per-file failures to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic], verbose: bool) {
    print_diagnostics_to(diagnostics, verbose, &mut io::stderr().lock());
}

/// In verbose mode every diagnostic is listed; otherwise only a count.
pub fn print_diagnostics_to<W: Write>(diagnostics: &[Diagnostic], verbose: bool, writer: &mut W) {
    if diagnostics.is_empty() {
        return;
    }
    if verbose {
        for diagnostic in diagnostics {
            let _ = writeln!(
                writer,
                "{} {} {}  {}",
                "warning:".bold().yellow(),
                diagnostic.file_path,
                diagnostic.message,
                format!("[{}]", diagnostic.kind.as_str()).dimmed().cyan()
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be fully analyzed (use {} for details)",
            "warning:".bold().yellow(),
            diagnostics.len(),
            "-v".cyan()
        );
    }
}

/// Print a warning when the cancellation flag stopped the batch early.
pub fn print_cancelled_to<W: Write>(report: &AnalysisReport, writer: &mut W) {
    if report.cancelled {
        let _ = writeln!(
            writer,
            "{} analysis cancelled after {} file(s)",
            "warning:".bold().yellow(),
            report.files_analyzed
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_component<W: Write>(component: &ComponentInfo, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}  {} {}",
        component.name.bold(),
        "-->".blue(),
        component.file_path
    );
    if let Some(description) = &component.description {
        let _ = writeln!(writer, "  {}", description.dimmed());
    }

    if !component.hooks.is_empty() {
        section(writer, "hooks");
        let width = max_width(component.hooks.iter().map(|h| h.name.as_str()));
        for hook in &component.hooks {
            let mut line = format!(
                "{}  {}",
                pad(&hook.name, width),
                location(hook.call_location)
            );
            if let Some(deps) = &hook.dependencies {
                line.push_str(&format!("  deps [{}]", deps.join(", ")));
            }
            if let Some(value) = &hook.value {
                line.push_str(&format!("  = {}", value));
            }
            let _ = writeln!(writer, "    {}", line);
        }
    }

    if !component.states.is_empty() {
        section(writer, "states");
        for state in &component.states {
            let mut line = format!("{} / {}", state.name, state.setter);
            if let Some(initial) = &state.initial_value {
                line.push_str(&format!(" = {}", initial));
            }
            if let Some(count) = state.usage_count {
                line.push_str(&format!("  ({} {})", count, plural(count, "use", "uses")));
            }
            let _ = writeln!(writer, "    {}", line);
        }
    }

    if !component.contexts.is_empty() {
        section(writer, "contexts");
        for context in &component.contexts {
            let locations: Vec<String> = context
                .usage_locations
                .iter()
                .map(|loc| location(*loc))
                .collect();
            let mut line = format!("{}  {}", context.name, locations.join(", "));
            if let Some(value) = &context.value {
                line.push_str(&format!("  = {}", value));
            }
            let _ = writeln!(writer, "    {}", line);
        }
    }

    if !component.store_usage.is_empty() {
        section(writer, "stores");
        for store in &component.store_usage {
            let _ = writeln!(writer, "    {}", store.kind.as_str().cyan());
            for selector in &store.selectors {
                let _ = writeln!(writer, "      selector {}", selector);
            }
            for action in &store.actions {
                let _ = writeln!(writer, "      action   {}", action);
            }
        }
    }

    if !component.props.is_empty() {
        section(writer, "props");
        let width = max_width(component.props.iter().map(|p| p.name.as_str()));
        for prop in &component.props {
            let marker = if prop.required { " " } else { "?" };
            let mut line = format!("{}{} {}", pad(&prop.name, width), marker, prop.prop_type);
            if let Some(default) = &prop.default_value {
                line.push_str(&format!(" = {}", default));
            }
            if let Some(description) = &prop.description {
                line.push_str(&format!("  {}", description.dimmed()));
            }
            let _ = writeln!(writer, "    {}", line);
        }
    }
}

fn section<W: Write>(writer: &mut W, title: &str) {
    let _ = writeln!(writer, "  {}", format!("{}:", title).bold());
}

fn location(loc: Location) -> String {
    format!("{}:{}", loc.line, loc.column)
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn max_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// Right-pad by display width so wide characters line up.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}
