//! Report rendering

use std::fmt::Write as _;

use axscan::{locator_path, Diagnostic, DiagnosticKind};
use axscan_dom::DomTree;
use clap::ValueEnum;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per violation plus a summary
    Text,
    /// Pretty-printed JSON array, one object per file
    Json,
}

/// Violations found in one input file
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub diagnostics: Vec<ReportEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub kind: DiagnosticKind,
    pub wcag: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_attributes: Vec<String>,
    /// Locator path without the element markup
    pub locator: String,
}

impl FileReport {
    pub fn new(file: impl Into<String>, tree: &DomTree, diagnostics: &[Diagnostic], hook_prefix: &str) -> Self {
        let diagnostics = diagnostics
            .iter()
            .map(|d| ReportEntry {
                kind: d.kind,
                wcag: d.kind.wcag_criterion(),
                message: d.message.clone(),
                missing_attributes: d.missing_attributes.clone(),
                locator: locator_path(tree, d.element, hook_prefix),
            })
            .collect();

        Self {
            file: file.into(),
            diagnostics,
        }
    }
}

/// Total violations across reports
pub fn violation_count(reports: &[FileReport]) -> usize {
    reports.iter().map(|r| r.diagnostics.len()).sum()
}

pub fn render(reports: &[FileReport], format: Format) -> serde_json::Result<String> {
    match format {
        Format::Text => Ok(render_text(reports)),
        Format::Json => render_json(reports),
    }
}

/// `file: KindName: message` per violation, then a summary line
pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for entry in &report.diagnostics {
            let _ = writeln!(out, "{}: {}: {}", report.file, entry.kind, entry.message);
        }
    }

    let total = violation_count(reports);
    let files = reports.iter().filter(|r| !r.diagnostics.is_empty()).count();
    let _ = writeln!(
        out,
        "{} violation{} in {} of {} file{}",
        total,
        if total == 1 { "" } else { "s" },
        files,
        reports.len(),
        if reports.len() == 1 { "" } else { "s" },
    );
    out
}

pub fn render_json(reports: &[FileReport]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(reports)?;
    json.push('\n');
    Ok(json)
}
