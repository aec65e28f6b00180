//! axscan CLI
//!
//! Scans HTML files for accessibility violations. Exit status is 0 when
//! clean, 1 when violations were found, and 2 when a file or config could
//! not be processed.

mod report;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use axscan::{annotate, AriaPairs, Diagnostic, ScanConfig, Scanner};
use axscan_dom::{Document, DomTree, ElementQuery, NodeId};
use axscan_html::{get_outer_html, HtmlParser};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use report::{FileReport, Format};

#[derive(Parser)]
#[command(
    name = "axscan",
    version,
    about = "Accessibility audit for HTML documents",
    long_about = "Checks images, links, buttons, labels, text inputs, iframes, and \
                  configured ARIA attribute pairs. Use `-` to read a document from stdin."
)]
struct Cli {
    /// HTML files to scan
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Add the recommended `js-` widget attribute pairs ahead of configured ones
    #[arg(long)]
    recommended: bool,

    /// Class prefix shown in locator paths
    #[arg(long, value_name = "PREFIX")]
    hook_prefix: Option<String>,

    /// Only scan subtrees matching this selector
    #[arg(short, long)]
    selector: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Print each document with data-error annotations instead of a report
    #[arg(long)]
    annotate: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Scan every input and print the report; returns the violation count
fn run(cli: &Cli) -> Result<usize> {
    let config = build_config(cli)?;
    let parser = HtmlParser::new();
    let mut reports = Vec::with_capacity(cli.files.len());
    let mut stdout = std::io::stdout().lock();

    for path in &cli.files {
        let mut document = read_document(&parser, path)?;
        let name = display_name(path);

        let diagnostics = scan_document(document.tree(), cli.selector.as_deref(), &config)
            .with_context(|| format!("failed to scan {name}"))?;
        tracing::debug!(file = %name, violations = diagnostics.len(), "Scanned");
        reports.push(FileReport::new(
            name.as_str(),
            document.tree(),
            &diagnostics,
            &config.hook_class_prefix,
        ));

        if cli.annotate {
            annotate(document.tree_mut(), &diagnostics)
                .with_context(|| format!("failed to annotate {name}"))?;
            let tree = document.tree();
            writeln!(stdout, "{}", get_outer_html(tree, tree.root()))?;
        }
    }

    if !cli.annotate {
        let rendered = report::render(&reports, cli.format).context("failed to render report")?;
        stdout.write_all(rendered.as_bytes())?;
    }
    stdout.flush()?;

    Ok(report::violation_count(&reports))
}

/// Config file first, recommended pairs in front of it, flags last
fn build_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    if cli.recommended {
        let mut pairs = AriaPairs::recommended();
        pairs.extend(std::mem::take(&mut config.aria_pairs));
        config.aria_pairs = pairs;
    }
    if let Some(prefix) = &cli.hook_prefix {
        config.hook_class_prefix = prefix.clone();
    }

    Ok(config)
}

fn read_document(parser: &HtmlParser, path: &Path) -> Result<Document> {
    if path == Path::new("-") {
        let stdin = std::io::stdin().lock();
        return Ok(parser.parse_reader(stdin, "<stdin>")?);
    }
    Ok(parser.parse_file(path)?)
}

fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn scan_document(tree: &DomTree, selector: Option<&str>, config: &ScanConfig) -> Result<Vec<Diagnostic>> {
    let scanner = Scanner::new(tree, config)?;
    let mut diagnostics = Vec::new();
    for root in scan_roots(tree, selector)? {
        scanner.scan(root, |d| diagnostics.push(d))?;
    }
    Ok(diagnostics)
}

/// Roots to scan: the whole document, or the outermost selector matches
/// (a match nested in another is already covered by it)
fn scan_roots(tree: &DomTree, selector: Option<&str>) -> Result<Vec<NodeId>> {
    let Some(selector) = selector else {
        return Ok(vec![tree.root()]);
    };

    let matched = tree
        .query_selector_all(tree.root(), selector)
        .with_context(|| format!("invalid --selector `{selector}`"))?;
    let outermost = matched
        .iter()
        .copied()
        .filter(|&id| {
            !matched
                .iter()
                .any(|&other| other != id && tree.is_inclusive_ancestor(other, id))
        })
        .collect();
    Ok(outermost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("axscan").chain(args.iter().copied()))
    }

    #[test]
    fn test_recommended_precedes_file_pairs() {
        let mut config = ScanConfig::default();
        config.aria_pairs.insert(".js-tab", vec!["aria-selected".into()]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axscan.json");
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let args = cli(&["--recommended", "--config", path.to_str().unwrap(), "--hook-prefix", "hook-", "a.html"]);
        let built = build_config(&args).unwrap();
        let order: Vec<_> = built.aria_pairs.iter().map(|p| p.selector.as_str()).collect();
        assert_eq!(order, [".js-menu-target", ".js-details-target", ".js-tab"]);
        assert_eq!(built.hook_class_prefix, "hook-");
    }

    #[test]
    fn test_scan_roots_outermost_only() {
        let doc = HtmlParser::new().parse(
            "<section class='s'><section class='s'><img></section></section><section class='s'></section>",
        );
        let tree = doc.tree();
        let roots = scan_roots(tree, Some("section.s")).unwrap();
        assert_eq!(roots.len(), 2);

        let found = scan_document(tree, Some("section.s"), &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_scan_roots_default_and_invalid() {
        let doc = HtmlParser::new().parse("<p></p>");
        assert_eq!(scan_roots(doc.tree(), None).unwrap(), [doc.tree().root()]);
        assert!(scan_roots(doc.tree(), Some("p:first-child")).is_err());
    }

    #[test]
    fn test_verbose_counts() {
        assert_eq!(cli(&["-vv", "a.html"]).verbose, 2);
        assert_eq!(cli(&["a.html"]).format, Format::Text);
        assert_eq!(cli(&["--format", "json", "a.html"]).format, Format::Json);
    }
}
