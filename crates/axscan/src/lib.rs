//! axscan
//!
//! Accessibility audit engine. Scans a document subtree against a fixed set
//! of rules and reports each violation with a locator a person can use to
//! find the element in their markup.
//!
//! Rules, in evaluation order:
//! - images must carry `alt`
//! - links need `href` or `role=button`, then accessible text
//! - buttons need accessible text
//! - labels must resolve to a control
//! - text-like inputs need a label or `aria-label`
//! - iframes must not disable scrolling
//! - configured selectors must carry their required attributes
//!
//! Hidden content is exempt from the link, button, label, and input rules.
//!
//! ```
//! use axscan::{scan_collect, ScanConfig};
//! use axscan_html::HtmlParser;
//!
//! let doc = HtmlParser::new().parse("<button></button>");
//! let found = scan_collect(doc.tree(), doc.tree().root(), &ScanConfig::default()).unwrap();
//! assert_eq!(found[0].name(), "ButtonWithoutLabelError");
//! ```

pub mod annotate;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod locator;
pub mod rules;
pub mod scanner;
pub mod text;
pub mod visibility;

pub use annotate::annotate;
pub use config::{AriaPair, AriaPairs, ScanConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{ConfigError, ScanError, ScanResult};
pub use locator::{inspect, locator_path, selector_component, DEFAULT_HOOK_PREFIX};
pub use rules::RuleCategory;
pub use scanner::{scan, scan_collect, Scanner};
pub use text::has_accessible_text;
pub use visibility::is_hidden;
