//! Write diagnostics back onto the tree
//!
//! Marks each offending element with `data-error` (the error name) and
//! `data-error-message`. Runs after a scan; an element with several
//! diagnostics keeps the last one.

use axscan_dom::{DomResult, DomTree};

use crate::diagnostic::Diagnostic;

pub const ERROR_ATTRIBUTE: &str = "data-error";
pub const ERROR_MESSAGE_ATTRIBUTE: &str = "data-error-message";

/// Annotate every diagnosed element in `tree`
pub fn annotate(tree: &mut DomTree, diagnostics: &[Diagnostic]) -> DomResult<()> {
    for diagnostic in diagnostics {
        tree.set_attribute(diagnostic.element, ERROR_ATTRIBUTE, diagnostic.name())?;
        tree.set_attribute(diagnostic.element, ERROR_MESSAGE_ATTRIBUTE, &diagnostic.message)?;
    }
    tracing::debug!(annotated = diagnostics.len(), "Annotated diagnostics");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scan_collect, ScanConfig};
    use axscan_html::HtmlParser;

    #[test]
    fn test_annotate_after_scan() {
        let mut doc = HtmlParser::new().parse("<button class='js-go'></button><img alt='ok'>");
        let root = doc.tree().root();
        let found = scan_collect(doc.tree(), root, &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 1);

        annotate(doc.tree_mut(), &found).unwrap();
        let tree = doc.tree();
        let button = found[0].element;
        assert_eq!(tree.attribute(button, ERROR_ATTRIBUTE), Some("ButtonWithoutLabelError"));
        assert_eq!(
            tree.attribute(button, ERROR_MESSAGE_ATTRIBUTE),
            Some(found[0].message.as_str())
        );
        assert!(found[0].message.starts_with("Missing text or aria-label attribute on \"button.js-go\""));
    }

    #[test]
    fn test_annotate_is_not_rescanned() {
        let mut doc = HtmlParser::new().parse("<img>");
        let root = doc.tree().root();
        let config = ScanConfig::default();
        let found = scan_collect(doc.tree(), root, &config).unwrap();
        annotate(doc.tree_mut(), &found).unwrap();

        let again = scan_collect(doc.tree(), root, &config).unwrap();
        assert_eq!(again.len(), 1);
        assert_eq!(again[0].kind, found[0].kind);
    }
}
