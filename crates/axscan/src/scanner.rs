//! Traversal driver
//!
//! Runs every built-in category over a subtree, then the configured
//! attribute-pair rules, reporting failures through one callback in visit
//! order. A `Scanner` compiles the configured selectors once and can be
//! reused for any number of roots in the same tree.

use axscan_dom::{DomTree, ElementQuery, NodeId, SelectorList};

use crate::config::ScanConfig;
use crate::diagnostic::Diagnostic;
use crate::error::{ScanError, ScanResult};
use crate::locator::inspect;
use crate::rules::RuleCategory;

/// Compiled attribute-pair rule
#[derive(Debug)]
struct PairRule<'c> {
    selector: SelectorList,
    /// Configured spelling, and the lowercased name looked up on elements
    required: Vec<(&'c str, String)>,
}

/// Scanner bound to one tree and one configuration
#[derive(Debug)]
pub struct Scanner<'a> {
    tree: &'a DomTree,
    hook_prefix: &'a str,
    pair_rules: Vec<PairRule<'a>>,
}

impl<'a> Scanner<'a> {
    /// Compile the configured selectors. Fails on the first one that does
    /// not parse, before anything is scanned.
    pub fn new(tree: &'a DomTree, config: &'a ScanConfig) -> ScanResult<Self> {
        let pair_rules = config
            .aria_pairs
            .iter()
            .map(|pair| {
                let selector = SelectorList::parse(&pair.selector).map_err(|source| {
                    ScanError::InvalidSelector {
                        selector: pair.selector.clone(),
                        source,
                    }
                })?;
                let required = pair
                    .required
                    .iter()
                    .map(|attr| (attr.as_str(), attr.to_ascii_lowercase()))
                    .collect();
                Ok(PairRule { selector, required })
            })
            .collect::<ScanResult<Vec<_>>>()?;

        Ok(Self {
            tree,
            hook_prefix: &config.hook_class_prefix,
            pair_rules,
        })
    }

    /// The tree this scanner reads
    pub fn tree(&self) -> &'a DomTree {
        self.tree
    }

    /// Scan the subtree at `root` (inclusive), calling `on_violation` once per
    /// failing (element, rule) pair
    pub fn scan<F>(&self, root: NodeId, mut on_violation: F) -> ScanResult<()>
    where
        F: FnMut(Diagnostic),
    {
        let tree = self.tree;
        if !tree.contains_node(root) {
            return Err(ScanError::NodeNotFound(root));
        }

        tracing::debug!(?root, pair_rules = self.pair_rules.len(), "Scan started");
        let mut count = 0usize;
        let mut emit = |diagnostic: Diagnostic| {
            count += 1;
            on_violation(diagnostic);
        };

        for category in RuleCategory::ORDER {
            let candidates = category.candidates(tree, root);
            tracing::trace!(category = category.name(), candidates = candidates.len());

            for element in candidates {
                if let Some(kind) = category.check(tree, element) {
                    let locator = inspect(tree, element, self.hook_prefix);
                    emit(Diagnostic::new(kind, element, &locator));
                }
            }
        }

        for rule in &self.pair_rules {
            let matched = tree.select(root, &rule.selector);
            tracing::trace!(selector = rule.selector.source(), candidates = matched.len());

            for element in matched {
                let missing: Vec<String> = rule
                    .required
                    .iter()
                    .filter(|(_, lookup)| !tree.has_attribute(element, lookup))
                    .map(|(configured, _)| configured.to_string())
                    .collect();
                if !missing.is_empty() {
                    let locator = inspect(tree, element, self.hook_prefix);
                    emit(Diagnostic::missing_attributes(element, missing, &locator));
                }
            }
        }

        tracing::debug!(?root, violations = count, "Scan finished");
        Ok(())
    }

    /// Scan and collect every diagnostic in visit order
    pub fn collect(&self, root: NodeId) -> ScanResult<Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        self.scan(root, |d| diagnostics.push(d))?;
        Ok(diagnostics)
    }
}

/// Scan the subtree at `root` with `config`, reporting through `on_violation`
pub fn scan<F>(tree: &DomTree, root: NodeId, config: &ScanConfig, on_violation: F) -> ScanResult<()>
where
    F: FnMut(Diagnostic),
{
    Scanner::new(tree, config)?.scan(root, on_violation)
}

/// Scan the subtree at `root` and return the diagnostics in visit order
pub fn scan_collect(tree: &DomTree, root: NodeId, config: &ScanConfig) -> ScanResult<Vec<Diagnostic>> {
    Scanner::new(tree, config)?.collect(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AriaPairs;
    use crate::diagnostic::DiagnosticKind;
    use axscan_html::HtmlParser;

    #[test]
    fn test_clean_document() {
        let doc = HtmlParser::new().parse(
            "<img alt='Logo'><a href='/'>Home</a><button>Go</button>\
             <label>Name <input type='text'></label><iframe src='x'></iframe>",
        );
        let found = scan_collect(doc.tree(), doc.tree().root(), &ScanConfig::default()).unwrap();
        assert!(found.is_empty(), "{found:?}");
    }

    #[test]
    fn test_category_order() {
        let doc = HtmlParser::new().parse(
            "<iframe scrolling='no'></iframe><button></button><a></a><img>",
        );
        let kinds: Vec<_> = scan_collect(doc.tree(), doc.tree().root(), &ScanConfig::default())
            .unwrap()
            .into_iter()
            .map(|d| d.kind)
            .collect();
        assert_eq!(
            kinds,
            [
                DiagnosticKind::ImageWithoutAltAttribute,
                DiagnosticKind::LinkWithoutLabelOrRole,
                DiagnosticKind::ButtonWithoutLabel,
                DiagnosticKind::IframeWithoutScroll,
            ]
        );
    }

    #[test]
    fn test_root_is_inclusive() {
        let doc = HtmlParser::new().parse("<button id='b'></button><button></button>");
        let tree = doc.tree();
        let first = tree.get_element_by_id("b").unwrap();
        let found = scan_collect(tree, first, &ScanConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].element, first);
    }

    #[test]
    fn test_unknown_root() {
        let tree = DomTree::new();
        let err = scan(&tree, NodeId::NONE, &ScanConfig::default(), |_| {}).unwrap_err();
        assert!(matches!(err, ScanError::NodeNotFound(_)));
    }

    #[test]
    fn test_invalid_selector_emits_nothing() {
        let doc = HtmlParser::new().parse("<img>");
        let pairs: AriaPairs = [(".ok", vec!["aria-x"]), ("a:hover", vec!["aria-y"])]
            .into_iter()
            .collect();
        let config = ScanConfig::new().with_aria_pairs(pairs);

        let mut emitted = 0;
        let err = scan(doc.tree(), doc.tree().root(), &config, |_| emitted += 1).unwrap_err();
        assert_eq!(emitted, 0);
        match err {
            ScanError::InvalidSelector { selector, .. } => assert_eq!(selector, "a:hover"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scanner_reuse() {
        let doc = HtmlParser::new().parse("<div id='a'><img></div><div id='b'><img></div>");
        let tree = doc.tree();
        let config = ScanConfig::default();
        let scanner = Scanner::new(tree, &config).unwrap();

        for id in ["a", "b"] {
            let root = tree.get_element_by_id(id).unwrap();
            let found = scanner.collect(root).unwrap();
            assert_eq!(found.len(), 1);
            assert!(tree.is_inclusive_ancestor(root, found[0].element));
        }
    }
}
