//! Whole-document scans of small fixtures

use axscan::{scan, scan_collect, AriaPairs, Diagnostic, DiagnosticKind, ScanConfig};
use axscan_dom::{Document, DomTree, ElementQuery, NodeId};
use axscan_html::HtmlParser;

fn scan_html(html: &str, config: &ScanConfig) -> (Document, Vec<Diagnostic>) {
    let doc = HtmlParser::new().parse(html);
    let found = scan_collect(doc.tree(), doc.body(), config).unwrap();
    (doc, found)
}

fn kinds(found: &[Diagnostic]) -> Vec<DiagnosticKind> {
    found.iter().map(|d| d.kind).collect()
}

fn element(tree: &DomTree, selector: &str) -> NodeId {
    tree.query_selector(tree.root(), selector).unwrap().unwrap()
}

#[test]
fn empty_button_in_built_document() {
    let mut doc = Document::new("about:blank");
    let body = doc.body();
    let tree = doc.tree_mut();
    let button = tree.create_element("button");
    tree.set_attribute(button, "type", "button").unwrap();
    tree.append_child(body, button).unwrap();

    let found = scan_collect(doc.tree(), body, &ScanConfig::default()).unwrap();
    assert_eq!(kinds(&found), [DiagnosticKind::ButtonWithoutLabel]);
    assert_eq!(found[0].element, button);
    assert_eq!(
        found[0].message,
        "Missing text or aria-label attribute on \"button\". \n\n<button type=\"button\"></button>"
    );
}

#[test]
fn button_wrapping_unlabelled_image() {
    let (doc, found) = scan_html(r#"<button type="button"><img></button>"#, &ScanConfig::default());
    let tree = doc.tree();

    assert_eq!(found.len(), 2);
    let image = found.iter().find(|d| d.kind == DiagnosticKind::ImageWithoutAltAttribute).unwrap();
    let button = found.iter().find(|d| d.kind == DiagnosticKind::ButtonWithoutLabel).unwrap();
    assert_eq!(image.element, element(tree, "img"));
    assert_eq!(button.element, element(tree, "button"));
    assert_eq!(image.message, "Missing alt attribute on \"button > img\". \n\n<img>");
    assert!(button.message.ends_with("<button type=\"button\">...</button>"));
}

#[test]
fn unlabelled_text_input() {
    let (_, found) = scan_html(r#"<input type="text">"#, &ScanConfig::default());
    assert_eq!(kinds(&found), [DiagnosticKind::InputMissingLabel]);
    assert!(found[0].message.starts_with("Missing label or aria-label attribute on \"input\""));
}

#[test]
fn link_without_href_or_role() {
    let (_, found) = scan_html("<a>home</a>", &ScanConfig::default());
    assert_eq!(kinds(&found), [DiagnosticKind::LinkWithoutLabelOrRole]);
    assert_eq!(found[0].message, "Missing href or role=button on \"a\". \n\n<a>...</a>");
}

#[test]
fn label_for_sibling_input() {
    let (_, found) = scan_html(
        r#"<label for="input"></label><input id="input" type="text">"#,
        &ScanConfig::default(),
    );
    assert!(found.is_empty(), "{found:?}");
}

#[test]
fn aria_pair_missing_both_attributes() {
    let pairs: AriaPairs = [(".js-menu-target", vec!["aria-expanded", "aria-haspopup"])]
        .into_iter()
        .collect();
    let config = ScanConfig::new().with_aria_pairs(pairs);
    let (doc, found) = scan_html(r#"<button class="js-menu-target"></button>"#, &config);

    let aria: Vec<_> = found
        .iter()
        .filter(|d| d.kind == DiagnosticKind::AriaAttributeMissing)
        .collect();
    assert_eq!(aria.len(), 1);
    assert_eq!(aria[0].element, element(doc.tree(), "button"));
    assert_eq!(aria[0].missing_attributes, ["aria-expanded", "aria-haspopup"]);
    assert!(aria[0].message.contains("aria-expanded, aria-haspopup"));
    assert!(aria[0].message.starts_with(
        "Missing aria-expanded, aria-haspopup attribute on \"button.js-menu-target\""
    ));

    // the built-in button rule still applies and runs first
    assert_eq!(found[0].kind, DiagnosticKind::ButtonWithoutLabel);
}

#[test]
fn recommended_pairs() {
    let config = ScanConfig::new().with_aria_pairs(AriaPairs::recommended());
    let (_, found) = scan_html(
        r##"<button class="js-menu-target" aria-expanded="false">Menu</button>
           <a href="#more" class="js-details-target">More</a>
           <a href="#less" class="js-details-target" aria-expanded="true">Less</a>"##,
        &config,
    );

    let missing: Vec<_> = found.iter().map(|d| d.missing_attributes.clone()).collect();
    assert_eq!(missing, [vec!["aria-haspopup".to_string()], vec!["aria-expanded".to_string()]]);
}

#[test]
fn repeated_scans_are_identical() {
    let html = r#"
        <nav id="main-nav">
          <a class="js-toggle"></a>
          <a href="/about"><img src="about.png"></a>
        </nav>
        <form>
          <label>Orphan</label>
          <input type="search">
          <textarea aria-label="Notes"></textarea>
        </form>
        <iframe scrolling="no" src="/embed"></iframe>"#;
    let config = ScanConfig::new().with_aria_pairs(AriaPairs::recommended());
    let (doc, first) = scan_html(html, &config);
    let second = scan_collect(doc.tree(), doc.body(), &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        kinds(&first),
        [
            DiagnosticKind::ImageWithoutAltAttribute,
            DiagnosticKind::LinkWithoutLabelOrRole,
            DiagnosticKind::ElementWithoutLabel,
            DiagnosticKind::LabelMissingControl,
            DiagnosticKind::InputMissingLabel,
            DiagnosticKind::IframeWithoutScroll,
        ]
    );
    assert!(first[1].message.starts_with("Missing href or role=button on \"nav#main-nav > a.js-toggle\""));
}

#[test]
fn callback_sees_diagnostics_in_visit_order() {
    let doc = HtmlParser::new().parse("<img id='one'><img id='two'><button></button>");
    let mut seen = Vec::new();
    scan(doc.tree(), doc.tree().root(), &ScanConfig::default(), |d| {
        seen.push((d.name(), d.element))
    })
    .unwrap();

    let tree = doc.tree();
    assert_eq!(
        seen,
        [
            ("ImageWithoutAltAttributeError", tree.get_element_by_id("one").unwrap()),
            ("ImageWithoutAltAttributeError", tree.get_element_by_id("two").unwrap()),
            ("ButtonWithoutLabelError", element(tree, "button")),
        ]
    );
}
