//! axscan HTML Parser
//!
//! HTML5 parsing built on html5ever, producing `axscan_dom` trees, plus
//! serialization back to markup.

mod parser;
pub mod serializer;

pub use axscan_dom::Document;
pub use parser::HtmlParser;
pub use serializer::{get_elided_html, get_inner_html, get_outer_html, HtmlSerializer};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
}
