//! CSS Selectors
//!
//! Parsing and matching for the selector subset element queries accept:
//! type and universal selectors, `#id`, `.class`, attribute selectors with
//! every CSS matcher, selector lists, and the descendant and child
//! combinators. Pseudo-classes, pseudo-elements and sibling combinators are
//! rejected at parse time rather than silently ignored.

use std::fmt;
use std::str::FromStr;

use crate::{DomTree, NodeId};

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector `{selector}` at offset {position}: {reason}")]
pub struct SelectorError {
    /// The full selector text
    pub selector: String,
    /// Character offset where parsing failed
    pub position: usize,
    /// What went wrong
    pub reason: String,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name, lowercase)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(val)) = (&self.matcher, value) else {
            // [attr] only checks existence
            return self.matcher.is_none() && value.is_some();
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(val);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected))
            }
        }
    }
}

/// Sequence of simple selectors that all apply to one element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Match against a single element, ignoring its ancestors
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        let Some(elem) = tree.element(element) else {
            return false;
        };

        self.components.iter().all(|component| match component {
            SelectorComponent::Universal => true,
            SelectorComponent::Type(tag) => tree.resolve(elem.name).eq_ignore_ascii_case(tag),
            SelectorComponent::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            SelectorComponent::Class(class) => elem.has_class(class),
            SelectorComponent::Attribute(attr) => attr.matches(tree.attribute(element, &attr.name)),
        })
    }
}

/// Relationship between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Compound selectors joined by combinators, stored left to right
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    pub combinators: Vec<Combinator>,
}

impl ComplexSelector {
    /// Match right to left, starting at the subject element
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(tree, element, n - 1),
        }
    }

    fn matches_at(&self, tree: &DomTree, element: NodeId, index: usize) -> bool {
        if !self.compounds[index].matches(tree, element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => tree
                .parent(element)
                .is_some_and(|p| self.matches_at(tree, p, index - 1)),
            Combinator::Descendant => tree
                .ancestors(element)
                .skip(1)
                .any(|p| self.matches_at(tree, p, index - 1)),
        }
    }
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
    source: String,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source).parse_list()
    }

    /// The text this list was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Check whether any selector in the list matches the element
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, element))
    }
}

impl FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> SelectorError {
        SelectorError {
            selector: self.source.to_string(),
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether any whitespace was consumed
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.bump() {
                None => break,
                Some(',') => continue,
                Some(c) => {
                    self.pos -= 1;
                    return Err(self.error(format!("unexpected `{c}`")));
                }
            }
        }

        Ok(SelectorList {
            selectors,
            source: self.source.to_string(),
        })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some('+') | Some('~') => {
                    return Err(self.error("sibling combinators are not supported"));
                }
                Some(_) if had_space => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("unexpected `{c}`"))),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        if self.eat('*') {
            components.push(SelectorComponent::Universal);
        } else if self.peek().is_some_and(is_ident_char) {
            components.push(SelectorComponent::Type(self.parse_ident()?.to_ascii_lowercase()));
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    components.push(SelectorComponent::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.bump();
                    components.push(SelectorComponent::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.bump();
                    components.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                Some(':') => return Err(self.error("pseudo-classes are not supported")),
                _ => break,
            }
        }

        if components.is_empty() {
            return Err(self.error("expected a selector"));
        }
        Ok(CompoundSelector { components })
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                match self.bump() {
                    Some(escaped) => ident.push(escaped),
                    None => return Err(self.error("dangling escape")),
                }
            } else if is_ident_char(c) {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if ident.is_empty() {
            return Err(self.error("expected an identifier"));
        }
        Ok(ident)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        if self.eat(']') {
            return Ok(AttributeSelector {
                name,
                matcher: None,
                case_insensitive: false,
            });
        }

        let op = match self.peek() {
            Some('=') => {
                self.bump();
                '='
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) if self.chars.get(self.pos + 1) == Some(&'=') => {
                self.pos += 2;
                c
            }
            _ => return Err(self.error("expected an attribute matcher")),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                self.parse_quoted(quote)?
            }
            _ => self.parse_ident()?,
        };
        self.skip_whitespace();

        let case_insensitive = match self.peek() {
            Some('i' | 'I') => {
                self.bump();
                true
            }
            Some('s' | 'S') => {
                self.bump();
                false
            }
            _ => false,
        };
        self.skip_whitespace();

        if !self.eat(']') {
            return Err(self.error("expected `]`"));
        }

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };

        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('\\') => match self.bump() {
                    Some(c) => value.push(c),
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
            }
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
