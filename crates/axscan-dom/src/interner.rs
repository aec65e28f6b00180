//! String Interner - Deduplicate tag and attribute names
//!
//! Tag names ("a", "img", "label") and attribute names ("alt", "aria-label",
//! "for") repeat on nearly every element, so they are stored once and
//! referenced by a 4-byte handle.

use std::collections::HashMap;

/// Interned string ID - just 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string
    pub const EMPTY: InternedString = InternedString(0);
}

/// Names the audit rules look up on every scan. Interning them up front
/// means lookups by `&str` never miss on a freshly built tree.
const PRELOADED: &[&str] = &[
    // tags
    "html", "head", "body", "div", "span", "p", "a", "img", "button",
    "label", "input", "textarea", "select", "iframe", "form", "fieldset",
    "legend", "meter", "output", "progress", "nav", "main", "section",
    // attributes
    "id", "class", "style", "href", "src", "alt", "title", "type", "name",
    "role", "for", "hidden", "scrolling", "aria-label", "aria-hidden",
    "aria-expanded", "aria-haspopup", "data-error", "data-error-message",
];

/// String interner for deduplicating names
#[derive(Debug, Clone)]
pub struct StringInterner {
    /// Interned strings, indexed by handle
    strings: Vec<Box<str>>,
    /// Map from string content to handle
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create a new interner with common HTML names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(128),
            map: HashMap::with_capacity(128),
        };

        interner.intern("");
        for name in PRELOADED {
            interner.intern(name);
        }

        interner
    }

    /// Intern a string, returning its ID
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }

        let idx = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), idx);
        InternedString(idx)
    }

    /// Look up a string without interning it
    ///
    /// A miss means no node in the tree can carry that name.
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Get the string for an interned ID
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
