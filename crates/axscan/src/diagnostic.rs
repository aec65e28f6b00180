//! Diagnostics
//!
//! One `Diagnostic` per failing (element, rule) pair. Kinds form a closed
//! enum so consumers can match exhaustively; each kind keeps the error name
//! callers key on (`data-error="ButtonWithoutLabelError"`).

use std::fmt;

use axscan_dom::NodeId;
use serde::Serialize;

/// Kind of accessibility violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// `img` without an `alt` attribute
    #[serde(rename = "ImageWithoutAltAttributeError")]
    ImageWithoutAltAttribute,
    /// Visible `a` with neither `href` nor `role=button`
    #[serde(rename = "LinkWithoutLabelOrRoleError")]
    LinkWithoutLabelOrRole,
    /// Structurally valid element with no perceivable label
    #[serde(rename = "ElementWithoutLabelError")]
    ElementWithoutLabel,
    /// Visible `button` with no accessible text
    #[serde(rename = "ButtonWithoutLabelError")]
    ButtonWithoutLabel,
    /// Visible `label` that resolves to no control
    #[serde(rename = "LabelMissingControlError")]
    LabelMissingControl,
    /// Visible text-like input with no label and no `aria-label`
    #[serde(rename = "InputMissingLabelError")]
    InputMissingLabel,
    /// `iframe` with `scrolling="no"`
    #[serde(rename = "IframeWithoutScroll")]
    IframeWithoutScroll,
    /// Element matching a configured selector lacks required attributes
    #[serde(rename = "ARIAAttributeMissingError")]
    AriaAttributeMissing,
}

impl DiagnosticKind {
    /// Every kind, in rule evaluation order
    pub const ALL: [DiagnosticKind; 8] = [
        Self::ImageWithoutAltAttribute,
        Self::LinkWithoutLabelOrRole,
        Self::ElementWithoutLabel,
        Self::ButtonWithoutLabel,
        Self::LabelMissingControl,
        Self::InputMissingLabel,
        Self::IframeWithoutScroll,
        Self::AriaAttributeMissing,
    ];

    /// Error name reported to callers
    pub fn name(self) -> &'static str {
        match self {
            Self::ImageWithoutAltAttribute => "ImageWithoutAltAttributeError",
            Self::LinkWithoutLabelOrRole => "LinkWithoutLabelOrRoleError",
            Self::ElementWithoutLabel => "ElementWithoutLabelError",
            Self::ButtonWithoutLabel => "ButtonWithoutLabelError",
            Self::LabelMissingControl => "LabelMissingControlError",
            Self::InputMissingLabel => "InputMissingLabelError",
            Self::IframeWithoutScroll => "IframeWithoutScroll",
            Self::AriaAttributeMissing => "ARIAAttributeMissingError",
        }
    }

    /// Parse an error name back into a kind
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// WCAG success criterion this kind maps to
    pub fn wcag_criterion(self) -> &'static str {
        match self {
            Self::ImageWithoutAltAttribute => "1.1.1 Non-text Content",
            Self::LinkWithoutLabelOrRole => "4.1.2 Name, Role, Value",
            Self::ElementWithoutLabel => "4.1.2 Name, Role, Value",
            Self::ButtonWithoutLabel => "4.1.2 Name, Role, Value",
            Self::LabelMissingControl => "1.3.1 Info and Relationships",
            Self::InputMissingLabel => "3.3.2 Labels or Instructions",
            Self::IframeWithoutScroll => "1.4.10 Reflow",
            Self::AriaAttributeMissing => "4.1.2 Name, Role, Value",
        }
    }

    /// Fixed text preceding the locator in a message
    fn message_prefix(self) -> &'static str {
        match self {
            Self::ImageWithoutAltAttribute => "Missing alt attribute on ",
            Self::LinkWithoutLabelOrRole => "Missing href or role=button on ",
            Self::ElementWithoutLabel => "Missing text, title, or aria-label attribute on ",
            Self::ButtonWithoutLabel => "Missing text or aria-label attribute on ",
            Self::LabelMissingControl => "Label missing control on ",
            Self::InputMissingLabel => "Missing label or aria-label attribute on ",
            Self::IframeWithoutScroll => "Scrolling disabled on ",
            Self::AriaAttributeMissing => "Missing attribute on ",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single rule violation on a single element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The offending element, in the tree that was scanned
    pub element: NodeId,
    /// Kind-specific text followed by the element locator
    pub message: String,
    /// Configured attributes the element lacks, in configured order.
    /// Empty for every kind except `AriaAttributeMissing`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_attributes: Vec<String>,
}

impl Diagnostic {
    /// Build a diagnostic from its kind and a rendered locator
    pub fn new(kind: DiagnosticKind, element: NodeId, locator: &str) -> Self {
        Self {
            kind,
            element,
            message: format!("{}{}", kind.message_prefix(), locator),
            missing_attributes: Vec::new(),
        }
    }

    /// `ARIAAttributeMissingError` listing every missing attribute
    pub fn missing_attributes(element: NodeId, missing: Vec<String>, locator: &str) -> Self {
        Self {
            kind: DiagnosticKind::AriaAttributeMissing,
            element,
            message: format!("Missing {} attribute on {}", missing.join(", "), locator),
            missing_attributes: missing,
        }
    }

    /// Error name of this diagnostic's kind
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
