//! Element records: the durable, storage-facing page tree.

use serde::{Deserialize, Serialize};

use crate::css::breakpoint::{Breakpoint, ResponsiveStyles};
use crate::css::cascade;
use crate::css::styles::Style;

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// A direct URL, used as-is.
    Url(String),
    /// An opaque blob id into the site's asset side-table.
    Blob(String),
}

/// Form input types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Email,
    Password,
    Number,
    Tel,
    Url,
    Search,
}

impl InputType {
    pub const ALL: [InputType; 7] = [
        InputType::Text,
        InputType::Email,
        InputType::Password,
        InputType::Number,
        InputType::Tel,
        InputType::Url,
        InputType::Search,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Number => "number",
            InputType::Tel => "tel",
            InputType::Url => "url",
            InputType::Search => "search",
        }
    }

    pub fn parse(s: &str) -> Option<InputType> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Semantic kind of an element. Each variant carries only the fields that are
/// legal for that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum ElementKind {
    Section,
    Container,
    Grid,
    Heading {
        level: u8,
    },
    Text,
    Button {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
    },
    Link {
        href: String,
    },
    Image {
        source: ImageSource,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Input {
        #[serde(rename = "inputType")]
        input_type: InputType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default)]
        autocomplete: bool,
    },
}

impl ElementKind {
    /// Stable kind name, as stored and as used for the node marker.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Section => "section",
            ElementKind::Container => "container",
            ElementKind::Grid => "grid",
            ElementKind::Heading { .. } => "heading",
            ElementKind::Text => "text",
            ElementKind::Button { .. } => "button",
            ElementKind::Link { .. } => "link",
            ElementKind::Image { .. } => "image",
            ElementKind::Input { .. } => "input",
        }
    }

    /// HTML tag the kind renders as.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Section => "section",
            ElementKind::Container | ElementKind::Grid => "div",
            ElementKind::Heading { level } => match level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            ElementKind::Text => "p",
            ElementKind::Button { href: Some(_) } => "a",
            ElementKind::Button { href: None } => "button",
            ElementKind::Link { .. } => "a",
            ElementKind::Image { .. } => "img",
            ElementKind::Input { .. } => "input",
        }
    }

    /// Whether elements of this kind may contain other elements.
    pub fn accepts_children(&self) -> bool {
        matches!(
            self,
            ElementKind::Section | ElementKind::Container | ElementKind::Grid
        )
    }
}

/// One node of a page's content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Base style (the monitor breakpoint).
    #[serde(default)]
    pub style: Style,
    /// Minimal per-breakpoint overrides.
    #[serde(default, skip_serializing_if = "ResponsiveStyles::is_empty")]
    pub responsive: ResponsiveStyles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Nested children. Only populated by the reverse extractor; stored pages
    /// keep a flat map linked by `parent_id`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_id: None,
            style: Style::default(),
            responsive: ResponsiveStyles::new(),
            content: None,
            children: Vec::new(),
        }
    }

    /// Set the parent id (builder).
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the base style (builder).
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set text content (builder).
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Apply an override at `breakpoint` through [`Element::apply_style`] (builder).
    pub fn with_override(mut self, breakpoint: Breakpoint, style: Style) -> Self {
        self.apply_style(breakpoint, &style);
        self
    }

    pub fn is_section(&self) -> bool {
        self.kind == ElementKind::Section
    }

    /// Apply a partial style update at `breakpoint`, keeping the override set
    /// minimal.
    pub fn apply_style(&mut self, breakpoint: Breakpoint, update: &Style) {
        cascade::apply_update(&mut self.style, &mut self.responsive, breakpoint, update);
    }

    /// Effective style at `breakpoint`.
    pub fn resolved_style(&self, breakpoint: Breakpoint) -> Style {
        cascade::resolve(&self.style, &self.responsive, breakpoint, true)
    }

    /// Depth-first, parent-before-children list of this element and its
    /// descendants, each with `children` emptied.
    pub fn flatten(mut self) -> Vec<Element> {
        let children = std::mem::take(&mut self.children);
        let mut out = vec![self];
        for child in children {
            out.extend(child.flatten());
        }
        out
    }
}
