//! Page and site records.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::css::breakpoint::Breakpoint;
use crate::model::element::Element;

/// One page: metadata plus a flat, ordered map element id → element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The page exported as `index.html`.
    #[serde(default)]
    pub is_index: bool,
    #[serde(default)]
    pub elements: IndexMap<String, Element>,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: None,
            is_index: false,
            elements: IndexMap::new(),
        }
    }

    /// Mark this page as the site index (builder).
    pub fn as_index(mut self) -> Self {
        self.is_index = true;
        self
    }

    /// Set the document title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append an element, keyed by its id (builder).
    pub fn with_element(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    /// Insert or replace an element, keyed by its id.
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    /// Every responsive breakpoint overridden by at least one element.
    pub fn responsive_breakpoints(&self) -> BTreeSet<Breakpoint> {
        self.elements
            .values()
            .flat_map(|e| e.responsive.keys().copied())
            .collect()
    }

    /// Title used for the exported document.
    pub fn document_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// A whole site: metadata plus an ordered map page id → page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub pages: IndexMap<String, Page>,
}

impl Site {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            pages: IndexMap::new(),
        }
    }

    /// Append a page, keyed by its id (builder).
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert(page.id.clone(), page);
        self
    }

    pub fn index_page(&self) -> Option<&Page> {
        self.pages.values().find(|p| p.is_index)
    }

    /// Every blob id referenced by an image element, in page order.
    pub fn referenced_blobs(&self) -> Vec<&str> {
        use crate::model::element::{ElementKind, ImageSource};

        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for page in self.pages.values() {
            for element in page.elements.values() {
                if let ElementKind::Image {
                    source: ImageSource::Blob(id),
                    ..
                } = &element.kind
                {
                    if seen.insert(id.as_str()) {
                        out.push(id.as_str());
                    }
                }
            }
        }
        out
    }
}

/// Lowercase, ASCII-alphanumeric, dash-separated file stem. Never empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("page");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::styles::Style;
    use crate::model::element::{ElementKind, ImageSource};

    #[test]
    fn slugify_names() {
        assert_eq!(slugify("About Us"), "about-us");
        assert_eq!(slugify("  Pricing & Plans!! "), "pricing-plans");
        assert_eq!(slugify("Ünïcode"), "n-code");
        assert_eq!(slugify("!!!"), "page");
    }

    #[test]
    fn responsive_breakpoints_are_collected() {
        let page = Page::new("p", "Home")
            .with_element(Element::new("s", ElementKind::Section))
            .with_element(Element::new("t", ElementKind::Text).with_parent("s").with_override(
                Breakpoint::Smartphone,
                Style {
                    color: Some("#ff0000".into()),
                    ..Style::default()
                },
            ));
        let bps: Vec<_> = page.responsive_breakpoints().into_iter().collect();
        assert_eq!(bps, vec![Breakpoint::Smartphone]);
    }

    #[test]
    fn referenced_blobs_are_unique() {
        let image = |id: &str, blob: &str| {
            Element::new(
                id,
                ElementKind::Image {
                    source: ImageSource::Blob(blob.into()),
                    alt: None,
                },
            )
        };
        let site = Site::new("s", "Site")
            .with_page(Page::new("a", "A").with_element(image("i1", "b1")).with_element(image("i2", "b1")))
            .with_page(Page::new("b", "B").with_element(image("i3", "b2")));
        assert_eq!(site.referenced_blobs(), vec!["b1", "b2"]);
    }

    #[test]
    fn document_title_falls_back_to_name() {
        assert_eq!(Page::new("p", "Home").document_title(), "Home");
        assert_eq!(Page::new("p", "Home").with_title("Welcome").document_title(), "Welcome");
    }
}
