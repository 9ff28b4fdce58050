//! Structural validation of page and site records.
//!
//! Runs before any compilation or import. A record either passes as a whole
//! or is rejected; nothing downstream sees a partially valid site.

use std::collections::HashSet;

use crate::css::breakpoint::Breakpoint;
use crate::css::cascade;
use crate::css::properties::parse_color;
use crate::css::styles::Style;
use crate::model::element::{Element, ElementKind};
use crate::model::page::{Page, Site};

/// Characters that would end a quoted family or a declaration early.
const FONT_FAMILY_FORBIDDEN: &[char] = &['"', '\\', ';', '{', '}'];

/// Structural errors in element, page or site records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} has an empty id")]
    EmptyId(&'static str),
    #[error("map key '{key}' does not match record id '{id}'")]
    KeyMismatch { key: String, id: String },
    #[error("page '{page}': section '{element}' must not have a parent")]
    SectionWithParent { page: String, element: String },
    #[error("page '{page}': element '{element}' is nested under its own subtree")]
    ParentCycle { page: String, element: String },
    #[error("page '{page}': '{parent}' cannot contain children (child '{element}')")]
    ParentCannotHaveChildren {
        page: String,
        parent: String,
        element: String,
    },
    #[error("page '{page}': element '{element}' stores nested children")]
    NestedChildren { page: String, element: String },
    #[error("page '{page}': heading '{element}' has invalid level {level}")]
    InvalidHeadingLevel {
        page: String,
        element: String,
        level: u8,
    },
    #[error("page id '{0}' may only contain ASCII letters, digits, '-' and '_'")]
    InvalidPageId(String),
    #[error("page '{page}': element '{element}' has an invalid {property}: {value:?}")]
    InvalidStyleValue {
        page: String,
        element: String,
        property: &'static str,
        value: String,
    },
    #[error("page '{page}': element '{element}' stores a {breakpoint} override the cascade already produces")]
    RedundantOverride {
        page: String,
        element: String,
        breakpoint: Breakpoint,
    },
    #[error("more than one index page: '{first}' and '{second}'")]
    MultipleIndexPages { first: String, second: String },
}

fn validate_element(page: &Page, key: &str, element: &Element) -> Result<(), ValidationError> {
    if element.id.is_empty() {
        return Err(ValidationError::EmptyId("element"));
    }
    if key != element.id {
        return Err(ValidationError::KeyMismatch {
            key: key.to_owned(),
            id: element.id.clone(),
        });
    }
    if !element.children.is_empty() {
        return Err(ValidationError::NestedChildren {
            page: page.id.clone(),
            element: element.id.clone(),
        });
    }
    if let ElementKind::Heading { level } = element.kind {
        if !(1..=6).contains(&level) {
            return Err(ValidationError::InvalidHeadingLevel {
                page: page.id.clone(),
                element: element.id.clone(),
                level,
            });
        }
    }
    check_style(page, element, &element.style)?;
    for layer in element.responsive.values() {
        check_style(page, element, layer)?;
    }
    check_minimal_overrides(page, element)?;
    match (&element.parent_id, element.is_section()) {
        (Some(_), true) => Err(ValidationError::SectionWithParent {
            page: page.id.clone(),
            element: element.id.clone(),
        }),
        (Some(parent_id), false) => match page.elements.get(parent_id) {
            // Unknown parents are not an error: the compiler attaches the
            // element to the root instead.
            None => Ok(()),
            Some(parent) if !parent.kind.accepts_children() => {
                Err(ValidationError::ParentCannotHaveChildren {
                    page: page.id.clone(),
                    parent: parent.id.clone(),
                    element: element.id.clone(),
                })
            }
            Some(_) => check_no_cycle(page, element),
        },
        (None, _) => Ok(()),
    }
}

/// String-valued properties must render as a single well-formed value.
fn check_style(page: &Page, element: &Element, style: &Style) -> Result<(), ValidationError> {
    let invalid = |property: &'static str, value: &str| ValidationError::InvalidStyleValue {
        page: page.id.clone(),
        element: element.id.clone(),
        property,
        value: value.to_owned(),
    };
    let colors = [
        ("color", &style.color),
        ("background-color", &style.background_color),
        ("border-color", &style.border_color),
    ];
    for (property, value) in colors {
        if let Some(value) = value {
            parse_color(value, property).map_err(|_| invalid(property, value))?;
        }
    }
    if let Some(family) = &style.font_family {
        if family.trim().is_empty()
            || family.contains(FONT_FAMILY_FORBIDDEN)
            || family.chars().any(char::is_control)
        {
            return Err(invalid("font-family", family));
        }
    }
    Ok(())
}

/// No override may repeat what the base and wider overrides already give.
fn check_minimal_overrides(page: &Page, element: &Element) -> Result<(), ValidationError> {
    let mut pruned = element.responsive.clone();
    cascade::prune_overrides(&element.style, &mut pruned);
    match element
        .responsive
        .iter()
        .find(|&(bp, layer)| pruned.get(bp) != Some(layer))
    {
        Some((&breakpoint, _)) => Err(ValidationError::RedundantOverride {
            page: page.id.clone(),
            element: element.id.clone(),
            breakpoint,
        }),
        None => Ok(()),
    }
}

/// Walk the parent chain; it must end at the root or at an unknown id.
fn check_no_cycle(page: &Page, element: &Element) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let mut current = element;
    while let Some(parent) = current
        .parent_id
        .as_ref()
        .and_then(|id| page.elements.get(id))
    {
        if !seen.insert(parent.id.as_str()) || parent.id == element.id {
            return Err(ValidationError::ParentCycle {
                page: page.id.clone(),
                element: element.id.clone(),
            });
        }
        current = parent;
    }
    Ok(())
}

/// Validate one page.
pub fn validate_page(key: &str, page: &Page) -> Result<(), ValidationError> {
    if page.id.is_empty() {
        return Err(ValidationError::EmptyId("page"));
    }
    if key != page.id {
        return Err(ValidationError::KeyMismatch {
            key: key.to_owned(),
            id: page.id.clone(),
        });
    }
    // Page ids end up in archive entry names.
    if !page
        .id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidPageId(page.id.clone()));
    }
    for (element_key, element) in &page.elements {
        validate_element(page, element_key, element)?;
    }
    Ok(())
}

/// Validate a whole site.
pub fn validate_site(site: &Site) -> Result<(), ValidationError> {
    if site.id.is_empty() {
        return Err(ValidationError::EmptyId("site"));
    }
    let mut index: Option<&str> = None;
    for (key, page) in &site.pages {
        validate_page(key, page)?;
        if page.is_index {
            if let Some(first) = index {
                return Err(ValidationError::MultipleIndexPages {
                    first: first.to_owned(),
                    second: page.id.clone(),
                });
            }
            index = Some(page.id.as_str());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::styles::FontSize;
    use crate::model::element::ImageSource;

    fn page() -> Page {
        Page::new("home", "Home")
            .with_element(Element::new("s1", ElementKind::Section))
            .with_element(Element::new("t1", ElementKind::Text).with_parent("s1"))
    }

    #[test]
    fn valid_page_passes() {
        assert_eq!(validate_page("home", &page()), Ok(()));
    }

    #[test]
    fn orphan_is_allowed() {
        let p = page().with_element(Element::new("t2", ElementKind::Text).with_parent("ghost"));
        assert_eq!(validate_page("home", &p), Ok(()));
    }

    #[test]
    fn section_with_parent_is_rejected() {
        let p = page().with_element(Element::new("s2", ElementKind::Section).with_parent("s1"));
        assert!(matches!(
            validate_page("home", &p),
            Err(ValidationError::SectionWithParent { .. })
        ));
    }

    #[test]
    fn key_mismatch_is_rejected() {
        let mut p = page();
        let el = Element::new("other", ElementKind::Text);
        p.elements.insert("t9".into(), el);
        assert!(matches!(
            validate_page("home", &p),
            Err(ValidationError::KeyMismatch { .. })
        ));
        assert!(matches!(
            validate_page("away", &page()),
            Err(ValidationError::KeyMismatch { .. })
        ));
    }

    #[test]
    fn cycle_is_rejected() {
        let p = Page::new("home", "Home")
            .with_element(Element::new("a", ElementKind::Container).with_parent("b"))
            .with_element(Element::new("b", ElementKind::Container).with_parent("a"));
        assert!(matches!(
            validate_page("home", &p),
            Err(ValidationError::ParentCycle { .. })
        ));
    }

    #[test]
    fn leaf_parent_is_rejected() {
        let p = Page::new("home", "Home")
            .with_element(Element::new(
                "img",
                ElementKind::Image {
                    source: ImageSource::Url("x.png".into()),
                    alt: None,
                },
            ))
            .with_element(Element::new("t", ElementKind::Text).with_parent("img"));
        assert!(matches!(
            validate_page("home", &p),
            Err(ValidationError::ParentCannotHaveChildren { .. })
        ));
    }

    #[test]
    fn bad_heading_level_is_rejected() {
        let p = Page::new("home", "Home").with_element(Element::new("h", ElementKind::Heading { level: 0 }));
        assert!(matches!(
            validate_page("home", &p),
            Err(ValidationError::InvalidHeadingLevel { level: 0, .. })
        ));
    }

    #[test]
    fn page_id_must_be_path_safe() {
        let p = Page::new("../../evil", "Evil");
        assert_eq!(
            validate_page("../../evil", &p),
            Err(ValidationError::InvalidPageId("../../evil".into()))
        );
        assert_eq!(validate_page("about_us-2", &Page::new("about_us-2", "About")), Ok(()));
    }

    #[test]
    fn injected_color_is_rejected() {
        let p = Page::new("home", "Home").with_element(Element::new("t", ElementKind::Text).with_style(Style {
            color: Some("red; } body { display: none".into()),
            ..Style::default()
        }));
        assert!(matches!(
            validate_page("home", &p),
            Err(ValidationError::InvalidStyleValue { property: "color", .. })
        ));
    }

    #[test]
    fn color_in_override_is_checked() {
        let p = Page::new("home", "Home").with_element(Element::new("t", ElementKind::Text).with_override(
            Breakpoint::Tablet,
            Style {
                background_color: Some("url(x)".into()),
                ..Style::default()
            },
        ));
        assert!(matches!(
            validate_page("home", &p),
            Err(ValidationError::InvalidStyleValue {
                property: "background-color",
                ..
            })
        ));
    }

    #[test]
    fn font_family_cannot_break_out_of_its_quotes() {
        for family in ["Inter\", sans-serif", "Inter; color: red", "Inter}", "Inter\\", " "] {
            let p = Page::new("home", "Home").with_element(Element::new("t", ElementKind::Text).with_style(Style {
                font_family: Some(family.into()),
                ..Style::default()
            }));
            assert!(
                matches!(
                    validate_page("home", &p),
                    Err(ValidationError::InvalidStyleValue {
                        property: "font-family",
                        ..
                    })
                ),
                "{family:?} should be rejected"
            );
        }
    }

    #[test]
    fn redundant_override_is_rejected() {
        let mut el = Element::new("h", ElementKind::Heading { level: 1 }).with_style(Style {
            font_size: Some(FontSize::Px(32.0)),
            ..Style::default()
        });
        el.responsive.insert(
            Breakpoint::Tablet,
            Style {
                font_size: Some(FontSize::Px(32.0)),
                ..Style::default()
            },
        );
        let p = Page::new("home", "Home").with_element(el);
        assert_eq!(
            validate_page("home", &p),
            Err(ValidationError::RedundantOverride {
                page: "home".into(),
                element: "h".into(),
                breakpoint: Breakpoint::Tablet,
            })
        );
    }

    #[test]
    fn empty_override_is_rejected() {
        let mut el = Element::new("t", ElementKind::Text);
        el.responsive.insert(Breakpoint::Laptop, Style::default());
        let p = Page::new("home", "Home").with_element(el);
        assert!(matches!(
            validate_page("home", &p),
            Err(ValidationError::RedundantOverride {
                breakpoint: Breakpoint::Laptop,
                ..
            })
        ));
    }

    #[test]
    fn two_index_pages_are_rejected() {
        let site = Site::new("site", "Site")
            .with_page(Page::new("a", "A").as_index())
            .with_page(Page::new("b", "B").as_index());
        assert_eq!(
            validate_site(&site),
            Err(ValidationError::MultipleIndexPages {
                first: "a".into(),
                second: "b".into()
            })
        );
    }

    #[test]
    fn empty_site_id_is_rejected() {
        assert_eq!(
            validate_site(&Site::new("", "x")),
            Err(ValidationError::EmptyId("site"))
        );
    }
}
