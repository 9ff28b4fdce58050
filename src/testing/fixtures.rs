//! Sample records and collaborators.

use crate::css::breakpoint::Breakpoint;
use crate::css::scalar::{Length, TrackSize};
use crate::css::styles::{AlignItems, Display, FlexDirection, FontSize, FontWeight, Style};
use crate::export::assets::StaticFetcher;
use crate::export::config::{ExportConfig, DEFAULT_FAVICON_URL};
use crate::model::{Element, ElementKind, ImageSource, InputType, Page, Site};
use crate::store::{Blob, MemoryStore};

pub const TEAM_PHOTO_BLOB: &str = "blob-team-photo";

pub const FAVICON_BYTES: &[u8] = &[0x00, 0x00, 0x01, 0x00, 0x01, 0x00];

pub const WEBFONT_URL: &str =
    "https://fonts.googleapis.com/css2?family=Playfair+Display:wght@700&family=Lora&display=swap";

/// The index page: hero section with a heading, copy, a call to action and
/// a three-column grid.
pub fn landing_page() -> Page {
    Page::new("home", "Home")
        .as_index()
        .with_title("Welcome")
        .with_element(Element::new("section-1", ElementKind::Section).with_style(Style {
            height: Some(Length::Screen),
            display: Some(Display::Flex),
            flex_direction: Some(FlexDirection::Column),
            align_items: Some(AlignItems::Center),
            ..Style::default()
        }))
        .with_element(
            Element::new("heading-1", ElementKind::Heading { level: 1 })
                .with_parent("section-1")
                .with_content("Welcome")
                .with_style(Style {
                    font_family: Some("Playfair Display".into()),
                    font_size: Some(FontSize::Px(32.0)),
                    font_weight: Some(FontWeight::Bold),
                    ..Style::default()
                })
                .with_override(
                    Breakpoint::Tablet,
                    Style {
                        font_size: Some(FontSize::Px(24.0)),
                        ..Style::default()
                    },
                ),
        )
        .with_element(
            Element::new("text-1", ElementKind::Text)
                .with_parent("section-1")
                .with_content("Build pages visually.")
                .with_style(Style {
                    color: Some("#333333".into()),
                    ..Style::default()
                }),
        )
        .with_element(
            Element::new(
                "button-1",
                ElementKind::Button {
                    href: Some("about-us.html".into()),
                },
            )
            .with_parent("section-1")
            .with_content("Learn more")
            .with_style(Style {
                padding_top: Some(Length::Px(12.0)),
                padding_bottom: Some(Length::Px(12.0)),
                background_color: Some("#1d4ed8".into()),
                color: Some("#ffffff".into()),
                z_index: Some(1),
                ..Style::default()
            })
            .with_override(
                Breakpoint::Smartphone,
                Style {
                    width: Some(Length::Fill),
                    ..Style::default()
                },
            ),
        )
        .with_element(
            Element::new("grid-1", ElementKind::Grid)
                .with_parent("section-1")
                .with_style(Style {
                    display: Some(Display::Grid),
                    columns: Some(3),
                    column_width: Some(TrackSize::Auto),
                    gap: Some(Length::Px(16.0)),
                    ..Style::default()
                })
                .with_override(
                    Breakpoint::Smartphone,
                    Style {
                        columns: Some(1),
                        ..Style::default()
                    },
                ),
        )
}

/// A second page with a blob image and a form input.
pub fn about_page() -> Page {
    Page::new("about", "About Us")
        .with_element(Element::new("section-about", ElementKind::Section))
        .with_element(
            Element::new(
                "image-1",
                ElementKind::Image {
                    source: ImageSource::Blob(TEAM_PHOTO_BLOB.into()),
                    alt: Some("Our team".into()),
                },
            )
            .with_parent("section-about")
            .with_style(Style {
                width: Some(Length::Fill),
                rotate: Some(-2.0),
                ..Style::default()
            }),
        )
        .with_element(
            Element::new(
                "input-1",
                ElementKind::Input {
                    input_type: InputType::Email,
                    placeholder: Some("you@example.com".into()),
                    autocomplete: true,
                },
            )
            .with_parent("section-about"),
        )
}

pub fn sample_site() -> Site {
    let mut site = Site::new("site-1", "Sample")
        .with_page(landing_page())
        .with_page(about_page());
    site.description = Some("A sample site".into());
    site
}

/// A PNG signature followed by a few payload bytes.
pub fn team_photo() -> Blob {
    Blob::new(
        "image/png",
        vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3, 4],
    )
}

pub fn blob_store() -> MemoryStore {
    MemoryStore::new().with_blob(TEAM_PHOTO_BLOB, team_photo())
}

pub fn favicon_fetcher() -> StaticFetcher {
    StaticFetcher::new().with_asset(DEFAULT_FAVICON_URL, FAVICON_BYTES)
}

pub fn export_config() -> ExportConfig {
    ExportConfig::new().with_webfont_url(WEBFONT_URL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validate_site;

    #[test]
    fn sample_site_is_valid() {
        assert_eq!(validate_site(&sample_site()), Ok(()));
        assert_eq!(sample_site().referenced_blobs(), vec![TEAM_PHOTO_BLOB]);
    }
}
