//! Integration tests for pagewright.
//!
//! These tests exercise the public API from outside the crate: the editor
//! round trip, stylesheet synthesis, export and re-import working together.

use std::io::{Cursor, Read};
use std::sync::Arc;

use pagewright::compiler::{compile_page, compile_with_cache, extract_all, synthesize};
use pagewright::css::breakpoint::Breakpoint;
use pagewright::css::styles::{FontSize, Style};
use pagewright::dom::serialize::{node_html, SerializeOptions};
use pagewright::export::{import_into, Exporter, ImportError};
use pagewright::model::{Element, Page, Site};
use pagewright::store::{BlobStore, MemoryStore, SiteStore};
use pagewright::testing::fixtures::{self, TEAM_PHOTO_BLOB};
use pretty_assertions::assert_eq;

fn flat(elements: Vec<Element>) -> Vec<Element> {
    elements.into_iter().flat_map(Element::flatten).collect()
}

fn read_entry(archive: &[u8], name: &str) -> String {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
    let mut out = String::new();
    zip.by_name(name).unwrap().read_to_string(&mut out).unwrap();
    out
}

// ---------------------------------------------------------------------------
// Editor round trip
// ---------------------------------------------------------------------------

#[test]
fn test_landing_page_round_trip() {
    let page = fixtures::landing_page();
    let tree = compile_page(&page, Breakpoint::Monitor);
    let back = flat(extract_all(&tree).unwrap());
    let original: Vec<Element> = page.elements.values().cloned().collect();
    assert_eq!(back, original);
}

#[test]
fn test_round_trip_at_every_active_breakpoint() {
    let page = fixtures::about_page();
    for bp in Breakpoint::ALL {
        let tree = compile_page(&page, bp);
        let back = flat(extract_all(&tree).unwrap());
        let ids: Vec<&str> = back.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["section-about", "image-1", "input-1"]);
        let image = &back[1];
        let completed = page.elements["image-1"].style.merge(&Style {
            left: Some(0.0),
            top: Some(0.0),
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            ..Style::default()
        });
        assert_eq!(image.style, completed);
    }
}

#[test]
fn test_editing_a_rebuilt_page_keeps_overrides_minimal() {
    let page = fixtures::landing_page();
    let tree = compile_page(&page, Breakpoint::Tablet);
    let mut heading = flat(extract_all(&tree).unwrap())
        .into_iter()
        .find(|e| e.id == "heading-1")
        .unwrap();

    heading.apply_style(
        Breakpoint::Tablet,
        &Style {
            font_size: Some(FontSize::Px(32.0)),
            ..Style::default()
        },
    );
    assert!(heading.responsive.is_empty());
}

#[test]
fn test_editor_markup_uses_cached_composites() {
    let mut page = fixtures::about_page();
    page.elements.get_mut("image-1").unwrap().style.left = Some(40.0);
    let first = compile_page(&page, Breakpoint::Monitor);
    let cache = first.declaration_cache();

    let mut edited = page.clone();
    let image = edited.elements.get_mut("image-1").unwrap();
    image.style = Style {
        rotate: Some(10.0),
        ..Style::default()
    };
    let tree = compile_with_cache(edited.elements.values(), Breakpoint::Monitor, &cache);
    let node = tree.node_for_element("image-1").unwrap();
    let html = node_html(&tree, node, SerializeOptions::editor());
    assert!(html.contains("transform: translate(40px, 0px) rotate(10deg) scale(1, 1)"));
}

// ---------------------------------------------------------------------------
// Stylesheets
// ---------------------------------------------------------------------------

#[test]
fn test_heading_scenario_stylesheets() {
    let sheets = synthesize(&fixtures::landing_page());
    assert!(sheets.base.contains("#heading-1 {\n  font-family: \"Playfair Display\", sans-serif;\n  font-size: 32px;\n  font-weight: 700;\n}\n"));
    assert!(sheets
        .responsive
        .starts_with("@media (max-width: 1024px) {\n  #heading-1 {\n    font-size: 24px;\n  }\n}\n"));
    assert!(sheets.responsive.contains(
        "@media (max-width: 640px) {\n  #button-1 {\n    width: 100%;\n  }\n\n  #grid-1 {\n    grid-template-columns: repeat(1, 1fr);\n  }\n}\n"
    ));
}

#[test]
fn test_stylesheets_are_safe_to_build_concurrently() {
    let site = fixtures::sample_site();
    let expected: Vec<_> = site.pages.values().map(synthesize).collect();
    let handles: Vec<_> = site
        .pages
        .values()
        .cloned()
        .map(|page| std::thread::spawn(move || synthesize(&page)))
        .collect();
    let actual: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_model_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Site>();
    assert_send_sync::<Page>();
    assert_send_sync::<Element>();
    assert_send_sync::<Style>();
    assert_send_sync::<pagewright::dom::MarkupTree>();
    assert_send_sync::<MemoryStore>();
}

// ---------------------------------------------------------------------------
// Export and import
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_export_then_import() {
    let exporter = Exporter::new(
        fixtures::export_config(),
        Arc::new(fixtures::blob_store()),
        Arc::new(fixtures::favicon_fetcher()),
    );
    let site = fixtures::sample_site();
    let exported = exporter.export(&site).await.unwrap();

    let manifest = read_entry(&exported.archive, "site.json");
    let store = MemoryStore::new();
    let imported = import_into(&manifest, &store, &store).await.unwrap();

    assert_eq!(imported, site);
    assert_eq!(store.get_site("site-1").await.unwrap(), site);
    assert_eq!(
        store.get_blob(TEAM_PHOTO_BLOB).await.unwrap(),
        fixtures::team_photo()
    );
}

#[tokio::test]
async fn test_exported_markup_matches_compiler() {
    let exporter = Exporter::new(
        fixtures::export_config(),
        Arc::new(fixtures::blob_store()),
        Arc::new(fixtures::favicon_fetcher()),
    );
    let exported = exporter.export(&fixtures::sample_site()).await.unwrap();
    let index = read_entry(&exported.archive, "index.html");

    assert!(index.contains("<title>Welcome</title>"));
    assert!(index.contains("<h1 id=\"heading-1\">Welcome</h1>"));
    assert!(index.contains("<a id=\"button-1\" href=\"about-us.html\">"));
    assert!(index.contains("<link rel=\"stylesheet\" href=\"src/home_responsive.css\">"));
    assert!(!index.contains("style="));

    let css = read_entry(&exported.archive, "src/home_index.css");
    assert_eq!(css, synthesize(&fixtures::landing_page()).base);
}

#[tokio::test]
async fn test_import_rejects_tampered_manifest() {
    let exporter = Exporter::new(
        fixtures::export_config(),
        Arc::new(fixtures::blob_store()),
        Arc::new(fixtures::favicon_fetcher()),
    );
    let exported = exporter.export(&fixtures::sample_site()).await.unwrap();
    let manifest = read_entry(&exported.archive, "site.json");
    let tampered = manifest.replace("\"level\": 1", "\"level\": \"one\"");

    let store = MemoryStore::new();
    let result = import_into(&tampered, &store, &store).await;
    assert!(matches!(result, Err(ImportError::Json(_))));
    assert!(store.get_site("site-1").await.is_err());
    assert!(store.get_blob(TEAM_PHOTO_BLOB).await.is_err());
}
