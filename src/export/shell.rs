//! HTML document shell and page file naming.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::dom::serialize::{escape_attribute, escape_text};
use crate::model::page::{slugify, Site};

pub const FAVICON_PATH: &str = "src/favicon.ico";
pub const GLOBAL_STYLESHEET_PATH: &str = "src/style.css";

pub fn base_stylesheet_path(page_id: &str) -> String {
    format!("src/{page_id}_index.css")
}

pub fn responsive_stylesheet_path(page_id: &str) -> String {
    format!("src/{page_id}_responsive.css")
}

/// Everything the shell needs besides the serialized body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHead<'a> {
    pub title: &'a str,
    pub page_id: &'a str,
    pub description: Option<&'a str>,
    pub webfont_url: Option<&'a str>,
}

/// Wrap a page body (already serialized at depth 2) in the document shell.
pub fn render_document(head: &DocumentHead<'_>, body: &str) -> String {
    let mut links = vec![format!("<link rel=\"icon\" href=\"{FAVICON_PATH}\">")];
    if let Some(webfont) = head.webfont_url {
        links.push(format!(
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape_attribute(webfont)
        ));
    }
    for href in [
        GLOBAL_STYLESHEET_PATH.to_owned(),
        base_stylesheet_path(head.page_id),
        responsive_stylesheet_path(head.page_id),
    ] {
        links.push(format!(
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape_attribute(&href)
        ));
    }

    let mut out = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n");
    out.push_str("    <meta charset=\"utf-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    if let Some(description) = head.description {
        out.push_str(&format!(
            "    <meta name=\"description\" content=\"{}\">\n",
            escape_attribute(description)
        ));
    }
    out.push_str(&format!("    <title>{}</title>\n", escape_text(head.title)));
    for link in links {
        out.push_str("    ");
        out.push_str(&link);
        out.push('\n');
    }
    out.push_str("  </head>\n  <body>\n");
    out.push_str(body);
    out.push_str("  </body>\n</html>\n");
    out
}

/// Archive file name of every page, by page id.
///
/// The index page is `index.html`; every other page is its slugified name,
/// with `-2`, `-3`, ... appended when two pages would collide.
pub fn page_file_names(site: &Site) -> IndexMap<String, String> {
    let mut taken = HashSet::new();
    let mut names = IndexMap::new();
    if let Some(index) = site.index_page() {
        taken.insert("index".to_owned());
        names.insert(index.id.clone(), "index.html".to_owned());
    }
    for page in site.pages.values() {
        if names.contains_key(&page.id) {
            continue;
        }
        let slug = slugify(&page.name);
        let mut candidate = slug.clone();
        let mut n = 2;
        while !taken.insert(candidate.clone()) {
            candidate = format!("{slug}-{n}");
            n += 1;
        }
        names.insert(page.id.clone(), format!("{candidate}.html"));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::page::Page;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_shell() {
        let head = DocumentHead {
            title: "Home & Away",
            page_id: "home",
            description: None,
            webfont_url: Some("https://fonts.googleapis.com/css2?family=Inter&display=swap"),
        };
        let doc = render_document(&head, "    <section id=\"s\"></section>\n");
        assert_snapshot!(doc, @r#"
        <!DOCTYPE html>
        <html lang="en">
          <head>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <title>Home &amp; Away</title>
            <link rel="icon" href="src/favicon.ico">
            <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Inter&amp;display=swap">
            <link rel="stylesheet" href="src/style.css">
            <link rel="stylesheet" href="src/home_index.css">
            <link rel="stylesheet" href="src/home_responsive.css">
          </head>
          <body>
            <section id="s"></section>
          </body>
        </html>
        "#);
    }

    #[test]
    fn file_names_avoid_collisions() {
        let site = Site::new("s", "Site")
            .with_page(Page::new("p1", "About Us"))
            .with_page(Page::new("p2", "Home").as_index())
            .with_page(Page::new("p3", "about us!"))
            .with_page(Page::new("p4", "Index"));
        let names: Vec<(String, String)> = page_file_names(&site).into_iter().collect();
        assert_eq!(
            names,
            vec![
                ("p2".into(), "index.html".into()),
                ("p1".into(), "about-us.html".into()),
                ("p3".into(), "about-us-2.html".into()),
                ("p4".into(), "index-2.html".into()),
            ]
        );
    }
}
