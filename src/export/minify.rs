//! Minifiers for exported stylesheets and markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Text-to-text minification of one exported file.
pub trait Minify: Send + Sync {
    fn minify(&self, input: &str) -> String;
}

static CSS_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static CSS_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*([{};:,>])\s*").unwrap());

static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<!--[\s\S]*?-->").unwrap());
static BETWEEN_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").unwrap());
static START_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[a-zA-Z][^<>]*>").unwrap());
static EMPTY_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s([a-zA-Z][a-zA-Z0-9-]*)="""#).unwrap());

/// Attributes whose empty value carries meaning (`alt=""` marks a decorative
/// image).
const KEEP_WHEN_EMPTY: &[&str] = &["alt", "value"];

/// Strips comments and every whitespace run CSS does not need.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssMinifier;

impl Minify for CssMinifier {
    fn minify(&self, input: &str) -> String {
        let out = CSS_COMMENT.replace_all(input, "");
        let out = WHITESPACE.replace_all(&out, " ");
        let out = CSS_PUNCTUATION.replace_all(&out, "$1");
        out.replace(";}", "}").trim().to_owned()
    }
}

/// Strips comments, inter-tag whitespace and empty attributes inside start
/// tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlMinifier;

impl Minify for HtmlMinifier {
    fn minify(&self, input: &str) -> String {
        let out = HTML_COMMENT.replace_all(input, "");
        let out = START_TAG.replace_all(&out, |tag: &Captures<'_>| {
            EMPTY_ATTRIBUTE
                .replace_all(&tag[0], |attr: &Captures<'_>| {
                    if KEEP_WHEN_EMPTY.contains(&&attr[1]) {
                        attr[0].to_owned()
                    } else {
                        String::new()
                    }
                })
                .into_owned()
        });
        let out = BETWEEN_TAGS.replace_all(&out, "><");
        let out = WHITESPACE.replace_all(&out, " ");
        out.trim().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn css() {
        let input = "/* base */\n#a {\n  width: 100%;\n  font-family: \"Playfair Display\", sans-serif;\n}\n\n@media (max-width: 640px) {\n  #a {\n    width: 10px;\n  }\n}\n";
        assert_eq!(
            CssMinifier.minify(input),
            "#a{width:100%;font-family:\"Playfair Display\",sans-serif}@media (max-width:640px){#a{width:10px}}"
        );
    }

    #[test]
    fn html() {
        let input = "<!-- page -->\n<body>\n  <p id=\"t\" class=\"\">Hello   world</p>\n  <img id=\"i\" alt=\"\">\n</body>\n";
        assert_eq!(
            HtmlMinifier.minify(input),
            "<body><p id=\"t\">Hello world</p><img id=\"i\" alt=\"\"></body>"
        );
    }

    #[test]
    fn text_that_looks_like_an_attribute_is_kept() {
        let input = "<p id=\"q\" title=\"\">He said x=\"\" twice</p>";
        assert_eq!(
            HtmlMinifier.minify(input),
            "<p id=\"q\">He said x=\"\" twice</p>"
        );
    }

    #[test]
    fn minifiers_are_trait_objects() {
        let minifiers: Vec<Box<dyn Minify>> = vec![Box::new(CssMinifier), Box::new(HtmlMinifier)];
        assert!(minifiers.iter().all(|m| m.minify("  ").is_empty()));
    }
}
