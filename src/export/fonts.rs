//! Webfont request trimming.

use std::collections::BTreeSet;

use url::form_urlencoded;
use url::Url;

/// Drop every `family` parameter whose family no page applies.
///
/// Family parameters follow the Google Fonts shape, `Name+With+Spaces:axes`.
/// Other parameters are kept verbatim. Returns `None` when no family is left.
pub fn trim_webfont_url(
    url: &str,
    used: &BTreeSet<String>,
) -> Result<Option<String>, url::ParseError> {
    let mut parsed = Url::parse(url)?;
    let Some(query) = parsed.query() else {
        return Ok(Some(parsed.into()));
    };

    let mut families = 0;
    let kept: Vec<&str> = query
        .split('&')
        .filter(|segment| {
            let Some((key, value)) = form_urlencoded::parse(segment.as_bytes()).next() else {
                return false;
            };
            if key != "family" {
                return true;
            }
            let name = value.split(':').next().unwrap_or_default().trim();
            let keep = used.contains(name);
            families += usize::from(keep);
            keep
        })
        .collect();

    if families == 0 {
        return Ok(None);
    }
    let kept = kept.join("&");
    parsed.set_query(Some(&kept));
    Ok(Some(parsed.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@400;700&family=Playfair+Display&family=Lora&display=swap";

    fn used(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_only_used_families() {
        assert_eq!(
            trim_webfont_url(URL, &used(&["Playfair Display", "Inter"])).unwrap(),
            Some(
                "https://fonts.googleapis.com/css2?family=Inter:wght@400;700&family=Playfair+Display&display=swap"
                    .to_string()
            )
        );
    }

    #[test]
    fn no_used_family_drops_the_request() {
        assert_eq!(trim_webfont_url(URL, &used(&["Roboto"])).unwrap(), None);
    }

    #[test]
    fn invalid_url() {
        assert!(trim_webfont_url("fonts", &used(&[])).is_err());
    }
}
