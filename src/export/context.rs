//! Mutable state threaded through one export run.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Image numbering, blob → file mapping, the portable image side-map and
/// the fonts pages actually apply.
///
/// Pages are processed strictly in order, so numbering is deterministic for
/// a given site.
#[derive(Debug, Default)]
pub struct ExportContext {
    image_counter: u32,
    image_paths: HashMap<String, String>,
    images: BTreeMap<String, String>,
    used_fonts: BTreeSet<String>,
}

impl ExportContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive path already assigned to `blob_id`, if any.
    pub fn image_path(&self, blob_id: &str) -> Option<&str> {
        self.image_paths.get(blob_id).map(String::as_str)
    }

    /// Assign the next `src/images/image_N.ext` path to `blob_id` and keep its
    /// data URL for the manifest.
    pub fn record_image(&mut self, blob_id: &str, extension: &str, data_url: String) -> String {
        self.image_counter += 1;
        let path = format!("src/images/image_{}.{extension}", self.image_counter);
        self.image_paths.insert(blob_id.to_owned(), path.clone());
        self.images.insert(blob_id.to_owned(), data_url);
        path
    }

    pub fn record_fonts(&mut self, families: impl IntoIterator<Item = String>) {
        self.used_fonts.extend(families);
    }

    pub fn used_fonts(&self) -> &BTreeSet<String> {
        &self.used_fonts
    }

    pub fn image_count(&self) -> u32 {
        self.image_counter
    }

    /// Blob id → data URL.
    pub fn into_images(self) -> BTreeMap<String, String> {
        self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_are_numbered_in_order() {
        let mut ctx = ExportContext::new();
        assert_eq!(ctx.record_image("a", "png", "data:a".into()), "src/images/image_1.png");
        assert_eq!(ctx.record_image("b", "jpg", "data:b".into()), "src/images/image_2.jpg");
        assert_eq!(ctx.image_path("a"), Some("src/images/image_1.png"));
        assert_eq!(ctx.image_path("c"), None);
        assert_eq!(ctx.image_count(), 2);
        assert_eq!(ctx.into_images().len(), 2);
    }

    #[test]
    fn fonts_are_deduplicated() {
        let mut ctx = ExportContext::new();
        ctx.record_fonts(["Inter".to_string(), "Lora".to_string()]);
        ctx.record_fonts(["Inter".to_string()]);
        assert_eq!(ctx.used_fonts().len(), 2);
    }
}
