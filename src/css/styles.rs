//! Style record with typed `Option<T>` fields for every element property.
//!
//! This is the central style representation shared by the cascade, the
//! declaration generator and the reverse extractor. `None` means "not set".

use serde::{Deserialize, Serialize};

use crate::css::scalar::{Length, TrackSize};

/// Text alignment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

/// Display property options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    Block,
    Inline,
    Flex,
    Grid,
    None,
}

/// Main axis of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

/// Cross-axis alignment of flex items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignItems {
    Start,
    Center,
    End,
    Stretch,
    Baseline,
}

/// Main-axis distribution. `Between`/`Around`/`Evenly` are the abbreviated
/// `space-*` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JustifyContent {
    Start,
    Center,
    End,
    Between,
    Around,
    Evenly,
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    None,
    Solid,
    Dashed,
    Dotted,
    Double,
}

/// Explicit positioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Relative,
    Absolute,
}

/// Named font weights. `Inherit` is the sentinel for "whatever the parent
/// computes".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    Regular,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
    Inherit,
}

impl FontWeight {
    /// Every named weight, lightest first, followed by `Inherit`.
    pub const ALL: [FontWeight; 10] = [
        FontWeight::Thin,
        FontWeight::ExtraLight,
        FontWeight::Light,
        FontWeight::Regular,
        FontWeight::Medium,
        FontWeight::SemiBold,
        FontWeight::Bold,
        FontWeight::ExtraBold,
        FontWeight::Black,
        FontWeight::Inherit,
    ];

    /// The CSS `font-weight` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            FontWeight::Thin => "100",
            FontWeight::ExtraLight => "200",
            FontWeight::Light => "300",
            FontWeight::Regular => "400",
            FontWeight::Medium => "500",
            FontWeight::SemiBold => "600",
            FontWeight::Bold => "700",
            FontWeight::ExtraBold => "800",
            FontWeight::Black => "900",
            FontWeight::Inherit => "inherit",
        }
    }
}

/// Font size in pixels, or inherited from the parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSize {
    Px(f64),
    Inherit(InheritKeyword),
}

impl FontSize {
    /// Shorthand for the inherited sentinel.
    pub fn inherit() -> Self {
        FontSize::Inherit(InheritKeyword::Inherit)
    }
}

/// The literal `"Inherit"` keyword in stored styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InheritKeyword {
    Inherit,
}

/// Generates the [`Style`] struct and the field-wise operations on it.
macro_rules! style_record {
    ($( $(#[$meta:meta])* $field:ident : $ty:ty ),* $(,)?) => {
        /// Every style property of an element. Each field is `Option<T>`.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct Style {
            $(
                $(#[$meta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl Style {
            /// Field names in declaration order (snake_case).
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            /// Merge `other` on top of `self`: each field set in `other` wins,
            /// otherwise `self`'s value is kept.
            pub fn merge(&self, other: &Style) -> Style {
                Style {
                    $($field: other.$field.clone().or_else(|| self.$field.clone()),)*
                }
            }

            /// Returns `true` if no property is set.
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }

            /// Properties set in `self` whose value differs from `other`.
            ///
            /// Fields that are set in `other` but not in `self` are not
            /// reported: an override can only add values, never unset them.
            pub fn diff(&self, other: &Style) -> Style {
                Style {
                    $($field: match (&self.$field, &other.$field) {
                        (Some(a), Some(b)) if a == b => None,
                        (a, _) => a.clone(),
                    },)*
                }
            }

            /// Names of the fields that are set.
            pub fn defined_fields(&self) -> Vec<&'static str> {
                let mut out = Vec::new();
                $(if self.$field.is_some() { out.push(stringify!($field)); })*
                out
            }
        }
    };
}

style_record! {
    // Box model
    width: Length,
    height: Length,
    padding_top: Length,
    padding_right: Length,
    padding_bottom: Length,
    padding_left: Length,
    margin_top: Length,
    margin_right: Length,
    margin_bottom: Length,
    margin_left: Length,
    gap: Length,

    // Border
    border_width: Length,
    border_radius: Length,
    border_style: BorderStyle,
    border_color: String,

    // Colors
    color: String,
    background_color: String,

    // Typography
    font_family: String,
    font_size: FontSize,
    font_weight: FontWeight,
    text_align: TextAlign,

    // Flex group
    display: Display,
    flex_direction: FlexDirection,
    align_items: AlignItems,
    justify_content: JustifyContent,

    // Grid group
    columns: u32,
    column_width: TrackSize,
    rows: u32,
    row_height: TrackSize,

    // Transform group
    left: f64,
    top: f64,
    rotate: f64,
    scale_x: f64,
    scale_y: f64,

    // Stacking
    z_index: i32,
    position: Position,
}

impl Style {
    /// Create a new `Style` with all fields set to `None`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_is_empty() {
        assert!(Style::new().is_empty());
        assert!(Style::default().defined_fields().is_empty());
    }

    #[test]
    fn not_empty_when_field_set() {
        let mut s = Style::new();
        s.color = Some("#ff0000".into());
        assert!(!s.is_empty());
        assert_eq!(s.defined_fields(), vec!["color"]);
    }

    #[test]
    fn merge_other_overrides_base() {
        let mut base = Style::new();
        base.color = Some("#ff0000".into());
        base.background_color = Some("#ffffff".into());

        let mut other = Style::new();
        other.color = Some("#0000ff".into());

        let merged = base.merge(&other);
        assert_eq!(merged.color.as_deref(), Some("#0000ff"));
        assert_eq!(merged.background_color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn merge_is_not_commutative() {
        let mut a = Style::new();
        a.z_index = Some(1);
        let mut b = Style::new();
        b.z_index = Some(2);
        assert_eq!(a.merge(&b).z_index, Some(2));
        assert_eq!(b.merge(&a).z_index, Some(1));
    }

    #[test]
    fn diff_keeps_only_changed_values() {
        let mut a = Style::new();
        a.width = Some(Length::Px(10.0));
        a.height = Some(Length::Fill);
        a.rotate = Some(45.0);

        let mut b = Style::new();
        b.width = Some(Length::Px(10.0));
        b.height = Some(Length::Auto);
        b.color = Some("#000000".into());

        let d = a.diff(&b);
        assert_eq!(d.width, None);
        assert_eq!(d.height, Some(Length::Fill));
        assert_eq!(d.rotate, Some(45.0));
        assert_eq!(d.color, None);
    }

    #[test]
    fn serde_uses_camel_case_and_skips_unset() {
        let mut s = Style::new();
        s.font_weight = Some(FontWeight::SemiBold);
        s.scale_x = Some(1.5);
        s.justify_content = Some(JustifyContent::Between);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"fontWeight":"SemiBold","justifyContent":"between","scaleX":1.5}"#
        );
        let back: Style = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn serde_rejects_unknown_property_and_wrong_type() {
        assert!(serde_json::from_str::<Style>(r#"{"colour":"red"}"#).is_err());
        assert!(serde_json::from_str::<Style>(r#"{"zIndex":"high"}"#).is_err());
    }

    #[test]
    fn font_size_inherit_sentinel() {
        let s: FontSize = serde_json::from_str("\"Inherit\"").unwrap();
        assert_eq!(s, FontSize::inherit());
        let s: FontSize = serde_json::from_str("18").unwrap();
        assert_eq!(s, FontSize::Px(18.0));
    }

    #[test]
    fn font_weight_css_values() {
        assert_eq!(FontWeight::Thin.as_css(), "100");
        assert_eq!(FontWeight::Black.as_css(), "900");
        assert_eq!(FontWeight::Inherit.as_css(), "inherit");
    }
}
