//! Declaration generator: [`Style`] → concrete CSS declarations.
//!
//! Pure and property-by-property. Unset properties produce nothing, so the
//! output is as sparse as the input. The reverse direction lives in
//! [`crate::css::properties`]; every declaration emitted here has a matching
//! reader there.

use std::fmt;

use indexmap::IndexMap;

use crate::css::scalar::{Axis, Length};
use crate::css::styles::*;

/// Insertion-ordered CSS declarations (`property → value`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: IndexMap<String, String>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration, replacing any previous value in place.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.entries.shift_remove(property)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Declarations of `self` that are missing from, or different in, `base`.
    pub fn diff(&self, base: &Declarations) -> Declarations {
        let entries = self
            .entries
            .iter()
            .filter(|(k, v)| base.entries.get(*k) != Some(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Declarations { entries }
    }

    /// Inline `style` attribute form: `width: 10px; height: 20px`.
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Declarations {
    /// One `property: value;` per line, for use inside a rule block.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self.iter() {
            writeln!(f, "{k}: {v};")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut decls = Declarations::new();
        for (k, v) in iter {
            decls.insert(k, v);
        }
        decls
    }
}

/// Generate declarations for an (already cascaded and dependency-resolved)
/// style.
pub fn generate(style: &Style) -> Declarations {
    let mut out = Declarations::new();

    let lengths: [(&str, &Option<Length>, Axis); 13] = [
        ("width", &style.width, Axis::Horizontal),
        ("height", &style.height, Axis::Vertical),
        ("padding-top", &style.padding_top, Axis::Vertical),
        ("padding-right", &style.padding_right, Axis::Horizontal),
        ("padding-bottom", &style.padding_bottom, Axis::Vertical),
        ("padding-left", &style.padding_left, Axis::Horizontal),
        ("margin-top", &style.margin_top, Axis::Vertical),
        ("margin-right", &style.margin_right, Axis::Horizontal),
        ("margin-bottom", &style.margin_bottom, Axis::Vertical),
        ("margin-left", &style.margin_left, Axis::Horizontal),
        ("gap", &style.gap, Axis::Vertical),
        ("border-width", &style.border_width, Axis::Vertical),
        ("border-radius", &style.border_radius, Axis::Vertical),
    ];
    for (property, value, axis) in lengths {
        if let Some(length) = value {
            out.insert(property, length.to_css(axis));
        }
    }

    if let Some(border_style) = style.border_style {
        out.insert("border-style", border_style_css(border_style));
    }
    if let Some(color) = &style.border_color {
        out.insert("border-color", color.as_str());
    }
    if let Some(color) = &style.color {
        out.insert("color", color.as_str());
    }
    if let Some(color) = &style.background_color {
        out.insert("background-color", color.as_str());
    }

    if let Some(family) = &style.font_family {
        out.insert("font-family", format!("\"{family}\", sans-serif"));
    }
    match style.font_size {
        Some(FontSize::Px(size)) => out.insert("font-size", format!("{size}px")),
        Some(FontSize::Inherit(_)) => out.insert("font-size", "inherit"),
        None => {}
    }
    if let Some(weight) = style.font_weight {
        out.insert("font-weight", weight.as_css());
    }
    if let Some(align) = style.text_align {
        out.insert("text-align", text_align_css(align));
    }

    if let Some(display) = style.display {
        out.insert("display", display_css(display));
    }
    if let Some(direction) = style.flex_direction {
        out.insert("flex-direction", flex_direction_css(direction));
    }
    if let Some(align) = style.align_items {
        out.insert("align-items", align_items_css(align));
    }
    if let Some(justify) = style.justify_content {
        out.insert("justify-content", justify_content_css(justify));
    }

    if let (Some(columns), Some(width)) = (style.columns, style.column_width) {
        out.insert("grid-template-columns", format!("repeat({columns}, {width})"));
    }
    if let (Some(rows), Some(height)) = (style.rows, style.row_height) {
        out.insert("grid-template-rows", format!("repeat({rows}, {height})"));
    }

    if let (Some(x), Some(y), Some(deg), Some(sx), Some(sy)) = (
        style.left,
        style.top,
        style.rotate,
        style.scale_x,
        style.scale_y,
    ) {
        out.insert(
            "transform",
            format!("translate({x}px, {y}px) rotate({deg}deg) scale({sx}, {sy})"),
        );
    }

    if let Some(position) = style.position {
        out.insert("position", position_css(position));
    }
    if let Some(z) = style.z_index {
        out.insert("z-index", z.to_string());
        if style.position.is_none() {
            out.insert("position", "relative");
        }
    }

    out
}

fn border_style_css(v: BorderStyle) -> &'static str {
    match v {
        BorderStyle::None => "none",
        BorderStyle::Solid => "solid",
        BorderStyle::Dashed => "dashed",
        BorderStyle::Dotted => "dotted",
        BorderStyle::Double => "double",
    }
}

fn text_align_css(v: TextAlign) -> &'static str {
    match v {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
        TextAlign::Justify => "justify",
    }
}

fn display_css(v: Display) -> &'static str {
    match v {
        Display::Block => "block",
        Display::Inline => "inline",
        Display::Flex => "flex",
        Display::Grid => "grid",
        Display::None => "none",
    }
}

fn flex_direction_css(v: FlexDirection) -> &'static str {
    match v {
        FlexDirection::Row => "row",
        FlexDirection::Column => "column",
        FlexDirection::RowReverse => "row-reverse",
        FlexDirection::ColumnReverse => "column-reverse",
    }
}

fn align_items_css(v: AlignItems) -> &'static str {
    match v {
        AlignItems::Start => "flex-start",
        AlignItems::Center => "center",
        AlignItems::End => "flex-end",
        AlignItems::Stretch => "stretch",
        AlignItems::Baseline => "baseline",
    }
}

fn justify_content_css(v: JustifyContent) -> &'static str {
    match v {
        JustifyContent::Start => "flex-start",
        JustifyContent::Center => "center",
        JustifyContent::End => "flex-end",
        JustifyContent::Between => "space-between",
        JustifyContent::Around => "space-around",
        JustifyContent::Evenly => "space-evenly",
    }
}

fn position_css(v: Position) -> &'static str {
    match v {
        Position::Relative => "relative",
        Position::Absolute => "absolute",
    }
}
