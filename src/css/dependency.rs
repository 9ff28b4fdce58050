//! Composite-property dependency resolution.
//!
//! Some properties only render as one combined declaration (`transform`,
//! `grid-template-*`, the flex triad). A partial update to such a group must
//! not erase the members it does not mention, so for every group the update
//! touches, the missing members are filled in from the group's current
//! values.

use std::collections::HashMap;

use crate::css::declaration::Declarations;
use crate::css::properties::{style_from_declarations, TransformParts};
use crate::css::scalar::TrackSize;
use crate::css::styles::Style;

/// Last-known compiled declarations per element id.
///
/// This is where the "current" value of a composite group is read from once
/// an element has been compiled at least once.
pub type DeclarationCache = HashMap<String, Declarations>;

/// Where the current values of a composite group come from, in priority
/// order: compiled declarations, then the model, then the group defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleSource<'a> {
    pub compiled: Option<&'a Declarations>,
    pub model: Option<&'a Style>,
}

impl<'a> StyleSource<'a> {
    /// No compiled node and no model yet (first paint).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_model(model: &'a Style) -> Self {
        Self {
            compiled: None,
            model: Some(model),
        }
    }

    pub fn with_compiled(mut self, compiled: Option<&'a Declarations>) -> Self {
        self.compiled = compiled;
        self
    }
}

/// A set of properties that are read and written together.
pub struct CompositeGroup {
    pub name: &'static str,
    /// Style fields that belong to the group.
    pub properties: &'static [&'static str],
    /// Copy of `style` restricted to the group's fields.
    members: fn(&Style) -> Style,
    /// Group values when nothing is known yet.
    defaults: fn() -> Style,
}

impl CompositeGroup {
    /// Whether `update` sets any member of this group.
    pub fn touched_by(&self, update: &Style) -> bool {
        !(self.members)(update).is_empty()
    }

    /// Present values of the group: defaults, overlaid with the model, overlaid
    /// with whatever the compiled node reports.
    pub fn derive_current(&self, source: &StyleSource<'_>) -> Style {
        let mut current = (self.defaults)();
        if let Some(model) = source.model {
            current = current.merge(&(self.members)(model));
        }
        if let Some(compiled) = source.compiled {
            let read_back = style_from_declarations(compiled);
            current = current.merge(&(self.members)(&read_back));
        }
        current
    }
}

fn transform_members(s: &Style) -> Style {
    Style {
        left: s.left,
        top: s.top,
        rotate: s.rotate,
        scale_x: s.scale_x,
        scale_y: s.scale_y,
        ..Style::default()
    }
}

fn transform_defaults() -> Style {
    let mut style = Style::default();
    TransformParts::default().apply(&mut style);
    style
}

fn grid_members(s: &Style) -> Style {
    Style {
        columns: s.columns,
        column_width: s.column_width,
        rows: s.rows,
        row_height: s.row_height,
        ..Style::default()
    }
}

/// No tracks, but a count set later gets equal-fraction tracks.
fn grid_defaults() -> Style {
    Style {
        column_width: Some(TrackSize::Auto),
        row_height: Some(TrackSize::Auto),
        ..Style::default()
    }
}

fn flex_members(s: &Style) -> Style {
    Style {
        display: s.display,
        flex_direction: s.flex_direction,
        align_items: s.align_items,
        justify_content: s.justify_content,
        ..Style::default()
    }
}

fn flex_defaults() -> Style {
    Style::default()
}

/// Every composite group.
pub static GROUPS: [CompositeGroup; 3] = [
    CompositeGroup {
        name: "transform",
        properties: &["left", "top", "rotate", "scale_x", "scale_y"],
        members: transform_members,
        defaults: transform_defaults,
    },
    CompositeGroup {
        name: "grid",
        properties: &["columns", "column_width", "rows", "row_height"],
        members: grid_members,
        defaults: grid_defaults,
    },
    CompositeGroup {
        name: "flex",
        properties: &["display", "flex_direction", "align_items", "justify_content"],
        members: flex_members,
        defaults: flex_defaults,
    },
];

/// Complete every composite group `update` touches.
///
/// Values supplied by `update` always win; members it does not mention keep
/// their current value from `source`.
pub fn resolve(update: &Style, source: &StyleSource<'_>) -> Style {
    let mut resolved = update.clone();
    for group in &GROUPS {
        if !group.touched_by(update) {
            continue;
        }
        let current = group.derive_current(source);
        resolved = current.merge(&resolved);
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::declaration::generate;
    use crate::css::styles::{AlignItems, Display, FlexDirection};
    use pretty_assertions::assert_eq;

    fn placed() -> Style {
        Style {
            left: Some(10.0),
            top: Some(20.0),
            rotate: Some(0.0),
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            ..Style::default()
        }
    }

    #[test]
    fn rotate_alone_does_not_clobber_compiled_transform() {
        let compiled = generate(&placed());
        let update = Style {
            rotate: Some(45.0),
            ..Style::default()
        };
        let source = StyleSource::empty().with_compiled(Some(&compiled));
        let resolved = resolve(&update, &source);
        assert_eq!(
            resolved,
            Style {
                left: Some(10.0),
                top: Some(20.0),
                rotate: Some(45.0),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                ..Style::default()
            }
        );
    }

    #[test]
    fn model_is_used_when_nothing_is_compiled() {
        let model = placed();
        let update = Style {
            scale_x: Some(2.0),
            ..Style::default()
        };
        let resolved = resolve(&update, &StyleSource::from_model(&model));
        assert_eq!(resolved.left, Some(10.0));
        assert_eq!(resolved.scale_x, Some(2.0));
        assert_eq!(resolved.scale_y, Some(1.0));
    }

    #[test]
    fn first_paint_uses_identity_transform() {
        let update = Style {
            rotate: Some(30.0),
            ..Style::default()
        };
        let resolved = resolve(&update, &StyleSource::empty());
        assert_eq!(resolved.left, Some(0.0));
        assert_eq!(resolved.top, Some(0.0));
        assert_eq!(resolved.rotate, Some(30.0));
        assert_eq!(resolved.scale_x, Some(1.0));
        assert_eq!(resolved.scale_y, Some(1.0));
    }

    #[test]
    fn columns_alone_keep_column_width() {
        let compiled = generate(&Style {
            columns: Some(2),
            column_width: Some(TrackSize::Px(200.0)),
            ..Style::default()
        });
        let update = Style {
            columns: Some(4),
            ..Style::default()
        };
        let resolved = resolve(&update, &StyleSource::empty().with_compiled(Some(&compiled)));
        assert_eq!(resolved.columns, Some(4));
        assert_eq!(resolved.column_width, Some(TrackSize::Px(200.0)));
    }

    #[test]
    fn first_paint_grid_defaults_to_fractional_tracks() {
        let update = Style {
            columns: Some(3),
            ..Style::default()
        };
        let resolved = resolve(&update, &StyleSource::empty());
        assert_eq!(generate(&resolved).get("grid-template-columns"), Some("repeat(3, 1fr)"));
        assert!(!generate(&resolved).contains("grid-template-rows"));
    }

    #[test]
    fn flex_triad_is_completed_from_model() {
        let model = Style {
            display: Some(Display::Flex),
            flex_direction: Some(FlexDirection::Column),
            ..Style::default()
        };
        let update = Style {
            align_items: Some(AlignItems::Center),
            ..Style::default()
        };
        let resolved = resolve(&update, &StyleSource::from_model(&model));
        assert_eq!(resolved.display, Some(Display::Flex));
        assert_eq!(resolved.flex_direction, Some(FlexDirection::Column));
        assert_eq!(resolved.align_items, Some(AlignItems::Center));
        assert_eq!(resolved.justify_content, None);
    }

    #[test]
    fn untouched_groups_are_left_alone() {
        let model = placed();
        let update = Style {
            color: Some("#000000".into()),
            ..Style::default()
        };
        let resolved = resolve(&update, &StyleSource::from_model(&model));
        assert_eq!(resolved, update);
    }

    #[test]
    fn compiled_wins_over_model() {
        let model = placed();
        let compiled = generate(&Style {
            left: Some(99.0),
            ..placed()
        });
        let update = Style {
            rotate: Some(10.0),
            ..Style::default()
        };
        let source = StyleSource::from_model(&model).with_compiled(Some(&compiled));
        assert_eq!(resolve(&update, &source).left, Some(99.0));
    }

    #[test]
    fn group_properties_are_style_fields() {
        for group in &GROUPS {
            for p in group.properties {
                assert!(Style::FIELDS.contains(p), "{}: {p}", group.name);
            }
        }
    }
}
