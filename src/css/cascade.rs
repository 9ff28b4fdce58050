//! Breakpoint cascade: base style plus the overrides that apply at a target
//! breakpoint, merged into one effective style.
//!
//! Overrides are `max-width` scoped, so a wider breakpoint's override also
//! applies to every narrower viewport. Resolution walks the responsive
//! breakpoints from the widest down to the target, merging each override on
//! top of the previous result. This is the order the browser applies the
//! exported `@media` blocks in, which keeps the editor and the exported site
//! in agreement.

use crate::css::breakpoint::{Breakpoint, ResponsiveStyles};
use crate::css::styles::Style;

/// Resolve the effective style of an element at `target`.
///
/// With `include_target == false` the target's own override is skipped; this
/// answers "what would this property be without my own override".
pub fn resolve(
    base: &Style,
    overrides: &ResponsiveStyles,
    target: Breakpoint,
    include_target: bool,
) -> Style {
    if target.is_base() {
        return base.clone();
    }

    let mut result = base.clone();
    for bp in Breakpoint::RESPONSIVE {
        if !bp.contains(target) {
            break;
        }
        if bp == target && !include_target {
            break;
        }
        if let Some(layer) = overrides.get(&bp) {
            result = result.merge(layer);
        }
    }
    result
}

/// Rewrite `overrides` so that no breakpoint stores a value the cascade would
/// already produce there. Empty entries are removed.
///
/// Works widest first: every override is compared with the style resolved
/// from the base and the (already pruned) wider overrides.
pub fn prune_overrides(base: &Style, overrides: &mut ResponsiveStyles) {
    for bp in Breakpoint::RESPONSIVE {
        let Some(layer) = overrides.get(&bp) else {
            continue;
        };
        let inherited = resolve(base, overrides, bp, false);
        let minimal = layer.diff(&inherited);
        if minimal.is_empty() {
            overrides.remove(&bp);
        } else {
            overrides.insert(bp, minimal);
        }
    }
}

/// Apply a partial style `update` at `breakpoint`, keeping overrides minimal.
///
/// At the base breakpoint the update merges into `base`. Elsewhere it merges
/// into that breakpoint's override, and any property equal to the inherited
/// value is dropped rather than stored.
pub fn apply_update(
    base: &mut Style,
    overrides: &mut ResponsiveStyles,
    breakpoint: Breakpoint,
    update: &Style,
) {
    if breakpoint.is_base() {
        *base = base.merge(update);
    } else {
        let existing = overrides.remove(&breakpoint).unwrap_or_default();
        overrides.insert(breakpoint, existing.merge(update));
    }
    prune_overrides(base, overrides);
}
