//! Viewport breakpoints and the per-breakpoint override map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::css::styles::Style;

/// Viewport-width class. Ordered narrowest to widest; `Monitor` is the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Smartphone,
    Tablet,
    Laptop,
    Monitor,
}

impl Breakpoint {
    /// All breakpoints, narrowest first.
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::Smartphone,
        Breakpoint::Tablet,
        Breakpoint::Laptop,
        Breakpoint::Monitor,
    ];

    /// Breakpoints that carry overrides (everything but the base), widest first.
    pub const RESPONSIVE: [Breakpoint; 3] =
        [Breakpoint::Laptop, Breakpoint::Tablet, Breakpoint::Smartphone];

    /// Upper bound of the viewport range, in pixels. `None` for the base.
    pub fn max_width(&self) -> Option<u32> {
        match self {
            Breakpoint::Smartphone => Some(640),
            Breakpoint::Tablet => Some(1024),
            Breakpoint::Laptop => Some(1440),
            Breakpoint::Monitor => None,
        }
    }

    /// Returns `true` for the base breakpoint.
    pub fn is_base(&self) -> bool {
        *self == Breakpoint::Monitor
    }

    /// Whether this breakpoint's viewport range contains `other`'s range,
    /// i.e. this breakpoint's override also applies when rendering `other`.
    pub fn contains(&self, other: Breakpoint) -> bool {
        *self >= other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Smartphone => "smartphone",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Laptop => "laptop",
            Breakpoint::Monitor => "monitor",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse breakpoint → partial style overrides.
pub type ResponsiveStyles = BTreeMap<Breakpoint, Style>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_narrowest_first() {
        assert!(Breakpoint::Smartphone < Breakpoint::Tablet);
        assert!(Breakpoint::Laptop < Breakpoint::Monitor);
        let mut v = vec![Breakpoint::Monitor, Breakpoint::Smartphone, Breakpoint::Laptop];
        v.sort();
        assert_eq!(v, vec![Breakpoint::Smartphone, Breakpoint::Laptop, Breakpoint::Monitor]);
    }

    #[test]
    fn contains_follows_max_width_ranges() {
        assert!(Breakpoint::Tablet.contains(Breakpoint::Smartphone));
        assert!(Breakpoint::Tablet.contains(Breakpoint::Tablet));
        assert!(!Breakpoint::Smartphone.contains(Breakpoint::Tablet));
    }

    #[test]
    fn max_widths_descend_with_responsive_order() {
        let widths: Vec<u32> = Breakpoint::RESPONSIVE
            .iter()
            .filter_map(|bp| bp.max_width())
            .collect();
        assert_eq!(widths, vec![1440, 1024, 640]);
        assert_eq!(Breakpoint::Monitor.max_width(), None);
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&Breakpoint::Tablet).unwrap(), "\"tablet\"");
        let bp: Breakpoint = serde_json::from_str("\"laptop\"").unwrap();
        assert_eq!(bp, Breakpoint::Laptop);
    }
}
