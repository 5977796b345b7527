// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracker configuration.
//!
//! [`TrackerConfig`] is the immutable-after-init option set for a
//! [`ViewportTracker`](crate::tracker::ViewportTracker). Unspecified options
//! take the documented defaults; [`TrackerConfig::normalized`] clamps the
//! viewport factor into its valid range before the tracker stores it.

use alloc::string::String;
use alloc::string::ToString as _;

/// Which element scroll offsets are measured against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollParent {
    /// Measure against the window/viewport itself.
    #[default]
    Window,
    /// Measure against the tracked container's direct parent element.
    ContainerParent,
}

/// Options for a viewport tracker.
///
/// All fields are read once at tracker construction. The defaults reproduce
/// the classic list-view-scroll class vocabulary so a page styled for it
/// works unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Fraction (`0.0..=1.0`) of a section's height that must be inside the
    /// viewed band for the section to count as in view.
    ///
    /// `0.0` means a section is in view as soon as any part of it enters
    /// from the bottom edge; `1.0` means only when it is fully inside.
    pub viewport_factor: f64,
    /// Element id of the root container whose children are tracked.
    pub container_id: String,
    /// Class applied to sections that are not currently animated.
    pub init_class: String,
    /// Class applied to sections currently in view.
    pub animate_class: String,
    /// Class identifying the trackable child elements of the container.
    pub section_class: String,
    /// Scroll reference: the window, or the container's parent element.
    pub scroll_parent: ScrollParent,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            viewport_factor: 0.2,
            container_id: "list-view-scroll".to_string(),
            init_class: "list-view-scroll-init".to_string(),
            animate_class: "list-view-scroll-animate".to_string(),
            section_class: "list-view-scroll-section".to_string(),
            scroll_parent: ScrollParent::Window,
        }
    }
}

impl TrackerConfig {
    /// Returns this configuration with `viewport_factor` clamped to
    /// `0.0..=1.0`.
    ///
    /// Non-finite factors collapse to `0.0` (in view as soon as any part
    /// enters). A clamped or collapsed value is logged once.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let factor = self.viewport_factor;
        let normalized = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if normalized != factor || factor.is_nan() {
            log::warn!("viewport_factor {factor} out of range, using {normalized}");
        }
        self.viewport_factor = normalized;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = TrackerConfig::default();
        assert_eq!(config.viewport_factor, 0.2);
        assert_eq!(config.container_id, "list-view-scroll");
        assert_eq!(config.init_class, "list-view-scroll-init");
        assert_eq!(config.animate_class, "list-view-scroll-animate");
        assert_eq!(config.section_class, "list-view-scroll-section");
        assert_eq!(config.scroll_parent, ScrollParent::Window);
    }

    #[test]
    fn normalized_clamps_out_of_range_factors() {
        let over = TrackerConfig {
            viewport_factor: 1.5,
            ..TrackerConfig::default()
        };
        assert_eq!(over.normalized().viewport_factor, 1.0);

        let under = TrackerConfig {
            viewport_factor: -0.3,
            ..TrackerConfig::default()
        };
        assert_eq!(under.normalized().viewport_factor, 0.0);
    }

    #[test]
    fn normalized_collapses_non_finite_factors() {
        let nan = TrackerConfig {
            viewport_factor: f64::NAN,
            ..TrackerConfig::default()
        };
        assert_eq!(nan.normalized().viewport_factor, 0.0);

        let inf = TrackerConfig {
            viewport_factor: f64::INFINITY,
            ..TrackerConfig::default()
        };
        assert_eq!(inf.normalized().viewport_factor, 0.0);
    }

    #[test]
    fn normalized_keeps_in_range_factors() {
        let config = TrackerConfig::default().normalized();
        assert_eq!(config.viewport_factor, 0.2);
    }
}
