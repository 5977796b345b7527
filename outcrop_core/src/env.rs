// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment contract for platform integrations.
//!
//! Outcrop splits platform-specific work into *backend* crates. A backend
//! provides the following pieces:
//!
//! - **Environment** — Implements the [`ViewEnvironment`] trait over the
//!   platform's element handles (e.g. `web_sys::HtmlElement`), resolving
//!   the container and its live section collection at construction time.
//!   Resolution failures surface as
//!   [`TrackerError`](crate::error::TrackerError) — a missing container is
//!   a reported configuration error, never silently tracked.
//!
//! - **Signal wiring** — Registers scroll/resize listeners (when the
//!   tracker's touch bypass allows it) and forwards them to
//!   [`ViewportTracker::signal_scroll`]/[`signal_resize`].
//!
//! - **Timer host** — Executes [`ScheduleRequest`]s with real timers,
//!   replacing any pending trigger of the same kind, and calls
//!   [`ViewportTracker::deferral_elapsed`] when one fires.
//!
//! # Crate boundaries
//!
//! `outcrop_core` owns the membership model, the reconcile pass, and this
//! contract module. Backend crates depend on `outcrop_core` and provide
//! platform glue. The test harness implements the same trait over a fake
//! DOM, so the whole loop runs without a browser.
//!
//! [`ViewportTracker::signal_scroll`]: crate::tracker::ViewportTracker::signal_scroll
//! [`signal_resize`]: crate::tracker::ViewportTracker::signal_resize
//! [`ViewportTracker::deferral_elapsed`]: crate::tracker::ViewportTracker::deferral_elapsed
//! [`ScheduleRequest`]: crate::deferral::ScheduleRequest

use kurbo::Point;

/// Upper bound on offset-parent hops when accumulating document offsets.
///
/// Real offset-parent chains are shallow (they skip to positioned
/// ancestors); hitting this bound means the chain does not converge, and
/// the walk stops with the offsets summed so far.
pub const MAX_OFFSET_DEPTH: usize = 64;

/// Read/write access to the tracked portion of a rendered page.
///
/// Both DOM-backed and fake environments implement this trait, enabling a
/// generic tracker and test doubles. Implementations resolve the container
/// element and its section children once, at construction; the section
/// list itself may stay live (index queries can start returning `None`
/// when the page mutates).
pub trait ViewEnvironment {
    /// Opaque handle to one section element.
    type Node: Clone;

    /// Number of entries in the section collection, in document order.
    fn section_count(&self) -> usize;

    /// Returns the section at `index`, or `None` for out-of-range indices
    /// and non-element entries of a live collection.
    fn section(&self, index: usize) -> Option<Self::Node>;

    /// The node's own top offset relative to its offset parent.
    fn offset_top(&self, node: &Self::Node) -> f64;

    /// The node's own left offset relative to its offset parent.
    fn offset_left(&self, node: &Self::Node) -> f64;

    /// The node's offset-height in pixels.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// The next node in the offset-parent chain, if any.
    fn offset_parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The document's client height.
    fn document_client_height(&self) -> f64;

    /// The window's inner height.
    fn window_inner_height(&self) -> f64;

    /// Vertical scroll offset of the configured scroll reference.
    fn scroll_offset(&self) -> f64;

    /// Adds `class` to the node's class list (idempotent).
    fn add_class(&self, node: &Self::Node, class: &str);

    /// Removes `class` from the node's class list (idempotent).
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Whether the environment exposes touch capability.
    ///
    /// Touch-capable environments skip scroll/resize tracking entirely —
    /// a feature policy, not an error path.
    fn is_touch_capable(&self) -> bool;
}

/// Computes a node's cumulative document offset.
///
/// Walks the offset-parent chain starting at `node` (inclusive), summing
/// top/left offsets until the chain ends. The walk is capped at
/// [`MAX_OFFSET_DEPTH`] hops so a degenerate chain cannot loop forever.
#[must_use]
pub fn document_offset<E: ViewEnvironment>(env: &E, node: &E::Node) -> Point {
    let mut top = 0.0;
    let mut left = 0.0;
    let mut current = Some(node.clone());
    let mut hops = 0;

    while let Some(n) = current {
        top += env.offset_top(&n);
        left += env.offset_left(&n);
        hops += 1;
        if hops >= MAX_OFFSET_DEPTH {
            log::warn!("offset-parent chain did not converge after {hops} hops");
            break;
        }
        current = env.offset_parent(&n);
    }

    Point::new(left, top)
}
