// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fake DOM and virtual timers for exercising trackers without a browser.
//!
//! Three pieces, composable per test:
//!
//! - [`FakeDom`] — a scriptable [`ViewEnvironment`]: an element arena with
//!   offset-parent links, a section list that can contain non-element
//!   entries, and settable scroll/viewport/touch state.
//! - [`VirtualHost`] — drives a [`ViewportTracker`] over a `FakeDom` with
//!   a manually advanced clock instead of real timers, honoring the core's
//!   replace-pending scheduling contract.
//! - [`EventLog`] — a recording subscriber for asserting emitted event
//!   sequences.
//!
//! [`ViewEnvironment`]: outcrop_core::env::ViewEnvironment
//! [`ViewportTracker`]: outcrop_core::tracker::ViewportTracker

#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::time::Duration;

use outcrop_core::deferral::{ScheduleRequest, SignalKind};
use outcrop_core::env::ViewEnvironment;
use outcrop_core::events::SectionEvent;
use outcrop_core::tracker::ViewportTracker;

/// One fake element in the arena.
#[derive(Clone, Debug, Default)]
struct FakeElement {
    offset_top: f64,
    offset_left: f64,
    offset_height: f64,
    /// Arena index of the offset parent, if any.
    offset_parent: Option<usize>,
    classes: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct FakeDomState {
    elements: Vec<FakeElement>,
    /// Section list in document order; `None` models a non-element entry
    /// of a live collection.
    sections: Vec<Option<usize>>,
    client_height: f64,
    inner_height: f64,
    scroll_offset: f64,
    touch: bool,
}

/// A scriptable in-memory stand-in for the tracked page.
///
/// Cloning shares state, so a test can keep one handle for scripting and
/// hand another to the tracker.
#[derive(Clone, Debug, Default)]
pub struct FakeDom {
    state: Rc<RefCell<FakeDomState>>,
}

impl FakeDom {
    /// Creates an empty page with the given viewport measurements.
    #[must_use]
    pub fn new(client_height: f64, inner_height: f64) -> Self {
        let dom = Self::default();
        dom.state.borrow_mut().client_height = client_height;
        dom.state.borrow_mut().inner_height = inner_height;
        dom
    }

    /// Adds an element to the arena (not the section list) and returns its
    /// handle. Useful as an offset parent.
    pub fn push_element(&self, offset_top: f64, offset_left: f64, offset_height: f64) -> usize {
        let mut state = self.state.borrow_mut();
        state.elements.push(FakeElement {
            offset_top,
            offset_left,
            offset_height,
            offset_parent: None,
            classes: BTreeSet::new(),
        });
        state.elements.len() - 1
    }

    /// Adds a section element at the given document offset and returns its
    /// arena handle.
    pub fn push_section(&self, offset_top: f64, offset_height: f64) -> usize {
        let node = self.push_element(offset_top, 0.0, offset_height);
        self.state.borrow_mut().sections.push(Some(node));
        node
    }

    /// Adds a non-element entry to the section list.
    pub fn push_non_element_entry(&self) {
        self.state.borrow_mut().sections.push(None);
    }

    /// Links `node`'s offset parent to `parent`.
    pub fn set_offset_parent(&self, node: usize, parent: Option<usize>) {
        self.state.borrow_mut().elements[node].offset_parent = parent;
    }

    /// Sets the scroll offset of the scroll reference.
    pub fn set_scroll_offset(&self, offset: f64) {
        self.state.borrow_mut().scroll_offset = offset;
    }

    /// Sets the document client height.
    pub fn set_client_height(&self, height: f64) {
        self.state.borrow_mut().client_height = height;
    }

    /// Sets the window inner height.
    pub fn set_inner_height(&self, height: f64) {
        self.state.borrow_mut().inner_height = height;
    }

    /// Marks the environment as touch-capable.
    ///
    /// Must be set before the tracker is constructed: the bypass policy is
    /// resolved once, at construction.
    pub fn set_touch_capable(&self, touch: bool) {
        self.state.borrow_mut().touch = touch;
    }

    /// Whether `node` currently carries `class`.
    #[must_use]
    pub fn has_class(&self, node: usize, class: &str) -> bool {
        self.state.borrow().elements[node].classes.contains(class)
    }

    /// The node's current classes, sorted.
    #[must_use]
    pub fn classes_of(&self, node: usize) -> Vec<String> {
        self.state.borrow().elements[node]
            .classes
            .iter()
            .cloned()
            .collect()
    }
}

impl ViewEnvironment for FakeDom {
    type Node = usize;

    fn section_count(&self) -> usize {
        self.state.borrow().sections.len()
    }

    fn section(&self, index: usize) -> Option<usize> {
        self.state.borrow().sections.get(index).copied().flatten()
    }

    fn offset_top(&self, node: &usize) -> f64 {
        self.state.borrow().elements[*node].offset_top
    }

    fn offset_left(&self, node: &usize) -> f64 {
        self.state.borrow().elements[*node].offset_left
    }

    fn offset_height(&self, node: &usize) -> f64 {
        self.state.borrow().elements[*node].offset_height
    }

    fn offset_parent(&self, node: &usize) -> Option<usize> {
        self.state.borrow().elements[*node].offset_parent
    }

    fn document_client_height(&self) -> f64 {
        self.state.borrow().client_height
    }

    fn window_inner_height(&self) -> f64 {
        self.state.borrow().inner_height
    }

    fn scroll_offset(&self) -> f64 {
        self.state.borrow().scroll_offset
    }

    fn add_class(&self, node: &usize, class: &str) {
        self.state.borrow_mut().elements[*node]
            .classes
            .insert(class.to_string());
    }

    fn remove_class(&self, node: &usize, class: &str) {
        self.state.borrow_mut().elements[*node].classes.remove(class);
    }

    fn is_touch_capable(&self) -> bool {
        self.state.borrow().touch
    }
}

/// A pending virtual deferral.
#[derive(Clone, Copy, Debug)]
struct PendingDeferral {
    kind: SignalKind,
    deadline: Duration,
}

/// Drives a tracker with a manually advanced clock.
///
/// Implements the same host contract as the web backend's timer host —
/// scheduling replaces any pending deferral of the same kind — but fires
/// deferrals from [`advance`](Self::advance) instead of real timers.
#[derive(Debug)]
pub struct VirtualHost {
    tracker: ViewportTracker<FakeDom>,
    now: Duration,
    pending: Vec<PendingDeferral>,
    fired: Vec<SignalKind>,
}

impl VirtualHost {
    /// Wraps a tracker.
    #[must_use]
    pub fn new(tracker: ViewportTracker<FakeDom>) -> Self {
        Self {
            tracker,
            now: Duration::ZERO,
            pending: Vec::new(),
            fired: Vec::new(),
        }
    }

    /// The wrapped tracker.
    #[must_use]
    pub fn tracker(&self) -> &ViewportTracker<FakeDom> {
        &self.tracker
    }

    /// Mutable access to the wrapped tracker (e.g. for subscriptions).
    pub fn tracker_mut(&mut self) -> &mut ViewportTracker<FakeDom> {
        &mut self.tracker
    }

    /// Delivers one scroll event to the tracker.
    pub fn scroll(&mut self) {
        if let Some(request) = self.tracker.signal_scroll() {
            self.file(request);
        }
    }

    /// Delivers one resize event to the tracker.
    pub fn resize(&mut self) {
        if let Some(request) = self.tracker.signal_resize() {
            self.file(request);
        }
    }

    /// Files a schedule request, replacing any pending deferral of the
    /// same kind.
    pub fn file(&mut self, request: ScheduleRequest) {
        self.pending.retain(|pending| pending.kind != request.kind);
        self.pending.push(PendingDeferral {
            kind: request.kind,
            deadline: self.now + request.delay,
        });
    }

    /// Advances the clock, firing every deferral that falls due, in
    /// deadline order.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
        loop {
            let due = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, pending)| pending.deadline <= self.now)
                .min_by_key(|(_, pending)| pending.deadline)
                .map(|(position, pending)| (position, pending.kind));
            let Some((position, kind)) = due else {
                break;
            };
            self.pending.remove(position);
            self.fired.push(kind);
            self.tracker.deferral_elapsed(kind);
        }
    }

    /// Number of deferrals currently pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Every deferral fired so far, in firing order.
    #[must_use]
    pub fn fired(&self) -> &[SignalKind] {
        &self.fired
    }

    /// Cancels all pending deferrals and disposes the tracker.
    pub fn dispose(&mut self) {
        self.pending.clear();
        self.tracker.dispose();
    }
}

/// A recording event subscriber.
///
/// Cloning shares the underlying log, so one handle can be moved into the
/// tracker subscription while the test keeps another for assertions.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SectionEvent>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes this log to a tracker.
    pub fn attach<E: ViewEnvironment>(&self, tracker: &mut ViewportTracker<E>) {
        let sink = Rc::clone(&self.events);
        tracker.on(move |event| sink.borrow_mut().push(event));
    }

    /// Snapshot of the recorded events, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<SectionEvent> {
        self.events.borrow().clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether no events were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Forgets all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outcrop_core::config::TrackerConfig;

    #[test]
    fn fake_dom_sections_and_classes() {
        let dom = FakeDom::new(600.0, 600.0);
        let node = dom.push_section(100.0, 50.0);
        dom.push_non_element_entry();

        assert_eq!(dom.section_count(), 2);
        assert_eq!(dom.section(0), Some(node));
        assert_eq!(dom.section(1), None);

        dom.add_class(&node, "a");
        dom.add_class(&node, "a");
        assert!(dom.has_class(node, "a"));
        dom.remove_class(&node, "a");
        assert!(!dom.has_class(node, "a"));
    }

    #[test]
    fn filing_replaces_pending_of_same_kind() {
        let dom = FakeDom::new(600.0, 600.0);
        let mut host = VirtualHost::new(ViewportTracker::new(dom, TrackerConfig::default()));

        host.file(ScheduleRequest {
            kind: SignalKind::Resize,
            delay: Duration::from_millis(60),
        });
        host.advance(Duration::from_millis(30));
        host.file(ScheduleRequest {
            kind: SignalKind::Resize,
            delay: Duration::from_millis(60),
        });

        assert_eq!(host.pending_count(), 1, "replaced, not stacked");
        // The first deadline (t=60) was replaced; nothing fires until t=90.
        host.advance(Duration::from_millis(31));
        assert_eq!(host.fired().len(), 0);
        host.advance(Duration::from_millis(29));
        assert_eq!(host.fired(), &[SignalKind::Resize]);
    }

    #[test]
    fn advance_fires_in_deadline_order() {
        let dom = FakeDom::new(600.0, 600.0);
        let mut host = VirtualHost::new(ViewportTracker::new(dom, TrackerConfig::default()));

        host.file(ScheduleRequest {
            kind: SignalKind::Resize,
            delay: Duration::from_millis(10),
        });
        host.file(ScheduleRequest {
            kind: SignalKind::Scroll,
            delay: Duration::from_millis(5),
        });
        host.advance(Duration::from_millis(20));

        assert_eq!(host.fired(), &[SignalKind::Scroll, SignalKind::Resize]);
        assert_eq!(host.pending_count(), 0);
    }
}
