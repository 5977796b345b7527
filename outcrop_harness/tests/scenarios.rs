// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tracker scenarios over the fake DOM and virtual clock.

use core::time::Duration;

use outcrop_core::config::TrackerConfig;
use outcrop_core::deferral::{DEBOUNCE_DELAY, SignalKind};
use outcrop_core::env::ViewEnvironment as _;
use outcrop_core::events::SectionEvent;
use outcrop_core::tracker::ViewportTracker;
use outcrop_harness::{EventLog, FakeDom, VirtualHost};

const INIT: &str = "list-view-scroll-init";
const ANIMATE: &str = "list-view-scroll-animate";

/// A 600px viewport over three 500px sections at 0 / 700 / 1400.
fn three_section_page() -> (FakeDom, [usize; 3]) {
    let dom = FakeDom::new(600.0, 600.0);
    let sections = [
        dom.push_section(0.0, 500.0),
        dom.push_section(700.0, 500.0),
        dom.push_section(1400.0, 500.0),
    ];
    (dom, sections)
}

fn host_over(dom: &FakeDom) -> (VirtualHost, EventLog) {
    let mut tracker = ViewportTracker::new(dom.clone(), TrackerConfig::default());
    let log = EventLog::new();
    log.attach(&mut tracker);
    (VirtualHost::new(tracker), log)
}

#[test]
fn middle_section_animates_others_reset() {
    let (dom, sections) = three_section_page();
    dom.set_scroll_offset(650.0); // band 650..1250 — only section 1 overlaps
    let (mut host, log) = host_over(&dom);

    host.tracker_mut().reconcile();

    assert!(dom.has_class(sections[1], ANIMATE));
    assert!(!dom.has_class(sections[1], INIT));
    for section in [sections[0], sections[2]] {
        assert!(dom.has_class(section, INIT));
        assert!(!dom.has_class(section, ANIMATE));
    }
    assert_eq!(
        log.events(),
        vec![
            SectionEvent::OutView(0),
            SectionEvent::InView(1),
            SectionEvent::OutView(2),
        ]
    );
}

#[test]
fn page_at_rest_keeps_previous_animation() {
    let (dom, sections) = three_section_page();
    // Section 2 animated on an earlier visit; the page is back at the top.
    dom.add_class(&sections[2], ANIMATE);
    let (mut host, _log) = host_over(&dom);

    host.tracker_mut().reconcile();

    assert!(
        dom.has_class(sections[2], ANIMATE),
        "animate class survives at scroll offset 0"
    );
    assert!(dom.has_class(sections[2], INIT));
}

#[test]
fn scrolled_page_reverts_hidden_sections() {
    let (dom, sections) = three_section_page();
    dom.add_class(&sections[2], ANIMATE);
    dom.set_scroll_offset(10.0);
    let (mut host, _log) = host_over(&dom);

    host.tracker_mut().reconcile();

    assert!(!dom.has_class(sections[2], ANIMATE));
    assert!(dom.has_class(sections[2], INIT));
}

#[test]
fn ten_scroll_events_one_reconciliation() {
    let (dom, _sections) = three_section_page();
    dom.set_scroll_offset(650.0);
    let (mut host, log) = host_over(&dom);

    for _ in 0..10 {
        host.scroll();
    }
    assert_eq!(host.pending_count(), 1, "burst coalesced into one deferral");

    host.advance(DEBOUNCE_DELAY);
    assert_eq!(host.fired(), &[SignalKind::Scroll]);
    assert_eq!(log.len(), 3, "one event per section, one pass");
}

#[test]
fn scroll_window_reopens_after_each_pass() {
    let (dom, _sections) = three_section_page();
    let (mut host, log) = host_over(&dom);

    host.scroll();
    host.advance(DEBOUNCE_DELAY);
    host.scroll();
    host.advance(DEBOUNCE_DELAY);

    assert_eq!(host.fired(), &[SignalKind::Scroll, SignalKind::Scroll]);
    assert_eq!(log.len(), 6, "two full passes over three sections");
}

#[test]
fn resize_burst_collapses_to_one_pass() {
    let (dom, _sections) = three_section_page();
    let (mut host, log) = host_over(&dom);

    // Three resizes, each 30ms apart — every one replaces the pending
    // deferral, so only the last survives.
    host.resize();
    host.advance(Duration::from_millis(30));
    host.resize();
    host.advance(Duration::from_millis(30));
    host.resize();
    assert_eq!(host.pending_count(), 1);

    host.advance(DEBOUNCE_DELAY);
    assert_eq!(host.fired(), &[SignalKind::Resize]);
    assert_eq!(log.len(), 3);
}

#[test]
fn scroll_and_resize_deferrals_are_independent() {
    let (dom, _sections) = three_section_page();
    let (mut host, log) = host_over(&dom);

    host.scroll();
    host.resize();
    assert_eq!(host.pending_count(), 2);

    host.advance(DEBOUNCE_DELAY);
    assert_eq!(host.fired().len(), 2, "both deferrals fired");
    assert_eq!(log.len(), 6, "two passes over three sections");
}

#[test]
fn touch_environment_schedules_nothing() {
    let (dom, _sections) = three_section_page();
    dom.set_touch_capable(true);
    let (mut host, log) = host_over(&dom);

    assert!(!host.tracker().tracks_scroll());
    for _ in 0..5 {
        host.scroll();
        host.resize();
    }
    assert_eq!(host.pending_count(), 0, "no listeners, no deferrals");

    host.advance(Duration::from_secs(1));
    assert!(log.is_empty());
}

#[test]
fn reconciliation_is_idempotent_under_stable_geometry() {
    let (dom, sections) = three_section_page();
    dom.set_scroll_offset(650.0);
    let (mut host, log) = host_over(&dom);

    host.tracker_mut().reconcile();
    let first: Vec<Vec<String>> = sections.iter().map(|&s| dom.classes_of(s)).collect();

    host.tracker_mut().reconcile();
    let second: Vec<Vec<String>> = sections.iter().map(|&s| dom.classes_of(s)).collect();

    assert_eq!(first, second, "class state is a pure function of geometry");
    assert_eq!(log.len(), 6, "exactly one event per section per pass");
}

#[test]
fn nested_offset_parents_shift_membership() {
    let dom = FakeDom::new(600.0, 600.0);
    // A wrapper 1000px down the document; the section sits 50px into it.
    let wrapper = dom.push_element(1000.0, 0.0, 800.0);
    let section = dom.push_section(50.0, 200.0);
    dom.set_offset_parent(section, Some(wrapper));
    dom.set_scroll_offset(700.0); // band 700..1300; document top = 1050

    let (mut host, log) = host_over(&dom);
    host.tracker_mut().reconcile();

    assert!(
        dom.has_class(section, ANIMATE),
        "membership uses the accumulated document offset"
    );
    assert_eq!(log.events(), vec![SectionEvent::InView(0)]);
}

#[test]
fn non_element_entries_emit_nothing() {
    let dom = FakeDom::new(600.0, 600.0);
    let section = dom.push_section(100.0, 200.0);
    dom.push_non_element_entry();
    let (mut host, log) = host_over(&dom);

    host.tracker_mut().reconcile();

    assert!(dom.has_class(section, ANIMATE));
    assert_eq!(log.events(), vec![SectionEvent::InView(0)]);
}

#[test]
fn dispose_cancels_pending_work() {
    let (dom, _sections) = three_section_page();
    let (mut host, log) = host_over(&dom);

    host.scroll();
    host.resize();
    host.dispose();

    assert_eq!(host.pending_count(), 0);
    host.advance(Duration::from_secs(1));
    assert!(log.is_empty(), "nothing fires after disposal");

    // Manual passes still run, but the handlers are gone.
    host.tracker_mut().reconcile();
    assert!(log.is_empty());
}
