// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signal coalescing and debouncing.
//!
//! Scroll and resize events arrive far faster than reconciliation needs to
//! run. This module expresses the damping logic as a pure state machine so
//! hosts can drive it with real timers and tests can drive it with a
//! virtual clock:
//!
//! - **Scroll** signals are *coalesced*: the first one in a window produces
//!   a [`ScheduleRequest`]; further signals are ignored until the deferral
//!   fires and the pass [`acknowledge`](DeferralState::acknowledge)s it.
//!   Reconciliation runs at most once per delay window no matter how many
//!   scroll events arrive, trading a bounded trigger latency for less
//!   main-thread work.
//!
//! - **Resize** signals are *debounced*: every signal produces a request,
//!   and the host's replace-pending contract means a burst collapses into
//!   exactly one reconciliation after the burst ends. Resize damping is
//!   independent of the scroll flag.
//!
//! # Host contract
//!
//! A host receiving a [`ScheduleRequest`] must schedule a deferral for
//! `request.delay`, **replacing** any pending deferral of the same
//! [`SignalKind`], and call
//! [`ViewportTracker::deferral_elapsed`](crate::tracker::ViewportTracker::deferral_elapsed)
//! when it fires.

use core::time::Duration;

/// Fixed delay applied to both scroll coalescing and resize debouncing.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(60);

/// Which host signal a deferral belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// A scroll event on the scroll reference.
    Scroll,
    /// A resize event on the window.
    Resize,
}

/// An instruction to the host: schedule (or replace) a deferred
/// reconciliation trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScheduleRequest {
    /// The signal this deferral answers.
    pub kind: SignalKind,
    /// How long to wait before firing.
    pub delay: Duration,
}

/// Coalescing/debouncing state for one tracker.
#[derive(Debug, Default)]
pub struct DeferralState {
    scroll_pending: bool,
}

impl DeferralState {
    /// Creates idle deferral state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scroll_pending: false,
        }
    }

    /// Records a scroll signal.
    ///
    /// Returns a request for the first signal of a window and `None` while
    /// a scroll reconciliation is already pending.
    pub fn note_scroll(&mut self) -> Option<ScheduleRequest> {
        if self.scroll_pending {
            return None;
        }
        self.scroll_pending = true;
        Some(ScheduleRequest {
            kind: SignalKind::Scroll,
            delay: DEBOUNCE_DELAY,
        })
    }

    /// Records a resize signal.
    ///
    /// Always returns a request; the host replaces any pending resize
    /// deferral, so only the last signal of a burst survives.
    pub fn note_resize(&mut self) -> ScheduleRequest {
        ScheduleRequest {
            kind: SignalKind::Resize,
            delay: DEBOUNCE_DELAY,
        }
    }

    /// Marks a fired deferral as consumed.
    ///
    /// Clears the coalescing flag for [`SignalKind::Scroll`]; resize keeps
    /// no flag, so acknowledging it is a no-op.
    pub fn acknowledge(&mut self, kind: SignalKind) {
        if kind == SignalKind::Scroll {
            self.scroll_pending = false;
        }
    }

    /// Whether a scroll reconciliation is currently pending.
    #[must_use]
    pub fn scroll_pending(&self) -> bool {
        self.scroll_pending
    }

    /// Clears all pending state (teardown path).
    pub fn reset(&mut self) {
        self.scroll_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_scroll_schedules_rest_coalesce() {
        let mut state = DeferralState::new();
        let request = state.note_scroll().expect("first scroll schedules");
        assert_eq!(request.kind, SignalKind::Scroll);
        assert_eq!(request.delay, DEBOUNCE_DELAY);

        for _ in 0..9 {
            assert_eq!(state.note_scroll(), None, "coalesced while pending");
        }
        assert!(state.scroll_pending());
    }

    #[test]
    fn acknowledge_reopens_the_scroll_window() {
        let mut state = DeferralState::new();
        let _ = state.note_scroll();
        state.acknowledge(SignalKind::Scroll);
        assert!(!state.scroll_pending());
        assert!(state.note_scroll().is_some(), "next window schedules again");
    }

    #[test]
    fn resize_always_schedules() {
        let mut state = DeferralState::new();
        for _ in 0..5 {
            let request = state.note_resize();
            assert_eq!(request.kind, SignalKind::Resize);
            assert_eq!(request.delay, DEBOUNCE_DELAY);
        }
        // Resize never touches the scroll flag.
        assert!(!state.scroll_pending());
    }

    #[test]
    fn resize_acknowledge_leaves_scroll_flag_alone() {
        let mut state = DeferralState::new();
        let _ = state.note_scroll();
        state.acknowledge(SignalKind::Resize);
        assert!(state.scroll_pending());
    }

    #[test]
    fn reset_clears_pending_state() {
        let mut state = DeferralState::new();
        let _ = state.note_scroll();
        state.reset();
        assert!(!state.scroll_pending());
    }
}
