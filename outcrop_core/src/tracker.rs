// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport tracker and its reconciliation pass.
//!
//! [`ViewportTracker`] owns the environment handle, the normalized
//! configuration, the event hub, and the deferral state. Hosts feed it
//! scroll/resize signals and fire its deferrals; each fired deferral runs
//! one [`reconcile`](ViewportTracker::reconcile) pass that re-derives every
//! section's class state from current geometry.
//!
//! Class state is a pure function of the last-computed viewport membership
//! and the current scroll offset — the tracker keeps no per-section history
//! beyond what the class list itself encodes.

use crate::config::TrackerConfig;
use crate::deferral::{DeferralState, ScheduleRequest, SignalKind};
use crate::env::{ViewEnvironment, document_offset};
use crate::events::{EventHub, SectionEvent};
use crate::geometry::{SectionMetrics, ViewBand, viewport_height};

/// Tracks which sections of a container are inside the visible viewport
/// and keeps their presentation classes in sync.
///
/// # Usage
///
/// A backend wires the pieces together like this:
///
/// ```rust,ignore
/// let env = DomEnvironment::resolve(&config)?;
/// let mut tracker = ViewportTracker::new(env, config);
/// tracker.on(|event| { /* react to SectionEvent */ });
///
/// // In the scroll listener:
/// if let Some(request) = tracker.signal_scroll() {
///     timers.schedule(request); // replace-pending per kind
/// }
///
/// // When a timer fires:
/// tracker.deferral_elapsed(kind);
/// ```
pub struct ViewportTracker<E: ViewEnvironment> {
    env: E,
    config: TrackerConfig,
    events: EventHub,
    deferrals: DeferralState,
    /// Resolved once at construction: touch-capable environments skip
    /// scroll/resize tracking entirely.
    scroll_tracking: bool,
}

impl<E: ViewEnvironment> ViewportTracker<E> {
    /// Creates a tracker over a resolved environment.
    ///
    /// The configuration is normalized (viewport factor clamped) and the
    /// touch-capability policy is decided here, once. On touch-capable
    /// environments [`signal_scroll`](Self::signal_scroll) and
    /// [`signal_resize`](Self::signal_resize) return `None` and backends
    /// should not attach listeners at all; manual
    /// [`reconcile`](Self::reconcile) calls still work.
    #[must_use]
    pub fn new(env: E, config: TrackerConfig) -> Self {
        let config = config.normalized();
        let scroll_tracking = !env.is_touch_capable();
        if scroll_tracking {
            log::debug!(
                "tracking {} sections in `{}`",
                env.section_count(),
                config.container_id
            );
        } else {
            log::debug!("touch-capable environment: scroll tracking disabled");
        }
        Self {
            env,
            config,
            events: EventHub::new(),
            deferrals: DeferralState::new(),
            scroll_tracking,
        }
    }

    /// Returns the normalized configuration.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the environment handle.
    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Whether scroll/resize signals are tracked.
    ///
    /// `false` on touch-capable environments; backends consult this before
    /// registering listeners.
    #[must_use]
    pub fn tracks_scroll(&self) -> bool {
        self.scroll_tracking
    }

    /// Subscribes a handler to section events.
    pub fn on(&mut self, handler: impl FnMut(SectionEvent) + 'static) {
        self.events.on(handler);
    }

    // -- Geometry queries --

    /// The usable viewport height: the smaller of the document client
    /// height and the window inner height.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        viewport_height(
            self.env.document_client_height(),
            self.env.window_inner_height(),
        )
    }

    /// The currently viewed slice of the document.
    #[must_use]
    pub fn view_band(&self) -> ViewBand {
        ViewBand::new(self.env.scroll_offset(), self.viewport_height())
    }

    /// Resolved geometry for the section at `index`, if it is an element.
    #[must_use]
    pub fn section_metrics(&self, index: usize) -> Option<SectionMetrics> {
        let node = self.env.section(index)?;
        Some(SectionMetrics {
            origin: document_offset(&self.env, &node),
            height: self.env.offset_height(&node),
        })
    }

    /// Whether the section at `index` is in view under the configured
    /// viewport factor.
    #[must_use]
    pub fn is_in_viewport(&self, index: usize) -> bool {
        self.section_metrics(index)
            .is_some_and(|metrics| metrics.is_in_band(self.view_band(), self.config.viewport_factor))
    }

    // -- Signal entry points --

    /// Records a scroll signal.
    ///
    /// Returns `None` on touch-bypassed environments and while a scroll
    /// reconciliation is already pending (coalescing).
    pub fn signal_scroll(&mut self) -> Option<ScheduleRequest> {
        if !self.scroll_tracking {
            return None;
        }
        self.deferrals.note_scroll()
    }

    /// Records a resize signal.
    ///
    /// Returns `None` only on touch-bypassed environments; otherwise the
    /// host replaces any pending resize deferral with the returned request.
    pub fn signal_resize(&mut self) -> Option<ScheduleRequest> {
        if !self.scroll_tracking {
            return None;
        }
        Some(self.deferrals.note_resize())
    }

    /// Runs one reconciliation pass because a deferral fired.
    pub fn deferral_elapsed(&mut self, kind: SignalKind) {
        log::trace!("{kind:?} deferral elapsed");
        self.reconcile();
    }

    // -- Reconciliation --

    /// One full evaluation of all sections' viewport membership.
    ///
    /// For every section, in document order (non-element entries skipped):
    ///
    /// - in view ⇒ the animate class is added and
    ///   [`SectionEvent::InView`] is emitted;
    /// - out of view ⇒ the init class is added (so sections that start
    ///   visible still receive initial styling), the animate class is
    ///   removed **unless the page is at rest at the very top**, and
    ///   [`SectionEvent::OutView`] is emitted.
    ///
    /// The pass ends by clearing the scroll-coalescing flag, whichever
    /// signal triggered it. Idempotent under unchanged geometry: repeated
    /// passes produce the same class state and one event per section each.
    pub fn reconcile(&mut self) {
        let band = self.view_band();
        let at_rest = self.env.scroll_offset() == 0.0;
        let factor = self.config.viewport_factor;

        for index in 0..self.env.section_count() {
            let Some(node) = self.env.section(index) else {
                continue;
            };
            let metrics = SectionMetrics {
                origin: document_offset(&self.env, &node),
                height: self.env.offset_height(&node),
            };

            if metrics.is_in_band(band, factor) {
                self.env.add_class(&node, &self.config.animate_class);
                self.events.emit(SectionEvent::InView(index));
            } else {
                self.env.add_class(&node, &self.config.init_class);
                if !at_rest {
                    self.env.remove_class(&node, &self.config.animate_class);
                }
                self.events.emit(SectionEvent::OutView(index));
            }
        }

        self.deferrals.acknowledge(SignalKind::Scroll);
    }

    // -- Teardown --

    /// Releases subscriptions and pending deferral state.
    ///
    /// The owning backend removes its listeners and cancels its timers
    /// around this call; afterwards the tracker is inert but still usable
    /// for manual [`reconcile`](Self::reconcile) passes.
    pub fn dispose(&mut self) {
        self.events.clear();
        self.deferrals.reset();
        log::debug!("tracker disposed");
    }
}

impl<E: ViewEnvironment> core::fmt::Debug for ViewportTracker<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewportTracker")
            .field("config", &self.config)
            .field("events", &self.events)
            .field("deferrals", &self.deferrals)
            .field("scroll_tracking", &self.scroll_tracking)
            .finish()
    }
}
