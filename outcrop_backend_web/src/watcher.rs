// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The wired-up section watcher.
//!
//! [`SectionWatcher`] owns the whole browser-side assembly: the DOM
//! environment, the core tracker, the scroll/resize listener closures, and
//! the timeout host. Construction registers the listeners (unless the
//! touch bypass applies); [`dispose`](SectionWatcher::dispose) — or drop —
//! removes them and cancels pending timeouts, so the watcher is safely
//! embeddable in component lifecycles.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, Window};

use outcrop_core::config::TrackerConfig;
use outcrop_core::error::TrackerError;
use outcrop_core::events::SectionEvent;
use outcrop_core::tracker::ViewportTracker;

use crate::env::DomEnvironment;
use crate::timer::TimerHost;

type ListenerClosure = Closure<dyn FnMut()>;

struct WatcherInner {
    tracker: RefCell<ViewportTracker<DomEnvironment>>,
    timers: TimerHost,

    /// Where the scroll listener is registered (window or parent element).
    scroll_target: EventTarget,
    /// Where the resize listener is registered.
    window: Window,

    /// Listener closures, kept alive while registered.
    ///
    /// Each closure holds an `Rc` back to this struct; `dispose` takes
    /// them out to break the cycle.
    scroll_closure: RefCell<Option<ListenerClosure>>,
    resize_closure: RefCell<Option<ListenerClosure>>,

    /// Whether listeners are currently registered.
    attached: Cell<bool>,
}

/// Scroll-driven section tracking bound to the live page.
///
/// # Usage
///
/// ```rust,ignore
/// let watcher = SectionWatcher::init(TrackerConfig::default())?;
/// watcher.on(|event| { /* react to SectionEvent */ });
/// watcher.reconcile_now(); // style sections already in view
/// // ... later, e.g. when the hosting component unmounts:
/// watcher.dispose();
/// ```
pub struct SectionWatcher {
    inner: Rc<WatcherInner>,
}

impl SectionWatcher {
    /// Resolves the environment and registers listeners.
    ///
    /// On touch-capable environments no listeners are registered at all;
    /// the watcher still supports manual
    /// [`reconcile_now`](Self::reconcile_now) passes.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when there is no document or the
    /// configured container is missing.
    pub fn init(config: TrackerConfig) -> Result<Self, TrackerError> {
        let env = DomEnvironment::resolve(&config)?;
        let scroll_target = env.scroll_target().clone();
        let window = env.window().clone();
        let tracker = ViewportTracker::new(env, config);

        let watcher = Self {
            inner: Rc::new(WatcherInner {
                tracker: RefCell::new(tracker),
                timers: TimerHost::new(),
                scroll_target,
                window,
                scroll_closure: RefCell::new(None),
                resize_closure: RefCell::new(None),
                attached: Cell::new(false),
            }),
        };
        watcher.attach();
        Ok(watcher)
    }

    /// Registers the scroll and resize listeners.
    ///
    /// No-op when already attached or when the tracker's touch bypass is
    /// in effect.
    fn attach(&self) {
        if self.inner.attached.get() || !self.inner.tracker.borrow().tracks_scroll() {
            return;
        }
        self.inner.attached.set(true);

        let inner = Rc::clone(&self.inner);
        let scroll = Closure::wrap(Box::new(move || {
            // The borrow is scoped so the timer callback can re-borrow.
            let request = inner.tracker.borrow_mut().signal_scroll();
            if let Some(request) = request {
                let fire = Rc::clone(&inner);
                inner.timers.schedule(request, move || {
                    fire.tracker.borrow_mut().deferral_elapsed(request.kind);
                });
            }
        }) as Box<dyn FnMut()>);
        let _ = self
            .inner
            .scroll_target
            .add_event_listener_with_callback("scroll", scroll.as_ref().unchecked_ref());
        *self.inner.scroll_closure.borrow_mut() = Some(scroll);

        let inner = Rc::clone(&self.inner);
        let resize = Closure::wrap(Box::new(move || {
            let request = inner.tracker.borrow_mut().signal_resize();
            if let Some(request) = request {
                let fire = Rc::clone(&inner);
                // `schedule` replaces the pending resize timeout, which is
                // what collapses a burst into a single firing.
                inner.timers.schedule(request, move || {
                    fire.tracker.borrow_mut().deferral_elapsed(request.kind);
                });
            }
        }) as Box<dyn FnMut()>);
        let _ = self
            .inner
            .window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
        *self.inner.resize_closure.borrow_mut() = Some(resize);
    }

    /// Subscribes a handler to section events.
    ///
    /// Handlers run synchronously during reconciliation and must not call
    /// back into the watcher.
    pub fn on(&self, handler: impl FnMut(SectionEvent) + 'static) {
        self.inner.tracker.borrow_mut().on(handler);
    }

    /// Runs one reconciliation pass immediately.
    ///
    /// Useful right after [`init`](Self::init) so sections already in view
    /// receive their classes without waiting for the first scroll.
    pub fn reconcile_now(&self) {
        self.inner.tracker.borrow_mut().reconcile();
    }

    /// Whether scroll/resize listeners are currently registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    /// Removes listeners, cancels pending timeouts, and clears handlers.
    ///
    /// Idempotent. After disposal the watcher only supports manual
    /// [`reconcile_now`](Self::reconcile_now) passes (which will emit no
    /// events, as the handlers are gone).
    pub fn dispose(&self) {
        if self.inner.attached.get() {
            if let Some(closure) = self.inner.scroll_closure.borrow_mut().take() {
                let _ = self
                    .inner
                    .scroll_target
                    .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
            }
            if let Some(closure) = self.inner.resize_closure.borrow_mut().take() {
                let _ = self
                    .inner
                    .window
                    .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            }
            self.inner.attached.set(false);
        }
        self.inner.timers.cancel_all();
        self.inner.tracker.borrow_mut().dispose();
    }
}

impl Drop for SectionWatcher {
    fn drop(&mut self) {
        // Also breaks the closure → inner reference cycle so the
        // environment can be collected.
        self.dispose();
    }
}

impl core::fmt::Debug for SectionWatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionWatcher")
            .field("attached", &self.inner.attached.get())
            .field("timers", &self.inner.timers)
            .finish()
    }
}
