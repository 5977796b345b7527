// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout`-based deferral execution.
//!
//! [`TimerHost`] implements the core's host contract: scheduling a
//! [`ScheduleRequest`] replaces any pending timeout of the same
//! [`SignalKind`], so a burst of resize signals collapses to one firing
//! and a stale scroll deferral can never double-fire.

use alloc::boxed::Box;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use outcrop_core::deferral::{ScheduleRequest, SignalKind};

// Direct global bindings instead of `web_sys::Window` methods — avoids
// fetching (and unwrapping) the Window object on every schedule.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

type TimeoutClosure = Closure<dyn FnMut()>;

/// One pending timeout: its JS id plus the closure kept alive for it.
#[derive(Default)]
struct TimeoutSlot {
    id: Cell<Option<i32>>,
    closure: RefCell<Option<TimeoutClosure>>,
}

impl TimeoutSlot {
    fn cancel(&self) {
        if let Some(id) = self.id.take() {
            clear_timeout(id);
        }
        self.closure.borrow_mut().take();
    }
}

/// Executes [`ScheduleRequest`]s with real `setTimeout` timers.
///
/// Holds at most one pending timeout per [`SignalKind`]; scheduling a new
/// one cancels and replaces the old.
#[derive(Default)]
pub struct TimerHost {
    scroll: TimeoutSlot,
    resize: TimeoutSlot,
}

impl TimerHost {
    /// Creates a host with no pending timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: SignalKind) -> &TimeoutSlot {
        match kind {
            SignalKind::Scroll => &self.scroll,
            SignalKind::Resize => &self.resize,
        }
    }

    /// Schedules `on_fire` after the request's delay, replacing any
    /// pending timeout of the same kind.
    pub fn schedule(&self, request: ScheduleRequest, on_fire: impl FnMut() + 'static) {
        let slot = self.slot(request.kind);
        slot.cancel();

        let closure = Closure::wrap(Box::new(on_fire) as Box<dyn FnMut()>);
        let id = set_timeout(closure.as_ref().unchecked_ref(), delay_millis(&request));
        slot.id.set(Some(id));
        *slot.closure.borrow_mut() = Some(closure);
    }

    /// Cancels the pending timeout of `kind`, if any.
    pub fn cancel(&self, kind: SignalKind) {
        self.slot(kind).cancel();
    }

    /// Cancels all pending timeouts (teardown path).
    pub fn cancel_all(&self) {
        self.scroll.cancel();
        self.resize.cancel();
    }
}

impl core::fmt::Debug for TimerHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerHost")
            .field("scroll_pending", &self.scroll.id.get().is_some())
            .field("resize_pending", &self.resize.id.get().is_some())
            .finish()
    }
}

/// Converts the request delay to whole `setTimeout` milliseconds.
fn delay_millis(request: &ScheduleRequest) -> i32 {
    i32::try_from(request.delay.as_millis()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use outcrop_core::deferral::DEBOUNCE_DELAY;

    #[test]
    fn delay_converts_to_whole_milliseconds() {
        let request = ScheduleRequest {
            kind: SignalKind::Scroll,
            delay: DEBOUNCE_DELAY,
        };
        assert_eq!(delay_millis(&request), 60);
    }

    #[test]
    fn oversized_delay_saturates() {
        let request = ScheduleRequest {
            kind: SignalKind::Resize,
            delay: Duration::from_secs(u64::MAX),
        };
        assert_eq!(delay_millis(&request), i32::MAX);
    }
}
