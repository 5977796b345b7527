// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for outcrop.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomEnvironment`]: the [`ViewEnvironment`] implementation over live
//!   DOM elements
//! - [`TimerHost`]: `setTimeout`-based deferral execution with
//!   replace-pending semantics
//! - [`SectionWatcher`]: the wired-up tracker — listeners, timers, and
//!   teardown in one handle
//!
//! [`ViewEnvironment`]: outcrop_core::env::ViewEnvironment

#![no_std]

extern crate alloc;

mod env;
mod timer;
mod watcher;

pub use env::DomEnvironment;
pub use timer::TimerHost;
pub use watcher::SectionWatcher;

use wasm_bindgen::JsValue;

/// Returns whether the current environment exposes touch capability.
///
/// Checks for an `ontouchstart` property on the window, falling back to
/// `navigator.maxTouchPoints`. Touch-capable environments skip
/// scroll-triggered animation entirely — a feature policy decided at
/// tracker construction, not an error.
///
/// Returns `false` when there is no window at all, so non-browser callers
/// see the same behavior as an ordinary desktop page.
#[must_use]
pub fn is_touch_capable() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    if js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false) {
        return true;
    }
    window.navigator().max_touch_points() > 0
}
