// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core viewport-membership model for scroll-driven section animation.
//!
//! `outcrop_core` decides which sections of a scrolling page are inside the
//! visible viewport and keeps their presentation classes in sync, so that
//! external stylesheets can run enter/exit animations. It is `no_std`
//! compatible (with `alloc`) and free of platform APIs: all DOM access goes
//! through the [`ViewEnvironment`] trait, which backend crates implement.
//!
//! # Architecture
//!
//! The crate is organized around a signal → deferral → reconcile loop:
//!
//! ```text
//!   host event (scroll / resize)
//!       │
//!       ▼
//!   ViewportTracker::signal_*() ──► ScheduleRequest ──► host timer
//!                                                           │
//!                      ┌────────── deferral elapses ────────┘
//!                      ▼
//!   ViewportTracker::reconcile() ──► class updates ──► SectionEvent
//! ```
//!
//! **[`config`]** — Tracker options (viewport factor, container id, class
//! names, scroll parent) with documented defaults and normalization.
//!
//! **[`geometry`]** — Document-space section metrics and the viewed-band
//! intersection predicate.
//!
//! **[`env`]** — The [`ViewEnvironment`] contract backends implement, plus
//! the offset-parent walk that produces document coordinates.
//!
//! **[`events`]** — [`SectionEvent`] and the composition-based
//! [`EventHub`] publish/subscribe surface.
//!
//! **[`deferral`]** — Scroll coalescing and resize debouncing expressed as
//! a pure state machine; hosts own the actual timers.
//!
//! **[`tracker`]** — [`ViewportTracker`], which ties the pieces together
//! and runs the per-section reconciliation pass.
//!
//! **[`error`]** — [`TrackerError`] for environment-resolution failures.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//!
//! [`ViewEnvironment`]: env::ViewEnvironment
//! [`SectionEvent`]: events::SectionEvent
//! [`EventHub`]: events::EventHub
//! [`ViewportTracker`]: tracker::ViewportTracker
//! [`TrackerError`]: error::TrackerError

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod deferral;
pub mod env;
pub mod error;
pub mod events;
pub mod geometry;
pub mod tracker;
