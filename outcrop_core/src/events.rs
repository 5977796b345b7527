// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section visibility events.
//!
//! The tracker publishes one event per section per reconciliation pass
//! through an [`EventHub`] it owns — composition rather than inheritance,
//! so the tracker stays polymorphic over whatever messaging backbone the
//! host embeds it in. Delivery is synchronous and on the caller's thread.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// A section's reconciled viewport membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionEvent {
    /// The section at this index was just reconciled as visible.
    InView(usize),
    /// The section at this index was just reconciled as not visible.
    OutView(usize),
}

impl SectionEvent {
    /// Returns the section index the event refers to.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::InView(index) | Self::OutView(index) => index,
        }
    }
}

/// Synchronous publish/subscribe hub for [`SectionEvent`]s.
///
/// Handlers are invoked in subscription order, on the thread that runs the
/// reconciliation pass. Handlers must not call back into the tracker that
/// owns the hub.
#[derive(Default)]
pub struct EventHub {
    handlers: Vec<Box<dyn FnMut(SectionEvent)>>,
}

impl EventHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Subscribes a handler to all section events.
    pub fn on(&mut self, handler: impl FnMut(SectionEvent) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Delivers `event` to every subscribed handler, in order.
    pub(crate) fn emit(&mut self, event: SectionEvent) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }

    /// Number of subscribed handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Drops all subscribed handlers.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
