// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-backed view environment.
//!
//! [`DomEnvironment`] resolves the configured container and its live
//! section collection once, at construction, and then serves the
//! [`ViewEnvironment`] contract from live DOM reads. Class mutations go
//! through `classList`, which is idempotent by itself.

use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, EventTarget, HtmlCollection, HtmlElement, Window};

use outcrop_core::config::{ScrollParent, TrackerConfig};
use outcrop_core::env::ViewEnvironment;
use outcrop_core::error::TrackerError;

/// The element (or window) scroll offsets are read from and scroll events
/// are listened on.
///
/// Window-backed references report `pageYOffset`; element-backed ones
/// report `scrollTop`.
#[derive(Clone, Debug)]
enum ScrollRef {
    Window(Window),
    Element(Element),
}

impl ScrollRef {
    fn offset(&self) -> f64 {
        match self {
            Self::Window(window) => window.page_y_offset().unwrap_or(0.0),
            Self::Element(element) => f64::from(element.scroll_top()),
        }
    }

    fn event_target(&self) -> &EventTarget {
        match self {
            Self::Window(window) => window,
            Self::Element(element) => element,
        }
    }
}

/// Live-DOM implementation of the core's [`ViewEnvironment`].
///
/// The section collection comes from `getElementsByClassName` and stays
/// live: entries appearing or vanishing after construction are picked up
/// by the next reconciliation pass.
#[derive(Clone, Debug)]
pub struct DomEnvironment {
    window: Window,
    document: Document,
    sections: HtmlCollection,
    scroll_ref: ScrollRef,
}

impl DomEnvironment {
    /// Resolves the environment for `config`.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::NoDocument`] when there is no window or document
    ///   (a guarded capability check, e.g. under server-side rendering).
    /// - [`TrackerError::ContainerNotFound`] when `config.container_id`
    ///   does not resolve to an element.
    pub fn resolve(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let window = web_sys::window().ok_or(TrackerError::NoDocument)?;
        let document = window.document().ok_or(TrackerError::NoDocument)?;

        let container: HtmlElement = document
            .get_element_by_id(&config.container_id)
            .and_then(|element| element.dyn_into().ok())
            .ok_or_else(|| TrackerError::ContainerNotFound {
                id: config.container_id.clone(),
            })?;

        let sections = container.get_elements_by_class_name(&config.section_class);

        let scroll_ref = match config.scroll_parent {
            ScrollParent::Window => ScrollRef::Window(window.clone()),
            ScrollParent::ContainerParent => match container.parent_element() {
                Some(parent) => ScrollRef::Element(parent),
                None => {
                    // A detached container has no scrollable parent; fall
                    // back to the window rather than tracking nothing.
                    log::warn!("container has no parent element, using window scroll");
                    ScrollRef::Window(window.clone())
                }
            },
        };

        Ok(Self {
            window,
            document,
            sections,
            scroll_ref,
        })
    }

    /// The target scroll listeners attach to (window or parent element).
    #[must_use]
    pub fn scroll_target(&self) -> &EventTarget {
        self.scroll_ref.event_target()
    }

    /// The window, for resize listeners.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl ViewEnvironment for DomEnvironment {
    type Node = HtmlElement;

    fn section_count(&self) -> usize {
        self.sections.length() as usize
    }

    fn section(&self, index: usize) -> Option<HtmlElement> {
        let index = u32::try_from(index).ok()?;
        // `dyn_into` drops non-HTML entries of the live collection.
        self.sections
            .item(index)
            .and_then(|element| element.dyn_into().ok())
    }

    fn offset_top(&self, node: &HtmlElement) -> f64 {
        f64::from(node.offset_top())
    }

    fn offset_left(&self, node: &HtmlElement) -> f64 {
        f64::from(node.offset_left())
    }

    fn offset_height(&self, node: &HtmlElement) -> f64 {
        f64::from(node.offset_height())
    }

    fn offset_parent(&self, node: &HtmlElement) -> Option<HtmlElement> {
        node.offset_parent()
            .and_then(|element| element.dyn_into().ok())
    }

    fn document_client_height(&self) -> f64 {
        self.document
            .document_element()
            .map_or(0.0, |element| f64::from(element.client_height()))
    }

    fn window_inner_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_ref.offset()
    }

    fn add_class(&self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &HtmlElement, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn is_touch_capable(&self) -> bool {
        crate::is_touch_capable()
    }
}
