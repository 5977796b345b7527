// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a column of sections that animate in as they scroll into view.
//!
//! Builds the page at load time — a fixed status line plus a container of
//! tall colored sections — then hands it to [`SectionWatcher`]. The
//! stylesheet injected below does the actual animating; the watcher only
//! toggles classes and reports events.
//!
//! Build with: `wasm-pack build --target web demos/web_sections`
//!
//! Then serve `demos/web_sections/` and open `index.html` in a browser.
//!
//! [`SectionWatcher`]: outcrop_backend_web::SectionWatcher

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;
use alloc::string::ToString as _;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use outcrop_backend_web::SectionWatcher;
use outcrop_core::config::TrackerConfig;
use outcrop_core::events::SectionEvent;

const NUM_SECTIONS: usize = 8;

const SECTION_COLORS: [&str; 4] = [
    "rgba(242, 67, 54, 0.9)",  // red
    "rgba(77, 176, 80, 0.9)",  // green
    "rgba(33, 150, 243, 0.9)", // blue
    "rgba(255, 194, 8, 0.9)",  // amber
];

/// Styles for the section classes the watcher toggles: sections start
/// shifted down and transparent, and slide in when the animate class lands.
const STYLESHEET: &str = "
body { margin: 0; font-family: sans-serif; background: #111; }
.list-view-scroll-section {
    height: 70vh;
    margin: 10vh 10vw;
    border-radius: 12px;
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 2em;
    color: #fff;
}
.list-view-scroll-init {
    opacity: 0;
    transform: translateY(120px);
}
.list-view-scroll-animate {
    opacity: 1;
    transform: translateY(0);
    transition: opacity 0.5s ease, transform 0.5s ease;
}
#status {
    position: fixed;
    top: 0;
    left: 0;
    padding: 8px 12px;
    background: rgba(0, 0, 0, 0.7);
    color: #9e9;
    font-size: 14px;
    z-index: 1;
}
";

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");
    let body = document.body().expect("no body");

    let style = document.create_element("style")?;
    style.set_text_content(Some(STYLESHEET));
    body.append_child(&style)?;

    let status: HtmlElement = document.create_element("div")?.unchecked_into();
    status.set_id("status");
    status.set_text_content(Some("scroll to animate sections"));
    body.append_child(&status)?;

    body.append_child(&create_sections(&document)?)?;

    let config = TrackerConfig::default();
    let watcher =
        SectionWatcher::init(config).map_err(|err| JsValue::from_str(&err.to_string()))?;

    watcher.on(move |event| {
        let text = match event {
            SectionEvent::InView(index) => format!("section {index} in view"),
            SectionEvent::OutView(index) => format!("section {index} out of view"),
        };
        status.set_text_content(Some(&text));
    });

    // Style the sections already on screen before the first scroll.
    watcher.reconcile_now();

    // The watcher's listeners serve the whole page lifetime.
    core::mem::forget(watcher);
    Ok(())
}

/// Builds the tracked container and its section children.
fn create_sections(document: &Document) -> Result<HtmlElement, JsValue> {
    let container: HtmlElement = document.create_element("div")?.unchecked_into();
    container.set_id("list-view-scroll");

    for index in 0..NUM_SECTIONS {
        let section: HtmlElement = document.create_element("div")?.unchecked_into();
        section.set_class_name("list-view-scroll-section");
        section.set_text_content(Some(&format!("section {index}")));
        let _ = section
            .style()
            .set_property("background", SECTION_COLORS[index % SECTION_COLORS.len()]);
        container.append_child(&section)?;
    }

    Ok(container)
}
