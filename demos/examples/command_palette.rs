// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command palette: type to filter, arrow keys to move, Enter to run.
//!
//! Run:
//! - `cargo run -p understory_examples --example command_palette`

use core::time::Duration;

use kurbo::Rect;
use understory_headless::{Document, LocalElement};
use understory_overlay::adapters::headless::HeadlessHost;
use understory_overlay::listbox::{DisabledPolicy, ListItem, Listbox, NavPolicy};
use understory_overlay::{Key, OverlayConfig, OverlayManager, Status, Trigger};
use understory_placement::{Align, Placement, Side};

fn main() {
    env_logger::init();

    let mut doc = Document::new(Rect::new(0.0, 0.0, 1280.0, 800.0));
    let body = doc.body().unwrap();
    let search_box = doc.insert(
        Some(body),
        LocalElement::with_bounds(Rect::new(440.0, 80.0, 840.0, 112.0)),
    );
    let mut overlays = OverlayManager::new(HeadlessHost::new(doc));
    let palette = overlays.insert(
        OverlayConfig::default()
            .with_placement(Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0))
            .with_trigger(Trigger::Manual),
        Some(search_box),
    );

    let mut list = Listbox::new(
        vec![
            ListItem::new("open", "Open File…").with_keywords(["load"]),
            ListItem::new("save", "Save"),
            ListItem::new("save-as", "Save As…"),
            ListItem::new("share", "Share").with_disabled(true),
            ListItem::new("settings", "Settings").with_keywords(["preferences"]),
        ],
        NavPolicy {
            disabled: DisabledPolicy::Skip,
            allow_none: false,
            wrap: true,
        },
    );
    list.set_scroll_metrics(28.0, 56.0);

    overlays.open(palette, Duration::ZERO);

    let mut ran = None;
    let typed = "sa";
    let keys = typed
        .chars()
        .map(Key::Character)
        .chain([Key::ArrowDown, Key::ArrowDown, Key::Enter]);
    for (i, key) in keys.enumerate() {
        let now = Duration::from_millis(50 * i as u64);
        overlays.list_key(palette, &mut list, key, now, |item| ran = Some(item.id));
        let shown: Vec<&str> = list.filtered().map(|item| item.label.as_str()).collect();
        println!(
            "{key:?}: search={:?} shown={shown:?} highlighted={:?} scroll_top={}",
            list.search(),
            list.highlighted(),
            list.scroll_top()
        );
    }

    println!("ran: {ran:?}");
    assert_eq!(ran, Some("save"));
    assert_eq!(overlays.status(palette), Status::Closed);
}
