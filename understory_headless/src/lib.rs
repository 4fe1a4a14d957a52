// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_headless --heading-base-level=0

//! Understory Headless: a small element tree that behaves enough like a DOM to drive UI logic
//! without a browser.
//!
//! Floating UI (popovers, menus, tooltips) needs a handful of things from its host document:
//! measuring an element in viewport space, asking whether one element contains another,
//! finding what is under the pointer, and a body to attach portaled content to.
//! [`Document`] provides exactly that, in memory and deterministically, so the logic can be
//! tested and demonstrated without a rendering backend.
//!
//! - [`Document::bounding_rect`] measures like `getBoundingClientRect`, honoring ancestor
//!   scroll offsets and hidden elements.
//! - [`Document::contains`] and [`Document::path_to`] answer containment questions.
//! - [`Document::hit_test_point`] finds the topmost element under a point, honoring z order
//!   and [`QueryFilter`].
//! - [`Document::detached`] models an environment with no body at all.
//!
//! It is not a layout engine: callers supply element bounds directly.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use understory_headless::{Document, LocalElement, QueryFilter};
//!
//! let mut doc = Document::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let body = doc.body().unwrap();
//!
//! let list = doc.insert(Some(body), LocalElement::with_bounds(Rect::new(0.0, 0.0, 200.0, 100.0)));
//! let row = doc.insert(
//!     Some(list),
//!     LocalElement::with_bounds(Rect::new(0.0, 120.0, 200.0, 140.0)),
//! );
//!
//! doc.scroll_by(list, Vec2::new(0.0, 100.0));
//! assert_eq!(doc.bounding_rect(row), Some(Rect::new(0.0, 20.0, 200.0, 40.0)));
//!
//! let hit = doc.hit_test_point(Point::new(10.0, 30.0), QueryFilter::POINTER).unwrap();
//! assert_eq!(hit.element, row);
//! assert!(doc.contains(list, hit.element));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod types;

pub use document::Document;
pub use types::{ElementFlags, ElementId, Hit, LocalElement, QueryFilter};
