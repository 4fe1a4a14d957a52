// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the headless document: element identifiers, flags, and local data.

use kurbo::{Rect, Vec2};

/// Identifier for an element in a [`Document`](crate::Document).
///
/// A small, copyable handle consisting of a slot index and a generation counter.
///
/// - On insert, a slot is allocated; reused slots get a higher generation.
/// - On remove, the slot is freed and every existing `ElementId` for it becomes stale.
/// - Stale ids never alias a different live element because the generation must match.
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling rendering and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is rendered. Hidden elements measure as zero-sized, like `display: none`.
        const VISIBLE  = 0b0000_0001;
        /// Element receives pointer events (hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Per-element data supplied by the caller.
#[derive(Clone, Debug)]
pub struct LocalElement {
    /// Bounds in the content space of the nearest scrolling ancestor, before scrolling.
    pub bounds: Rect,
    /// Scroll position of this element's content; shifts every descendant by `-scroll_offset`.
    pub scroll_offset: Vec2,
    /// Stacking order. Descendants paint within their ancestor's level.
    pub z_index: i32,
    /// Visibility and picking flags.
    pub flags: ElementFlags,
}

impl Default for LocalElement {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            scroll_offset: Vec2::ZERO,
            z_index: 0,
            flags: ElementFlags::default(),
        }
    }
}

impl LocalElement {
    /// An element occupying `bounds` with default flags.
    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }
}

/// Result of a hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// The matched element.
    pub element: ElementId,
    /// Path from the root to the element (inclusive).
    pub path: alloc::vec::Vec<ElementId>,
}

/// Filters applied during hit testing.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, skip elements (or descendants of elements) without [`ElementFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, skip elements without [`ElementFlags::PICKABLE`].
    pub pickable_only: bool,
}

impl QueryFilter {
    /// The filter a pointer event uses: visible and pickable elements only.
    pub const POINTER: Self = Self {
        visible_only: true,
        pickable_only: true,
    };
}
