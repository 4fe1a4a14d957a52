// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the overlay engine: ids, statuses, reasons, keys, listeners, and notifications.
//!
//! These types describe the engine's inputs and outputs.
//! They are referenced by the [`manager`](crate::manager) and by host integrations.

use understory_placement::Positioned;

/// Lifecycle status of one overlay instance.
///
/// `Opening` and `Closing` exist so entry/exit transitions can finish before the
/// panel unmounts. Overlays with zero-length transitions skip them.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Status {
    /// Not shown; no session exists.
    #[default]
    Closed,
    /// Mounted and playing its entry transition.
    Opening,
    /// Mounted and settled.
    Open,
    /// Still mounted while the exit transition plays.
    Closing,
}

impl Status {
    /// True for `Opening` and `Open`, the statuses during which the overlay
    /// listens for dismissal and has a defined position.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }

    /// True whenever the panel is mounted.
    pub const fn is_mounted(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Why an overlay was closed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DismissReason {
    /// Pointer-down outside both the anchor and the panel.
    OutsideClick,
    /// The Escape key.
    Escape,
    /// An item in the panel was chosen.
    Selection,
    /// The pointer left a hover-triggered overlay.
    PointerLeave,
    /// Focus left a focus-triggered overlay.
    Blur,
    /// Closed by code, for example a trigger toggle.
    Programmatic,
}

/// Keys the engine reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Enter / Return.
    Enter,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// A printable character.
    Character(char),
    /// Anything else.
    Other,
}

/// Document-level event kinds the engine listens to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenerKind {
    /// Pointer pressed anywhere in the document.
    PointerDown,
    /// Key pressed anywhere in the document.
    KeyDown,
    /// Any scroll, including inner scroll containers.
    Scroll,
    /// Viewport resize.
    Resize,
}

/// Propagation phase a listener is registered for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListenerPhase {
    /// Root-to-target traversal; sees the event before target handlers can stop it.
    Capture,
    /// Target-to-root traversal.
    Bubble,
}

/// Host-assigned handle for a registered listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a host-specific listener handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-specific handle.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Identifier for an overlay in an [`OverlayManager`](crate::manager::OverlayManager).
///
/// Generational like a slot map key: once an overlay is removed, its id is stale
/// and never refers to a later overlay that reuses the slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OverlayId(u32, u32);

impl OverlayId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Output of the engine, drained with
/// [`OverlayManager::take_notifications`](crate::manager::OverlayManager::take_notifications).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Notification {
    /// The status changed.
    StatusChanged {
        /// Overlay concerned.
        overlay: OverlayId,
        /// Previous status.
        from: Status,
        /// New status.
        to: Status,
    },
    /// A controlled overlay wants its owner to apply a new status.
    StatusChangeRequested {
        /// Overlay concerned.
        overlay: OverlayId,
        /// Requested status.
        requested: Status,
        /// Reason, when the request is a close.
        reason: Option<DismissReason>,
    },
    /// A new position was computed.
    Positioned {
        /// Overlay concerned.
        overlay: OverlayId,
        /// The computed position.
        position: Positioned,
    },
    /// The overlay left its active statuses for this reason.
    Dismissed {
        /// Overlay concerned.
        overlay: OverlayId,
        /// Why it closed.
        reason: DismissReason,
    },
}
