// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal controller: one set of document listeners shared by every open overlay.
//!
//! ## Layers
//!
//! Each active overlay pushes a layer; the most recently pushed layer is the
//! topmost. An event is only offered to the topmost *armed* layer, so a single
//! pointer-down or Escape dismisses at most one overlay and nested overlays
//! close innermost first.
//!
//! ## Arming
//!
//! A layer pushed while event `N` is being dispatched must not react to `N`
//! itself: the click that opened a submenu inside a menu would otherwise hit
//! the submenu's outside check immediately. Layers record the event sequence
//! number current when they were pushed and only react to later events.
//!
//! ## Listeners
//!
//! A `PointerDown` listener (capture phase, so target handlers cannot hide the
//! event) and a `KeyDown` listener are registered when the first layer is
//! pushed and removed when the last layer leaves.

use alloc::vec::Vec;

use crate::host::Host;
use crate::types::{DismissReason, Key, ListenerId, ListenerKind, ListenerPhase, OverlayId};

#[derive(Clone, Debug)]
struct Layer<E> {
    overlay: OverlayId,
    anchor: Option<E>,
    panel: E,
    armed_after: u64,
    outside_click: bool,
    escape: bool,
}

/// Which signals a layer reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LayerOptions {
    /// Close on pointer-down outside anchor and panel.
    pub outside_click: bool,
    /// Close on Escape.
    pub escape: bool,
}

/// Shared dismissal state for all overlays of one manager.
#[derive(Clone, Debug)]
pub struct DismissController<E> {
    layers: Vec<Layer<E>>,
    pointer_listener: Option<ListenerId>,
    key_listener: Option<ListenerId>,
    event_seq: u64,
}

impl<E> Default for DismissController<E> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            pointer_listener: None,
            key_listener: None,
            event_seq: 0,
        }
    }
}

impl<E: Copy + Eq + core::fmt::Debug> DismissController<E> {
    /// Create a controller with no layers and no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// True while document listeners are registered.
    pub fn is_listening(&self) -> bool {
        self.pointer_listener.is_some()
    }

    /// True if `overlay` has a layer.
    pub fn has_layer(&self, overlay: OverlayId) -> bool {
        self.layers.iter().any(|l| l.overlay == overlay)
    }

    /// Push a layer on top. Pushing an overlay that already has a layer is a no-op.
    pub fn push<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        overlay: OverlayId,
        anchor: Option<E>,
        panel: E,
        options: LayerOptions,
    ) {
        if self.has_layer(overlay) {
            return;
        }
        if self.layers.is_empty() {
            self.pointer_listener =
                Some(host.add_listener(ListenerKind::PointerDown, ListenerPhase::Capture));
            self.key_listener =
                Some(host.add_listener(ListenerKind::KeyDown, ListenerPhase::Bubble));
        }
        self.layers.push(Layer {
            overlay,
            anchor,
            panel,
            armed_after: self.event_seq,
            outside_click: options.outside_click,
            escape: options.escape,
        });
    }

    /// Remove an overlay's layer, dropping the listeners with the last one.
    pub fn remove<H: Host<Element = E>>(&mut self, host: &mut H, overlay: OverlayId) {
        self.layers.retain(|l| l.overlay != overlay);
        if self.layers.is_empty() {
            if let Some(id) = self.pointer_listener.take() {
                host.remove_listener(id);
            }
            if let Some(id) = self.key_listener.take() {
                host.remove_listener(id);
            }
        }
    }

    /// Update the anchor used for the outside check.
    pub fn set_anchor(&mut self, overlay: OverlayId, anchor: Option<E>) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.overlay == overlay) {
            layer.anchor = anchor;
        }
    }

    /// Handle a document pointer-down on `target` (`None` when it hit nothing).
    ///
    /// Returns the overlay to dismiss, if any.
    pub fn pointer_down<H: Host<Element = E>>(
        &mut self,
        host: &H,
        target: Option<E>,
    ) -> Option<(OverlayId, DismissReason)> {
        self.event_seq += 1;
        let seq = self.event_seq;
        let layer = self.topmost_armed(seq)?;
        if !layer.outside_click {
            return None;
        }
        let inside = target.is_some_and(|t| {
            host.contains(layer.panel, t) || layer.anchor.is_some_and(|a| host.contains(a, t))
        });
        (!inside).then_some((layer.overlay, DismissReason::OutsideClick))
    }

    /// Handle a document keydown. Only Escape dismisses.
    pub fn key_down(&mut self, key: Key) -> Option<(OverlayId, DismissReason)> {
        self.event_seq += 1;
        let seq = self.event_seq;
        if key != Key::Escape {
            return None;
        }
        let layer = self.topmost_armed(seq)?;
        layer.escape.then_some((layer.overlay, DismissReason::Escape))
    }

    /// Route a dismissal decided elsewhere, for example by list navigation.
    ///
    /// Returns the pair if `overlay` has a layer that accepts `reason`.
    /// Escape and outside-click reasons honor the layer's [`LayerOptions`].
    pub fn dismiss(
        &self,
        overlay: OverlayId,
        reason: DismissReason,
    ) -> Option<(OverlayId, DismissReason)> {
        let layer = self.layers.iter().find(|l| l.overlay == overlay)?;
        let allowed = match reason {
            DismissReason::Escape => layer.escape,
            DismissReason::OutsideClick => layer.outside_click,
            _ => true,
        };
        allowed.then_some((overlay, reason))
    }

    fn topmost_armed(&self, seq: u64) -> Option<&Layer<E>> {
        self.layers.iter().rev().find(|l| l.armed_after < seq)
    }
}
