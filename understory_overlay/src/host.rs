// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host environment contract: measurement, containment, portal target, and listeners.
//!
//! ## Overview
//!
//! The engine never touches a real document. A [`Host`] provides the few
//! DOM-like services it needs, and the engine borrows them for the duration of
//! a call. Browser integrations implement it over `web-sys`; tests and demos use
//! [`HeadlessHost`](crate::adapters::headless::HeadlessHost).
//!
//! Hosts without a document at all can use [`NoDocument`]; every overlay then
//! stays closed.

use kurbo::Rect;

use crate::types::{ListenerId, ListenerKind, ListenerPhase};

/// Services the overlay engine needs from its environment.
pub trait Host {
    /// Element handle type. Cheap to copy; compared by identity.
    type Element: Copy + Eq + core::fmt::Debug;

    /// Viewport-space bounding rectangle, measured on demand.
    ///
    /// Returns `None` if the element no longer exists.
    fn bounding_rect(&self, element: Self::Element) -> Option<Rect>;

    /// The visible viewport.
    fn viewport(&self) -> Rect;

    /// Parent of an element, or `None` for roots.
    fn parent_of(&self, element: Self::Element) -> Option<Self::Element>;

    /// Returns true if `node` is `ancestor` or one of its descendants.
    ///
    /// The default walks [`Host::parent_of`]; override it if the host has a faster check.
    fn contains(&self, ancestor: Self::Element, node: Self::Element) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent_of(n);
        }
        false
    }

    /// The element portaled content attaches to, usually the document body.
    fn document_body(&self) -> Option<Self::Element>;

    /// Create an empty container appended to `parent`, stacked at `z_index`.
    fn create_container(&mut self, parent: Self::Element, z_index: i32) -> Option<Self::Element>;

    /// Remove a container created by [`Host::create_container`], with its subtree.
    fn remove_container(&mut self, container: Self::Element);

    /// Register a document-level listener.
    fn add_listener(&mut self, kind: ListenerKind, phase: ListenerPhase) -> ListenerId;

    /// Unregister a listener. Unknown ids are ignored.
    fn remove_listener(&mut self, id: ListenerId);
}

/// A host with no document: nothing can be measured or mounted.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDocument;

impl Host for NoDocument {
    type Element = ();

    fn bounding_rect(&self, _element: ()) -> Option<Rect> {
        None
    }

    fn viewport(&self) -> Rect {
        Rect::ZERO
    }

    fn parent_of(&self, _element: ()) -> Option<()> {
        None
    }

    fn document_body(&self) -> Option<()> {
        None
    }

    fn create_container(&mut self, _parent: (), _z_index: i32) -> Option<()> {
        None
    }

    fn remove_container(&mut self, _container: ()) {}

    fn add_listener(&mut self, _kind: ListenerKind, _phase: ListenerPhase) -> ListenerId {
        ListenerId::new(0)
    }

    fn remove_listener(&mut self, _id: ListenerId) {}
}
