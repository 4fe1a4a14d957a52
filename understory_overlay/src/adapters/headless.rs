// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`] over an [`understory_headless::Document`].
//!
//! Listener registrations are recorded rather than wired to anything, so
//! tests can assert that every listener added is removed again.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use understory_headless::{Document, ElementId, LocalElement, QueryFilter};

use crate::host::Host;
use crate::types::{ListenerId, ListenerKind, ListenerPhase};

/// A headless document plus a listener registry.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    doc: Document,
    listeners: Vec<(ListenerId, ListenerKind, ListenerPhase)>,
    next_listener: u64,
}

impl HeadlessHost {
    /// Wrap a document.
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            listeners: Vec::new(),
            next_listener: 1,
        }
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable access for setting bounds, scrolling, and so on.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of registered listeners of one kind.
    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.listeners.iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Phase of the first listener of `kind`, if any.
    pub fn listener_phase(&self, kind: ListenerKind) -> Option<ListenerPhase> {
        self.listeners
            .iter()
            .find(|(_, k, _)| *k == kind)
            .map(|(_, _, p)| *p)
    }

    /// Element a pointer event at `pt` would target.
    pub fn pointer_target(&self, pt: Point) -> Option<ElementId> {
        self.doc
            .hit_test_point(pt, QueryFilter::POINTER)
            .map(|hit| hit.element)
    }
}

impl Host for HeadlessHost {
    type Element = ElementId;

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        self.doc.bounding_rect(element)
    }

    fn viewport(&self) -> Rect {
        self.doc.viewport()
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.doc.parent_of(element)
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.doc.contains(ancestor, node)
    }

    fn document_body(&self) -> Option<ElementId> {
        self.doc.body()
    }

    fn create_container(&mut self, parent: ElementId, z_index: i32) -> Option<ElementId> {
        if !self.doc.is_alive(parent) {
            return None;
        }
        let local = LocalElement {
            z_index,
            ..LocalElement::default()
        };
        Some(self.doc.insert(Some(parent), local))
    }

    fn remove_container(&mut self, container: ElementId) {
        self.doc.remove(container);
    }

    fn add_listener(&mut self, kind: ListenerKind, phase: ListenerPhase) -> ListenerId {
        let id = ListenerId::new(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, kind, phase));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(l, _, _)| *l != id);
    }
}
