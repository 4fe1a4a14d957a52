// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, updates, measurement, queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

use crate::types::{ElementFlags, ElementId, Hit, LocalElement, QueryFilter};

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    local: LocalElement,
}

impl Element {
    fn new(generation: u32, local: LocalElement) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

/// A headless element tree standing in for a browser document.
#[derive(Clone)]
pub struct Document {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    body: Option<ElementId>,
    viewport: Rect,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|e| e.is_some()).count();
        f.debug_struct("Document")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("body", &self.body)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document whose `body` covers `viewport`.
    pub fn new(viewport: Rect) -> Self {
        let mut doc = Self::detached(viewport);
        let body = doc.insert(None, LocalElement::with_bounds(viewport));
        doc.body = Some(body);
        doc
    }

    /// Create a document with no body: nothing can be portaled into it.
    ///
    /// Elements can still be inserted as roots, which is enough to model
    /// components rendered outside any browser.
    pub fn detached(viewport: Rect) -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            body: None,
            viewport,
        }
    }

    /// The body element, if this document has one.
    pub fn body(&self) -> Option<ElementId> {
        self.body
    }

    /// The visible viewport rectangle.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Resize the viewport. The body follows it.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        if let Some(body) = self.body {
            self.set_bounds(body, viewport);
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.iter().filter(|e| e.is_some()).count()
    }

    /// True if the document has no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, local: LocalElement) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove an element and its subtree.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.element(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.element(id).children.clone();
        for child in children {
            self.remove(child);
        }
        if self.body == Some(id) {
            self.body = None;
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` to the end of `new_parent`'s children (or make it a root).
    pub fn reparent(&mut self, id: ElementId, new_parent: Option<ElementId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.contains(id, p))
        {
            return;
        }
        if let Some(parent) = self.element(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Update local bounds.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(e) = self.element_opt_mut(id) {
            e.local.bounds = bounds;
        }
    }

    /// Update the z index.
    pub fn set_z_index(&mut self, id: ElementId, z: i32) {
        if let Some(e) = self.element_opt_mut(id) {
            e.local.z_index = z;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(e) = self.element_opt_mut(id) {
            e.local.flags = flags;
        }
    }

    /// Set the scroll position of a scroll container.
    pub fn set_scroll_offset(&mut self, id: ElementId, offset: Vec2) {
        if let Some(e) = self.element_opt_mut(id) {
            e.local.scroll_offset = offset;
        }
    }

    /// Scroll a container by `delta`.
    pub fn scroll_by(&mut self, id: ElementId, delta: Vec2) {
        if let Some(e) = self.element_opt_mut(id) {
            e.local.scroll_offset += delta;
        }
    }

    /// Local data for a live element.
    pub fn local(&self, id: ElementId) -> Option<&LocalElement> {
        self.element_opt(id).map(|e| &e.local)
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.element_opt(id).is_some()
    }

    /// Parent of a live element.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.element_opt(id)?.parent
    }

    /// Children of a live element, in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element_opt(id).map_or(&[], |e| &e.children)
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent_of(id);
        }
        false
    }

    /// Path from the root to `id` (inclusive). Empty if `id` is stale.
    pub fn path_to(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut cur = self.is_alive(id).then_some(id);
        while let Some(c) = cur {
            out.push(c);
            cur = self.parent_of(c);
        }
        out.reverse();
        out
    }

    /// Viewport-space rectangle of an element, like `getBoundingClientRect`.
    ///
    /// Local bounds are shifted by the scroll offsets of every ancestor.
    /// Elements that are hidden (or inside a hidden ancestor) measure as
    /// [`Rect::ZERO`]. Returns `None` for stale ids.
    pub fn bounding_rect(&self, id: ElementId) -> Option<Rect> {
        let element = self.element_opt(id)?;
        if !element.local.flags.contains(ElementFlags::VISIBLE) {
            return Some(Rect::ZERO);
        }
        let mut scroll = Vec2::ZERO;
        let mut cur = element.parent;
        while let Some(p) = cur {
            let parent = self.element(p);
            if !parent.local.flags.contains(ElementFlags::VISIBLE) {
                return Some(Rect::ZERO);
            }
            scroll += parent.local.scroll_offset;
            cur = parent.parent;
        }
        Some(element.local.bounds - scroll)
    }

    /// Returns the topmost element under a viewport-space point.
    ///
    /// Elements paint in document order within their stacking level, and an
    /// element's level is the highest z index on its root→element path.
    /// Honors [`QueryFilter`]; hidden subtrees are skipped entirely when
    /// `visible_only` is set.
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let mut best: Option<(ElementId, i32)> = None;
        let roots: Vec<ElementId> = self
            .elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| match e {
                Some(e) if e.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "ElementId uses 32-bit indices by design."
                    )]
                    Some(ElementId::new(i as u32, e.generation))
                }
                _ => None,
            })
            .collect();
        for root in roots {
            self.hit_test_recursive(root, pt, filter, i32::MIN, Vec2::ZERO, &mut best);
        }
        best.map(|(element, _)| Hit {
            element,
            path: self.path_to(element),
        })
    }

    // --- internals ---

    fn hit_test_recursive(
        &self,
        id: ElementId,
        pt: Point,
        filter: QueryFilter,
        parent_level: i32,
        scroll: Vec2,
        best: &mut Option<(ElementId, i32)>,
    ) {
        let e = self.element(id);
        if filter.visible_only && !e.local.flags.contains(ElementFlags::VISIBLE) {
            return;
        }
        let level = parent_level.max(e.local.z_index);
        let pickable = !filter.pickable_only || e.local.flags.contains(ElementFlags::PICKABLE);
        if pickable && (e.local.bounds - scroll).contains(pt) {
            // Later in document order wins at equal level.
            match best {
                Some((_, best_level)) if level < *best_level => {}
                _ => *best = Some((id, level)),
            }
        }
        let child_scroll = scroll + e.local.scroll_offset;
        for &child in &e.children {
            self.hit_test_recursive(child, pt, filter, level, child_scroll, best);
        }
    }

    fn element_opt(&self, id: ElementId) -> Option<&Element> {
        self.elements
            .get(id.idx())?
            .as_ref()
            .filter(|e| e.generation == id.1)
    }

    fn element(&self, id: ElementId) -> &Element {
        self.elements[id.idx()]
            .as_ref()
            .expect("dangling ElementId")
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements[id.idx()]
            .as_mut()
            .expect("dangling ElementId")
    }

    fn element_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let e = self.elements.get_mut(id.idx())?.as_mut()?;
        if e.generation != id.1 {
            return None;
        }
        Some(e)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.element_mut(parent).children.push(id);
        self.element_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.element_mut(parent).children.retain(|c| *c != id);
        self.element_mut(id).parent = None;
    }
}
