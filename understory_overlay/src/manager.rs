// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay manager: owns the host and every overlay instance, and routes
//! document events to them.
//!
//! ## Usage
//!
//! 1) Create an [`OverlayManager`] over a [`Host`].
//! 2) [`insert`](OverlayManager::insert) one entry per floating widget, with
//!    its [`OverlayConfig`] and anchor element.
//! 3) Forward document events: [`pointer_down`](OverlayManager::pointer_down),
//!    [`key_down`](OverlayManager::key_down),
//!    [`pointer_move`](OverlayManager::pointer_move),
//!    [`scroll`](OverlayManager::scroll), [`resize`](OverlayManager::resize),
//!    and [`animation_frame`](OverlayManager::animation_frame).
//! 4) Call [`tick`](OverlayManager::tick) at or after
//!    [`next_deadline`](OverlayManager::next_deadline) so transitions and
//!    hover intent timers fire.
//! 5) Drain [`take_notifications`](OverlayManager::take_notifications) and
//!    render each mounted panel at its [`position`](OverlayManager::position).
//!
//! ## Effects of a status change
//!
//! - Leaving `Closed` mounts a portal container and starts a [`Session`].
//! - Entering `Opening` or `Open` pushes a dismissal layer and computes a position.
//! - Entering `Open` attaches scroll and resize listeners; leaving `Open` detaches them.
//! - Leaving the active statuses removes the dismissal layer and records the reason.
//! - Reaching `Closed` cancels intent timers, unmounts, and ends the session.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Rect;
//! use understory_headless::{Document, LocalElement};
//! use understory_overlay::adapters::headless::HeadlessHost;
//! use understory_overlay::{OverlayConfig, OverlayManager, Status};
//!
//! let mut doc = Document::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let body = doc.body().unwrap();
//! let button = doc.insert(
//!     Some(body),
//!     LocalElement::with_bounds(Rect::new(100.0, 100.0, 180.0, 130.0)),
//! );
//!
//! let mut overlays = OverlayManager::new(HeadlessHost::new(doc));
//! let menu = overlays.insert(OverlayConfig::popover(), Some(button));
//! overlays.open(menu, Duration::ZERO);
//! assert_eq!(overlays.status(menu), Status::Open);
//!
//! // The renderer lays out the panel; the next frame places it.
//! let panel = overlays.panel(menu).unwrap();
//! overlays.host_mut().document_mut().set_bounds(panel, Rect::new(0.0, 0.0, 120.0, 60.0));
//! overlays.animation_frame();
//! let pos = overlays.position(menu).unwrap();
//! assert_eq!((pos.left, pos.top), (80.0, 134.0));
//!
//! // A click elsewhere dismisses it.
//! overlays.pointer_down(Some(body), Duration::from_millis(10));
//! assert_eq!(overlays.status(menu), Status::Closed);
//! ```
//!
//! The `headless_adapter` feature provides the adapter used above.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Size;
use understory_placement::{Positioned, compute_position_with};

use crate::config::{OverlayConfig, Trigger};
use crate::dismiss::{DismissController, LayerOptions};
use crate::host::Host;
use crate::hover::{HoverRegion, HoverTracker};
use crate::intent::{IntentAction, IntentTimer};
use crate::listbox::{ListItem, ListOutcome, Listbox};
use crate::machine::{StateMachine, Transition};
use crate::portal::Portal;
use crate::reposition::Reposition;
use crate::session::Session;
use crate::types::{DismissReason, Key, Notification, OverlayId, Status};

#[derive(Clone, Debug)]
struct Entry<E> {
    generation: u32,
    config: OverlayConfig,
    machine: StateMachine,
    anchor: Option<E>,
    session: Option<Session<E>>,
    intent: IntentTimer,
    hover: HoverTracker,
    reposition: Reposition,
    inert: bool,
    warned_no_anchor: bool,
}

impl<E> Entry<E> {
    fn new(
        generation: u32,
        config: OverlayConfig,
        machine: StateMachine,
        anchor: Option<E>,
    ) -> Self {
        Self {
            generation,
            config,
            machine,
            anchor,
            session: None,
            intent: IntentTimer::default(),
            hover: HoverTracker::default(),
            reposition: Reposition::default(),
            inert: false,
            warned_no_anchor: false,
        }
    }
}

/// Owns a [`Host`] and the overlays anchored in it.
#[derive(Debug)]
pub struct OverlayManager<H: Host> {
    host: H,
    entries: Vec<Option<Entry<H::Element>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    portal: Portal<H::Element>,
    dismiss: DismissController<H::Element>,
    notifications: Vec<Notification>,
}

impl<H: Host> OverlayManager<H> {
    /// Create a manager with no overlays.
    pub fn new(host: H) -> Self {
        Self {
            host,
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            portal: Portal::new(),
            dismiss: DismissController::new(),
            notifications: Vec::new(),
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for example to lay out mounted panels.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Shared portal state.
    pub fn portal(&self) -> &Portal<H::Element> {
        &self.portal
    }

    /// Shared dismissal state.
    pub fn dismissal(&self) -> &DismissController<H::Element> {
        &self.dismiss
    }

    /// Number of overlays.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Returns true if there are no overlays.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add an uncontrolled overlay, initially `Closed`.
    ///
    /// An overlay without an anchor still opens; it is placed at the viewport
    /// origin and a warning is logged.
    pub fn insert(&mut self, config: OverlayConfig, anchor: Option<H::Element>) -> OverlayId {
        self.insert_entry(config, StateMachine::new(config.timing), anchor)
    }

    /// Add a controlled overlay whose owner currently says it is `status`.
    ///
    /// Every later open or close becomes a
    /// [`Notification::StatusChangeRequested`]; apply the owner's decision
    /// with [`OverlayManager::sync`].
    pub fn insert_controlled(
        &mut self,
        config: OverlayConfig,
        anchor: Option<H::Element>,
        status: Status,
        now: Duration,
    ) -> OverlayId {
        let id = self.insert_entry(config, StateMachine::controlled(config.timing), anchor);
        if status != Status::Closed {
            self.sync(id, status, now);
        }
        id
    }

    fn insert_entry(
        &mut self,
        config: OverlayConfig,
        machine: StateMachine,
        anchor: Option<H::Element>,
    ) -> OverlayId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.entries.push(None);
            self.generations.push(1);
            (self.entries.len() - 1, 1)
        };
        self.entries[idx] = Some(Entry::new(generation, config, machine, anchor));
        #[allow(
            clippy::cast_possible_truncation,
            reason = "OverlayId uses 32-bit indices by design."
        )]
        OverlayId::new(idx as u32, generation)
    }

    /// Remove an overlay, releasing its listeners, timers, and portal container.
    ///
    /// Stale ids are ignored.
    pub fn remove(&mut self, id: OverlayId) {
        let Some(mut entry) = self.slot_take(id) else {
            return;
        };
        entry.reposition.stop(&mut self.host);
        self.dismiss.remove(&mut self.host, id);
        if let Some(session) = entry.session.take() {
            self.portal.unmount(&mut self.host, session.mount());
        }
        log::debug!("overlay {id:?} removed");
        self.free_list.push(id.idx());
    }

    /// Returns true if `id` refers to a live overlay.
    pub fn contains(&self, id: OverlayId) -> bool {
        self.entry(id).is_some()
    }

    /// Configuration of an overlay.
    pub fn config(&self, id: OverlayId) -> Option<&OverlayConfig> {
        self.entry(id).map(|e| &e.config)
    }

    /// Change or clear the anchor. An active overlay is repositioned.
    pub fn set_anchor(&mut self, id: OverlayId, anchor: Option<H::Element>) {
        let Self {
            host,
            entries,
            dismiss,
            notifications,
            ..
        } = self;
        let Some(entry) = slot_mut(entries, id) else {
            return;
        };
        entry.anchor = anchor;
        if anchor.is_some() {
            entry.warned_no_anchor = false;
        }
        dismiss.set_anchor(id, anchor);
        recompute(&*host, id, entry, notifications);
    }

    /// Open an overlay.
    ///
    /// Cancels pending hover intent. Ignored for inert overlays.
    pub fn open(&mut self, id: OverlayId, now: Duration) -> Transition {
        let Some(entry) = slot_mut(&mut self.entries, id) else {
            return Transition::None;
        };
        if entry.inert {
            log::debug!("overlay {id:?} is inert; open ignored");
            return Transition::None;
        }
        entry.intent.cancel();
        let t = entry.machine.open(now);
        self.apply(id, t);
        t
    }

    /// Close an overlay, recording `reason`.
    pub fn close(&mut self, id: OverlayId, reason: DismissReason, now: Duration) -> Transition {
        let Some(entry) = slot_mut(&mut self.entries, id) else {
            return Transition::None;
        };
        entry.intent.cancel();
        let t = entry.machine.close(reason, now);
        self.apply(id, t);
        t
    }

    /// Open if closed, else close with [`DismissReason::Programmatic`].
    pub fn toggle(&mut self, id: OverlayId, now: Duration) -> Transition {
        match self.status(id) {
            Status::Closed => self.open(id, now),
            _ => self.close(id, DismissReason::Programmatic, now),
        }
    }

    /// Apply the owner's status to a controlled overlay.
    ///
    /// # Panics
    ///
    /// In debug builds, if the overlay is uncontrolled.
    pub fn sync(&mut self, id: OverlayId, status: Status, now: Duration) -> Transition {
        let Some(entry) = slot_mut(&mut self.entries, id) else {
            return Transition::None;
        };
        if entry.inert {
            return Transition::None;
        }
        let t = entry.machine.sync(status, now);
        self.apply(id, t);
        t
    }

    /// A pointer was pressed on `target` (`None` when it hit no element).
    ///
    /// Returns the overlay dismissed by this event, if any.
    pub fn pointer_down(
        &mut self,
        target: Option<H::Element>,
        now: Duration,
    ) -> Option<(OverlayId, DismissReason)> {
        let hit = self.dismiss.pointer_down(&self.host, target)?;
        self.dismiss_with(hit, now);
        Some(hit)
    }

    /// A key was pressed. Returns the overlay dismissed by this event, if any.
    pub fn key_down(&mut self, key: Key, now: Duration) -> Option<(OverlayId, DismissReason)> {
        let hit = self.dismiss.key_down(key)?;
        self.dismiss_with(hit, now);
        Some(hit)
    }

    /// The pointer moved over `target`. Drives hover-triggered overlays.
    pub fn pointer_move(&mut self, target: Option<H::Element>, now: Duration) {
        let Self { host, entries, .. } = self;
        for entry in entries.iter_mut().flatten() {
            if entry.config.trigger != Trigger::Hover || entry.inert {
                continue;
            }
            let region = target.and_then(|t| {
                if entry.session.is_some_and(|s| host.contains(s.panel(), t)) {
                    Some(HoverRegion::Panel)
                } else if entry.anchor.is_some_and(|a| host.contains(a, t)) {
                    Some(HoverRegion::Anchor)
                } else {
                    None
                }
            });
            if entry.hover.update(region).is_empty() {
                continue;
            }
            let active = entry.machine.status().is_active();
            if region.is_some() {
                if active {
                    entry.intent.cancel_close();
                } else {
                    entry.intent.schedule_open(now, entry.config.open_delay);
                }
            } else {
                entry.intent.cancel_open();
                if active {
                    entry
                        .intent
                        .schedule_close(now, entry.config.close_delay, DismissReason::PointerLeave);
                }
            }
        }
        self.tick(now);
    }

    /// The anchor of `id` gained keyboard focus.
    pub fn focus_in(&mut self, id: OverlayId, now: Duration) {
        let Some(entry) = slot_mut(&mut self.entries, id) else {
            return;
        };
        if entry.machine.status().is_active() {
            entry.intent.cancel_close();
        } else {
            entry.intent.schedule_open(now, entry.config.focus_delay);
        }
        self.tick(now);
    }

    /// Focus left the anchor and panel of `id`.
    pub fn focus_out(&mut self, id: OverlayId, now: Duration) {
        let Some(entry) = slot_mut(&mut self.entries, id) else {
            return;
        };
        entry.intent.cancel_open();
        if entry.machine.status().is_active() {
            entry
                .intent
                .schedule_close(now, entry.config.close_delay, DismissReason::Blur);
        }
        self.tick(now);
    }

    /// A scroll happened somewhere in the document.
    pub fn scroll(&mut self) {
        self.recompute_where(|e| e.reposition.is_active());
    }

    /// The viewport was resized.
    pub fn resize(&mut self) {
        self.recompute_where(|e| e.reposition.is_active());
    }

    /// Start of an animation frame: retry placements that saw zero sizes.
    pub fn animation_frame(&mut self) {
        self.recompute_where(|e| e.reposition.take_retry());
    }

    /// Fire due intent timers and finish due transitions.
    pub fn tick(&mut self, now: Duration) {
        for id in self.ids() {
            let Some(entry) = slot_mut(&mut self.entries, id) else {
                continue;
            };
            let t = match entry.intent.poll(now) {
                Some(IntentAction::Open) if !entry.inert => entry.machine.open(now),
                Some(IntentAction::Close(reason)) => entry.machine.close(reason, now),
                _ => Transition::None,
            };
            self.apply(id, t);

            let Some(entry) = slot_mut(&mut self.entries, id) else {
                continue;
            };
            let t = entry.machine.poll(now);
            self.apply(id, t);
        }
    }

    /// Earliest time [`OverlayManager::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries
            .iter()
            .flatten()
            .flat_map(|e| [e.machine.deadline(), e.intent.deadline()])
            .flatten()
            .min()
    }

    /// Current status; `Closed` for stale ids.
    pub fn status(&self, id: OverlayId) -> Status {
        self.entry(id).map_or(Status::Closed, |e| e.machine.status())
    }

    /// Position of an active overlay.
    pub fn position(&self, id: OverlayId) -> Option<Positioned> {
        self.session(id)?.position()
    }

    /// The session of a mounted overlay.
    pub fn session(&self, id: OverlayId) -> Option<&Session<H::Element>> {
        self.entry(id)?.session.as_ref()
    }

    /// The container to render a mounted panel into.
    pub fn panel(&self, id: OverlayId) -> Option<H::Element> {
        self.session(id).map(Session::panel)
    }

    /// True if the overlay could not be mounted and stays closed.
    pub fn is_inert(&self, id: OverlayId) -> bool {
        self.entry(id).is_some_and(|e| e.inert)
    }

    /// Drain pending notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        core::mem::take(&mut self.notifications)
    }

    /// Route a key to a list shown in overlay `id`.
    ///
    /// `Enter` on an enabled item calls `on_select` and closes with
    /// [`DismissReason::Selection`]. `Escape` dismisses through the shared
    /// dismissal path.
    pub fn list_key<K, F>(
        &mut self,
        id: OverlayId,
        listbox: &mut Listbox<K>,
        key: Key,
        now: Duration,
        on_select: F,
    ) -> ListOutcome<K>
    where
        K: Clone + PartialEq,
        F: FnOnce(&ListItem<K>),
    {
        let outcome = listbox.handle_key(key);
        match outcome {
            ListOutcome::Select(_) => {
                if let Some(item) = listbox.highlighted_item() {
                    on_select(item);
                }
                self.close(id, DismissReason::Selection, now);
            }
            ListOutcome::Dismiss => {
                if let Some(hit) = self.dismiss.dismiss(id, DismissReason::Escape) {
                    self.dismiss_with(hit, now);
                }
            }
            ListOutcome::Handled | ListOutcome::Unhandled => {}
        }
        outcome
    }

    fn dismiss_with(&mut self, (id, reason): (OverlayId, DismissReason), now: Duration) {
        log::debug!("overlay {id:?} dismissed: {reason:?}");
        self.close(id, reason, now);
    }

    fn ids(&self) -> Vec<OverlayId> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "OverlayId uses 32-bit indices by design."
                )]
                e.as_ref().map(|e| OverlayId::new(i as u32, e.generation))
            })
            .collect()
    }

    fn entry(&self, id: OverlayId) -> Option<&Entry<H::Element>> {
        self.entries
            .get(id.idx())?
            .as_ref()
            .filter(|e| e.generation == id.generation())
    }

    fn slot_take(&mut self, id: OverlayId) -> Option<Entry<H::Element>> {
        slot_mut(&mut self.entries, id)?;
        self.entries[id.idx()].take()
    }

    fn recompute_where(&mut self, mut pred: impl FnMut(&mut Entry<H::Element>) -> bool) {
        let Self {
            host,
            entries,
            notifications,
            ..
        } = self;
        for (i, slot) in entries.iter_mut().enumerate() {
            let Some(entry) = slot else {
                continue;
            };
            if pred(entry) {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "OverlayId uses 32-bit indices by design."
                )]
                let id = OverlayId::new(i as u32, entry.generation);
                recompute(&*host, id, entry, notifications);
            }
        }
    }

    fn apply(&mut self, id: OverlayId, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Requested { status, reason } => {
                log::debug!("overlay {id:?} requests {status:?} ({reason:?})");
                self.notifications.push(Notification::StatusChangeRequested {
                    overlay: id,
                    requested: status,
                    reason,
                });
            }
            Transition::Changed { from, to } => self.enter_status(id, from, to),
        }
    }

    fn enter_status(&mut self, id: OverlayId, from: Status, to: Status) {
        let Self {
            host,
            entries,
            portal,
            dismiss,
            notifications,
            ..
        } = self;
        let Some(entry) = slot_mut(entries, id) else {
            return;
        };

        if from == Status::Open {
            entry.reposition.stop(host);
        }
        if from.is_active() && !to.is_active() {
            dismiss.remove(host, id);
        }
        if from == Status::Closed {
            match portal.mount(host) {
                Ok(handle) => entry.session = Some(Session::new(id, to, handle)),
                Err(err) => {
                    log::warn!("overlay {id:?} cannot be shown and stays closed: {err}");
                    entry.inert = true;
                    entry.machine.force_closed();
                    entry.intent.cancel();
                    return;
                }
            }
        }

        log::debug!("overlay {id:?}: {from:?} -> {to:?}");
        notifications.push(Notification::StatusChanged { overlay: id, from, to });
        if let Some(session) = entry.session.as_mut() {
            session.status = to;
        }

        if from.is_active() && !to.is_active() {
            let reason = entry.machine.reason().unwrap_or(DismissReason::Programmatic);
            if let Some(session) = entry.session.as_mut() {
                session.dismissed = Some(reason);
            }
            notifications.push(Notification::Dismissed { overlay: id, reason });
        }
        if to.is_active() && !from.is_active()
            && let Some(session) = entry.session.as_mut()
        {
            session.dismissed = None;
            let options = LayerOptions {
                outside_click: entry.config.dismiss_on_outside_click,
                escape: entry.config.dismiss_on_escape,
            };
            dismiss.push(host, id, entry.anchor, session.panel(), options);
        }
        if to == Status::Open {
            entry.reposition.start(host);
        }
        if to.is_active() {
            recompute(&*host, id, entry, notifications);
        }
        if to == Status::Closed {
            entry.intent.cancel();
            if let Some(session) = entry.session.take() {
                portal.unmount(host, session.mount());
            }
        }
    }
}

fn slot_mut<E>(entries: &mut [Option<Entry<E>>], id: OverlayId) -> Option<&mut Entry<E>> {
    entries
        .get_mut(id.idx())?
        .as_mut()
        .filter(|e| e.generation == id.generation())
}

fn recompute<H: Host>(
    host: &H,
    id: OverlayId,
    entry: &mut Entry<H::Element>,
    notifications: &mut Vec<Notification>,
) {
    let Some(session) = entry.session.as_mut() else {
        return;
    };
    if !session.status.is_active() {
        return;
    }
    let viewport = host.viewport();
    let panel = host
        .bounding_rect(session.panel())
        .map_or(Size::ZERO, |r| r.size());
    let position = match entry.anchor.and_then(|a| host.bounding_rect(a)) {
        Some(anchor) => compute_position_with(
            anchor,
            panel,
            entry.config.placement,
            viewport,
            entry.config.collision,
        ),
        None => {
            if !entry.warned_no_anchor {
                log::warn!(
                    "overlay {id:?} has no measurable anchor; placing it at the viewport origin"
                );
                entry.warned_no_anchor = true;
            }
            Positioned {
                left: viewport.x0,
                top: viewport.y0,
                side: entry.config.placement.side,
                settled: true,
            }
        }
    };
    if !position.settled {
        log::trace!("overlay {id:?} measured zero size; retrying next frame");
        entry.reposition.request_retry();
    }
    if session.position != Some(position) {
        log::trace!("overlay {id:?} positioned at ({}, {})", position.left, position.top);
        session.position = Some(position);
        notifications.push(Notification::Positioned {
            overlay: id,
            position,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::headless::HeadlessHost;
    use crate::config::Timing;
    use crate::host::NoDocument;
    use crate::listbox::NavPolicy;
    use crate::types::{ListenerKind, ListenerPhase};
    use alloc::vec;
    use core::cell::Cell;
    use kurbo::{Rect, Vec2};
    use understory_headless::{Document, ElementId, LocalElement};
    use understory_placement::Side;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    struct Fixture {
        m: OverlayManager<HeadlessHost>,
        body: ElementId,
        button: ElementId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let body = doc.body().unwrap();
        let button = doc.insert(
            Some(body),
            LocalElement::with_bounds(Rect::new(100.0, 100.0, 180.0, 130.0)),
        );
        Fixture {
            m: OverlayManager::new(HeadlessHost::new(doc)),
            body,
            button,
        }
    }

    fn lay_out(m: &mut OverlayManager<HeadlessHost>, id: OverlayId, size: Size) -> ElementId {
        let panel = m.panel(id).unwrap();
        m.host_mut()
            .document_mut()
            .set_bounds(panel, Rect::from_origin_size((0.0, 0.0), size));
        m.animation_frame();
        panel
    }

    fn statuses(n: &[Notification]) -> Vec<(Status, Status)> {
        n.iter()
            .filter_map(|n| match *n {
                Notification::StatusChanged { from, to, .. } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn opening_mounts_once_and_places_below_anchor() {
        let mut f = fixture();
        let id = f.m.insert(OverlayConfig::popover(), Some(f.button));
        f.m.open(id, ms(0));
        f.m.open(id, ms(1));
        assert_eq!(f.m.portal().mounted_count(), 1);
        assert_eq!(f.m.dismissal().layer_count(), 1);
        assert_eq!(statuses(&f.m.take_notifications()), [(Status::Closed, Status::Open)]);

        // Unmeasured panel: anchor top-left, unsettled, retried next frame.
        let first = f.m.position(id).unwrap();
        assert!(!first.settled);
        assert_eq!((first.left, first.top), (100.0, 100.0));

        lay_out(&mut f.m, id, Size::new(120.0, 60.0));
        let pos = f.m.position(id).unwrap();
        assert!(pos.settled);
        assert_eq!((pos.left, pos.top, pos.side), (80.0, 134.0, Side::Bottom));
        assert!(matches!(
            f.m.take_notifications()[..],
            [Notification::Positioned { .. }]
        ));

        // Nothing is queued once settled.
        f.m.animation_frame();
        assert!(f.m.take_notifications().is_empty());
    }

    #[test]
    fn flips_near_viewport_bottom() {
        let mut f = fixture();
        f.m.host_mut()
            .document_mut()
            .set_bounds(f.button, Rect::new(10.0, 570.0, 90.0, 590.0));
        let id = f.m.insert(OverlayConfig::dropdown_menu(), Some(f.button));
        f.m.open(id, ms(0));
        lay_out(&mut f.m, id, Size::new(100.0, 100.0));
        let pos = f.m.position(id).unwrap();
        assert_eq!(pos.side, Side::Top);
        assert_eq!(pos.top, 466.0);
        assert_eq!(pos.left, 10.0);
    }

    #[test]
    fn close_releases_everything() {
        let mut f = fixture();
        let id = f.m.insert(OverlayConfig::popover(), Some(f.button));
        f.m.open(id, ms(0));
        assert_eq!(f.m.host().listener_count(), 4);
        assert_eq!(f.m.host().listener_count_of(ListenerKind::Scroll), 1);
        assert_eq!(
            f.m.host().listener_phase(ListenerKind::PointerDown),
            Some(ListenerPhase::Capture)
        );
        assert_eq!(
            f.m.host().listener_phase(ListenerKind::Scroll),
            Some(ListenerPhase::Capture)
        );

        f.m.close(id, DismissReason::Programmatic, ms(5));
        assert_eq!(f.m.status(id), Status::Closed);
        assert_eq!(f.m.host().listener_count(), 0);
        assert_eq!(f.m.portal().mounted_count(), 0);
        assert!(f.m.session(id).is_none());
        assert_eq!(f.m.next_deadline(), None);
    }

    #[test]
    fn remove_releases_everything_mid_transition() {
        let mut f = fixture();
        let config = OverlayConfig::hover_card().with_timing(Timing::symmetric(ms(150)));
        let id = f.m.insert(config, Some(f.button));
        f.m.open(id, ms(0));
        assert_eq!(f.m.status(id), Status::Opening);
        f.m.pointer_move(Some(f.body), ms(10));
        assert!(f.m.next_deadline().is_some());

        f.m.remove(id);
        f.m.remove(id);
        assert!(!f.m.contains(id));
        assert_eq!(f.m.host().listener_count(), 0);
        assert_eq!(f.m.portal().mounted_count(), 0);
        assert_eq!(f.m.next_deadline(), None);

        // A new overlay in the same slot does not answer to the old id.
        let again = f.m.insert(OverlayConfig::popover(), Some(f.button));
        assert_ne!(again, id);
        f.m.open(id, ms(20));
        assert_eq!(f.m.status(again), Status::Closed);
    }

    #[test]
    fn animated_close_keeps_panel_until_exit_finishes() {
        let mut f = fixture();
        let config = OverlayConfig::popover().with_timing(Timing::symmetric(ms(100)));
        let id = f.m.insert(config, Some(f.button));
        f.m.open(id, ms(0));
        assert_eq!(f.m.status(id), Status::Opening);
        assert!(f.m.position(id).is_some());
        // Scroll listeners attach only once open.
        assert_eq!(f.m.host().listener_count_of(ListenerKind::Scroll), 0);
        f.m.tick(ms(100));
        assert_eq!(f.m.status(id), Status::Open);
        assert_eq!(f.m.host().listener_count_of(ListenerKind::Scroll), 1);

        f.m.key_down(Key::Escape, ms(200));
        assert_eq!(f.m.status(id), Status::Closing);
        assert!(f.m.panel(id).is_some());
        assert_eq!(f.m.position(id), None);
        assert_eq!(f.m.session(id).unwrap().dismissed(), Some(DismissReason::Escape));
        assert_eq!(f.m.host().listener_count(), 0);

        assert_eq!(f.m.next_deadline(), Some(ms(300)));
        f.m.tick(ms(300));
        assert_eq!(f.m.status(id), Status::Closed);
        assert_eq!(f.m.portal().mounted_count(), 0);
    }

    #[test]
    fn nested_overlays_dismiss_innermost_first() {
        let mut f = fixture();
        let menu = f.m.insert(OverlayConfig::dropdown_menu(), Some(f.button));

        // The click on the trigger opens the menu.
        assert_eq!(f.m.pointer_down(Some(f.button), ms(0)), None);
        f.m.open(menu, ms(0));
        let panel = lay_out(&mut f.m, menu, Size::new(150.0, 100.0));
        let item = f.m.host_mut().document_mut().insert(
            Some(panel),
            LocalElement::with_bounds(Rect::new(100.0, 134.0, 250.0, 154.0)),
        );

        // A click on an item inside the menu opens a submenu anchored on it.
        let submenu = f.m.insert(
            OverlayConfig::dropdown_menu().with_placement("right-start".parse().unwrap()),
            Some(item),
        );
        assert_eq!(f.m.pointer_down(Some(item), ms(10)), None);
        f.m.open(submenu, ms(10));
        assert_eq!(f.m.status(submenu), Status::Open);
        assert_eq!(f.m.status(menu), Status::Open);

        // First outside click closes only the submenu.
        assert_eq!(
            f.m.pointer_down(Some(f.body), ms(20)),
            Some((submenu, DismissReason::OutsideClick))
        );
        assert_eq!(f.m.status(submenu), Status::Closed);
        assert_eq!(f.m.status(menu), Status::Open);

        // Second closes the menu.
        assert_eq!(
            f.m.pointer_down(Some(f.body), ms(30)),
            Some((menu, DismissReason::OutsideClick))
        );
        assert_eq!(f.m.status(menu), Status::Closed);
        assert_eq!(f.m.host().listener_count(), 0);
    }

    #[test]
    fn hover_card_debounces_open_and_close() {
        let mut f = fixture();
        let id = f.m.insert(OverlayConfig::hover_card(), Some(f.button));

        // A brief pass over the trigger never opens.
        f.m.pointer_move(Some(f.button), ms(0));
        f.m.pointer_move(Some(f.body), ms(200));
        f.m.tick(ms(1000));
        assert_eq!(f.m.status(id), Status::Closed);

        f.m.pointer_move(Some(f.button), ms(1000));
        assert_eq!(f.m.next_deadline(), Some(ms(1700)));
        f.m.tick(ms(1699));
        assert_eq!(f.m.status(id), Status::Closed);
        f.m.tick(ms(1700));
        assert_eq!(f.m.status(id), Status::Open);

        // Crossing the gap to the card does not close it.
        let panel = f.m.panel(id).unwrap();
        f.m.pointer_move(Some(f.body), ms(1800));
        f.m.pointer_move(Some(panel), ms(1900));
        f.m.tick(ms(3000));
        assert_eq!(f.m.status(id), Status::Open);

        // Leaving for good closes after the close delay.
        f.m.take_notifications();
        f.m.pointer_move(None, ms(3000));
        f.m.tick(ms(3299));
        assert_eq!(f.m.status(id), Status::Open);
        f.m.tick(ms(3300));
        assert_eq!(f.m.status(id), Status::Closed);
        assert!(f.m.take_notifications().contains(&Notification::Dismissed {
            overlay: id,
            reason: DismissReason::PointerLeave,
        }));
    }

    #[test]
    fn focus_opens_and_blur_closes() {
        let mut f = fixture();
        let id = f.m.insert(OverlayConfig::tooltip(), Some(f.button));
        f.m.focus_in(id, ms(0));
        assert_eq!(f.m.status(id), Status::Open);
        f.m.focus_out(id, ms(50));
        assert_eq!(f.m.status(id), Status::Closed);
        assert_eq!(
            f.m.take_notifications().last(),
            Some(&Notification::Dismissed {
                overlay: id,
                reason: DismissReason::Blur,
            })
        );
    }

    #[test]
    fn click_trigger_ignores_hover() {
        let mut f = fixture();
        let id = f.m.insert(OverlayConfig::popover(), Some(f.button));
        f.m.pointer_move(Some(f.button), ms(0));
        f.m.tick(ms(5000));
        assert_eq!(f.m.status(id), Status::Closed);
        f.m.toggle(id, ms(5000));
        assert_eq!(f.m.status(id), Status::Open);
        f.m.toggle(id, ms(5001));
        assert_eq!(f.m.status(id), Status::Closed);
    }

    #[test]
    fn scroll_repositions_open_overlays() {
        let mut f = fixture();
        let doc = f.m.host_mut().document_mut();
        let scroller = doc.insert(
            Some(f.body),
            LocalElement::with_bounds(Rect::new(0.0, 0.0, 800.0, 600.0)),
        );
        doc.reparent(f.button, Some(scroller));
        let id = f.m.insert(OverlayConfig::popover(), Some(f.button));
        f.m.open(id, ms(0));
        lay_out(&mut f.m, id, Size::new(120.0, 60.0));
        f.m.take_notifications();

        f.m.host_mut()
            .document_mut()
            .scroll_by(scroller, Vec2::new(0.0, 50.0));
        f.m.scroll();
        assert_eq!(f.m.position(id).unwrap().top, 84.0);
        assert_eq!(f.m.take_notifications().len(), 1);

        // Unchanged geometry produces no notification.
        f.m.resize();
        assert!(f.m.take_notifications().is_empty());
    }

    #[test]
    fn missing_anchor_uses_viewport_origin() {
        let mut f = fixture();
        let id = f.m.insert(OverlayConfig::popover(), None);
        f.m.open(id, ms(0));
        let pos = f.m.position(id).unwrap();
        assert_eq!((pos.left, pos.top), (0.0, 0.0));
        assert!(pos.settled);

        f.m.set_anchor(id, Some(f.button));
        lay_out(&mut f.m, id, Size::new(120.0, 60.0));
        assert_eq!(f.m.position(id).unwrap().top, 134.0);
    }

    #[test]
    fn no_document_leaves_overlays_inert() {
        let doc = Document::detached(Rect::new(0.0, 0.0, 800.0, 600.0));
        let mut m = OverlayManager::new(HeadlessHost::new(doc));
        let id = m.insert(OverlayConfig::popover(), None);
        m.open(id, ms(0));
        assert_eq!(m.status(id), Status::Closed);
        assert!(m.is_inert(id));
        assert!(m.take_notifications().is_empty());
        assert_eq!(m.host().listener_count(), 0);

        m.open(id, ms(10));
        assert_eq!(m.status(id), Status::Closed);

        let mut bare = OverlayManager::new(NoDocument);
        let id = bare.insert(OverlayConfig::tooltip(), None);
        bare.focus_in(id, ms(0));
        assert_eq!(bare.status(id), Status::Closed);
        assert!(bare.is_inert(id));
    }

    #[test]
    fn controlled_overlay_requests_and_syncs() {
        let mut f = fixture();
        let id = f
            .m
            .insert_controlled(OverlayConfig::popover(), Some(f.button), Status::Closed, ms(0));
        f.m.open(id, ms(0));
        assert_eq!(f.m.status(id), Status::Closed);
        assert_eq!(
            f.m.take_notifications(),
            vec![Notification::StatusChangeRequested {
                overlay: id,
                requested: Status::Open,
                reason: None,
            }]
        );

        f.m.sync(id, Status::Open, ms(5));
        assert_eq!(f.m.status(id), Status::Open);
        f.m.take_notifications();

        assert!(f.m.pointer_down(Some(f.body), ms(10)).is_some());
        assert_eq!(f.m.status(id), Status::Open);
        assert_eq!(
            f.m.take_notifications(),
            vec![Notification::StatusChangeRequested {
                overlay: id,
                requested: Status::Closed,
                reason: Some(DismissReason::OutsideClick),
            }]
        );

        f.m.sync(id, Status::Closed, ms(20));
        assert_eq!(f.m.status(id), Status::Closed);
        assert!(f.m.take_notifications().contains(&Notification::Dismissed {
            overlay: id,
            reason: DismissReason::OutsideClick,
        }));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "sync() called on an uncontrolled overlay")]
    fn sync_on_uncontrolled_overlay_panics_in_debug() {
        let mut f = fixture();
        let id = f.m.insert(OverlayConfig::popover(), Some(f.button));
        f.m.sync(id, Status::Open, ms(0));
    }

    #[test]
    fn list_selection_closes_with_selection() {
        let mut f = fixture();
        let id = f.m.insert(OverlayConfig::select(), Some(f.button));
        let mut list = Listbox::new(
            vec![ListItem::new("a", "Alpha"), ListItem::new("b", "Beta")],
            NavPolicy::default(),
        );
        f.m.open(id, ms(0));
        f.m.list_key(id, &mut list, Key::ArrowDown, ms(1), |_| {});
        f.m.list_key(id, &mut list, Key::ArrowDown, ms(2), |_| {});
        let chosen = Cell::new(None);
        let outcome = f.m.list_key(id, &mut list, Key::Enter, ms(3), |item| {
            chosen.set(Some(item.id));
        });
        assert_eq!(outcome, ListOutcome::Select("b"));
        assert_eq!(chosen.get(), Some("b"));
        assert_eq!(f.m.status(id), Status::Closed);
        assert_eq!(
            f.m.take_notifications().last(),
            Some(&Notification::Dismissed {
                overlay: id,
                reason: DismissReason::Selection,
            })
        );

        f.m.open(id, ms(10));
        assert_eq!(
            f.m.list_key(id, &mut list, Key::Escape, ms(11), |_| {}),
            ListOutcome::Dismiss
        );
        assert_eq!(f.m.status(id), Status::Closed);
    }

    #[test]
    fn list_escape_respects_disabled_escape() {
        let mut f = fixture();
        let id = f.m.insert(
            OverlayConfig::select().with_dismissal(true, false),
            Some(f.button),
        );
        let mut list = Listbox::new(vec![ListItem::new(1, "One")], NavPolicy::default());
        f.m.open(id, ms(0));
        assert_eq!(
            f.m.list_key(id, &mut list, Key::Escape, ms(1), |_| {}),
            ListOutcome::Dismiss
        );
        assert_eq!(f.m.status(id), Status::Open);
    }
}
