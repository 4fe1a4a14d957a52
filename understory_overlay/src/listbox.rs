// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation for listbox-style panels: menus, selects, command palettes.
//!
//! ## Model
//!
//! A [`Listbox`] holds items, a search string, and the filtered view: the
//! ordered subsequence of items whose label or any keyword contains the
//! search string, compared case-insensitively. The highlight is an index into
//! that filtered view and is always in range.
//!
//! ## Keys
//!
//! - `ArrowDown`/`ArrowUp` move the highlight, clamping at the ends unless
//!   [`NavPolicy::wrap`] is set.
//! - `Home`/`End` jump to the ends.
//! - `Enter` selects the highlighted item, unless it is disabled.
//! - `Escape` asks the owner to dismiss the overlay.
//! - Printable characters and `Backspace` edit the search string, which
//!   resets the highlight to the first match. Clearing it restores the full
//!   list with the first item highlighted.
//!
//! Disabled items are either highlightable but not selectable
//! ([`DisabledPolicy::Focusable`]) or skipped by navigation entirely
//! ([`DisabledPolicy::Skip`]).
//!
//! ```
//! use understory_overlay::listbox::{ListItem, ListOutcome, Listbox, NavPolicy};
//! use understory_overlay::Key;
//!
//! let mut list = Listbox::new(
//!     vec![
//!         ListItem::new(1, "Copy"),
//!         ListItem::new(2, "Paste"),
//!         ListItem::new(3, "Paste special").with_keywords(["clipboard"]),
//!     ],
//!     NavPolicy::default(),
//! );
//! list.set_search("PASTE");
//! assert_eq!(list.filtered_len(), 2);
//! assert_eq!(list.highlighted(), Some(0));
//! list.handle_key(Key::ArrowDown);
//! assert_eq!(list.handle_key(Key::Enter), ListOutcome::Select(3));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::Key;

/// One entry in a [`Listbox`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem<K> {
    /// Caller's identifier, returned on selection.
    pub id: K,
    /// Visible text, matched by search.
    pub label: String,
    /// Extra search terms.
    pub keywords: Vec<String>,
    /// Disabled items are never selected.
    pub disabled: bool,
}

impl<K> ListItem<K> {
    /// An enabled item with no keywords.
    pub fn new(id: K, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            keywords: Vec::new(),
            disabled: false,
        }
    }

    /// Add search keywords.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Mark the item disabled or enabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.label.to_lowercase().contains(needle)
            || self.keywords.iter().any(|k| k.to_lowercase().contains(needle))
    }
}

/// How navigation treats disabled items.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum DisabledPolicy {
    /// Disabled items can be highlighted but `Enter` does not select them.
    #[default]
    Focusable,
    /// Navigation and search never highlight disabled items.
    Skip,
}

/// Navigation behavior.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct NavPolicy {
    /// Disabled item handling.
    pub disabled: DisabledPolicy,
    /// `ArrowUp` from the first item clears the highlight.
    pub allow_none: bool,
    /// Moving past either end wraps to the other.
    pub wrap: bool,
}

/// Result of [`Listbox::handle_key`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListOutcome<K> {
    /// The key changed the highlight or search, or was consumed without effect.
    Handled,
    /// The highlighted item was chosen.
    Select(K),
    /// Escape: the owner should dismiss the overlay.
    Dismiss,
    /// The key means nothing to the list.
    Unhandled,
}

/// Filterable, keyboard-navigable list state.
#[derive(Clone, Debug)]
pub struct Listbox<K> {
    items: Vec<ListItem<K>>,
    policy: NavPolicy,
    search: String,
    filtered: Vec<usize>,
    highlighted: Option<usize>,
    row_height: f64,
    viewport_height: f64,
    scroll_top: f64,
}

impl<K: Clone + PartialEq> Listbox<K> {
    /// Create a list with an empty search and nothing highlighted.
    pub fn new(items: Vec<ListItem<K>>, policy: NavPolicy) -> Self {
        let mut list = Self {
            items,
            policy,
            search: String::new(),
            filtered: Vec::new(),
            highlighted: None,
            row_height: 0.0,
            viewport_height: 0.0,
            scroll_top: 0.0,
        };
        list.refilter();
        list
    }

    /// All items, unfiltered.
    pub fn items(&self) -> &[ListItem<K>] {
        &self.items
    }

    /// Navigation policy.
    pub fn policy(&self) -> NavPolicy {
        self.policy
    }

    /// Current search string.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Items matching the search, in order.
    pub fn filtered(&self) -> impl Iterator<Item = &ListItem<K>> + '_ {
        self.filtered.iter().map(|&i| &self.items[i])
    }

    /// Number of matching items.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Matching item at a filtered position.
    pub fn filtered_item(&self, pos: usize) -> Option<&ListItem<K>> {
        self.filtered.get(pos).map(|&i| &self.items[i])
    }

    /// Highlighted position in the filtered view.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The highlighted item.
    pub fn highlighted_item(&self) -> Option<&ListItem<K>> {
        self.filtered_item(self.highlighted?)
    }

    /// Scroll offset that keeps the highlight visible.
    ///
    /// Stays zero until [`Listbox::set_scroll_metrics`] is called.
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Row height and visible height of the scrolling list, for scroll-into-view.
    pub fn set_scroll_metrics(&mut self, row_height: f64, viewport_height: f64) {
        self.row_height = row_height;
        self.viewport_height = viewport_height;
        self.scroll_into_view();
    }

    /// Replace the search string, re-filter, and highlight the first match.
    pub fn set_search(&mut self, search: &str) {
        self.search.clear();
        self.search.push_str(search);
        self.refilter();
        self.set_highlight(self.first());
    }

    /// Replace the items, keeping the highlight on the same id if it still matches.
    ///
    /// Otherwise the first match is highlighted.
    pub fn set_items(&mut self, items: Vec<ListItem<K>>) {
        let keep = self.highlighted_item().map(|item| item.id.clone());
        self.items = items;
        self.refilter();
        let kept = keep
            .and_then(|id| self.filtered().position(|item| item.id == id))
            .filter(|&pos| self.can_highlight(pos));
        self.set_highlight(kept.or_else(|| self.first()));
    }

    /// Highlight a filtered position directly, as pointer hover does.
    ///
    /// Returns false if the position is out of range or skipped by policy.
    pub fn highlight(&mut self, pos: Option<usize>) -> bool {
        match pos {
            Some(p) if !self.can_highlight(p) => false,
            Some(_) => {
                self.set_highlight(pos);
                true
            }
            None if self.policy.allow_none => {
                self.set_highlight(None);
                true
            }
            None => false,
        }
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: Key) -> ListOutcome<K> {
        match key {
            Key::ArrowDown => {
                let next = match self.highlighted {
                    None => self.first(),
                    Some(i) => self.after(i).or_else(|| {
                        if self.policy.wrap {
                            self.first()
                        } else {
                            Some(i)
                        }
                    }),
                };
                self.set_highlight(next);
                ListOutcome::Handled
            }
            Key::ArrowUp => {
                let next = match self.highlighted {
                    None => self.first(),
                    Some(i) => match self.before(i) {
                        Some(p) => Some(p),
                        None if self.policy.allow_none => None,
                        None if self.policy.wrap => self.last(),
                        None => Some(i),
                    },
                };
                self.set_highlight(next);
                ListOutcome::Handled
            }
            Key::Home => {
                self.set_highlight(self.first());
                ListOutcome::Handled
            }
            Key::End => {
                self.set_highlight(self.last());
                ListOutcome::Handled
            }
            Key::Enter => match self.highlighted_item() {
                Some(item) if item.disabled => ListOutcome::Handled,
                Some(item) => ListOutcome::Select(item.id.clone()),
                None => ListOutcome::Unhandled,
            },
            Key::Escape => ListOutcome::Dismiss,
            Key::Character(c) if !c.is_control() => {
                self.search.push(c);
                self.refilter();
                self.set_highlight(self.first());
                ListOutcome::Handled
            }
            Key::Backspace if !self.search.is_empty() => {
                self.search.pop();
                self.refilter();
                self.set_highlight(self.first());
                ListOutcome::Handled
            }
            _ => ListOutcome::Unhandled,
        }
    }

    fn refilter(&mut self) {
        let needle = self.search.to_lowercase();
        self.filtered.clear();
        self.filtered.extend(
            self.items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.matches(&needle))
                .map(|(i, _)| i),
        );
        self.scroll_top = 0.0;
        self.highlighted = None;
    }

    fn can_highlight(&self, pos: usize) -> bool {
        match self.filtered_item(pos) {
            None => false,
            Some(item) => !(item.disabled && self.policy.disabled == DisabledPolicy::Skip),
        }
    }

    fn first(&self) -> Option<usize> {
        (0..self.filtered.len()).find(|&p| self.can_highlight(p))
    }

    fn last(&self) -> Option<usize> {
        (0..self.filtered.len()).rev().find(|&p| self.can_highlight(p))
    }

    fn after(&self, pos: usize) -> Option<usize> {
        (pos + 1..self.filtered.len()).find(|&p| self.can_highlight(p))
    }

    fn before(&self, pos: usize) -> Option<usize> {
        (0..pos).rev().find(|&p| self.can_highlight(p))
    }

    fn set_highlight(&mut self, pos: Option<usize>) {
        debug_assert!(
            pos.is_none_or(|p| p < self.filtered.len()),
            "highlight must index the filtered view"
        );
        self.highlighted = pos;
        self.scroll_into_view();
    }

    fn scroll_into_view(&mut self) {
        let Some(pos) = self.highlighted else {
            return;
        };
        if self.row_height <= 0.0 || self.viewport_height <= 0.0 {
            return;
        }
        #[allow(clippy::cast_precision_loss, reason = "row counts are far below 2^52")]
        let top = pos as f64 * self.row_height;
        let bottom = top + self.row_height;
        if top < self.scroll_top {
            self.scroll_top = top;
        } else if bottom > self.scroll_top + self.viewport_height {
            self.scroll_top = bottom - self.viewport_height;
        }
    }
}
