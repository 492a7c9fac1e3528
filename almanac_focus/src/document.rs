// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small in-memory element tree implementing [`FocusHost`].
//!
//! [`Document`] is what the demos and the widget tests use as a stand-in for a
//! real toolkit: it tracks parent links, which nodes can take focus, the active
//! element, and every programmatic focus call so tests can assert on them.
//!
//! ```rust
//! use almanac_focus::{Document, FocusHost, contains};
//!
//! let mut doc = Document::new();
//! doc.insert(1_u32, None);
//! doc.insert(2, Some(1));
//! doc.insert(3, Some(2));
//!
//! assert!(contains(&doc, 1, 3));
//! assert!(doc.focus(3));
//! assert_eq!(doc.active_element(), Some(3));
//!
//! // Removing a subtree drops focus that lived inside it.
//! doc.remove(2);
//! assert_eq!(doc.active_element(), None);
//! assert!(!doc.is_focusable(3));
//! ```

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::FocusHost;

/// In-memory element tree with focus tracking.
#[derive(Clone, Debug)]
pub struct Document<K: Copy + Eq + Hash> {
    parents: HashMap<K, Option<K>>,
    inert: HashSet<K>,
    active: Option<K>,
    focus_calls: Vec<K>,
}

impl<K: Copy + Eq + Hash> Default for Document<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> Document<K> {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
            inert: HashSet::new(),
            active: None,
            focus_calls: Vec::new(),
        }
    }

    /// Attach `node` under `parent` (or as a root). Nodes are focusable by default.
    pub fn insert(&mut self, node: K, parent: Option<K>) {
        self.parents.insert(node, parent);
        self.inert.remove(&node);
    }

    /// Mark `node` as able (or unable) to take focus.
    pub fn set_focusable(&mut self, node: K, focusable: bool) {
        if focusable {
            self.inert.remove(&node);
        } else {
            self.inert.insert(node);
        }
    }

    /// Detach `node` and all of its descendants.
    ///
    /// If the active element was inside the removed subtree, nothing is focused
    /// afterwards.
    pub fn remove(&mut self, node: K) {
        let doomed: Vec<K> = self
            .parents
            .keys()
            .copied()
            .filter(|&k| crate::contains(self, node, k))
            .collect();
        for k in doomed {
            self.parents.remove(&k);
            self.inert.remove(&k);
            if self.active == Some(k) {
                self.active = None;
            }
        }
    }

    /// Whether `node` is part of the document.
    pub fn is_attached(&self, node: K) -> bool {
        self.parents.contains_key(&node)
    }

    /// Simulate the user moving focus (pointer click, Tab handled by the toolkit).
    ///
    /// Unlike [`FocusHost::focus`] this is not recorded in [`Document::focus_calls`].
    /// Passing `None` blurs everything.
    pub fn set_active(&mut self, node: Option<K>) {
        self.active = node.filter(|&n| self.is_focusable(n));
    }

    /// Every node focused programmatically through [`FocusHost::focus`], in order.
    pub fn focus_calls(&self) -> &[K] {
        &self.focus_calls
    }

    /// Forget the recorded programmatic focus calls.
    pub fn clear_focus_calls(&mut self) {
        self.focus_calls.clear();
    }
}

impl<K: Copy + Eq + Hash> FocusHost<K> for Document<K> {
    fn active_element(&self) -> Option<K> {
        self.active
    }

    fn focus(&mut self, node: K) -> bool {
        if !self.is_focusable(node) {
            return false;
        }
        self.active = Some(node);
        self.focus_calls.push(node);
        true
    }

    fn is_focusable(&self, node: K) -> bool {
        self.is_attached(node) && !self.inert.contains(&node)
    }

    fn parent_of(&self, node: K) -> Option<K> {
        self.parents.get(&node).copied().flatten()
    }
}
