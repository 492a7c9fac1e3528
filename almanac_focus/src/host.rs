// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the widgets and the host's element tree.

use smallvec::SmallVec;

/// Read and move keyboard focus in the host's element tree.
///
/// Widgets never own elements; they refer to them by a small copyable id `K` and
/// ask the host about focus and ancestry through this trait. Implementations are
/// expected to report the post-change state: [`FocusHost::active_element`] called
/// from a deferred check must already reflect the element that received focus.
pub trait FocusHost<K: Copy + Eq> {
    /// The element that currently holds keyboard focus, if any.
    fn active_element(&self) -> Option<K>;

    /// Move focus to `node`.
    ///
    /// Returns `false` when the node cannot take focus (detached or not focusable).
    fn focus(&mut self, node: K) -> bool;

    /// Whether `node` is still attached to the tree and can take focus.
    fn is_focusable(&self, node: K) -> bool;

    /// Parent of `node`, or `None` for a root or a detached node.
    ///
    /// Ancestry must be acyclic.
    fn parent_of(&self, node: K) -> Option<K>;
}

/// Whether `node` is `root` or one of its descendants.
///
/// This is inclusive, like DOM `Node.contains`.
pub fn contains<K, H>(host: &H, root: K, node: K) -> bool
where
    K: Copy + Eq,
    H: FocusHost<K> + ?Sized,
{
    let mut cur = node;
    loop {
        if cur == root {
            return true;
        }
        match host.parent_of(cur) {
            Some(p) => cur = p,
            None => return false,
        }
    }
}

/// Root→node ancestry of `node`, inclusive.
pub fn ancestry<K, H>(host: &H, node: K) -> SmallVec<[K; 8]>
where
    K: Copy + Eq,
    H: FocusHost<K> + ?Sized,
{
    let mut out = SmallVec::new();
    let mut cur = node;
    // Collect to root; ancestry is acyclic.
    loop {
        out.push(cur);
        match host.parent_of(cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}
