// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keep keyboard focus inside an open panel.
//!
//! A [`FocusTrap`] watches focus changes reported by the host. While it is
//! active and enforcing, focus that lands outside the trap root is pulled back
//! to the last element focused inside the root (or to the root itself). Tab and
//! Shift+Tab cycle through the root's focusable content instead of leaving it.
//!
//! ```rust
//! use almanac_focus::{Document, FocusHost};
//! use almanac_popper::focus_trap::FocusTrap;
//! use almanac_popper::{Role, TrapFocusProps};
//!
//! let mut doc = Document::new();
//! doc.insert(1_u32, None); // body
//! doc.insert(2, Some(1)); // trigger
//! doc.insert(3, Some(1)); // panel root
//! doc.insert(4, Some(3)); // button inside the panel
//!
//! let mut trap = FocusTrap::new(3);
//! trap.configure(true, Role::Dialog, &TrapFocusProps::default());
//!
//! doc.set_active(Some(4));
//! assert_eq!(trap.on_focus_in(Some(4), &mut doc), None);
//!
//! // Focus escapes to the trigger; the trap sends it back.
//! doc.set_active(Some(2));
//! assert_eq!(trap.on_focus_in(Some(2), &mut doc), Some(4));
//! assert_eq!(doc.active_element(), Some(4));
//! ```

use almanac_focus::{
    DefaultPolicy, FocusEntry, FocusHost, FocusPolicy, FocusSpace, Navigation, WrapMode, contains,
};
use tracing::trace;

use crate::props::{Role, TrapFocusProps};

/// Focus containment state for one trap root.
#[derive(Clone, Debug)]
pub struct FocusTrap<K> {
    root: K,
    active: bool,
    enforce: bool,
    auto_focus: bool,
    last_inside: Option<K>,
}

impl<K: Copy + Eq + core::fmt::Debug> FocusTrap<K> {
    /// Create an inactive trap around `root`.
    pub fn new(root: K) -> Self {
        Self {
            root,
            active: false,
            enforce: true,
            auto_focus: false,
            last_inside: None,
        }
    }

    /// Recompute the trap flags from the panel state and the overrides.
    ///
    /// `enabled` and `disable_enforce_focus` in `props` win over what `open` and
    /// `role` imply. Deactivating the trap forgets the last focused inner element.
    pub fn configure(&mut self, open: bool, role: Role, props: &TrapFocusProps) {
        let active = props.enabled.unwrap_or(open);
        if !active {
            self.last_inside = None;
        }
        self.active = active;
        self.enforce = !props
            .disable_enforce_focus
            .unwrap_or(!role.enforces_focus());
        self.auto_focus = !props.disable_auto_focus;
    }

    /// The trap root.
    pub fn root(&self) -> K {
        self.root
    }

    /// Whether the trap is currently watching focus.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether focus leaving the root is pulled back.
    pub fn enforces_focus(&self) -> bool {
        self.enforce
    }

    /// Whether the trap moves focus into the root on activation.
    pub fn auto_focuses(&self) -> bool {
        self.auto_focus
    }

    /// Run the activation side effect: focus the root unless auto focus is
    /// disabled or focus already lives inside it.
    pub fn activate<H: FocusHost<K> + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.active || !self.auto_focus {
            return false;
        }
        if host
            .active_element()
            .is_some_and(|a| contains(host, self.root, a))
        {
            return false;
        }
        host.focus(self.root)
    }

    /// React to focus moving to `target` (`None` when nothing is focused).
    ///
    /// Returns the element focus was moved back to, if the trap intervened.
    pub fn on_focus_in<H: FocusHost<K> + ?Sized>(
        &mut self,
        target: Option<K>,
        host: &mut H,
    ) -> Option<K> {
        if !self.active {
            return None;
        }
        if let Some(t) = target
            && contains(host, self.root, t)
        {
            self.last_inside = Some(t);
            return None;
        }
        if !self.enforce {
            return None;
        }

        let back = self
            .last_inside
            .filter(|&n| host.is_focusable(n) && contains(host, self.root, n))
            .unwrap_or(self.root);
        trace!(?target, ?back, "focus escaped trap, pulling it back");
        host.focus(back).then_some(back)
    }

    /// Next element for Tab (`backwards == false`) or Shift+Tab inside the root.
    ///
    /// `content` lists the root's focusable descendants; traversal wraps around
    /// so focus never leaves through the keyboard. Returns `None` when the trap
    /// is inactive or not enforcing, leaving Tab to the host.
    pub fn next_tab(&self, origin: K, backwards: bool, content: &[FocusEntry<K>]) -> Option<K> {
        if !self.active || !self.enforce {
            return None;
        }
        let direction = if backwards {
            Navigation::Prev
        } else {
            Navigation::Next
        };
        let policy = DefaultPolicy {
            wrap: WrapMode::Scope,
        };
        policy.next(origin, direction, &FocusSpace { nodes: content })
    }
}
