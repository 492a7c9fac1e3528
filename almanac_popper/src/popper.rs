// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The picker popper controller.
//!
//! ## Lifecycle
//!
//! The parent owns the open state. It calls [`PickerPopper::set_open`] whenever
//! that state changes and reacts to the [`PopperRequest`]s the controller hands
//! back (Escape, blur outside the panel). The controller never opens itself.
//!
//! - closed → open: the element focused at that moment is recorded (not for
//!   [`Role::Tooltip`]), the trap activates and the enter transition starts.
//! - enter transition finished: [`PopperEvent::Opened`].
//! - open → closed: focus goes back to the recorded element if it can still take
//!   focus, and the exit transition starts.
//!
//! ## Deferred blur
//!
//! When the paper loses focus the host does not yet know where focus went.
//! [`PickerPopper::on_blur`] therefore returns a [`BlurCheck`] token which the
//! host runs one event-loop tick later through [`PickerPopper::run_blur_check`].
//! The token is stamped with the open cycle it was issued in, so a check that
//! arrives after the panel closed (or closed and re-opened) does nothing.

use almanac_focus::{FocusHost, Key, contains};
use tracing::{debug, trace};

use crate::focus_trap::FocusTrap;
use crate::props::{
    Placement, PopperProps, Role, TransformOrigin, TransitionKind, TrapFocusProps,
};
use crate::transition::TransitionPhase;

/// Stacking layer of the panel (the modal layer).
pub const MODAL_Z_INDEX: u32 = 1300;

/// Elevation of the paper surface.
pub const PAPER_ELEVATION: u8 = 8;

/// Construction-time configuration of a [`PickerPopper`].
#[derive(Clone, Debug)]
pub struct PickerPopperProps<K> {
    /// Focus-handling policy.
    pub role: Role,
    /// Element the panel is positioned against.
    pub anchor: Option<K>,
    /// Root content element of the panel.
    pub paper: K,
    /// Options for the positioning primitive.
    pub popper: PopperProps,
    /// Overrides for the focus trap.
    pub trap_focus: TrapFocusProps,
    /// Enter/exit animation.
    pub transition: TransitionKind,
}

impl<K> PickerPopperProps<K> {
    /// Props for a dialog-role panel with default options.
    pub fn new(paper: K, anchor: Option<K>) -> Self {
        Self {
            role: Role::Dialog,
            anchor,
            paper,
            popper: PopperProps::default(),
            trap_focus: TrapFocusProps::default(),
            transition: TransitionKind::default(),
        }
    }
}

/// Something the parent should do with its open state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PopperRequest {
    /// Close the panel (the `onClose` callback).
    Close,
}

/// Lifecycle notifications.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PopperEvent {
    /// The enter transition finished (the `onOpen` callback).
    Opened,
    /// The exit transition finished; the content may be unmounted.
    Exited,
}

/// A blur check to run on the next event-loop tick.
///
/// Obtained from [`PickerPopper::on_blur`] and consumed by
/// [`PickerPopper::run_blur_check`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a blur check does nothing unless it is run on the next tick"]
pub struct BlurCheck {
    generation: u64,
}

/// Render snapshot of the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopperView<K> {
    /// Whether the panel content is mounted.
    pub rendered: bool,
    /// ARIA role.
    pub role: Role,
    /// Anchor element, when rendered.
    pub anchor: Option<K>,
    /// Stacking layer.
    pub z_index: u32,
    /// Placement currently resolved by the positioning primitive.
    pub placement: Placement,
    /// Pivot of the enter/exit animation.
    pub transform_origin: TransformOrigin,
    /// Paper surface elevation.
    pub elevation: u8,
    /// Tab index of the paper: focusable programmatically, outside tab order.
    pub paper_tab_index: i8,
    /// Whether the trap keeps focus inside.
    pub trap_enforces_focus: bool,
    /// Current transition phase.
    pub phase: TransitionPhase,
    /// Whether the panel is portaled out of its parent.
    pub portal: bool,
}

/// Controlled state of a floating picker panel.
#[derive(Clone, Debug)]
pub struct PickerPopper<K> {
    role: Role,
    open: bool,
    anchor: Option<K>,
    popper: PopperProps,
    trap_props: TrapFocusProps,
    transition: TransitionKind,
    phase: TransitionPhase,
    placement: Placement,
    trap: FocusTrap<K>,
    last_focused: Option<K>,
    generation: u64,
}

impl<K: Copy + Eq + core::fmt::Debug> PickerPopper<K> {
    /// Create a closed panel.
    pub fn new(props: PickerPopperProps<K>) -> Self {
        let mut trap = FocusTrap::new(props.paper);
        trap.configure(false, props.role, &props.trap_focus);
        Self {
            role: props.role,
            open: false,
            anchor: props.anchor,
            placement: props.popper.placement,
            popper: props.popper,
            trap_props: props.trap_focus,
            transition: props.transition,
            phase: TransitionPhase::Exited,
            trap,
            last_focused: None,
            generation: 0,
        }
    }

    /// Whether the parent currently has the panel open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The focus-handling role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The root content element.
    pub fn paper(&self) -> K {
        self.trap.root()
    }

    /// The focus trap wrapping the paper.
    pub fn trap(&self) -> &FocusTrap<K> {
        &self.trap
    }

    /// Current transition phase.
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Apply the parent's open state.
    ///
    /// Returns [`PopperEvent::Opened`] right away when there is no enter
    /// animation; otherwise it follows from [`Self::on_transition_entered`].
    pub fn set_open<H: FocusHost<K> + ?Sized>(
        &mut self,
        open: bool,
        host: &mut H,
    ) -> Option<PopperEvent> {
        if open == self.open {
            return None;
        }
        self.open = open;
        self.trap.configure(open, self.role, &self.trap_props);

        if open {
            self.generation += 1;
            self.phase = self.phase.begin_enter(self.transition);
            self.sync_focus_return(host);
            self.trap.activate(host);
            debug!(generation = self.generation, "picker popper opened");
            (self.phase == TransitionPhase::Entered).then_some(PopperEvent::Opened)
        } else {
            self.phase = self.phase.begin_exit(self.transition);
            self.sync_focus_return(host);
            debug!(generation = self.generation, "picker popper closed");
            (self.phase == TransitionPhase::Exited).then_some(PopperEvent::Exited)
        }
    }

    /// Change the focus-handling role.
    ///
    /// The focus-return effect depends on the role, so it runs again for the
    /// current open state.
    pub fn set_role<H: FocusHost<K> + ?Sized>(&mut self, role: Role, host: &mut H) {
        if role == self.role {
            return;
        }
        self.role = role;
        self.trap.configure(self.open, role, &self.trap_props);
        self.sync_focus_return(host);
    }

    /// Replace the anchor element. `None` stops the panel from rendering.
    pub fn set_anchor(&mut self, anchor: Option<K>) {
        self.anchor = anchor;
    }

    /// Record the placement the positioning primitive actually used.
    pub fn set_resolved_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Pivot of the enter/exit animation for the resolved placement.
    pub fn transform_origin(&self) -> TransformOrigin {
        TransformOrigin::for_placement(self.placement)
    }

    fn sync_focus_return<H: FocusHost<K> + ?Sized>(&mut self, host: &mut H) {
        if !self.role.manages_focus_return() {
            return;
        }
        if self.open {
            self.last_focused = host.active_element();
            trace!(last_focused = ?self.last_focused, "recorded focus before open");
        } else if let Some(node) = self.last_focused.take()
            && host.is_focusable(node)
        {
            let restored = host.focus(node);
            debug!(?node, restored, "returning focus after close");
        }
    }

    /// Global key listener; only reacts while open.
    pub fn on_global_key_down(&self, key: Key) -> Option<PopperRequest> {
        if self.open && key == Key::Escape {
            debug!("escape pressed, requesting close");
            return Some(PopperRequest::Close);
        }
        None
    }

    /// The paper lost focus.
    ///
    /// Returns a check to run on the next tick, or `None` while closed.
    pub fn on_blur(&self) -> Option<BlurCheck> {
        self.open.then_some(BlurCheck {
            generation: self.generation,
        })
    }

    /// Run a deferred blur check.
    ///
    /// Requests a close unless the element that now holds focus is inside the
    /// paper. A check from an earlier open cycle, or one that runs after the
    /// panel closed, does nothing.
    pub fn run_blur_check<H: FocusHost<K> + ?Sized>(
        &self,
        check: BlurCheck,
        host: &H,
    ) -> Option<PopperRequest> {
        if !self.open || check.generation != self.generation {
            trace!(
                issued = check.generation,
                current = self.generation,
                open = self.open,
                "stale blur check ignored"
            );
            return None;
        }
        let active = host.active_element();
        if active.is_some_and(|a| contains(host, self.paper(), a)) {
            trace!(?active, "focus stayed inside the panel");
            return None;
        }
        debug!(?active, "focus left the panel, requesting close");
        Some(PopperRequest::Close)
    }

    /// Focus moved somewhere in the document; lets the trap intervene.
    ///
    /// Returns the element focus was pulled back to, if any.
    pub fn on_focus_in<H: FocusHost<K> + ?Sized>(
        &mut self,
        target: Option<K>,
        host: &mut H,
    ) -> Option<K> {
        self.trap.on_focus_in(target, host)
    }

    /// The host finished the enter animation.
    pub fn on_transition_entered(&mut self) -> Option<PopperEvent> {
        if self.phase != TransitionPhase::Entering {
            return None;
        }
        self.phase = TransitionPhase::Entered;
        debug!("picker popper entered");
        Some(PopperEvent::Opened)
    }

    /// The host finished the exit animation.
    pub fn on_transition_exited(&mut self) -> Option<PopperEvent> {
        if self.phase != TransitionPhase::Exiting {
            return None;
        }
        self.phase = TransitionPhase::Exited;
        Some(PopperEvent::Exited)
    }

    /// Render snapshot.
    ///
    /// Without an anchor nothing is rendered.
    pub fn view(&self) -> PopperView<K> {
        let mounted = self.phase.is_mounted() || self.popper.keep_mounted;
        let rendered = self.anchor.is_some() && mounted;
        PopperView {
            rendered,
            role: self.role,
            anchor: self.anchor.filter(|_| rendered),
            z_index: MODAL_Z_INDEX,
            placement: self.placement,
            transform_origin: self.transform_origin(),
            elevation: PAPER_ELEVATION,
            paper_tab_index: -1,
            trap_enforces_focus: self.trap.is_active() && self.trap.enforces_focus(),
            phase: self.phase,
            portal: !self.popper.disable_portal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_focus::Document;

    const BODY: u32 = 1;
    const TRIGGER: u32 = 2;
    const PAPER: u32 = 3;
    const CELL: u32 = 4;
    const OTHER: u32 = 5;

    fn doc() -> Document<u32> {
        let mut doc = Document::new();
        doc.insert(BODY, None);
        doc.insert(TRIGGER, Some(BODY));
        doc.insert(PAPER, Some(BODY));
        doc.insert(CELL, Some(PAPER));
        doc.insert(OTHER, Some(BODY));
        doc
    }

    fn popper(role: Role) -> PickerPopper<u32> {
        PickerPopper::new(PickerPopperProps {
            role,
            ..PickerPopperProps::new(PAPER, Some(TRIGGER))
        })
    }

    #[test]
    fn dialog_returns_focus_to_trigger_on_close() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);

        doc.set_active(Some(TRIGGER));
        p.set_open(true, &mut doc);
        doc.set_active(Some(CELL));
        p.set_open(false, &mut doc);

        assert_eq!(doc.focus_calls(), &[TRIGGER]);
        assert_eq!(doc.active_element(), Some(TRIGGER));
    }

    #[test]
    fn every_cycle_records_a_fresh_element() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);

        doc.set_active(Some(TRIGGER));
        p.set_open(true, &mut doc);
        p.set_open(false, &mut doc);
        doc.set_active(Some(OTHER));
        p.set_open(true, &mut doc);
        doc.set_active(Some(CELL));
        p.set_open(false, &mut doc);

        assert_eq!(doc.focus_calls(), &[TRIGGER, OTHER]);
    }

    #[test]
    fn removed_trigger_is_not_refocused() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);

        doc.set_active(Some(TRIGGER));
        p.set_open(true, &mut doc);
        doc.remove(TRIGGER);
        p.set_open(false, &mut doc);

        assert!(doc.focus_calls().is_empty());
    }

    #[test]
    fn tooltip_never_touches_focus() {
        let mut doc = doc();
        let mut p = popper(Role::Tooltip);

        doc.set_active(Some(TRIGGER));
        p.set_open(true, &mut doc);
        doc.set_active(Some(OTHER));
        p.set_open(false, &mut doc);

        assert!(doc.focus_calls().is_empty());
        assert_eq!(doc.active_element(), Some(OTHER));
    }

    #[test]
    fn escape_closes_only_while_open() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);

        assert_eq!(p.on_global_key_down(Key::Escape), None);
        p.set_open(true, &mut doc);
        assert_eq!(
            p.on_global_key_down(Key::Escape),
            Some(PopperRequest::Close)
        );
        assert_eq!(
            p.on_global_key_down(Key::Escape),
            Some(PopperRequest::Close)
        );
        assert_eq!(p.on_global_key_down(Key::Enter), None);
        p.set_open(false, &mut doc);
        assert_eq!(p.on_global_key_down(Key::Escape), None);
    }

    #[test]
    fn blur_inside_the_paper_keeps_it_open() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);
        p.set_open(true, &mut doc);

        let check = p.on_blur().unwrap();
        doc.set_active(Some(CELL));
        assert_eq!(p.run_blur_check(check, &doc), None);
    }

    #[test]
    fn blur_outside_the_paper_requests_one_close() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);
        p.set_open(true, &mut doc);

        let check = p.on_blur().unwrap();
        doc.set_active(Some(OTHER));
        assert_eq!(p.run_blur_check(check, &doc), Some(PopperRequest::Close));

        // Focus moving to nothing at all also counts as outside.
        let check = p.on_blur().unwrap();
        doc.set_active(None);
        assert_eq!(p.run_blur_check(check, &doc), Some(PopperRequest::Close));
    }

    #[test]
    fn blur_check_after_close_is_a_no_op() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);
        p.set_open(true, &mut doc);

        let check = p.on_blur().unwrap();
        p.set_open(false, &mut doc);
        doc.set_active(Some(OTHER));
        assert_eq!(p.run_blur_check(check, &doc), None);
        assert!(p.on_blur().is_none());
    }

    #[test]
    fn blur_check_from_previous_cycle_is_ignored() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);
        p.set_open(true, &mut doc);
        let stale = p.on_blur().unwrap();
        p.set_open(false, &mut doc);
        p.set_open(true, &mut doc);

        doc.set_active(Some(OTHER));
        assert_eq!(p.run_blur_check(stale, &doc), None);
    }

    #[test]
    fn opened_fires_when_enter_transition_completes() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);

        assert_eq!(p.set_open(true, &mut doc), None);
        assert_eq!(p.phase(), TransitionPhase::Entering);
        assert_eq!(p.on_transition_entered(), Some(PopperEvent::Opened));
        assert_eq!(p.on_transition_entered(), None);

        assert_eq!(p.set_open(false, &mut doc), None);
        assert!(p.view().rendered);
        assert_eq!(p.on_transition_exited(), Some(PopperEvent::Exited));
        assert!(!p.view().rendered);
    }

    #[test]
    fn without_transition_open_is_immediate() {
        let mut doc = doc();
        let mut p = PickerPopper::new(PickerPopperProps {
            transition: TransitionKind::None,
            ..PickerPopperProps::new(PAPER, Some(TRIGGER))
        });

        assert_eq!(p.set_open(true, &mut doc), Some(PopperEvent::Opened));
        assert_eq!(p.set_open(true, &mut doc), None);
        assert_eq!(p.set_open(false, &mut doc), Some(PopperEvent::Exited));
    }

    #[test]
    fn missing_anchor_renders_nothing() {
        let mut doc = doc();
        let mut p = PickerPopper::new(PickerPopperProps::new(PAPER, None));
        p.set_open(true, &mut doc);

        let view = p.view();
        assert!(!view.rendered);
        assert_eq!(view.anchor, None);

        p.set_anchor(Some(TRIGGER));
        assert!(p.view().rendered);
    }

    #[test]
    fn top_placement_flips_transform_origin() {
        let mut p = popper(Role::Dialog);
        assert_eq!(p.view().transform_origin, TransformOrigin::TopCenter);
        p.set_resolved_placement(Placement::Top);
        assert_eq!(p.view().transform_origin, TransformOrigin::BottomCenter);
        p.set_resolved_placement(Placement::TopEnd);
        assert_eq!(p.view().transform_origin, TransformOrigin::TopCenter);
    }

    #[test]
    fn trap_enforcement_follows_role() {
        let mut doc = doc();
        let mut p = popper(Role::Dialog);
        p.set_open(true, &mut doc);
        assert!(p.view().trap_enforces_focus);

        doc.set_active(Some(OTHER));
        assert_eq!(p.on_focus_in(Some(OTHER), &mut doc), Some(PAPER));

        p.set_role(Role::Tooltip, &mut doc);
        assert!(!p.view().trap_enforces_focus);
        doc.set_active(Some(OTHER));
        assert_eq!(p.on_focus_in(Some(OTHER), &mut doc), None);
    }

    #[test]
    fn view_reports_fixed_surface_properties() {
        let p = popper(Role::Dialog);
        let view = p.view();
        assert_eq!(view.z_index, MODAL_Z_INDEX);
        assert_eq!(view.elevation, PAPER_ELEVATION);
        assert_eq!(view.paper_tab_index, -1);
        assert!(view.portal);
        assert_eq!(view.role.as_str(), "dialog");
    }
}
