// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Almanac Popper: a controlled floating panel for pickers.
//!
//! ## Overview
//!
//! [`PickerPopper`] holds the interaction state of a panel anchored to a trigger
//! element: it decides when focus is recorded and returned, when Escape or a
//! blur outside the panel should close it, and whether keyboard focus is trapped
//! inside. It does not render, position, or animate anything; the host toolkit
//! does that and reports back through plain method calls.
//!
//! The panel is a *controlled* component. The parent owns `open`, feeds it in
//! with [`PickerPopper::set_open`], and applies the [`PopperRequest`]s returned
//! by the event handlers.
//!
//! ## Roles
//!
//! - [`Role::Dialog`]: records the focused element on open, returns focus to it on
//!   close, and enforces the focus trap.
//! - [`Role::Tooltip`]: leaves focus alone and lets it leave the panel.
//!
//! ## Example
//!
//! ```rust
//! use almanac_focus::{Document, FocusHost, Key};
//! use almanac_popper::{PickerPopper, PickerPopperProps, PopperEvent, PopperRequest};
//!
//! let (body, trigger, paper, outside) = (1_u32, 2, 3, 4);
//! let mut doc = Document::new();
//! doc.insert(body, None);
//! doc.insert(trigger, Some(body));
//! doc.insert(paper, Some(body));
//! doc.insert(outside, Some(body));
//!
//! let mut popper = PickerPopper::new(PickerPopperProps::new(paper, Some(trigger)));
//! doc.set_active(Some(trigger));
//!
//! // The parent opens the panel; `Opened` arrives once the enter animation ends.
//! assert_eq!(popper.set_open(true, &mut doc), None);
//! assert_eq!(popper.on_transition_entered(), Some(PopperEvent::Opened));
//!
//! // Focus moves outside: the blur check, run on the next tick, asks to close.
//! let check = popper.on_blur().unwrap();
//! doc.set_active(Some(outside));
//! assert_eq!(popper.run_blur_check(check, &doc), Some(PopperRequest::Close));
//!
//! // The parent complies; focus goes back to the trigger.
//! popper.set_open(false, &mut doc);
//! assert_eq!(doc.active_element(), Some(trigger));
//! assert_eq!(popper.on_global_key_down(Key::Escape), None);
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

pub mod focus_trap;
mod popper;
mod props;
pub mod transition;

pub use popper::{
    BlurCheck, MODAL_Z_INDEX, PAPER_ELEVATION, PickerPopper, PickerPopperProps, PopperEvent,
    PopperRequest, PopperView,
};
pub use props::{Placement, PopperProps, Role, TransformOrigin, TransitionKind, TrapFocusProps};
