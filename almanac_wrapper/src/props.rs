// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration bundles for the two presentation families.

use almanac_popper::{PopperProps, TransitionKind};
use smallvec::SmallVec;

/// Query that switches pickers to the desktop presentation: a precise pointer.
pub const IS_TOUCH_DEVICE_MEDIA: &str = "@media (pointer: fine)";

/// Default label of the accept action.
pub const DEFAULT_OK_TEXT: &str = "OK";
/// Default label of the cancel action.
pub const DEFAULT_CANCEL_TEXT: &str = "Cancel";
/// Default label of the clear action.
pub const DEFAULT_CLEAR_TEXT: &str = "Clear";
/// Default label of the today action.
pub const DEFAULT_TODAY_TEXT: &str = "Today";

/// Vertical anchor point of a popover.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalOrigin {
    /// Top edge.
    #[default]
    Top,
    /// Middle.
    Center,
    /// Bottom edge.
    Bottom,
}

/// Horizontal anchor point of a popover.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalOrigin {
    /// Left edge.
    Left,
    /// Middle.
    #[default]
    Center,
    /// Right edge.
    Right,
}

/// A point on a rectangle used to attach a popover.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PopoverOrigin {
    /// Vertical position.
    pub vertical: VerticalOrigin,
    /// Horizontal position.
    pub horizontal: HorizontalOrigin,
}

/// Options for the popover surface used by the desktop wrapper.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PopoverProps {
    /// Point on the anchor the popover attaches to.
    pub anchor_origin: PopoverOrigin,
    /// Point on the popover that is attached.
    pub transform_origin: PopoverOrigin,
}

impl Default for PopoverProps {
    fn default() -> Self {
        Self {
            anchor_origin: PopoverOrigin {
                vertical: VerticalOrigin::Bottom,
                horizontal: HorizontalOrigin::Center,
            },
            transform_origin: PopoverOrigin {
                vertical: VerticalOrigin::Top,
                horizontal: HorizontalOrigin::Center,
            },
        }
    }
}

/// Props that only the desktop presentation consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesktopProps {
    /// Options for the popper primitive (popper-based desktop wrapper).
    pub popper: PopperProps,
    /// Enter/exit animation.
    pub transition: TransitionKind,
    /// Options for the popover surface (popover-based desktop wrapper).
    pub popover: PopoverProps,
}

/// Options for the modal dialog used by the mobile wrapper.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DialogProps {
    /// Cover the whole viewport.
    pub full_screen: bool,
    /// Ignore Escape.
    pub disable_escape_key_down: bool,
}

/// Action buttons of the mobile dialog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DialogAction {
    /// Clear the value.
    Clear,
    /// Jump to today.
    Today,
    /// Dismiss without accepting.
    Cancel,
    /// Accept the value.
    Accept,
}

/// Props that only the mobile presentation consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MobileProps {
    /// Label of the accept action.
    pub ok_text: String,
    /// Label of the cancel action.
    pub cancel_text: String,
    /// Label of the clear action.
    pub clear_text: String,
    /// Label of the today action.
    pub today_text: String,
    /// Show the clear action.
    pub clearable: bool,
    /// Show the today action.
    pub show_today_button: bool,
    /// Options for the dialog surface.
    pub dialog: DialogProps,
}

impl Default for MobileProps {
    fn default() -> Self {
        Self {
            ok_text: DEFAULT_OK_TEXT.to_owned(),
            cancel_text: DEFAULT_CANCEL_TEXT.to_owned(),
            clear_text: DEFAULT_CLEAR_TEXT.to_owned(),
            today_text: DEFAULT_TODAY_TEXT.to_owned(),
            clearable: false,
            show_today_button: false,
            dialog: DialogProps::default(),
        }
    }
}

impl MobileProps {
    /// Visible dialog actions in display order, with their labels.
    ///
    /// Clear and Today sit on the leading side and only appear when enabled;
    /// Cancel and OK are always present.
    pub fn actions(&self) -> SmallVec<[(DialogAction, &str); 4]> {
        let mut out = SmallVec::new();
        if self.clearable {
            out.push((DialogAction::Clear, self.clear_text.as_str()));
        }
        if self.show_today_button {
            out.push((DialogAction::Today, self.today_text.as_str()));
        }
        out.push((DialogAction::Cancel, self.cancel_text.as_str()));
        out.push((DialogAction::Accept, self.ok_text.as_str()));
        out
    }
}
