// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration passed to the floating panel and to the primitives it wraps.

/// Focus-handling policy of a floating panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Non-modal hint: never records or restores focus, and the focus trap
    /// lets focus escape.
    Tooltip,
    /// Modal picker panel: focus returns to the trigger on close and the trap
    /// keeps focus inside.
    #[default]
    Dialog,
}

impl Role {
    /// Whether this role records the focused element on open and restores it on close.
    pub fn manages_focus_return(self) -> bool {
        !matches!(self, Self::Tooltip)
    }

    /// Whether a focus trap should keep focus inside the panel for this role.
    pub fn enforces_focus(self) -> bool {
        !matches!(self, Self::Tooltip)
    }

    /// The ARIA role string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tooltip => "tooltip",
            Self::Dialog => "dialog",
        }
    }
}

/// Where the panel sits relative to its anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Above, aligned to the anchor's start edge.
    TopStart,
    /// Above, centered.
    Top,
    /// Above, aligned to the anchor's end edge.
    TopEnd,
    /// Right, aligned to the anchor's top edge.
    RightStart,
    /// Right, centered.
    Right,
    /// Right, aligned to the anchor's bottom edge.
    RightEnd,
    /// Below, aligned to the anchor's start edge.
    BottomStart,
    /// Below, centered.
    #[default]
    Bottom,
    /// Below, aligned to the anchor's end edge.
    BottomEnd,
    /// Left, aligned to the anchor's top edge.
    LeftStart,
    /// Left, centered.
    Left,
    /// Left, aligned to the anchor's bottom edge.
    LeftEnd,
}

impl Placement {
    /// Parse a popper placement name such as `"bottom-start"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "top-start" => Self::TopStart,
            "top" => Self::Top,
            "top-end" => Self::TopEnd,
            "right-start" => Self::RightStart,
            "right" => Self::Right,
            "right-end" => Self::RightEnd,
            "bottom-start" => Self::BottomStart,
            "bottom" => Self::Bottom,
            "bottom-end" => Self::BottomEnd,
            "left-start" => Self::LeftStart,
            "left" => Self::Left,
            "left-end" => Self::LeftEnd,
            _ => return None,
        })
    }

    /// The popper placement name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopStart => "top-start",
            Self::Top => "top",
            Self::TopEnd => "top-end",
            Self::RightStart => "right-start",
            Self::Right => "right",
            Self::RightEnd => "right-end",
            Self::BottomStart => "bottom-start",
            Self::Bottom => "bottom",
            Self::BottomEnd => "bottom-end",
            Self::LeftStart => "left-start",
            Self::Left => "left",
            Self::LeftEnd => "left-end",
        }
    }
}

/// Pivot of the enter/exit animation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransformOrigin {
    /// Grow from the top edge (panel below its anchor).
    #[default]
    TopCenter,
    /// Grow from the bottom edge (panel above its anchor).
    BottomCenter,
}

impl TransformOrigin {
    /// Only the exact `top` placement flips the origin; `top-start`/`top-end` keep
    /// growing from the top.
    pub fn for_placement(placement: Placement) -> Self {
        if placement == Placement::Top {
            Self::BottomCenter
        } else {
            Self::TopCenter
        }
    }

    /// CSS `transform-origin` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::TopCenter => "top center",
            Self::BottomCenter => "bottom center",
        }
    }
}

/// Options forwarded to the host's popper/positioning primitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopperProps {
    /// Preferred placement; the host may flip it and report the result back.
    pub placement: Placement,
    /// Render in place instead of in a portal at the document root.
    pub disable_portal: bool,
    /// Keep the panel mounted while closed.
    pub keep_mounted: bool,
}

/// Overrides for the focus trap.
///
/// Unset fields fall back to what the panel's [`Role`] implies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrapFocusProps {
    /// Do not move focus into the panel when it opens.
    pub disable_auto_focus: bool,
    /// Let focus leave the panel while it is open. `None` derives it from the role.
    pub disable_enforce_focus: Option<bool>,
    /// Force the trap on or off regardless of the open state.
    pub enabled: Option<bool>,
}

impl Default for TrapFocusProps {
    fn default() -> Self {
        Self {
            disable_auto_focus: true,
            disable_enforce_focus: None,
            enabled: None,
        }
    }
}

/// Enter/exit animation used for the panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Scale + fade from the transform origin.
    #[default]
    Grow,
    /// Opacity only.
    Fade,
    /// A host-provided transition with explicit durations in milliseconds.
    Custom {
        /// Enter duration.
        enter_ms: u32,
        /// Exit duration.
        exit_ms: u32,
    },
    /// No animation: the panel is entered as soon as it opens.
    None,
}

impl TransitionKind {
    /// Suggested `(enter, exit)` durations in milliseconds.
    pub fn durations(self) -> (u32, u32) {
        match self {
            Self::Grow | Self::Fade => (225, 195),
            Self::Custom { enter_ms, exit_ms } => (enter_ms, exit_ms),
            Self::None => (0, 0),
        }
    }

    /// Whether the host runs an animation and reports its completion.
    pub fn animates(self) -> bool {
        !matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_top_flips_the_origin() {
        assert_eq!(
            TransformOrigin::for_placement(Placement::Top),
            TransformOrigin::BottomCenter
        );
        assert_eq!(
            TransformOrigin::for_placement(Placement::TopStart),
            TransformOrigin::TopCenter
        );
        assert_eq!(
            TransformOrigin::for_placement(Placement::Bottom),
            TransformOrigin::TopCenter
        );
    }

    #[test]
    fn placement_names_round_trip_through_parse() {
        for name in ["top", "bottom-end", "left-start", "right"] {
            let placement = Placement::from_name(name).unwrap();
            assert_eq!(placement.as_str(), name);
        }
        assert_eq!(Placement::from_name("middle"), None);
    }

    #[test]
    fn tooltip_role_opts_out_of_focus_management() {
        assert!(!Role::Tooltip.manages_focus_return());
        assert!(!Role::Tooltip.enforces_focus());
        assert!(Role::Dialog.manages_focus_return());
        assert!(Role::Dialog.enforces_focus());
    }

    #[test]
    fn trap_defaults_skip_auto_focus() {
        let props = TrapFocusProps::default();
        assert!(props.disable_auto_focus);
        assert_eq!(props.disable_enforce_focus, None);
    }
}
