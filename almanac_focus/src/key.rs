// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard input as seen by the picker widgets.

use bitflags::bitflags;

use crate::Navigation;

bitflags! {
    /// Modifier keys held while a [`Key`] was pressed.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CONTROL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Super.
        const META = 1 << 3;
    }
}

/// A logical key press delivered by the host toolkit.
///
/// Only the keys the widgets react to get their own variant; everything else is
/// [`Key::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Tab.
    Tab,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Any other key.
    Other,
}

impl Key {
    /// Map a DOM-style `KeyboardEvent.key` name to a [`Key`].
    ///
    /// Legacy spellings (`"Esc"`, `"Spacebar"`, `"Up"`, …) are accepted too.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            "Tab" => Self::Tab,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => Self::Other,
        }
    }

    /// Whether this key activates a focused button (Space or Enter).
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }

    /// The navigation intent this key expresses, if any.
    ///
    /// Tab maps to [`Navigation::Next`], or [`Navigation::Prev`] with Shift held.
    pub fn navigation(self, modifiers: Modifiers) -> Option<Navigation> {
        match self {
            Self::Tab if modifiers.contains(Modifiers::SHIFT) => Some(Navigation::Prev),
            Self::Tab => Some(Navigation::Next),
            Self::ArrowUp => Some(Navigation::Up),
            Self::ArrowDown => Some(Navigation::Down),
            Self::ArrowLeft => Some(Navigation::Left),
            Self::ArrowRight => Some(Navigation::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_names_map_to_the_same_keys() {
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("Spacebar"), Key::Space);
        assert_eq!(Key::from_name("Up"), Key::ArrowUp);
        assert_eq!(Key::from_name("F5"), Key::Other);
    }

    #[test]
    fn tab_direction_follows_shift() {
        assert_eq!(
            Key::Tab.navigation(Modifiers::empty()),
            Some(Navigation::Next)
        );
        assert_eq!(
            Key::Tab.navigation(Modifiers::SHIFT | Modifiers::CONTROL),
            Some(Navigation::Prev)
        );
        assert_eq!(Key::Enter.navigation(Modifiers::empty()), None);
    }

    #[test]
    fn only_space_and_enter_activate() {
        assert!(Key::Space.is_activation());
        assert!(Key::Enter.is_activation());
        assert!(!Key::Escape.is_activation());
        assert!(!Key::Other.is_activation());
    }
}
