// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single selectable year.

use alloc::format;
use alloc::string::String;

use almanac_focus::{FocusHost, Key};
use almanac_wrapper::WrapperContext;
use bitflags::bitflags;

bitflags! {
    /// Visual state of a year cell.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct YearCellState: u8 {
        /// The cell holds the picked value.
        const SELECTED = 1 << 0;
        /// The cell cannot be activated.
        const DISABLED = 1 << 1;
        /// The parent grid wants keyboard focus on this cell.
        const FOCUSED = 1 << 2;
    }
}

/// Props of a year cell.
///
/// `selected`, `disabled` and `focused` are derived by the caller (usually a
/// [`YearGrid`](crate::YearGrid)); the cell does not compute them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearProps<V> {
    /// Value reported when the cell is activated.
    pub value: V,
    /// Text shown in the cell.
    pub label: String,
    /// The cell holds the picked value.
    pub selected: bool,
    /// The cell cannot be activated.
    pub disabled: bool,
    /// The parent grid wants keyboard focus on this cell.
    pub focused: bool,
    /// Whether the cell may grab focus programmatically.
    pub allow_keyboard_control: bool,
}

/// Render snapshot of a year cell.
#[derive(Clone, Debug, PartialEq)]
pub struct YearCellView {
    /// Visual state.
    pub state: YearCellState,
    /// `0` for the selected cell, `-1` for the rest.
    pub tab_index: i8,
    /// Share of the row taken by the cell, in percent.
    pub flex_basis: f64,
    /// Test id of the button.
    pub test_id: &'static str,
    /// Test id of the label, `year-{label}`.
    pub label_test_id: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct FocusDeps {
    focused: bool,
    disabled: bool,
    allow_keyboard_control: bool,
}

/// A year cell and the state of its focus effect.
#[derive(Clone, Debug)]
pub struct YearCell<V> {
    props: YearProps<V>,
    committed: Option<FocusDeps>,
}

impl<V: Clone> YearCell<V> {
    /// Create a cell; nothing is committed until [`Self::commit`].
    pub fn new(props: YearProps<V>) -> Self {
        Self {
            props,
            committed: None,
        }
    }

    /// Current props.
    pub fn props(&self) -> &YearProps<V> {
        &self.props
    }

    /// Replace the props. Focus follows on the next [`Self::commit`].
    pub fn set_props(&mut self, props: YearProps<V>) {
        self.props = props;
    }

    /// Pointer activation. Returns the value to select, or `None` when disabled.
    pub fn on_click(&self) -> Option<V> {
        (!self.props.disabled).then(|| self.props.value.clone())
    }

    /// Keyboard activation with Space or Enter.
    pub fn on_key_down(&self, key: Key) -> Option<V> {
        if key.is_activation() {
            self.on_click()
        } else {
            None
        }
    }

    /// Run the focus effect after a render.
    ///
    /// The effect only runs when `focused`, `disabled` or
    /// `allow_keyboard_control` changed since the last commit. It focuses
    /// `node` when the cell is focused, enabled and allowed to take keyboard
    /// control. Returns whether focus was moved.
    pub fn commit<K, H>(&mut self, node: K, host: &mut H) -> bool
    where
        K: Copy + Eq,
        H: FocusHost<K> + ?Sized,
    {
        let deps = FocusDeps {
            focused: self.props.focused,
            disabled: self.props.disabled,
            allow_keyboard_control: self.props.allow_keyboard_control,
        };
        if self.committed == Some(deps) {
            return false;
        }
        self.committed = Some(deps);
        if deps.focused && !deps.disabled && deps.allow_keyboard_control {
            host.focus(node)
        } else {
            false
        }
    }

    /// Only the selected cell is in the natural tab order.
    pub fn tab_index(&self) -> i8 {
        if self.props.selected { 0 } else { -1 }
    }

    /// Visual state flags.
    pub fn state(&self) -> YearCellState {
        let mut state = YearCellState::empty();
        state.set(YearCellState::SELECTED, self.props.selected);
        state.set(YearCellState::DISABLED, self.props.disabled);
        state.set(YearCellState::FOCUSED, self.props.focused);
        state
    }

    /// Render snapshot; the row layout comes from the ambient wrapper context.
    pub fn view(&self, ctx: WrapperContext) -> YearCellView {
        YearCellView {
            state: self.state(),
            tab_index: self.tab_index(),
            flex_basis: flex_basis(ctx),
            test_id: "year",
            label_test_id: format!("year-{}", self.props.label),
        }
    }
}

/// Cells per row: four on desktop, three everywhere else.
pub fn years_per_row(ctx: WrapperContext) -> usize {
    if ctx.is_desktop() { 4 } else { 3 }
}

fn flex_basis(ctx: WrapperContext) -> f64 {
    if ctx.is_desktop() { 25.0 } else { 33.3 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_focus::Document;
    use almanac_wrapper::WrapperVariant;

    const NODE: u32 = 10;
    const OTHER: u32 = 11;

    fn doc() -> Document<u32> {
        let mut doc = Document::new();
        doc.insert(1, None);
        doc.insert(NODE, Some(1));
        doc.insert(OTHER, Some(1));
        doc
    }

    fn props(year: i32) -> YearProps<i32> {
        YearProps {
            value: year,
            label: format!("{year}"),
            selected: false,
            disabled: false,
            focused: false,
            allow_keyboard_control: true,
        }
    }

    #[test]
    fn click_enter_and_space_select_once_each() {
        let cell = YearCell::new(props(2024));
        assert_eq!(cell.on_click(), Some(2024));
        assert_eq!(cell.on_key_down(Key::Enter), Some(2024));
        assert_eq!(cell.on_key_down(Key::Space), Some(2024));
        assert_eq!(cell.on_key_down(Key::Escape), None);
        assert_eq!(cell.on_key_down(Key::ArrowDown), None);
    }

    #[test]
    fn disabled_cell_never_selects() {
        let cell = YearCell::new(YearProps {
            disabled: true,
            ..props(2024)
        });
        assert_eq!(cell.on_click(), None);
        assert_eq!(cell.on_key_down(Key::Enter), None);
        assert_eq!(cell.on_key_down(Key::Space), None);
    }

    #[test]
    fn focused_cell_takes_focus_once() {
        let mut doc = doc();
        let mut cell = YearCell::new(YearProps {
            focused: true,
            ..props(2024)
        });
        assert!(cell.commit(NODE, &mut doc));
        // Same deps: the effect does not run again even if focus moved away.
        doc.set_active(Some(OTHER));
        assert!(!cell.commit(NODE, &mut doc));
        assert_eq!(doc.focus_calls(), &[NODE]);
    }

    #[test]
    fn disabled_or_uncontrolled_cell_does_not_take_focus() {
        let mut doc = doc();
        let mut cell = YearCell::new(YearProps {
            focused: true,
            disabled: true,
            ..props(2024)
        });
        assert!(!cell.commit(NODE, &mut doc));

        cell.set_props(YearProps {
            focused: true,
            allow_keyboard_control: false,
            ..props(2024)
        });
        assert!(!cell.commit(NODE, &mut doc));

        // Re-enabling keyboard control re-runs the effect.
        cell.set_props(YearProps {
            focused: true,
            ..props(2024)
        });
        assert!(cell.commit(NODE, &mut doc));
        assert_eq!(doc.focus_calls(), &[NODE]);
    }

    #[test]
    fn refocuses_after_losing_and_regaining_focus_flag() {
        let mut doc = doc();
        let mut cell = YearCell::new(YearProps {
            focused: true,
            ..props(2024)
        });
        assert!(cell.commit(NODE, &mut doc));
        cell.set_props(props(2024));
        assert!(!cell.commit(NODE, &mut doc));
        cell.set_props(YearProps {
            focused: true,
            ..props(2024)
        });
        assert!(cell.commit(NODE, &mut doc));
        assert_eq!(doc.focus_calls(), &[NODE, NODE]);
    }

    #[test]
    fn only_selected_cell_is_tabbable() {
        let selected = YearCell::new(YearProps {
            selected: true,
            ..props(2024)
        });
        let other = YearCell::new(props(2025));
        assert_eq!(selected.tab_index(), 0);
        assert_eq!(other.tab_index(), -1);
    }

    #[test]
    fn layout_follows_wrapper_context() {
        let cell = YearCell::new(YearProps {
            selected: true,
            disabled: true,
            ..props(1999)
        });
        let desktop = cell.view(WrapperContext::new(WrapperVariant::Desktop));
        assert_eq!(desktop.flex_basis, 25.0);
        assert_eq!(desktop.label_test_id, "year-1999");
        assert_eq!(
            desktop.state,
            YearCellState::SELECTED | YearCellState::DISABLED
        );

        let mobile = cell.view(WrapperContext::new(WrapperVariant::Mobile));
        assert_eq!(mobile.flex_basis, 33.3);
        assert_eq!(cell.view(WrapperContext::default()).flex_basis, 33.3);
        assert_eq!(years_per_row(WrapperContext::default()), 3);
        assert_eq!(
            years_per_row(WrapperContext::new(WrapperVariant::Desktop)),
            4
        );
    }
}
