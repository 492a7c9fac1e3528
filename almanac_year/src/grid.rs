// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The year grid: a range of [`YearCell`]s with roving keyboard focus.

use alloc::format;
use alloc::vec::Vec;

use almanac_focus::{FocusEntry, FocusHost, FocusPolicy, FocusSpace, GridPolicy, Key, Navigation};
use almanac_wrapper::WrapperContext;
use kurbo::Rect;
use tracing::{debug, trace, warn};

use crate::cell::{YearCell, YearProps, years_per_row};

/// First year shown when no minimum is given.
pub const DEFAULT_MIN_YEAR: i32 = 1900;
/// Last year shown when no maximum is given.
pub const DEFAULT_MAX_YEAR: i32 = 2099;
/// Most years a grid holds; longer ranges are cut short after `min_year`.
pub const MAX_YEAR_SPAN: i32 = 1000;

/// Props of a [`YearGrid`].
///
/// The grid keeps one cell per year, so `min_year..=max_year` is limited to
/// [`MAX_YEAR_SPAN`] years; an inverted range yields an empty grid.
#[derive(Copy, Clone, Debug)]
pub struct YearGridProps {
    /// First year in the grid, inclusive.
    pub min_year: i32,
    /// Last year in the grid, inclusive.
    pub max_year: i32,
    /// The year "today" falls in.
    pub current_year: i32,
    /// The picked year.
    pub selected: Option<i32>,
    /// Disable years before `current_year`.
    pub disable_past: bool,
    /// Disable years after `current_year`.
    pub disable_future: bool,
    /// Extra predicate; years for which it returns `true` are disabled.
    pub should_disable_year: Option<fn(i32) -> bool>,
    /// Whether cells may grab focus programmatically.
    pub allow_keyboard_control: bool,
}

impl YearGridProps {
    /// Default range around `current_year`, nothing selected.
    pub fn new(current_year: i32) -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            current_year,
            selected: None,
            disable_past: false,
            disable_future: false,
            should_disable_year: None,
            allow_keyboard_control: true,
        }
    }

    fn is_disabled(&self, year: i32) -> bool {
        (self.disable_past && year < self.current_year)
            || (self.disable_future && year > self.current_year)
            || self.should_disable_year.is_some_and(|f| f(year))
    }

    fn contains(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    fn clamped(mut self) -> Self {
        let last = self.min_year.saturating_add(MAX_YEAR_SPAN - 1);
        if self.max_year > last {
            warn!(
                min_year = self.min_year,
                max_year = self.max_year,
                "year range too long, clamping"
            );
            self.max_year = last;
        }
        self
    }
}

/// What a key press on the grid did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum YearGridAction {
    /// Keyboard focus moved to this year.
    Focus(i32),
    /// This year was picked.
    Select(i32),
}

/// A range of years with one focused cell.
///
/// The grid derives each cell's `selected`, `disabled` and `focused` props and
/// keeps the cells across updates, so a cell's focus effect only re-runs when
/// its own inputs change.
#[derive(Clone, Debug)]
pub struct YearGrid {
    props: YearGridProps,
    focused: Option<i32>,
    cells: Vec<YearCell<i32>>,
}

impl YearGrid {
    /// Build the grid and pick the initially focused year.
    pub fn new(props: YearGridProps) -> Self {
        let mut grid = Self {
            props: props.clamped(),
            focused: None,
            cells: Vec::new(),
        };
        grid.focused = grid.initial_focus();
        grid.sync_cells();
        grid
    }

    /// Current props.
    pub fn props(&self) -> &YearGridProps {
        &self.props
    }

    /// Replace the props.
    ///
    /// Focus stays where it is while it remains in range and enabled;
    /// otherwise it is recomputed as for a new grid.
    pub fn set_props(&mut self, props: YearGridProps) {
        self.props = props.clamped();
        let keep = self
            .focused
            .is_some_and(|year| self.props.contains(year) && !self.props.is_disabled(year));
        if !keep {
            self.focused = self.initial_focus();
        }
        self.sync_cells();
    }

    /// The cells, from `min_year` to `max_year`.
    pub fn cells(&self) -> &[YearCell<i32>] {
        &self.cells
    }

    /// The year holding keyboard focus.
    pub fn focused(&self) -> Option<i32> {
        self.focused
    }

    /// The picked year.
    pub fn selected(&self) -> Option<i32> {
        self.props.selected
    }

    /// Whether `year` is outside the range or disabled.
    pub fn is_disabled(&self, year: i32) -> bool {
        !self.props.contains(year) || self.props.is_disabled(year)
    }

    /// Years per row for the given presentation.
    pub fn columns(&self, ctx: WrapperContext) -> usize {
        years_per_row(ctx)
    }

    /// Unit-cell layout of the grid, in reading order.
    pub fn layout(&self, ctx: WrapperContext) -> Vec<FocusEntry<i32>> {
        let columns = self.columns(ctx);
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let year = cell.props().value;
                // Small integers; exact in f64.
                let x = (i % columns) as f64;
                let y = (i / columns) as f64;
                FocusEntry::new(year, Rect::new(x, y, x + 1.0, y + 1.0))
                    .with_enabled(!self.props.is_disabled(year))
            })
            .collect()
    }

    /// Handle a key press on the focused cell.
    ///
    /// Left and Right step to the neighbouring enabled year, Up and Down move a
    /// row in the same column; none of them wraps. Home and End jump to the
    /// first and last enabled year, and Space or Enter pick the focused year.
    /// Tab is left to the host so focus can leave the grid in natural order.
    pub fn on_key_down(&mut self, key: Key, ctx: WrapperContext) -> Option<YearGridAction> {
        let origin = self.focused?;
        if key.is_activation() {
            let value = self.cell(origin)?.on_key_down(key)?;
            return self.select(value).map(YearGridAction::Select);
        }
        let target = match key {
            Key::Home => self.first_enabled(),
            Key::End => self.last_enabled(),
            _ => {
                let direction = match key {
                    Key::ArrowUp => Navigation::Up,
                    Key::ArrowDown => Navigation::Down,
                    Key::ArrowLeft => Navigation::Left,
                    Key::ArrowRight => Navigation::Right,
                    _ => return None,
                };
                let nodes = self.layout(ctx);
                GridPolicy.next(origin, direction, &FocusSpace { nodes: &nodes })
            }
        }?;
        if target == origin {
            return None;
        }
        trace!(from = origin, to = target, "year focus moved");
        self.focused = Some(target);
        self.sync_cells();
        Some(YearGridAction::Focus(target))
    }

    /// Pointer activation of `year`.
    pub fn on_click(&mut self, year: i32) -> Option<i32> {
        let value = self.cell(year)?.on_click()?;
        self.select(value)
    }

    /// Pick `year`; it also becomes the focused year.
    ///
    /// Returns `None` when the year is out of range or disabled.
    pub fn select(&mut self, year: i32) -> Option<i32> {
        if self.is_disabled(year) {
            return None;
        }
        debug!(year, "year selected");
        self.props.selected = Some(year);
        self.focused = Some(year);
        self.sync_cells();
        Some(year)
    }

    /// Run each cell's focus effect after the host rendered the grid.
    ///
    /// `node_of` maps a year to its node in the host. Returns whether any cell
    /// moved focus.
    pub fn commit<K, H>(&mut self, host: &mut H, mut node_of: impl FnMut(i32) -> K) -> bool
    where
        K: Copy + Eq,
        H: FocusHost<K> + ?Sized,
    {
        let mut moved = false;
        for cell in &mut self.cells {
            let node = node_of(cell.props().value);
            moved |= cell.commit(node, host);
        }
        moved
    }

    fn cell(&self, year: i32) -> Option<&YearCell<i32>> {
        let index = usize::try_from(year.checked_sub(self.props.min_year)?).ok()?;
        self.cells.get(index)
    }

    fn first_enabled(&self) -> Option<i32> {
        (self.props.min_year..=self.props.max_year).find(|&y| !self.props.is_disabled(y))
    }

    fn last_enabled(&self) -> Option<i32> {
        (self.props.min_year..=self.props.max_year)
            .rev()
            .find(|&y| !self.props.is_disabled(y))
    }

    fn initial_focus(&self) -> Option<i32> {
        let usable = |year: i32| self.props.contains(year) && !self.props.is_disabled(year);
        self.props
            .selected
            .filter(|&y| usable(y))
            .or_else(|| Some(self.props.current_year).filter(|&y| usable(y)))
            .or_else(|| self.first_enabled())
    }

    fn sync_cells(&mut self) {
        let same_range = self.cells.first().map(|c| c.props().value) == Some(self.props.min_year)
            && self.cells.last().map(|c| c.props().value) == Some(self.props.max_year);
        let (props, focused) = (&self.props, self.focused);
        if same_range {
            for cell in &mut self.cells {
                let year = cell.props().value;
                cell.set_props(cell_props(props, focused, year));
            }
        } else {
            self.cells = (props.min_year..=props.max_year)
                .map(|year| YearCell::new(cell_props(props, focused, year)))
                .collect();
        }
    }
}

fn cell_props(props: &YearGridProps, focused: Option<i32>, year: i32) -> YearProps<i32> {
    YearProps {
        value: year,
        label: format!("{year}"),
        selected: props.selected == Some(year),
        disabled: props.is_disabled(year),
        focused: focused == Some(year),
        allow_keyboard_control: props.allow_keyboard_control,
    }
}
