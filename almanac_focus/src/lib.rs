// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Almanac Focus: keyboard and focus primitives shared by the picker widgets.
//!
//! Every picker surface needs the same few things from the host toolkit: which
//! key was pressed, which element holds focus, and where focus should go next.
//! This crate provides them without owning an element tree:
//! - [`Key`] and [`Modifiers`] normalise key events and map them to a
//!   [`Navigation`] intent (Tab, Shift+Tab, the arrows).
//! - [`FocusEntry`] lists the candidates of one focus scope with their rects, so
//!   a panel's action row or a year grid can be traversed by geometry.
//! - [`FocusPolicy`] picks the next candidate. [`DefaultPolicy`] cycles a trapped
//!   panel; [`GridPolicy`] walks a dense grid of cells.
//! - [`FocusHost`] is the seam to the host document (active element,
//!   programmatic focus, containment); [`Document`] is an in-memory host.
//!
//! ## Cycling a panel
//!
//! The action row of a picker dialog, Cancel then OK:
//!
//! ```rust
//! use kurbo::Rect;
//! use almanac_focus::{DefaultPolicy, FocusEntry, FocusPolicy, FocusSpace, Navigation};
//!
//! const CANCEL: u32 = 1;
//! const OK: u32 = 2;
//! let actions = vec![
//!     FocusEntry::new(CANCEL, Rect::new(0.0, 0.0, 64.0, 36.0)),
//!     FocusEntry::new(OK, Rect::new(72.0, 0.0, 136.0, 36.0)),
//! ];
//! let space = FocusSpace { nodes: &actions };
//!
//! // Tab from OK comes back around to Cancel instead of leaving the panel.
//! assert_eq!(DefaultPolicy::default().next(CANCEL, Navigation::Next, &space), Some(OK));
//! assert_eq!(DefaultPolicy::default().next(OK, Navigation::Next, &space), Some(CANCEL));
//! ```
//!
//! ## Grids
//!
//! [`GridPolicy`] is meant for dense cell grids such as a year picker: horizontal
//! arrows walk the cells in reading order (so Right at the end of a row continues on
//! the next row), vertical arrows only move to cells that are actually above or below,
//! and neither wraps past the ends of the grid.
//!
//! ```rust
//! use kurbo::Rect;
//! use almanac_focus::{FocusEntry, FocusPolicy, FocusSpace, GridPolicy, Navigation};
//!
//! // Two rows of two cells: 0 1 / 2 3
//! let entries: Vec<_> = (0..4_u32)
//!     .map(|i| {
//!         let (col, row) = (f64::from(i % 2), f64::from(i / 2));
//!         FocusEntry::new(i, Rect::new(col * 10.0, row * 10.0, col * 10.0 + 10.0, row * 10.0 + 10.0))
//!     })
//!     .collect();
//! let space = FocusSpace { nodes: &entries };
//!
//! assert_eq!(GridPolicy.next(1, Navigation::Right, &space), Some(2));
//! assert_eq!(GridPolicy.next(1, Navigation::Down, &space), Some(3));
//! assert_eq!(GridPolicy.next(1, Navigation::Up, &space), None);
//! ```
//!
//! Node identifiers are any small `Copy` handle `K`; geometry is [`kurbo::Rect`].
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: `no_std` float math through `kurbo/libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::Rect;

pub mod document;
mod host;
mod key;

pub use document::Document;
pub use host::{FocusHost, ancestry, contains};
pub use key::{Key, Modifiers};

/// Where the user asked focus to go.
///
/// Produced by [`Key::navigation`]; each [`FocusPolicy`] decides what the
/// intent means for its layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Tab.
    Next,
    /// Shift+Tab.
    Prev,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
}

/// One focusable element of a scope: a dialog action, a year cell.
#[derive(Clone, Debug)]
pub struct FocusEntry<K> {
    /// Host handle of the element.
    pub id: K,
    /// Layout box. Entries of one [`FocusSpace`] share a coordinate space;
    /// unit cells are fine for grids.
    pub rect: Rect,
    /// Optional explicit ordering key, honored before reading order.
    pub order: Option<i32>,
    /// Disabled years and actions can't take focus.
    ///
    /// Disabled nodes are skipped during traversal but stay in the space so that
    /// layout-dependent policies still see the full grid.
    pub enabled: bool,
}

impl<K> FocusEntry<K> {
    /// Create an enabled entry without an explicit order.
    pub fn new(id: K, rect: Rect) -> Self {
        Self {
            id,
            rect,
            order: None,
            enabled: true,
        }
    }

    /// Set whether this entry can receive focus.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set an explicit ordering key.
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

/// The candidates of one focus scope, as laid out for the current render.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Entries in any order; policies sort them as needed.
    pub nodes: &'a [FocusEntry<K>],
}

/// What happens past the last (or before the first) candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop; the policy returns `None`.
    Never,
    /// Wrap within the current focus scope (for example, a trapped panel).
    Scope,
}

/// Chooses the element that receives focus for a [`Navigation`] intent.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Next element after `origin`, or `None` to leave focus where it is.
    fn next(&self, origin: K, direction: Navigation, space: &FocusSpace<'_, K>) -> Option<K>;
}

/// Reading-order traversal with a directional fallback for arrow keys.
///
/// This is the policy used for Tab cycling inside a focus trap.
#[derive(Copy, Clone, Debug)]
pub struct DefaultPolicy {
    /// Wrap behaviour for Tab and the linear fallback.
    pub wrap: WrapMode,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Scope,
        }
    }
}

impl<K> FocusPolicy<K> for DefaultPolicy
where
    K: Copy + Eq,
{
    fn next(&self, origin: K, direction: Navigation, space: &FocusSpace<'_, K>) -> Option<K> {
        match direction {
            Navigation::Next => next_linear(origin, space, self.wrap, Step::Forward),
            Navigation::Prev => next_linear(origin, space, self.wrap, Step::Backward),
            Navigation::Up | Navigation::Down | Navigation::Left | Navigation::Right => {
                next_directional(origin, direction, space).or_else(|| {
                    // Nothing in that direction: step through reading order instead.
                    let step = match direction {
                        Navigation::Up | Navigation::Left => Step::Backward,
                        _ => Step::Forward,
                    };
                    next_linear(origin, space, self.wrap, step)
                })
            }
        }
    }
}

/// Cell-grid traversal without wrapping.
///
/// - Left/Right (and Prev/Next) step through enabled cells in reading order.
/// - Up/Down pick the nearest enabled cell above/below the origin in the same
///   column. Disabled cells are stepped over; when the column ends (for example
///   on a short last row) there is no move and no fallback.
#[derive(Copy, Clone, Debug, Default)]
pub struct GridPolicy;

impl<K> FocusPolicy<K> for GridPolicy
where
    K: Copy + Eq,
{
    fn next(&self, origin: K, direction: Navigation, space: &FocusSpace<'_, K>) -> Option<K> {
        // The origin must be part of the grid, otherwise linear traversal would
        // jump to the first cell.
        space.nodes.iter().find(|e| e.id == origin)?;
        match direction {
            Navigation::Next | Navigation::Right => {
                next_linear(origin, space, WrapMode::Never, Step::Forward)
            }
            Navigation::Prev | Navigation::Left => {
                next_linear(origin, space, WrapMode::Never, Step::Backward)
            }
            Navigation::Up | Navigation::Down => next_in_column(origin, direction, space),
        }
    }
}

fn next_in_column<K>(origin: K, direction: Navigation, space: &FocusSpace<'_, K>) -> Option<K>
where
    K: Copy + Eq,
{
    let origin_rect = space.nodes.iter().find(|e| e.id == origin)?.rect;
    let oc = origin_rect.center();
    let sign = match direction {
        Navigation::Down => 1.0,
        Navigation::Up => -1.0,
        _ => return None,
    };
    // A cell shares the column when its center lies within the origin's span.
    let half_width = origin_rect.width() / 2.0;
    space
        .nodes
        .iter()
        .filter(|e| e.enabled && e.id != origin)
        .filter_map(|e| {
            let cc = e.rect.center();
            let dy = sign * (cc.y - oc.y);
            ((cc.x - oc.x).abs() < half_width && dy > 0.0).then_some((dy, e.id))
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
        .map(|(_, id)| id)
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

fn next_linear<K>(origin: K, space: &FocusSpace<'_, K>, wrap: WrapMode, step: Step) -> Option<K>
where
    K: Copy + Eq,
{
    let nodes = space.nodes;
    if nodes.is_empty() {
        return None;
    }

    // The origin keeps its place in the ordering even when it is disabled, so
    // traversal can continue from a cell that was disabled after gaining focus.
    let mut indices: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter_map(|(i, e)| (e.enabled || e.id == origin).then_some(i))
        .collect();
    if indices.is_empty() {
        return None;
    }

    indices.sort_by(|&ia, &ib| compare_linear(&nodes[ia], &nodes[ib]));

    let origin_pos = indices.iter().position(|&i| nodes[i].id == origin);

    match step {
        Step::Forward => match origin_pos {
            Some(pos) => first_enabled(nodes, &indices[pos + 1..]).or_else(|| match wrap {
                WrapMode::Scope => first_enabled(nodes, &indices[..pos]),
                WrapMode::Never => None,
            }),
            None => first_enabled(nodes, &indices),
        },
        Step::Backward => match origin_pos {
            Some(pos) => last_enabled(nodes, &indices[..pos]).or_else(|| match wrap {
                WrapMode::Scope => last_enabled(nodes, &indices[pos + 1..]),
                WrapMode::Never => None,
            }),
            None => last_enabled(nodes, &indices),
        },
    }
}

fn first_enabled<K: Copy>(nodes: &[FocusEntry<K>], indices: &[usize]) -> Option<K> {
    indices
        .iter()
        .find(|&&i| nodes[i].enabled)
        .map(|&i| nodes[i].id)
}

fn last_enabled<K: Copy>(nodes: &[FocusEntry<K>], indices: &[usize]) -> Option<K> {
    indices
        .iter()
        .rev()
        .find(|&&i| nodes[i].enabled)
        .map(|&i| nodes[i].id)
}

fn compare_linear<K>(a: &FocusEntry<K>, b: &FocusEntry<K>) -> Ordering {
    // Explicitly ordered entries come first.
    match (a.order, b.order) {
        (Some(ao), Some(bo)) => ao
            .cmp(&bo)
            .then_with(|| compare_rect_reading(&a.rect, &b.rect)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_rect_reading(&a.rect, &b.rect),
    }
}

fn compare_rect_reading(a: &Rect, b: &Rect) -> Ordering {
    const RELATIVE_EPS: f64 = 1e-6;
    let ay = a.y0;
    let by = b.y0;
    if (ay - by).abs() > f64::max(ay.abs(), by.abs()) * RELATIVE_EPS {
        return ay.partial_cmp(&by).unwrap_or(Ordering::Equal);
    }
    a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal)
}

fn next_directional<K>(origin: K, direction: Navigation, space: &FocusSpace<'_, K>) -> Option<K>
where
    K: Copy + Eq,
{
    let nodes = space.nodes;
    let origin_entry = nodes.iter().find(|e| e.id == origin)?;
    let oc = origin_entry.rect.center();

    let mut best_idx: Option<usize> = None;
    let mut best_score: f64 = f64::INFINITY;

    for (i, candidate) in nodes.iter().enumerate() {
        if !candidate.enabled || candidate.id == origin {
            continue;
        }
        let cc = candidate.rect.center();
        let dx = cc.x - oc.x;
        let dy = cc.y - oc.y;

        let (primary, secondary, forward_sign) = match direction {
            Navigation::Right => (dx, dy, 1.0),
            Navigation::Left => (dx, dy, -1.0),
            Navigation::Down => (dy, dx, 1.0),
            Navigation::Up => (dy, dx, -1.0),
            Navigation::Next | Navigation::Prev => return None,
        };

        // Only candidates ahead of the origin.
        if forward_sign * primary <= 0.0 {
            continue;
        }

        // Off-axis distance weighs four times the on-axis distance.
        let score = primary.abs() + 4.0 * secondary.abs();
        if !score.is_finite() {
            continue;
        }

        if score < best_score {
            best_score = score;
            best_idx = Some(i);
        }
    }

    best_idx.map(|i| nodes[i].id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const CLEAR: u32 = 1;
    const CANCEL: u32 = 2;
    const OK: u32 = 3;

    /// A dialog action row: buttons left to right with a gap between them.
    fn actions(ids: &[u32]) -> Vec<FocusEntry<u32>> {
        ids.iter()
            .enumerate()
            .map(|(i, &id)| {
                let x = 72.0 * i as f64;
                FocusEntry::new(id, Rect::new(x, 0.0, x + 64.0, 36.0))
            })
            .collect()
    }

    fn grid(cols: u32, len: u32) -> Vec<FocusEntry<u32>> {
        (0..len)
            .map(|i| {
                let x = f64::from(i % cols) * 10.0;
                let y = f64::from(i / cols) * 10.0;
                FocusEntry::new(i, Rect::new(x, y, x + 10.0, y + 10.0))
            })
            .collect()
    }

    #[test]
    fn tab_cycles_the_action_row() {
        let row = actions(&[CANCEL, OK]);
        let space = FocusSpace { nodes: &row };
        let trapped = DefaultPolicy::default();

        assert_eq!(trapped.next(CANCEL, Navigation::Next, &space), Some(OK));
        assert_eq!(trapped.next(OK, Navigation::Next, &space), Some(CANCEL));
        assert_eq!(trapped.next(CANCEL, Navigation::Prev, &space), Some(OK));
    }

    #[test]
    fn explicit_order_beats_layout() {
        // OK is drawn first but should be reached after Cancel.
        let row = vec![
            FocusEntry::new(OK, Rect::new(0.0, 0.0, 64.0, 36.0)).with_order(2),
            FocusEntry::new(CANCEL, Rect::new(72.0, 0.0, 136.0, 36.0)).with_order(1),
        ];
        let space = FocusSpace { nodes: &row };
        let trapped = DefaultPolicy::default();

        assert_eq!(trapped.next(CANCEL, Navigation::Next, &space), Some(OK));
        assert_eq!(trapped.next(OK, Navigation::Prev, &space), Some(CANCEL));
    }

    #[test]
    fn tab_skips_a_disabled_action() {
        let mut row = actions(&[CLEAR, CANCEL, OK]);
        row[1].enabled = false;
        let space = FocusSpace { nodes: &row };
        let trapped = DefaultPolicy::default();

        assert_eq!(trapped.next(CLEAR, Navigation::Next, &space), Some(OK));
        assert_eq!(trapped.next(OK, Navigation::Prev, &space), Some(CLEAR));
    }

    #[test]
    fn unwrapped_tab_stops_at_the_ends() {
        let row = actions(&[CANCEL, OK]);
        let space = FocusSpace { nodes: &row };
        let open = DefaultPolicy {
            wrap: WrapMode::Never,
        };

        assert_eq!(open.next(OK, Navigation::Next, &space), None);
        assert_eq!(open.next(CANCEL, Navigation::Prev, &space), None);
    }

    #[test]
    fn tab_from_outside_the_scope_enters_at_an_end() {
        let row = actions(&[CLEAR, CANCEL, OK]);
        let space = FocusSpace { nodes: &row };
        let trapped = DefaultPolicy::default();

        assert_eq!(trapped.next(99, Navigation::Next, &space), Some(CLEAR));
        assert_eq!(trapped.next(99, Navigation::Prev, &space), Some(OK));
    }

    #[test]
    fn arrows_skip_disabled_and_fall_back_to_reading_order() {
        let mut row = actions(&[CLEAR, CANCEL, OK]);
        row[1].enabled = false;
        let space = FocusSpace { nodes: &row };
        let trapped = DefaultPolicy::default();

        assert_eq!(trapped.next(CLEAR, Navigation::Right, &space), Some(OK));
        // Nothing left of Clear: Shift+Tab order wraps to OK.
        assert_eq!(trapped.next(CLEAR, Navigation::Left, &space), Some(OK));
    }

    #[test]
    fn grid_horizontal_follows_reading_order() {
        let entries = grid(3, 7);
        let space = FocusSpace { nodes: &entries };

        assert_eq!(GridPolicy.next(2, Navigation::Right, &space), Some(3));
        assert_eq!(GridPolicy.next(3, Navigation::Left, &space), Some(2));
        assert_eq!(GridPolicy.next(6, Navigation::Right, &space), None);
        assert_eq!(GridPolicy.next(0, Navigation::Left, &space), None);
    }

    #[test]
    fn grid_vertical_keeps_column_and_stops_at_edges() {
        let entries = grid(4, 10);
        let space = FocusSpace { nodes: &entries };

        assert_eq!(GridPolicy.next(1, Navigation::Down, &space), Some(5));
        assert_eq!(GridPolicy.next(5, Navigation::Up, &space), Some(1));
        assert_eq!(GridPolicy.next(2, Navigation::Up, &space), None);
        // The last row only has cells 8 and 9; nothing lines up below 7 or 6.
        assert_eq!(GridPolicy.next(7, Navigation::Down, &space), None);
        assert_eq!(GridPolicy.next(6, Navigation::Down, &space), None);
        assert_eq!(GridPolicy.next(5, Navigation::Down, &space), Some(9));
    }

    #[test]
    fn grid_vertical_skips_disabled_cells() {
        let mut entries = grid(3, 9);
        entries[4].enabled = false;
        let space = FocusSpace { nodes: &entries };

        // Straight down from 1 is disabled; the next enabled cell in the column
        // wins over the diagonal neighbors.
        assert_eq!(GridPolicy.next(1, Navigation::Down, &space), Some(7));
    }

    #[test]
    fn grid_moves_away_from_a_disabled_origin() {
        let mut entries = grid(3, 6);
        entries[1].enabled = false;
        let space = FocusSpace { nodes: &entries };

        assert_eq!(GridPolicy.next(1, Navigation::Right, &space), Some(2));
        assert_eq!(GridPolicy.next(1, Navigation::Down, &space), Some(4));
        assert_eq!(GridPolicy.next(42, Navigation::Right, &space), None);
    }
}
