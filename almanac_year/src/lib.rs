// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Almanac Year: the year view of a date picker.
//!
//! - [`YearCell`]: one selectable year. It reports activation (click, Space,
//!   Enter) as a returned value, takes keyboard focus when its parent marks it
//!   focused, and lays itself out from the ambient
//!   [`WrapperContext`](almanac_wrapper::WrapperContext).
//! - [`YearGrid`]: a range of cells with one focused year, moved with the arrow
//!   keys through [`almanac_focus::GridPolicy`].
//!
//! Both are headless: the host renders the returned views and calls
//! [`YearGrid::commit`] after each render so focus can follow.
//!
//! ## Example
//!
//! ```rust
//! use almanac_focus::{Document, Key};
//! use almanac_wrapper::{WrapperContext, WrapperVariant};
//! use almanac_year::{YearGrid, YearGridAction, YearGridProps};
//!
//! let ctx = WrapperContext::new(WrapperVariant::Desktop);
//! let mut grid = YearGrid::new(YearGridProps::new(2024));
//!
//! // Each year is a node of the host document.
//! let mut doc = Document::new();
//! for cell in grid.cells() {
//!     doc.insert(cell.props().value, None);
//! }
//!
//! grid.commit(&mut doc, |year| year);
//! assert_eq!(doc.focus_calls(), &[2024]);
//!
//! // Four years per row on desktop.
//! assert_eq!(grid.on_key_down(Key::ArrowDown, ctx), Some(YearGridAction::Focus(2028)));
//! grid.commit(&mut doc, |year| year);
//! assert_eq!(doc.focus_calls(), &[2024, 2028]);
//!
//! assert_eq!(grid.on_key_down(Key::Enter, ctx), Some(YearGridAction::Select(2028)));
//! assert_eq!(grid.cells()[128].view(ctx).label_test_id, "year-2028");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;
mod grid;

pub use cell::{YearCell, YearCellState, YearCellView, YearProps, years_per_row};
pub use grid::{
    DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, MAX_YEAR_SPAN, YearGrid, YearGridAction, YearGridProps,
};
