// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A responsive year picker driven headlessly against an in-memory document.
//!
//! This example shows how to combine:
//! - `almanac_wrapper` to choose between the desktop and mobile presentations,
//! - `almanac_popper` for the anchored desktop panel (focus return, Escape, blur),
//! - `almanac_year` for the year grid and its keyboard focus.
//!
//! Run:
//! - `cargo run -p almanac_demos --example year_picker`
//! - `RUST_LOG=debug cargo run -p almanac_demos --example year_picker` to see the
//!   state machines' own logging.

use almanac_focus::{Document, FocusHost, Key};
use almanac_popper::{PickerPopper, PickerPopperProps, PopperRequest};
use almanac_wrapper::media::MediaEnvironment;
use almanac_wrapper::{Presentation, RESPONSIVE_POPPER_WRAPPER, ResponsiveProps, WrapperContext};
use almanac_year::{YearGrid, YearGridAction, YearGridProps};
use tracing::info;

/// Elements of the demo page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Node {
    Body,
    Input,
    Elsewhere,
    Paper,
    Year(i32),
}

fn init_logging() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new("info"),
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn page(grid: &YearGrid) -> Document<Node> {
    let mut doc = Document::new();
    doc.insert(Node::Body, None);
    doc.insert(Node::Input, Some(Node::Body));
    doc.insert(Node::Elsewhere, Some(Node::Body));
    // The panel is portaled to the body.
    doc.insert(Node::Paper, Some(Node::Body));
    for cell in grid.cells() {
        doc.insert(Node::Year(cell.props().value), Some(Node::Paper));
    }
    doc
}

fn run_desktop(popper: &mut PickerPopper<Node>, grid: &mut YearGrid, ctx: WrapperContext) {
    let mut doc = page(grid);
    doc.set_active(Some(Node::Input));

    let opened = popper.set_open(true, &mut doc);
    info!(?opened, focus = ?doc.active_element(), "panel opening");
    let opened = popper.on_transition_entered();
    info!(?opened, view = ?popper.view(), "panel open");

    grid.commit(&mut doc, Node::Year);
    info!(focus = ?doc.active_element(), "grid mounted");

    for key in [Key::ArrowRight, Key::ArrowDown, Key::Enter] {
        let action = grid.on_key_down(key, ctx);
        grid.commit(&mut doc, Node::Year);
        info!(?key, ?action, focus = ?doc.active_element(), "key handled");
        if let Some(YearGridAction::Select(year)) = action {
            info!(year, "picked, closing");
            popper.set_open(false, &mut doc);
            popper.on_transition_exited();
        }
    }
    info!(focus = ?doc.active_element(), "focus returned after close");

    // Reopen, then move focus outside: the deferred blur check asks to close.
    popper.set_open(true, &mut doc);
    popper.on_transition_entered();
    grid.commit(&mut doc, Node::Year);
    if let Some(check) = popper.on_blur() {
        doc.set_active(Some(Node::Elsewhere));
        if popper.run_blur_check(check, &doc) == Some(PopperRequest::Close) {
            info!("focus left the panel, parent closes it");
            popper.set_open(false, &mut doc);
            popper.on_transition_exited();
        }
    }

    popper.set_open(true, &mut doc);
    if popper.on_global_key_down(Key::Escape) == Some(PopperRequest::Close) {
        info!("escape pressed, parent closes it");
        popper.set_open(false, &mut doc);
    }
}

fn main() {
    init_logging();

    let mut props = ResponsiveProps::new(YearGridProps {
        min_year: 2000,
        max_year: 2030,
        ..YearGridProps::new(2024)
    });
    props.mobile.clearable = true;
    let mut wrapper = RESPONSIVE_POPPER_WRAPPER.build(props);

    let environments = [
        ("laptop", MediaEnvironment::desktop(1280.0, 800.0)),
        ("phone", MediaEnvironment::touch(390.0, 844.0)),
    ];
    for (name, env) in environments {
        let Some(presentation) = wrapper.update_environment(&env) else {
            continue;
        };
        let ctx = presentation.context();
        info!(name, variant = ctx.variant().map(|v| v.as_str()), "presentation chosen");
        match presentation {
            Presentation::Desktop { props, shared, .. } => {
                let mut popper = PickerPopper::new(PickerPopperProps {
                    popper: props.popper,
                    transition: props.transition,
                    ..PickerPopperProps::new(Node::Paper, Some(Node::Input))
                });
                let mut grid = YearGrid::new(shared);
                run_desktop(&mut popper, &mut grid, ctx);
            }
            Presentation::Mobile { props, shared } => {
                let mut grid = YearGrid::new(shared);
                let columns = grid.columns(ctx);
                let first = grid.cells()[0].view(ctx);
                info!(
                    columns,
                    flex_basis = first.flex_basis,
                    actions = ?props.actions(),
                    "dialog layout"
                );
                let picked = grid.on_click(2027);
                info!(?picked, "tapped a year");
            }
        }
    }
}
