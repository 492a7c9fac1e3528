// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Almanac Wrapper: responsive presentation selection for pickers.
//!
//! ## Overview
//!
//! A picker can be shown two ways: anchored to its input on desktop (a popover
//! or an `almanac_popper` panel), or as a modal dialog with OK/Cancel actions on
//! touch devices. [`ResponsiveWrapper`] chooses between them from a media query,
//! [`IS_TOUCH_DEVICE_MEDIA`] by default, and hands back a [`Presentation`] that
//! carries only the configuration the chosen branch understands.
//!
//! - [`media`]: parse and evaluate media queries, and track match changes.
//! - [`DesktopProps`] / [`MobileProps`]: the two configuration bundles.
//! - [`WrapperContext`]: the presentation variant passed down to the content so
//!   leaf views (year cells, for example) can adapt their layout.
//!
//! ## Example
//!
//! ```rust
//! use almanac_wrapper::media::MediaEnvironment;
//! use almanac_wrapper::{Presentation, RESPONSIVE_WRAPPER, ResponsiveProps};
//!
//! let mut props = ResponsiveProps::new(());
//! props.mobile.clearable = true;
//! props.mobile.clear_text = "Reset".into();
//!
//! let mut wrapper = RESPONSIVE_WRAPPER.build(props);
//! match wrapper.update_environment(&MediaEnvironment::touch(390.0, 844.0)) {
//!     Some(Presentation::Mobile { props, .. }) => {
//!         assert_eq!(props.actions()[0].1, "Reset");
//!     }
//!     other => panic!("unexpected presentation: {other:?}"),
//! }
//! ```

pub mod media;
mod props;
mod responsive;
mod variant;

pub use props::{
    DEFAULT_CANCEL_TEXT, DEFAULT_CLEAR_TEXT, DEFAULT_OK_TEXT, DEFAULT_TODAY_TEXT, DesktopProps,
    DialogAction, DialogProps, HorizontalOrigin, IS_TOUCH_DEVICE_MEDIA, MobileProps,
    PopoverOrigin, PopoverProps, VerticalOrigin,
};
pub use responsive::{
    DesktopKind, Presentation, RESPONSIVE_POPPER_WRAPPER, RESPONSIVE_WRAPPER, ResponsiveProps,
    ResponsiveWrapper, ResponsiveWrapperFactory, make_responsive_wrapper,
};
pub use variant::{WrapperContext, WrapperVariant};
