// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pick the desktop or mobile presentation from a media query.
//!
//! A [`ResponsiveWrapper`] owns the full [`ResponsiveProps`] but every
//! [`Presentation`] it renders carries exactly one branch's props: desktop
//! props when the desktop query matches, mobile props otherwise. Shared props
//! go to both. Props of the branch not chosen are dropped without a warning.
//!
//! ```rust
//! use almanac_wrapper::media::MediaEnvironment;
//! use almanac_wrapper::{DesktopKind, Presentation, RESPONSIVE_POPPER_WRAPPER, ResponsiveProps};
//!
//! let mut wrapper = RESPONSIVE_POPPER_WRAPPER.build(ResponsiveProps::new("date"));
//!
//! let shown = wrapper.update_environment(&MediaEnvironment::touch(390.0, 844.0));
//! assert!(matches!(shown, Some(Presentation::Mobile { .. })));
//!
//! let shown = wrapper.update_environment(&MediaEnvironment::desktop(1440.0, 900.0));
//! assert!(matches!(
//!     shown,
//!     Some(Presentation::Desktop { kind: DesktopKind::Popper, .. })
//! ));
//! ```

use tracing::{debug, trace, warn};

use crate::media::{MediaEnvironment, MediaQuery, MediaQueryState};
use crate::props::{DesktopProps, IS_TOUCH_DEVICE_MEDIA, MobileProps};
use crate::variant::{WrapperContext, WrapperVariant};

/// Which surface the desktop presentation uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DesktopKind {
    /// A popover attached to the input.
    Popover,
    /// A picker popper (see `almanac_popper`).
    Popper,
}

/// Everything a responsive wrapper can be configured with.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponsiveProps<S> {
    /// Query that selects the desktop presentation.
    pub desktop_mode_media_query: String,
    /// Desktop-only props.
    pub desktop: DesktopProps,
    /// Mobile-only props.
    pub mobile: MobileProps,
    /// Variant a static wrapper renders as; consumed here and forwarded to
    /// neither presentation.
    pub display_static_wrapper_as: Option<WrapperVariant>,
    /// Props forwarded to whichever presentation is chosen.
    pub shared: S,
}

impl<S> ResponsiveProps<S> {
    /// Default desktop/mobile props around `shared`.
    pub fn new(shared: S) -> Self {
        Self {
            desktop_mode_media_query: String::from(IS_TOUCH_DEVICE_MEDIA),
            desktop: DesktopProps::default(),
            mobile: MobileProps::default(),
            display_static_wrapper_as: None,
            shared,
        }
    }
}

impl<S: Default> Default for ResponsiveProps<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// The presentation a wrapper renders, with only that branch's props.
#[derive(Clone, Debug, PartialEq)]
pub enum Presentation<S> {
    /// Anchored desktop surface.
    Desktop {
        /// Surface used by this wrapper's desktop branch.
        kind: DesktopKind,
        /// Desktop-only props.
        props: DesktopProps,
        /// Shared props.
        shared: S,
    },
    /// Modal mobile dialog.
    Mobile {
        /// Mobile-only props.
        props: MobileProps,
        /// Shared props.
        shared: S,
    },
}

impl<S> Presentation<S> {
    /// The presentation family.
    pub fn variant(&self) -> WrapperVariant {
        match self {
            Self::Desktop { .. } => WrapperVariant::Desktop,
            Self::Mobile { .. } => WrapperVariant::Mobile,
        }
    }

    /// Context to pass to the content rendered inside this presentation.
    pub fn context(&self) -> WrapperContext {
        WrapperContext::new(self.variant())
    }

    /// Shared props, whichever branch was chosen.
    pub fn shared(&self) -> &S {
        match self {
            Self::Desktop { shared, .. } | Self::Mobile { shared, .. } => shared,
        }
    }
}

/// Builds responsive wrappers that pair one desktop surface with the mobile dialog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResponsiveWrapperFactory {
    desktop: DesktopKind,
}

/// Create a factory for wrappers whose desktop branch uses `desktop`.
pub const fn make_responsive_wrapper(desktop: DesktopKind) -> ResponsiveWrapperFactory {
    ResponsiveWrapperFactory { desktop }
}

/// Desktop popover, mobile dialog.
pub const RESPONSIVE_WRAPPER: ResponsiveWrapperFactory =
    make_responsive_wrapper(DesktopKind::Popover);

/// Desktop picker popper, mobile dialog.
pub const RESPONSIVE_POPPER_WRAPPER: ResponsiveWrapperFactory =
    make_responsive_wrapper(DesktopKind::Popper);

impl ResponsiveWrapperFactory {
    /// Surface used by the desktop branch.
    pub fn desktop_kind(self) -> DesktopKind {
        self.desktop
    }

    /// Create a wrapper for `props`.
    pub fn build<S: Clone>(self, props: ResponsiveProps<S>) -> ResponsiveWrapper<S> {
        ResponsiveWrapper::new(self.desktop, props)
    }
}

/// A responsive wrapper instance.
#[derive(Clone, Debug)]
pub struct ResponsiveWrapper<S> {
    kind: DesktopKind,
    props: ResponsiveProps<S>,
    media: MediaQueryState,
}

impl<S: Clone> ResponsiveWrapper<S> {
    /// Create a wrapper; use [`RESPONSIVE_WRAPPER`] or
    /// [`RESPONSIVE_POPPER_WRAPPER`] for the stock pairings.
    ///
    /// A query that does not parse falls back to [`IS_TOUCH_DEVICE_MEDIA`].
    pub fn new(kind: DesktopKind, props: ResponsiveProps<S>) -> Self {
        let media = MediaQueryState::new(parse_or_default(&props.desktop_mode_media_query));
        Self { kind, props, media }
    }

    /// Surface used by the desktop branch.
    pub fn desktop_kind(&self) -> DesktopKind {
        self.kind
    }

    /// Current props.
    pub fn props(&self) -> &ResponsiveProps<S> {
        &self.props
    }

    /// Replace the props. A changed query is re-parsed and must be re-evaluated
    /// with [`Self::update_environment`].
    pub fn set_props(&mut self, props: ResponsiveProps<S>) {
        if props.desktop_mode_media_query != self.props.desktop_mode_media_query {
            self.media = MediaQueryState::new(parse_or_default(&props.desktop_mode_media_query));
        }
        self.props = props;
    }

    /// Whether the desktop presentation is currently selected.
    pub fn is_desktop(&self) -> bool {
        self.media.matches()
    }

    /// Re-evaluate the query. Returns the new presentation when the selection flipped.
    pub fn update_environment(&mut self, env: &MediaEnvironment) -> Option<Presentation<S>> {
        let matches = self.media.update(env)?;
        debug!(
            query = self.media.query().as_str(),
            desktop = matches,
            "responsive wrapper switched presentation"
        );
        Some(self.render_for(matches))
    }

    /// Render for the last evaluated match state.
    pub fn render(&self) -> Presentation<S> {
        self.render_for(self.media.matches())
    }

    /// Render as if the desktop query evaluated to `desktop`.
    pub fn render_for(&self, desktop: bool) -> Presentation<S> {
        let props = &self.props;
        if desktop {
            if props.mobile != MobileProps::default() {
                trace!("mobile-only props dropped for the desktop presentation");
            }
            Presentation::Desktop {
                kind: self.kind,
                props: props.desktop.clone(),
                shared: props.shared.clone(),
            }
        } else {
            if props.desktop != DesktopProps::default() {
                trace!("desktop-only props dropped for the mobile presentation");
            }
            Presentation::Mobile {
                props: props.mobile.clone(),
                shared: props.shared.clone(),
            }
        }
    }
}

fn parse_or_default(source: &str) -> MediaQuery {
    MediaQuery::parse(source).unwrap_or_else(|err| {
        warn!(query = source, %err, "invalid desktop mode media query, using the default");
        MediaQuery::default()
    })
}
