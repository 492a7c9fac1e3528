// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation variant handed down the render tree.

/// Presentation family a picker is rendered in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapperVariant {
    /// Modal dialog, used on touch devices.
    Mobile,
    /// Panel anchored to the input, used with a precise pointer.
    Desktop,
    /// Rendered inline without any surrounding surface.
    Static,
}

impl WrapperVariant {
    /// The variant name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Static => "static",
        }
    }
}

/// Ambient presentation context.
///
/// Wrappers create one from the presentation they picked and pass it down to
/// the views they render, so leaf components such as year cells can adapt their
/// layout without taking the variant as a prop. Content rendered outside any
/// wrapper uses [`WrapperContext::default`], which carries no variant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WrapperContext {
    variant: Option<WrapperVariant>,
}

impl WrapperContext {
    /// Context for content rendered inside a wrapper of `variant`.
    pub fn new(variant: WrapperVariant) -> Self {
        Self {
            variant: Some(variant),
        }
    }

    /// The wrapper variant, if the content is inside a wrapper.
    pub fn variant(self) -> Option<WrapperVariant> {
        self.variant
    }

    /// Whether the content is rendered by the desktop wrapper.
    pub fn is_desktop(self) -> bool {
        self.variant == Some(WrapperVariant::Desktop)
    }
}
