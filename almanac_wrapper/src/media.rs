// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media queries: parsing, evaluation, and change tracking.
//!
//! Queries are parsed with `lightningcss` and lowered into a small condition
//! tree evaluated against a [`MediaEnvironment`]. Everything the Media Queries
//! Level 4 grammar accepts parses: query lists, `not` and `only`, `and`/`or`
//! conditions, and range syntax such as `(400px < width <= 800px)`.
//!
//! Evaluated features are `width`, `height`, `aspect-ratio`, `orientation`,
//! `resolution`, `pointer`, `any-pointer`, `hover`, `any-hover`, `color`,
//! `monochrome`, `prefers-reduced-motion` and `prefers-color-scheme`.
//! Features, values and media types outside that set never match, which is how
//! browsers treat what they do not support. `em` and `rem` are 16px.
//!
//! ```rust
//! use almanac_wrapper::media::{MediaEnvironment, MediaQuery};
//!
//! let query = MediaQuery::parse("@media (width >= 720px) and (hover: hover)").unwrap();
//! assert!(query.matches(&MediaEnvironment::desktop(1280.0, 800.0)));
//! assert!(!query.matches(&MediaEnvironment::touch(1280.0, 800.0)));
//! ```

use lightningcss::media_query::{
    MediaCondition, MediaFeature, MediaFeatureComparison, MediaFeatureId, MediaFeatureName,
    MediaFeatureValue, MediaList, MediaQuery as CssMediaQuery, MediaType as CssMediaType,
    Operator, Qualifier,
};
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::values::length::{Length, LengthValue};
use lightningcss::values::resolution::Resolution;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

use crate::IS_TOUCH_DEVICE_MEDIA;

/// Pixels per `em`/`rem`.
const PX_PER_EM: f64 = 16.0;

/// CSS pixels per inch.
const PX_PER_INCH: f64 = 96.0;

/// Centimetres per inch.
const CM_PER_INCH: f64 = 2.54;

/// Errors produced while parsing a media query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaQueryError {
    /// The query contains no conditions at all.
    #[error("media query is empty")]
    Empty,
    /// The text holds more than a query list, such as a rule block.
    #[error("`{0}` is not a media query list")]
    NotAQueryList(String),
    /// The CSS parser rejected the query.
    #[error("invalid media query: {0}")]
    Syntax(String),
}

/// Accuracy of a pointing device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pointer {
    /// No pointing device.
    None,
    /// Limited accuracy, such as a finger on a touchscreen.
    Coarse,
    /// Accurate, such as a mouse or a stylus.
    Fine,
}

/// Whether a device can hover over elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Hover {
    /// Cannot hover.
    None,
    /// Can hover.
    Hover,
}

/// Viewport orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Height is greater than or equal to width.
    Portrait,
    /// Width is greater than height.
    Landscape,
}

/// Preferred color scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
}

/// Output medium.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// Any medium.
    #[default]
    All,
    /// Screens.
    Screen,
    /// Printed pages and print preview.
    Print,
}

/// Device and viewport characteristics a query is evaluated against.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaEnvironment {
    /// Output medium.
    pub media_type: MediaType,
    /// Viewport width in CSS pixels.
    pub width: f64,
    /// Viewport height in CSS pixels.
    pub height: f64,
    /// Device pixels per CSS pixel.
    pub resolution: f64,
    /// Primary pointing device.
    pub pointer: Pointer,
    /// Every available pointing device.
    pub any_pointer: SmallVec<[Pointer; 2]>,
    /// Hover capability of the primary pointing device.
    pub hover: Hover,
    /// Whether any available device can hover.
    pub any_hover: Hover,
    /// Bits per color component; `0` on monochrome devices.
    pub color: u32,
    /// Bits per pixel of a monochrome device; `0` on color devices.
    pub monochrome: u32,
    /// The user asked for less motion.
    pub prefers_reduced_motion: bool,
    /// Preferred color scheme.
    pub color_scheme: ColorScheme,
}

impl MediaEnvironment {
    /// A screen with a mouse.
    pub fn desktop(width: f64, height: f64) -> Self {
        Self {
            media_type: MediaType::Screen,
            width,
            height,
            resolution: 1.0,
            pointer: Pointer::Fine,
            any_pointer: SmallVec::from_slice(&[Pointer::Fine]),
            hover: Hover::Hover,
            any_hover: Hover::Hover,
            color: 8,
            monochrome: 0,
            prefers_reduced_motion: false,
            color_scheme: ColorScheme::Light,
        }
    }

    /// A high density touchscreen without any other pointing device.
    pub fn touch(width: f64, height: f64) -> Self {
        Self {
            resolution: 3.0,
            pointer: Pointer::Coarse,
            any_pointer: SmallVec::from_slice(&[Pointer::Coarse]),
            hover: Hover::None,
            any_hover: Hover::None,
            ..Self::desktop(width, height)
        }
    }

    /// Orientation derived from the viewport size.
    pub fn orientation(&self) -> Orientation {
        if self.height >= self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Width over height; `0` for an empty viewport.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Comparison {
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Comparison {
    fn from_css(op: MediaFeatureComparison) -> Self {
        match op {
            MediaFeatureComparison::Equal => Self::Equal,
            MediaFeatureComparison::LessThan => Self::Less,
            MediaFeatureComparison::LessThanEqual => Self::LessEqual,
            MediaFeatureComparison::GreaterThan => Self::Greater,
            MediaFeatureComparison::GreaterThanEqual => Self::GreaterEqual,
        }
    }

    /// The same comparison with its operands swapped: `a < x` is `x > a`.
    fn flipped(self) -> Self {
        match self {
            Self::Equal => Self::Equal,
            Self::Less => Self::Greater,
            Self::LessEqual => Self::GreaterEqual,
            Self::Greater => Self::Less,
            Self::GreaterEqual => Self::LessEqual,
        }
    }

    fn holds(self, actual: f64, expected: f64) -> bool {
        match self {
            Self::Equal => (actual - expected).abs() <= 1e-6,
            Self::Less => actual < expected,
            Self::LessEqual => actual <= expected,
            Self::Greater => actual > expected,
            Self::GreaterEqual => actual >= expected,
        }
    }
}

/// A lowered query list.
#[derive(Clone, Debug, PartialEq)]
enum Condition {
    Always,
    Never,
    Not(Box<Self>),
    And(Vec<Self>),
    Or(Vec<Self>),
    Type(MediaType),
    /// `None` is the boolean form `(pointer)`.
    Pointer(Option<Pointer>),
    AnyPointer(Option<Pointer>),
    Hover(Option<Hover>),
    AnyHover(Option<Hover>),
    Orientation(Orientation),
    ReducedMotion(bool),
    ColorScheme(ColorScheme),
    Width(Comparison, f64),
    Height(Comparison, f64),
    AspectRatio(Comparison, f64),
    /// Dots per CSS pixel.
    Resolution(Comparison, f64),
    Color(Comparison, f64),
    Monochrome(Comparison, f64),
}

impl Condition {
    fn matches(&self, env: &MediaEnvironment) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Not(inner) => !inner.matches(env),
            Self::And(all) => all.iter().all(|c| c.matches(env)),
            Self::Or(any) => any.iter().any(|c| c.matches(env)),
            Self::Type(t) => env.media_type == *t,
            Self::Pointer(Some(p)) => env.pointer == *p,
            Self::Pointer(None) => env.pointer != Pointer::None,
            Self::AnyPointer(Some(p)) => env.any_pointer.contains(p),
            Self::AnyPointer(None) => env.any_pointer.iter().any(|&p| p != Pointer::None),
            Self::Hover(Some(h)) => env.hover == *h,
            Self::Hover(None) => env.hover == Hover::Hover,
            Self::AnyHover(Some(h)) => env.any_hover == *h,
            Self::AnyHover(None) => env.any_hover == Hover::Hover,
            Self::Orientation(o) => env.orientation() == *o,
            Self::ReducedMotion(reduce) => env.prefers_reduced_motion == *reduce,
            Self::ColorScheme(scheme) => env.color_scheme == *scheme,
            Self::Width(cmp, px) => cmp.holds(env.width, *px),
            Self::Height(cmp, px) => cmp.holds(env.height, *px),
            Self::AspectRatio(cmp, ratio) => cmp.holds(env.aspect_ratio(), *ratio),
            Self::Resolution(cmp, dppx) => cmp.holds(env.resolution, *dppx),
            Self::Color(cmp, bits) => cmp.holds(f64::from(env.color), *bits),
            Self::Monochrome(cmp, bits) => cmp.holds(f64::from(env.monochrome), *bits),
        }
    }
}

/// A parsed media query list.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaQuery {
    source: String,
    condition: Condition,
}

impl MediaQuery {
    /// Parse a media query such as `"@media (pointer: fine)"`.
    ///
    /// The leading `@media` is optional.
    pub fn parse(source: &str) -> Result<Self, MediaQueryError> {
        let text = strip_at_media(source.trim()).trim();
        if text.is_empty() {
            return Err(MediaQueryError::Empty);
        }
        if text.contains(['{', '}', ';']) {
            return Err(MediaQueryError::NotAQueryList(text.to_owned()));
        }

        let css = format!("@media {text} {{}}");
        let sheet = StyleSheet::parse(&css, ParserOptions::default())
            .map_err(|err| MediaQueryError::Syntax(err.to_string()))?;
        let [CssRule::Media(rule)] = sheet.rules.0.as_slice() else {
            return Err(MediaQueryError::NotAQueryList(text.to_owned()));
        };

        Ok(Self {
            source: source.to_owned(),
            condition: lower_list(&rule.query),
        })
    }

    /// The text this query was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the environment satisfies any query in the list.
    pub fn matches(&self, env: &MediaEnvironment) -> bool {
        self.condition.matches(env)
    }
}

impl Default for MediaQuery {
    /// [`IS_TOUCH_DEVICE_MEDIA`], built directly rather than parsed.
    fn default() -> Self {
        Self {
            source: IS_TOUCH_DEVICE_MEDIA.to_owned(),
            condition: Condition::Pointer(Some(Pointer::Fine)),
        }
    }
}

/// Reactive match state of one query, the way a `useMediaQuery` hook tracks it.
#[derive(Clone, Debug)]
pub struct MediaQueryState {
    query: MediaQuery,
    matches: Option<bool>,
}

impl MediaQueryState {
    /// Track `query`; nothing has been evaluated yet.
    pub fn new(query: MediaQuery) -> Self {
        Self {
            query,
            matches: None,
        }
    }

    /// The tracked query.
    pub fn query(&self) -> &MediaQuery {
        &self.query
    }

    /// Last evaluated match state; `false` before the first evaluation.
    pub fn matches(&self) -> bool {
        self.matches.unwrap_or(false)
    }

    /// Re-evaluate against `env`.
    ///
    /// Returns the new state when it differs from the previous one (the first
    /// evaluation always counts as a change), which is the caller's cue to
    /// re-render.
    pub fn update(&mut self, env: &MediaEnvironment) -> Option<bool> {
        let now = self.query.matches(env);
        if self.matches == Some(now) {
            return None;
        }
        self.matches = Some(now);
        Some(now)
    }
}

fn strip_at_media(text: &str) -> &str {
    match text.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("@media") => &text[6..],
        _ => text,
    }
}

fn lower_list(list: &MediaList<'_>) -> Condition {
    match list.media_queries.as_slice() {
        [] => Condition::Always,
        [query] => lower_query(query),
        queries => Condition::Or(queries.iter().map(lower_query).collect()),
    }
}

fn lower_query(query: &CssMediaQuery<'_>) -> Condition {
    let media_type = match &query.media_type {
        CssMediaType::All => None,
        CssMediaType::Screen => Some(Condition::Type(MediaType::Screen)),
        CssMediaType::Print => Some(Condition::Type(MediaType::Print)),
        _ => {
            trace!("unknown media type never matches");
            Some(Condition::Never)
        }
    };
    let condition = query.condition.as_ref().map(lower_condition);
    let lowered = match (media_type, condition) {
        (None, None) => Condition::Always,
        (Some(only), None) | (None, Some(only)) => only,
        (Some(media_type), Some(condition)) => Condition::And(vec![media_type, condition]),
    };
    match query.qualifier {
        Some(Qualifier::Not) => Condition::Not(Box::new(lowered)),
        _ => lowered,
    }
}

fn lower_condition(condition: &MediaCondition<'_>) -> Condition {
    match condition {
        MediaCondition::Feature(feature) => lower_feature(feature),
        MediaCondition::Not(inner) => Condition::Not(Box::new(lower_condition(inner))),
        MediaCondition::Operation {
            operator,
            conditions,
        } => {
            let parts = conditions.iter().map(lower_condition).collect();
            match operator {
                Operator::And => Condition::And(parts),
                Operator::Or => Condition::Or(parts),
            }
        }
        #[allow(
            unreachable_patterns,
            reason = "lightningcss adds condition kinds between releases"
        )]
        _ => Condition::Never,
    }
}

fn lower_feature(feature: &MediaFeature<'_>) -> Condition {
    match feature {
        MediaFeature::Plain { name, value } => {
            lower_test(name, Some((Comparison::Equal, value)))
        }
        MediaFeature::Range {
            name,
            operator,
            value,
        } => lower_test(name, Some((Comparison::from_css(*operator), value))),
        MediaFeature::Interval {
            name,
            start,
            start_operator,
            end,
            end_operator,
        } => Condition::And(vec![
            lower_test(
                name,
                Some((Comparison::from_css(*start_operator).flipped(), start)),
            ),
            lower_test(name, Some((Comparison::from_css(*end_operator), end))),
        ]),
        MediaFeature::Boolean { name } => lower_test(name, None),
    }
}

/// Lower one feature test; `None` is the boolean form `(feature)`.
fn lower_test(
    name: &MediaFeatureName<'_, MediaFeatureId>,
    test: Option<(Comparison, &MediaFeatureValue<'_>)>,
) -> Condition {
    let MediaFeatureName::Standard(id) = name else {
        trace!("non-standard media feature never matches");
        return Condition::Never;
    };
    let lowered = match (id, test) {
        (MediaFeatureId::Width | MediaFeatureId::DeviceWidth, Some((cmp, value))) => {
            length_px(value).map(|px| Condition::Width(cmp, px))
        }
        (MediaFeatureId::Width | MediaFeatureId::DeviceWidth, None) => {
            Some(Condition::Width(Comparison::Greater, 0.0))
        }
        (MediaFeatureId::Height | MediaFeatureId::DeviceHeight, Some((cmp, value))) => {
            length_px(value).map(|px| Condition::Height(cmp, px))
        }
        (MediaFeatureId::Height | MediaFeatureId::DeviceHeight, None) => {
            Some(Condition::Height(Comparison::Greater, 0.0))
        }
        (
            MediaFeatureId::AspectRatio | MediaFeatureId::DeviceAspectRatio,
            Some((cmp, value)),
        ) => ratio(value).map(|r| Condition::AspectRatio(cmp, r)),
        (MediaFeatureId::AspectRatio | MediaFeatureId::DeviceAspectRatio, None) => {
            Some(Condition::AspectRatio(Comparison::Greater, 0.0))
        }
        (MediaFeatureId::Resolution, Some((cmp, value))) => {
            dppx(value).map(|d| Condition::Resolution(cmp, d))
        }
        (MediaFeatureId::Resolution, None) => {
            Some(Condition::Resolution(Comparison::Greater, 0.0))
        }
        (MediaFeatureId::Color, Some((cmp, value))) => {
            number(value).map(|bits| Condition::Color(cmp, bits))
        }
        (MediaFeatureId::Color, None) => Some(Condition::Color(Comparison::Greater, 0.0)),
        (MediaFeatureId::Monochrome, Some((cmp, value))) => {
            number(value).map(|bits| Condition::Monochrome(cmp, bits))
        }
        (MediaFeatureId::Monochrome, None) => {
            Some(Condition::Monochrome(Comparison::Greater, 0.0))
        }
        (MediaFeatureId::Orientation, Some((Comparison::Equal, value))) => {
            ident(value).and_then(|v| match v {
                "portrait" => Some(Condition::Orientation(Orientation::Portrait)),
                "landscape" => Some(Condition::Orientation(Orientation::Landscape)),
                _ => None,
            })
        }
        (MediaFeatureId::Pointer, Some((Comparison::Equal, value))) => {
            ident(value).and_then(pointer).map(|p| Condition::Pointer(Some(p)))
        }
        (MediaFeatureId::Pointer, None) => Some(Condition::Pointer(None)),
        (MediaFeatureId::AnyPointer, Some((Comparison::Equal, value))) => {
            ident(value).and_then(pointer).map(|p| Condition::AnyPointer(Some(p)))
        }
        (MediaFeatureId::AnyPointer, None) => Some(Condition::AnyPointer(None)),
        (MediaFeatureId::Hover, Some((Comparison::Equal, value))) => {
            ident(value).and_then(hover).map(|h| Condition::Hover(Some(h)))
        }
        (MediaFeatureId::Hover, None) => Some(Condition::Hover(None)),
        (MediaFeatureId::AnyHover, Some((Comparison::Equal, value))) => {
            ident(value).and_then(hover).map(|h| Condition::AnyHover(Some(h)))
        }
        (MediaFeatureId::AnyHover, None) => Some(Condition::AnyHover(None)),
        (MediaFeatureId::PrefersReducedMotion, Some((Comparison::Equal, value))) => {
            ident(value).and_then(|v| match v {
                "reduce" => Some(Condition::ReducedMotion(true)),
                "no-preference" => Some(Condition::ReducedMotion(false)),
                _ => None,
            })
        }
        (MediaFeatureId::PrefersReducedMotion, None) => Some(Condition::ReducedMotion(true)),
        (MediaFeatureId::PrefersColorScheme, Some((Comparison::Equal, value))) => {
            ident(value).and_then(|v| match v {
                "light" => Some(Condition::ColorScheme(ColorScheme::Light)),
                "dark" => Some(Condition::ColorScheme(ColorScheme::Dark)),
                _ => None,
            })
        }
        _ => None,
    };
    lowered.unwrap_or_else(|| {
        trace!(feature = ?id, "unsupported media feature test never matches");
        Condition::Never
    })
}

fn length_px(value: &MediaFeatureValue<'_>) -> Option<f64> {
    let MediaFeatureValue::Length(length) = value else {
        return None;
    };
    match length {
        Length::Value(LengthValue::Em(n) | LengthValue::Rem(n)) => {
            Some(f64::from(*n) * PX_PER_EM)
        }
        other => other.to_px().map(f64::from),
    }
}

fn dppx(value: &MediaFeatureValue<'_>) -> Option<f64> {
    let MediaFeatureValue::Resolution(resolution) = value else {
        return None;
    };
    Some(match resolution {
        Resolution::Dpi(n) => f64::from(*n) / PX_PER_INCH,
        Resolution::Dpcm(n) => f64::from(*n) * CM_PER_INCH / PX_PER_INCH,
        Resolution::Dppx(n) => f64::from(*n),
    })
}

fn ratio(value: &MediaFeatureValue<'_>) -> Option<f64> {
    match value {
        MediaFeatureValue::Ratio(r) if r.1 > 0.0 => Some(f64::from(r.0) / f64::from(r.1)),
        _ => number(value),
    }
}

fn number(value: &MediaFeatureValue<'_>) -> Option<f64> {
    match value {
        MediaFeatureValue::Integer(n) => Some(f64::from(*n)),
        MediaFeatureValue::Number(n) => Some(f64::from(*n)),
        _ => None,
    }
}

fn ident<'a>(value: &'a MediaFeatureValue<'_>) -> Option<&'a str> {
    match value {
        MediaFeatureValue::Ident(i) => Some(i.0.as_ref()),
        _ => None,
    }
}

fn pointer(value: &str) -> Option<Pointer> {
    match value {
        "none" => Some(Pointer::None),
        "coarse" => Some(Pointer::Coarse),
        "fine" => Some(Pointer::Fine),
        _ => None,
    }
}

fn hover(value: &str) -> Option<Hover> {
    match value {
        "none" => Some(Hover::None),
        "hover" => Some(Hover::Hover),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_tracks_pointer_precision() {
        let query = MediaQuery::parse(IS_TOUCH_DEVICE_MEDIA).unwrap();
        assert!(query.matches(&MediaEnvironment::desktop(320.0, 640.0)));
        assert!(!query.matches(&MediaEnvironment::touch(1920.0, 1080.0)));
    }

    #[test]
    fn default_query_is_built_without_parsing() {
        let built = MediaQuery::default();
        let parsed = MediaQuery::parse(IS_TOUCH_DEVICE_MEDIA).unwrap();
        assert_eq!(built.as_str(), IS_TOUCH_DEVICE_MEDIA);
        for env in [
            MediaEnvironment::desktop(1280.0, 800.0),
            MediaEnvironment::touch(390.0, 844.0),
        ] {
            assert_eq!(built.matches(&env), parsed.matches(&env));
        }
    }

    #[test]
    fn breakpoint_queries_compare_viewport_width() {
        let query = MediaQuery::parse("@media (min-width:600px)").unwrap();
        assert!(query.matches(&MediaEnvironment::touch(600.0, 900.0)));
        assert!(!query.matches(&MediaEnvironment::touch(599.0, 900.0)));

        let query = MediaQuery::parse("(max-width: 45em)").unwrap();
        assert!(query.matches(&MediaEnvironment::desktop(720.0, 900.0)));
        assert!(!query.matches(&MediaEnvironment::desktop(721.0, 900.0)));
    }

    #[test]
    fn range_syntax() {
        let query = MediaQuery::parse("(width >= 720px)").unwrap();
        assert!(query.matches(&MediaEnvironment::desktop(720.0, 900.0)));
        assert!(!query.matches(&MediaEnvironment::desktop(719.0, 900.0)));

        let query = MediaQuery::parse("(400px < width <= 800px)").unwrap();
        assert!(!query.matches(&MediaEnvironment::touch(400.0, 900.0)));
        assert!(query.matches(&MediaEnvironment::touch(401.0, 900.0)));
        assert!(query.matches(&MediaEnvironment::touch(800.0, 900.0)));
        assert!(!query.matches(&MediaEnvironment::touch(801.0, 900.0)));
    }

    #[test]
    fn lists_negation_and_media_types() {
        let query = MediaQuery::parse("print, (hover: hover)").unwrap();
        assert!(query.matches(&MediaEnvironment::desktop(100.0, 100.0)));
        assert!(!query.matches(&MediaEnvironment::touch(100.0, 100.0)));

        let query = MediaQuery::parse("not screen and (pointer: coarse)").unwrap();
        assert!(query.matches(&MediaEnvironment::desktop(100.0, 100.0)));
        assert!(!query.matches(&MediaEnvironment::touch(100.0, 100.0)));

        let query = MediaQuery::parse("only screen and (orientation: landscape)").unwrap();
        assert!(query.matches(&MediaEnvironment::touch(800.0, 400.0)));
        assert!(!query.matches(&MediaEnvironment::touch(400.0, 800.0)));

        let query = MediaQuery::parse("not all and (monochrome)").unwrap();
        let mut env = MediaEnvironment::desktop(100.0, 100.0);
        assert!(query.matches(&env));
        env.color = 0;
        env.monochrome = 1;
        assert!(!query.matches(&env));
    }

    #[test]
    fn or_and_not_conditions() {
        let query = MediaQuery::parse("(pointer: coarse) or (width < 600px)").unwrap();
        assert!(query.matches(&MediaEnvironment::touch(1024.0, 768.0)));
        assert!(query.matches(&MediaEnvironment::desktop(500.0, 768.0)));
        assert!(!query.matches(&MediaEnvironment::desktop(1024.0, 768.0)));

        let query = MediaQuery::parse("not (hover: hover)").unwrap();
        assert!(query.matches(&MediaEnvironment::touch(100.0, 100.0)));
        assert!(!query.matches(&MediaEnvironment::desktop(100.0, 100.0)));
    }

    #[test]
    fn display_and_preference_features() {
        let query = MediaQuery::parse("(min-resolution: 2dppx)").unwrap();
        assert!(query.matches(&MediaEnvironment::touch(390.0, 844.0)));
        assert!(!query.matches(&MediaEnvironment::desktop(1280.0, 800.0)));
        assert!(
            MediaQuery::parse("(resolution: 96dpi)")
                .unwrap()
                .matches(&MediaEnvironment::desktop(1280.0, 800.0))
        );

        let query = MediaQuery::parse("(prefers-reduced-motion: reduce)").unwrap();
        let mut env = MediaEnvironment::desktop(1280.0, 800.0);
        assert!(!query.matches(&env));
        env.prefers_reduced_motion = true;
        assert!(query.matches(&env));

        let query = MediaQuery::parse("(prefers-color-scheme: dark)").unwrap();
        assert!(!query.matches(&env));
        env.color_scheme = ColorScheme::Dark;
        assert!(query.matches(&env));

        let query = MediaQuery::parse("(min-aspect-ratio: 16/10)").unwrap();
        assert!(query.matches(&env));
        assert!(!query.matches(&MediaEnvironment::desktop(800.0, 800.0)));
    }

    #[test]
    fn boolean_features_and_any_pointer() {
        let mut env = MediaEnvironment::touch(100.0, 100.0);
        env.any_pointer.push(Pointer::Fine);

        assert!(MediaQuery::parse("(pointer)").unwrap().matches(&env));
        assert!(!MediaQuery::parse("(hover)").unwrap().matches(&env));
        assert!(MediaQuery::parse("(color)").unwrap().matches(&env));
        assert!(
            MediaQuery::parse("(any-pointer: fine)")
                .unwrap()
                .matches(&env)
        );
    }

    #[test]
    fn unsupported_tests_never_match() {
        let env = MediaEnvironment::desktop(1280.0, 800.0);
        assert!(!MediaQuery::parse("tv").unwrap().matches(&env));
        assert!(!MediaQuery::parse("(pointer: sharp)").unwrap().matches(&env));
        assert!(!MediaQuery::parse("(color-gamut: p3)").unwrap().matches(&env));
        assert!(MediaQuery::parse("not tv").unwrap().matches(&env));
    }

    #[test]
    fn parse_errors_are_reported() {
        assert_eq!(MediaQuery::parse(""), Err(MediaQueryError::Empty));
        assert_eq!(MediaQuery::parse(" @MEDIA "), Err(MediaQueryError::Empty));
        assert_eq!(
            MediaQuery::parse("screen { a"),
            Err(MediaQueryError::NotAQueryList("screen { a".into()))
        );
        assert!(matches!(
            MediaQuery::parse("(min-width: 10px) & (hover)"),
            Err(MediaQueryError::Syntax(_))
        ));
    }

    #[test]
    fn state_reports_only_changes() {
        let query = MediaQuery::parse(IS_TOUCH_DEVICE_MEDIA).unwrap();
        let mut state = MediaQueryState::new(query);
        assert!(!state.matches());

        let desktop = MediaEnvironment::desktop(1024.0, 768.0);
        assert_eq!(state.update(&desktop), Some(true));
        assert_eq!(state.update(&desktop), None);
        assert!(state.matches());

        assert_eq!(
            state.update(&MediaEnvironment::touch(1024.0, 768.0)),
            Some(false)
        );
        assert!(!state.matches());
    }
}
