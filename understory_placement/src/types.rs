// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement requests, collision options, and placement results.

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size};

/// Side of the anchor the panel is placed against.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Side {
    /// Above the anchor.
    Top,
    /// Right of the anchor.
    Right,
    /// Below the anchor.
    #[default]
    Bottom,
    /// Left of the anchor.
    Left,
}

impl Side {
    /// The side across the anchor, used when a collision flips the panel.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true for `Top` and `Bottom`, whose main axis is vertical.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Alignment of the panel along the cross axis of its [`Side`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Align {
    /// Align the panel's leading edge with the anchor's leading edge.
    Start,
    /// Center the panel on the anchor.
    #[default]
    Center,
    /// Align the panel's trailing edge with the anchor's trailing edge.
    End,
}

impl Align {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

/// A placement request: which side, how to align, and how far away.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Placement {
    /// Preferred side of the anchor.
    pub side: Side,
    /// Alignment along the cross axis.
    pub align: Align,
    /// Gap in pixels between the anchor and the panel along the main axis.
    pub side_offset: f64,
    /// Shift in pixels along the cross axis, applied away from the aligned edge.
    pub align_offset: f64,
}

impl Placement {
    /// A placement with no offsets.
    pub const fn new(side: Side, align: Align) -> Self {
        Self {
            side,
            align,
            side_offset: 0.0,
            align_offset: 0.0,
        }
    }

    /// Set the main-axis gap.
    #[must_use]
    pub const fn with_side_offset(mut self, offset: f64) -> Self {
        self.side_offset = offset;
        self
    }

    /// Set the cross-axis shift.
    #[must_use]
    pub const fn with_align_offset(mut self, offset: f64) -> Self {
        self.align_offset = offset;
        self
    }

    /// The same request placed on the opposite side.
    #[must_use]
    pub const fn flipped(mut self) -> Self {
        self.side = self.side.opposite();
        self
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.align {
            Align::Center => f.write_str(self.side.as_str()),
            align => write!(f, "{}-{}", self.side.as_str(), align.as_str()),
        }
    }
}

/// Errors produced when parsing a `side[-align]` placement string.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParsePlacementError {
    /// The side segment was not one of `top`, `right`, `bottom`, `left`.
    #[error("unknown side {0:?}")]
    UnknownSide(alloc::string::String),
    /// The align segment was not one of `start`, `center`, `end`.
    #[error("unknown alignment {0:?}")]
    UnknownAlign(alloc::string::String),
    /// The input was empty.
    #[error("empty placement")]
    Empty,
}

impl FromStr for Side {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "" => Err(ParsePlacementError::Empty),
            other => Err(ParsePlacementError::UnknownSide(other.into())),
        }
    }
}

impl FromStr for Align {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => Err(ParsePlacementError::UnknownAlign(other.into())),
        }
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    /// Parses `"bottom"`, `"bottom-start"`, `"left-end"` and friends.
    /// Offsets are left at zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (side, align) = match s.split_once('-') {
            Some((side, align)) => (side.parse()?, align.parse()?),
            None => (s.parse()?, Align::Center),
        };
        Ok(Self::new(side, align))
    }
}

/// How [`compute_position_with`](crate::compute_position_with) reacts to the panel
/// leaving the viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collision {
    /// Distance kept from the viewport edge when clamping.
    pub margin: f64,
    /// Flip to the opposite side on main-axis overflow.
    pub flip: bool,
    /// Slide inward on whatever axis still overflows.
    pub clamp: bool,
}

impl Collision {
    /// Margin used by [`Collision::default`].
    pub const DEFAULT_MARGIN: f64 = 8.0;

    /// No collision handling at all; the primary placement is returned as is.
    pub const NONE: Self = Self {
        margin: 0.0,
        flip: false,
        clamp: false,
    };
}

impl Default for Collision {
    fn default() -> Self {
        Self {
            margin: Self::DEFAULT_MARGIN,
            flip: true,
            clamp: true,
        }
    }
}

/// Result of a placement computation, in viewport coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Positioned {
    /// Left edge of the panel.
    pub left: f64,
    /// Top edge of the panel.
    pub top: f64,
    /// The side actually used, after any collision flip.
    pub side: Side,
    /// False when the anchor or panel had no size yet and the result is only
    /// the anchor's top-left. Callers should retry on the next frame.
    pub settled: bool,
}

impl Positioned {
    /// The panel's top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The panel's rectangle for a given panel size.
    pub fn rect(&self, panel: Size) -> Rect {
        Rect::from_origin_size(self.origin(), panel)
    }

    /// True if the resolved side differs from `requested`.
    pub fn is_flipped_from(&self, requested: Side) -> bool {
        self.side != requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn side_opposites() {
        assert_eq!(Side::Top.opposite(), Side::Bottom);
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Bottom.opposite().opposite(), Side::Bottom);
        assert!(Side::Top.is_vertical());
        assert!(!Side::Right.is_vertical());
    }

    #[test]
    fn parse_side_and_align() {
        let p: Placement = "bottom-start".parse().unwrap();
        assert_eq!(p, Placement::new(Side::Bottom, Align::Start));
        let p: Placement = " left ".parse().unwrap();
        assert_eq!(p, Placement::new(Side::Left, Align::Center));
        let p: Placement = "top-end".parse().unwrap();
        assert_eq!(p.align, Align::End);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "middle".parse::<Placement>(),
            Err(ParsePlacementError::UnknownSide("middle".into()))
        );
        assert_eq!(
            "top-middle".parse::<Placement>(),
            Err(ParsePlacementError::UnknownAlign("middle".into()))
        );
        assert_eq!("".parse::<Placement>(), Err(ParsePlacementError::Empty));
    }

    #[test]
    fn display_matches_parse() {
        for s in ["top", "right-start", "bottom-end", "left"] {
            let p: Placement = s.parse().unwrap();
            assert_eq!(p.to_string(), s);
        }
    }

    #[test]
    fn flipped_keeps_offsets() {
        let p = Placement::new(Side::Bottom, Align::Start)
            .with_side_offset(4.0)
            .with_align_offset(2.0)
            .flipped();
        assert_eq!(p.side, Side::Top);
        assert_eq!(p.side_offset, 4.0);
        assert_eq!(p.align_offset, 2.0);
    }
}
