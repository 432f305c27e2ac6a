//! Scroll direction, axis and sense
//!
//! A [`Direction`] names where content travels on screen. It fixes the
//! [`Axis`] the wrapper scrolls along and the default [`Sense`] of travel
//! along that axis. The sense actually used for wraparound is decided per
//! update from the sign of the step, via [`sense_from_speed`] for animation
//! frames and [`sense_from_delta`] for wheel input.

use std::fmt;
use std::str::FromStr;

use reel_core::Size;
use serde::{Deserialize, Serialize};

use crate::error::ParseDirectionError;

/// Where content travels on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Direction {
    /// "tb": content moves down
    TopToBottom,
    /// "bt": content moves up (default)
    #[default]
    BottomToTop,
    /// "lr": content moves right
    LeftToRight,
    /// "rl": content moves left
    RightToLeft,
}

/// The single dimension a direction scrolls along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

/// Signed direction of travel along the axis
///
/// `Forward` means the offset grows, which moves content toward the origin
/// (up or left); `Backward` means it shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Forward,
    Backward,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::TopToBottom,
        Direction::BottomToTop,
        Direction::LeftToRight,
        Direction::RightToLeft,
    ];

    /// Short code ("tb", "bt", "lr", "rl")
    pub fn code(self) -> &'static str {
        match self {
            Direction::TopToBottom => "tb",
            Direction::BottomToTop => "bt",
            Direction::LeftToRight => "lr",
            Direction::RightToLeft => "rl",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::LeftToRight | Direction::RightToLeft => Axis::Horizontal,
            Direction::TopToBottom | Direction::BottomToTop => Axis::Vertical,
        }
    }

    /// Default sense of travel for this direction
    pub fn sense(self) -> Sense {
        match self {
            Direction::BottomToTop | Direction::RightToLeft => Sense::Forward,
            Direction::TopToBottom | Direction::LeftToRight => Sense::Backward,
        }
    }

    /// Parse a direction, falling back to [`Direction::BottomToTop`]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|err: ParseDirectionError| {
            tracing::warn!("{}; falling back to \"bt\"", err);
            Direction::default()
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tb" | "top-to-bottom" => Ok(Direction::TopToBottom),
            "bt" | "bottom-to-top" => Ok(Direction::BottomToTop),
            "lr" | "left-to-right" => Ok(Direction::LeftToRight),
            "rl" | "right-to-left" => Ok(Direction::RightToLeft),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        Direction::parse_lenient(&s)
    }
}

impl From<Direction> for &'static str {
    fn from(direction: Direction) -> Self {
        direction.code()
    }
}

impl Axis {
    /// Component of `size` along this axis
    pub fn extent_of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }
}

impl Sense {
    /// +1.0 for forward, -1.0 for backward
    pub fn signum(self) -> f32 {
        match self {
            Sense::Forward => 1.0,
            Sense::Backward => -1.0,
        }
    }
}

/// Sense of a wheel update: non-negative deltas travel forward
pub fn sense_from_delta(delta: f32) -> Sense {
    if delta >= 0.0 {
        Sense::Forward
    } else {
        Sense::Backward
    }
}

/// Sense of an animation step: non-negative steps travel forward
pub fn sense_from_speed(speed: f32) -> Sense {
    if speed >= 0.0 {
        Sense::Forward
    } else {
        Sense::Backward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_per_direction() {
        for direction in Direction::ALL {
            let expected = match direction {
                Direction::LeftToRight | Direction::RightToLeft => Axis::Horizontal,
                _ => Axis::Vertical,
            };
            assert_eq!(direction.axis(), expected, "{direction}");
        }
    }

    #[test]
    fn test_default_sense_per_direction() {
        assert_eq!(Direction::BottomToTop.sense(), Sense::Forward);
        assert_eq!(Direction::RightToLeft.sense(), Sense::Forward);
        assert_eq!(Direction::TopToBottom.sense(), Sense::Backward);
        assert_eq!(Direction::LeftToRight.sense(), Sense::Backward);
    }

    #[test]
    fn test_parse_codes_and_names() {
        assert_eq!("tb".parse::<Direction>(), Ok(Direction::TopToBottom));
        assert_eq!(" BT ".parse::<Direction>(), Ok(Direction::BottomToTop));
        assert_eq!("left-to-right".parse::<Direction>(), Ok(Direction::LeftToRight));
        assert_eq!("rl".parse::<Direction>(), Ok(Direction::RightToLeft));
        assert_eq!(
            "diagonal".parse::<Direction>(),
            Err(ParseDirectionError("diagonal".to_string()))
        );
    }

    #[test]
    fn test_unknown_direction_falls_back_to_bottom_to_top() {
        assert_eq!(Direction::parse_lenient("sideways"), Direction::BottomToTop);
        assert_eq!(Direction::from(String::from("")), Direction::BottomToTop);
        assert_eq!(Direction::parse_lenient("sideways").axis(), Axis::Vertical);
    }

    #[test]
    fn test_sense_from_sign() {
        assert_eq!(sense_from_speed(1.0), Sense::Forward);
        assert_eq!(sense_from_speed(0.0), Sense::Forward);
        assert_eq!(sense_from_speed(-0.5), Sense::Backward);

        assert_eq!(sense_from_delta(120.0), Sense::Forward);
        assert_eq!(sense_from_delta(0.0), Sense::Forward);
        assert_eq!(sense_from_delta(-3.0), Sense::Backward);
    }

    #[test]
    fn test_axis_extent() {
        let size = Size::new(640.0, 300.0);
        assert_eq!(Axis::Horizontal.extent_of(size), 640.0);
        assert_eq!(Axis::Vertical.extent_of(size), 300.0);
    }
}
