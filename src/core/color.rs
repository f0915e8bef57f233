//! Side tokens and control display colors
//!
//! Bilateral rigs encode their side in the first name token (`L`, `C`, `R`)
//! and color controls accordingly so animators can tell left from right at
//! a glance. Secondary colors mark the small per-point controls.

use serde::{Deserialize, Serialize};

/// Bilateral side of a control, encoded as the leading name token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    Left,
    #[default]
    Center,
    Right,
}

impl Side {
    /// One-letter name token for this side
    pub fn token(&self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Center => "C",
            Side::Right => "R",
        }
    }

    /// Parse a side token. Returns `None` for anything but `L`, `C`, `R`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Side::Left),
            "C" => Some(Side::Center),
            "R" => Some(Side::Right),
            _ => None,
        }
    }

    /// Parse a side token, silently normalizing unknown tokens to Center.
    ///
    /// This is policy, not an error: rigs named without a side prefix are
    /// treated as center rigs.
    pub fn parse_or_center(token: &str) -> Self {
        Self::parse(token).unwrap_or(Side::Center)
    }
}

/// Display color applied to control shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTag {
    Yellow,
    Blue,
    Red,
    Brown,
    Cyan,
    Pink,
    GreyDark,
}

/// Resolve the default color for a side
///
/// Primary palette colors the main tiers; the secondary palette is used
/// for the dense per-point controls so they read as subordinate.
pub fn color_for(side: Side, secondary: bool) -> ColorTag {
    if secondary {
        match side {
            Side::Center => ColorTag::Brown,
            Side::Left => ColorTag::Cyan,
            Side::Right => ColorTag::Pink,
        }
    } else {
        match side {
            Side::Center => ColorTag::Yellow,
            Side::Left => ColorTag::Blue,
            Side::Right => ColorTag::Red,
        }
    }
}
