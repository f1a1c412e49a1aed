//! Sizes of divide rule arguments

use std::fmt;
use std::str::FromStr;

use crate::error::GrammarError;

/// The extent one divide argument claims along the divide axis.
///
/// Absolute sizes are reserved before any relative size is computed.
/// Relative sizes are fractions of the space that is *still unclaimed* when
/// the argument is reached, not of the original total. No range checks are
/// made here; out-of-range values flow straight into the geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// A literal length in voxels
    Absolute(i32),
    /// A fraction of the remaining space, nominally in `(0, 1]`
    Relative(f32),
}

impl Size {
    pub fn absolute(value: i32) -> Self {
        Size::Absolute(value)
    }

    pub fn relative(fraction: f32) -> Self {
        Size::Relative(fraction)
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, Size::Absolute(_))
    }

    /// The raw value: a length for absolute sizes, a fraction for relative ones
    pub fn value(&self) -> f32 {
        match *self {
            Size::Absolute(length) => length as f32,
            Size::Relative(fraction) => fraction,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Size::Absolute(length) => write!(f, "{}", length),
            Size::Relative(fraction) => {
                // two decimals of a percent
                let percent = (f64::from(fraction) * 10_000.0).round() / 100.0;
                write!(f, "{}%", percent)
            }
        }
    }
}

impl FromStr for Size {
    type Err = GrammarError;

    /// `30` is absolute, `70%` and `0.7` are relative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || GrammarError::InvalidSize(s.to_string());

        if let Some(percent) = token.strip_suffix('%') {
            let percent: f32 = percent.trim().parse().map_err(|_| invalid())?;
            if !percent.is_finite() {
                return Err(invalid());
            }
            return Ok(Size::Relative(percent / 100.0));
        }
        if let Ok(length) = token.parse::<i32>() {
            return Ok(Size::Absolute(length));
        }
        match token.parse::<f32>() {
            Ok(fraction) if fraction.is_finite() => Ok(Size::Relative(fraction)),
            _ => Err(invalid()),
        }
    }
}
