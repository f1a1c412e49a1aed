//! Advisory checks for divide rules.
//!
//! Subdivision never refuses a rule; malformed sizes just produce degenerate
//! children. This pass reports what would go wrong so callers can decide
//! for themselves. It has no effect on [`DivideRule::elements`].

use thiserror::Error;

use crate::geometry::Direction;

use super::divide::DivideRule;
use super::size::Size;

/// Slack allowed when relative fractions are summed
const FRACTION_TOLERANCE: f32 = 1e-4;

/// A problem found in a divide rule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("divide rule has no arguments")]
    EmptyRule,

    /// Absolute sizes claim more than the scope has
    #[error("absolute sizes reserve {reserved} but the {axis} extent is only {extent}")]
    SizeOverflow {
        axis: Direction,
        reserved: i32,
        extent: i32,
    },

    /// Relative value outside `(0, 1]`
    #[error("argument {index} has relative size {value}, expected a fraction in (0, 1]")]
    InvalidFraction { index: usize, value: f32 },

    #[error("argument {index} has negative absolute size {length}")]
    NegativeSize { index: usize, length: i32 },

    /// Relative fractions add up to more than the whole
    #[error("relative sizes add up to {total}, more than the available space")]
    FractionOverflow { total: f32 },
}

impl DivideRule {
    /// Run every check against the rule and its current scope.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if self.args().is_empty() {
            diagnostics.push(Diagnostic::EmptyRule);
            return diagnostics;
        }

        let mut fraction_total = 0.0_f32;
        for (index, arg) in self.args().iter().enumerate() {
            match arg.size() {
                Size::Absolute(length) if length < 0 => {
                    diagnostics.push(Diagnostic::NegativeSize { index, length });
                }
                Size::Absolute(_) => {}
                Size::Relative(value) => {
                    if !(value > 0.0 && value <= 1.0) {
                        diagnostics.push(Diagnostic::InvalidFraction { index, value });
                    }
                    fraction_total += value;
                }
            }
        }

        let reserved = self.reserved();
        let extent = self.axis_length();
        if reserved > extent {
            diagnostics.push(Diagnostic::SizeOverflow {
                axis: self.direction(),
                reserved,
                extent,
            });
        }

        if fraction_total > 1.0 + FRACTION_TOLERANCE {
            diagnostics.push(Diagnostic::FractionOverflow {
                total: fraction_total,
            });
        }

        diagnostics
    }
}
