//! Error types for the grammar core

use thiserror::Error;

use crate::grammar::Diagnostic;

/// Errors produced by the grammar core.
///
/// Subdivision itself never fails; these come from reading textual tokens
/// and from strict-mode validation.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// Axis name other than X, Y or Z
    #[error("unknown divide direction '{0}' (expected X, Y or Z)")]
    UnknownDirection(String),

    /// Size token that is neither an integer, a fraction nor a percentage
    #[error("invalid size '{0}' (expected an integer, a fraction or a percentage)")]
    InvalidSize(String),

    /// Strict mode refused to subdivide a rule with diagnostics
    #[error("divide rule rejected: {}", format_diagnostics(.0))]
    Rejected(Vec<Diagnostic>),
}

impl GrammarError {
    /// The diagnostics behind a strict-mode rejection
    pub fn diagnostics(&self) -> Option<&[Diagnostic]> {
        match self {
            Self::Rejected(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
