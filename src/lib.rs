//! Shape Grammar - the subdivision core of a voxel shape grammar
//!
//! A grammar describes structured content (building interiors, facades) as
//! rules that repeatedly split boxes into smaller boxes. This crate provides
//! the shape model and the `divide` rule: given a parent scope and an ordered
//! list of sized child templates, it computes each child's extent and
//! placement.
//!
//! Parsing grammar text, choosing between alternative rules and walking the
//! shape tree are left to the caller.
//!
//! # Example
//!
//! ```rust
//! use shape_grammar::{DivideArg, DivideRule, Direction, IVec3, Scope, Shape, Transform};
//!
//! let rule = DivideRule::new(
//!     vec![
//!         DivideArg::relative(Shape::leaf("wall"), 0.7),
//!         DivideArg::relative(Shape::leaf("window"), 0.3),
//!     ],
//!     Direction::X,
//! )
//! .with_scope(Scope::new(IVec3::new(100, 10, 1), Transform::identity()));
//!
//! let children = rule.elements();
//! assert_eq!(children[0].extent(), IVec3::new(70, 10, 1));
//! assert_eq!(children[1].transform().translation(), IVec3::new(70, 0, 0));
//! ```

pub mod error;
pub mod geometry;
pub mod grammar;
pub mod scene;

pub use error::GrammarError;
pub use geometry::{Direction, Transform};
pub use glam::IVec3;
pub use grammar::{
    Diagnostic, DivideArg, DivideConfig, DivideRule, Leaf, Scope, Shape, Size, Symbol,
};
pub use scene::{Scene, SceneError};

/// Apply a divide rule to its current scope
///
/// With the default configuration this is exactly [`DivideRule::elements`].
/// When validation is enabled every diagnostic is logged; in strict mode a
/// rule with diagnostics is refused instead of subdivided.
///
/// # Example
///
/// ```rust
/// use shape_grammar::{subdivide, DivideArg, DivideConfig, DivideRule, Direction, Shape};
///
/// let empty = DivideRule::new(vec![], Direction::Y);
/// assert!(subdivide(&empty, &DivideConfig::default()).unwrap().is_empty());
///
/// let strict = DivideConfig::new().with_strict(true);
/// assert!(subdivide(&empty, &strict).is_err());
/// ```
pub fn subdivide(rule: &DivideRule, config: &DivideConfig) -> Result<Vec<Shape>, GrammarError> {
    if config.runs_validation() {
        let diagnostics = rule.validate();
        for diagnostic in &diagnostics {
            tracing::warn!(direction = %rule.direction(), "{}", diagnostic);
        }
        if config.strict && !diagnostics.is_empty() {
            return Err(GrammarError::Rejected(diagnostics));
        }
    }

    Ok(rule.elements())
}
