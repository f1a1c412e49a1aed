//! Shapes: nodes of the procedural content tree

use std::fmt;

use glam::IVec3;

use crate::geometry::Transform;

use super::divide::DivideRule;

/// Geometric state shared by every shape variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scope {
    /// Box extent; the sign of each component is the growth direction
    pub extent: IVec3,
    /// Placement relative to the parent frame
    pub transform: Transform,
    pub active: bool,
    /// Selection weight for an external rule-choice mechanism
    pub probability: f32,
}

impl Scope {
    pub fn new(extent: IVec3, transform: Transform) -> Self {
        Self {
            extent,
            transform,
            ..Self::default()
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            extent: IVec3::ZERO,
            transform: Transform::IDENTITY,
            active: true,
            probability: 1.0,
        }
    }
}

/// A terminal shape, e.g. a block or asset reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub name: String,
    pub scope: Scope,
}

/// A named non-terminal, expanded later by whoever drives the grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub scope: Scope,
}

/// A node in the shape tree.
///
/// Shapes are values: every builder consumes the shape and returns a new
/// one, and cloning copies all state including embedded rule templates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Leaf(Leaf),
    Symbol(Symbol),
    Divide(DivideRule),
}

impl Shape {
    pub fn leaf(name: impl Into<String>) -> Self {
        Shape::Leaf(Leaf {
            name: name.into(),
            scope: Scope::default(),
        })
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Shape::Symbol(Symbol {
            name: name.into(),
            scope: Scope::default(),
        })
    }

    pub fn scope(&self) -> &Scope {
        match self {
            Shape::Leaf(leaf) => &leaf.scope,
            Shape::Symbol(symbol) => &symbol.scope,
            Shape::Divide(rule) => rule.scope(),
        }
    }

    fn scope_mut(&mut self) -> &mut Scope {
        match self {
            Shape::Leaf(leaf) => &mut leaf.scope,
            Shape::Symbol(symbol) => &mut symbol.scope,
            Shape::Divide(rule) => rule.scope_mut(),
        }
    }

    pub fn extent(&self) -> IVec3 {
        self.scope().extent
    }

    pub fn transform(&self) -> Transform {
        self.scope().transform
    }

    pub fn is_active(&self) -> bool {
        self.scope().active
    }

    pub fn probability(&self) -> f32 {
        self.scope().probability
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        *self.scope_mut() = scope;
        self
    }

    pub fn with_extent(mut self, extent: IVec3) -> Self {
        self.scope_mut().extent = extent;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.scope_mut().transform = transform;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.scope_mut().active = active;
        self
    }

    pub fn with_probability(mut self, probability: f32) -> Self {
        self.scope_mut().probability = probability;
        self
    }

    /// Successor shapes for rule variants, `None` for leaves and symbols.
    pub fn expand(&self) -> Option<Vec<Shape>> {
        match self {
            Shape::Divide(rule) => Some(rule.elements()),
            Shape::Leaf(_) | Shape::Symbol(_) => None,
        }
    }

    /// Leaf or symbol name; rules have none
    pub fn name(&self) -> Option<&str> {
        match self {
            Shape::Leaf(leaf) => Some(&leaf.name),
            Shape::Symbol(symbol) => Some(&symbol.name),
            Shape::Divide(_) => None,
        }
    }
}

impl From<DivideRule> for Shape {
    fn from(rule: DivideRule) -> Self {
        Shape::Divide(rule)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Leaf(leaf) => write!(f, "{}", leaf.name),
            Shape::Symbol(symbol) => write!(f, "{}", symbol.name),
            Shape::Divide(rule) => write!(f, "{}", rule),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scope() {
        let scope = Scope::default();
        assert_eq!(scope.extent, IVec3::ZERO);
        assert!(scope.transform.is_identity());
        assert!(scope.active);
        assert_eq!(scope.probability, 1.0);
    }

    #[test]
    fn test_builders_replace_state() {
        let shape = Shape::leaf("door")
            .with_extent(IVec3::new(2, 3, 1))
            .with_transform(Transform::from_translation(IVec3::X))
            .with_active(false)
            .with_probability(0.25);

        assert_eq!(shape.extent(), IVec3::new(2, 3, 1));
        assert_eq!(shape.transform().translation(), IVec3::X);
        assert!(!shape.is_active());
        assert_eq!(shape.probability(), 0.25);
        assert_eq!(shape.name(), Some("door"));
    }

    #[test]
    fn test_builders_do_not_touch_the_source() {
        let original = Shape::symbol("wall").with_extent(IVec3::splat(4));
        let derived = original.clone().with_extent(IVec3::splat(8)).with_active(false);

        assert_eq!(original.extent(), IVec3::splat(4));
        assert!(original.is_active());
        assert_ne!(original, derived);
    }

    #[test]
    fn test_leaf_and_symbol_do_not_expand() {
        assert!(Shape::leaf("glass").expand().is_none());
        assert!(Shape::symbol("floor").expand().is_none());
    }

    #[test]
    fn test_leaf_and_symbol_with_same_name_differ() {
        assert_ne!(Shape::leaf("x"), Shape::symbol("x"));
    }

    #[test]
    fn test_display_is_the_reference() {
        assert_eq!(Shape::leaf("door").to_string(), "door");
        assert_eq!(Shape::symbol("floor").to_string(), "floor");
    }
}
