//! The divide rule: partition a scope along one axis
//!
//! ```text
//! divide X {
//!      30 door
//!      70% wall
//!      30% window
//! };
//! ```
//!
//! ## Sizing
//!
//! Absolute sizes are reserved up front, wherever they appear in the list.
//! What is left is shared by the relative arguments in a cascade: each one
//! takes its fraction of the space that is *still unclaimed*, rescaled by
//! the fractions already handed out, and rounded with a fixed `+0.49` bias.
//! For `70% / 30%` over 100 voxels the first child takes 70; the second then
//! sees 30 remaining and a divide factor of 0.3, so it takes `30 * 0.3/0.3`.
//!
//! ## Placement
//!
//! Children are laid out in declaration order. Each child's transform is the
//! parent's transform advanced by the space consumed so far, mapped through
//! the parent's rotation, so rotated parents lay their children out along
//! their own local axis.

use std::fmt;

use glam::IVec3;

use crate::geometry::{Direction, Transform};

use super::shape::{Scope, Shape};
use super::size::Size;

/// Rounding bias applied to every relative size before truncation
const ROUNDING_BIAS: f32 = 0.49;

/// One argument of a divide rule: a child template and the size it claims.
///
/// The template is a prototype. Every subdivision instantiates a fresh copy,
/// so the template itself is never handed out or modified.
#[derive(Debug, Clone, PartialEq)]
pub struct DivideArg {
    template: Shape,
    size: Size,
}

impl DivideArg {
    pub fn new(template: Shape, size: Size) -> Self {
        Self { template, size }
    }

    pub fn absolute(template: Shape, length: i32) -> Self {
        Self::new(template, Size::Absolute(length))
    }

    pub fn relative(template: Shape, fraction: f32) -> Self {
        Self::new(template, Size::Relative(fraction))
    }

    pub fn template(&self) -> &Shape {
        &self.template
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Build a new child from the template with a resolved extent and placement.
    fn instantiate(&self, extent: IVec3, transform: Transform) -> Shape {
        self.template
            .clone()
            .with_extent(extent)
            .with_transform(transform)
    }
}

impl fmt::Display for DivideArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.size, self.template)
    }
}

/// A complex rule that partitions its scope along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DivideRule {
    args: Vec<DivideArg>,
    direction: Direction,
    scope: Scope,
}

impl DivideRule {
    pub fn new(args: Vec<DivideArg>, direction: Direction) -> Self {
        Self {
            args,
            direction,
            scope: Scope::default(),
        }
    }

    pub fn with_probability(mut self, probability: f32) -> Self {
        self.scope.probability = probability;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn args(&self) -> &[DivideArg] {
        &self.args
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub(crate) fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    /// Length of the scope along the divide axis, ignoring growth direction
    pub fn axis_length(&self) -> i32 {
        self.direction
            .component(self.scope.extent)
            .saturating_abs()
    }

    /// Sum of all absolute argument sizes
    pub fn reserved(&self) -> i32 {
        self.args
            .iter()
            .filter_map(|arg| match arg.size {
                Size::Absolute(length) => Some(length),
                Size::Relative(_) => None,
            })
            .fold(0, i32::saturating_add)
    }

    /// Compute the successor shapes of this rule for its current scope.
    ///
    /// The result holds one freshly built shape per argument, in declaration
    /// order. Nothing is validated: absolute sizes larger than the scope or
    /// relative fractions that add up to more than one yield zero, negative
    /// or overlapping children.
    pub fn elements(&self) -> Vec<Shape> {
        let axis = self.direction;
        let extent = self.scope.extent;
        let grows_negative = axis.component(extent) < 0;

        let _span = tracing::debug_span!(
            "divide",
            direction = %axis,
            args = self.args.len()
        )
        .entered();

        let mut remaining = self.axis_length().saturating_sub(self.reserved());
        tracing::debug!(
            axis_length = self.axis_length(),
            remaining,
            "reserved absolute sizes"
        );

        let mut divide_factor = 1.0_f32;
        let mut working = self.scope.transform;
        let mut elements = Vec::with_capacity(self.args.len());

        for (index, arg) in self.args.iter().enumerate() {
            let size = match arg.size {
                Size::Absolute(length) => length,
                Size::Relative(fraction) => {
                    let factor = fraction / divide_factor;
                    let claimed = (remaining as f32 * factor + ROUNDING_BIAS).floor() as i32;
                    divide_factor *= 1.0 - fraction;
                    remaining = remaining.saturating_sub(claimed);
                    claimed
                }
            };
            let signed = if grows_negative {
                size.saturating_neg()
            } else {
                size
            };

            let child = arg.instantiate(axis.with_component(extent, signed), working);
            tracing::trace!(
                size = signed,
                offset = %working.translation(),
                "placed {}",
                arg.template
            );
            elements.push(child);

            if index + 1 < self.args.len() {
                working.translate(working.apply(axis.unit() * signed));
            }
        }

        elements
    }
}

/// Debug layout: `divide X {`, one `\t <size> <ref>` line per argument, then
/// `};`. There is no space after the opening brace; consumers compare this
/// text verbatim.
impl fmt::Display for DivideRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "divide {} {{", self.direction)?;
        for arg in &self.args {
            writeln!(f, "\t {}", arg)?;
        }
        write!(f, "}};")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_x(extent: IVec3, args: Vec<DivideArg>) -> DivideRule {
        DivideRule::new(args, Direction::X).with_scope(Scope::new(extent, Transform::IDENTITY))
    }

    fn axis_sizes(children: &[Shape], axis: Direction) -> Vec<i32> {
        children.iter().map(|c| axis.component(c.extent())).collect()
    }

    #[test]
    fn test_empty_rule_has_no_elements() {
        let rule = rule_x(IVec3::new(10, 10, 10), vec![]);
        assert!(rule.elements().is_empty());
    }

    #[test]
    fn test_cascading_relative_split() {
        let rule = rule_x(
            IVec3::new(100, 4, 4),
            vec![
                DivideArg::relative(Shape::leaf("a"), 0.7),
                DivideArg::relative(Shape::leaf("b"), 0.3),
            ],
        );
        assert_eq!(axis_sizes(&rule.elements(), Direction::X), vec![70, 30]);
    }

    #[test]
    fn test_absolute_sizes_are_reserved_first() {
        // the absolute arg comes last but is still taken out before the split
        let rule = rule_x(
            IVec3::new(100, 4, 4),
            vec![
                DivideArg::relative(Shape::leaf("a"), 0.5),
                DivideArg::relative(Shape::leaf("b"), 0.5),
                DivideArg::absolute(Shape::leaf("c"), 20),
            ],
        );
        assert_eq!(axis_sizes(&rule.elements(), Direction::X), vec![40, 40, 20]);
    }

    #[test]
    fn test_rounding_bias_is_just_under_a_half() {
        // 0.5 * 5 = 2.5 -> 2.99 -> 2, remaining 3 -> 3
        let rule = rule_x(
            IVec3::new(5, 1, 1),
            vec![
                DivideArg::relative(Shape::leaf("a"), 0.5),
                DivideArg::relative(Shape::leaf("b"), 0.5),
            ],
        );
        assert_eq!(axis_sizes(&rule.elements(), Direction::X), vec![2, 3]);

        // 0.51 * 1 + 0.49 = 1.0 -> 1
        let rule = rule_x(
            IVec3::new(1, 1, 1),
            vec![DivideArg::relative(Shape::leaf("a"), 0.51)],
        );
        assert_eq!(axis_sizes(&rule.elements(), Direction::X), vec![1]);
    }

    #[test]
    fn test_rounding_can_leave_space_unclaimed() {
        // 10/3 rounds down for every child, the last voxel stays empty
        let third = 1.0 / 3.0;
        let rule = rule_x(
            IVec3::new(10, 1, 1),
            vec![
                DivideArg::relative(Shape::leaf("a"), third),
                DivideArg::relative(Shape::leaf("b"), third),
                DivideArg::relative(Shape::leaf("c"), third),
            ],
        );
        let sizes = axis_sizes(&rule.elements(), Direction::X);
        assert_eq!(sizes, vec![3, 3, 3]);
        assert_eq!(sizes.iter().sum::<i32>(), 9);
    }

    #[test]
    fn test_negative_extent_flips_sizes_and_offsets() {
        let rule = rule_x(
            IVec3::new(-10, 2, 2),
            vec![
                DivideArg::absolute(Shape::leaf("a"), 4),
                DivideArg::absolute(Shape::leaf("b"), 6),
            ],
        );
        let children = rule.elements();
        assert_eq!(axis_sizes(&children, Direction::X), vec![-4, -6]);
        assert_eq!(children[0].transform().translation(), IVec3::ZERO);
        assert_eq!(children[1].transform().translation(), IVec3::new(-4, 0, 0));
    }

    #[test]
    fn test_oversized_absolute_is_permissive() {
        let rule = rule_x(
            IVec3::new(10, 1, 1),
            vec![
                DivideArg::absolute(Shape::leaf("a"), 15),
                DivideArg::relative(Shape::leaf("b"), 1.0),
            ],
        );
        // remaining is -5; the relative child gets a negative length
        assert_eq!(axis_sizes(&rule.elements(), Direction::X), vec![15, -5]);
    }

    #[test]
    fn test_relative_after_full_fraction_does_not_panic() {
        let rule = rule_x(
            IVec3::new(10, 1, 1),
            vec![
                DivideArg::relative(Shape::leaf("a"), 1.0),
                DivideArg::relative(Shape::leaf("b"), 0.5),
            ],
        );
        let sizes = axis_sizes(&rule.elements(), Direction::X);
        assert_eq!(sizes[0], 10);
        assert_eq!(sizes.len(), 2);
    }

    #[test]
    fn test_huge_absolute_sizes_wrap_silently() {
        let rule = rule_x(
            IVec3::new(10, 1, 1),
            vec![
                DivideArg::absolute(Shape::leaf("a"), i32::MAX),
                DivideArg::absolute(Shape::leaf("b"), 1),
            ],
        );
        let children = rule.elements();
        assert_eq!(axis_sizes(&children, Direction::X), vec![i32::MAX, 1]);
        assert_eq!(children[1].transform().translation().x, i32::MAX);
    }

    #[test]
    fn test_no_step_is_taken_after_the_last_child() {
        let start = IVec3::new(i32::MAX - 5, 0, 0);
        let rule = DivideRule::new(vec![DivideArg::absolute(Shape::leaf("a"), 10)], Direction::X)
            .with_scope(Scope::new(IVec3::new(10, 1, 1), Transform::from_translation(start)));
        let children = rule.elements();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].transform().translation(), start);
    }

    #[test]
    fn test_rotated_parent_places_children_along_local_axis() {
        let transform = Transform::rotation_y(1).translated(IVec3::new(100, 0, 0));
        let rule = DivideRule::new(
            vec![
                DivideArg::absolute(Shape::leaf("a"), 3),
                DivideArg::absolute(Shape::leaf("b"), 5),
                DivideArg::absolute(Shape::leaf("c"), 2),
            ],
            Direction::X,
        )
        .with_scope(Scope::new(IVec3::new(10, 1, 1), transform));

        let offsets: Vec<IVec3> = rule
            .elements()
            .iter()
            .map(|c| c.transform().translation())
            .collect();
        // local +X maps onto parent -Z
        assert_eq!(
            offsets,
            vec![
                IVec3::new(100, 0, 0),
                IVec3::new(100, 0, -3),
                IVec3::new(100, 0, -8),
            ]
        );
    }

    #[test]
    fn test_children_keep_template_state() {
        let template = Shape::symbol("wall").with_probability(0.4).with_active(false);
        let rule = rule_x(
            IVec3::new(8, 3, 2),
            vec![DivideArg::relative(template.clone(), 1.0)],
        );
        let child = &rule.elements()[0];
        assert_eq!(child.name(), Some("wall"));
        assert_eq!(child.probability(), 0.4);
        assert!(!child.is_active());
        assert_eq!(child.extent(), IVec3::new(8, 3, 2));
        // the template itself still has the default scope
        assert_eq!(rule.args()[0].template(), &template);
    }

    #[test]
    fn test_reserved_sums_only_absolute_sizes() {
        let rule = rule_x(
            IVec3::new(10, 1, 1),
            vec![
                DivideArg::absolute(Shape::leaf("a"), 2),
                DivideArg::relative(Shape::leaf("b"), 0.5),
                DivideArg::absolute(Shape::leaf("c"), 3),
            ],
        );
        assert_eq!(rule.reserved(), 5);
        assert_eq!(rule.axis_length(), 10);
    }

    #[test]
    fn test_empty_rule_display() {
        let rule = rule_x(IVec3::ONE, vec![]);
        assert_eq!(rule.to_string(), "divide X {\n};");
    }
}
