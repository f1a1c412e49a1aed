//! Integer affine placement for shapes in parent-local space.
//!
//! A [`Transform`] positions a shape's scope inside the frame of its parent.
//! It is made of an integer 3x3 linear part and a translation, which is
//! enough to express every placement a voxel grammar produces: offsets and
//! quarter-turn rotations.
//!
//! ## Composition
//!
//! Subdivision walks along one axis of the parent and hands every child the
//! parent's placement advanced by the space already consumed. The step is a
//! *local* displacement (e.g. `(30, 0, 0)` along X), so it has to be mapped
//! through the linear part before it is added to the translation:
//!
//! ```text
//! step   = apply(unit_axis * size)     // rotation only, no translation
//! child  = parent.translated(offset)   // offset is already in parent space
//! offset = offset + step
//! ```
//!
//! Keeping the linear part out of the offset accumulation is what lets
//! nested, rotated parents compose correctly.

use glam::IVec3;

/// Integer affine transform: `p' = linear * p + translation`.
///
/// The transform is `Copy`; every shape owns its own value, so no two shapes
/// can ever observe each other's placement changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform {
    /// Rows of the linear part
    rows: [IVec3; 3],
    translation: IVec3,
}

impl Transform {
    /// The identity placement
    pub const IDENTITY: Self = Self {
        rows: [IVec3::X, IVec3::Y, IVec3::Z],
        translation: IVec3::ZERO,
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// A pure translation
    pub fn from_translation(translation: IVec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// A rotation about the vertical (Y) axis in 90 degree steps.
    ///
    /// Positive turns are counter-clockwise when looking down the Y axis, so
    /// one turn maps `+X` onto `-Z`. Any integer is accepted; it is reduced
    /// modulo four.
    pub fn rotation_y(quarter_turns: i32) -> Self {
        let rows = match quarter_turns.rem_euclid(4) {
            0 => [IVec3::X, IVec3::Y, IVec3::Z],
            1 => [IVec3::Z, IVec3::Y, IVec3::NEG_X],
            2 => [IVec3::NEG_X, IVec3::Y, IVec3::NEG_Z],
            _ => [IVec3::NEG_Z, IVec3::Y, IVec3::X],
        };
        Self {
            rows,
            translation: IVec3::ZERO,
        }
    }

    /// The translation part
    pub fn translation(&self) -> IVec3 {
        self.translation
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Map a local displacement through the linear part only.
    ///
    /// This is what turns "30 units along my X axis" into the equivalent
    /// displacement in the parent frame.
    pub fn apply(&self, v: IVec3) -> IVec3 {
        IVec3::new(
            wrapping_dot(self.rows[0], v),
            wrapping_dot(self.rows[1], v),
            wrapping_dot(self.rows[2], v),
        )
    }

    /// Map a local point into the parent frame (linear part plus translation).
    pub fn transform_point(&self, p: IVec3) -> IVec3 {
        self.apply(p).wrapping_add(self.translation)
    }

    /// Accumulate an offset that is already expressed in the parent frame.
    ///
    /// Integer overflow wraps, so degenerate sizes never abort a subdivision.
    pub fn translate(&mut self, offset: IVec3) {
        self.translation = self.translation.wrapping_add(offset);
    }

    /// By-value variant of [`Transform::translate`].
    pub fn translated(mut self, offset: IVec3) -> Self {
        self.translate(offset);
        self
    }

    /// Compose with a placement expressed in this transform's local frame.
    ///
    /// The result maps `p` to `self.transform_point(local.transform_point(p))`.
    pub fn compose(&self, local: &Transform) -> Transform {
        let [b0, b1, b2] = local.rows;
        let rows = self.rows.map(|r| {
            b0.wrapping_mul(IVec3::splat(r.x))
                .wrapping_add(b1.wrapping_mul(IVec3::splat(r.y)))
                .wrapping_add(b2.wrapping_mul(IVec3::splat(r.z)))
        });
        Transform {
            rows,
            translation: self.transform_point(local.translation),
        }
    }
}

fn wrapping_dot(a: IVec3, b: IVec3) -> i32 {
    a.x.wrapping_mul(b.x)
        .wrapping_add(a.y.wrapping_mul(b.y))
        .wrapping_add(a.z.wrapping_mul(b.z))
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
