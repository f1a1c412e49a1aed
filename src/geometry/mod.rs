//! Integer geometry for shape scopes
//!
//! Scopes live on the voxel grid, so every extent and offset is an integer
//! vector ([`glam::IVec3`]). The sign of an extent component encodes which
//! way the box grows along that axis.

pub mod axis;
pub mod transform;

pub use axis::Direction;
pub use transform::Transform;
