//! Shape grammar core: shapes, sizes and the divide rule
//!
//! Rules are built once (usually by a grammar parser) and then act as
//! read-only templates. Applying a rule is a pure function of its scope and
//! returns freshly built successor shapes.

pub mod config;
pub mod divide;
pub mod shape;
pub mod size;
pub mod validate;

pub use config::DivideConfig;
pub use divide::{DivideArg, DivideRule};
pub use shape::{Leaf, Scope, Shape, Symbol};
pub use size::Size;
pub use validate::Diagnostic;
