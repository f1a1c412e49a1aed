//! Scene files: a parent scope plus the divide rule to apply to it
//!
//! Scenes are TOML documents. They exist so rules can be exercised from the
//! command line and from tests without a grammar parser:
//!
//! ```toml
//! [parent]
//! extent = [100, 40, 60]
//! translation = [0, 0, 0]
//! rotation = 1            # quarter turns about Y
//!
//! [rule]
//! direction = "X"
//!
//! [[rule.args]]
//! size = 30               # integer: absolute
//! leaf = "door"
//!
//! [[rule.args]]
//! size = "70%"            # percentage or float: relative
//! symbol = "wall"
//!
//! [[rule.args]]
//! size = 0.3
//! divide = { direction = "Y", args = [{ size = 1.0, leaf = "glass" }] }
//! ```

use std::path::Path;
use std::str::FromStr;

use glam::IVec3;
use serde::Deserialize;
use thiserror::Error;

use crate::error::GrammarError;
use crate::geometry::{Direction, Transform};
use crate::grammar::{DivideArg, DivideRule, Scope, Shape, Size};

/// Errors that can occur when loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error("argument {index} needs one of `leaf`, `symbol` or `divide`")]
    MissingShape { index: usize },
    #[error("argument {index} names more than one of `leaf`, `symbol` and `divide`")]
    AmbiguousShape { index: usize },
}

/// A loaded scene: the rule carries the parent scope it will divide
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rule: DivideRule,
}

#[derive(Deserialize)]
struct TomlScene {
    metadata: Option<TomlMetadata>,
    parent: TomlParent,
    rule: TomlRule,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlParent {
    extent: [i32; 3],
    #[serde(default)]
    translation: [i32; 3],
    #[serde(default)]
    rotation: i32,
    #[serde(default = "default_active")]
    active: bool,
}

#[derive(Deserialize)]
struct TomlRule {
    direction: String,
    probability: Option<f32>,
    #[serde(default)]
    args: Vec<TomlArg>,
}

#[derive(Deserialize)]
struct TomlArg {
    size: TomlSize,
    leaf: Option<String>,
    symbol: Option<String>,
    divide: Option<TomlRule>,
    probability: Option<f32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TomlSize {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn default_active() -> bool {
    true
}

impl TomlSize {
    fn to_size(&self) -> Result<Size, GrammarError> {
        match self {
            TomlSize::Integer(n) => i32::try_from(*n)
                .map(Size::Absolute)
                .map_err(|_| GrammarError::InvalidSize(n.to_string())),
            TomlSize::Float(f) => Ok(Size::Relative(*f as f32)),
            TomlSize::Text(s) => s.parse(),
        }
    }
}

impl TomlRule {
    fn to_rule(&self) -> Result<DivideRule, SceneError> {
        let direction: Direction = self.direction.parse()?;
        let args = self
            .args
            .iter()
            .enumerate()
            .map(|(index, arg)| arg.to_arg(index))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rule = DivideRule::new(args, direction);
        if let Some(probability) = self.probability {
            rule = rule.with_probability(probability);
        }
        Ok(rule)
    }
}

impl TomlArg {
    fn to_arg(&self, index: usize) -> Result<DivideArg, SceneError> {
        let template = match (&self.leaf, &self.symbol, &self.divide) {
            (Some(name), None, None) => Shape::leaf(name.as_str()),
            (None, Some(name), None) => Shape::symbol(name.as_str()),
            (None, None, Some(rule)) => Shape::Divide(rule.to_rule()?),
            (None, None, None) => return Err(SceneError::MissingShape { index }),
            _ => return Err(SceneError::AmbiguousShape { index }),
        };
        let template = match self.probability {
            Some(probability) => template.with_probability(probability),
            None => template,
        };
        Ok(DivideArg::new(template, self.size.to_size()?))
    }
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// The scope the rule divides
    pub fn parent(&self) -> &Scope {
        self.rule.scope()
    }
}

impl FromStr for Scene {
    type Err = SceneError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let parsed: TomlScene = toml::from_str(content)?;

        let parent = &parsed.parent;
        let transform = Transform::rotation_y(parent.rotation)
            .translated(IVec3::from_array(parent.translation));
        let probability = parsed.rule.probability.unwrap_or(1.0);
        let scope = Scope {
            extent: IVec3::from_array(parent.extent),
            transform,
            active: parent.active,
            probability,
        };

        Ok(Scene {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            rule: parsed.rule.to_rule()?.with_scope(scope),
        })
    }
}
