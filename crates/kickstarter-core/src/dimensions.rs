//! Content dimensions available to generated site content

use crate::templates::{Context, Value};
use serde::{Deserialize, Serialize};

/// A named axis of content variation, e.g. `language` with default `en`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDimension {
    pub identifier: String,
    pub default: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl ContentDimension {
    pub fn new(identifier: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            default: default.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Template record exposing `identifier`, `default` and `label`
    pub fn to_context(&self) -> Context {
        Context::new()
            .with("identifier", self.identifier.as_str())
            .with("default", self.default.as_str())
            .with(
                "label",
                self.label.as_deref().unwrap_or(self.identifier.as_str()),
            )
    }
}

/// Template value holding every dimension as a record
pub fn dimensions_value(dimensions: &[ContentDimension]) -> Value {
    Value::List(
        dimensions
            .iter()
            .map(|d| Value::Record(d.to_context()))
            .collect(),
    )
}

/// Source of the configured content dimensions
pub trait DimensionRepository {
    fn find_all(&self) -> Vec<ContentDimension>;
}

/// Dimension repository over a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticDimensionRepository {
    dimensions: Vec<ContentDimension>,
}

impl StaticDimensionRepository {
    pub fn new(dimensions: Vec<ContentDimension>) -> Self {
        Self { dimensions }
    }
}

impl DimensionRepository for StaticDimensionRepository {
    fn find_all(&self) -> Vec<ContentDimension> {
        self.dimensions.clone()
    }
}
