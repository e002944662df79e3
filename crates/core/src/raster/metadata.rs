//! Descriptive raster metadata carried alongside pixel data

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Auxiliary property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

/// Description of one sample band
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleDimension {
    /// Band description, e.g. "elevation"
    pub description: String,
    /// Unit of measure
    pub unit: Option<String>,
    /// Scale applied to stored samples to get physical values
    pub scale: f64,
    /// Offset applied after scaling
    pub offset: f64,
}

impl SampleDimension {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            unit: None,
            scale: 1.0,
            offset: 0.0,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Name, band descriptions and free-form properties of a raster
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RasterMetadata {
    pub name: String,
    pub sample_dimensions: Vec<SampleDimension>,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl RasterMetadata {
    /// Set a property
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a property
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}
