//! Free-form node properties with typed lookup
//!
//! Input nodes carry an untyped string-keyed property bag. Every consumer
//! in the pipeline reads it through the typed accessors here, which return
//! the caller's default on a missing key or a type mismatch.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single property value attached to a scene node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Boolean(bool),
    String(String),
    Float(f32),
    Vector(Vec3),
}

impl PropertyValue {
    /// Interpret the value as a boolean flag
    ///
    /// Floats are truthy when non-zero, strings when equal to `true` or `1`
    /// (case-insensitive). Vectors never convert.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            PropertyValue::Float(f) => Some(*f != 0.0),
            PropertyValue::String(s) => {
                Some(s.eq_ignore_ascii_case("true") || s == "1")
            }
            PropertyValue::Vector(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            PropertyValue::Vector(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Boolean(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<Vec3> for PropertyValue {
    fn from(v: Vec3) -> Self {
        PropertyValue::Vector(v)
    }
}

/// String-keyed property bag with typed accessors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyBag {
    values: HashMap<String, PropertyValue>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value under the same key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// True when the key is present and truthy
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(PropertyValue::as_bool).unwrap_or(false)
    }

    /// String value of the key, or None when absent or of another type
    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_str)
    }

    /// Float value of the key, or the default when absent or of another type
    pub fn float_or(&self, key: &str, default: f32) -> f32 {
        self.get(key).and_then(PropertyValue::as_float).unwrap_or(default)
    }

    /// Vector value of the key, or the default when absent or of another type
    pub fn vec3_or(&self, key: &str, default: Vec3) -> Vec3 {
        self.get(key).and_then(PropertyValue::as_vec3).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors_with_defaults() {
        let mut props = PropertyBag::new();
        props.set("min", -30.0f32);
        props.set("axis", Vec3::X);
        props.set("construct", "rev");

        assert_eq!(props.float_or("min", -90.0), -30.0);
        assert_eq!(props.float_or("max", 90.0), 90.0);
        assert_eq!(props.vec3_or("axis", Vec3::Y), Vec3::X);
        assert_eq!(props.vec3_or("offset", Vec3::ZERO), Vec3::ZERO);
        assert_eq!(props.string("construct"), Some("rev"));
        assert_eq!(props.string("hptype"), None);
    }

    #[test]
    fn test_type_mismatch_falls_back_to_default() {
        let mut props = PropertyBag::new();
        props.set("min", "not a number");
        assert_eq!(props.float_or("min", -45.0), -45.0);
    }

    #[test]
    fn test_flag_truthiness() {
        let mut props = PropertyBag::new();
        props.set("hull", true);
        props.set("hardpoint", 1.0f32);
        props.set("disabled", false);
        props.set("label", "TRUE");

        assert!(props.flag("hull"));
        assert!(props.flag("hardpoint"));
        assert!(props.flag("label"));
        assert!(!props.flag("disabled"));
        assert!(!props.flag("missing"));
    }
}
