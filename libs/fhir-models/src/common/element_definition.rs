//! FHIR ElementDefinition model
//!
//! Version-agnostic model for ElementDefinition (used in StructureDefinition snapshots and differentials)

use super::error::{Error, Result};
use super::path;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// FHIR ElementDefinition - defines an element in a resource or data type structure
///
/// Only the properties needed to reconstruct and classify the element tree are
/// modelled explicitly; everything else is kept in `extensions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinition {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Path of the element in the hierarchy (e.g., "Patient.name")
    pub path: String,

    /// Name for this particular element (in a slice)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice_name: Option<String>,

    /// Short label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// Minimum cardinality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,

    /// Maximum cardinality (can be "*")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    /// Base definition information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<ElementDefinitionBase>,

    /// Reference to definition of content if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_reference: Option<String>,

    /// Data type and profile for this element
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<ElementDefinitionType>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// Base definition information for an element
///
/// Points back to the element this one was derived from. For a profile that
/// constrains `Observation.value[x]` to `Observation.valueQuantity`, `path` still
/// reads `Observation.value[x]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementDefinitionBase {
    /// Path that identifies the base element
    pub path: String,

    /// Min cardinality of the base element
    pub min: u32,

    /// Max cardinality of the base element
    pub max: String,
}

/// Data type for an element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinitionType {
    /// Data type code
    pub code: String,

    /// Profile (StructureDefinition canonical URLs) that apply
    ///
    /// STU3 carries a single URL here; it is read as a one-element list.
    #[serde(
        default,
        deserialize_with = "deserialize_urls",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile: Option<Vec<String>>,

    /// Profile (StructureDefinition) for Reference/canonical target types
    #[serde(
        default,
        deserialize_with = "deserialize_urls",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_profile: Option<Vec<String>>,
}

/// Canonical URL property that is a string in STU3 and an array from R4 on
#[derive(Deserialize)]
#[serde(untagged)]
enum UrlsFormat {
    One(String),
    Many(Vec<String>),
}

impl From<UrlsFormat> for Vec<String> {
    fn from(format: UrlsFormat) -> Self {
        match format {
            UrlsFormat::One(url) => vec![url],
            UrlsFormat::Many(urls) => urls,
        }
    }
}

fn deserialize_urls<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<UrlsFormat>::deserialize(deserializer)?.map(Vec::from))
}

impl ElementDefinitionType {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            profile: None,
            target_profile: None,
        }
    }
}

/// Upper bound of a cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Max {
    Bounded(u32),
    /// `*`
    Unbounded,
}

impl FromStr for Max {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "*" {
            return Ok(Max::Unbounded);
        }
        s.parse::<u32>()
            .map(Max::Bounded)
            .map_err(|_| Error::InvalidCardinality(format!("max must be '*' or an integer, got '{}'", s)))
    }
}

impl fmt::Display for Max {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Max::Bounded(n) => write!(f, "{}", n),
            Max::Unbounded => f.write_str("*"),
        }
    }
}

/// Parsed `min..max` repetition bound of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub min: u32,
    pub max: Max,
}

impl Cardinality {
    pub fn new(min: u32, max: Max) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Snapshot - a set of elements that define the structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub element: Vec<ElementDefinition>,
}

/// Differential - a set of elements that define changes from the base
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Differential {
    pub element: Vec<ElementDefinition>,
}

impl Snapshot {
    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Get the first element with the given path
    pub fn get_element(&self, path: &str) -> Option<&ElementDefinition> {
        self.element.iter().find(|e| e.path == path)
    }

    /// The element whose path is a root path, if any
    pub fn root(&self) -> Option<&ElementDefinition> {
        self.element.iter().find(|e| path::is_root_path(&e.path))
    }
}

impl Differential {
    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Get the first element with the given path
    pub fn get_element(&self, path: &str) -> Option<&ElementDefinition> {
        self.element.iter().find(|e| e.path == path)
    }
}

impl ElementDefinition {
    /// Create an element with only a path set
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// `0..*`
    pub fn unbounded(mut self) -> Self {
        self.min = Some(0);
        self.max = Some("*".to_string());
        self
    }

    /// `0..0`
    pub fn prohibited(mut self) -> Self {
        self.min = Some(0);
        self.max = Some("0".to_string());
        self
    }

    /// `min..max`, where `max` is `"*"` or an integer
    pub fn required(mut self, min: u32, max: &str) -> Self {
        self.min = Some(min);
        self.max = Some(max.to_string());
        self
    }

    /// `0..max`
    pub fn optional(self, max: &str) -> Self {
        self.required(0, max)
    }

    /// Append a type entry, optionally carrying one profile URL
    pub fn with_type(mut self, code: impl Into<String>, profile: Option<&str>) -> Self {
        let mut entry = ElementDefinitionType::new(code);
        entry.profile = profile.map(|p| vec![p.to_string()]);
        self.types.get_or_insert_with(Vec::new).push(entry);
        self
    }

    /// Append a `Reference` type entry targeting `target_profile`
    pub fn reference(mut self, target_profile: impl Into<String>) -> Self {
        let mut entry = ElementDefinitionType::new(super::analysis::REFERENCE_TYPE);
        entry.target_profile = Some(vec![target_profile.into()]);
        self.types.get_or_insert_with(Vec::new).push(entry);
        self
    }

    /// Set the base back-reference, taking cardinality from this element
    pub fn with_base(mut self, base_path: impl Into<String>) -> Self {
        self.base = Some(ElementDefinitionBase {
            path: base_path.into(),
            min: self.min.unwrap_or(0),
            max: self.cardinality().max.to_string(),
        });
        self
    }

    /// Simulate a constraint that renames this element.
    ///
    /// The current path becomes the base path (unless a base is already recorded)
    /// and `new_path` becomes the element's path.
    pub fn renamed(self, new_path: impl Into<String>) -> Self {
        let mut renamed = if self.base.is_some() {
            self
        } else {
            let old_path = self.path.clone();
            self.with_base(old_path)
        };
        renamed.path = new_path.into();
        renamed.id = None;
        renamed
    }

    /// Check if this element has a slice name
    pub fn is_slice(&self) -> bool {
        self.slice_name.is_some()
    }

    /// Get the parent path (everything before the last '.')
    pub fn parent_path(&self) -> Option<&str> {
        path::get_parent_path(&self.path)
    }

    /// Check if this element is a descendant of the given path
    pub fn is_descendant_of(&self, parent_path: &str) -> bool {
        path::is_descendant_path(parent_path, &self.path)
    }

    /// Parsed cardinality; missing or malformed bounds read as `0..1`
    pub fn cardinality(&self) -> Cardinality {
        let max = self
            .max
            .as_deref()
            .and_then(|m| m.parse::<Max>().ok())
            .unwrap_or(Max::Bounded(1));
        Cardinality::new(self.min.unwrap_or(0), max)
    }

    /// Parsed cardinality, failing on a malformed or missing `max`
    pub fn try_cardinality(&self) -> Result<Cardinality> {
        let max = self
            .max
            .as_deref()
            .ok_or_else(|| Error::MissingField(format!("{}.max", self.path)))?
            .parse::<Max>()?;
        Ok(Cardinality::new(self.min.unwrap_or(0), max))
    }

    /// Get the cardinality as a string (e.g., "0..1", "1..*")
    pub fn cardinality_string(&self) -> String {
        self.cardinality().to_string()
    }
}
