//! Structural classification of ElementDefinitions
//!
//! Predicates answering what kind of element a single ElementDefinition describes:
//! repeating, backbone, choice, reference, primitive value. Some of them consult
//! `base.path` to see through profiles that renamed a choice element to a
//! concrete type (`Observation.value[x]` constrained to `Observation.valueQuantity`).
//!
//! Uses a compile-time perfect hash set (phf) for primitive type name lookups.

use super::element_definition::{ElementDefinition, Max};
use super::path;
use phf::phf_set;

/// Type code of a resource-local group of child elements
pub const BACKBONE_ELEMENT_TYPE: &str = "BackboneElement";

/// Type code used for groups of child elements nested inside datatypes (e.g. `Timing.repeat`)
pub const ELEMENT_TYPE: &str = "Element";

/// Type code of references to other resources
pub const REFERENCE_TYPE: &str = "Reference";

/// FHIR primitive datatype names across STU3 to R5
static PRIMITIVE_TYPES: phf::Set<&'static str> = phf_set! {
    "base64Binary",
    "boolean",
    "canonical",
    "code",
    "date",
    "dateTime",
    "decimal",
    "id",
    "instant",
    "integer",
    "integer64",
    "markdown",
    "oid",
    "positiveInt",
    "string",
    "time",
    "unsignedInt",
    "uri",
    "url",
    "uuid",
    "xhtml",
};

/// True if `name` is a FHIR primitive datatype (`string`, `dateTime`, ...)
pub fn is_primitive_type_name(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(name)
}

impl ElementDefinition {
    /// Last path segment, choice suffix included
    pub fn name(&self) -> &str {
        path::get_name_from_path(&self.path)
    }

    /// True for the element describing the definition itself
    pub fn is_root(&self) -> bool {
        path::is_root_path(&self.path)
    }

    /// Check if element may repeat (max = "*" or max > 1)
    pub fn is_repeating(&self) -> bool {
        match self.cardinality().max {
            Max::Unbounded => true,
            Max::Bounded(n) => n > 1,
        }
    }

    /// Check if element is required (min > 0)
    pub fn is_required(&self) -> bool {
        self.min.unwrap_or(0) > 0
    }

    /// Check if element is ruled out (max = 0)
    pub fn is_prohibited(&self) -> bool {
        self.cardinality().max == Max::Bounded(0)
    }

    /// True if the element only groups child elements and has no value of its own
    pub fn is_backbone_element(&self) -> bool {
        matches!(
            self.distinct_type_codes().as_slice(),
            [code] if *code == BACKBONE_ELEMENT_TYPE || *code == ELEMENT_TYPE
        )
    }

    /// Type codes without duplicates, in order of first occurrence.
    ///
    /// Profiles are ignored: `HumanName(p1), HumanName(p2), Identifier` gives
    /// `[HumanName, Identifier]`.
    pub fn distinct_type_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for entry in self.types.iter().flatten() {
            if !codes.contains(&entry.code.as_str()) {
                codes.push(&entry.code);
            }
        }
        codes
    }

    pub fn is_reference(&self) -> bool {
        self.types
            .iter()
            .flatten()
            .any(|t| t.code == REFERENCE_TYPE)
    }

    pub fn has_content_reference(&self) -> bool {
        self.content_reference.is_some()
    }

    /// Check if the path itself ends with [x]
    pub fn has_choice_suffix(&self) -> bool {
        path::has_choice_suffix(&self.path)
    }

    /// True for an unresolved choice element, or one a profile renamed to a concrete type
    pub fn is_choice_element(&self) -> bool {
        self.has_choice_suffix() || self.renamed_choice_base().is_some()
    }

    /// Compare `name` to the element's logical name.
    ///
    /// Choice elements are known by their name without `[x]`, so both
    /// `Observation.value[x]` and a `Observation.valueQuantity` constrained from it
    /// match `"value"`. The comparison is exact; `"valueQuantity"` and `"val"` do not
    /// match a choice element.
    pub fn matches_name(&self, name: &str) -> bool {
        if self.has_choice_suffix() {
            return path::strip_choice_suffix(self.name()) == name;
        }
        if let Some(base_path) = self.renamed_choice_base() {
            return path::strip_choice_suffix(path::get_name_from_path(base_path)) == name;
        }
        self.name() == name
    }

    /// True for the `value` element of a primitive datatype definition (e.g. `string.value`)
    pub fn is_primitive_value_constraint(&self) -> bool {
        let mut segments = self.path.split('.');
        matches!(
            (segments.next(), segments.next(), segments.next()),
            (Some(root), Some("value"), None) if is_primitive_type_name(root)
        )
    }

    /// Base path of a choice element that a profile renamed to a concrete type
    fn renamed_choice_base(&self) -> Option<&str> {
        let base = self.base.as_ref()?;
        (path::has_choice_suffix(&base.path) && !self.has_choice_suffix())
            .then_some(base.path.as_str())
    }
}
