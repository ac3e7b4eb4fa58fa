//! Version-agnostic FHIR models
//!
//! Types that work across FHIR STU3, R4, R4B, and R5

pub mod analysis;
pub mod element_definition;
pub mod error;
pub mod path;
pub mod structure_definition;

// Re-export commonly used types
pub use analysis::{is_primitive_type_name, BACKBONE_ELEMENT_TYPE, ELEMENT_TYPE, REFERENCE_TYPE};
pub use element_definition::*;
pub use error::{Error, Result};
pub use structure_definition::*;
