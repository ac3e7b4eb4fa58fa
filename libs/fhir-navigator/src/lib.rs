//! FHIR StructureDefinition element navigation
//!
//! This crate provides a cursor-based navigator over the flat, path-ordered element
//! list of a StructureDefinition snapshot. Parent, child and sibling relations are
//! reconstructed from element paths; the element list itself is shared and never
//! copied, so cursors are cheap to duplicate.
//!
//! Element classification (repeating, backbone, choice, reference, primitive value)
//! lives on [`ElementDefinition`] itself and is re-exported from `ferrum_models`.
//!
//! # Example
//!
//! ```rust
//! use ferrum_navigator::{ElementDefinition, ElementNavigator};
//!
//! let mut nav = ElementNavigator::new(vec![
//!     ElementDefinition::new("Observation"),
//!     ElementDefinition::new("Observation.identifier").unbounded().with_type("Identifier", None),
//!     ElementDefinition::new("Observation.value[x]").optional("1").with_type("Quantity", None),
//! ]);
//!
//! assert!(nav.jump_to_first("Observation.value[x]"));
//! assert!(nav.current().unwrap().is_choice_element());
//!
//! let mut other = nav.shallow_copy();
//! assert!(other.move_to_parent());
//! assert_eq!(nav.path(), Some("Observation.value[x]"));
//! assert_eq!(other.path(), Some("Observation"));
//! ```

pub mod error;
pub mod navigator;

pub use error::{Error, Result};
pub use navigator::{Bookmark, ElementNavigator};
pub use ferrum_models::{path, ElementDefinition, ElementDefinitionBase, ElementDefinitionType};
