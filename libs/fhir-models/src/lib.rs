//! FHIR data models
//!
//! This crate provides strongly-typed Rust structures for FHIR StructureDefinitions
//! and the ElementDefinitions that make up their snapshots, together with the
//! path utilities and constraint predicates used to interpret them.
//!
//! # Module Organization
//!
//! - `common`: Version-agnostic models that work across FHIR STU3, R4, R4B, and R5
//!
//! # Design Philosophy
//!
//! - **Flat, path-encoded trees**: a snapshot is an ordered list of elements; structure
//!   is derived from dotted paths, never from linked nodes
//! - **Extensible**: `extensions` field captures version-specific or custom properties
//! - **Compatible**: Works with existing `serde_json::Value`-based code
//!
//! # Example
//!
//! ```rust
//! use ferrum_models::common::{StructureDefinition, StructureDefinitionKind};
//! use serde_json::json;
//!
//! let sd_json = json!({
//!     "resourceType": "StructureDefinition",
//!     "id": "Observation",
//!     "url": "http://hl7.org/fhir/StructureDefinition/Observation",
//!     "name": "Observation",
//!     "kind": "resource",
//!     "abstract": false,
//!     "type": "Observation",
//!     "snapshot": {
//!         "element": [
//!             { "path": "Observation" },
//!             { "path": "Observation.value[x]", "min": 0, "max": "1",
//!               "type": [{ "code": "Quantity" }, { "code": "string" }] }
//!         ]
//!     }
//! });
//!
//! let sd: StructureDefinition = serde_json::from_value(sd_json).unwrap();
//! assert_eq!(sd.kind, StructureDefinitionKind::Resource);
//!
//! let value = sd.snapshot.as_ref().unwrap().get_element("Observation.value[x]").unwrap();
//! assert!(value.is_choice_element());
//! assert!(value.matches_name("value"));
//! ```

pub mod common;

// Re-export commonly used types
pub use common::*;
