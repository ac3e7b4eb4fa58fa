//! FHIR Context for runtime StructureDefinition access
//!
//! Provides a trait-based interface for resolving FHIR conformance resources, and
//! in particular for turning a type name into the ordered element list of its
//! StructureDefinition snapshot.
//!
//! # Example
//!
//! ```rust
//! use ferrum_context::{ContextConfig, DefaultFhirContext, FhirContext};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = DefaultFhirContext::new(ContextConfig::default());
//! ctx.add_resource(json!({
//!     "resourceType": "StructureDefinition",
//!     "url": "http://hl7.org/fhir/StructureDefinition/string",
//!     "name": "string",
//!     "kind": "primitive-type",
//!     "abstract": false,
//!     "type": "string",
//!     "snapshot": { "element": [ { "path": "string" }, { "path": "string.value" } ] }
//! }))?;
//!
//! let elements = ctx.resolve_definition("string")?;
//! assert_eq!(elements.len(), 2);
//! assert!(ctx.resolve_definition("Patient").is_err());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod version;

pub use config::ContextConfig;
pub use context::{DefaultFhirContext, FhirContext};
pub use error::{Error, Result};
pub use version::FhirVersion;
