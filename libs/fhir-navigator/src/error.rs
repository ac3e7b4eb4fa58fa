//! Error types for element navigation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Navigator is not positioned on an element")]
    NavigatorNotPositioned,

    #[error("StructureDefinition {0} has no snapshot")]
    MissingSnapshot(String),

    #[error("FHIR context error: {0}")]
    FhirContext(#[from] ferrum_context::Error),
}
