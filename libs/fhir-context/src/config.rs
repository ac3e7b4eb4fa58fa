//! Context configuration

use crate::version::FhirVersion;
use serde::{Deserialize, Serialize};

/// Number of resolved element lists kept by default
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Settings for [`DefaultFhirContext`](crate::DefaultFhirContext)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextConfig {
    /// Release the context serves; resources declaring another `fhirVersion` are logged
    pub fhir_version: FhirVersion,

    /// Maximum number of resolved element lists cached by type name (0 disables the cache)
    pub cache_capacity: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            fhir_version: FhirVersion::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ContextConfig {
    pub fn with_fhir_version(mut self, fhir_version: FhirVersion) -> Self {
        self.fhir_version = fhir_version;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }
}
