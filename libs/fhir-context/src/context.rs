//! Conformance resource access
//!
//! [`FhirContext`] is the seam between element navigation and wherever
//! StructureDefinitions come from. Implementors only have to answer canonical URL
//! lookups; parsing and type-name resolution are provided on top of that.

use crate::config::ContextConfig;
use crate::error::{Error, Result};
use crate::version::FhirVersion;
use ferrum_models::{ElementDefinition, StructureDefinition};
use lru::LruCache;
use serde_json::Value;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, RwLock};

/// Source of FHIR conformance resources
pub trait FhirContext: Send + Sync {
    /// Resource with the given canonical URL, optionally pinned to a business version
    fn get_resource_by_url(
        &self,
        canonical_url: &str,
        version: Option<&str>,
    ) -> Result<Option<Arc<Value>>>;

    fn get_latest_resource_by_url(&self, canonical_url: &str) -> Result<Option<Arc<Value>>> {
        self.get_resource_by_url(canonical_url, None)
    }

    fn get_structure_definition(
        &self,
        canonical_url: &str,
    ) -> Result<Option<Arc<StructureDefinition>>> {
        let Some(resource) = self.get_latest_resource_by_url(canonical_url)? else {
            return Ok(None);
        };
        let sd: StructureDefinition = serde_json::from_value(Arc::unwrap_or_clone(resource))?;
        Ok(Some(Arc::new(sd)))
    }

    /// Core definition of a type (`Observation` -> `http://hl7.org/fhir/StructureDefinition/Observation`).
    ///
    /// Absolute canonical URLs are looked up as given.
    fn get_core_structure_definition_by_type(
        &self,
        type_name: &str,
    ) -> Result<Option<Arc<StructureDefinition>>> {
        if is_absolute_url(type_name) {
            return self.get_structure_definition(type_name);
        }
        self.get_structure_definition(&StructureDefinition::core_url(type_name))
    }

    /// Ordered snapshot elements of the definition for `type_name`
    fn resolve_definition(&self, type_name: &str) -> Result<Arc<[ElementDefinition]>> {
        let sd = self
            .get_core_structure_definition_by_type(type_name)?
            .ok_or_else(|| Error::StructureDefinitionNotFound(type_name.to_string()))?;
        snapshot_of(&sd)
    }
}

fn is_absolute_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("urn:")
}

fn snapshot_of(sd: &StructureDefinition) -> Result<Arc<[ElementDefinition]>> {
    let elements = sd
        .snapshot_elements()
        .map_err(|e| Error::InvalidStructureDefinition(e.to_string()))?;
    if elements.is_empty() {
        return Err(Error::InvalidStructureDefinition(format!(
            "{} has an empty snapshot",
            sd.url
        )));
    }
    Ok(Arc::from(elements))
}

/// In-memory [`FhirContext`] over a set of JSON conformance resources.
///
/// Resources are indexed by `url`; several versions of one URL may be added, the
/// most recently added one is the "latest". Resolved element lists are kept in an
/// LRU cache keyed by type name.
pub struct DefaultFhirContext {
    config: ContextConfig,
    resources: RwLock<HashMap<String, Vec<Arc<Value>>>>,
    definitions: Option<Mutex<LruCache<String, Arc<[ElementDefinition]>>>>,
}

impl DefaultFhirContext {
    pub fn new(config: ContextConfig) -> Self {
        let definitions = NonZeroUsize::new(config.cache_capacity)
            .map(|capacity| Mutex::new(LruCache::new(capacity)));
        Self {
            config,
            resources: RwLock::new(HashMap::new()),
            definitions,
        }
    }

    pub fn from_resources<I>(config: ContextConfig, resources: I) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let ctx = Self::new(config);
        for resource in resources {
            ctx.add_resource(resource)?;
        }
        Ok(ctx)
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn fhir_version(&self) -> FhirVersion {
        self.config.fhir_version
    }

    /// Register a conformance resource; it must carry a string `url`
    pub fn add_resource(&self, resource: Value) -> Result<()> {
        let url = resource
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidResource("resource has no canonical url".to_string()))?
            .to_string();

        if let Some(declared) = resource.get("fhirVersion").and_then(Value::as_str) {
            if FhirVersion::from_fhir_version(declared) != Some(self.config.fhir_version) {
                tracing::warn!(
                    url = %url,
                    declared = declared,
                    expected = %self.config.fhir_version,
                    "resource declares a different FHIR version"
                );
            }
        }

        let type_name = resource
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string);

        match self.resources.write() {
            Ok(mut resources) => resources.entry(url.clone()).or_default().push(Arc::new(resource)),
            Err(_) => {
                return Err(Error::InvalidResource(format!(
                    "resource store poisoned while adding {}",
                    url
                )))
            }
        }

        // Cached element lists may now be stale
        if let Some(cache) = &self.definitions {
            if let Ok(mut cache) = cache.lock() {
                cache.pop(&url);
                if let Some(type_name) = type_name {
                    cache.pop(&type_name);
                }
            }
        }

        tracing::debug!(url = %url, "registered conformance resource");
        Ok(())
    }

    /// Number of distinct canonical URLs known to the context
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached_definition(&self, type_name: &str) -> Option<Arc<[ElementDefinition]>> {
        let cache = self.definitions.as_ref()?;
        cache.lock().ok()?.get(type_name).cloned()
    }

    fn cache_definition(&self, type_name: &str, elements: &Arc<[ElementDefinition]>) {
        if let Some(cache) = &self.definitions {
            if let Ok(mut cache) = cache.lock() {
                cache.put(type_name.to_string(), Arc::clone(elements));
            }
        }
    }
}

impl Default for DefaultFhirContext {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}

impl FhirContext for DefaultFhirContext {
    fn get_resource_by_url(
        &self,
        canonical_url: &str,
        version: Option<&str>,
    ) -> Result<Option<Arc<Value>>> {
        let resources = self.resources.read().map_err(|_| {
            Error::InvalidResource(format!("resource store poisoned while reading {}", canonical_url))
        })?;
        let Some(candidates) = resources.get(canonical_url) else {
            return Ok(None);
        };
        let found = match version {
            Some(version) => candidates
                .iter()
                .rev()
                .find(|r| r.get("version").and_then(Value::as_str) == Some(version)),
            None => candidates.last(),
        };
        Ok(found.cloned())
    }

    fn resolve_definition(&self, type_name: &str) -> Result<Arc<[ElementDefinition]>> {
        if let Some(hit) = self.cached_definition(type_name) {
            tracing::debug!(type_name, "definition cache hit");
            return Ok(hit);
        }

        let Some(sd) = self.get_core_structure_definition_by_type(type_name)? else {
            tracing::debug!(type_name, "no StructureDefinition for type");
            return Err(Error::StructureDefinitionNotFound(type_name.to_string()));
        };
        let elements = snapshot_of(&sd)?;
        tracing::debug!(type_name, elements = elements.len(), "resolved definition");

        self.cache_definition(type_name, &elements);
        Ok(elements)
    }
}
