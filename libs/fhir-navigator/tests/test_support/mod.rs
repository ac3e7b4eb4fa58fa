#![allow(dead_code)]

use ferrum_context::{ContextConfig, DefaultFhirContext, FhirVersion};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static CONTEXT_STU3: OnceLock<DefaultFhirContext> = OnceLock::new();

/// Route `tracing` output through the test harness; filter with `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fhir-test-cases")
}

pub fn load_json(relative: &str) -> Value {
    let path = fixtures_root().join(relative);
    let content =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", path, e))
}

/// STU3 context holding the Observation, HumanName and string definitions
pub fn context_stu3() -> &'static DefaultFhirContext {
    init_tracing();
    CONTEXT_STU3.get_or_init(|| {
        DefaultFhirContext::from_resources(
            ContextConfig::default().with_fhir_version(FhirVersion::Stu3),
            [
                "stu3/structuredefinition-Observation.json",
                "stu3/structuredefinition-HumanName.json",
                "stu3/structuredefinition-string.json",
            ]
            .into_iter()
            .map(load_json),
        )
        .expect("Failed to create STU3 context")
    })
}
