//! Element classification against core definitions resolved through a context

use ferrum_models::path::{get_name_from_path, is_root_path};
use ferrum_navigator::{ElementDefinition, ElementNavigator, Error};
use std::sync::OnceLock;

mod test_support;

static OBSERVATION: OnceLock<ElementNavigator> = OnceLock::new();

/// Fresh cursor over the shared Observation definition
fn obs_def() -> ElementNavigator {
    OBSERVATION
        .get_or_init(|| {
            ElementNavigator::for_type(test_support::context_stu3(), "Observation")
                .expect("Observation should resolve")
        })
        .shallow_copy()
}

fn navigator_for(type_name: &str) -> ElementNavigator {
    ElementNavigator::for_type(test_support::context_stu3(), type_name)
        .unwrap_or_else(|e| panic!("{} should resolve: {}", type_name, e))
}

#[test]
fn test_is_root_path() {
    assert!(!is_root_path(""));
    assert!(is_root_path("Patient"));
    assert!(is_root_path("integer"));
    assert!(!is_root_path("integer.value"));
    assert!(!is_root_path("Patient.extension.url"));
}

#[test]
fn test_is_repeating() {
    let def = ElementDefinition::new("X.y").unbounded();
    assert!(def.is_repeating());

    let def = ElementDefinition::new("X.y").prohibited();
    assert!(!def.is_repeating());

    let def = ElementDefinition::new("X.y").required(1, "1");
    assert!(!def.is_repeating());

    let def = ElementDefinition::new("X.y").required(2, "10");
    assert!(def.is_repeating());
}

#[test]
fn test_is_backbone() {
    let mut defs = obs_def();
    assert!(defs.jump_to_first("Observation.related"));
    assert!(defs.current().unwrap().is_backbone_element());

    assert!(defs.jump_to_first("Observation.identifier"));
    assert!(!defs.current().unwrap().is_backbone_element());
}

#[test]
fn test_distinct_type_codes() {
    let mut defs = obs_def();
    assert!(defs.jump_to_first("Observation.identifier"));
    assert_eq!(defs.current().unwrap().distinct_type_codes(), vec!["Identifier"]);

    assert!(defs.jump_to_first("Observation.effective[x]"));
    assert_eq!(
        defs.current().unwrap().distinct_type_codes(),
        vec!["dateTime", "Period"]
    );

    let def = ElementDefinition::new("X.y")
        .with_type("HumanName", Some("http://fhir/profile1"))
        .with_type("HumanName", Some("http://fhir/profile2"))
        .with_type("Identifier", None);
    assert_eq!(def.distinct_type_codes(), vec!["HumanName", "Identifier"]);
}

#[test]
fn test_is_reference() {
    let refr = ElementDefinition::new("X.y").reference("http://fhir/something");
    assert!(refr.is_reference());

    let refr = ElementDefinition::new("X.y").with_type("Identifier", None);
    assert!(!refr.is_reference());
}

#[test]
fn test_has_choice_suffix() {
    let mut defs = obs_def();
    assert!(defs.jump_to_first("Observation.value[x]"));
    assert!(defs.current().unwrap().has_choice_suffix());

    assert!(defs.jump_to_first("Observation.identifier"));
    assert!(!defs.current().unwrap().has_choice_suffix());
}

#[test]
fn test_is_choice_element() {
    let mut defs = obs_def();
    assert!(defs.jump_to_first("Observation.value[x]"));
    assert!(defs.current().unwrap().is_choice_element());

    // simulate a profile constraining value[x] to Quantity
    let mut ed = defs.current().unwrap().clone();
    ed.base = None;
    let ed = ed.renamed("Observation.valueQuantity");
    assert!(ed.is_choice_element());

    assert!(defs.jump_to_first("Observation.identifier"));
    assert!(!defs.current().unwrap().is_choice_element());
}

#[test]
fn test_matches_name() {
    let mut defs = obs_def();

    assert!(defs.jump_to_first("Observation.identifier"));
    assert!(defs.current().unwrap().matches_name("identifier"));
    assert!(!defs.current().unwrap().matches_name("identifie"));

    assert!(defs.jump_to_first("Observation.value[x]"));
    assert!(defs.current().unwrap().matches_name("value"));
    assert!(!defs.current().unwrap().matches_name("valueQuantity"));
    assert!(!defs.current().unwrap().matches_name("val"));

    // the fixture already carries base.path = Observation.value[x]
    let mut ed = defs.current().unwrap().clone();
    ed.path = "Observation.valueQuantity".to_string();
    assert!(ed.matches_name("value"));
    assert!(!ed.matches_name("valu"));
}

#[test]
fn test_is_primitive_value() {
    let mut defs = obs_def();
    assert!(defs.jump_to_first("Observation.identifier"));
    assert!(!defs.current().unwrap().is_primitive_value_constraint());

    let mut defs = navigator_for("string");
    assert!(defs.jump_to_first("string.value"));
    assert!(defs.current().unwrap().is_primitive_value_constraint());

    let mut defs = navigator_for("HumanName");
    assert!(defs.jump_to_first("HumanName.suffix"));
    assert!(!defs.current().unwrap().is_primitive_value_constraint());
}

#[test]
fn test_get_name_from_path() {
    assert_eq!(get_name_from_path("Patient"), "Patient");
    assert_eq!(get_name_from_path("Patient.name"), "name");
    assert_eq!(get_name_from_path("Patient.name.value[x]"), "value[x]");
}

#[test]
fn test_unknown_type_is_not_found() {
    let result = ElementNavigator::for_type(test_support::context_stu3(), "Questionnaire");
    assert!(matches!(
        result,
        Err(Error::FhirContext(ferrum_context::Error::StructureDefinitionNotFound(_)))
    ));
}
