//! Dotted element path utilities
//!
//! Element paths address nodes of a flattened StructureDefinition tree. The first
//! segment is the type name of the definition root (`Patient`, `string`), the
//! following segments are element names. A trailing `[x]` on a segment marks an
//! unresolved choice element (`Observation.value[x]`).
//!
//! All functions here are pure string operations; none of them allocate.

/// Literal suffix carried by unresolved choice element names
pub const CHOICE_SUFFIX: &str = "[x]";

const SEPARATOR: char = '.';

/// Returns true if `path` addresses the root of a definition.
///
/// A root path is non-empty and has no `.` separator, so both `"Patient"` and a
/// bare primitive type such as `"integer"` qualify, while `""` does not.
pub fn is_root_path(path: &str) -> bool {
    !path.is_empty() && !path.contains(SEPARATOR)
}

/// Last segment of `path`, or the whole path when it is a root path.
///
/// A choice suffix is kept verbatim: `"Patient.name.value[x]"` yields `"value[x]"`.
pub fn get_name_from_path(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Everything before the last `.`, or `None` for root (and empty) paths
pub fn get_parent_path(path: &str) -> Option<&str> {
    path.rfind(SEPARATOR).map(|pos| &path[..pos])
}

/// True if the last segment of `path` ends with `[x]`
pub fn has_choice_suffix(path: &str) -> bool {
    get_name_from_path(path).ends_with(CHOICE_SUFFIX)
}

/// Removes a trailing `[x]` from an element name, if present
pub fn strip_choice_suffix(name: &str) -> &str {
    name.strip_suffix(CHOICE_SUFFIX).unwrap_or(name)
}

/// Number of separators in `path`; the root has depth 0
pub fn path_depth(path: &str) -> usize {
    path.matches(SEPARATOR).count()
}

/// True if `path` lies strictly below `ancestor` (dot-prefix match, not string prefix)
pub fn is_descendant_path(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'.'
}

/// True if `child` lies exactly one level below `parent`
pub fn is_child_path(parent: &str, child: &str) -> bool {
    is_descendant_path(parent, child) && !child[parent.len() + 1..].contains(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_paths() {
        assert!(!is_root_path(""));
        assert!(is_root_path("Patient"));
        assert!(is_root_path("integer"));
        assert!(!is_root_path("integer.value"));
        assert!(!is_root_path("Patient.extension.url"));
    }

    #[test]
    fn name_from_path() {
        assert_eq!(get_name_from_path("Patient"), "Patient");
        assert_eq!(get_name_from_path("Patient.name"), "name");
        assert_eq!(get_name_from_path("Patient.name.value[x]"), "value[x]");
        assert_eq!(get_name_from_path(""), "");
    }

    #[test]
    fn parent_path() {
        assert_eq!(get_parent_path("Patient"), None);
        assert_eq!(get_parent_path(""), None);
        assert_eq!(get_parent_path("Patient.name"), Some("Patient"));
        assert_eq!(get_parent_path("Patient.name.given"), Some("Patient.name"));
    }

    #[test]
    fn choice_suffix() {
        assert!(has_choice_suffix("Observation.value[x]"));
        assert!(has_choice_suffix("value[x]"));
        assert!(!has_choice_suffix("Observation.identifier"));
        assert!(!has_choice_suffix("Observation.value[x].id"));

        assert_eq!(strip_choice_suffix("value[x]"), "value");
        assert_eq!(strip_choice_suffix("valueQuantity"), "valueQuantity");
    }

    #[test]
    fn depth_and_descent() {
        assert_eq!(path_depth("Observation"), 0);
        assert_eq!(path_depth("Observation.component.code"), 2);

        assert!(is_descendant_path("Observation", "Observation.code"));
        assert!(is_descendant_path("Observation", "Observation.component.code"));
        assert!(!is_descendant_path("Observation", "Observation"));
        assert!(!is_descendant_path("Observation.code", "Observation.codeX"));

        assert!(is_child_path("Observation", "Observation.component"));
        assert!(!is_child_path("Observation", "Observation.component.code"));
        assert!(!is_child_path("Observation.value", "Observation.valueQuantity"));
    }
}
