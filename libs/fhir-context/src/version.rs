//! FHIR release identification

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// FHIR release a context serves definitions for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FhirVersion {
    Stu3,
    #[default]
    R4,
    R4b,
    R5,
}

impl FhirVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            FhirVersion::Stu3 => "STU3",
            FhirVersion::R4 => "R4",
            FhirVersion::R4b => "R4B",
            FhirVersion::R5 => "R5",
        }
    }

    /// `(package name, version)` of the core specification package
    pub fn core_package(&self) -> (&'static str, &'static str) {
        match self {
            FhirVersion::Stu3 => ("hl7.fhir.r3.core", "3.0.2"),
            FhirVersion::R4 => ("hl7.fhir.r4.core", "4.0.1"),
            FhirVersion::R4b => ("hl7.fhir.r4b.core", "4.3.0"),
            FhirVersion::R5 => ("hl7.fhir.r5.core", "5.0.0"),
        }
    }

    /// Release a `fhirVersion` value (e.g. `"4.0.1"`) belongs to
    pub fn from_fhir_version(version: &str) -> Option<Self> {
        let mut parts = version.split('.');
        match (parts.next(), parts.next()) {
            (Some("3"), Some("0")) => Some(FhirVersion::Stu3),
            (Some("4"), Some("0")) => Some(FhirVersion::R4),
            (Some("4"), Some("3")) => Some(FhirVersion::R4b),
            (Some("5"), Some("0")) => Some(FhirVersion::R5),
            _ => None,
        }
    }
}

impl FromStr for FhirVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STU3" | "R3" => Ok(FhirVersion::Stu3),
            "R4" => Ok(FhirVersion::R4),
            "R4B" => Ok(FhirVersion::R4b),
            "R5" => Ok(FhirVersion::R5),
            _ => Self::from_fhir_version(s).ok_or_else(|| Error::InvalidFhirVersion(s.to_string())),
        }
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_release_names_and_numbers() {
        assert_eq!("R4".parse::<FhirVersion>().unwrap(), FhirVersion::R4);
        assert_eq!("r4b".parse::<FhirVersion>().unwrap(), FhirVersion::R4b);
        assert_eq!("STU3".parse::<FhirVersion>().unwrap(), FhirVersion::Stu3);
        assert_eq!("3.0.2".parse::<FhirVersion>().unwrap(), FhirVersion::Stu3);
        assert_eq!("4.0.1".parse::<FhirVersion>().unwrap(), FhirVersion::R4);
        assert_eq!("5.0.0".parse::<FhirVersion>().unwrap(), FhirVersion::R5);
        assert!(matches!(
            "R6".parse::<FhirVersion>(),
            Err(Error::InvalidFhirVersion(_))
        ));
    }

    #[test]
    fn serializes_as_release_name() {
        assert_eq!(serde_json::to_string(&FhirVersion::R4b).unwrap(), "\"R4B\"");
        let v: FhirVersion = serde_json::from_str("\"STU3\"").unwrap();
        assert_eq!(v, FhirVersion::Stu3);
        assert_eq!(v.core_package(), ("hl7.fhir.r3.core", "3.0.2"));
    }
}
