//! Patient context supplied at consultation intake.
//!
//! The engine never inspects these fields; they are embedded verbatim in
//! the report. Intake may be skipped, in which case the sentinel
//! "not specified" gender suppresses the report's patient section.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

const AGE_MIN: u32 = 1;
const AGE_MAX: u32 = 120;
const WEIGHT_MIN: u32 = 1;
const WEIGHT_MAX: u32 = 300;

/// Patient gender, including the skipped-intake sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NotSpecified,
}

impl Gender {
    /// Human-readable label used by the report serializer.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NotSpecified => "Not specified",
        }
    }
}

/// Read-only patient record supplied once per consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContext {
    gender: Gender,
    age: u32,
    weight: u32,
    chronic_diseases: String,
}

impl PatientContext {
    /// Creates a validated patient context from intake form data.
    pub fn new(
        gender: Gender,
        age: u32,
        weight: u32,
        chronic_diseases: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !(AGE_MIN..=AGE_MAX).contains(&age) {
            return Err(ValidationError::out_of_range(
                "age",
                AGE_MIN as i32,
                AGE_MAX as i32,
                age as i32,
            ));
        }
        if !(WEIGHT_MIN..=WEIGHT_MAX).contains(&weight) {
            return Err(ValidationError::out_of_range(
                "weight",
                WEIGHT_MIN as i32,
                WEIGHT_MAX as i32,
                weight as i32,
            ));
        }
        Ok(Self {
            gender,
            age,
            weight,
            chronic_diseases: chronic_diseases.into(),
        })
    }

    /// Creates the sentinel context used when intake is skipped.
    pub fn not_specified() -> Self {
        Self {
            gender: Gender::NotSpecified,
            age: 0,
            weight: 0,
            chronic_diseases: String::new(),
        }
    }

    /// Returns true if patient data was actually supplied.
    pub fn is_specified(&self) -> bool {
        self.gender != Gender::NotSpecified
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn chronic_diseases(&self) -> &str {
        &self.chronic_diseases
    }
}
