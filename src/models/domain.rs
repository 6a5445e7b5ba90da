use serde::{Deserialize, Serialize};

use crate::core::MatchError;

/// One row of the donor pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorRecord {
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    #[serde(rename = "organType")]
    pub organ_type: String,
    #[serde(rename = "hlaTyping")]
    pub hla_typing: String,
    #[serde(rename = "rhFactor")]
    pub rh_factor: String,
    pub bmi: f64,
    #[serde(rename = "causeOfDeath")]
    pub cause_of_death: String,
    #[serde(rename = "healthCondition")]
    pub health_condition: String,
    pub city: String,
    pub state: String,
    /// Source facility, carried through matching untouched
    pub hospital: String,
}

/// Requester profile used as the matching query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequesterProfile {
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    #[serde(rename = "hlaTyping")]
    pub hla_typing: String,
    #[serde(rename = "organType")]
    pub organ_type: String,
    pub state: String,
    pub city: String,
    pub bmi: f64,
    pub age: u32,
}

impl RequesterProfile {
    /// Check that every field is populated and numerically usable
    pub fn validate(&self) -> Result<(), MatchError> {
        let categorical = [
            ("Blood Type", &self.blood_type),
            ("HLA Typing", &self.hla_typing),
            ("Organ Type", &self.organ_type),
            ("State", &self.state),
            ("City", &self.city),
        ];
        for (field, value) in categorical {
            if value.trim().is_empty() {
                return Err(MatchError::malformed(field, "is required"));
            }
        }

        if !self.bmi.is_finite() {
            return Err(MatchError::malformed("BMI", "must be a finite number"));
        }

        Ok(())
    }
}

/// Which side of the age window a match came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Near,
    Far,
}

/// Fully decoded donor returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedDonor {
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(rename = "bloodType")]
    pub blood_type: String,
    #[serde(rename = "organType")]
    pub organ_type: String,
    #[serde(rename = "hlaTyping")]
    pub hla_typing: String,
    #[serde(rename = "rhFactor")]
    pub rh_factor: String,
    pub bmi: f64,
    #[serde(rename = "causeOfDeath")]
    pub cause_of_death: String,
    #[serde(rename = "healthCondition")]
    pub health_condition: String,
    pub city: String,
    pub state: String,
    pub hospital: String,
    pub tier: MatchTier,
    pub distance: f64,
}

impl MatchedDonor {
    /// True when every text field carries a value
    pub fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.gender,
            &self.blood_type,
            &self.organ_type,
            &self.hla_typing,
            &self.rh_factor,
            &self.cause_of_death,
            &self.health_condition,
            &self.city,
            &self.state,
            &self.hospital,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }
}

/// Caller-supplied quota and age tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchParams {
    /// Maximum number of results (k)
    pub limit: usize,
    /// Inclusive age tolerance around the requester's age (w)
    pub age_window: u32,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            limit: 10,
            age_window: 2,
        }
    }
}

/// Dropdown data derived from one registry snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryOptions {
    pub states: Vec<String>,
    #[serde(rename = "citiesByState")]
    pub cities_by_state: std::collections::BTreeMap<String, Vec<String>>,
    pub hospitals: Vec<String>,
}
