use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::MatchError;
use crate::models::RequesterProfile;

/// Numeric form value: accepts either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(serde_json::Number),
    Text(String),
}

impl FormNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FormNumber::Number(n) => n.as_f64(),
            FormNumber::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            FormNumber::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            FormNumber::Text(s) => s.trim().parse::<u32>().ok(),
        }
    }
}

/// Request to match donors against a requester profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FindDonorsRequest {
    #[serde(rename = "bloodType", alias = "blood_type", default)]
    pub blood_type: Option<String>,
    #[serde(rename = "hlaTyping", alias = "hla_typing", default)]
    pub hla_typing: Option<String>,
    #[serde(rename = "organType", alias = "organ_type", default)]
    pub organ_type: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub bmi: Option<FormNumber>,
    #[serde(default)]
    pub age: Option<FormNumber>,
    #[validate(range(min = 1, max = 1000))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[validate(range(max = 150))]
    #[serde(rename = "ageWindow", alias = "age_window", default)]
    pub age_window: Option<u32>,
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, MatchError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(MatchError::malformed(field, "is required")),
    }
}

impl TryFrom<FindDonorsRequest> for RequesterProfile {
    type Error = MatchError;

    fn try_from(req: FindDonorsRequest) -> Result<Self, Self::Error> {
        let bmi = match &req.bmi {
            None => return Err(MatchError::malformed("BMI", "is required")),
            Some(value) => value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| MatchError::malformed("BMI", "must be a number"))?,
        };

        let age = match &req.age {
            None => return Err(MatchError::malformed("Age", "is required")),
            Some(value) => value
                .as_u32()
                .ok_or_else(|| MatchError::malformed("Age", "must be a non-negative integer"))?,
        };

        Ok(RequesterProfile {
            blood_type: required_text("Blood Type", req.blood_type)?,
            hla_typing: required_text("HLA Typing", req.hla_typing)?,
            organ_type: required_text("Organ Type", req.organ_type)?,
            state: required_text("State", req.state)?,
            city: required_text("City", req.city)?,
            bmi,
            age,
        })
    }
}
