//! Category encoding for the exact-match filter fields.
//!
//! An encoder is fitted on one pool snapshot and discarded with the query.
//! Codes are dense and assigned in sorted value order per field, so they are
//! only comparable by equality and only within the snapshot that built them.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::MatchError;
use crate::models::{DonorRecord, RequesterProfile};

/// Categorical fields that must match exactly between requester and donor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryField {
    BloodType,
    HlaTyping,
    OrganType,
    State,
    City,
}

impl CategoryField {
    pub const ALL: [CategoryField; 5] = [
        CategoryField::BloodType,
        CategoryField::HlaTyping,
        CategoryField::OrganType,
        CategoryField::State,
        CategoryField::City,
    ];

    /// Registry column name
    pub const fn column(self) -> &'static str {
        match self {
            CategoryField::BloodType => "Blood Type",
            CategoryField::HlaTyping => "HLA Typing",
            CategoryField::OrganType => "Organ Type",
            CategoryField::State => "State",
            CategoryField::City => "City",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub fn of_donor(self, donor: &DonorRecord) -> &str {
        match self {
            CategoryField::BloodType => &donor.blood_type,
            CategoryField::HlaTyping => &donor.hla_typing,
            CategoryField::OrganType => &donor.organ_type,
            CategoryField::State => &donor.state,
            CategoryField::City => &donor.city,
        }
    }

    pub fn of_profile(self, profile: &RequesterProfile) -> &str {
        match self {
            CategoryField::BloodType => &profile.blood_type,
            CategoryField::HlaTyping => &profile.hla_typing,
            CategoryField::OrganType => &profile.organ_type,
            CategoryField::State => &profile.state,
            CategoryField::City => &profile.city,
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Encoded values of the five filter fields, indexed in `CategoryField::ALL` order
pub type CategoryCodes = [u32; 5];

#[derive(Debug, Clone, Default)]
struct FieldCodes {
    values: Vec<String>,
    codes: HashMap<String, u32>,
}

impl FieldCodes {
    fn fit<'a>(observed: impl Iterator<Item = &'a str>) -> Self {
        let distinct: BTreeSet<&str> = observed.collect();
        let values: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        let codes = values
            .iter()
            .enumerate()
            .map(|(code, value)| (value.clone(), code as u32))
            .collect();

        Self { values, codes }
    }
}

/// Bijection between observed category values and dense integer codes
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    fields: [FieldCodes; 5],
}

impl CategoryEncoder {
    /// Build the encoding from the distinct values of a pool snapshot
    pub fn fit(pool: &[DonorRecord]) -> Self {
        let fields = CategoryField::ALL
            .map(|field| FieldCodes::fit(pool.iter().map(|donor| field.of_donor(donor))));

        Self { fields }
    }

    /// Code for `value`, or `UnknownCategory` if the pool never contained it
    pub fn encode(&self, field: CategoryField, value: &str) -> Result<u32, MatchError> {
        self.fields[field.index()]
            .codes
            .get(value)
            .copied()
            .ok_or_else(|| MatchError::UnknownCategory {
                field,
                value: value.to_string(),
            })
    }

    /// Original value behind `code`; `None` only for codes this encoder never issued
    pub fn decode(&self, field: CategoryField, code: u32) -> Option<&str> {
        self.fields[field.index()]
            .values
            .get(code as usize)
            .map(String::as_str)
    }

    pub fn distinct_count(&self, field: CategoryField) -> usize {
        self.fields[field.index()].values.len()
    }

    pub fn encode_donor(&self, donor: &DonorRecord) -> Result<CategoryCodes, MatchError> {
        self.encode_with(|field| field.of_donor(donor))
    }

    pub fn encode_profile(&self, profile: &RequesterProfile) -> Result<CategoryCodes, MatchError> {
        self.encode_with(|field| field.of_profile(profile))
    }

    fn encode_with<'a>(
        &self,
        value_of: impl Fn(CategoryField) -> &'a str,
    ) -> Result<CategoryCodes, MatchError> {
        let mut codes = [0u32; 5];
        for field in CategoryField::ALL {
            codes[field.index()] = self.encode(field, value_of(field))?;
        }
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donor(blood: &str, organ: &str, city: &str) -> DonorRecord {
        DonorRecord {
            name: "Donor".to_string(),
            age: 40,
            gender: "Male".to_string(),
            blood_type: blood.to_string(),
            organ_type: organ.to_string(),
            hla_typing: "A2".to_string(),
            rh_factor: "Positive".to_string(),
            bmi: 24.0,
            cause_of_death: "Trauma".to_string(),
            health_condition: "Good".to_string(),
            city: city.to_string(),
            state: "Kerala".to_string(),
            hospital: "City Hospital".to_string(),
        }
    }

    #[test]
    fn test_codes_are_dense_and_sorted() {
        let pool = vec![
            donor("O+", "Kidney", "Kochi"),
            donor("A+", "Liver", "Kochi"),
            donor("B-", "Kidney", "Thrissur"),
            donor("A+", "Heart", "Kochi"),
        ];
        let encoder = CategoryEncoder::fit(&pool);

        assert_eq!(encoder.distinct_count(CategoryField::BloodType), 3);
        assert_eq!(encoder.encode(CategoryField::BloodType, "A+"), Ok(0));
        assert_eq!(encoder.encode(CategoryField::BloodType, "B-"), Ok(1));
        assert_eq!(encoder.encode(CategoryField::BloodType, "O+"), Ok(2));
        assert_eq!(encoder.distinct_count(CategoryField::HlaTyping), 1);
    }

    #[test]
    fn test_decode_inverts_encode() {
        let pool = vec![
            donor("O+", "Kidney", "Kochi"),
            donor("AB-", "Cornea", "Thrissur"),
        ];
        let encoder = CategoryEncoder::fit(&pool);

        for record in &pool {
            for field in CategoryField::ALL {
                let value = field.of_donor(record);
                let code = encoder.encode(field, value).unwrap();
                assert_eq!(encoder.decode(field, code), Some(value));
            }
        }
    }

    #[test]
    fn test_unknown_value_fails_to_encode() {
        let encoder = CategoryEncoder::fit(&[donor("O+", "Kidney", "Kochi")]);

        let err = encoder.encode(CategoryField::OrganType, "Pancreas").unwrap_err();
        assert_eq!(
            err,
            MatchError::UnknownCategory {
                field: CategoryField::OrganType,
                value: "Pancreas".to_string(),
            }
        );
        assert_eq!(encoder.decode(CategoryField::OrganType, 7), None);
    }

    #[test]
    fn test_empty_pool_encodes_nothing() {
        let encoder = CategoryEncoder::fit(&[]);
        for field in CategoryField::ALL {
            assert_eq!(encoder.distinct_count(field), 0);
        }
        assert!(encoder.encode(CategoryField::City, "Kochi").is_err());
    }
}
