use crate::core::{
    encoder::{CategoryEncoder, CategoryField},
    filters::compatible_donors,
    ranker::{rank_candidates, RankedDonor},
    MatchError,
};
use crate::models::{DonorRecord, MatchParams, MatchedDonor, RequesterProfile};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<MatchedDonor>,
    pub total_candidates: usize,
    pub compatible_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Fit a category encoding on the pool snapshot
/// 2. Exact categorical compatibility filter
/// 3. Age-window proximity ranking with far-set fill
/// 4. Decode and assemble display records
///
/// The matcher holds no pool state; every call builds its own encoding.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    defaults: MatchParams,
}

impl Matcher {
    pub fn new(defaults: MatchParams) -> Self {
        Self { defaults }
    }

    pub fn with_default_params() -> Self {
        Self {
            defaults: MatchParams::default(),
        }
    }

    pub fn defaults(&self) -> MatchParams {
        self.defaults
    }

    /// Find donors using the configured quota and age window
    pub fn find_donors(
        &self,
        profile: &RequesterProfile,
        pool: &[DonorRecord],
    ) -> Result<MatchResult, MatchError> {
        self.find_donors_with(profile, pool, self.defaults)
    }

    /// Find donors compatible with `profile` in one pool snapshot
    ///
    /// # Arguments
    /// * `profile` - The requester's categorical and physical attributes
    /// * `pool` - Every donor record read for this query
    /// * `params` - Quota and age tolerance
    ///
    /// # Returns
    /// Ranked donors (possibly empty), or `MalformedProfile` for unusable input.
    /// Requested categories that the pool has never seen yield an empty result.
    pub fn find_donors_with(
        &self,
        profile: &RequesterProfile,
        pool: &[DonorRecord],
        params: MatchParams,
    ) -> Result<MatchResult, MatchError> {
        profile.validate()?;

        let total_candidates = pool.len();
        let encoder = CategoryEncoder::fit(pool);

        let compatible = compatible_donors(&encoder, pool, profile);
        let compatible_candidates = compatible.len();
        tracing::debug!(
            "{} of {} donors pass the compatibility filter",
            compatible_candidates,
            total_candidates
        );

        let matches: Vec<MatchedDonor> = rank_candidates(compatible, profile, &params)
            .into_iter()
            .filter_map(|ranked| assemble_match(&encoder, ranked))
            .filter(MatchedDonor::is_complete)
            .collect();

        Ok(MatchResult {
            matches,
            total_candidates,
            compatible_candidates,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_params()
    }
}

/// Decode a ranked row back to display form, carrying the hospital through
///
/// Returns `None` if a code does not belong to `encoder`.
pub fn assemble_match(encoder: &CategoryEncoder, ranked: RankedDonor<'_>) -> Option<MatchedDonor> {
    let record = ranked.donor.record;
    let codes = ranked.donor.codes;
    let decode = |field: CategoryField| {
        encoder
            .decode(field, codes[field.index()])
            .map(str::to_string)
    };

    Some(MatchedDonor {
        name: record.name.clone(),
        age: record.age,
        gender: record.gender.clone(),
        blood_type: decode(CategoryField::BloodType)?,
        organ_type: decode(CategoryField::OrganType)?,
        hla_typing: decode(CategoryField::HlaTyping)?,
        rh_factor: record.rh_factor.clone(),
        bmi: record.bmi,
        cause_of_death: record.cause_of_death.clone(),
        health_condition: record.health_condition.clone(),
        city: decode(CategoryField::City)?,
        state: decode(CategoryField::State)?,
        hospital: record.hospital.clone(),
        tier: ranked.tier,
        distance: ranked.distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchTier;

    fn create_donor(name: &str, age: u32, bmi: f64, organ: &str) -> DonorRecord {
        DonorRecord {
            name: name.to_string(),
            age,
            gender: "Female".to_string(),
            blood_type: "A+".to_string(),
            organ_type: organ.to_string(),
            hla_typing: "A1".to_string(),
            rh_factor: "Positive".to_string(),
            bmi,
            cause_of_death: "Head injury".to_string(),
            health_condition: "Good".to_string(),
            city: "Jaipur".to_string(),
            state: "Rajasthan".to_string(),
            hospital: format!("{} Memorial", name),
        }
    }

    fn create_profile(age: u32, bmi: f64, organ: &str) -> RequesterProfile {
        RequesterProfile {
            blood_type: "A+".to_string(),
            hla_typing: "A1".to_string(),
            organ_type: organ.to_string(),
            state: "Rajasthan".to_string(),
            city: "Jaipur".to_string(),
            bmi,
            age,
        }
    }

    #[test]
    fn test_find_donors_basic() {
        let matcher = Matcher::with_default_params();
        let pool = vec![
            create_donor("1", 40, 25.0, "Kidney"),
            create_donor("2", 40, 25.0, "Liver"),
        ];

        let result = matcher.find_donors(&create_profile(40, 25.0, "Kidney"), &pool).unwrap();

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].name, "1");
        assert_eq!(result.matches[0].hospital, "1 Memorial");
        assert_eq!(result.matches[0].organ_type, "Kidney");
        assert_eq!(result.total_candidates, 2);
        assert_eq!(result.compatible_candidates, 1);
    }

    #[test]
    fn test_incomplete_rows_are_dropped() {
        let matcher = Matcher::with_default_params();
        let mut missing_hospital = create_donor("2", 40, 25.0, "Kidney");
        missing_hospital.hospital = String::new();
        let pool = vec![create_donor("1", 40, 25.0, "Kidney"), missing_hospital];

        let result = matcher.find_donors(&create_profile(40, 25.0, "Kidney"), &pool).unwrap();

        assert_eq!(result.compatible_candidates, 2);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].name, "1");
    }

    #[test]
    fn test_non_finite_bmi_is_rejected() {
        let matcher = Matcher::with_default_params();
        let pool = vec![create_donor("1", 40, 25.0, "Kidney")];

        let err = matcher
            .find_donors(&create_profile(40, f64::NAN, "Kidney"), &pool)
            .unwrap_err();

        assert!(matches!(err, MatchError::MalformedProfile { field: "BMI", .. }));
    }

    #[test]
    fn test_far_fill_reports_tier() {
        let matcher = Matcher::new(MatchParams { limit: 2, age_window: 2 });
        let pool = vec![
            create_donor("near", 41, 26.0, "Kidney"),
            create_donor("far", 50, 25.0, "Kidney"),
        ];

        let result = matcher.find_donors(&create_profile(40, 25.0, "Kidney"), &pool).unwrap();

        let tiers: Vec<MatchTier> = result.matches.iter().map(|m| m.tier).collect();
        assert_eq!(tiers, vec![MatchTier::Near, MatchTier::Far]);
    }
}
