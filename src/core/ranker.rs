use std::cmp::Ordering;

use crate::core::distance::{bmi_age_distance, bmi_distance, calculate_age_window, is_within_age_window};
use crate::core::filters::EncodedDonor;
use crate::models::{MatchParams, MatchTier, RequesterProfile};

/// A compatible donor placed in the final ordering
#[derive(Debug, Clone, Copy)]
pub struct RankedDonor<'a> {
    pub donor: EncodedDonor<'a>,
    pub tier: MatchTier,
    pub distance: f64,
}

/// Rank compatible donors by physical proximity to the requester
///
/// # Policy
/// 1. Split candidates into the age window (near) and the rest (far)
/// 2. Enough near donors: return the `limit` closest by BMI
/// 3. Otherwise: all near donors in pool order, then the closest far donors
///    by joint (BMI, Age) distance until `limit` is reached
///
/// Ties keep pool order.
pub fn rank_candidates<'a>(
    candidates: Vec<EncodedDonor<'a>>,
    requester: &RequesterProfile,
    params: &MatchParams,
) -> Vec<RankedDonor<'a>> {
    if candidates.is_empty() || params.limit == 0 {
        return Vec::new();
    }

    let window = calculate_age_window(requester.age, params.age_window);
    let (near, far): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|donor| is_within_age_window(donor.record.age, &window));

    tracing::debug!(
        "Age window {}..={}: {} near, {} far",
        window.min_age,
        window.max_age,
        near.len(),
        far.len()
    );

    if near.len() >= params.limit {
        return nearest(
            near,
            params.limit,
            |donor| bmi_distance(donor.record.bmi, requester.bmi),
            MatchTier::Near,
        );
    }

    let remaining = params.limit - near.len();
    let mut ranked: Vec<RankedDonor<'a>> = near
        .into_iter()
        .map(|donor| RankedDonor {
            distance: bmi_distance(donor.record.bmi, requester.bmi),
            tier: MatchTier::Near,
            donor,
        })
        .collect();

    ranked.extend(nearest(
        far,
        remaining,
        |donor| bmi_age_distance(donor.record, requester),
        MatchTier::Far,
    ));

    ranked
}

/// Brute-force k-nearest selection with a stable tie-break on pool position
fn nearest<'a>(
    candidates: Vec<EncodedDonor<'a>>,
    k: usize,
    metric: impl Fn(&EncodedDonor<'a>) -> f64,
    tier: MatchTier,
) -> Vec<RankedDonor<'a>> {
    let mut scored: Vec<RankedDonor<'a>> = candidates
        .into_iter()
        .map(|donor| RankedDonor {
            distance: metric(&donor),
            tier,
            donor,
        })
        .collect();

    scored.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.donor.index.cmp(&b.donor.index))
    });

    scored.truncate(k);
    scored
}
