use crate::core::encoder::{CategoryCodes, CategoryEncoder};
use crate::models::{DonorRecord, RequesterProfile};

/// A pool row together with its category codes under one encoding
#[derive(Debug, Clone, Copy)]
pub struct EncodedDonor<'a> {
    /// Position in the pool snapshot, used for stable tie-breaking
    pub index: usize,
    pub record: &'a DonorRecord,
    pub codes: CategoryCodes,
}

/// Encode every pool row with an encoder fitted on that same pool
///
/// Every row of the fitting pool encodes. A row the encoder was not fitted on
/// may carry an unseen value; it is excluded from matching and logged.
pub fn encode_pool<'a>(encoder: &CategoryEncoder, pool: &'a [DonorRecord]) -> Vec<EncodedDonor<'a>> {
    pool.iter()
        .enumerate()
        .filter_map(|(index, record)| match encoder.encode_donor(record) {
            Ok(codes) => Some(EncodedDonor { index, record, codes }),
            Err(e) => {
                tracing::warn!("Excluding pool row {} ({}) from matching: {}", index, record.name, e);
                None
            }
        })
        .collect()
}

/// Check if a donor's five category codes all equal the requested ones
#[inline]
pub fn matches_categories(donor: &EncodedDonor<'_>, requested: &CategoryCodes) -> bool {
    donor.codes == *requested
}

/// Keep the rows whose categories match exactly, preserving pool order
pub fn filter_compatible<'a>(
    encoded_pool: Vec<EncodedDonor<'a>>,
    requested: &CategoryCodes,
) -> Vec<EncodedDonor<'a>> {
    encoded_pool
        .into_iter()
        .filter(|donor| matches_categories(donor, requested))
        .collect()
}

/// Encode the profile and filter the pool against it
///
/// A profile value the pool has never seen means no donor can match, so the
/// result is simply empty.
pub fn compatible_donors<'a>(
    encoder: &CategoryEncoder,
    pool: &'a [DonorRecord],
    profile: &RequesterProfile,
) -> Vec<EncodedDonor<'a>> {
    let requested = match encoder.encode_profile(profile) {
        Ok(codes) => codes,
        Err(e) => {
            tracing::debug!("No compatible donors: {}", e);
            return Vec::new();
        }
    };

    filter_compatible(encode_pool(encoder, pool), &requested)
}
