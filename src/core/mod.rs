// Core algorithm exports
pub mod distance;
pub mod encoder;
pub mod error;
pub mod filters;
pub mod matcher;
pub mod ranker;

pub use distance::{bmi_distance, bmi_age_distance, calculate_age_window, is_within_age_window, AgeWindow};
pub use encoder::{CategoryCodes, CategoryEncoder, CategoryField};
pub use error::MatchError;
pub use filters::{compatible_donors, encode_pool, filter_compatible, matches_categories, EncodedDonor};
pub use matcher::{assemble_match, Matcher, MatchResult};
pub use ranker::{rank_candidates, RankedDonor};
