// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DonorRecord, RequesterProfile, MatchedDonor, MatchTier, MatchParams, RegistryOptions};
pub use requests::{FindDonorsRequest, FormNumber};
pub use responses::{FindDonorsResponse, HealthResponse, ErrorResponse};
