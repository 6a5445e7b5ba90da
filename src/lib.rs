//! Donor Match - compatibility matching over a tabular donor registry
//!
//! This library provides the matching pipeline used by the donor match service:
//! an exact categorical compatibility filter (blood type, HLA typing, organ type,
//! state, city) followed by nearest-neighbor ranking on BMI and age.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchResult, MatchError, CategoryEncoder, CategoryField};
pub use crate::models::{DonorRecord, RequesterProfile, MatchedDonor, MatchParams, MatchTier, FindDonorsRequest, FindDonorsResponse};
pub use crate::services::{DonorRegistry, RegistryError};
