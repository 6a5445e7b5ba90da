use serde::{Deserialize, Serialize};
use crate::models::domain::MatchedDonor;

/// Response for the donor match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindDonorsResponse {
    pub matches: Vec<MatchedDonor>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "compatibleCandidates")]
    pub compatible_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
