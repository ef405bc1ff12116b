use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchProposal, ScoredCandidate, Vehicle};

/// Per-load ranked candidate list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCandidates {
    #[serde(rename = "loadId")]
    pub load_id: String,
    pub candidates: Vec<ScoredCandidate>,
}

/// Response for the deterministic candidates endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    #[serde(rename = "perLoad")]
    pub per_load: Vec<LoadCandidates>,
    /// Deduplicated union of all per-load top-N lists
    #[serde(rename = "candidateVehicles")]
    pub candidate_vehicles: Vec<Vehicle>,
    #[serde(rename = "totalVehicles")]
    pub total_vehicles: usize,
}

/// Response for the LLM-backed match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchProposal>,
    /// Size of the reduced candidate set sent to the LLM
    #[serde(rename = "candidatesConsidered")]
    pub candidates_considered: usize,
    #[serde(rename = "totalVehicles")]
    pub total_vehicles: usize,
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
