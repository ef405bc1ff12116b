// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Continent, EquipmentType, Load, LoadPriority, MatchProposal, ScoredCandidate, ScoringWeights,
    Vehicle, VehicleType,
};
pub use requests::MatchRequest;
pub use responses::{CandidatesResponse, ErrorResponse, HealthResponse, LoadCandidates, MatchResponse};
