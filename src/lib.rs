//! Freight Match - vehicle-load candidate matching service
//!
//! Deterministic multi-factor scoring over (load, vehicle) pairs, used to
//! cut a fleet down to a small candidate set before the LLM matching call.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{CandidateFilter, CandidateScorer, GeoTable, UNKNOWN_DISTANCE_MILES};
pub use models::{
    EquipmentType, Load, LoadPriority, MatchProposal, MatchRequest, ScoredCandidate,
    ScoringWeights, Vehicle, VehicleType,
};
