// Core algorithm exports
pub mod filters;
pub mod geo;
pub mod matcher;
pub mod scoring;

pub use filters::{can_carry, is_eligible, within_capacity};
pub use geo::{haversine_miles, GeoTable, UNKNOWN_DISTANCE_MILES};
pub use matcher::CandidateFilter;
pub use scoring::{capacity_score, location_score, vehicle_type_score, CandidateScorer};
