use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Load, Vehicle};

/// Request to filter candidates or propose matches for a set of loads
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1, message = "at least one load is required"))]
    pub loads: Vec<Load>,
    #[validate(length(min = 1, message = "at least one vehicle is required"))]
    pub vehicles: Vec<Vehicle>,
    /// How many candidates to keep per load before the union; the
    /// configured matching default applies when omitted
    #[serde(default, rename = "perLoad")]
    pub per_load: Option<usize>,
}
