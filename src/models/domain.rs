use serde::{Deserialize, Serialize};

/// Equipment a load requires or a vehicle carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentType {
    Reefer,
    Flatbed,
    DryVan,
    Tanker,
    Container,
    Bulk,
    Palletized,
}

/// Transport mode of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Truck,
    Plane,
    Ship,
}

/// Urgency of a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPriority {
    Standard,
    Express,
    Urgent,
}

/// A shipment to be placed on a vehicle
///
/// Immutable value object; produced by callers, consumed by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Load {
    pub id: String,
    /// Free-text "City, Region" origin
    pub origin: String,
    pub destination: String,
    pub equipment: EquipmentType,
    /// Load weight in pounds, positive
    #[serde(rename = "weightLbs")]
    pub weight_lbs: f64,
    #[serde(rename = "pickupDate", default)]
    pub pickup_date: Option<chrono::DateTime<chrono::Utc>>,
    pub priority: LoadPriority,
}

/// A vehicle in the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    /// Free-text current location
    pub location: String,
    pub equipment: EquipmentType,
    #[serde(rename = "availableDate", default)]
    pub available_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "vehicleType")]
    pub vehicle_type: VehicleType,
    /// Declared capacity in pounds, if known
    #[serde(rename = "capacityLbs", default)]
    pub capacity_lbs: Option<f64>,
}

/// A vehicle paired with its composite score for one load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub vehicle: Vehicle,
    pub score: f64,
}

/// One match proposed by the LLM matching call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchProposal {
    #[serde(rename = "loadId")]
    pub load_id: String,
    #[serde(rename = "vehicleId", alias = "truckId")]
    pub vehicle_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Continent buckets used for international classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continent {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Asia,
    Africa,
    Oceania,
}

/// Weights for the composite candidate score
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub location: f64,
    pub equipment: f64,
    pub vehicle_type: f64,
    pub capacity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location: 0.50,
            equipment: 0.30,
            vehicle_type: 0.15,
            capacity: 0.05,
        }
    }
}
