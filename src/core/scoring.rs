use rand::Rng;

use crate::core::geo::GeoTable;
use crate::models::{Load, LoadPriority, ScoringWeights, Vehicle, VehicleType};

/// Jitter half-width for the randomized scoring variant, in score points
const JITTER_POINTS: f64 = 2.0;

/// Neutral capacity sub-score for vehicles with no declared capacity
const UNDECLARED_CAPACITY_SCORE: f64 = 60.0;

/// Deterministic composite scorer for (load, vehicle) pairs.
///
/// Sub-scores (location, equipment, vehicle-type suitability, capacity
/// headroom) are each on a 0-100 scale and combined with fixed weights.
/// The tables are injected at construction so tests can substitute
/// fixtures; the scorer itself holds no mutable state and is safe to share
/// across request handlers.
#[derive(Debug, Clone)]
pub struct CandidateScorer {
    geo: GeoTable,
    weights: ScoringWeights,
}

impl CandidateScorer {
    pub fn new(geo: GeoTable, weights: ScoringWeights) -> Self {
        Self { geo, weights }
    }

    pub fn with_default_weights(geo: GeoTable) -> Self {
        Self::new(geo, ScoringWeights::default())
    }

    pub fn geo(&self) -> &GeoTable {
        &self.geo
    }

    /// Composite score in [0, 100]. Deterministic: same inputs and tables
    /// always give the same score.
    pub fn score(&self, load: &Load, vehicle: &Vehicle) -> f64 {
        let distance = self.geo.distance_miles(&load.origin, &vehicle.location);
        let location = location_score(distance);

        let equipment = if load.equipment == vehicle.equipment {
            100.0
        } else {
            0.0
        };

        let international = self.geo.is_international(&load.origin, &load.destination);
        let suitability = vehicle_type_score(
            vehicle.vehicle_type,
            load.priority,
            load.weight_lbs,
            international,
        );

        let capacity = capacity_score(load.weight_lbs, vehicle.capacity_lbs);

        let total = location * self.weights.location
            + equipment * self.weights.equipment
            + suitability * self.weights.vehicle_type
            + capacity * self.weights.capacity;

        total.clamp(0.0, 100.0)
    }

    /// Scoring variant with an explicit ±2 point jitter.
    ///
    /// The randomness source is injected by the caller rather than hidden
    /// inside the scorer, so the deterministic core stays independently
    /// testable. The result is still clamped to [0, 100].
    pub fn score_jittered<R: Rng>(&self, load: &Load, vehicle: &Vehicle, rng: &mut R) -> f64 {
        let jitter = rng.gen_range(-JITTER_POINTS..=JITTER_POINTS);
        (self.score(load, vehicle) + jitter).clamp(0.0, 100.0)
    }
}

/// Step function over proximity: tighter bands score higher.
///
/// Bands are monotonically non-increasing in distance. The sentinel
/// distance for unresolvable cities lands in the open-ended 5-point band.
#[inline]
pub fn location_score(distance_miles: f64) -> f64 {
    const BANDS: [(f64, f64); 10] = [
        (30.0, 100.0),
        (50.0, 98.0),
        (100.0, 92.0),
        (200.0, 82.0),
        (350.0, 70.0),
        (500.0, 58.0),
        (750.0, 45.0),
        (1000.0, 32.0),
        (1500.0, 20.0),
        (2500.0, 12.0),
    ];

    for (limit, score) in BANDS {
        if distance_miles <= limit {
            return score;
        }
    }
    5.0
}

/// Suitability of a transport mode for a load's priority, weight, and lane.
///
/// Trucks collapse to a low constant on international lanes; ships collapse
/// on domestic ones. Planes favor urgent freight but drop off hard for
/// heavy loads.
#[inline]
pub fn vehicle_type_score(
    vehicle_type: VehicleType,
    priority: LoadPriority,
    weight_lbs: f64,
    international: bool,
) -> f64 {
    match vehicle_type {
        VehicleType::Truck => {
            if international {
                10.0
            } else {
                match priority {
                    LoadPriority::Standard => 90.0,
                    LoadPriority::Express => 85.0,
                    LoadPriority::Urgent => 75.0,
                }
            }
        }
        VehicleType::Plane => {
            if weight_lbs > 60000.0 {
                return 15.0;
            }
            let mut score: f64 = 45.0;
            if international {
                score += 20.0;
            }
            score += match priority {
                LoadPriority::Urgent => 30.0,
                LoadPriority::Express => 20.0,
                LoadPriority::Standard => 0.0,
            };
            score.clamp(0.0, 100.0)
        }
        VehicleType::Ship => {
            if !international {
                return 15.0;
            }
            let mut score: f64 = 55.0;
            if weight_lbs >= 100000.0 {
                score += 35.0;
            } else if weight_lbs >= 50000.0 {
                score += 25.0;
            } else if weight_lbs >= 20000.0 {
                score += 10.0;
            }
            score.clamp(0.0, 100.0)
        }
    }
}

/// Capacity headroom as a fraction of declared capacity, on a 0-100 scale.
/// Undeclared capacity scores a neutral constant.
#[inline]
pub fn capacity_score(weight_lbs: f64, capacity_lbs: Option<f64>) -> f64 {
    match capacity_lbs {
        Some(capacity) if capacity > 0.0 => {
            (((capacity - weight_lbs) / capacity) * 100.0).clamp(0.0, 100.0)
        }
        _ => UNDECLARED_CAPACITY_SCORE,
    }
}
