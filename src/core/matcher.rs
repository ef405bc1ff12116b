use std::collections::HashSet;

use crate::core::filters::is_eligible;
use crate::core::scoring::CandidateScorer;
use crate::models::{Load, ScoredCandidate, Vehicle};

/// Candidate filter: cuts the O(loads x vehicles) pair set down to a small
/// union of per-load top-N lists before the (out-of-process) matching call.
///
/// Pure with respect to its inputs; safe to invoke concurrently from
/// multiple request handlers without locking.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    scorer: CandidateScorer,
}

impl CandidateFilter {
    pub fn new(scorer: CandidateScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &CandidateScorer {
        &self.scorer
    }

    /// Score every eligible vehicle for one load and rank descending.
    ///
    /// Ineligible vehicles (wrong mode for the equipment, or over declared
    /// capacity) are dropped before scoring. The sort is stable, so ties
    /// keep the original input order.
    pub fn rank_for_load(&self, load: &Load, vehicles: &[Vehicle]) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = vehicles
            .iter()
            .filter(|vehicle| is_eligible(load, vehicle))
            .map(|vehicle| ScoredCandidate {
                vehicle: vehicle.clone(),
                score: self.scorer.score(load, vehicle),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }

    /// Top-N eligible vehicles for one load, best first.
    ///
    /// A load with zero eligible vehicles yields an empty list, not an
    /// error; downstream matching then legitimately proposes nothing for it.
    pub fn filter_for_load(&self, load: &Load, vehicles: &[Vehicle], top_n: usize) -> Vec<Vehicle> {
        self.rank_for_load(load, vehicles)
            .into_iter()
            .take(top_n)
            .map(|candidate| candidate.vehicle)
            .collect()
    }

    /// Union of per-load top-N lists, deduplicated by vehicle id.
    ///
    /// Order follows first appearance across the per-load lists; callers
    /// must not attach meaning to it.
    pub fn filter_for_fleet(
        &self,
        loads: &[Load],
        vehicles: &[Vehicle],
        per_load: usize,
    ) -> Vec<Vehicle> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut union: Vec<Vehicle> = Vec::new();

        for load in loads {
            for vehicle in self.filter_for_load(load, vehicles, per_load) {
                if seen.insert(vehicle.id.clone()) {
                    union.push(vehicle);
                }
            }
        }

        union
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::GeoTable;
    use crate::models::{EquipmentType, LoadPriority, VehicleType};

    fn test_load(id: &str, equipment: EquipmentType, weight_lbs: f64) -> Load {
        Load {
            id: id.to_string(),
            origin: "Dallas, TX".to_string(),
            destination: "Chicago, IL".to_string(),
            equipment,
            weight_lbs,
            pickup_date: None,
            priority: LoadPriority::Standard,
        }
    }

    fn test_vehicle(
        id: &str,
        vehicle_type: VehicleType,
        equipment: EquipmentType,
        location: &str,
        capacity: Option<f64>,
    ) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            location: location.to_string(),
            equipment,
            available_date: None,
            vehicle_type,
            capacity_lbs: capacity,
        }
    }

    fn test_filter() -> CandidateFilter {
        CandidateFilter::new(CandidateScorer::with_default_weights(GeoTable::default()))
    }

    #[test]
    fn test_rank_excludes_ineligible() {
        let filter = test_filter();
        let load = test_load("l1", EquipmentType::Reefer, 42000.0);

        let vehicles = vec![
            test_vehicle("truck", VehicleType::Truck, EquipmentType::Reefer, "Dallas, TX", Some(45000.0)),
            test_vehicle("ship", VehicleType::Ship, EquipmentType::Container, "Dallas, TX", Some(500000.0)),
        ];

        let ranked = filter.rank_for_load(&load, &vehicles);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].vehicle.id, "truck");
    }

    #[test]
    fn test_rank_sorted_descending() {
        let filter = test_filter();
        let load = test_load("l1", EquipmentType::DryVan, 30000.0);

        let vehicles = vec![
            test_vehicle("far", VehicleType::Truck, EquipmentType::DryVan, "Seattle, WA", Some(45000.0)),
            test_vehicle("near", VehicleType::Truck, EquipmentType::DryVan, "Dallas, TX", Some(45000.0)),
        ];

        let ranked = filter.rank_for_load(&load, &vehicles);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].vehicle.id, "near");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let filter = test_filter();
        let load = test_load("l1", EquipmentType::DryVan, 30000.0);

        // Identical vehicles except for id produce identical scores
        let vehicles = vec![
            test_vehicle("first", VehicleType::Truck, EquipmentType::DryVan, "Dallas, TX", Some(45000.0)),
            test_vehicle("second", VehicleType::Truck, EquipmentType::DryVan, "Dallas, TX", Some(45000.0)),
        ];

        let ranked = filter.rank_for_load(&load, &vehicles);
        assert_eq!(ranked[0].vehicle.id, "first");
        assert_eq!(ranked[1].vehicle.id, "second");
    }

    #[test]
    fn test_filter_for_load_respects_top_n() {
        let filter = test_filter();
        let load = test_load("l1", EquipmentType::DryVan, 30000.0);

        let vehicles: Vec<Vehicle> = (0..10)
            .map(|i| {
                test_vehicle(
                    &format!("v{}", i),
                    VehicleType::Truck,
                    EquipmentType::DryVan,
                    "Dallas, TX",
                    Some(45000.0),
                )
            })
            .collect();

        assert_eq!(filter.filter_for_load(&load, &vehicles, 3).len(), 3);
        // top_n larger than eligible count returns everything
        assert_eq!(filter.filter_for_load(&load, &vehicles, 50).len(), 10);
    }

    #[test]
    fn test_no_eligible_vehicles_returns_empty() {
        let filter = test_filter();
        let load = test_load("l1", EquipmentType::Reefer, 42000.0);

        let vehicles = vec![
            test_vehicle("ship", VehicleType::Ship, EquipmentType::Bulk, "Houston, TX", Some(500000.0)),
        ];

        assert!(filter.filter_for_load(&load, &vehicles, 5).is_empty());
    }

    #[test]
    fn test_fleet_union_deduplicates() {
        let filter = test_filter();

        // Two loads with the same requirements: the best vehicle tops both
        // per-load lists but must appear once in the union
        let loads = vec![
            test_load("l1", EquipmentType::DryVan, 30000.0),
            test_load("l2", EquipmentType::DryVan, 28000.0),
        ];

        let vehicles = vec![
            test_vehicle("shared", VehicleType::Truck, EquipmentType::DryVan, "Dallas, TX", Some(45000.0)),
            test_vehicle("other", VehicleType::Truck, EquipmentType::DryVan, "Chicago, IL", Some(45000.0)),
        ];

        let union = filter.filter_for_fleet(&loads, &vehicles, 2);

        let mut ids: Vec<&str> = union.iter().map(|v| v.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), union.len(), "union must not contain duplicates");
        assert_eq!(union.len(), 2);
    }

    #[test]
    fn test_overweight_load_excludes_all_trucks() {
        let filter = test_filter();
        let load = Load {
            id: "heavy".to_string(),
            origin: "Houston, TX".to_string(),
            destination: "Tokyo, Japan".to_string(),
            equipment: EquipmentType::Container,
            weight_lbs: 120000.0,
            pickup_date: None,
            priority: LoadPriority::Standard,
        };

        let vehicles = vec![
            test_vehicle("t1", VehicleType::Truck, EquipmentType::DryVan, "Houston, TX", Some(45000.0)),
            test_vehicle("t2", VehicleType::Truck, EquipmentType::Flatbed, "Houston, TX", Some(60000.0)),
            test_vehicle("ship", VehicleType::Ship, EquipmentType::Container, "Houston, TX", Some(500000.0)),
        ];

        let candidates = filter.filter_for_load(&load, &vehicles, 10);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "ship");
    }
}
