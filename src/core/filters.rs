use crate::models::{EquipmentType, Load, Vehicle, VehicleType};

/// Whether a vehicle type can physically carry a given equipment type.
///
/// This is a hard eligibility rule applied before scoring, not a score
/// component: a mismatch excludes the vehicle entirely.
#[inline]
pub fn can_carry(vehicle_type: VehicleType, equipment: EquipmentType) -> bool {
    use EquipmentType::*;

    match vehicle_type {
        VehicleType::Truck => matches!(equipment, Reefer | Flatbed | DryVan | Tanker),
        VehicleType::Plane => matches!(equipment, Palletized | Container),
        VehicleType::Ship => matches!(equipment, Container | Bulk),
    }
}

/// Whether the vehicle's declared capacity can take the load's weight.
/// Vehicles with no declared capacity pass the guard.
#[inline]
pub fn within_capacity(load: &Load, vehicle: &Vehicle) -> bool {
    match vehicle.capacity_lbs {
        Some(capacity) => load.weight_lbs <= capacity,
        None => true,
    }
}

/// Combined hard filter. Ineligible vehicles are silently dropped by the
/// candidate filter, never reported per-vehicle.
#[inline]
pub fn is_eligible(load: &Load, vehicle: &Vehicle) -> bool {
    can_carry(vehicle.vehicle_type, load.equipment) && within_capacity(load, vehicle)
}
