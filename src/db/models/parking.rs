use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validate_phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum Zone {
    #[serde(rename = "Zone A")]
    #[sqlx(rename = "Zone A")]
    ZoneA,
    #[serde(rename = "Zone B")]
    #[sqlx(rename = "Zone B")]
    ZoneB,
    #[serde(rename = "Zone C")]
    #[sqlx(rename = "Zone C")]
    ZoneC,
    #[serde(rename = "Zone D")]
    #[sqlx(rename = "Zone D")]
    ZoneD,
    #[serde(rename = "VIP Zone")]
    #[sqlx(rename = "VIP Zone")]
    VipZone,
    #[serde(rename = "Two Wheeler Zone")]
    #[sqlx(rename = "Two Wheeler Zone")]
    TwoWheelerZone,
    #[serde(rename = "Four Wheeler Zone")]
    #[sqlx(rename = "Four Wheeler Zone")]
    FourWheelerZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum VehicleType {
    #[serde(rename = "Two Wheeler")]
    #[sqlx(rename = "Two Wheeler")]
    TwoWheeler,
    #[serde(rename = "Four Wheeler")]
    #[sqlx(rename = "Four Wheeler")]
    FourWheeler,
    #[serde(rename = "Heavy Vehicle")]
    #[sqlx(rename = "Heavy Vehicle")]
    HeavyVehicle,
    #[serde(rename = "Any")]
    #[sqlx(rename = "Any")]
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl SlotStatus {
    /// Write-time consistency rule: `occupied` forces the flag on,
    /// `available` forces it off, reserved/maintenance leave it alone.
    /// Runs on every persist so a direct status edit can never leave the
    /// two fields contradictory.
    pub fn derive_occupancy(self, current: bool) -> bool {
        match self {
            SlotStatus::Occupied => true,
            SlotStatus::Available => false,
            SlotStatus::Reserved | SlotStatus::Maintenance => current,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Exempt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ParkingEventType {
    CheckIn,
    CheckOut,
}

/// A single trackable parking space. Vehicle fields are populated only while
/// the slot is occupied and are wiped on checkout.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSlot {
    pub id: i64,
    pub slot_number: String,
    pub zone: Zone,
    pub vehicle_type: VehicleType,
    pub status: SlotStatus,
    pub is_occupied: bool,
    pub vehicle_number: Option<String>,
    pub driver_name: Option<String>,
    pub driver_contact: Option<String>,
    pub attendant: Option<String>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub duration: i64,
    pub parking_fee: f64,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewParkingSlot {
    #[validate(length(min = 1, max = 20))]
    pub slot_number: String,
    pub zone: Zone,
    pub vehicle_type: Option<VehicleType>,
    pub status: Option<SlotStatus>,
    pub attendant: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParkingSlot {
    #[validate(length(min = 1, max = 20))]
    pub slot_number: Option<String>,
    pub zone: Option<Zone>,
    pub vehicle_type: Option<VehicleType>,
    pub status: Option<SlotStatus>,
    pub attendant: Option<String>,
    pub notes: Option<String>,
}

impl UpdateParkingSlot {
    pub fn is_empty(&self) -> bool {
        self.slot_number.is_none()
            && self.zone.is_none()
            && self.vehicle_type.is_none()
            && self.status.is_none()
            && self.attendant.is_none()
            && self.notes.is_none()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    #[validate(length(min = 1, max = 20))]
    pub vehicle_number: String,
    #[validate(length(min = 1, max = 100))]
    pub driver_name: Option<String>,
    #[validate(custom(function = validate_phone))]
    pub driver_contact: Option<String>,
    pub attendant: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutRequest {
    pub parking_fee: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
}

/// Canonical checkout receipt. Returned to the caller at checkout time; the
/// slot's vehicle fields are cleared in the same write, so this snapshot is
/// not re-derivable afterwards.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub slot_number: String,
    pub vehicle_number: Option<String>,
    pub driver_name: Option<String>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: DateTime<Utc>,
    pub duration: i64,
    pub parking_fee: f64,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ParkingListQuery {
    pub zone: Option<Zone>,
    pub status: Option<SlotStatus>,
    pub vehicle_type: Option<VehicleType>,
    pub is_occupied: Option<bool>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStats {
    pub zone: Zone,
    pub total_slots: i64,
    pub occupied_slots: i64,
    pub available_slots: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct SlotStatusCount {
    pub status: SlotStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParkingStats {
    pub total_slots: i64,
    pub occupied_slots: i64,
    pub available_slots: i64,
    /// Percentage with two decimals, e.g. "30.00"; "0.00" when no slots exist.
    pub occupancy_rate: String,
    pub zone_stats: Vec<ZoneStats>,
    pub status_stats: Vec<SlotStatusCount>,
}

#[cfg(test)]
mod tests {
    use super::SlotStatus;

    #[test]
    fn occupancy_follows_status() {
        assert!(SlotStatus::Occupied.derive_occupancy(false));
        assert!(!SlotStatus::Available.derive_occupancy(true));
    }

    #[test]
    fn reserved_and_maintenance_keep_flag() {
        assert!(SlotStatus::Reserved.derive_occupancy(true));
        assert!(!SlotStatus::Reserved.derive_occupancy(false));
        assert!(!SlotStatus::Maintenance.derive_occupancy(false));
    }
}
