use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validate_phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VolunteerStatus {
    Registered,
    Approved,
    Active,
    Inactive,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum VolunteerRole {
    #[serde(rename = "Crowd Management")]
    #[sqlx(rename = "Crowd Management")]
    CrowdManagement,
    #[serde(rename = "Information Desk")]
    #[sqlx(rename = "Information Desk")]
    InformationDesk,
    #[serde(rename = "Medical Support")]
    #[sqlx(rename = "Medical Support")]
    MedicalSupport,
    #[serde(rename = "Parking Management")]
    #[sqlx(rename = "Parking Management")]
    ParkingManagement,
    #[serde(rename = "General Support")]
    #[sqlx(rename = "General Support")]
    GeneralSupport,
    #[serde(rename = "Security")]
    #[sqlx(rename = "Security")]
    Security,
    #[serde(rename = "Unassigned")]
    #[sqlx(rename = "Unassigned")]
    Unassigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum ShiftTiming {
    #[serde(rename = "Morning (6AM-12PM)")]
    #[sqlx(rename = "Morning (6AM-12PM)")]
    Morning,
    #[serde(rename = "Afternoon (12PM-6PM)")]
    #[sqlx(rename = "Afternoon (12PM-6PM)")]
    Afternoon,
    #[serde(rename = "Evening (6PM-10PM)")]
    #[sqlx(rename = "Evening (6PM-10PM)")]
    Evening,
    #[serde(rename = "Full Day")]
    #[sqlx(rename = "Full Day")]
    FullDay,
    #[serde(rename = "Not Assigned")]
    #[sqlx(rename = "Not Assigned")]
    NotAssigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum ExperienceLevel {
    #[serde(rename = "First Time")]
    #[sqlx(rename = "First Time")]
    FirstTime,
    #[serde(rename = "Experienced (1-2 events)")]
    #[sqlx(rename = "Experienced (1-2 events)")]
    Experienced,
    #[serde(rename = "Very Experienced (3+ events)")]
    #[sqlx(rename = "Very Experienced (3+ events)")]
    VeryExperienced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum Gender {
    #[serde(rename = "Male")]
    #[sqlx(rename = "Male")]
    Male,
    #[serde(rename = "Female")]
    #[sqlx(rename = "Female")]
    Female,
    #[serde(rename = "Other")]
    #[sqlx(rename = "Other")]
    Other,
    #[serde(rename = "Prefer not to say")]
    #[sqlx(rename = "Prefer not to say")]
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum TshirtSize {
    #[serde(rename = "XS")]
    #[sqlx(rename = "XS")]
    Xs,
    #[serde(rename = "S")]
    #[sqlx(rename = "S")]
    S,
    #[serde(rename = "M")]
    #[sqlx(rename = "M")]
    M,
    #[serde(rename = "L")]
    #[sqlx(rename = "L")]
    L,
    #[serde(rename = "XL")]
    #[sqlx(rename = "XL")]
    Xl,
    #[serde(rename = "XXL")]
    #[sqlx(rename = "XXL")]
    Xxl,
    #[serde(rename = "Not Required")]
    #[sqlx(rename = "Not Required")]
    NotRequired,
}

/// A registered volunteer. `preferred_role`/`preferred_shift` record what the
/// volunteer asked for at registration and are never rewritten; the
/// `assigned_*` columns are what the admin settles on.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub id: i64,
    pub name: String,
    pub contact_number: String,
    pub email: String,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub preferred_role: VolunteerRole,
    pub preferred_shift: ShiftTiming,
    pub assigned_role: VolunteerRole,
    pub assigned_area: Option<String>,
    pub shift_timing: ShiftTiming,
    pub experience: ExperienceLevel,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relation: Option<String>,
    pub tshirt_size: Option<TshirtSize>,
    pub status: VolunteerStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    pub relation: Option<String>,
}

/// Public registration payload. `assigned_role`/`shift_timing` here are the
/// volunteer's *preference*; status is always forced to `registered`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVolunteer {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom(function = validate_phone))]
    pub contact_number: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 16, max = 80))]
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub assigned_role: Option<VolunteerRole>,
    pub assigned_area: Option<String>,
    pub shift_timing: Option<ShiftTiming>,
    pub experience: Option<ExperienceLevel>,
    #[validate(nested)]
    pub emergency_contact: EmergencyContact,
    pub tshirt_size: Option<TshirtSize>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolunteer {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = validate_phone))]
    pub contact_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 16, max = 80))]
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub assigned_role: Option<VolunteerRole>,
    pub assigned_area: Option<String>,
    pub shift_timing: Option<ShiftTiming>,
    pub experience: Option<ExperienceLevel>,
    pub tshirt_size: Option<TshirtSize>,
    pub status: Option<VolunteerStatus>,
    pub notes: Option<String>,
}

impl UpdateVolunteer {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.contact_number.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.assigned_role.is_none()
            && self.assigned_area.is_none()
            && self.shift_timing.is_none()
            && self.experience.is_none()
            && self.tshirt_size.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }
}

/// Admin approval payload. Blank overrides fall back to the volunteer's
/// stored preference.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerStatusUpdate {
    pub status: VolunteerStatus,
    pub assigned_role: Option<VolunteerRole>,
    pub assigned_area: Option<String>,
    pub shift_timing: Option<ShiftTiming>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VolunteerListQuery {
    pub status: Option<VolunteerStatus>,
    pub assigned_role: Option<VolunteerRole>,
    pub shift_timing: Option<ShiftTiming>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct VolunteerRoleCount {
    pub role: VolunteerRole,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct VolunteerStatusCount {
    pub status: VolunteerStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct VolunteerShiftCount {
    pub shift: ShiftTiming,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerStats {
    pub role_stats: Vec<VolunteerRoleCount>,
    pub status_stats: Vec<VolunteerStatusCount>,
    pub shift_stats: Vec<VolunteerShiftCount>,
    pub total_volunteers: i64,
}
