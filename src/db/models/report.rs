use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validate_phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum ReportType {
    #[serde(rename = "Quality Issue")]
    #[sqlx(rename = "Quality Issue")]
    QualityIssue,
    #[serde(rename = "Overcharging")]
    #[sqlx(rename = "Overcharging")]
    Overcharging,
    #[serde(rename = "Misbehavior")]
    #[sqlx(rename = "Misbehavior")]
    Misbehavior,
    #[serde(rename = "Hygiene Issue")]
    #[sqlx(rename = "Hygiene Issue")]
    HygieneIssue,
    #[serde(rename = "Fraud")]
    #[sqlx(rename = "Fraud")]
    Fraud,
    #[serde(rename = "Other")]
    #[sqlx(rename = "Other")]
    Other,
}

/// Free-form label rather than an ordered state machine: the back office may
/// move a report between any two of these (including reopening a resolved
/// one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Investigating,
    Resolved,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReportPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub vendor_id: i64,
    pub report_type: ReportType,
    pub description: String,
    pub reporter_name: String,
    pub reporter_email: Option<String>,
    pub reporter_contact: Option<String>,
    pub status: ReportStatus,
    pub priority: ReportPriority,
    pub admin_notes: Option<String>,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public submission payload: status starts `pending`, priority `medium`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub report_type: ReportType,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub reporter_name: String,
    #[validate(email)]
    pub reporter_email: Option<String>,
    #[validate(custom(function = validate_phone))]
    pub reporter_contact: Option<String>,
}

/// Admin action on a report. Moving to resolved/dismissed stamps
/// `resolved_at` (and `resolved_by` when supplied).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub status: ReportStatus,
    pub priority: Option<ReportPriority>,
    pub admin_notes: Option<String>,
    pub resolved_by: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportListQuery {
    pub status: Option<ReportStatus>,
    pub priority: Option<ReportPriority>,
}
