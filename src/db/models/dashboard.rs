use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::parking::Zone;
use super::vendor::{Vendor, VendorCategoryCount, VendorStatus};
use super::volunteer::{Volunteer, VolunteerRole, VolunteerRoleCount, VolunteerShiftCount, VolunteerStatus};

#[derive(Debug, Serialize, ToSchema)]
pub struct VendorCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VolunteerCounts {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub active: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParkingCounts {
    pub total: i64,
    pub occupied: i64,
    pub available: i64,
}

/// Footfall = count of check-in events, read from the append-only parking
/// log so checked-out vehicles still count.
#[derive(Debug, Serialize, ToSchema)]
pub struct FootfallCounts {
    pub today: i64,
    pub total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBreakdown {
    pub vendors_by_category: Vec<VendorCategoryCount>,
    pub volunteers_by_role: Vec<VolunteerRoleCount>,
    pub volunteers_by_shift: Vec<VolunteerShiftCount>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub vendors: VendorCounts,
    pub volunteers: VolunteerCounts,
    pub parking: ParkingCounts,
    pub footfall: FootfallCounts,
    pub breakdown: DashboardBreakdown,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingApprovals {
    pub vendors: Vec<Vendor>,
    pub volunteers: Vec<Volunteer>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentVendor {
    pub id: i64,
    pub name: String,
    pub business_name: String,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentVolunteer {
    pub id: i64,
    pub name: String,
    pub assigned_role: VolunteerRole,
    pub status: VolunteerStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentActivities {
    pub vendors: Vec<RecentVendor>,
    pub volunteers: Vec<RecentVolunteer>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FootfallPeriod {
    #[default]
    Today,
    Week,
    Month,
}

impl FootfallPeriod {
    /// Start of the reporting window: midnight today, last 7 days, or last
    /// 30 days.
    pub fn window_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            FootfallPeriod::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always valid")
                .and_utc(),
            FootfallPeriod::Week => now - chrono::Duration::days(7),
            FootfallPeriod::Month => now - chrono::Duration::days(30),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FootfallQuery {
    pub period: Option<FootfallPeriod>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct HourCount {
    /// Hour of day of the check-in, 0-23.
    pub hour: i64,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct ZoneCount {
    pub zone: Zone,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FootfallAnalytics {
    pub by_hour: Vec<HourCount>,
    pub by_zone: Vec<ZoneCount>,
}

#[cfg(test)]
mod tests {
    use super::FootfallPeriod;
    use chrono::{TimeZone, Utc};

    #[test]
    fn today_window_starts_at_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 14, 30, 5).unwrap();
        let start = FootfallPeriod::Today.window_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 25, 0, 0, 0).unwrap());
    }

    #[test]
    fn week_and_month_windows_look_back() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        assert_eq!(
            FootfallPeriod::Week.window_start(now),
            Utc.with_ymd_and_hms(2026, 8, 18, 12, 0, 0).unwrap()
        );
        assert_eq!(
            FootfallPeriod::Month.window_start(now),
            Utc.with_ymd_and_hms(2026, 7, 26, 12, 0, 0).unwrap()
        );
    }
}
