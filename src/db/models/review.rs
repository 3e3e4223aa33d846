use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

/// A public review of a vendor. `is_approved` is derived from `status` on
/// every write, never set independently.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub vendor_id: i64,
    pub rating: i64,
    pub comment: String,
    pub reviewer_name: String,
    pub reviewer_email: Option<String>,
    pub status: ReviewStatus,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public submission payload; submissions always enter the moderation queue
/// as `pending`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    #[validate(length(min = 1, max = 500))]
    pub comment: String,
    #[validate(length(min = 1, max = 100))]
    pub reviewer_name: String,
    #[validate(email)]
    pub reviewer_email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReviewStatus {
    pub status: ReviewStatus,
}

/// A pending review joined with the vendor it belongs to, for the
/// moderation queue.
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithVendor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub business_name: String,
    pub vendor_name: String,
}

/// Approved reviews of one vendor with the derived average rating.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorReviews {
    /// One decimal place, e.g. "4.0"; absent when the vendor has no
    /// approved reviews.
    pub average_rating: Option<String>,
    pub count: usize,
    pub reviews: Vec<Review>,
}
