use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

use crate::db::models::review::{
    NewReview, Review, ReviewStatus, ReviewWithVendor, UpdateReviewStatus, VendorReviews,
};
use crate::db::queries::vendor::fetch_vendor;
use crate::utils::api_response::ApiResponse;
use crate::utils::error::AppError;

async fn fetch_review(pool: &SqlitePool, id: i64) -> Result<Review, AppError> {
    sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Review"))
}

/// Public submission. Every review enters the moderation queue as `pending`
/// and stays invisible to visitors until approved.
#[utoipa::path(
    post,
    path = "/api/reviews/vendor/{vendor_id}",
    tag = "Reviews",
    params(("vendor_id" = i64, Path, description = "Vendor ID")),
    request_body = NewReview,
    responses(
        (status = 201, description = "Review submitted for moderation", body = Review),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn submit_review(
    State(pool): State<SqlitePool>,
    Path(vendor_id): Path<i64>,
    Json(payload): Json<NewReview>,
) -> Result<ApiResponse<Review>, AppError> {
    payload.validate()?;
    fetch_vendor(&pool, vendor_id).await?;

    let now = Utc::now();
    let id = sqlx::query(
        "INSERT INTO reviews \
         (vendor_id, rating, comment, reviewer_name, reviewer_email, status, is_approved, \
          created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(vendor_id)
    .bind(payload.rating)
    .bind(&payload.comment)
    .bind(&payload.reviewer_name)
    .bind(&payload.reviewer_email)
    .bind(ReviewStatus::Pending)
    .bind(now)
    .bind(now)
    .execute(&pool)
    .await?
    .last_insert_rowid();

    let review = fetch_review(&pool, id).await?;
    Ok(ApiResponse::success(
        StatusCode::CREATED,
        "Review submitted successfully and pending approval",
        review,
    ))
}

#[utoipa::path(
    get,
    path = "/api/reviews/vendor/{vendor_id}",
    tag = "Reviews",
    params(("vendor_id" = i64, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Approved reviews with average rating", body = VendorReviews),
        (status = 404, description = "Vendor not found")
    )
)]
pub async fn get_vendor_reviews(
    State(pool): State<SqlitePool>,
    Path(vendor_id): Path<i64>,
) -> Result<ApiResponse<VendorReviews>, AppError> {
    fetch_vendor(&pool, vendor_id).await?;

    let reviews: Vec<Review> = sqlx::query_as(
        "SELECT * FROM reviews WHERE vendor_id = ? AND is_approved = 1 ORDER BY created_at DESC",
    )
    .bind(vendor_id)
    .fetch_all(&pool)
    .await?;

    let average_rating = if reviews.is_empty() {
        None
    } else {
        let sum: i64 = reviews.iter().map(|r| r.rating).sum();
        Some(format!("{:.1}", sum as f64 / reviews.len() as f64))
    };

    let count = reviews.len();
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Reviews retrieved successfully",
        VendorReviews {
            average_rating,
            count,
            reviews,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/reviews/pending",
    tag = "Reviews",
    responses((status = 200, description = "Moderation queue, oldest first", body = [ReviewWithVendor])),
    security(("bearerAuth" = []))
)]
pub async fn get_pending_reviews(
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<Vec<ReviewWithVendor>>, AppError> {
    let reviews: Vec<ReviewWithVendor> = sqlx::query_as(
        "SELECT r.*, v.business_name AS business_name, v.name AS vendor_name \
         FROM reviews r JOIN vendors v ON v.id = r.vendor_id \
         WHERE r.status = 'pending' ORDER BY r.created_at ASC",
    )
    .fetch_all(&pool)
    .await?;
    let count = reviews.len();
    Ok(ApiResponse::list(
        StatusCode::OK,
        "Pending reviews retrieved successfully",
        count,
        reviews,
    ))
}

/// Moderation decision. `is_approved` is recomputed from the new status in
/// the same write.
#[utoipa::path(
    put,
    path = "/api/reviews/{review_id}/status",
    tag = "Reviews",
    params(("review_id" = i64, Path, description = "Review ID")),
    request_body = UpdateReviewStatus,
    responses(
        (status = 200, description = "Review status updated", body = Review),
        (status = 404, description = "Review not found")
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_review_status(
    State(pool): State<SqlitePool>,
    Path(review_id): Path<i64>,
    Json(payload): Json<UpdateReviewStatus>,
) -> Result<ApiResponse<Review>, AppError> {
    let is_approved = payload.status == ReviewStatus::Approved;
    let result = sqlx::query(
        "UPDATE reviews SET status = ?, is_approved = ?, updated_at = ? WHERE id = ?",
    )
    .bind(payload.status)
    .bind(is_approved)
    .bind(Utc::now())
    .bind(review_id)
    .execute(&pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Review"));
    }

    let review = fetch_review(&pool, review_id).await?;
    info!(review_id, status = ?payload.status, "review moderated");
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Review status updated successfully",
        review,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{review_id}",
    tag = "Reviews",
    params(("review_id" = i64, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 404, description = "Review not found")
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_review(
    State(pool): State<SqlitePool>,
    Path(review_id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
        .bind(review_id)
        .execute(&pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Review"));
    }
    Ok(ApiResponse::success(
        StatusCode::OK,
        "Review deleted successfully",
        (),
    ))
}
