use axum::routing::{delete, get, post, put};
use axum::Router;
use sqlx::SqlitePool;
use utoipa::OpenApi;

use crate::db::models::review::{
    NewReview, Review, ReviewWithVendor, UpdateReviewStatus, VendorReviews,
};
use crate::db::queries::review::{
    delete_review, get_pending_reviews, get_vendor_reviews, submit_review, update_review_status,
};

pub fn review_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/reviews/vendor/{vendor_id}", post(submit_review))
        .route("/reviews/vendor/{vendor_id}", get(get_vendor_reviews))
}

pub fn secure_review_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/reviews/pending", get(get_pending_reviews))
        .route("/reviews/{review_id}/status", put(update_review_status))
        .route("/reviews/{review_id}", delete(delete_review))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::db::queries::review::submit_review,
        crate::db::queries::review::get_vendor_reviews,
        crate::db::queries::review::get_pending_reviews,
        crate::db::queries::review::update_review_status,
        crate::db::queries::review::delete_review,
    ),
    components(schemas(Review, NewReview, UpdateReviewStatus, ReviewWithVendor, VendorReviews)),
    tags((name = "Reviews", description = "Vendor reviews and moderation"))
)]
pub struct ReviewDoc;
