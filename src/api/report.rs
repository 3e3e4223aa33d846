use axum::routing::{delete, get, post, put};
use axum::Router;
use sqlx::SqlitePool;
use utoipa::OpenApi;

use crate::db::models::report::{NewReport, Report, UpdateReport};
use crate::db::queries::report::{
    delete_report, get_all_reports, get_vendor_reports, submit_report, update_report,
};

pub fn report_routes() -> Router<SqlitePool> {
    Router::new().route("/reports/vendor/{vendor_id}", post(submit_report))
}

pub fn secure_report_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/reports", get(get_all_reports))
        .route("/reports/vendor/{vendor_id}", get(get_vendor_reports))
        .route("/reports/{id}/status", put(update_report))
        .route("/reports/{id}", delete(delete_report))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::db::queries::report::submit_report,
        crate::db::queries::report::get_all_reports,
        crate::db::queries::report::get_vendor_reports,
        crate::db::queries::report::update_report,
        crate::db::queries::report::delete_report,
    ),
    components(schemas(Report, NewReport, UpdateReport)),
    tags((name = "Reports", description = "Complaints filed against vendors"))
)]
pub struct ReportDoc;
