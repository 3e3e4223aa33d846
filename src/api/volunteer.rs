use axum::routing::{delete, get, post, put};
use axum::Router;
use sqlx::SqlitePool;
use utoipa::OpenApi;

use crate::db::models::volunteer::{
    EmergencyContact, NewVolunteer, UpdateVolunteer, Volunteer, VolunteerRoleCount,
    VolunteerShiftCount, VolunteerStats, VolunteerStatusCount,
};
use crate::db::queries::volunteer::{
    create_volunteer, delete_volunteer, get_all_volunteers, get_volunteer, get_volunteer_stats,
    update_volunteer,
};

pub fn volunteer_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/volunteers", get(get_all_volunteers))
        .route("/volunteers", post(create_volunteer))
        .route("/volunteers/stats", get(get_volunteer_stats))
        .route("/volunteers/{id}", get(get_volunteer))
        .route("/volunteers/{id}", put(update_volunteer))
        .route("/volunteers/{id}", delete(delete_volunteer))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::db::queries::volunteer::get_all_volunteers,
        crate::db::queries::volunteer::get_volunteer,
        crate::db::queries::volunteer::create_volunteer,
        crate::db::queries::volunteer::update_volunteer,
        crate::db::queries::volunteer::delete_volunteer,
        crate::db::queries::volunteer::get_volunteer_stats,
    ),
    components(schemas(
        Volunteer,
        NewVolunteer,
        UpdateVolunteer,
        EmergencyContact,
        VolunteerStats,
        VolunteerRoleCount,
        VolunteerStatusCount,
        VolunteerShiftCount,
    )),
    tags((name = "Volunteers", description = "Volunteer registration and coordination"))
)]
pub struct VolunteerDoc;
