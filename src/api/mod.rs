pub mod admin;
pub mod auth;
pub mod health;
pub mod parking;
pub mod report;
pub mod review;
pub mod vendor;
pub mod volunteer;
