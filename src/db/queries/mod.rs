pub mod admin;
pub mod parking;
pub mod report;
pub mod review;
pub mod vendor;
pub mod volunteer;
