use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validate_phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VendorStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum ProductCategory {
    #[serde(rename = "Groundnuts")]
    #[sqlx(rename = "Groundnuts")]
    Groundnuts,
    #[serde(rename = "Food")]
    #[sqlx(rename = "Food")]
    Food,
    #[serde(rename = "Bangles")]
    #[sqlx(rename = "Bangles")]
    Bangles,
    #[serde(rename = "Toys")]
    #[sqlx(rename = "Toys")]
    Toys,
    #[serde(rename = "Wooden Works")]
    #[sqlx(rename = "Wooden Works")]
    WoodenWorks,
    #[serde(rename = "Decorative Items")]
    #[sqlx(rename = "Decorative Items")]
    DecorativeItems,
    #[serde(rename = "Handicrafts")]
    #[sqlx(rename = "Handicrafts")]
    Handicrafts,
    #[serde(rename = "Clothing")]
    #[sqlx(rename = "Clothing")]
    Clothing,
    #[serde(rename = "Religious Items")]
    #[sqlx(rename = "Religious Items")]
    ReligiousItems,
    #[serde(rename = "Other")]
    #[sqlx(rename = "Other")]
    Other,
}

/// A stall holder. Email is unique across vendors; stall_number is unique
/// when assigned.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub business_name: String,
    pub contact_number: String,
    pub email: String,
    pub stall_number: Option<String>,
    pub stall_location: Option<String>,
    pub product_category: ProductCategory,
    pub product_description: Option<String>,
    pub product_photo: String,
    pub gst_number: Option<String>,
    pub status: VendorStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public registration payload. Status is always forced to `pending`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVendor {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub business_name: String,
    #[validate(custom(function = validate_phone))]
    pub contact_number: String,
    #[validate(email)]
    pub email: String,
    pub product_category: ProductCategory,
    #[validate(length(max = 1000))]
    pub product_description: Option<String>,
    pub product_photo: Option<String>,
    pub gst_number: Option<String>,
    pub notes: Option<String>,
}

/// Partial update applied by self-service edits or the admin back office.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendor {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub business_name: Option<String>,
    #[validate(custom(function = validate_phone))]
    pub contact_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub stall_number: Option<String>,
    pub stall_location: Option<String>,
    pub product_category: Option<ProductCategory>,
    #[validate(length(max = 1000))]
    pub product_description: Option<String>,
    pub product_photo: Option<String>,
    pub gst_number: Option<String>,
    pub status: Option<VendorStatus>,
    pub notes: Option<String>,
}

impl UpdateVendor {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.business_name.is_none()
            && self.contact_number.is_none()
            && self.email.is_none()
            && self.stall_number.is_none()
            && self.stall_location.is_none()
            && self.product_category.is_none()
            && self.product_description.is_none()
            && self.product_photo.is_none()
            && self.gst_number.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }
}

/// Admin approval/rejection payload; may assign a stall in the same call.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorStatusUpdate {
    pub status: VendorStatus,
    pub stall_number: Option<String>,
    pub stall_location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VendorListQuery {
    pub status: Option<VendorStatus>,
    pub product_category: Option<ProductCategory>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct VendorStatusCount {
    pub status: VendorStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct VendorCategoryCount {
    pub category: ProductCategory,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorStats {
    pub status_stats: Vec<VendorStatusCount>,
    pub category_stats: Vec<VendorCategoryCount>,
    pub total_vendors: i64,
}
