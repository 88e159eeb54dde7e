//! Restaurant Data

use crate::domain::restaurants::records::{GeoPoint, RestaurantUuid};

/// New Restaurant Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewRestaurant {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub description: Option<String>,
    pub delivery_fee: u64,
    pub location: GeoPoint,
}
