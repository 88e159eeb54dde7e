//! Menu Item Data

use crate::domain::{
    menu_items::records::{MenuItemCategory, MenuItemUuid},
    restaurants::records::RestaurantUuid,
};

/// New Menu Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: MenuItemCategory,
    pub is_available: bool,
}

/// Menu item fields that may change after creation. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemUpdate {
    pub price: Option<u64>,
    pub is_available: Option<bool>,
}

impl MenuItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.is_available.is_none()
    }
}
