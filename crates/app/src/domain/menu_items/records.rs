//! Menu Item Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::restaurants::records::RestaurantUuid, uuids::TypedUuid};

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItemRecord>;

/// Menu Item Record
#[derive(Debug, Clone)]
pub struct MenuItemRecord {
    pub uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: MenuItemCategory,
    pub is_available: bool,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemCategory {
    Appetizer,
    Main,
    Dessert,
    Beverage,
    Side,
}

impl MenuItemCategory {
    pub const ALL: [Self; 5] = [
        Self::Appetizer,
        Self::Main,
        Self::Dessert,
        Self::Beverage,
        Self::Side,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Appetizer => "appetizer",
            Self::Main => "main",
            Self::Dessert => "dessert",
            Self::Beverage => "beverage",
            Self::Side => "side",
        }
    }
}

impl fmt::Display for MenuItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown menu item category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for MenuItemCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_parse_from_their_names() {
        for category in MenuItemCategory::ALL {
            assert_eq!(category.as_str().parse::<MenuItemCategory>(), Ok(category));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(
            "soup".parse::<MenuItemCategory>(),
            Err(UnknownCategory("soup".to_string()))
        );
    }
}
