//! Cart Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        menu_items::records::MenuItemUuid, restaurants::records::RestaurantUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Name reported for a line whose menu item no longer exists.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown item";

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub status: CartStatus,

    /// Sum of `quantity * unit_price` over all lines.
    pub subtotal: u64,

    /// Sum of the delivery fee of each distinct restaurant represented in the cart.
    pub delivery_fee: u64,

    pub lines: Vec<CartLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Amount an order placed from this cart right now would be charged.
    pub fn total(&self) -> u64 {
        self.subtotal.saturating_add(self.delivery_fee)
    }

    pub fn is_open(&self) -> bool {
        self.status == CartStatus::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartStatus {
    Open,
    Closed,
}

impl CartStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown cart status: {0}")]
pub struct UnknownCartStatus(pub String);

impl FromStr for CartStatus {
    type Err = UnknownCartStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(UnknownCartStatus(other.to_string())),
        }
    }
}

/// A cart line, enriched with the current name of its menu item.
#[derive(Debug, Clone)]
pub struct CartLineRecord {
    pub menu_item_uuid: MenuItemUuid,

    /// `None` once the menu item (or its restaurant) has been deleted.
    pub name: Option<String>,
    pub restaurant_uuid: Option<RestaurantUuid>,

    pub quantity: u32,

    /// Price of one unit as of the last time the cart was recomputed.
    pub unit_price: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartLineRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_ITEM_NAME)
    }

    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}
