//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{carts::records::CartUuid, menu_items::records::MenuItemUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// Amounts are frozen when the order is placed and never recomputed.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub cart_uuid: CartUuid,
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub total_amount: u64,
    pub delivery_address: DeliveryAddress,
    pub status: OrderStatus,
    pub user_notes: Option<String>,
    pub delivery_notes: Option<String>,
    pub lines: Vec<OrderLineRecord>,
    pub placed_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Snapshot of a cart line at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLineRecord {
    pub menu_item_uuid: MenuItemUuid,
    pub quantity: u32,
    pub unit_price: u64,
}

impl OrderLineRecord {
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidAddress {
    #[error("delivery address is missing {0}")]
    Missing(&'static str),

    #[error("delivery coordinates are out of range")]
    CoordinatesOutOfRange,
}

impl DeliveryAddress {
    /// Checks that every required field is present and that coordinates, if
    /// given, are in range.
    pub fn validate(&self) -> Result<(), InvalidAddress> {
        for (field, value) in [
            ("street", &self.street),
            ("city", &self.city),
            ("postal code", &self.postal_code),
        ] {
            if value.trim().is_empty() {
                return Err(InvalidAddress::Missing(field));
            }
        }

        if let Some(Coordinates {
            latitude,
            longitude,
        }) = self.coordinates
            && (!(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude))
        {
            return Err(InvalidAddress::CoordinatesOutOfRange);
        }

        Ok(())
    }
}

/// Order lifecycle.
///
/// `Pending` is initial; `Delivered` and `Cancelled` are terminal. Moves
/// between any two states are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InPreparation,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::InPreparation,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InPreparation => "in-preparation",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownOrderStatus(s.to_string()))
    }
}
