//! Cart pricing
//!
//! Totals are always derived from scratch over the current lines so that
//! repeated mutations cannot drift.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::domain::{menu_items::records::MenuItemUuid, restaurants::records::RestaurantUuid};

/// A cart line joined with the current catalog price and its restaurant's fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub menu_item_uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub quantity: u32,
    pub unit_price: u64,
    pub delivery_fee: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: u64,
    pub delivery_fee: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("cart totals overflow")]
    Overflow,
}

/// Computes the subtotal and delivery fee for a set of lines.
///
/// Each restaurant's delivery fee is charged once, however many lines it
/// contributes.
pub fn compute_totals(lines: &[PricedLine]) -> Result<CartTotals, PricingError> {
    let mut restaurants = FxHashSet::default();
    let mut totals = CartTotals::default();

    for line in lines {
        let line_total = line
            .unit_price
            .checked_mul(u64::from(line.quantity))
            .ok_or(PricingError::Overflow)?;

        totals.subtotal = totals
            .subtotal
            .checked_add(line_total)
            .ok_or(PricingError::Overflow)?;

        if restaurants.insert(line.restaurant_uuid) {
            totals.delivery_fee = totals
                .delivery_fee
                .checked_add(line.delivery_fee)
                .ok_or(PricingError::Overflow)?;
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(restaurant: RestaurantUuid, quantity: u32, unit_price: u64, fee: u64) -> PricedLine {
        PricedLine {
            menu_item_uuid: MenuItemUuid::new(),
            restaurant_uuid: restaurant,
            quantity,
            unit_price,
            delivery_fee: fee,
        }
    }

    #[test]
    fn empty_cart_costs_nothing() {
        assert_eq!(compute_totals(&[]), Ok(CartTotals::default()));
    }

    #[test]
    fn restaurant_fee_is_charged_once() {
        let restaurant = RestaurantUuid::new();

        let totals = compute_totals(&[
            line(restaurant, 2, 1_000, 300),
            line(restaurant, 1, 500, 300),
        ]);

        assert_eq!(
            totals,
            Ok(CartTotals {
                subtotal: 2_500,
                delivery_fee: 300,
            })
        );
    }

    #[test]
    fn each_distinct_restaurant_adds_its_fee() {
        let first = RestaurantUuid::new();
        let second = RestaurantUuid::new();

        let totals = compute_totals(&[
            line(first, 1, 800, 250),
            line(second, 2, 300, 400),
            line(first, 1, 200, 250),
        ]);

        assert_eq!(
            totals,
            Ok(CartTotals {
                subtotal: 1_600,
                delivery_fee: 650,
            })
        );
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let restaurant = RestaurantUuid::new();

        let result = compute_totals(&[line(restaurant, 2, u64::MAX, 0)]);

        assert_eq!(result, Err(PricingError::Overflow));
    }
}
