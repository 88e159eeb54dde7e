//! Cart Handlers

pub(crate) mod add_item;
pub(crate) mod get;
pub(crate) mod items;
pub(crate) mod remove_item;
pub(crate) mod update_quantity;

use crate::errors::ApiError;

/// Accepts quantities of at least one that fit a cart line.
fn parse_quantity(quantity: i64) -> Result<u32, ApiError> {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or_else(|| ApiError::invalid_argument("Quantity must be a positive integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_quantities_are_invalid_arguments() {
        for quantity in [0, -1, i64::from(u32::MAX) + 1] {
            assert!(
                parse_quantity(quantity).is_err(),
                "expected {quantity} to be rejected"
            );
        }

        assert_eq!(parse_quantity(3), Ok(3));
    }
}
