//! Cart Errors

use tracing::{error, warn};

use miam_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::NotFound => ApiError::not_found("Cart not found"),
        CartsServiceError::UserNotFound => ApiError::not_found("User not found"),
        CartsServiceError::MenuItemNotFound => ApiError::not_found("Menu item not found"),
        CartsServiceError::LineNotFound => ApiError::not_found("Item not found in cart"),
        CartsServiceError::InvalidQuantity => {
            ApiError::invalid_argument("Quantity must be at least 1")
        }
        CartsServiceError::ItemUnavailable => {
            ApiError::invalid_state("Menu item is not available")
        }
        CartsServiceError::AlreadyExists => ApiError::conflict("Cart already exists"),
        CartsServiceError::InvalidData => ApiError::invalid_argument("Invalid cart data"),
        CartsServiceError::Pricing(source) => {
            warn!("rejected cart mutation: {source}");

            ApiError::invalid_state("Cart total is too large")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            ApiError::internal()
        }
    }
}
