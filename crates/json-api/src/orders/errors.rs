//! Order Errors

use tracing::error;

use miam_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
        OrdersServiceError::CartNotFound => ApiError::not_found("Cart not found"),
        OrdersServiceError::PermissionDenied => {
            ApiError::permission_denied("Cart belongs to another user")
        }
        OrdersServiceError::EmptyCart => {
            ApiError::invalid_state("Cannot place an order for an empty cart")
        }
        OrdersServiceError::CartClosed => {
            ApiError::invalid_state("Cart has already been checked out")
        }
        OrdersServiceError::InvalidAddress(reason) => ApiError::invalid_argument(reason.to_string()),
        OrdersServiceError::AlreadyExists => ApiError::conflict("Order already exists"),
        OrdersServiceError::InvalidData => ApiError::invalid_argument("Invalid order data"),
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            ApiError::internal()
        }
    }
}
