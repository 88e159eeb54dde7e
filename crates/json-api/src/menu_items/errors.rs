//! Menu Item Errors

use tracing::error;

use miam_app::domain::menu_items::MenuItemsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: MenuItemsServiceError) -> ApiError {
    match error {
        MenuItemsServiceError::AlreadyExists => ApiError::conflict("Menu item already exists"),
        MenuItemsServiceError::NotFound => ApiError::not_found("Menu item not found"),
        MenuItemsServiceError::RestaurantNotFound => ApiError::not_found("Restaurant not found"),
        MenuItemsServiceError::MissingRequiredData => {
            ApiError::invalid_argument("Menu item name is required")
        }
        MenuItemsServiceError::InvalidData => ApiError::invalid_argument("Invalid menu item"),
        MenuItemsServiceError::Sql(source) => {
            error!("menu item storage failure: {source}");

            ApiError::internal()
        }
    }
}
