//! Create Menu Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::{
    menu_items::{data::NewMenuItem, records::MenuItemUuid},
    restaurants::records::RestaurantUuid,
};

use crate::{
    errors::ApiError,
    extensions::*,
    menu_items::{
        errors::into_api_error,
        handlers::{get::MenuItemResponse, parse_category},
    },
    state::State,
};

fn default_available() -> bool {
    true
}

/// Create Menu Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateMenuItemRequest {
    pub restaurant_id: Uuid,
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Price in minor units
    pub price: u64,

    /// One of `appetizer`, `main`, `dessert`, `beverage` or `side`
    pub category: String,

    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// Create Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Create Menu Item",
    responses(
        (status_code = StatusCode::CREATED, description = "Menu item created"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateMenuItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let item = NewMenuItem {
        uuid: MenuItemUuid::new(),
        restaurant_uuid: RestaurantUuid::from_uuid(request.restaurant_id),
        name: request.name,
        description: request.description,
        price: request.price,
        category: parse_category(&request.category)?,
        is_available: request.is_available,
    };

    let item = state
        .app
        .menu_items
        .create_menu_item(item)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/menu-items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
