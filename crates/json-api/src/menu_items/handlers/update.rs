//! Update Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::menu_items::{data::MenuItemUpdate, records::MenuItemUuid};

use crate::{
    errors::ApiError,
    extensions::*,
    menu_items::{errors::into_api_error, handlers::get::MenuItemResponse},
    state::State,
};

/// Update Menu Item Request
///
/// Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateMenuItemRequest {
    #[serde(default)]
    pub price: Option<u64>,

    #[serde(default)]
    pub is_available: Option<bool>,
}

impl From<UpdateMenuItemRequest> for MenuItemUpdate {
    fn from(request: UpdateMenuItemRequest) -> Self {
        MenuItemUpdate {
            price: request.price,
            is_available: request.is_available,
        }
    }
}

/// Update Menu Item Handler
///
/// Open carts keep the price captured when the item was added.
#[endpoint(tags("menu-items"), summary = "Update Menu Item")]
#[tracing::instrument(
    name = "menu_items.update",
    skip(item, json, depot),
    fields(menu_item_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateMenuItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let item = MenuItemUuid::from_uuid(item.into_inner());

    tracing::Span::current().record("menu_item_uuid", tracing::field::display(item));

    let update: MenuItemUpdate = json.into_inner().into();

    if update.is_empty() {
        return Err(ApiError::invalid_argument("Nothing to update"));
    }

    let item = state
        .app
        .menu_items
        .update_menu_item(item, update)
        .await
        .map_err(into_api_error)?;

    Ok(Json(item.into()))
}
