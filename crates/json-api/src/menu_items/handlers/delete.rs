//! Delete Menu Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::menu_items::records::MenuItemUuid;

use crate::{
    errors::ApiError, extensions::*, menu_items::errors::into_api_error, state::State,
};

/// Delete Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Delete Menu Item",
    responses(
        (status_code = StatusCode::OK, description = "Menu item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .menu_items
        .delete_menu_item(MenuItemUuid::from_uuid(item.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(StatusCode::OK)
}
