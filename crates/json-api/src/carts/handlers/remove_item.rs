//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::{menu_items::records::MenuItemUuid, users::records::UserUuid};

use crate::{
    carts::{errors::into_api_error, responses::CartUpdatedResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Remove From Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveFromCartRequest {
    pub user_id: Uuid,
    pub menu_item_id: Uuid,
}

/// Remove From Cart Handler
///
/// Drops a line from the user's open cart and recomputes its totals.
#[endpoint(
    tags("panier"),
    summary = "Remove Item From Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveFromCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let cart = state
        .app
        .carts
        .remove_item(
            UserUuid::from_uuid(request.user_id),
            MenuItemUuid::from_uuid(request.menu_item_id),
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartUpdatedResponse::new("Item removed from cart", cart)))
}
