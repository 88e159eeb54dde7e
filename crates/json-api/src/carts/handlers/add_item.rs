//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::{menu_items::records::MenuItemUuid, users::records::UserUuid};

use crate::{
    carts::{errors::into_api_error, handlers::parse_quantity, responses::CartUpdatedResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

fn default_quantity() -> i64 {
    1
}

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartRequest {
    /// The user whose open cart receives the item
    pub user_id: Uuid,

    /// The menu item to add
    pub menu_item_id: Uuid,

    /// Units to add, 1 when omitted
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Add To Cart Handler
///
/// Adds units of a menu item to the user's open cart, opening one when the
/// user has none, and returns the repriced cart.
#[endpoint(
    tags("panier"),
    summary = "Add Item To Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "User or menu item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or unavailable item"),
    ),
)]
#[tracing::instrument(
    name = "carts.add_item",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        menu_item_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let quantity = parse_quantity(request.quantity)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(request.user_id));
    span.record("menu_item_uuid", tracing::field::display(request.menu_item_id));
    span.record("quantity", quantity);

    let cart = state
        .app
        .carts
        .add_item(
            UserUuid::from_uuid(request.user_id),
            MenuItemUuid::from_uuid(request.menu_item_id),
            quantity,
        )
        .await
        .map_err(into_api_error)?;

    tracing::info!(cart_uuid = %cart.uuid, subtotal = cart.subtotal, "added item to cart");

    Ok(Json(CartUpdatedResponse::new("Item added to cart", cart)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use miam_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::{
        errors::{ErrorKind, ErrorResponse},
        test_helpers::{carts_service, make_cart},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("panier/add-to-cart").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_returns_updated_cart() -> TestResult {
        let user = UserUuid::new();
        let item = MenuItemUuid::new();
        let cart = make_cart(user);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |u, i, quantity| *u == user && *i == item && *quantity == 2)
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post("http://example.com/panier/add-to-cart")
            .json(&json!({ "userId": user, "menuItemId": item, "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: CartUpdatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Item added to cart");
        assert_eq!(body.cart.subtotal, 2_000);
        assert_eq!(body.cart.delivery_fee, 300);
        assert_eq!(body.cart.total, 2_300);
        assert_eq!(body.cart.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_defaults_quantity_to_one() -> TestResult {
        let user = UserUuid::new();
        let item = MenuItemUuid::new();
        let cart = make_cart(user);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |_, _, quantity| *quantity == 1)
            .return_once(move |_, _, _| Ok(cart));

        let res = TestClient::post("http://example.com/panier/add-to-cart")
            .json(&json!({ "userId": user, "menuItemId": item }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_negative_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let mut res = TestClient::post("http://example.com/panier/add-to-cart")
            .json(&json!({
                "userId": UserUuid::new(),
                "menuItemId": MenuItemUuid::new(),
                "quantity": -3,
            }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, Some(ErrorKind::InvalidArgument));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unknown_menu_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::MenuItemNotFound));

        let mut res = TestClient::post("http://example.com/panier/add-to-cart")
            .json(&json!({ "userId": UserUuid::new(), "menuItemId": MenuItemUuid::new() }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Menu item not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unavailable_item_returns_invalid_state() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::ItemUnavailable));

        let mut res = TestClient::post("http://example.com/panier/add-to-cart")
            .json(&json!({ "userId": UserUuid::new(), "menuItemId": MenuItemUuid::new() }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, Some(ErrorKind::InvalidState));

        Ok(())
    }
}
