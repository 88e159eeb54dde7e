//! Update Cart Item Quantity Handler

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

/// Update Item Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateItemQuantityRequest {
    pub user_id: Uuid,
    pub menu_item_id: Uuid,

    /// New quantity for the line, at least 1
    pub quantity: i64,
}

/// Update Cart Item Quantity Handler
#[endpoint(
    tags("panier"),
    summary = "Update Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
    ),
)]
#[tracing::instrument(
    name = "carts.update_quantity",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateItemQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(request.user_id));
    span.record("quantity", request.quantity);

    let quantity = parse_quantity(request.quantity)?;

    let cart = state
        .app
        .carts
        .update_quantity(
            UserUuid::from_uuid(request.user_id),
            MenuItemUuid::from_uuid(request.menu_item_id),
            quantity,
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartUpdatedResponse::new("Quantity updated", cart)))
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
        carts_service(
            carts,
            Router::with_path("panier/update-item-quantity").post(handler),
        )
    }

    #[tokio::test]
    async fn test_update_quantity_returns_updated_cart() -> TestResult {
        let user = UserUuid::new();
        let item = MenuItemUuid::new();
        let cart = make_cart(user);

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(move |u, i, quantity| *u == user && *i == item && *quantity == 2)
            .return_once(move |_, _, _| Ok(cart));

        let mut res = TestClient::post("http://example.com/panier/update-item-quantity")
            .json(&json!({ "userId": user, "menuItemId": item, "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: CartUpdatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Quantity updated");
        assert_eq!(body.cart.items.first().map(|line| line.line_total), Some(2_000));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_quantity_zero_returns_400_without_touching_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_update_quantity().never();

        let mut res = TestClient::post("http://example.com/panier/update-item-quantity")
            .json(&json!({
                "userId": UserUuid::new(),
                "menuItemId": MenuItemUuid::new(),
                "quantity": 0,
            }))
            .send(&make_service(carts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, Some(ErrorKind::InvalidArgument));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_quantity_without_open_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/panier/update-item-quantity")
            .json(&json!({
                "userId": UserUuid::new(),
                "menuItemId": MenuItemUuid::new(),
                "quantity": 4,
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
