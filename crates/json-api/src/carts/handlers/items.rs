//! List Cart Items Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::carts::records::CartUuid;

use crate::{
    carts::{errors::into_api_error, responses::CartLineResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// List Cart Items Handler
///
/// Lists the lines of any cart, open or closed, with the current menu item
/// names. Lines whose item has been deleted keep a placeholder name.
#[endpoint(
    tags("panier"),
    summary = "List Cart Items",
    responses(
        (status_code = StatusCode::OK, description = "Cart lines"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<CartLineResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let lines = state
        .app
        .carts
        .list_items(CartUuid::from_uuid(cart.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(lines.into_iter().map(CartLineResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use miam_app::domain::{
        carts::{CartsServiceError, MockCartsService, records::UNKNOWN_ITEM_NAME},
        users::records::UserUuid,
    };

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("panier/{cart}/items").get(handler))
    }

    #[tokio::test]
    async fn test_list_items_reports_deleted_items_with_placeholder() -> TestResult {
        let mut cart = make_cart(UserUuid::new());
        let cart_uuid = cart.uuid;

        let mut deleted = cart.lines.clone();

        for line in &mut deleted {
            line.name = None;
            line.restaurant_uuid = None;
        }

        cart.lines.extend(deleted);

        let lines = cart.lines;

        let mut carts = MockCartsService::new();

        carts
            .expect_list_items()
            .once()
            .withf(move |c| *c == cart_uuid)
            .return_once(move |_| Ok(lines));

        let mut res = TestClient::get(format!("http://example.com/panier/{cart_uuid}/items"))
            .send(&make_service(carts))
            .await;

        let body: Vec<CartLineResponse> = res.take_json().await?;
        let names: Vec<&str> = body.iter().map(|line| line.name.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(names, ["Ratatouille", UNKNOWN_ITEM_NAME]);
        assert_eq!(body.get(1).and_then(|line| line.restaurant_id), None);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_items_unknown_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_list_items()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/panier/{}/items", CartUuid::new()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
