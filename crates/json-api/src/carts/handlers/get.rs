//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::users::records::UserUuid;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the user's open cart with its lines. Does not open a cart.
#[endpoint(
    tags("panier"),
    summary = "Get Open Cart",
    responses(
        (status_code = StatusCode::OK, description = "Open cart"),
        (status_code = StatusCode::NOT_FOUND, description = "User has no open cart"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .get_cart(UserUuid::from_uuid(user.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use miam_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{carts_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("panier/{user}").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_returns_200() -> TestResult {
        let user = UserUuid::new();
        let cart = make_cart(user);
        let cart_uuid = cart.uuid;

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(move |u| *u == user)
            .return_once(move |_| Ok(cart));

        let mut res = TestClient::get(format!("http://example.com/panier/{user}"))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, cart_uuid.into_uuid());
        assert_eq!(body.user_id, user.into_uuid());
        assert_eq!(body.status, "open");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_without_open_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/panier/{}", UserUuid::new()))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_invalid_uuid_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/panier/not-a-uuid")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
