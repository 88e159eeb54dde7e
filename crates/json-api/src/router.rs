//! App Router

use salvo::Router;

use crate::{carts, menu_items, notifications, orders, restaurants, reviews, users};

/// Every resource route. Literal segments are registered before the
/// `{uuid}` segments they share a position with.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("panier")
                .push(Router::with_path("add-to-cart").post(carts::add_item::handler))
                .push(Router::with_path("remove-from-cart").post(carts::remove_item::handler))
                .push(
                    Router::with_path("update-item-quantity")
                        .post(carts::update_quantity::handler),
                )
                .push(Router::with_path("{cart}/items").get(carts::items::handler))
                .push(Router::with_path("{user}").get(carts::get::handler)),
        )
        .push(
            Router::with_path("orders")
                .push(Router::with_path("create").post(orders::create::handler))
                .push(Router::with_path("{order}/status").put(orders::update_status::handler))
                .push(Router::with_path("{order}/notes").put(orders::update_notes::handler))
                .push(Router::with_path("{user}").get(orders::list::handler)),
        )
        .push(
            Router::with_path("reviews")
                .post(reviews::create::handler)
                .push(Router::with_path("check/{user}/{order}").get(reviews::check::handler))
                .push(
                    Router::with_path("restaurant/{restaurant}/reviews")
                        .get(reviews::list::handler),
                )
                .push(Router::with_path("{review}").delete(reviews::delete::handler)),
        )
        .push(
            Router::with_path("users")
                .post(users::create::handler)
                .push(Router::with_path("{user}").get(users::get::handler)),
        )
        .push(
            Router::with_path("restaurants")
                .get(restaurants::list::handler)
                .post(restaurants::create::handler)
                .push(
                    Router::with_path("{restaurant}")
                        .get(restaurants::get::handler)
                        .delete(restaurants::delete::handler),
                ),
        )
        .push(
            Router::with_path("menu-items")
                .post(menu_items::create::handler)
                .push(
                    Router::with_path("restaurant/{restaurant}").get(menu_items::list::handler),
                )
                .push(
                    Router::with_path("{item}")
                        .get(menu_items::get::handler)
                        .put(menu_items::update::handler)
                        .delete(menu_items::delete::handler),
                ),
        )
        .push(
            Router::with_path("notifications")
                .post(notifications::create::handler)
                .push(Router::with_path("user/{user}").get(notifications::list::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use miam_app::domain::{
        carts::{MockCartsService, records::CartUuid},
        menu_items::{MockMenuItemsService, records::MenuItemUuid},
        restaurants::records::RestaurantUuid,
        users::records::UserUuid,
    };

    use crate::{
        errors::{ErrorKind, ErrorResponse},
        test_helpers::{carts_service, make_cart, menu_items_service},
    };

    use super::app_router;

    #[tokio::test]
    async fn literal_cart_routes_win_over_user_segment() -> TestResult {
        let user = UserUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(move |user, _, _| Ok(make_cart(user)));

        carts.expect_get_cart().never();

        let res = TestClient::post("http://example.com/panier/add-to-cart")
            .json(&json!({ "userId": user, "menuItemId": MenuItemUuid::new() }))
            .send(&carts_service(carts, app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn cart_items_route_is_not_taken_for_a_user() -> TestResult {
        let cart = CartUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_list_items()
            .once()
            .withf(move |c| *c == cart)
            .return_once(|_| Ok(Vec::new()));

        carts.expect_get_cart().never();

        let res = TestClient::get(format!("http://example.com/panier/{cart}/items"))
            .send(&carts_service(carts, app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn restaurant_menu_route_is_not_taken_for_an_item() -> TestResult {
        let restaurant = RestaurantUuid::new();

        let mut menu_items = MockMenuItemsService::new();

        menu_items
            .expect_list_restaurant_menu_items()
            .once()
            .withf(move |r| *r == restaurant)
            .return_once(|_| Ok(Vec::new()));

        menu_items.expect_get_menu_item().never();

        let res = TestClient::get(format!(
            "http://example.com/menu-items/restaurant/{restaurant}"
        ))
        .send(&menu_items_service(menu_items, app_router()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_returns_404() -> TestResult {
        let mut res = TestClient::get("http://example.com/basket")
            .send(&carts_service(MockCartsService::new(), app_router()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, Some(ErrorKind::NotFound));

        Ok(())
    }

    #[tokio::test]
    async fn missing_body_field_renders_invalid_argument() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let mut res = TestClient::post("http://example.com/panier/add-to-cart")
            .json(&json!({ "menuItemId": MenuItemUuid::new() }))
            .send(&carts_service(carts, app_router()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, Some(ErrorKind::InvalidArgument));
        assert!(!body.message.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn malformed_path_uuid_renders_invalid_argument() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_list_items().never();

        let mut res = TestClient::get("http://example.com/panier/not-a-uuid/items")
            .send(&carts_service(carts, app_router()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, Some(ErrorKind::InvalidArgument));

        Ok(())
    }
}
