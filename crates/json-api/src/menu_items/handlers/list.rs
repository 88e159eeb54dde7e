//! List Restaurant Menu Items Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::restaurants::records::RestaurantUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    menu_items::{errors::into_api_error, handlers::get::MenuItemResponse},
    state::State,
};

/// List Restaurant Menu Items Handler
///
/// Lists the live menu items of a live restaurant, grouped by category.
#[endpoint(
    tags("menu-items"),
    summary = "List Restaurant Menu Items",
    responses(
        (status_code = StatusCode::OK, description = "Menu items"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
    ),
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<MenuItemResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .menu_items
        .list_restaurant_menu_items(RestaurantUuid::from_uuid(restaurant.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use miam_app::domain::menu_items::{
        MenuItemsServiceError, MockMenuItemsService, records::MenuItemUuid,
    };

    use crate::{
        errors::{ErrorKind, ErrorResponse},
        test_helpers::{make_menu_item, menu_items_service},
    };

    use super::*;

    fn make_service(menu_items: MockMenuItemsService) -> Service {
        menu_items_service(
            menu_items,
            Router::with_path("menu-items/restaurant/{restaurant}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_list_restaurant_menu_items_passes_restaurant() -> TestResult {
        let restaurant = RestaurantUuid::new();
        let item = MenuItemUuid::new();

        let mut menu_items = MockMenuItemsService::new();

        menu_items
            .expect_list_restaurant_menu_items()
            .once()
            .withf(move |r| *r == restaurant)
            .return_once(move |restaurant| {
                let mut record = make_menu_item(item);
                record.restaurant_uuid = restaurant;

                Ok(vec![record])
            });

        let mut res = TestClient::get(format!(
            "http://example.com/menu-items/restaurant/{restaurant}"
        ))
        .send(&make_service(menu_items))
        .await;

        let body: Vec<MenuItemResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 1);
        assert_eq!(body.first().map(|i| i.uuid), Some(item.into_uuid()));
        assert_eq!(
            body.first().map(|i| i.restaurant_id),
            Some(restaurant.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_list_menu_items_of_deleted_restaurant_returns_404() -> TestResult {
        let mut menu_items = MockMenuItemsService::new();

        menu_items
            .expect_list_restaurant_menu_items()
            .once()
            .return_once(|_| Err(MenuItemsServiceError::RestaurantNotFound));

        let mut res = TestClient::get(format!(
            "http://example.com/menu-items/restaurant/{}",
            RestaurantUuid::new()
        ))
        .send(&make_service(menu_items))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, Some(ErrorKind::NotFound));
        assert_eq!(body.message, "Restaurant not found");

        Ok(())
    }
}
