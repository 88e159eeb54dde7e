//! Get Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::menu_items::records::{MenuItemRecord, MenuItemUuid};

use crate::{
    errors::ApiError, extensions::*, menu_items::errors::into_api_error, state::State,
};

/// Menu Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MenuItemResponse {
    pub uuid: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub description: String,

    /// Price in minor units
    pub price: u64,

    pub category: String,
    pub is_available: bool,
    pub rating: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MenuItemRecord> for MenuItemResponse {
    fn from(item: MenuItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            restaurant_id: item.restaurant_uuid.into_uuid(),
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category.to_string(),
            is_available: item.is_available,
            rating: item.rating,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Menu Item Handler
#[endpoint(tags("menu-items"), summary = "Get Menu Item")]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .menu_items
        .get_menu_item(MenuItemUuid::from_uuid(item.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use miam_app::domain::menu_items::{MenuItemsServiceError, MockMenuItemsService};

    use crate::test_helpers::{make_menu_item, menu_items_service};

    use super::*;

    fn make_service(menu_items: MockMenuItemsService) -> Service {
        menu_items_service(
            menu_items,
            Router::with_path("menu-items/{item}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_menu_item_renders_category_name() -> TestResult {
        let uuid = MenuItemUuid::new();

        let mut menu_items = MockMenuItemsService::new();

        menu_items
            .expect_get_menu_item()
            .once()
            .withf(move |i| *i == uuid)
            .return_once(move |_| Ok(make_menu_item(uuid)));

        let mut res = TestClient::get(format!("http://example.com/menu-items/{uuid}"))
            .send(&make_service(menu_items))
            .await;

        let body: MenuItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.category, "main");
        assert_eq!(body.price, 1000);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_menu_item_returns_404() -> TestResult {
        let mut menu_items = MockMenuItemsService::new();

        menu_items
            .expect_get_menu_item()
            .once()
            .return_once(|_| Err(MenuItemsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/menu-items/{}",
            MenuItemUuid::new()
        ))
        .send(&make_service(menu_items))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
