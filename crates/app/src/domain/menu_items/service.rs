//! Menu items service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        menu_items::{
            data::{MenuItemUpdate, NewMenuItem},
            errors::MenuItemsServiceError,
            records::{MenuItemRecord, MenuItemUuid},
            repository::PgMenuItemsRepository,
        },
        restaurants::{records::RestaurantUuid, repository::PgRestaurantsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgMenuItemsService {
    db: Db,
    repository: PgMenuItemsRepository,
    restaurants_repository: PgRestaurantsRepository,
}

impl PgMenuItemsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMenuItemsRepository::new(),
            restaurants_repository: PgRestaurantsRepository::new(),
        }
    }
}

#[async_trait]
impl MenuItemsService for PgMenuItemsService {
    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, MenuItemsServiceError> {
        if item.name.trim().is_empty() {
            return Err(MenuItemsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_menu_item(&mut tx, item)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => MenuItemsServiceError::RestaurantNotFound,
                other => other.into(),
            })?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_menu_item(
        &self,
        item: MenuItemUuid,
    ) -> Result<MenuItemRecord, MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self.repository.get_menu_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn list_restaurant_menu_items(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<MenuItemRecord>, MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        self.restaurants_repository
            .get_restaurant(&mut tx, restaurant)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => MenuItemsServiceError::RestaurantNotFound,
                other => other.into(),
            })?;

        let items = self
            .repository
            .list_restaurant_menu_items(&mut tx, restaurant)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn update_menu_item(
        &self,
        item: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItemRecord, MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_menu_item(&mut tx, item, update)
            .await?;

        tx.commit().await?;

        tracing::debug!(menu_item_uuid = %item, price = updated.price, "menu item updated");

        Ok(updated)
    }

    async fn delete_menu_item(&self, item: MenuItemUuid) -> Result<(), MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_menu_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(MenuItemsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait MenuItemsService: Send + Sync {
    /// Adds an item to a live restaurant's menu.
    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, MenuItemsServiceError>;

    /// Retrieve a single menu item whose restaurant is also live.
    async fn get_menu_item(
        &self,
        item: MenuItemUuid,
    ) -> Result<MenuItemRecord, MenuItemsServiceError>;

    /// A live restaurant's live menu items, grouped by category.
    async fn list_restaurant_menu_items(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<MenuItemRecord>, MenuItemsServiceError>;

    /// Changes the price and/or availability of a menu item.
    ///
    /// Open carts pick up the new price on their next mutation; placed orders
    /// keep the price they were placed at.
    async fn update_menu_item(
        &self,
        item: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItemRecord, MenuItemsServiceError>;

    /// Soft-deletes a menu item.
    async fn delete_menu_item(&self, item: MenuItemUuid) -> Result<(), MenuItemsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            menu_items::records::MenuItemCategory,
            restaurants::RestaurantsService,
        },
        test::TestContext,
    };

    use super::*;

    fn new_item(uuid: MenuItemUuid, restaurant_uuid: RestaurantUuid) -> NewMenuItem {
        NewMenuItem {
            uuid,
            restaurant_uuid,
            name: "Croque monsieur".to_string(),
            description: "Ham and cheese".to_string(),
            price: 1_000,
            category: MenuItemCategory::Main,
            is_available: true,
        }
    }

    #[tokio::test]
    async fn create_menu_item_returns_item() -> TestResult {
        let ctx = TestContext::new().await;
        let restaurant = ctx.create_restaurant(300).await?;
        let uuid = MenuItemUuid::new();

        let item = ctx
            .menu_items
            .create_menu_item(new_item(uuid, restaurant.uuid))
            .await?;

        assert_eq!(item.uuid, uuid);
        assert_eq!(item.restaurant_uuid, restaurant.uuid);
        assert_eq!(item.price, 1_000);
        assert_eq!(item.category, MenuItemCategory::Main);
        assert!(item.is_available);

        Ok(())
    }

    #[tokio::test]
    async fn create_menu_item_unknown_restaurant_returns_restaurant_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .menu_items
            .create_menu_item(new_item(MenuItemUuid::new(), RestaurantUuid::new()))
            .await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::RestaurantNotFound)),
            "expected RestaurantNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_menu_item_changes_only_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let restaurant = ctx.create_restaurant(300).await?;
        let item = ctx.create_menu_item(restaurant.uuid, 1_000).await?;

        let updated = ctx
            .menu_items
            .update_menu_item(
                item.uuid,
                MenuItemUpdate {
                    price: Some(1_250),
                    is_available: None,
                },
            )
            .await?;

        assert_eq!(updated.price, 1_250);
        assert!(updated.is_available);

        let updated = ctx
            .menu_items
            .update_menu_item(
                item.uuid,
                MenuItemUpdate {
                    price: None,
                    is_available: Some(false),
                },
            )
            .await?;

        assert_eq!(updated.price, 1_250);
        assert!(!updated.is_available);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_restaurant_hides_its_menu_items() -> TestResult {
        let ctx = TestContext::new().await;
        let restaurant = ctx.create_restaurant(300).await?;
        let item = ctx.create_menu_item(restaurant.uuid, 1_000).await?;

        ctx.restaurants.delete_restaurant(restaurant.uuid).await?;

        let result = ctx.menu_items.get_menu_item(item.uuid).await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_menu_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.menu_items.delete_menu_item(MenuItemUuid::new()).await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_restaurant_menu_items_skips_deleted_items() -> TestResult {
        let ctx = TestContext::new().await;
        let restaurant = ctx.create_restaurant(300).await?;
        let other = ctx.create_restaurant(300).await?;

        let kept = ctx.create_menu_item(restaurant.uuid, 1_000).await?;
        let deleted = ctx.create_menu_item(restaurant.uuid, 500).await?;
        ctx.create_menu_item(other.uuid, 700).await?;

        ctx.menu_items.delete_menu_item(deleted.uuid).await?;

        let items = ctx
            .menu_items
            .list_restaurant_menu_items(restaurant.uuid)
            .await?;

        assert_eq!(items.iter().map(|i| i.uuid).collect::<Vec<_>>(), vec![kept.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_restaurant_menu_items_of_deleted_restaurant_returns_restaurant_not_found()
    -> TestResult {
        let ctx = TestContext::new().await;
        let restaurant = ctx.create_restaurant(300).await?;
        ctx.create_menu_item(restaurant.uuid, 1_000).await?;

        ctx.restaurants.delete_restaurant(restaurant.uuid).await?;

        let result = ctx
            .menu_items
            .list_restaurant_menu_items(restaurant.uuid)
            .await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::RestaurantNotFound)),
            "expected RestaurantNotFound, got {result:?}"
        );

        let unknown = ctx
            .menu_items
            .list_restaurant_menu_items(RestaurantUuid::new())
            .await;

        assert!(
            matches!(unknown, Err(MenuItemsServiceError::RestaurantNotFound)),
            "expected RestaurantNotFound, got {unknown:?}"
        );

        Ok(())
    }
}
