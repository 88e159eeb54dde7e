//! Restaurants service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::restaurants::{
        data::NewRestaurant,
        errors::RestaurantsServiceError,
        records::{RestaurantRecord, RestaurantUuid},
        repository::PgRestaurantsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgRestaurantsService {
    db: Db,
    repository: PgRestaurantsRepository,
}

impl PgRestaurantsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRestaurantsRepository::new(),
        }
    }
}

#[async_trait]
impl RestaurantsService for PgRestaurantsService {
    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        if restaurant.name.trim().is_empty() {
            return Err(RestaurantsServiceError::MissingRequiredData);
        }

        if !restaurant.location.is_valid() {
            return Err(RestaurantsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_restaurant(&mut tx, restaurant)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let restaurant = self.repository.get_restaurant(&mut tx, restaurant).await?;

        tx.commit().await?;

        Ok(restaurant)
    }

    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>, RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let restaurants = self.repository.list_restaurants(&mut tx).await?;

        tx.commit().await?;

        Ok(restaurants)
    }

    async fn delete_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<(), RestaurantsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_restaurant(&mut tx, restaurant)
            .await?;

        if rows_affected == 0 {
            return Err(RestaurantsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait RestaurantsService: Send + Sync {
    /// Registers a restaurant with an empty rating aggregate.
    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    /// Retrieve a single live restaurant.
    async fn get_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    /// Live restaurants, ordered by name.
    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>, RestaurantsServiceError>;

    /// Soft-deletes a restaurant.
    async fn delete_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<(), RestaurantsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::restaurants::records::{GeoPoint, RatingAggregate},
        test::TestContext,
    };

    use super::*;

    fn new_restaurant(uuid: RestaurantUuid) -> NewRestaurant {
        NewRestaurant {
            uuid,
            name: "Chez Paul".to_string(),
            description: Some("Bistro".to_string()),
            delivery_fee: 300,
            location: GeoPoint {
                longitude: 2.35,
                latitude: 48.85,
            },
        }
    }

    #[tokio::test]
    async fn create_restaurant_starts_with_empty_rating() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = RestaurantUuid::new();

        let restaurant = ctx.restaurants.create_restaurant(new_restaurant(uuid)).await?;

        assert_eq!(restaurant.uuid, uuid);
        assert_eq!(restaurant.delivery_fee, 300);
        assert_eq!(restaurant.rating, RatingAggregate::default());

        let fetched = ctx.restaurants.get_restaurant(uuid).await?;

        assert_eq!(fetched.name, "Chez Paul");
        assert!((fetched.location.latitude - 48.85).abs() < f64::EPSILON);

        Ok(())
    }

    #[tokio::test]
    async fn create_restaurant_out_of_range_location_returns_invalid_data() {
        let ctx = TestContext::new().await;
        let mut restaurant = new_restaurant(RestaurantUuid::new());
        restaurant.location.latitude = 123.0;

        let result = ctx.restaurants.create_restaurant(restaurant).await;

        assert!(
            matches!(result, Err(RestaurantsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_restaurant_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = RestaurantUuid::new();

        ctx.restaurants.create_restaurant(new_restaurant(uuid)).await?;
        ctx.restaurants.delete_restaurant(uuid).await?;

        let result = ctx.restaurants.get_restaurant(uuid).await;

        assert!(
            matches!(result, Err(RestaurantsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let again = ctx.restaurants.delete_restaurant(uuid).await;

        assert!(
            matches!(again, Err(RestaurantsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_restaurants_skips_deleted_ones() -> TestResult {
        let ctx = TestContext::new().await;
        let kept = RestaurantUuid::new();
        let deleted = RestaurantUuid::new();

        let mut zinc = new_restaurant(kept);
        zinc.name = "Zinc".to_string();

        ctx.restaurants.create_restaurant(zinc).await?;
        ctx.restaurants.create_restaurant(new_restaurant(deleted)).await?;

        let both = ctx.restaurants.list_restaurants().await?;

        assert_eq!(
            both.iter().map(|r| r.uuid).collect::<Vec<_>>(),
            vec![deleted, kept],
            "restaurants should be ordered by name"
        );

        ctx.restaurants.delete_restaurant(deleted).await?;

        let live = ctx.restaurants.list_restaurants().await?;

        assert_eq!(live.iter().map(|r| r.uuid).collect::<Vec<_>>(), vec![kept]);

        Ok(())
    }
}
