//! Restaurant Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Restaurant UUID
pub type RestaurantUuid = TypedUuid<RestaurantRecord>;

/// Restaurant Record
#[derive(Debug, Clone)]
pub struct RestaurantRecord {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub description: Option<String>,

    /// Flat fee charged once per order that contains any of this restaurant's items.
    pub delivery_fee: u64,

    pub location: GeoPoint,
    pub rating: RatingAggregate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Whether both coordinates fall inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }
}

/// Running review aggregate for a restaurant.
///
/// The sum of all live review ratings is kept alongside the count so that
/// adding and retracting a review are exact integer updates. The average is
/// derived on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingAggregate {
    pub sum: u64,
    pub count: u64,
}

impl RatingAggregate {
    /// Mean rating, or `0.0` when there are no reviews.
    #[expect(
        clippy::cast_precision_loss,
        reason = "rating sums and counts stay far below 2^52"
    )]
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }

        self.sum as f64 / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_of_empty_aggregate_is_zero() {
        let rating = RatingAggregate::default();

        assert!(rating.average().abs() < f64::EPSILON);
    }

    #[test]
    fn average_divides_sum_by_count() {
        let rating = RatingAggregate { sum: 6, count: 2 };

        assert!((rating.average() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_points_are_invalid() {
        assert!(
            GeoPoint {
                longitude: 2.35,
                latitude: 48.85
            }
            .is_valid()
        );

        assert!(
            !GeoPoint {
                longitude: 200.0,
                latitude: 0.0
            }
            .is_valid()
        );

        assert!(
            !GeoPoint {
                longitude: 0.0,
                latitude: -91.0
            }
            .is_valid()
        );
    }
}
