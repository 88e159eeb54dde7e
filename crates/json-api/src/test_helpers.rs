//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use miam_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartLineRecord, CartRecord, CartStatus, CartUuid},
        },
        menu_items::{
            MockMenuItemsService,
            records::{MenuItemCategory, MenuItemRecord, MenuItemUuid},
        },
        notifications::MockNotificationsService,
        orders::{
            MockOrdersService,
            records::{DeliveryAddress, OrderRecord, OrderStatus, OrderUuid},
        },
        restaurants::{
            MockRestaurantsService,
            records::{GeoPoint, RatingAggregate, RestaurantRecord, RestaurantUuid},
        },
        reviews::{
            MockReviewsService,
            records::{ReviewRating, ReviewRecord, ReviewUuid},
        },
        users::{MockUsersService, records::UserUuid},
    },
};

use crate::{errors, state::State};

/// One mock per service. A mock without expectations fails any call made to it.
#[derive(Default)]
pub(crate) struct MockServices {
    pub(crate) users: MockUsersService,
    pub(crate) restaurants: MockRestaurantsService,
    pub(crate) menu_items: MockMenuItemsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) reviews: MockReviewsService,
    pub(crate) notifications: MockNotificationsService,
}

impl MockServices {
    pub(crate) fn into_service(self, route: Router) -> Service {
        let app = AppContext {
            users: Arc::new(self.users),
            restaurants: Arc::new(self.restaurants),
            menu_items: Arc::new(self.menu_items),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            reviews: Arc::new(self.reviews),
            notifications: Arc::new(self.notifications),
        };

        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(app)))
                .push(route),
        )
        .catcher(errors::catcher())
    }
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    MockServices {
        carts,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    MockServices {
        orders,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn reviews_service(reviews: MockReviewsService, route: Router) -> Service {
    MockServices {
        reviews,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    MockServices {
        users,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn restaurants_service(restaurants: MockRestaurantsService, route: Router) -> Service {
    MockServices {
        restaurants,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn menu_items_service(menu_items: MockMenuItemsService, route: Router) -> Service {
    MockServices {
        menu_items,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn notifications_service(
    notifications: MockNotificationsService,
    route: Router,
) -> Service {
    MockServices {
        notifications,
        ..MockServices::default()
    }
    .into_service(route)
}

/// An open cart holding two units of one 1000 item from a restaurant charging 300.
pub(crate) fn make_cart(user: UserUuid) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        user_uuid: user,
        status: CartStatus::Open,
        subtotal: 2_000,
        delivery_fee: 300,
        lines: vec![CartLineRecord {
            menu_item_uuid: MenuItemUuid::new(),
            name: Some("Ratatouille".to_string()),
            restaurant_uuid: Some(RestaurantUuid::new()),
            quantity: 2,
            unit_price: 1_000,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_address() -> DeliveryAddress {
    DeliveryAddress {
        street: "12 rue de la Paix".to_string(),
        city: "Paris".to_string(),
        postal_code: "75002".to_string(),
        coordinates: None,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: user,
        cart_uuid: CartUuid::new(),
        subtotal: 2_000,
        delivery_fee: 300,
        total_amount: 2_300,
        delivery_address: make_address(),
        status: OrderStatus::Pending,
        user_notes: None,
        delivery_notes: None,
        lines: Vec::new(),
        placed_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_restaurant(uuid: RestaurantUuid) -> RestaurantRecord {
    RestaurantRecord {
        uuid,
        name: "Chez Paul".to_string(),
        description: None,
        delivery_fee: 300,
        location: GeoPoint {
            longitude: 2.35,
            latitude: 48.85,
        },
        rating: RatingAggregate { sum: 7, count: 2 },
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_menu_item(uuid: MenuItemUuid) -> MenuItemRecord {
    MenuItemRecord {
        uuid,
        restaurant_uuid: RestaurantUuid::new(),
        name: "Ratatouille".to_string(),
        description: "Summer vegetables".to_string(),
        price: 1_000,
        category: MenuItemCategory::Main,
        is_available: true,
        rating: 0.0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_review(rating: ReviewRating) -> ReviewRecord {
    ReviewRecord {
        uuid: ReviewUuid::new(),
        user_uuid: UserUuid::new(),
        order_uuid: OrderUuid::new(),
        restaurant_uuid: RestaurantUuid::new(),
        rating,
        comment: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
