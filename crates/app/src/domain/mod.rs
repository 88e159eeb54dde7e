//! Miam Domain Concerns

pub mod carts;
pub mod menu_items;
pub mod notifications;
pub mod orders;
pub mod restaurants;
pub mod reviews;
pub mod users;
