//! Menu Item Handlers

use miam_app::domain::menu_items::records::{MenuItemCategory, UnknownCategory};

use crate::errors::ApiError;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod list;
pub(crate) mod update;

fn parse_category(category: &str) -> Result<MenuItemCategory, ApiError> {
    category
        .parse()
        .map_err(|error: UnknownCategory| ApiError::invalid_argument(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_category_accepts_lowercase_names() {
        assert_eq!(parse_category("dessert"), Ok(MenuItemCategory::Dessert));
    }

    #[test]
    fn parse_category_rejects_unknown_names() {
        let error = parse_category("brunch");

        assert!(error.is_err(), "expected brunch to be rejected");
    }
}
