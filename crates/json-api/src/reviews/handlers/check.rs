//! Check Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::{orders::records::OrderUuid, users::records::UserUuid};

use crate::{errors::ApiError, extensions::*, reviews::errors::into_api_error, state::State};

/// Review Check Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewCheckResponse {
    /// Whether the user has already reviewed the order
    pub has_reviewed: bool,
}

/// Check Review Handler
///
/// Advisory duplicate check; creating a second review is rejected regardless.
#[endpoint(tags("reviews"), summary = "Check Existing Review")]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewCheckResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let has_reviewed = state
        .app
        .reviews
        .review_exists(
            UserUuid::from_uuid(user.into_inner()),
            OrderUuid::from_uuid(order.into_inner()),
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(ReviewCheckResponse { has_reviewed }))
}
