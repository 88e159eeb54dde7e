//! List Notifications Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::users::records::UserUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    notifications::{errors::into_api_error, responses::NotificationResponse},
    state::State,
};

/// List Notifications Handler
///
/// Newest first. A user with no notifications gets an empty list.
#[endpoint(tags("notifications"), summary = "List User Notifications")]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let notifications = state
        .app
        .notifications
        .list_notifications(UserUuid::from_uuid(user.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}
