//! Create User Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use miam_app::domain::users::{data::NewUser, records::UserUuid};

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    users::{errors::into_api_error, handlers::get::UserResponse},
};

/// Create User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let user = state
        .app
        .users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: request.name,
            email: request.email,
        })
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/users/{}", user.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use miam_app::domain::users::{MockUsersService, UsersServiceError, records::UserRecord};

    use crate::test_helpers::users_service;

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        users_service(users, Router::with_path("users").post(handler))
    }

    #[tokio::test]
    async fn test_create_user_returns_201_with_location() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .withf(|user| user.name == "Ada" && user.email == "ada@example.com")
            .return_once(|user| {
                Ok(UserRecord {
                    uuid: user.uuid,
                    name: user.name,
                    email: user.email,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                    deleted_at: None,
                })
            });

        let mut res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "Ada", "email": "ada@example.com" }))
            .send(&make_service(users))
            .await;

        let body: UserResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/users/{}", body.uuid).as_str()));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_returns_409() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_create_user()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/users")
            .json(&json!({ "name": "Ada", "email": "ada@example.com" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
