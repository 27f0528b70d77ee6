use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ErrorResponse, ResourceHandler, ValidatedJson,
    errors::responses::{
        BadGatewayResponse, BadRequestIdentifierResponse, BadRequestValidationResponse,
        NotFoundResponse, StorageMappingErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, CreatedResponse, PatchUser, UpdateUser, UserResponse};
use crate::storage::UserStorage;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, patch_user, delete_user),
    components(
        schemas(UserResponse, CreatedResponse, CreateUser, UpdateUser, PatchUser, ErrorResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdentifierResponse,
            StorageMappingErrorResponse,
            BadGatewayResponse
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// HTTP operations for the user resource
///
/// Each operation makes at most one storage call.
pub struct UserHandler<S> {
    storage: Arc<S>,
}

impl<S: UserStorage + 'static> UserHandler<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }
}

impl<S: UserStorage + 'static> ResourceHandler for UserHandler<S> {
    fn register(&self, router: Router) -> Router {
        let users = Router::new()
            .route("/users", get(list_users::<S>).post(create_user::<S>))
            .route(
                "/users/{id}",
                get(get_user::<S>)
                    .put(update_user::<S>)
                    .patch(patch_user::<S>)
                    .delete(delete_user::<S>),
            )
            .with_state(self.storage.clone());

        router.merge(users)
    }
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 500, response = StorageMappingErrorResponse),
        (status = 502, response = BadGatewayResponse)
    )
)]
async fn list_users<S: UserStorage>(
    State(storage): State<Arc<S>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = storage.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = CreatedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = StorageMappingErrorResponse),
        (status = 502, response = BadGatewayResponse)
    )
)]
async fn create_user<S: UserStorage>(
    State(storage): State<Arc<S>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let id = storage.create(&input.into()).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StorageMappingErrorResponse),
        (status = 502, response = BadGatewayResponse)
    )
)]
async fn get_user<S: UserStorage>(
    State(storage): State<Arc<S>>,
    Path(id): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = storage.find_one(&id).await?;
    Ok(Json(user.into()))
}

/// Replace a user's fields
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID (24-character hex)")
    ),
    request_body = UpdateUser,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StorageMappingErrorResponse),
        (status = 502, response = BadGatewayResponse)
    )
)]
async fn update_user<S: UserStorage>(
    State(storage): State<Arc<S>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<impl IntoResponse> {
    storage.update(&input.into_user(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update some of a user's fields
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID (24-character hex)")
    ),
    request_body = PatchUser,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StorageMappingErrorResponse),
        (status = 502, response = BadGatewayResponse)
    )
)]
async fn patch_user<S: UserStorage>(
    State(storage): State<Arc<S>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<PatchUser>,
) -> UserResult<impl IntoResponse> {
    storage.patch(&id, &input.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID (24-character hex)")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestIdentifierResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StorageMappingErrorResponse),
        (status = 502, response = BadGatewayResponse)
    )
)]
async fn delete_user<S: UserStorage>(
    State(storage): State<Arc<S>>,
    Path(id): Path<String>,
) -> UserResult<impl IntoResponse> {
    storage.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
