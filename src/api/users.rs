//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUserName, User, UserLoanHistories},
};

/// Query parameters for deleting a user
#[derive(Debug, Deserialize)]
pub struct DeleteUserParams {
    pub name: String,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.get_users().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    Json(user): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let created = state.services.users.save_user(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename an existing user
#[utoipa::path(
    put,
    path = "/users/{id}/name",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserName,
    responses(
        (status = 200, description = "User renamed", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_name(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserName>,
) -> AppResult<Json<User>> {
    let updated = state.services.users.update_user_name(id, request).await?;
    Ok(Json(updated))
}

/// Delete a user by name
#[utoipa::path(
    delete,
    path = "/users",
    tag = "users",
    params(
        ("name" = String, Query, description = "Name of the user to delete")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Query(params): Query<DeleteUserParams>,
) -> AppResult<StatusCode> {
    state.services.users.delete_user(&params.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List every user with their loan history
#[utoipa::path(
    get,
    path = "/users/loan-histories",
    tag = "users",
    responses(
        (status = 200, description = "Users with their loan histories", body = Vec<UserLoanHistories>)
    )
)]
pub async fn list_user_loan_histories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<UserLoanHistories>>> {
    let histories = state.services.users.get_user_loan_histories().await?;
    Ok(Json(histories))
}
