//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// User model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    /// Unknown for some legacy records
    pub age: Option<i32>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "Age must not be negative"))]
    pub age: Option<i32>,
}

/// Rename request for an existing user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserName {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}

/// One borrowed book inside a user's loan history report
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookHistory {
    /// Borrowed book name
    pub name: String,
    /// Whether the book has come back
    pub returned: bool,
}

/// A user together with every loan record they own
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserLoanHistories {
    pub id: i32,
    pub name: String,
    pub books: Vec<BookHistory>,
}
