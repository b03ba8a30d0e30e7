//! Loan management endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::loan::LoanHistory};

/// Loan request
#[derive(Deserialize, ToSchema)]
pub struct LoanBookRequest {
    /// Borrowing user's name
    pub user_name: String,
    /// Name of the book to loan
    pub book_name: String,
}

/// Return request
#[derive(Deserialize, ToSchema)]
pub struct ReturnBookRequest {
    /// Borrowing user's name
    pub user_name: String,
    /// Name of the book to return
    pub book_name: String,
}

/// Number of loan records currently out
#[derive(Serialize, ToSchema)]
pub struct LoanCountResponse {
    pub count: i64,
}

/// Loan a book to a user
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = LoanBookRequest,
    responses(
        (status = 201, description = "Loan created", body = LoanHistory),
        (status = 404, description = "User or book not found"),
        (status = 409, description = "Book already loaned out")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanBookRequest>,
) -> AppResult<(StatusCode, Json<LoanHistory>)> {
    let loan = state
        .services
        .books
        .loan_book(&request.user_name, &request.book_name)
        .await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return a loaned book
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = ReturnBookRequest,
    responses(
        (status = 200, description = "Book returned", body = LoanHistory),
        (status = 404, description = "User or active loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnBookRequest>,
) -> AppResult<Json<LoanHistory>> {
    let loan = state
        .services
        .books
        .return_book(&request.user_name, &request.book_name)
        .await?;
    Ok(Json(loan))
}

/// Count loans currently out
#[utoipa::path(
    get,
    path = "/loans/count",
    tag = "loans",
    responses(
        (status = 200, description = "Number of books currently loaned out", body = LoanCountResponse)
    )
)]
pub async fn count_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<LoanCountResponse>> {
    let count = state.services.books.count_loaned_books().await?;
    Ok(Json(LoanCountResponse { count }))
}
