//! Book catalog endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::book::{Book, BookStat, CreateBook},
};

/// Register a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.save_book(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Book counts per type
#[utoipa::path(
    get,
    path = "/books/stats",
    tag = "books",
    responses(
        (status = 200, description = "Book counts grouped by type", body = Vec<BookStat>)
    )
)]
pub async fn book_statistics(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookStat>>> {
    let stats = state.services.books.get_book_statistics().await?;
    Ok(Json(stats))
}
