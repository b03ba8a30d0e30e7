//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library Lending Service REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Users
        users::list_users,
        users::create_user,
        users::update_user_name,
        users::delete_user,
        users::list_user_loan_histories,
        // Books
        books::create_book,
        books::book_statistics,
        // Loans
        loans::create_loan,
        loans::return_loan,
        loans::count_loans,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUserName,
            crate::models::user::UserLoanHistories,
            crate::models::user::BookHistory,
            // Books
            crate::models::book::Book,
            crate::models::book::BookType,
            crate::models::book::CreateBook,
            crate::models::book::BookStat,
            // Loans
            crate::models::loan::LoanHistory,
            crate::models::loan::LoanStatus,
            loans::LoanBookRequest,
            loans::ReturnBookRequest,
            loans::LoanCountResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "books", description = "Book catalog"),
        (name = "loans", description = "Loan management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
