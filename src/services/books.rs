//! Book catalog and lending service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookStat, CreateBook},
        loan::{LoanHistory, LoanStatus, NewLoanHistory},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new book. Names are allowed to repeat.
    pub async fn save_book(&self, request: CreateBook) -> AppResult<Book> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository.books.insert(&request).await
    }

    /// Loan a book to a user.
    ///
    /// Fails when the book is unknown, when it already has an
    /// unreturned loan record, or when the user is unknown.
    pub async fn loan_book(&self, user_name: &str, book_name: &str) -> AppResult<LoanHistory> {
        let book = self
            .repository
            .books
            .find_by_name(book_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_name)))?;

        if self.repository.loans.exists_loaned(&book.name).await? {
            return Err(AppError::AlreadyLoaned {
                book_name: book.name,
            });
        }

        let user = self
            .repository
            .users
            .find_by_name(user_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_name)))?;

        self.repository
            .loans
            .insert(&NewLoanHistory {
                user_id: user.id,
                book_name: book.name,
                status: LoanStatus::Loaned,
            })
            .await
    }

    /// Mark the user's outstanding loan of the named book as returned
    pub async fn return_book(&self, user_name: &str, book_name: &str) -> AppResult<LoanHistory> {
        let user = self
            .repository
            .users
            .find_by_name(user_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_name)))?;

        let loan = self
            .repository
            .loans
            .find_loaned(user.id, book_name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No active loan of {} for user {}",
                    book_name, user_name
                ))
            })?;

        self.repository.loans.mark_returned(loan.id).await?;

        Ok(LoanHistory {
            status: LoanStatus::Returned,
            ..loan
        })
    }

    /// Number of loan records currently out
    pub async fn count_loaned_books(&self) -> AppResult<i64> {
        self.repository.loans.count_loaned().await
    }

    /// Book counts per type over the whole catalog
    pub async fn get_book_statistics(&self) -> AppResult<Vec<BookStat>> {
        self.repository.books.stats_by_type().await
    }
}
