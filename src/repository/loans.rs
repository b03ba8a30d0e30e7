//! Loan history storage interface and its backends

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::loan::{LoanHistory, LoanStatus, NewLoanHistory},
};

/// Storage interface for loan history records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanHistoryStore: Send + Sync {
    /// Insert a new loan history record and return it
    async fn insert(&self, loan: &NewLoanHistory) -> AppResult<LoanHistory>;

    /// Whether any record for the book name is still loaned out
    async fn exists_loaned(&self, book_name: &str) -> AppResult<bool>;

    /// The user's oldest LOANED record for the book name, if any
    async fn find_loaned(&self, user_id: i32, book_name: &str) -> AppResult<Option<LoanHistory>>;

    /// Flip a record to RETURNED
    async fn mark_returned(&self, id: i32) -> AppResult<()>;

    /// Number of records still loaned out
    async fn count_loaned(&self) -> AppResult<i64>;

    /// Get all records ordered by ID
    async fn find_all(&self) -> AppResult<Vec<LoanHistory>>;

    /// Remove every record owned by the user
    async fn delete_for_user(&self, user_id: i32) -> AppResult<()>;
}

/// Postgres-backed loan history store
#[derive(Clone)]
pub struct PostgresLoanHistoryStore {
    pool: Pool<Postgres>,
}

impl PostgresLoanHistoryStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanHistoryStore for PostgresLoanHistoryStore {
    async fn insert(&self, loan: &NewLoanHistory) -> AppResult<LoanHistory> {
        let created = sqlx::query_as::<_, LoanHistory>(
            r#"
            INSERT INTO user_loan_histories (user_id, book_name, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, book_name, status
            "#,
        )
        .bind(loan.user_id)
        .bind(&loan.book_name)
        .bind(loan.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn exists_loaned(&self, book_name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_loan_histories WHERE book_name = $1 AND status = $2)",
        )
        .bind(book_name)
        .bind(LoanStatus::Loaned)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_loaned(&self, user_id: i32, book_name: &str) -> AppResult<Option<LoanHistory>> {
        let loan = sqlx::query_as::<_, LoanHistory>(
            r#"
            SELECT id, user_id, book_name, status
            FROM user_loan_histories
            WHERE user_id = $1 AND book_name = $2 AND status = $3
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(book_name)
        .bind(LoanStatus::Loaned)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn mark_returned(&self, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE user_loan_histories SET status = $1 WHERE id = $2")
            .bind(LoanStatus::Returned)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count_loaned(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_loan_histories WHERE status = $1")
                .bind(LoanStatus::Loaned)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn find_all(&self) -> AppResult<Vec<LoanHistory>> {
        let loans = sqlx::query_as::<_, LoanHistory>(
            "SELECT id, user_id, book_name, status FROM user_loan_histories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    async fn delete_for_user(&self, user_id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM user_loan_histories WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// In-memory loan history store for tests and ephemeral runs
#[derive(Default)]
pub struct InMemoryLoanHistoryStore {
    sequence: AtomicI32,
    loans: RwLock<HashMap<i32, LoanHistory>>,
}

#[async_trait]
impl LoanHistoryStore for InMemoryLoanHistoryStore {
    async fn insert(&self, loan: &NewLoanHistory) -> AppResult<LoanHistory> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = LoanHistory {
            id,
            user_id: loan.user_id,
            book_name: loan.book_name.clone(),
            status: loan.status,
        };
        self.loans.write().insert(id, record.clone());
        Ok(record)
    }

    async fn exists_loaned(&self, book_name: &str) -> AppResult<bool> {
        Ok(self
            .loans
            .read()
            .values()
            .any(|loan| loan.book_name == book_name && loan.status == LoanStatus::Loaned))
    }

    async fn find_loaned(&self, user_id: i32, book_name: &str) -> AppResult<Option<LoanHistory>> {
        Ok(self
            .loans
            .read()
            .values()
            .filter(|loan| {
                loan.user_id == user_id
                    && loan.book_name == book_name
                    && loan.status == LoanStatus::Loaned
            })
            .min_by_key(|loan| loan.id)
            .cloned())
    }

    async fn mark_returned(&self, id: i32) -> AppResult<()> {
        if let Some(loan) = self.loans.write().get_mut(&id) {
            loan.status = LoanStatus::Returned;
        }
        Ok(())
    }

    async fn count_loaned(&self) -> AppResult<i64> {
        Ok(self
            .loans
            .read()
            .values()
            .filter(|loan| loan.status == LoanStatus::Loaned)
            .count() as i64)
    }

    async fn find_all(&self) -> AppResult<Vec<LoanHistory>> {
        let mut loans: Vec<LoanHistory> = self.loans.read().values().cloned().collect();
        loans.sort_by_key(|loan| loan.id);
        Ok(loans)
    }

    async fn delete_for_user(&self, user_id: i32) -> AppResult<()> {
        self.loans.write().retain(|_, loan| loan.user_id != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod in_memory_loan_history_store_tests {
    use super::*;

    fn new_loan(user_id: i32, book_name: &str, status: LoanStatus) -> NewLoanHistory {
        NewLoanHistory {
            user_id,
            book_name: book_name.to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn exists_loaned_ignores_returned_records() {
        let store = InMemoryLoanHistoryStore::default();

        store
            .insert(&new_loan(1, "book1", LoanStatus::Returned))
            .await
            .unwrap();

        assert!(!store.exists_loaned("book1").await.unwrap());

        store
            .insert(&new_loan(1, "book1", LoanStatus::Loaned))
            .await
            .unwrap();

        assert!(store.exists_loaned("book1").await.unwrap());
    }

    #[tokio::test]
    async fn mark_returned_flips_the_status() {
        let store = InMemoryLoanHistoryStore::default();

        let loan = store
            .insert(&new_loan(1, "book1", LoanStatus::Loaned))
            .await
            .unwrap();
        store.mark_returned(loan.id).await.unwrap();

        let loans = store.find_all().await.unwrap();
        assert_eq!(loans[0].status, LoanStatus::Returned);
        assert_eq!(store.count_loaned().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn count_loaned_counts_only_loaned_records() {
        let store = InMemoryLoanHistoryStore::default();

        store
            .insert(&new_loan(1, "book1", LoanStatus::Loaned))
            .await
            .unwrap();
        store
            .insert(&new_loan(1, "book2", LoanStatus::Returned))
            .await
            .unwrap();
        store
            .insert(&new_loan(2, "book3", LoanStatus::Returned))
            .await
            .unwrap();

        assert_eq!(store.count_loaned().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_for_user_keeps_other_users_records() {
        let store = InMemoryLoanHistoryStore::default();

        store
            .insert(&new_loan(1, "book1", LoanStatus::Loaned))
            .await
            .unwrap();
        store
            .insert(&new_loan(2, "book2", LoanStatus::Loaned))
            .await
            .unwrap();

        store.delete_for_user(1).await.unwrap();

        let loans = store.find_all().await.unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].user_id, 2);
    }
}
