//! Repository layer: storage interfaces and their backends

pub mod books;
pub mod loans;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use books::BookStore;
pub use loans::LoanHistoryStore;
pub use users::UserStore;

/// Main repository struct holding one store per record family
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
    pub loans: Arc<dyn LoanHistoryStore>,
}

impl Repository {
    /// Create a repository of Postgres stores sharing the given pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::PostgresUserStore::new(pool.clone())),
            books: Arc::new(books::PostgresBookStore::new(pool.clone())),
            loans: Arc::new(loans::PostgresLoanHistoryStore::new(pool)),
        }
    }

    /// Create a repository of in-memory stores
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(users::InMemoryUserStore::default()),
            books: Arc::new(books::InMemoryBookStore::default()),
            loans: Arc::new(loans::InMemoryLoanHistoryStore::default()),
        }
    }
}
