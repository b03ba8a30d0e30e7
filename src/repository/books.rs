//! Book storage interface and its backends

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookStat, BookType, CreateBook},
};

/// Storage interface for catalog books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new book and return the stored record
    async fn insert(&self, book: &CreateBook) -> AppResult<Book>;

    /// Get the lowest-id book carrying the given name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Book>>;

    /// Get all books ordered by ID
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    /// Book counts grouped by type, most numerous type first.
    /// Types without any book do not appear.
    async fn stats_by_type(&self) -> AppResult<Vec<BookStat>>;
}

/// Postgres-backed book store
#[derive(Clone)]
pub struct PostgresBookStore {
    pool: Pool<Postgres>,
}

impl PostgresBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PostgresBookStore {
    async fn insert(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            "INSERT INTO books (name, book_type) VALUES ($1, $2) RETURNING id, name, book_type",
        )
        .bind(&book.name)
        .bind(book.book_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, name, book_type FROM books WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT id, name, book_type FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    async fn stats_by_type(&self) -> AppResult<Vec<BookStat>> {
        let stats = sqlx::query_as::<_, BookStat>(
            r#"
            SELECT book_type, COUNT(*) AS count
            FROM books
            GROUP BY book_type
            ORDER BY count DESC, book_type
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stats)
    }
}

/// In-memory book store for tests and ephemeral runs
#[derive(Default)]
pub struct InMemoryBookStore {
    sequence: AtomicI32,
    books: RwLock<HashMap<i32, Book>>,
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn insert(&self, book: &CreateBook) -> AppResult<Book> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = Book {
            id,
            name: book.name.clone(),
            book_type: book.book_type,
        };
        self.books.write().insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Book>> {
        Ok(self
            .books
            .read()
            .values()
            .filter(|book| book.name == name)
            .min_by_key(|book| book.id)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let mut books: Vec<Book> = self.books.read().values().cloned().collect();
        books.sort_by_key(|book| book.id);
        Ok(books)
    }

    async fn stats_by_type(&self) -> AppResult<Vec<BookStat>> {
        let mut counts: HashMap<BookType, i64> = HashMap::new();
        for book in self.books.read().values() {
            *counts.entry(book.book_type).or_insert(0) += 1;
        }

        let mut stats: Vec<BookStat> = counts
            .into_iter()
            .map(|(book_type, count)| BookStat { book_type, count })
            .collect();
        // Same ordering as the SQL backend
        stats.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.book_type.as_str().cmp(b.book_type.as_str()))
        });

        Ok(stats)
    }
}

#[cfg(test)]
mod in_memory_book_store_tests {
    use super::*;

    fn create_book(name: &str, book_type: BookType) -> CreateBook {
        CreateBook {
            name: name.to_string(),
            book_type,
        }
    }

    #[tokio::test]
    async fn insert_keeps_duplicate_names_as_separate_records() {
        let store = InMemoryBookStore::default();

        store
            .insert(&create_book("이상한 나라의 엘리스", BookType::Computer))
            .await
            .unwrap();
        store
            .insert(&create_book("이상한 나라의 엘리스", BookType::Computer))
            .await
            .unwrap();

        assert_eq!(store.find_all().await.unwrap().len(), 2);
        let found = store.find_by_name("이상한 나라의 엘리스").await.unwrap().unwrap();
        assert_eq!(found.id, 1);
    }

    #[tokio::test]
    async fn stats_count_books_per_type() {
        let store = InMemoryBookStore::default();

        store.insert(&create_book("A", BookType::Computer)).await.unwrap();
        store.insert(&create_book("B", BookType::Computer)).await.unwrap();
        store.insert(&create_book("C", BookType::Science)).await.unwrap();

        let stats = store.stats_by_type().await.unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].book_type, BookType::Computer);
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].book_type, BookType::Science);
        assert_eq!(stats[1].count, 1);
    }

    #[tokio::test]
    async fn stats_are_empty_for_an_empty_catalog() {
        let store = InMemoryBookStore::default();

        assert!(store.stats_by_type().await.unwrap().is_empty());
    }
}
