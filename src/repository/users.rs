//! User storage interface and its backends

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::user::{CreateUser, User},
};

/// Storage interface for user records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return the stored record
    async fn insert(&self, user: &CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Get the lowest-id user carrying the given name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>>;

    /// Get all users ordered by ID
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Overwrite the name of an existing user
    async fn update_name(&self, id: i32, name: &str) -> AppResult<()>;

    /// Delete a user by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Postgres-backed user store
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: Pool<Postgres>,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert(&self, user: &CreateUser) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, age) VALUES ($1, $2) RETURNING id, name, age",
        )
        .bind(&user.name)
        .bind(user.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, age FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, age FROM users WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, age FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn update_name(&self, id: i32, name: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// In-memory user store for tests and ephemeral runs
#[derive(Default)]
pub struct InMemoryUserStore {
    sequence: AtomicI32,
    users: RwLock<HashMap<i32, User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &CreateUser) -> AppResult<User> {
        // Ids start at 1, matching the serial column of the Postgres backend
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = User {
            id,
            name: user.name.clone(),
            age: user.age,
        };
        self.users.write().insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .filter(|user| user.name == name)
            .min_by_key(|user| user.id)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().values().cloned().collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn update_name(&self, id: i32, name: &str) -> AppResult<()> {
        if let Some(user) = self.users.write().get_mut(&id) {
            user.name = name.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.users.write().remove(&id);
        Ok(())
    }
}
