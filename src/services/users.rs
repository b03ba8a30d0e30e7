//! User management service

use std::collections::HashMap;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{BookHistory, CreateUser, UpdateUserName, User, UserLoanHistories},
    repository::Repository,
};

#[derive(Clone)]
pub struct UserService {
    repository: Repository,
}

impl UserService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user
    pub async fn save_user(&self, request: CreateUser) -> AppResult<User> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository.users.insert(&request).await
    }

    /// Get all users
    pub async fn get_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.find_all().await
    }

    /// Rename an existing user
    pub async fn update_user_name(&self, id: i32, request: UpdateUserName) -> AppResult<User> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Check if user exists
        let user = self
            .repository
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        self.repository
            .users
            .update_name(user.id, &request.name)
            .await?;

        Ok(User {
            name: request.name,
            ..user
        })
    }

    /// Delete a user by name together with their loan histories
    pub async fn delete_user(&self, name: &str) -> AppResult<()> {
        let user = self
            .repository
            .users
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", name)))?;

        // Histories go first so the user never points at orphaned records
        self.repository.loans.delete_for_user(user.id).await?;
        self.repository.users.delete(user.id).await
    }

    /// Get every user together with their whole loan history. Users
    /// without any loan are reported with an empty book list.
    pub async fn get_user_loan_histories(&self) -> AppResult<Vec<UserLoanHistories>> {
        let users = self.repository.users.find_all().await?;
        let loans = self.repository.loans.find_all().await?;

        let mut books_by_user: HashMap<i32, Vec<BookHistory>> = HashMap::new();
        for loan in loans {
            let returned = loan.is_returned();
            books_by_user
                .entry(loan.user_id)
                .or_default()
                .push(BookHistory {
                    name: loan.book_name,
                    returned,
                });
        }

        Ok(users
            .into_iter()
            .map(|user| UserLoanHistories {
                id: user.id,
                name: user.name,
                books: books_by_user.remove(&user.id).unwrap_or_default(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::loan::{LoanStatus, NewLoanHistory};
    use crate::repository::loans::MockLoanHistoryStore;
    use crate::repository::users::MockUserStore;

    fn setup() -> (UserService, Repository) {
        let repository = Repository::in_memory();
        (UserService::new(repository.clone()), repository)
    }

    fn create_user(name: &str, age: Option<i32>) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            age,
        }
    }

    async fn seed_loan(repository: &Repository, user_id: i32, book_name: &str, status: LoanStatus) {
        repository
            .loans
            .insert(&NewLoanHistory {
                user_id,
                book_name: book_name.to_string(),
                status,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn save_user_stores_name_and_age() {
        let (service, repository) = setup();

        service.save_user(create_user("A", Some(20))).await.unwrap();

        let users = repository.users.find_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "A");
        assert_eq!(users[0].age, Some(20));
    }

    #[tokio::test]
    async fn save_user_accepts_missing_age() {
        let (service, repository) = setup();

        service.save_user(create_user("B", None)).await.unwrap();

        let users = repository.users.find_all().await.unwrap();
        assert_eq!(users[0].name, "B");
        assert_eq!(users[0].age, None);
    }

    #[tokio::test]
    async fn save_user_rejects_blank_name() {
        let (service, repository) = setup();

        let result = service.save_user(create_user("", Some(20))).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(repository.users.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_user_rejects_negative_age() {
        let (service, _) = setup();

        let result = service.save_user(create_user("A", Some(-1))).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn get_users_returns_every_record() {
        let (service, _) = setup();

        service.save_user(create_user("A", Some(20))).await.unwrap();
        service.save_user(create_user("B", None)).await.unwrap();

        let users = service.get_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "A");
        assert_eq!(users[1].name, "B");
    }

    #[tokio::test]
    async fn update_user_name_overwrites_the_name() {
        let (service, repository) = setup();

        let user = service.save_user(create_user("A", Some(20))).await.unwrap();

        let updated = service
            .update_user_name(
                user.id,
                UpdateUserName {
                    name: "B".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.name, "B");
        assert_eq!(updated.age, Some(20));

        let stored = repository.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "B");
    }

    #[tokio::test]
    async fn update_user_name_fails_for_unknown_id() {
        let (service, _) = setup();

        let result = service
            .update_user_name(
                42,
                UpdateUserName {
                    name: "B".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_user_removes_the_user_and_their_histories() {
        let (service, repository) = setup();

        let user = service.save_user(create_user("A", None)).await.unwrap();
        seed_loan(&repository, user.id, "book1", LoanStatus::Loaned).await;
        seed_loan(&repository, user.id, "book2", LoanStatus::Returned).await;

        service.delete_user("A").await.unwrap();

        assert!(repository.users.find_all().await.unwrap().is_empty());
        assert!(repository.loans.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_user_fails_for_unknown_name() {
        let (service, _) = setup();

        let result = service.delete_user("A").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn loan_histories_include_users_without_loans() {
        let (service, _) = setup();

        service.save_user(create_user("A", None)).await.unwrap();

        let histories = service.get_user_loan_histories().await.unwrap();

        assert_eq!(histories.len(), 1);
        assert_eq!(histories[0].name, "A");
        assert!(histories[0].books.is_empty());
    }

    #[tokio::test]
    async fn loan_histories_report_book_names_and_return_flags() {
        let (service, repository) = setup();

        let user = service.save_user(create_user("A", None)).await.unwrap();
        seed_loan(&repository, user.id, "book1", LoanStatus::Loaned).await;
        seed_loan(&repository, user.id, "book2", LoanStatus::Loaned).await;
        seed_loan(&repository, user.id, "book3", LoanStatus::Returned).await;

        let histories = service.get_user_loan_histories().await.unwrap();

        assert_eq!(histories.len(), 1);
        let books = &histories[0].books;
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].name, "book1");
        assert!(!books[0].returned);
        assert!(!books[1].returned);
        assert!(books[2].returned);
    }

    #[tokio::test]
    async fn storage_failures_surface_unchanged() {
        let mut users = MockUserStore::new();
        users
            .expect_find_all()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolClosed)));

        let repository = Repository {
            users: Arc::new(users),
            books: Arc::new(crate::repository::books::InMemoryBookStore::default()),
            loans: Arc::new(MockLoanHistoryStore::new()),
        };
        let service = UserService::new(repository);

        let result = service.get_users().await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
