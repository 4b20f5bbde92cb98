//! User service for business logic operations.
//!
//! Holds the not-found and pagination policy; everything else is a
//! pass-through to the repository port.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, Page, PageMeta, UpdateUser, User};
use crate::repositories::UserRepository;

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeleteResult {
    pub success: bool,
}

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Lists users ordered by id.
    ///
    /// Fails with `PageOutOfRange` when `page` is past the last page of a
    /// non-empty table.
    pub async fn find_all(&self, page: u64, size: u64) -> AppResult<Page<User>> {
        let offset = page.saturating_sub(1).saturating_mul(size);
        let (items, total) = self.repo.find_and_count(offset, size).await?;
        let meta = PageMeta::calculate(total, page, size)?;

        tracing::debug!(page, size, total, returned = items.len(), "Listed users");
        Ok(Page { items, meta })
    }

    /// Gets a user by id, or `NotFound` ("User #<id> not found").
    pub async fn find_one(&self, id: i32) -> AppResult<User> {
        self.repo
            .find_one(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let user = self.repo.create(new_user).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Loads the user, merges the provided fields and saves the result.
    pub async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<User> {
        let existing = self.find_one(id).await?;
        let merged = self.repo.merge(existing, changes);
        let saved = self.repo.save(merged).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(saved)
    }

    pub async fn remove(&self, id: i32) -> AppResult<DeleteResult> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            return Err(AppError::not_found("User", id));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(DeleteResult { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Seniority};
    use crate::repositories::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::default()))
    }

    fn new_user(n: usize) -> NewUser {
        NewUser {
            first_name: format!("Jerry{n}"),
            last_name: "Smith".into(),
            email: format!("jerry{n}@smith.io"),
            gender: Gender::Male,
            seniority: Seniority::Trainee,
            experience: Some("Advertising".into()),
        }
    }

    #[tokio::test]
    async fn create_then_read_round_trip() {
        let svc = service();
        let created = svc.create(new_user(1)).await.unwrap();
        let fetched = svc.find_one(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.first_name, "Jerry1");
        assert_eq!(fetched.email, "jerry1@smith.io");
        assert_eq!(fetched.experience.as_deref(), Some("Advertising"));
    }

    #[tokio::test]
    async fn find_one_missing_names_the_id() {
        let err = service().find_one(9999).await.unwrap_err();
        assert_eq!(err.to_string(), "User #9999 not found");
    }

    #[tokio::test]
    async fn update_is_partial() {
        let svc = service();
        let created = svc.create(new_user(1)).await.unwrap();

        let updated = svc
            .update(
                created.id,
                UpdateUser {
                    first_name: Some("Beth".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Beth");
        assert_eq!(updated.last_name, created.last_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.gender, created.gender);
        assert_eq!(updated.seniority, created.seniority);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let err = service()
            .update(5, UpdateUser::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_is_terminal() {
        let svc = service();
        let created = svc.create(new_user(1)).await.unwrap();

        assert_eq!(
            svc.remove(created.id).await.unwrap(),
            DeleteResult { success: true }
        );
        assert!(matches!(
            svc.find_one(created.id).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            svc.remove(created.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn find_all_pages_in_id_order() {
        let svc = service();
        for n in 0..25 {
            svc.create(new_user(n)).await.unwrap();
        }

        let page = svc.find_all(3, 10).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id, 21);
        assert_eq!(
            page.meta,
            PageMeta {
                page: 3,
                size: 10,
                total: 25,
                total_pages: 3
            }
        );
    }

    #[tokio::test]
    async fn find_all_past_the_end_fails() {
        let svc = service();
        for n in 0..3 {
            svc.create(new_user(n)).await.unwrap();
        }
        let err = svc.find_all(1000, 10).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "The page #1000 is greater than the total pages."
        );
    }

    #[tokio::test]
    async fn find_all_on_empty_table_is_empty() {
        let page = service().find_all(1, 10).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.meta.total_pages, 0);
    }
}
