//! Process-local user store.
//!
//! Mirrors the PostgreSQL table semantics: serial ids, a unique email and
//! store-generated timestamps. Selected with `database.engine = "memory"`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::tz::TimeZone;
use jiff_diesel::ToDiesel;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepository;

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, User>,
}

impl Table {
    fn ensure_unique_email(&self, email: &str, except: Option<i32>) -> AppResult<()> {
        let taken = self
            .rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except);
        if taken {
            return Err(AppError::Duplicate {
                entity: "users".to_string(),
                field: "email".to_string(),
                value: email.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table>,
}

fn now() -> jiff_diesel::DateTime {
    jiff::Timestamp::now()
        .to_zoned(TimeZone::UTC)
        .datetime()
        .to_diesel()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_and_count(&self, offset: u64, limit: u64) -> AppResult<(Vec<User>, u64)> {
        let table = self.table.read().await;
        let rows = table
            .rows
            .values()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok((rows, table.rows.len() as u64))
    }

    async fn find_one(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut table = self.table.write().await;
        table.ensure_unique_email(&new_user.email, None)?;

        table.last_id += 1;
        let created_at = now();
        let user = User {
            id: table.last_id,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            gender: new_user.gender,
            seniority: new_user.seniority,
            experience: new_user.experience,
            created_at,
            updated_at: created_at,
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, mut user: User) -> AppResult<User> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&user.id) {
            return Err(AppError::not_found("User", user.id));
        }
        table.ensure_unique_email(&user.email, Some(user.id))?;

        user.updated_at = now();
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let removed = self.table.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
