//! In-process persistence for tests and local runs without PostgreSQL.
//!
//! Mirrors the database adapter: emails are unique, reads through `users()`
//! see committed rows only, and writes made inside a transaction are staged
//! until the closure returns `Ok`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio::sync::{Mutex, RwLock};

use super::unit_of_work::{TransactionContext, UnitOfWork};
use crate::repository::UserRepository;
use common::{AppError, AppResult, OptionExt};
use domain::User;

fn duplicate_email(email: &str) -> AppError {
    AppError::internal(format!(
        "duplicate key value violates unique constraint users_email_key ({email})"
    ))
}

/// Committed rows keyed by email.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed users
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Apply staged rows atomically, or none of them.
    async fn commit(&self, staged: Vec<User>) -> AppResult<()> {
        let mut rows = self.rows.write().await;

        if let Some(user) = staged.iter().find(|u| rows.contains_key(u.email())) {
            return Err(duplicate_email(user.email()));
        }

        for user in staged {
            rows.insert(user.email().to_string(), user);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn create(&self, user: &User) -> AppResult<User> {
        let mut rows = self.rows.write().await;

        if rows.contains_key(user.email()) {
            return Err(duplicate_email(user.email()));
        }

        rows.insert(user.email().to_string(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        self.rows.read().await.get(email).cloned().ok_or_not_found()
    }
}

/// Repository view used inside a single in-memory transaction.
struct StagedUserRepository<'a> {
    store: &'a MemoryUserStore,
    staged: Mutex<Vec<User>>,
}

impl<'a> StagedUserRepository<'a> {
    fn new(store: &'a MemoryUserStore) -> Self {
        Self {
            store,
            staged: Mutex::new(Vec::new()),
        }
    }

    fn into_staged(self) -> Vec<User> {
        self.staged.into_inner()
    }
}

#[async_trait]
impl<'a> UserRepository for StagedUserRepository<'a> {
    async fn create(&self, user: &User) -> AppResult<User> {
        let mut staged = self.staged.lock().await;

        if staged.iter().any(|u| u.email() == user.email())
            || self.store.rows.read().await.contains_key(user.email())
        {
            return Err(duplicate_email(user.email()));
        }

        staged.push(user.clone());
        Ok(user.clone())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        if let Some(user) = self
            .staged
            .lock()
            .await
            .iter()
            .find(|u| u.email() == email)
        {
            return Ok(user.clone());
        }

        self.store.find_by_email(email).await
    }
}

/// UnitOfWork over [`MemoryUserStore`].
#[derive(Clone, Default)]
pub struct MemoryPersistence {
    store: Arc<MemoryUserStore>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access to the committed rows
    pub fn store(&self) -> Arc<MemoryUserStore> {
        self.store.clone()
    }
}

#[async_trait]
impl UnitOfWork for MemoryPersistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.store.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send,
    {
        let repo = StagedUserRepository::new(&self.store);
        let value = f(TransactionContext::new(&repo)).await?;

        self.store.commit(repo.into_staged()).await?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::UserStatus;
    use uuid::Uuid;

    fn user(email: &str) -> User {
        User::reconstruct(
            Uuid::new_v4(),
            email.to_string(),
            b"hash".to_vec(),
            "Test".to_string(),
            UserStatus::Active,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_commit_on_ok() {
        let uow = MemoryPersistence::new();
        let new_user = user("a@example.com");

        let created = crate::with_transaction!(uow, |tx| tx.users().create(&new_user).await).unwrap();

        assert_eq!(created.email(), "a@example.com");
        assert_eq!(uow.store().len().await, 1);
        assert!(uow.users().find_by_email("a@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_rollback_on_err() {
        let uow = MemoryPersistence::new();
        let new_user = user("a@example.com");

        let result: AppResult<()> = crate::with_transaction!(uow, |tx| {
            tx.users().create(&new_user).await?;
            Err(AppError::internal("abort"))
        });

        assert!(result.is_err());
        assert!(uow.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_staged_rows_visible_inside_transaction_only() {
        let uow = MemoryPersistence::new();
        let new_user = user("a@example.com");
        let outside = uow.users();
        let probe = outside.clone();

        let result: AppResult<()> = crate::with_transaction!(uow, |tx| {
            tx.users().create(&new_user).await?;
            assert!(tx.users().find_by_email("a@example.com").await.is_ok());
            assert!(matches!(
                probe.find_by_email("a@example.com").await,
                Err(AppError::NotFound)
            ));
            Ok::<_, AppError>(())
        });

        assert!(result.is_ok());
        assert!(outside.find_by_email("a@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let uow = MemoryPersistence::new();
        uow.users().create(&user("a@example.com")).await.unwrap();

        let dup = user("a@example.com");
        let err = crate::with_transaction!(uow, |tx| tx.users().create(&dup).await).unwrap_err();

        assert!(err.is_internal());
        assert_eq!(uow.store().len().await, 1);
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let uow = MemoryPersistence::new();
        assert!(matches!(
            uow.users().find_by_email("nobody@example.com").await,
            Err(AppError::NotFound)
        ));
    }
}
