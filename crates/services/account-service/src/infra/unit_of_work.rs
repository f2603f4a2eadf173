//! Unit of Work pattern implementation.
//!
//! The Unit of Work:
//! - Centralizes access to the user repository
//! - Manages database transactions (begin, commit, rollback)
//! - Hands the closure a repository bound to the open transaction, so every
//!   write made through it lands in the same atomic unit

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use sea_orm::{AccessMode, DatabaseConnection, IsolationLevel, TransactionTrait};

use crate::repository::{TxUserRepository, UserRepository, UserStore};
use common::AppResult;

/// Unit of Work trait for dependency injection.
///
/// Not object safe because of the generic `transaction` method; services take
/// the concrete implementation as a type parameter instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository for reads outside any transaction
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Commits when the closure returns `Ok`, rolls back when it returns
    /// `Err`. Dropping the returned future before completion also leaves the
    /// transaction uncommitted.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// The context only borrows the repository, so nothing obtained through it
/// can escape the transaction's lifetime.
#[derive(Clone, Copy)]
pub struct TransactionContext<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> TransactionContext<'a> {
    /// Wrap a repository that is already bound to an open transaction
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self { users }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> &'a dyn UserRepository {
        self.users
    }
}

/// Concrete implementation of UnitOfWork backed by PostgreSQL
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        Self { db, user_repo }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> BoxFuture<'a, AppResult<T>> + Send,
        T: Send,
    {
        // An uncommitted DatabaseTransaction rolls back when dropped
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        let result = {
            let users = TxUserRepository::new(&txn);
            f(TransactionContext::new(&users)).await
        };

        match result {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Simpler API for executing transactional operations.
///
/// ```rust,ignore
/// let user = with_transaction!(uow, |tx| tx.users().create(&user).await)?;
/// ```
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
