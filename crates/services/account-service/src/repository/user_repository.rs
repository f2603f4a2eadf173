//! User repository backed by PostgreSQL.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppResult, OptionExt};
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Email uniqueness is left to the backing store; `create` does not pre-check it.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a freshly created user
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Find user by email address. Returns `AppError::NotFound` if absent.
    async fn find_by_email(&self, email: &str) -> AppResult<User>;
}

async fn insert_user<C>(conn: &C, user: &User) -> AppResult<User>
where
    C: ConnectionTrait,
{
    let model = ActiveModel::from(user).insert(conn).await?;
    User::try_from(model)
}

async fn select_by_email<C>(conn: &C, email: &str) -> AppResult<User>
where
    C: ConnectionTrait,
{
    UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .one(conn)
        .await?
        .ok_or_not_found()?
        .try_into()
}

/// Concrete implementation of UserRepository on the shared pool
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    #[tracing::instrument(name = "UserStore::create", skip_all, fields(user_id = %user.id()))]
    async fn create(&self, user: &User) -> AppResult<User> {
        insert_user(&self.db, user).await
    }

    #[tracing::instrument(name = "UserStore::find_by_email", skip(self))]
    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        select_by_email(&self.db, email).await
    }
}

/// Transaction-aware user repository.
///
/// Borrows the transaction so it cannot outlive it.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    /// Create new transaction-aware repository
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl<'a> UserRepository for TxUserRepository<'a> {
    #[tracing::instrument(name = "TxUserRepository::create", skip_all, fields(user_id = %user.id()))]
    async fn create(&self, user: &User) -> AppResult<User> {
        insert_user(self.txn, user).await
    }

    #[tracing::instrument(name = "TxUserRepository::find_by_email", skip(self))]
    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        select_by_email(self.txn, email).await
    }
}
