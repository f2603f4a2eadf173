//! Signup workflow: create a user and persist it in one transaction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::run_blocking;
use crate::infra::UnitOfWork;
use crate::with_transaction;
use common::AppResult;
use domain::{CredentialHasher, User, UserStatus};

/// Signup request fields
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Fields of the created user returned to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutput {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for SignupOutput {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            status: user.status(),
            created_at: user.created_at(),
        }
    }
}

pub struct SignupUseCase<U> {
    uow: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<U: UnitOfWork> SignupUseCase<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { uow, hasher }
    }

    pub async fn execute(&self, input: SignupInput) -> AppResult<SignupOutput> {
        self.execute_at(input, Utc::now()).await
    }

    /// Run the workflow with an explicit creation time.
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all, fields(email = %input.email))]
    pub async fn execute_at(&self, input: SignupInput, now: DateTime<Utc>) -> AppResult<SignupOutput> {
        let SignupInput {
            email,
            password,
            name,
        } = input;
        let hasher = self.hasher.clone();
        let user =
            run_blocking(move || User::create(email, &password, name, now, hasher.as_ref())).await??;

        let created = with_transaction!(self.uow, |tx| tx.users().create(&user).await)
            .map_err(|e| {
                tracing::error!("failed to persist user: {}", e);
                e
            })?;

        tracing::info!(user_id = %created.id(), "user signed up");
        Ok(SignupOutput::from(&created))
    }
}
