//! Login workflow: verify credentials and issue an access token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::run_blocking;
use super::token_issuer::TokenIssuer;
use crate::infra::UnitOfWork;
use common::{AppError, AppResult};
use domain::CredentialHasher;

/// Login request fields
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Issued token plus the identity it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
}

pub struct LoginUseCase<U> {
    uow: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<U: UnitOfWork> LoginUseCase<U> {
    pub fn new(uow: Arc<U>, hasher: Arc<dyn CredentialHasher>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self {
            uow,
            hasher,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AppResult<LoginOutput> {
        self.execute_at(input, Utc::now()).await
    }

    /// Run the workflow with an explicit issue time.
    ///
    /// Unknown email, a non-active account and a wrong password all fail
    /// with the same `InvalidCredential` error.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all, fields(email = %input.email))]
    pub async fn execute_at(&self, input: LoginInput, now: DateTime<Utc>) -> AppResult<LoginOutput> {
        let user = match self.uow.users().find_by_email(&input.email).await {
            Ok(user) => user,
            Err(AppError::NotFound) => {
                tracing::debug!("login rejected: unknown email");
                return Err(AppError::InvalidCredential);
            }
            Err(e) => {
                tracing::error!("failed to find user by email: {}", e);
                return Err(e);
            }
        };

        if !user.status().is_active() {
            tracing::debug!(user_id = %user.id(), status = %user.status(), "login rejected: user is not active");
            return Err(AppError::InvalidCredential);
        }

        let hasher = self.hasher.clone();
        let password = input.password;
        let (user, compared) = run_blocking(move || {
            let compared = user.compare_password(&password, hasher.as_ref());
            (user, compared)
        })
        .await?;

        let matched = compared.map_err(|e| {
            tracing::error!("failed to compare password: {}", e);
            AppError::from(e)
        })?;

        if !matched {
            tracing::debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(AppError::InvalidCredential);
        }

        let token = self.tokens.issue(user.id(), now).map_err(|e| {
            tracing::error!("failed to generate token: {}", e);
            e
        })?;

        tracing::info!(user_id = %user.id(), "user logged in");

        Ok(LoginOutput {
            expires_at: token.expires_at(),
            token: token.into_value(),
            user_id: user.id(),
            user_name: user.name().to_string(),
            user_email: user.email().to_string(),
        })
    }
}
