//! Authentication service - signup and login behind one seam for the HTTP layer.

use std::sync::Arc;

use async_trait::async_trait;

use super::login::{LoginInput, LoginOutput, LoginUseCase};
use super::signup::{SignupInput, SignupOutput, SignupUseCase};
use super::token_issuer::TokenIssuer;
use crate::infra::UnitOfWork;
use common::AppResult;
use domain::CredentialHasher;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn signup(&self, input: SignupInput) -> AppResult<SignupOutput>;

    /// Verify credentials and issue an access token
    async fn login(&self, input: LoginInput) -> AppResult<LoginOutput>;
}

/// Concrete implementation of AuthService over a UnitOfWork.
pub struct Authenticator<U> {
    signup: SignupUseCase<U>,
    login: LoginUseCase<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance
    pub fn new(
        uow: Arc<U>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            signup: SignupUseCase::new(uow.clone(), hasher.clone()),
            login: LoginUseCase::new(uow, hasher, tokens),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork + 'static> AuthService for Authenticator<U> {
    async fn signup(&self, input: SignupInput) -> AppResult<SignupOutput> {
        self.signup.execute(input).await
    }

    async fn login(&self, input: LoginInput) -> AppResult<LoginOutput> {
        self.login.execute(input).await
    }
}
