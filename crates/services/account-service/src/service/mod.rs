//! Service layer - signup and login workflows.

mod auth_service;
pub mod login;
pub mod signup;
pub mod token_issuer;

pub use auth_service::{AuthService, Authenticator};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use signup::{SignupInput, SignupOutput, SignupUseCase};
pub use token_issuer::{Claims, JwtIssuer, TokenIssuer};

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use token_issuer::MockTokenIssuer;

/// Run password hashing on the blocking pool, inside the caller's span.
async fn run_blocking<F, T>(f: F) -> AppResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(f))
        .await
        .map_err(|e| AppError::internal(format!("blocking task failed: {e}")))
}
