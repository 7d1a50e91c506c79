//! Session provider abstraction.

use async_trait::async_trait;
use fiesta_core::AppResult;

use crate::user::User;

/// The capability surface the views need from authentication: exactly
/// current-session lookup and sign-out.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The currently signed-in user. An absent session is `None`, not an
    /// error; errors mean the auth service could not be asked.
    async fn current_user(&self) -> AppResult<Option<User>>;

    /// End the current session.
    async fn sign_out(&self) -> AppResult<()>;
}
