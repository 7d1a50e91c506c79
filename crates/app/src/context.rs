//! Explicit capability context handed to every view.

use std::sync::Arc;

use fiesta_core::{AppError, AppResult};
use fiesta_session::{SessionProvider, User};
use fiesta_store::EventStore;

/// The two remote capabilities views are allowed to touch.
///
/// Passed into each view operation instead of living in ambient state; a
/// view can reach exactly `{store, session}` and nothing else.
pub struct AppContext<S, P> {
    pub store: Arc<S>,
    pub session: Arc<P>,
}

impl<S, P> AppContext<S, P>
where
    S: EventStore,
    P: SessionProvider,
{
    pub fn new(store: Arc<S>, session: Arc<P>) -> Self {
        Self { store, session }
    }

    /// The signed-in user, or `Unauthenticated` when there is none.
    pub async fn require_user(&self) -> AppResult<User> {
        self.session
            .current_user()
            .await?
            .ok_or(AppError::Unauthenticated)
    }

    /// End the current session. The shell routes back to sign-in after
    /// this; every subsequent view operation sees `Unauthenticated`.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.session.sign_out().await
    }
}

impl<S, P> Clone for AppContext<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            session: Arc::clone(&self.session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiesta_core::{UserId, Username};
    use fiesta_session::StaticSessionProvider;
    use fiesta_store::InMemoryEventStore;

    #[tokio::test]
    async fn require_user_maps_absent_session_to_unauthenticated() {
        let ctx = AppContext::new(
            Arc::new(InMemoryEventStore::new()),
            Arc::new(StaticSessionProvider::signed_out()),
        );
        assert_eq!(ctx.require_user().await, Err(AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn sign_out_leaves_the_context_unauthenticated() {
        let user = User::new(
            UserId::new(),
            "alice@example.com",
            Username::new("alice").unwrap(),
        );
        let ctx = AppContext::new(
            Arc::new(InMemoryEventStore::new()),
            Arc::new(StaticSessionProvider::signed_in(user)),
        );

        ctx.sign_out().await.unwrap();
        assert_eq!(ctx.require_user().await, Err(AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn require_user_returns_the_signed_in_user() {
        let user = User::new(
            UserId::new(),
            "alice@example.com",
            Username::new("alice").unwrap(),
        );
        let ctx = AppContext::new(
            Arc::new(InMemoryEventStore::new()),
            Arc::new(StaticSessionProvider::signed_in(user.clone())),
        );
        assert_eq!(ctx.require_user().await, Ok(user));
    }
}
