//! Fixed session provider for tests and development.

use std::sync::Mutex;

use async_trait::async_trait;
use fiesta_core::{AppError, AppResult};

use crate::provider::SessionProvider;
use crate::user::User;

/// A session provider with a fixed user; `sign_out` clears it.
#[derive(Debug, Default)]
pub struct StaticSessionProvider {
    user: Mutex<Option<User>>,
}

impl StaticSessionProvider {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_user(&self) -> AppResult<Option<User>> {
        let user = self
            .user
            .lock()
            .map_err(|_| AppError::remote("session lock poisoned"))?;
        Ok(user.clone())
    }

    async fn sign_out(&self) -> AppResult<()> {
        let mut user = self
            .user
            .lock()
            .map_err(|_| AppError::remote("session lock poisoned"))?;
        *user = None;
        Ok(())
    }
}
