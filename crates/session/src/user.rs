//! The signed-in user.

use fiesta_core::{UserId, Username};
use serde::{Deserialize, Serialize};

/// An authenticated user as the application sees one.
///
/// The auth id scopes the session; the username is the owner key event
/// rows are stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: Username,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>, username: Username) -> Self {
        Self {
            id,
            email: email.into(),
            username,
        }
    }
}
