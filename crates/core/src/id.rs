//! Strongly-typed identifiers used across the workspace.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Store-assigned row identifier of an event record.
///
/// The hosted store hands these out on insert; the client never mints one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<EventId> for i64 {
    fn from(value: EventId) -> Self {
        value.0
    }
}

impl FromStr for EventId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<i64>()
            .map_err(|e| AppError::decode(format!("EventId: {e}")))?;
        Ok(Self(id))
    }
}

/// Identity of an authenticated user, as issued by the auth service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Mint a fresh identity. Real ids come from the auth service; this is
    /// mainly for tests and local providers.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<UserId> for Uuid {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl FromStr for UserId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| AppError::decode(format!("UserId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Owner key for event rows: the profile username, not the auth id.
///
/// Always trimmed and non-empty; a row without a usable owner cannot be
/// scoped and is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl Into<String>) -> Result<Self, AppError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(AppError::invalid_field("username", "username must not be empty"));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_round_trips_through_display_and_parse() {
        let id = EventId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<EventId>().unwrap(), id);
    }

    #[test]
    fn event_id_rejects_non_numeric_input() {
        let err = "not-a-number".parse::<EventId>().unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn username_trims_surrounding_whitespace() {
        let username = Username::new("  alice  ").unwrap();
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn username_rejects_empty_input() {
        assert!(Username::new("").is_err());
        assert!(Username::new("   ").is_err());
    }

    #[test]
    fn user_id_parses_canonical_uuid_strings() {
        let id = UserId::new();
        let parsed = id.to_string().parse::<UserId>().unwrap();
        assert_eq!(parsed, id);
    }
}
