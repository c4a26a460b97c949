//! Session identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;

use crate::errors::domain::DomainError;

const GENERATED_PREFIX: &str = "game";
const RANDOM_SUFFIX_LEN: usize = 9;

/// Opaque, non-empty key of a persisted session.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::validation("session id must not be empty"));
        }
        Ok(Self(id))
    }

    /// Id carried by the caller's request context, if any.
    pub fn from_context(id: Option<&str>) -> Result<Self, DomainError> {
        match id {
            Some(id) => Self::new(id),
            None => Err(DomainError::validation("session id is required")),
        }
    }

    /// Fresh id of the form `game_<unix-millis>_<9 random chars>`.
    pub fn generate() -> Self {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let ulid = Ulid::new().to_string().to_ascii_lowercase();
        let suffix = &ulid[ulid.len() - RANDOM_SUFFIX_LEN..];
        Self(format!("{GENERATED_PREFIX}_{millis}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
