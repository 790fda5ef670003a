//! Receptions: bounded product-intake sessions at a pickup point.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a reception.
///
/// A reception starts `InProgress` and moves to `Close` exactly once. Closed
/// receptions are history and are never reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionStatus {
    /// Accepting products.
    InProgress,
    /// Finished; immutable.
    Close,
}

impl ReceptionStatus {
    /// Wire (and storage) representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Close => "close",
        }
    }

    /// Whether products may still be added or removed.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl fmt::Display for ReceptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reception status: {0}")]
pub struct UnknownReceptionStatus(pub String);

impl FromStr for ReceptionStatus {
    type Err = UnknownReceptionStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "in_progress" => Ok(Self::InProgress),
            "close" => Ok(Self::Close),
            other => Err(UnknownReceptionStatus(other.to_owned())),
        }
    }
}

/// A reception row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    /// Stable identifier.
    pub id: Uuid,
    /// Instant the reception was opened.
    pub date_time: DateTime<Utc>,
    /// Owning pickup point.
    pub pvz_id: Uuid,
    /// Current lifecycle state.
    pub status: ReceptionStatus,
}

impl Reception {
    /// Build a freshly opened reception.
    #[must_use]
    pub fn open(pvz_id: Uuid, date_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date_time,
            pvz_id,
            status: ReceptionStatus::InProgress,
        }
    }
}
