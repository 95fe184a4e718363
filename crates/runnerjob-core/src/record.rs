//! The base job record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::admin::JobAdmin;
use crate::job::Job;

/// Base fields shared by every job.
///
/// Serialized as `{"active", "id", "admin": {"owner", "members"}, "createDate"}`.
/// Embedders flatten it into their own struct so these fields stay at the top
/// level next to the embedder's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobRecord {
    /// Whether the scheduler should currently consider this job runnable.
    pub active: bool,

    /// Content-derived identifier, empty until assigned.
    pub id: String,

    /// Authorization metadata.
    pub admin: JobAdmin,

    /// Caller-supplied creation timestamp; not validated.
    pub create_date: String,
}

impl JobRecord {
    /// Create an inactive record with no owner and no ID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the creation date.
    pub fn with_create_date(mut self, create_date: impl Into<String>) -> Self {
        self.create_date = create_date.into();
        self
    }

    /// Add members, skipping duplicates.
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for member in members {
            self.admin.add_member(member.as_ref());
        }
        self
    }

    /// Record `now` as the creation date (RFC 3339).
    pub fn stamp_create_date(&mut self, now: DateTime<Utc>) {
        self.create_date = now.to_rfc3339();
    }
}

impl Job for JobRecord {
    fn record(&self) -> &JobRecord {
        self
    }

    fn record_mut(&mut self) -> &mut JobRecord {
        self
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
