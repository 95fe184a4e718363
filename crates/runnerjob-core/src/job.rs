//! Job capability traits.
//!
//! [`Job`] is what the scheduler sees: it polls [`Job::is_run`] and calls
//! [`Job::run`] when that returns true. Identity and authorization come for
//! free from the embedded [`JobRecord`]. [`StoredJob`] adds content
//! addressing and persistence to every serializable job.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::admin::DEFAULT_OWNER;
use crate::error::{JobError, StoreError};
use crate::identity::{content_id, IdStrategy};
use crate::record::JobRecord;
use crate::store::JobStore;

/// Result returned by the base [`Job::run`].
pub const PLACEHOLDER_RUN_RESULT: &str = "run";

/// Core trait for schedulable jobs.
pub trait Job {
    /// The embedded base record.
    fn record(&self) -> &JobRecord;

    /// The embedded base record, mutably.
    fn record_mut(&mut self) -> &mut JobRecord;

    /// Whether the job should run at `now`.
    ///
    /// The base policy ignores the time and returns the active flag.
    fn is_run(&self, _now: DateTime<Utc>) -> bool {
        self.record().active
    }

    /// Execute the job.
    fn run(&mut self) -> Value {
        Value::String(PLACEHOLDER_RUN_RESULT.to_string())
    }

    /// Owner used when `set_owner` is given an empty member.
    fn default_owner(&self) -> &str {
        DEFAULT_OWNER
    }

    /// The job ID, empty until assigned.
    fn id(&self) -> &str {
        &self.record().id
    }

    /// Set the owner and add it to the members.
    fn set_owner(&mut self, member: &str) {
        let default_owner = self.default_owner().to_string();
        self.record_mut().admin.set_owner(member, &default_owner);
    }

    /// The current owner.
    fn owner(&self) -> &str {
        &self.record().admin.owner
    }

    /// Whether `member` owns this job.
    fn has_admin_authorization(&self, member: &str) -> bool {
        self.record().admin.has_admin_authorization(member)
    }

    /// Whether `member` owns or is a member of this job.
    fn has_authorization(&self, member: &str) -> bool {
        self.record().admin.has_authorization(member)
    }

    /// Whether an owner has been assigned.
    fn is_available(&self) -> bool {
        !self.owner().is_empty()
    }
}

/// Content addressing and persistence for serializable jobs.
///
/// Implemented for every `Job + Serialize`, embedders included, so the hash
/// and the stored file cover the embedder's own fields too.
pub trait StoredJob: Job + Serialize {
    /// Derive the ID from the job's content, excluding the ID itself.
    fn create_id(&mut self) -> Result<(), JobError> {
        self.create_id_with(IdStrategy::default())
    }

    /// Derive the ID with an explicit strategy. On error the ID is unchanged.
    fn create_id_with(&mut self, strategy: IdStrategy) -> Result<(), JobError> {
        let id = content_id(self, strategy)?;
        debug!("Assigned job ID '{}' ({:?})", id, strategy);
        self.record_mut().id = id;
        Ok(())
    }

    /// Write the job to `<id>.json` under `path`, replacing any previous file.
    fn save(&self, store: &dyn JobStore, path: &Path) -> Result<(), JobError> {
        let name = file_name(self.id())?;

        let value = serde_json::to_value(self)
            .map_err(|e| JobError::Serialization(format!("Failed to serialize job: {}", e)))?;

        match store.remove(path, &name) {
            Ok(()) | Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
        store.save_object(path, &name, &value)?;
        Ok(())
    }

    /// Delete `<id>.json` under `path`.
    fn remove(&self, store: &dyn JobStore, path: &Path) -> Result<(), JobError> {
        let name = file_name(self.id())?;
        store.remove(path, &name)?;
        Ok(())
    }
}

impl<T> StoredJob for T where T: Job + Serialize {}

/// Load the job stored as `<id>.json` under `path`.
pub fn load_job<T>(store: &dyn JobStore, path: &Path, id: &str) -> Result<T, JobError>
where
    T: DeserializeOwned,
{
    let name = file_name(id)?;
    let value = store.load_object(path, &name)?;
    serde_json::from_value(value)
        .map_err(|e| JobError::Serialization(format!("Failed to deserialize job '{}': {}", id, e)))
}

/// Load every job stored under `path`, ordered by ID.
///
/// Files that cannot be read or decoded as `T` are skipped.
pub fn list_jobs<T>(store: &dyn JobStore, path: &Path) -> Result<Vec<T>, JobError>
where
    T: Job + DeserializeOwned,
{
    let mut jobs = Vec::new();

    for name in store.list(path)? {
        let value = match store.load_object(path, &name) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read job file {:?}: {}", name, e);
                continue;
            }
        };
        match serde_json::from_value::<T>(value) {
            Ok(job) => jobs.push(job),
            Err(e) => warn!("Failed to deserialize job from {:?}: {}", name, e),
        }
    }

    jobs.sort_by(|a, b| a.id().cmp(b.id()));
    Ok(jobs)
}

fn file_name(id: &str) -> Result<String, JobError> {
    if id.is_empty() {
        return Err(JobError::MissingId);
    }
    Ok(format!("{}.json", id))
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
