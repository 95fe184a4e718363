//! # runnerjob core
//!
//! The base unit of work for the runnerjob scheduler.
//!
//! ## Features
//!
//! - `JobRecord`: active flag, content-derived ID, owner/members, creation date
//! - `Job` trait: the capability the scheduler polls (`is_run` / `run`)
//! - SHA-256 content addressing over a canonical JSON encoding
//! - Persistence through a pluggable `JobStore` (files or memory)
//!
//! Embedders compose a `JobRecord` by value and override `is_run` / `run`:
//!
//! ```rust
//! use chrono::Utc;
//! use runnerjob_core::{Job, JobRecord, StoredJob};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Backup {
//!     #[serde(flatten)]
//!     record: JobRecord,
//!     target: String,
//! }
//!
//! impl Job for Backup {
//!     fn record(&self) -> &JobRecord {
//!         &self.record
//!     }
//!
//!     fn record_mut(&mut self) -> &mut JobRecord {
//!         &mut self.record
//!     }
//!
//!     fn run(&mut self) -> serde_json::Value {
//!         serde_json::json!({ "backed_up": self.target })
//!     }
//! }
//!
//! let mut job = Backup {
//!     record: JobRecord::new().with_active(true),
//!     target: "/srv".to_string(),
//! };
//! job.set_owner("alice");
//! job.create_id().unwrap();
//! assert_eq!(job.id().len(), 64);
//! assert!(job.is_run(Utc::now()));
//! ```

pub mod admin;
pub mod config;
pub mod error;
pub mod identity;
pub mod job;
pub mod loader;
pub mod record;
pub mod store;

pub use admin::{JobAdmin, DEFAULT_OWNER};
pub use config::JobConfig;
pub use error::{ConfigError, JobError, StoreError};
pub use identity::{content_id, is_valid_id, IdStrategy};
pub use job::{list_jobs, load_job, Job, StoredJob, PLACEHOLDER_RUN_RESULT};
pub use loader::ConfigLoader;
pub use record::JobRecord;
pub use store::{FileJobStore, JobStore, MemoryJobStore};
