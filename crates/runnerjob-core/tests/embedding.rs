//! A cron-scheduled job built on top of `JobRecord`, persisted in a real
//! directory and polled the way an external scheduler would.

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use cron::Schedule;
use runnerjob_core::{
    is_valid_id, list_jobs, load_job, FileJobStore, Job, JobRecord, StoredJob,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CronJob {
    #[serde(flatten)]
    record: JobRecord,
    schedule: String,
    #[serde(rename = "lastRun", default)]
    last_run: Option<DateTime<Utc>>,
}

impl CronJob {
    fn new(schedule: &str) -> Self {
        Self {
            record: JobRecord::new()
                .with_active(true)
                .with_create_date("2024-01-01T00:00:00+00:00"),
            schedule: schedule.to_string(),
            last_run: None,
        }
    }
}

impl Job for CronJob {
    fn record(&self) -> &JobRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut JobRecord {
        &mut self.record
    }

    fn is_run(&self, now: DateTime<Utc>) -> bool {
        if !self.record.active {
            return false;
        }
        let Ok(schedule) = Schedule::from_str(&self.schedule) else {
            return false;
        };
        let after = self
            .last_run
            .unwrap_or_else(|| Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        schedule.after(&after).next().is_some_and(|next| next <= now)
    }

    fn run(&mut self) -> Value {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        self.last_run = Some(now);
        json!({ "ran_at": now.to_rfc3339() })
    }
}

fn nine_am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

#[test]
fn cron_job_overrides_time_policy() {
    // Every day at 09:00:00.
    let mut job = CronJob::new("0 0 9 * * *");

    assert!(!job.is_run(Utc.with_ymd_and_hms(2024, 1, 1, 8, 59, 59).unwrap()));
    assert!(job.is_run(nine_am()));

    job.run();
    assert!(!job.is_run(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()));
    assert!(job.is_run(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()));

    job.record.active = false;
    assert!(!job.is_run(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()));
}

#[test]
fn invalid_schedule_never_runs() {
    let job = CronJob::new("not a cron expression");
    assert!(!job.is_run(nine_am()));
}

#[test]
fn cron_job_keeps_base_authorization() {
    let mut job = CronJob::new("0 0 9 * * *");
    assert!(!job.is_available());

    job.set_owner("alice");
    job.set_owner("alice");
    assert!(job.is_available());
    assert_eq!(job.owner(), "alice");
    assert_eq!(job.record.admin.members, vec!["alice".to_string()]);
    assert!(job.has_admin_authorization("alice"));
    assert!(job.has_authorization("alice"));
    assert!(!job.has_authorization("bob"));
}

#[test]
fn persisted_cron_job_survives_reload_and_poll() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileJobStore::new();
    let path = temp_dir.path();

    let mut job = CronJob::new("0 0 9 * * *");
    job.set_owner("alice");
    job.create_id().unwrap();
    assert!(is_valid_id(job.id()));
    job.save(&store, path).unwrap();

    let raw = std::fs::read_to_string(path.join(format!("{}.json", job.id()))).unwrap();
    let raw: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(raw["admin"]["owner"], "alice");
    assert_eq!(raw["createDate"], "2024-01-01T00:00:00+00:00");
    assert_eq!(raw["schedule"], "0 0 9 * * *");

    let mut loaded: CronJob = load_job(&store, path, job.id()).unwrap();
    assert_eq!(loaded, job);

    if loaded.is_run(nine_am()) {
        loaded.run();
    }
    loaded.save(&store, path).unwrap();

    let jobs: Vec<CronJob> = list_jobs(&store, path).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].last_run, Some(nine_am()));

    loaded.remove(&store, path).unwrap();
    assert!(loaded.remove(&store, path).unwrap_err().is_not_found());
    assert!(list_jobs::<CronJob>(&store, path).unwrap().is_empty());
}
