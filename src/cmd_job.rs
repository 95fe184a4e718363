//! Job subcommand handlers for runnerjob.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use runnerjob_core::{
    list_jobs, load_job, FileJobStore, Job, JobConfig, JobError, JobRecord, StoredJob,
};

use crate::cli::Commands;

/// Handle job subcommands against the job directory `dir`.
pub(crate) fn handle_job_command(
    command: Commands,
    config: &JobConfig,
    dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileJobStore::new();

    match command {
        Commands::New { owner, members, inactive, create_date } => {
            let job = create_job(
                &store,
                config,
                dir,
                owner.as_deref(),
                &members,
                !inactive,
                create_date,
            )?;
            println!("{}", job.id());
        }
        Commands::List { format } => {
            let jobs: Vec<JobRecord> = list_jobs(&store, dir)?;
            print_jobs(&jobs, &format)?;
        }
        Commands::Show { id } => {
            let job: serde_json::Value = load_job(&store, dir, &id)?;
            println!("{}", serde_json::to_string_pretty(&job)?);
        }
        Commands::Remove { id, member } => {
            remove_job(&store, dir, &id, member.as_deref())?;
            println!("Removed {}", id);
        }
        Commands::Check { id, member } => {
            let job: JobRecord = load_job(&store, dir, &id)?;
            let level = if job.has_admin_authorization(&member) {
                "admin"
            } else if job.has_authorization(&member) {
                "member"
            } else {
                "none"
            };
            println!("{}", level);
        }
        Commands::Due => {
            for job in due_jobs(&store, dir)? {
                println!("{}", job.id());
            }
        }
    }

    Ok(())
}

/// Build a job record, derive its ID and save it.
pub(crate) fn create_job(
    store: &FileJobStore,
    config: &JobConfig,
    dir: &Path,
    owner: Option<&str>,
    members: &[String],
    active: bool,
    create_date: Option<String>,
) -> Result<JobRecord, JobError> {
    let mut job = JobRecord::new().with_active(active).with_members(members);
    match create_date {
        Some(date) => job.create_date = date,
        None => job.stamp_create_date(Utc::now()),
    }
    job.set_owner(owner.unwrap_or(config.default_owner.as_str()));
    job.create_id_with(config.id_strategy)?;
    job.save(store, dir)?;

    info!("Created job '{}' owned by '{}'", job.id(), job.owner());
    Ok(job)
}

/// Remove a job, checking ownership when a requesting member is given.
pub(crate) fn remove_job(
    store: &FileJobStore,
    dir: &Path,
    id: &str,
    member: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let job: JobRecord = load_job(store, dir, id)?;

    if let Some(member) = member {
        if !job.has_admin_authorization(member) {
            warn!("'{}' tried to remove job '{}' owned by '{}'", member, id, job.owner());
            return Err(format!("'{}' is not the owner of job {}", member, id).into());
        }
    }

    job.remove(store, dir)?;
    info!("Removed job '{}'", id);
    Ok(())
}

/// Jobs under `dir` whose `is_run` policy says they should run now.
pub(crate) fn due_jobs(store: &FileJobStore, dir: &Path) -> Result<Vec<JobRecord>, JobError> {
    let now = Utc::now();
    let jobs: Vec<JobRecord> = list_jobs(store, dir)?;
    Ok(jobs
        .into_iter()
        .filter(|job| job.is_run(now))
        .collect())
}

fn print_jobs(jobs: &[JobRecord], format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(jobs)?);
        }
        _ => {
            println!("{:<66} {:<8} {:<16} {}", "ID", "ACTIVE", "OWNER", "CREATED");
            println!("{}", "-".repeat(110));
            for job in jobs {
                let owner = if job.owner().is_empty() { "-" } else { job.owner() };
                println!(
                    "{:<66} {:<8} {:<16} {}",
                    job.id(),
                    job.active,
                    owner,
                    job.create_date
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use runnerjob_core::{is_valid_id, IdStrategy};
    use tempfile::TempDir;

    fn config() -> JobConfig {
        JobConfig::default()
    }

    #[test]
    fn test_create_job_defaults_owner() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new();

        let job = create_job(&store, &config(), temp_dir.path(), None, &[], true, None).unwrap();
        assert_eq!(job.owner(), "admin");
        assert!(is_valid_id(job.id()));
        assert!(!job.create_date.is_empty());
        assert!(temp_dir.path().join(format!("{}.json", job.id())).exists());
    }

    #[test]
    fn test_create_job_with_members() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new();
        let members = vec!["bob".to_string(), "alice".to_string()];

        let job = create_job(
            &store,
            &config(),
            temp_dir.path(),
            Some("alice"),
            &members,
            false,
            Some("2024-01-01".to_string()),
        )
        .unwrap();

        assert_eq!(job.admin.members, vec!["bob".to_string(), "alice".to_string()]);
        assert!(!job.active);

        let loaded: JobRecord = load_job(&store, temp_dir.path(), job.id()).unwrap();
        assert_eq!(loaded, job);
    }

    #[test]
    fn test_create_job_uses_configured_strategy() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new();
        let date = Some("2024-01-01".to_string());

        let exclusive = create_job(&store, &config(), temp_dir.path(), Some("a"), &[], true, date.clone())
            .unwrap();
        let inclusive_config = JobConfig {
            id_strategy: IdStrategy::SelfInclusive,
            ..config()
        };
        let inclusive =
            create_job(&store, &inclusive_config, temp_dir.path(), Some("a"), &[], true, date).unwrap();

        assert_ne!(exclusive.id(), inclusive.id());
    }

    #[test]
    fn test_remove_job_requires_owner() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new();
        let job = create_job(&store, &config(), temp_dir.path(), Some("alice"), &[], true, None)
            .unwrap();

        assert!(remove_job(&store, temp_dir.path(), job.id(), Some("bob")).is_err());
        assert!(temp_dir.path().join(format!("{}.json", job.id())).exists());

        remove_job(&store, temp_dir.path(), job.id(), Some("alice")).unwrap();
        assert!(!temp_dir.path().join(format!("{}.json", job.id())).exists());
    }

    #[test]
    fn test_due_jobs_filters_inactive() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new();
        let active = create_job(&store, &config(), temp_dir.path(), Some("a"), &[], true, None).unwrap();
        create_job(&store, &config(), temp_dir.path(), Some("b"), &[], false, None).unwrap();

        let due = due_jobs(&store, temp_dir.path()).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id(), active.id());
    }

    #[test]
    fn test_due_jobs_includes_ownerless_active_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJobStore::new();
        let mut job = JobRecord::new().with_active(true);
        job.create_id().unwrap();
        job.save(&store, temp_dir.path()).unwrap();
        assert!(!job.is_available());

        let due = due_jobs(&store, temp_dir.path()).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id(), job.id());
    }
}
