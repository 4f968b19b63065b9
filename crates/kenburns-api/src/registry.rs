//! Concurrency-safe job registry.
//!
//! A single mutex over the whole table; operations are point lookups and
//! updates only, so contention stays low at this scale. The registry is the
//! sole writer of a job's mutable fields: the orchestrator and the render
//! task submit changes through the typed methods here instead of holding a
//! mutable reference across contexts.
//!
//! Updates against an unknown id are silent no-ops. A stale progress
//! callback can fire after a job was cleaned up; that race is benign and
//! must never crash the render task.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use kenburns_models::{Job, JobId, JobStatus};

/// In-memory table of in-flight and finished jobs.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Mutex<HashMap<JobId, Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a newly created job.
    pub fn insert(&self, job: Job) {
        self.jobs.lock().insert(job.id.clone(), job);
    }

    /// Snapshot of a job record.
    pub fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.lock().get(id).cloned()
    }

    /// Record render progress.
    ///
    /// Progress only ever rises and stops moving once the job is terminal,
    /// so a late callback can never walk a finished job backwards.
    pub fn set_progress(&self, id: &JobId, progress: f64) {
        let mut jobs = self.jobs.lock();
        if let Some(job) = jobs.get_mut(id) {
            if job.status == JobStatus::Processing && progress > job.progress {
                job.progress = progress.min(1.0);
            }
        }
    }

    /// Transition `processing -> done`. No-op once terminal or unknown.
    pub fn complete(&self, id: &JobId) {
        let mut jobs = self.jobs.lock();
        if let Some(job) = jobs.get_mut(id) {
            if job.status == JobStatus::Processing {
                job.status = JobStatus::Done;
                job.progress = 1.0;
            }
        }
    }

    /// Transition `processing -> error`. No-op once terminal or unknown.
    pub fn fail(&self, id: &JobId, message: impl Into<String>) {
        let mut jobs = self.jobs.lock();
        if let Some(job) = jobs.get_mut(id) {
            if job.status == JobStatus::Processing {
                job.status = JobStatus::Error;
                job.error = Some(message.into());
            }
        }
    }

    /// Remove a job, returning the record so the caller can clean up its
    /// workspace with data that is no longer reachable through the table.
    pub fn remove(&self, id: &JobId) -> Option<Job> {
        let removed = self.jobs.lock().remove(id);
        if removed.is_some() {
            debug!(job_id = %id, "job removed from registry");
        }
        removed
    }

    /// Number of tracked jobs.
    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job(id: &JobId) -> Job {
        Job::new(
            id.clone(),
            "/tmp/w".into(),
            "/tmp/w/in.png".into(),
            "/tmp/w/motion.mp4".into(),
            "motion_zoom_in_center.mp4",
        )
    }

    #[test]
    fn update_on_unknown_id_is_a_silent_noop() {
        let registry = JobRegistry::new();
        let ghost = JobId::new();
        registry.set_progress(&ghost, 0.5);
        registry.complete(&ghost);
        registry.fail(&ghost, "boom");
        assert!(registry.is_empty());
    }

    #[test]
    fn update_after_remove_does_not_recreate() {
        let registry = JobRegistry::new();
        let id = JobId::new();
        registry.insert(sample_job(&id));
        let removed = registry.remove(&id);
        assert!(removed.is_some());

        registry.set_progress(&id, 0.9);
        assert!(registry.get(&id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn progress_is_monotonic() {
        let registry = JobRegistry::new();
        let id = JobId::new();
        registry.insert(sample_job(&id));

        registry.set_progress(&id, 0.6);
        registry.set_progress(&id, 0.3);
        assert_eq!(registry.get(&id).unwrap().progress, 0.6);

        registry.set_progress(&id, 2.0);
        assert_eq!(registry.get(&id).unwrap().progress, 1.0);
    }

    #[test]
    fn terminal_states_are_never_left() {
        let registry = JobRegistry::new();
        let id = JobId::new();
        registry.insert(sample_job(&id));

        registry.complete(&id);
        registry.fail(&id, "too late");
        let job = registry.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Done);
        assert!(job.error.is_none());

        registry.set_progress(&id, 0.1);
        assert_eq!(registry.get(&id).unwrap().progress, 1.0);
    }

    #[test]
    fn fail_records_the_diagnostic() {
        let registry = JobRegistry::new();
        let id = JobId::new();
        registry.insert(sample_job(&id));

        registry.fail(&id, "ffmpeg exited with a non-zero status");
        let job = registry.get(&id).unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert_eq!(
            job.error.as_deref(),
            Some("ffmpeg exited with a non-zero status")
        );

        // error is terminal too
        registry.complete(&id);
        assert_eq!(registry.get(&id).unwrap().status, JobStatus::Error);
    }

    #[test]
    fn remove_returns_the_record_once() {
        let registry = JobRegistry::new();
        let id = JobId::new();
        registry.insert(sample_job(&id));

        assert!(registry.remove(&id).is_some());
        assert!(registry.remove(&id).is_none());
    }
}
