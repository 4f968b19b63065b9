//! Render job records.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a render job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a render job.
///
/// `processing -> done` and `processing -> error` are the only transitions;
/// both target states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Render task is running
    #[default]
    Processing,
    /// Render completed, artifact available for download
    Done,
    /// Render failed, diagnostic recorded on the job
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One asynchronous render request and its associated state.
///
/// The workspace paths are exclusively owned by this job; no other job's
/// task ever touches them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,
    /// Current lifecycle state
    pub status: JobStatus,
    /// Render progress in [0, 1], non-decreasing while processing
    pub progress: f64,
    /// Diagnostic text, present only in the error state
    pub error: Option<String>,
    /// Private scratch directory for this job
    pub work_dir: PathBuf,
    /// Uploaded source image inside the workspace
    pub input_path: PathBuf,
    /// Rendered artifact inside the workspace
    pub output_path: PathBuf,
    /// Attachment filename offered on download
    pub filename: String,
    /// Creation timestamp (for future eviction policies)
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job in the `processing` state.
    pub fn new(
        id: JobId,
        work_dir: PathBuf,
        input_path: PathBuf,
        output_path: PathBuf,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            id,
            status: JobStatus::Processing,
            progress: 0.0,
            error: None,
            work_dir,
            input_path,
            output_path,
            filename: filename.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_is_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(serde_json::to_string(&JobStatus::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn terminal_states() {
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Error.is_terminal());
    }

    #[test]
    fn new_job_starts_processing() {
        let job = Job::new(
            JobId::new(),
            "/tmp/w".into(),
            "/tmp/w/in.png".into(),
            "/tmp/w/motion.mp4".into(),
            "motion_zoom_in_center.mp4",
        );
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.progress, 0.0);
        assert!(job.error.is_none());
    }
}
