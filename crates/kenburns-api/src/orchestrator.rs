//! Job orchestration.
//!
//! Owns the submit/status/retrieve lifecycle: validates and clamps request
//! inputs, allocates the per-job scratch workspace, spawns the render task,
//! and arranges cleanup after a successful download.
//!
//! The render task converts its result into a terminal registry state at the
//! task boundary; render errors never propagate across the spawn.

use std::path::Path;
use std::sync::Arc;

use tokio::fs::File;
use tracing::{info, warn};

use kenburns_effects::EffectCatalog;
use kenburns_media::{clamp_duration, clamp_stage, render_motion, MotionParameters};
use kenburns_models::{EffectPreset, Job, JobId, JobStatus};

use crate::error::{ApiError, ApiResult};
use crate::registry::JobRegistry;

/// Name of the rendered artifact inside a job workspace.
const OUTPUT_FILENAME: &str = "motion.mp4";

/// Prefix for per-job scratch directories.
const WORKSPACE_PREFIX: &str = "kenburns_";

/// Accepts render requests and manages their lifecycle.
pub struct JobOrchestrator {
    registry: Arc<JobRegistry>,
    catalog: Arc<EffectCatalog>,
}

impl JobOrchestrator {
    pub fn new(registry: Arc<JobRegistry>, catalog: Arc<EffectCatalog>) -> Self {
        Self { registry, catalog }
    }

    /// Validate a request, persist the upload, create the job record, and
    /// start the render without blocking the caller.
    ///
    /// Inputs are clamped rather than rejected: non-positive duration falls
    /// back to 5s, an unknown effect resolves to the default preset, and an
    /// unsupported stage becomes 1. The only client error is an empty
    /// payload, rejected before any job or workspace exists.
    pub async fn submit(
        &self,
        payload: &[u8],
        filename: Option<&str>,
        duration: f64,
        effect: Option<&str>,
        stage: i64,
    ) -> ApiResult<JobId> {
        if payload.is_empty() {
            return Err(ApiError::bad_request("empty file upload"));
        }

        let duration = clamp_duration(duration);
        let stage = clamp_stage(stage);
        let preset = self
            .catalog
            .resolve(effect.unwrap_or(kenburns_models::DEFAULT_EFFECT_ID))
            .clone();

        let work_dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|e| ApiError::internal(format!("failed to create workspace: {e}")))?
            .into_path();

        let input_path = work_dir.join(sanitize_filename(filename));
        let output_path = work_dir.join(OUTPUT_FILENAME);

        if let Err(e) = tokio::fs::write(&input_path, payload).await {
            cleanup_workspace(&work_dir).await;
            return Err(ApiError::internal(format!("failed to persist upload: {e}")));
        }

        let job_id = JobId::new();
        let job = Job::new(
            job_id.clone(),
            work_dir,
            input_path.clone(),
            output_path.clone(),
            format!("motion_{}.mp4", preset.id),
        );
        self.registry.insert(job);

        info!(
            job_id = %job_id,
            effect = %preset.id,
            stage,
            duration_secs = duration,
            "render job submitted"
        );

        let registry = Arc::clone(&self.registry);
        let task_id = job_id.clone();
        tokio::spawn(async move {
            run_render(registry, task_id, preset, stage, duration, input_path, output_path).await;
        });

        Ok(job_id)
    }

    /// Snapshot of a job's state for status polling.
    pub fn status(&self, id: &JobId) -> Option<Job> {
        self.registry.get(id)
    }

    /// Open a finished artifact for delivery.
    ///
    /// The file is opened before the job is removed and its workspace
    /// deletion is spawned; the held handle keeps the bytes readable until
    /// the response body finishes streaming, so delivery and cleanup cannot
    /// race. A job in the `error` state reports 409, same as one still
    /// processing; the failure text is available from the status endpoint.
    pub async fn open_artifact(&self, id: &JobId) -> ApiResult<(File, Job)> {
        let job = self
            .registry
            .get(id)
            .ok_or_else(|| ApiError::not_found("job not found"))?;

        match job.status {
            JobStatus::Processing => {
                return Err(ApiError::conflict("render not finished yet"));
            }
            JobStatus::Error => {
                return Err(ApiError::conflict(
                    "render failed; see the progress endpoint for details",
                ));
            }
            JobStatus::Done => {}
        }

        let file = File::open(&job.output_path)
            .await
            .map_err(|_| ApiError::gone("artifact no longer available"))?;

        if let Some(removed) = self.registry.remove(id) {
            tokio::spawn(async move {
                cleanup_workspace(&removed.work_dir).await;
            });
        }

        Ok((file, job))
    }
}

/// The asynchronous render task.
async fn run_render(
    registry: Arc<JobRegistry>,
    id: JobId,
    preset: EffectPreset,
    stage: u8,
    duration: f64,
    input_path: std::path::PathBuf,
    output_path: std::path::PathBuf,
) {
    let params = MotionParameters::synthesize(&preset, stage, duration);

    let progress_registry = Arc::clone(&registry);
    let progress_id = id.clone();
    let result = render_motion(&input_path, &output_path, &params, move |fraction| {
        progress_registry.set_progress(&progress_id, fraction);
    })
    .await;

    match result {
        Ok(()) => {
            registry.complete(&id);
            info!(job_id = %id, "render job done");
        }
        Err(e) => {
            warn!(job_id = %id, error = %e, "render job failed");
            registry.fail(&id, e.to_string());
        }
    }
}

/// Strip any path components from an uploaded filename.
fn sanitize_filename(filename: Option<&str>) -> String {
    filename
        .and_then(|name| Path::new(name).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "input".to_string())
}

async fn cleanup_workspace(dir: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(dir).await {
        warn!(dir = %dir.display(), error = %e, "failed to remove job workspace");
    }
}
