//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};
use crate::progress::{parse_out_time_us, LogRing};

/// Builder for FFmpeg invocations.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Output file path
    output: PathBuf,
    /// Arguments placed before -i
    input_args: Vec<String>,
    /// Arguments placed after -i
    output_args: Vec<String>,
    /// Whether to overwrite the output file
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add an input argument (before -i).
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add multiple input arguments.
    pub fn input_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an output argument (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Add multiple output arguments.
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the video filter chain.
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    /// Loop a single still image as the input stream.
    pub fn loop_still_image(self, framerate: u32) -> Self {
        self.input_args(["-framerate".to_string(), framerate.to_string()])
            .input_args(["-loop".to_string(), "1".to_string()])
    }

    /// Cap the number of output frames.
    pub fn frame_count(self, frames: u32) -> Self {
        self.output_args(["-frames:v".to_string(), frames.to_string()])
    }

    /// Set the output frame rate with constant-rate sync.
    pub fn output_fps(self, fps: u32) -> Self {
        self.output_args(["-vsync".to_string(), "cfr".to_string()])
            .output_args(["-r".to_string(), fps.to_string()])
    }

    /// Move the moov atom up front so playback can start while downloading.
    pub fn faststart(self) -> Self {
        self.output_args(["-movflags", "+faststart"])
    }

    /// Build the full argument list.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-loglevel".to_string());
        args.push(self.log_level.clone());
        args.push("-nostats".to_string());

        // Progress stream shares stderr with the engine's log output so the
        // runner consumes diagnostics and progress from one pipe.
        args.push("-progress".to_string());
        args.push("pipe:2".to_string());

        args.extend(self.input_args.clone());

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runner for FFmpeg commands with progress streaming.
#[derive(Debug, Default)]
pub struct FfmpegRunner;

impl FfmpegRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run an FFmpeg command, reporting progress fractions in [0, 1].
    ///
    /// The callback fires from the runner's own task on every recognized
    /// elapsed-output-time field and must not block. A non-zero exit fails
    /// with the tail of the captured diagnostics; the engine being missing
    /// from PATH surfaces the same way as any other launch failure.
    pub async fn run_with_progress<F>(
        &self,
        cmd: &FfmpegCommand,
        duration_secs: f64,
        on_progress: F,
    ) -> MediaResult<()>
    where
        F: Fn(f64) + Send + 'static,
    {
        let args = cmd.build_args();
        debug!("running ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MediaError::render_failed(format!("failed to launch ffmpeg: {e}"), None))?;

        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| MediaError::render_failed("ffmpeg stderr was not captured", None))?;
        let mut reader = BufReader::new(stderr).lines();

        let mut ring = LogRing::new();
        while let Ok(Some(line)) = reader.next_line().await {
            ring.push(&line);
            if let Some(out_time_us) = parse_out_time_us(&line) {
                on_progress(crate::progress::progress_fraction(
                    out_time_us,
                    duration_secs,
                ));
            }
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            let tail = ring.tail();
            let message = if tail.is_empty() {
                "ffmpeg exited with a non-zero status".to_string()
            } else {
                tail
            };
            Err(MediaError::render_failed(message, status.code()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_args_ordering() {
        let cmd = FfmpegCommand::new("/in.png", "/out.mp4")
            .loop_still_image(90)
            .video_filter("scale=1920:1080")
            .output_fps(60)
            .frame_count(300)
            .faststart();

        let args = cmd.build_args();
        assert_eq!(
            args,
            vec![
                "-y",
                "-loglevel",
                "error",
                "-nostats",
                "-progress",
                "pipe:2",
                "-framerate",
                "90",
                "-loop",
                "1",
                "-i",
                "/in.png",
                "-vf",
                "scale=1920:1080",
                "-vsync",
                "cfr",
                "-r",
                "60",
                "-frames:v",
                "300",
                "-movflags",
                "+faststart",
                "/out.mp4",
            ]
        );
    }

    #[test]
    fn input_args_precede_the_input_file() {
        let cmd = FfmpegCommand::new("a", "b").input_arg("-x").output_arg("-z");
        let args = cmd.build_args();
        let i_pos = args.iter().position(|a| a == "-i").unwrap();
        let x_pos = args.iter().position(|a| a == "-x").unwrap();
        let z_pos = args.iter().position(|a| a == "-z").unwrap();
        assert!(x_pos < i_pos);
        assert!(z_pos > i_pos);
    }
}
