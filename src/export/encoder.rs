//! Frame sinks: where rendered frames go.
//!
//! - [`FfmpegEncoder`] streams raw RGB frames into an `ffmpeg` child process
//!   which writes the video container.
//! - [`PngSequence`] writes one numbered PNG per frame into a directory.
//!
//! Both create missing parent directories when opened.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use image::RgbImage;

use crate::configuration::config::EncoderConfig;
use crate::error::{GwError, GwResult};

/// Consumer of rendered frames, fed in strictly increasing time order
pub trait FrameSink {
    /// Append one frame
    fn write_frame(&mut self, frame: &RgbImage) -> GwResult<()>;

    /// Flush everything and return the path of the written artifact
    fn finish(self) -> GwResult<PathBuf>
    where
        Self: Sized;
}

fn ensure_parent(path: &Path) -> GwResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| GwError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Stream settings for one encoding run
#[derive(Debug, Clone)]
pub struct EncoderSettings {
    pub binary: String,
    pub codec: String,
    pub fps: u32,
    pub bitrate_kbps: u32,
    pub artist: String,
    pub width: u32,
    pub height: u32,
}

impl EncoderSettings {
    pub fn from_config(cfg: &EncoderConfig, fps: u32, width: u32, height: u32) -> Self {
        Self {
            binary: cfg.binary.clone(),
            codec: cfg.codec.clone(),
            fps,
            bitrate_kbps: cfg.bitrate,
            artist: cfg.artist.clone(),
            width,
            height,
        }
    }

    /// Command line handed to the encoder, output path last
    pub fn args(&self, output: &Path) -> Vec<String> {
        vec![
            "-f".into(),
            "rawvideo".into(),
            "-vcodec".into(),
            "rawvideo".into(),
            "-s".into(),
            format!("{}x{}", self.width, self.height),
            "-pix_fmt".into(),
            "rgb24".into(),
            "-framerate".into(),
            self.fps.to_string(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            "pipe:".into(),
            "-vcodec".into(),
            self.codec.clone(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-b:v".into(),
            format!("{}k", self.bitrate_kbps),
            "-metadata".into(),
            format!("artist={}", self.artist),
            "-y".into(),
            output.display().to_string(),
        ]
    }
}

/// Video encoder running as a child process.
///
/// Dropping an unfinished encoder closes its input and waits for the
/// process, so an error in the frame loop never leaves it running.
pub struct FfmpegEncoder {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    settings: EncoderSettings,
    output: PathBuf,
    frames: usize,
}

impl FfmpegEncoder {
    pub fn open(output: impl Into<PathBuf>, settings: EncoderSettings) -> GwResult<Self> {
        let output = output.into();
        ensure_parent(&output)?;

        let mut child = Command::new(&settings.binary)
            .args(settings.args(&output))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GwError::EncoderUnavailable {
                binary: settings.binary.clone(),
                source,
            })?;
        let stdin = child.stdin.take();

        log::info!(
            "encoder: {} -> {} ({}x{} @ {} fps, {} kbit/s)",
            settings.binary,
            output.display(),
            settings.width,
            settings.height,
            settings.fps,
            settings.bitrate_kbps
        );

        Ok(Self {
            child: Some(child),
            stdin,
            settings,
            output,
            frames: 0,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.frames
    }
}

impl FrameSink for FfmpegEncoder {
    fn write_frame(&mut self, frame: &RgbImage) -> GwResult<()> {
        if frame.width() != self.settings.width || frame.height() != self.settings.height {
            return Err(GwError::Encoder(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width(),
                frame.height(),
                self.settings.width,
                self.settings.height
            )));
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| GwError::Encoder("encoder input already closed".into()))?;
        stdin.write_all(frame.as_raw()).map_err(|e| match e.kind() {
            ErrorKind::BrokenPipe => GwError::Encoder(format!(
                "encoder exited early after {} frames",
                self.frames
            )),
            _ => GwError::io(&self.output, e),
        })?;
        self.frames += 1;
        Ok(())
    }

    fn finish(mut self) -> GwResult<PathBuf> {
        // closing stdin signals end of stream
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return Err(GwError::Encoder("encoder already finished".into()));
        };
        let out = child.wait_with_output().map_err(|e| GwError::io(&self.output, e))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(GwError::Encoder(format!(
                "{} exited with {}: {}",
                self.settings.binary,
                out.status,
                stderr.trim()
            )));
        }
        log::info!("encoder: wrote {} frames to {}", self.frames, self.output.display());
        Ok(self.output.clone())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
    }
}

/// Numbered PNG files, `frame_00000.png`, `frame_00001.png`, ...
pub struct PngSequence {
    dir: PathBuf,
    frames: usize,
}

impl PngSequence {
    pub fn open(dir: impl Into<PathBuf>) -> GwResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| GwError::io(&dir, e))?;
        log::info!("png sequence -> {}", dir.display());
        Ok(Self { dir, frames: 0 })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }
}

impl FrameSink for PngSequence {
    fn write_frame(&mut self, frame: &RgbImage) -> GwResult<()> {
        frame.save(self.frame_path(self.frames))?;
        self.frames += 1;
        Ok(())
    }

    fn finish(self) -> GwResult<PathBuf> {
        log::info!("png sequence: wrote {} frames to {}", self.frames, self.dir.display());
        Ok(self.dir)
    }
}
