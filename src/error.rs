//! Error type shared by the library.
//!
//! Nothing in the pipeline is recovered or retried; every variant bubbles up
//! to `main` and ends the run.

use std::path::PathBuf;

use thiserror::Error;

/// Root error type for all gwsim failures.
#[derive(Error, Debug)]
pub enum GwError {
    /// Invalid scene configuration (numeric ranges, colors, sizes).
    #[error("config error: {0}")]
    Config(String),

    /// Filesystem failure tied to a specific path.
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoder process could not be spawned (usually a missing binary).
    #[error("could not start encoder `{binary}`: {source}")]
    EncoderUnavailable {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The encoder rejected input or exited unsuccessfully.
    #[error("encoder error: {0}")]
    Encoder(String),

    /// PNG encoding of a frame failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Scene file could not be parsed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Renderer was handed inconsistent inputs.
    #[error("render error: {0}")]
    Render(String),
}

impl GwError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GwError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type GwResult<T> = Result<T, GwError>;
