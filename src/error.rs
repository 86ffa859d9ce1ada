use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions of a session. None of them are retried.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid step count {0:?}: expected a non-negative integer")]
    InvalidStepCount(String),

    #[error("icon image not found at {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("could not decode icon image: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("could not write trial record: {0}")]
    Csv(#[from] csv::Error),
}

/// Raised by the sequencer once every trial has been presented.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("all trials have been presented")]
pub struct OutOfTrials;
