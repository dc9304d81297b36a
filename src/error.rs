//! Bundler error types.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while assembling a bundle.
#[derive(Error, Debug)]
pub enum Error {
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("authentication failed for private repository: {url} (status: {status}) - check {env_var}")]
    Authentication {
        url: String,
        status: u16,
        env_var: String,
    },

    #[error("request failed: {status} for URL: {url}")]
    RequestFailed { status: u16, url: String },

    #[error("invalid {format} archive: {message}")]
    ArchiveFormat { format: String, message: String },

    #[error("{action} failed for {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("layout error: {0}")]
    Layout(String),
}

impl Error {
    /// Wrap an IO error with the action and path it came from.
    pub fn fs(action: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn archive(format: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::ArchiveFormat {
            format: format.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The five pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    App,
    Components,
    Tools,
    Organize,
    Server,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::App,
        Step::Components,
        Step::Tools,
        Step::Organize,
        Step::Server,
    ];

    /// 1-based position in the pipeline.
    pub fn number(self) -> usize {
        match self {
            Step::App => 1,
            Step::Components => 2,
            Step::Tools => 3,
            Step::Organize => 4,
            Step::Server => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::App => "XMLUI invoice app",
            Step::Components => "XMLUI components",
            Step::Tools => "MCP tools",
            Step::Organize => "organize layout",
            Step::Server => "XMLUI test server",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}/{} ({})", self.number(), Step::ALL.len(), self.label())
    }
}

/// An [`Error`] tagged with the pipeline step that produced it.
#[derive(Error, Debug)]
#[error("{step} failed: {source}")]
pub struct StepError {
    pub step: Step,
    #[source]
    pub source: Error,
}

/// Attach a pipeline step to a fallible result.
pub trait StepContext<T> {
    fn during(self, step: Step) -> std::result::Result<T, StepError>;
}

impl<T> StepContext<T> for Result<T> {
    fn during(self, step: Step) -> std::result::Result<T, StepError> {
        self.map_err(|source| StepError { step, source })
    }
}
