//! Error taxonomy for generation runs.

use std::{fmt, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument is missing or blank.
    InvalidArgument,
    /// A referenced entity is absent from the model.
    NotFound,
    /// Missing or invalid configuration (profile entry, naming style, numeric value, ...).
    Configuration,
    /// The template engine failed.
    Render,
    /// Reading a template or writing an output file failed.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::NotFound => "not found",
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Render => "render error",
            ErrorKind::Io => "I/O error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{0}")]
    #[diagnostic(code(scribe::invalid_argument))]
    InvalidArgument(String),

    #[error("{0}")]
    #[diagnostic(code(scribe::not_found))]
    NotFound(String),

    #[error("{0}")]
    #[diagnostic(code(scribe::configuration))]
    Configuration(String),

    #[error(transparent)]
    #[diagnostic(code(scribe::manifest))]
    Manifest(#[from] Box<scribe_manifest::Error>),

    #[error(transparent)]
    #[diagnostic(code(scribe::model))]
    Model(#[from] scribe_model::ModelError),

    #[error("failed to render template '{}'", template.display())]
    #[diagnostic(code(scribe::render))]
    Render {
        template: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to access '{}'", path.display())]
    #[diagnostic(code(scribe::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub fn render(
        template: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Render {
            template: template.into(),
            source: source.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Configuration(_) | Error::Manifest(_) | Error::Model(_) => {
                ErrorKind::Configuration
            }
            Error::Render { .. } => ErrorKind::Render,
            Error::Io { .. } => ErrorKind::Io,
        }
    }
}
