use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or incomplete flag sequence.
    #[error("Usage: {0}")]
    Usage(String),

    #[error("{0}")]
    Template(String),

    #[error("{message}")]
    Path { message: String, path: PathBuf },

    #[error("{context} '{}': {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Credentials were needed but no interactive terminal is attached.
    #[error("Couldn't get an interactive terminal to read {0}")]
    Interactive(&'static str),

    #[error("config: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::Path { message: message.into(), path: path.into() }
    }

    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { context, path: path.into(), source }
    }
}
