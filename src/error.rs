use std::path::PathBuf;

/// Every failure an engine operation can report. The action that raised it is
/// aborted and all stores keep their pre-action state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseFailure,
    },
    #[error("invalid campaign: {0}")]
    Validation(String),
    #[error("{0}")]
    Selection(&'static str),
    #[error("could not write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a file could not be turned into JSON.
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error("unreadable")]
    Read(#[from] std::io::Error),
    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),
    #[error("unexpected shape: {0}")]
    Shape(&'static str),
}

impl SessionError {
    pub(crate) fn parse(path: &std::path::Path, source: impl Into<ParseFailure>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
