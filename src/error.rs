use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between picking an export and showing its chapters.
#[derive(Debug, Error)]
pub enum ChompError {
    #[error("no input file was selected")]
    NoInputSelected,

    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("unsupported file type (expected .fcpxml or .fcpxmld): {}", .0.display())]
    UnsupportedFileType(PathBuf),

    #[error("malformed XML at byte {position}: {message}")]
    MalformedXml { position: u64, message: String },

    #[error("malformed time value \"{value}\": {reason}")]
    MalformedTimeValue { value: String, reason: String },

    #[error("<{element}> is missing its \"{attribute}\" attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("failed to delete {}: {source}", .path.display())]
    DeletionFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to export chapters: {0}")]
    Export(String),
}

impl ChompError {
    pub(crate) fn malformed_time(value: &str, reason: impl Into<String>) -> Self {
        ChompError::MalformedTimeValue {
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChompError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the "nothing to read" family: no selection, or a missing file or bundle member.
    pub fn is_input_not_found(&self) -> bool {
        matches!(
            self,
            ChompError::NoInputSelected | ChompError::InputNotFound(_)
        )
    }
}

impl From<serde_json::Error> for ChompError {
    fn from(err: serde_json::Error) -> Self {
        ChompError::Export(err.to_string())
    }
}

impl From<serde_xml_rs::Error> for ChompError {
    fn from(err: serde_xml_rs::Error) -> Self {
        ChompError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChompError>;
