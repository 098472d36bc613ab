use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TbnError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("There is no texture coordinate, so there is no need for tangent-binormal coordinates")]
    NoTextureCoordinates,

    #[error("There is already tangent space coordinate, so there is no need for tangent-binormal coordinates")]
    TangentAlreadyPresent,

    #[error("Degenerate texture coordinates on face {face}")]
    DegenerateUv { face: usize },

    #[error("Degenerate geometry on face {face}")]
    DegenerateGeometry { face: usize },

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("No tangent space to write")]
    EmptyInput,

    #[error("Invalid buffer: {0}")]
    InvalidBuffer(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TbnError {
    /// Process exit code reported by the binary for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            TbnError::InvalidArguments(_) => 2,
            TbnError::Io { .. } => 3,
            TbnError::NoTextureCoordinates => 4,
            TbnError::TangentAlreadyPresent => 5,
            TbnError::DegenerateUv { .. } | TbnError::DegenerateGeometry { .. } => 6,
            TbnError::MalformedDocument(_) => 7,
            TbnError::EmptyInput | TbnError::InvalidBuffer(_) => 8,
        }
    }

    /// Guard conditions that skip the file rather than signal a broken one.
    pub fn is_skip(&self) -> bool {
        matches!(self, TbnError::NoTextureCoordinates | TbnError::TangentAlreadyPresent)
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TbnError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, TbnError>;
