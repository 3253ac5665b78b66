// One error type for the whole generation + viewer pipeline.
// Every variant states *where* things went wrong.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Texture or mask path does not exist.
    #[error("{role} file '{}' not found", .path.display())]
    FileNotFound { role: &'static str, path: PathBuf },

    /// The file exists but is not an image we can decode.
    #[error("could not load {role} '{}': {source}", .path.display())]
    DecodeFailure {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The mask yields neither an alpha nor a luminance channel.
    #[error("unsupported mask format: {0}")]
    UnsupportedFormat(String),

    #[error("could not create output directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
}

pub type Result<T> = std::result::Result<T, Error>;
