//! Typed failure causes carried inside [anyhow::Error].

use std::path::PathBuf;
use thiserror::Error;

/// The root cause of a failed dataset operation.
///
/// Dataset methods return [anyhow::Result]. Callers that need to tell the
/// failures apart can `downcast_ref::<DatasetError>()` on the returned error.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("index {index} is out of range for a dataset of {len} examples")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("file not found '{}'", .path.display())]
    FileNotFound { path: PathBuf },
    #[error("failed to parse annotation file '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_xml_rs::Error,
    },
    #[error("class name '{name}' is not in the class vocabulary")]
    UnknownClass { name: String },
    #[error("no getter is registered for key '{key}'")]
    UnknownKey { key: String },
    #[error("failed to decode image file '{}'", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("dataset is not found at '{}', it must be downloaded and extracted there first", .path.display())]
    DatasetNotFound { path: PathBuf },
}
