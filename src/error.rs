use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to load image {path}! {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read {path}! {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font data in {0}")]
    InvalidFont(PathBuf),
    #[error("failed to parse scene! {0}")]
    SceneFormat(#[from] serde_json::Error),
    #[error("invalid scene: {0}")]
    Scene(String),
    #[error("invalid event script: {0}")]
    Script(String),
    #[error("renderer error! {0}")]
    Render(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Render(value)
    }
}
