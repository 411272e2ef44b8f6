//! Error types for loading, decoding and rasterizing.

use std::time::Duration;

use thiserror::Error;

/// Failure to fetch the bytes behind an asset reference.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error reading {href}: {source}")]
    Io {
        href: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Data URL parsing error: {0}")]
    DataUrl(data_url::DataUrlError),

    #[error("Base64 decode error: {0}")]
    DataUrlBase64(data_url::forgiving_base64::InvalidBase64),

    #[error("no asset registered for {0}")]
    NotFound(String),

    #[error("loading {href} did not finish within {after:?}")]
    Timeout { href: String, after: Duration },
}

impl From<data_url::DataUrlError> for LoadError {
    fn from(value: data_url::DataUrlError) -> Self {
        Self::DataUrl(value)
    }
}

impl From<data_url::forgiving_base64::InvalidBase64> for LoadError {
    fn from(value: data_url::forgiving_base64::InvalidBase64) -> Self {
        Self::DataUrlBase64(value)
    }
}

/// Bytes were fetched but are not a usable image.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("SVG parse failed: {0}")]
    Svg(#[from] usvg::Error),

    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("image has zero width or height")]
    Empty,
}

/// Any reason an image could not be drawn. Never fatal to a rasterization.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Fatal rasterization and export failures.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cannot allocate a {width}x{height} drawing surface")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RasterResult<T> = Result<T, RasterError>;
