//! Asynchronous asset loading.
//!
//! Image references in a scene are plain strings: a `data:` URL, a
//! `file://` URL or a path relative to an asset root.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use data_url::DataUrl;
use sign_layout::{ARROW_ASSET, ARROW_DIAGONAL_ASSET, TOILET_ASSET};

use crate::error::LoadError;

/// Resolves an asset reference to its bytes.
///
/// Loads may complete in any order; callers never rely on completion order.
pub trait AssetLoader {
    fn load(&self, href: &str) -> impl Future<Output = Result<Bytes, LoadError>>;
}

impl<L: AssetLoader + ?Sized> AssetLoader for &L {
    fn load(&self, href: &str) -> impl Future<Output = Result<Bytes, LoadError>> {
        (**self).load(href)
    }
}

/// Wrap an SVG document in a base64 `data:` URL.
pub fn svg_data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Decode the payload of a `data:` URL.
pub fn decode_data_url(href: &str) -> Result<Bytes, LoadError> {
    let data_url = DataUrl::process(href)?;
    let (decoded, _fragment) = data_url.decode_to_vec()?;
    Ok(Bytes::from(decoded))
}

/// Race `loader` against an optional deadline.
pub(crate) async fn load_with_timeout<L: AssetLoader>(
    loader: &L,
    href: &str,
    timeout: Option<Duration>,
) -> Result<Bytes, LoadError> {
    match timeout {
        Some(after) => tokio::time::timeout(after, loader.load(href))
            .await
            .map_err(|_| LoadError::Timeout {
                href: href.to_owned(),
                after,
            })?,
        None => loader.load(href).await,
    }
}

/// Reads assets from disk relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, href: &str) -> PathBuf {
        match href.strip_prefix("file://") {
            Some(path) => PathBuf::from(path),
            None => self.root.join(href),
        }
    }
}

impl AssetLoader for FsAssetLoader {
    async fn load(&self, href: &str) -> Result<Bytes, LoadError> {
        if href.starts_with("data:") {
            return decode_data_url(href);
        }
        let path = self.resolve(href);
        log::debug!("reading asset {}", path.display());
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Bytes::from(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::NotFound(href.to_owned()))
            }
            Err(source) => Err(LoadError::Io {
                href: href.to_owned(),
                source,
            }),
        }
    }
}

/// Serves assets from an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetLoader {
    assets: HashMap<String, Bytes>,
}

impl MemoryAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// The arrow and toilet pictograms every scene may reference.
    pub fn builtin() -> Self {
        let mut loader = Self::new();
        loader.insert(
            ARROW_ASSET,
            Bytes::from_static(include_bytes!("../assets/logos/arrow.svg")),
        );
        loader.insert(
            ARROW_DIAGONAL_ASSET,
            Bytes::from_static(include_bytes!("../assets/logos/arrow-45.svg")),
        );
        loader.insert(
            TOILET_ASSET,
            Bytes::from_static(include_bytes!("../assets/logos/toilet.svg")),
        );
        loader
    }

    pub fn insert(&mut self, href: impl Into<String>, bytes: impl Into<Bytes>) -> &mut Self {
        self.assets.insert(href.into(), bytes.into());
        self
    }
}

impl AssetLoader for MemoryAssetLoader {
    async fn load(&self, href: &str) -> Result<Bytes, LoadError> {
        if href.starts_with("data:") {
            return decode_data_url(href);
        }
        self.assets
            .get(href)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(href.to_owned()))
    }
}
