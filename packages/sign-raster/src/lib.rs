//! Rasterize a laid-out metro sign.
//!
//! The scene's rectangles and text are serialized to SVG and drawn as a
//! single base layer. Icon assets are fetched concurrently through an
//! [`AssetLoader`], decoded, and drawn on top in scene order. An image that
//! fails to load is skipped; only failing to allocate the surface is fatal.
//!
//! ```no_run
//! use sign_layout::{Composition, layout};
//! use sign_raster::{FsAssetLoader, RasterConfig, rasterize};
//!
//! # async fn run() -> Result<(), sign_raster::RasterError> {
//! let scene = layout(&Composition::new());
//! let output = rasterize(&scene, FsAssetLoader::new("public"), RasterConfig::default()).await?;
//! output.bitmap.save_png(".", "metro-sign.png").await?;
//! # Ok(())
//! # }
//! ```

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(test, allow(unused_crate_dependencies))] // Some dev dependencies are only used in tests

mod bitmap;
mod config;
mod decode;
mod error;
mod loader;
mod raster;
mod surface;

pub use bitmap::Bitmap;
pub use config::{DEFAULT_OUTPUT_NAME, RasterConfig, RasterConfigBuilder};
pub use decode::Icon;
pub use error::{AssetError, DecodeError, LoadError, RasterError, RasterResult};
pub use loader::{AssetLoader, FsAssetLoader, MemoryAssetLoader, decode_data_url, svg_data_url};
pub use raster::{RasterOutput, RasterReport, Rasterizer, rasterize};
pub use surface::{PixmapSurface, Surface};

pub use resvg::tiny_skia;
pub use usvg;
