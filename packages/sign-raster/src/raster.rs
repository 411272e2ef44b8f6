//! Painting a [`Scene`] onto a [`Surface`].

use futures_util::future::join_all;
use kurbo::Affine;
use sign_layout::{ImageRef, Scene};
use sign_svg::{SvgOptions, to_svg};

use crate::bitmap::Bitmap;
use crate::config::RasterConfig;
use crate::decode::Icon;
use crate::error::{AssetError, DecodeError, RasterResult};
use crate::loader::{AssetLoader, load_with_timeout, svg_data_url};
use crate::surface::{PixmapSurface, Surface};

/// What ended up on the surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterReport {
    pub base_drawn: bool,
    pub icons_drawn: usize,
    /// References of icons that could not be loaded or decoded, in scene order.
    pub icons_failed: Vec<String>,
}

impl RasterReport {
    /// Every image (base layer and icons) was drawn.
    pub fn is_complete(&self) -> bool {
        self.base_drawn && self.icons_failed.is_empty()
    }
}

#[derive(Debug)]
pub struct RasterOutput {
    pub bitmap: Bitmap,
    pub report: RasterReport,
}

/// Turns scenes into bitmaps, loading assets through `L`.
pub struct Rasterizer<L> {
    loader: L,
    config: RasterConfig,
    svg_options: usvg::Options<'static>,
}

impl<L: AssetLoader> Rasterizer<L> {
    pub fn new(loader: L, config: RasterConfig) -> Self {
        let svg_options = config.svg_options();
        Self {
            loader,
            config,
            svg_options,
        }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Paint `scene` onto a fresh surface of the scene's size.
    ///
    /// Only allocating the surface can fail. Images that cannot be loaded or
    /// decoded are skipped and listed in the report.
    pub async fn rasterize(&self, scene: &Scene) -> RasterResult<RasterOutput> {
        let mut surface = PixmapSurface::new(scene.width, scene.height)?;
        let report = self.rasterize_onto(&mut surface, scene).await;
        Ok(RasterOutput {
            bitmap: Bitmap::new(surface.into_pixmap()),
            report,
        })
    }

    /// Paint `scene` onto `surface`: background, then the base layer, then
    /// icons in scene order once every icon load has settled.
    pub async fn rasterize_onto<S: Surface>(&self, surface: &mut S, scene: &Scene) -> RasterReport {
        surface.fill(scene.background);

        let images: Vec<&ImageRef> = scene.images().collect();
        let (base, icons) = futures_util::join!(
            self.load_base_layer(scene),
            join_all(images.iter().map(|image| self.load_icon(&image.href)))
        );

        let mut report = RasterReport::default();
        match base {
            Ok(tree) => {
                surface.draw_tree(&tree, Affine::IDENTITY);
                report.base_drawn = true;
            }
            Err(err) => log::warn!("base layer skipped: {err}"),
        }

        for (image, icon) in images.iter().zip(icons) {
            match icon {
                Ok(icon) => {
                    let (width, height) = icon.size();
                    let transform = image.placement(width, height);
                    match &icon {
                        Icon::Vector(tree) => surface.draw_tree(tree, transform),
                        Icon::Raster(pixmap) => surface.draw_pixmap(pixmap, transform),
                    }
                    report.icons_drawn += 1;
                }
                Err(err) => {
                    log::warn!("icon {} skipped: {err}", image.href);
                    report.icons_failed.push(image.href.clone());
                }
            }
        }

        log::debug!(
            "rasterized {}x{}: base={} icons drawn={} failed={}",
            scene.width,
            scene.height,
            report.base_drawn,
            report.icons_drawn,
            report.icons_failed.len()
        );
        report
    }

    async fn load_base_layer(&self, scene: &Scene) -> Result<usvg::Tree, AssetError> {
        let url = svg_data_url(&to_svg(scene, &SvgOptions::base_layer()));
        let bytes = load_with_timeout(&self.loader, &url, self.config.load_timeout).await?;
        let tree = usvg::Tree::from_data(&bytes, &self.svg_options).map_err(DecodeError::from)?;
        Ok(tree)
    }

    async fn load_icon(&self, href: &str) -> Result<Icon, AssetError> {
        let bytes = load_with_timeout(&self.loader, href, self.config.load_timeout).await?;
        Ok(Icon::decode(&bytes, &self.svg_options)?)
    }
}

/// Rasterize `scene` with a one-off [`Rasterizer`].
pub async fn rasterize<L: AssetLoader>(
    scene: &Scene,
    loader: L,
    config: RasterConfig,
) -> RasterResult<RasterOutput> {
    Rasterizer::new(loader, config).rasterize(scene).await
}
