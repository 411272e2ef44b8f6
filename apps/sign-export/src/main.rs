//! Render a JSON sign document to `metro-sign.png`.
//!
//! ```text
//! sign-export sign.json --out-dir out --svg
//! sign-export sign.json --assets public --font-dir fonts
//! RUST_LOG=debug sign-export sign.json
//! ```

mod document;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sign_layout::{Composition, FallbackPolicy, LayoutOptions, Scene, layout_with};
use sign_raster::{AssetLoader, FsAssetLoader, MemoryAssetLoader, RasterConfig, Rasterizer};
use sign_svg::{SvgOptions, to_svg};

use crate::document::SignDocument;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Sign document (JSON). Omit to render the default single-exit sign.
    input: Option<PathBuf>,

    /// Directory the PNG (and SVG) are written to.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Root that relative icon references such as `logos/arrow.svg` resolve
    /// against. Without it the bundled artwork is used.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Output file name.
    #[arg(long)]
    name: Option<String>,

    /// Also write the self-contained SVG preview.
    #[arg(long)]
    svg: bool,

    /// Give up on an icon after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Do not load system fonts; only `--font-dir` fonts are used.
    #[arg(long)]
    no_system_fonts: bool,

    /// Extra font directory. May be repeated.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Fail on unknown kinds or alignments instead of leaving them blank.
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn raster_config(&self) -> RasterConfig {
        let mut builder = RasterConfig::builder().load_system_fonts(!self.no_system_fonts);
        if let Some(ms) = self.timeout_ms {
            builder = builder.load_timeout(Duration::from_millis(ms));
        }
        if let Some(name) = &self.name {
            builder = builder.output_name(name.clone());
        }
        for dir in &self.font_dirs {
            builder = builder.font_dir(dir.clone());
        }
        builder.build()
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            fallback: if self.strict {
                FallbackPolicy::Strict
            } else {
                FallbackPolicy::Silent
            },
        }
    }
}

async fn load_composition(input: Option<&PathBuf>) -> Result<Composition> {
    let Some(path) = input else {
        return Ok(Composition::new());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let document =
        SignDocument::from_json(&json).with_context(|| format!("parsing {}", path.display()))?;
    Ok(document.to_composition()?)
}

async fn render<L: AssetLoader>(
    scene: &Scene,
    loader: L,
    config: RasterConfig,
    out_dir: &Path,
) -> Result<PathBuf> {
    let rasterizer = Rasterizer::new(loader, config);
    let output = rasterizer.rasterize(scene).await?;
    if !output.report.is_complete() {
        log::warn!(
            "sign is incomplete: base layer drawn={}, missing icons {:?}",
            output.report.base_drawn,
            output.report.icons_failed
        );
    }
    let path = output
        .bitmap
        .save_png(out_dir, &rasterizer.config().output_name)
        .await
        .with_context(|| format!("saving PNG to {}", out_dir.display()))?;
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let composition = load_composition(args.input.as_ref()).await?;
    let scene = layout_with(&composition, &args.layout_options())?;
    log::info!(
        "laid out {} segments, {}x{}",
        composition.len(),
        scene.width,
        scene.height
    );

    tokio::fs::create_dir_all(&args.out_dir)
        .await
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let config = args.raster_config();
    let png = match &args.assets {
        Some(root) => render(&scene, FsAssetLoader::new(root), config, &args.out_dir).await?,
        None => render(&scene, MemoryAssetLoader::builtin(), config, &args.out_dir).await?,
    };
    println!("{}", png.display());

    if args.svg {
        let svg_path = png.with_extension("svg");
        tokio::fs::write(&svg_path, to_svg(&scene, &SvgOptions::preview()))
            .await
            .with_context(|| format!("writing {}", svg_path.display()))?;
        println!("{}", svg_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_feed_raster_config() {
        let args = Args::parse_from([
            "sign-export",
            "sign.json",
            "--timeout-ms",
            "250",
            "--no-system-fonts",
            "--font-dir",
            "fonts",
            "--font-dir",
            "more-fonts",
            "--name",
            "gate-a.png",
        ]);
        let config = args.raster_config();
        assert_eq!(config.load_timeout, Some(Duration::from_millis(250)));
        assert!(!config.load_system_fonts);
        assert_eq!(config.font_dirs.len(), 2);
        assert_eq!(config.output_name, "gate-a.png");
        assert_eq!(args.layout_options().fallback, FallbackPolicy::Silent);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sign-export", "--strict"]);
        assert!(args.input.is_none());
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(args.assets.is_none());
        assert_eq!(args.raster_config(), RasterConfig::default());
        assert_eq!(args.layout_options().fallback, FallbackPolicy::Strict);
    }

    #[tokio::test]
    async fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut composition = Composition::new();
        let arrow = composition.add_segment();
        composition
            .set_kind(arrow, "↗".parse::<sign_layout::SegmentKind>().unwrap())
            .unwrap();
        let scene = layout_with(&composition, &LayoutOptions::default()).unwrap();
        let config = RasterConfig::builder().load_system_fonts(false).build();

        let path = render(&scene, MemoryAssetLoader::builtin(), config, dir.path())
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("metro-sign.png"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[tokio::test]
    async fn test_load_composition_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sign.json");
        std::fs::write(&path, r#"{ "segments": [{ "kind": "To", "params": { "0": "宛平城" } }] }"#)
            .unwrap();

        let composition = load_composition(Some(&path)).await.unwrap();
        assert_eq!(composition.len(), 1);
        assert_eq!(composition.segments()[0].width(), 384);

        assert!(load_composition(Some(&dir.path().join("missing.json"))).await.is_err());
        assert_eq!(load_composition(None).await.unwrap().len(), 1);
    }
}
