//! Rasterizer configuration.

use std::path::PathBuf;
use std::time::Duration;

/// File name used by [`Bitmap::save_png`](crate::Bitmap::save_png) unless overridden.
pub const DEFAULT_OUTPUT_NAME: &str = "metro-sign.png";

/// Knobs for a rasterization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterConfig {
    /// Give up on an individual image load after this long. `None` waits forever.
    pub load_timeout: Option<Duration>,
    /// Make installed system fonts available to text rendering.
    pub load_system_fonts: bool,
    /// Extra directories scanned for font files.
    pub font_dirs: Vec<PathBuf>,
    pub output_name: String,
}

impl RasterConfig {
    pub fn new() -> Self {
        Self {
            load_timeout: None,
            load_system_fonts: true,
            font_dirs: Vec::new(),
            output_name: DEFAULT_OUTPUT_NAME.to_owned(),
        }
    }

    pub fn builder() -> RasterConfigBuilder {
        RasterConfigBuilder::new()
    }

    /// SVG parsing options with the configured font database.
    pub(crate) fn svg_options(&self) -> usvg::Options<'static> {
        let mut options = usvg::Options::default();
        let fontdb = options.fontdb_mut();
        if self.load_system_fonts {
            fontdb.load_system_fonts();
        }
        for dir in &self.font_dirs {
            fontdb.load_fonts_dir(dir);
        }
        log::debug!("font database holds {} faces", fontdb.len());
        options
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct RasterConfigBuilder {
    config: RasterConfig,
}

impl RasterConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RasterConfig::new(),
        }
    }

    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.config.load_timeout = Some(timeout);
        self
    }

    pub fn load_system_fonts(mut self, enabled: bool) -> Self {
        self.config.load_system_fonts = enabled;
        self
    }

    pub fn font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.font_dirs.push(dir.into());
        self
    }

    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_name = name.into();
        self
    }

    pub fn build(self) -> RasterConfig {
        self.config
    }
}

impl Default for RasterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RasterConfig::default();
        assert_eq!(config.load_timeout, None);
        assert!(config.load_system_fonts);
        assert!(config.font_dirs.is_empty());
        assert_eq!(config.output_name, "metro-sign.png");
    }

    #[test]
    fn test_builder() {
        let config = RasterConfig::builder()
            .load_timeout(Duration::from_secs(2))
            .load_system_fonts(false)
            .font_dir("fonts")
            .output_name("exit-b.png")
            .build();
        assert_eq!(config.load_timeout, Some(Duration::from_secs(2)));
        assert!(!config.load_system_fonts);
        assert_eq!(config.font_dirs, vec![PathBuf::from("fonts")]);
        assert_eq!(config.output_name, "exit-b.png");
    }
}
