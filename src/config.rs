use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    archive::builder::{
        DEFAULT_ARCHIVE_NAME, DEFAULT_ENTRY_PREFIX, DEFAULT_INDEX_WIDTH, EntryNaming,
    },
    encode::image_out::DEFAULT_PREVIEW_QUALITY,
    foundation::core::Canvas,
    foundation::error::{LayoutError, LayoutResult},
};

/// Default overlay template path, relative to the working directory.
pub const DEFAULT_OVERLAY: &str = "posting-layout.png";

/// Settings for a generation pass. Every field has a default, so `{}` is a valid file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Overlay template (raster or `.svg`).
    pub overlay: PathBuf,
    /// Output canvas; `None` uses the template's own size.
    pub canvas: Option<Canvas>,
    /// File name of the produced archive.
    pub archive_name: String,
    /// Archive entry prefix.
    pub entry_prefix: String,
    /// Zero-padding width of the entry index.
    pub index_width: usize,
    /// JPEG quality used for previews (1..=100).
    pub preview_quality: u8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            overlay: PathBuf::from(DEFAULT_OVERLAY),
            canvas: None,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            entry_prefix: DEFAULT_ENTRY_PREFIX.to_string(),
            index_width: DEFAULT_INDEX_WIDTH,
            preview_quality: DEFAULT_PREVIEW_QUALITY,
        }
    }
}

impl LayoutConfig {
    /// Read and validate a JSON config file.
    ///
    /// A relative `overlay` is resolved against the config file's directory.
    pub fn from_path(path: &Path) -> LayoutResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| LayoutError::config(format!("{}: {e}", path.display())))?;
        if cfg.overlay.is_relative()
            && let Some(dir) = path.parent()
        {
            cfg.overlay = dir.join(&cfg.overlay);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config string. Paths stay as written.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| LayoutError::config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> LayoutResult<()> {
        if let Some(canvas) = self.canvas {
            canvas
                .validate()
                .map_err(|e| LayoutError::config(e.to_string()))?;
        }
        if self.archive_name.trim().is_empty() {
            return Err(LayoutError::config("archive_name must not be empty"));
        }
        if self.archive_name.contains(['/', '\\']) {
            return Err(LayoutError::config(
                "archive_name must be a file name, not a path",
            ));
        }
        if self.entry_prefix.contains(['/', '\\']) {
            return Err(LayoutError::config(
                "entry_prefix must not contain path separators",
            ));
        }
        if self.index_width > 12 {
            return Err(LayoutError::config("index_width must be <= 12"));
        }
        if !(1..=100).contains(&self.preview_quality) {
            return Err(LayoutError::config("preview_quality must be in 1..=100"));
        }
        Ok(())
    }

    /// Entry naming derived from this config (always PNG entries).
    pub fn entry_naming(&self) -> EntryNaming {
        EntryNaming {
            prefix: self.entry_prefix.clone(),
            index_width: self.index_width,
            extension: "png".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
