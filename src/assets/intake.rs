use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{LayoutError, LayoutResult};

/// One selected photo awaiting processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputFile {
    /// Display name (file name component).
    pub name: String,
    /// Location on disk.
    pub path: PathBuf,
    /// Image format implied by the file extension.
    pub format: image::ImageFormat,
}

impl InputFile {
    /// Classify `path` as an image by extension; `None` for anything else.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let format = image::ImageFormat::from_path(&path).ok()?;
        if !format.reading_enabled() {
            return None;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Some(Self { name, path, format })
    }

    /// MIME type for the detected format, e.g. `image/png`.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Collect image files from a mix of file and directory paths.
///
/// Explicit files keep their given order. A directory contributes its direct
/// children sorted by file name. Files that are not images are dropped.
pub fn collect_inputs<P: AsRef<Path>>(paths: &[P]) -> LayoutResult<Vec<InputFile>> {
    let mut out = Vec::new();
    for p in paths {
        let p = p.as_ref();
        let meta = std::fs::metadata(p)
            .with_context(|| format!("inspect input '{}'", p.display()))?;
        if meta.is_dir() {
            out.extend(collect_dir(p)?);
        } else if let Some(f) = InputFile::from_path(p) {
            out.push(f);
        } else {
            tracing::debug!(path = %p.display(), "skipping non-image input");
        }
    }
    Ok(out)
}

/// Keep only the image entries of an already collected list.
pub fn filter_images<I>(paths: I) -> Vec<InputFile>
where
    I: IntoIterator,
    I::Item: Into<PathBuf>,
{
    paths.into_iter().filter_map(InputFile::from_path).collect()
}

fn collect_dir(dir: &Path) -> LayoutResult<Vec<InputFile>> {
    let mut entries = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?
    {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat '{}'", entry.path().display()))?;
        if file_type.is_file() {
            entries.push(entry.path());
        }
    }
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(filter_images(entries))
}

/// Reject an empty selection with a readable message.
pub fn require_non_empty(files: &[InputFile]) -> LayoutResult<()> {
    if files.is_empty() {
        return Err(LayoutError::validation("no image files selected"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/intake.rs"]
mod tests;
