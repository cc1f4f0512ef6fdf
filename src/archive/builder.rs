use std::{
    collections::HashSet,
    io::{Cursor, Write as _},
    path::Path,
};

use anyhow::Context;

use crate::foundation::error::{LayoutError, LayoutResult};

/// Default archive file name.
pub const DEFAULT_ARCHIVE_NAME: &str = "generated_layouts.zip";
/// Default entry name prefix.
pub const DEFAULT_ENTRY_PREFIX: &str = "layout_";
/// Default zero-padding width of the entry index.
pub const DEFAULT_INDEX_WIDTH: usize = 3;

/// Naming scheme for archive entries: `{prefix}{index:0width}.{ext}`, 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryNaming {
    /// Text placed before the index.
    pub prefix: String,
    /// Minimum digit count; longer indices are written in full.
    pub index_width: usize,
    /// Extension without the leading dot.
    pub extension: String,
}

impl Default for EntryNaming {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ENTRY_PREFIX.to_string(),
            index_width: DEFAULT_INDEX_WIDTH,
            extension: "png".to_string(),
        }
    }
}

impl EntryNaming {
    /// Entry name for the zero-based input position `index`.
    pub fn name_for(&self, index: usize) -> String {
        entry_name(&self.prefix, index, self.index_width, &self.extension)
    }
}

/// `entry_name("layout_", 0, 3, "png") == "layout_001.png"`.
pub fn entry_name(prefix: &str, index: usize, width: usize, extension: &str) -> String {
    format!("{prefix}{:0width$}.{extension}", index + 1)
}

/// In-memory zip archive assembled one entry at a time.
pub struct ArchiveBuilder {
    writer: zip::ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
}

impl std::fmt::Debug for ArchiveBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveBuilder")
            .field("entries", &self.names.len())
            .finish()
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: zip::ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
        }
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append a stored (uncompressed) entry. Names must be unique.
    pub fn add(&mut self, name: &str, bytes: &[u8]) -> LayoutResult<()> {
        if name.is_empty() {
            return Err(LayoutError::archive("entry name must not be empty"));
        }
        if !self.names.insert(name.to_string()) {
            return Err(LayoutError::archive(format!(
                "duplicate archive entry '{name}'"
            )));
        }

        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        self.writer
            .start_file(name, options)
            .map_err(|e| LayoutError::archive(format!("start entry '{name}': {e}")))?;
        self.writer
            .write_all(bytes)
            .with_context(|| format!("write archive entry '{name}'"))?;
        Ok(())
    }

    /// Finalize the central directory and return the archive bytes.
    pub fn finish(self) -> LayoutResult<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| LayoutError::archive(format!("finalize archive: {e}")))?;
        Ok(cursor.into_inner())
    }

    /// Finalize and write the archive to `path`, creating parent directories.
    pub fn write_to(self, path: &Path) -> LayoutResult<u64> {
        let bytes = self.finish()?;
        ensure_parent_dir(path)?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("write archive '{}'", path.display()))?;
        Ok(bytes.len() as u64)
    }
}

pub fn ensure_parent_dir(path: &Path) -> LayoutResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/archive/builder.rs"]
mod tests;
