use std::path::{Path, PathBuf};

use crate::{
    archive::builder::ArchiveBuilder,
    assets::decode::load_image_file,
    assets::intake::{InputFile, filter_images},
    assets::template::OverlayTemplate,
    config::LayoutConfig,
    encode::image_out::{encode_jpeg_preview, encode_png},
    foundation::error::{LayoutError, LayoutResult},
    render::cpu::{CpuCompositor, Frame},
};

/// The two UI states: ready for input, or busy generating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Processing,
}

/// Receives progress from a generation pass.
pub trait Observer {
    /// Human-readable status line (replaces the previous one).
    fn status(&mut self, message: &str);

    /// JPEG preview of a finished layout, keyed by input position and entry name.
    fn preview(&mut self, _index: usize, _entry_name: &str, _jpeg: &[u8]) {}

    /// Whether [`Observer::preview`] should be called at all. Previews are not
    /// encoded unless this returns `true`.
    fn wants_previews(&self) -> bool {
        false
    }

    fn state_changed(&mut self, _state: SessionState) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn status(&mut self, _message: &str) {}
}

/// A photo that could not be processed. Logged, never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFailure {
    /// Zero-based position in the selection.
    pub index: usize,
    pub name: String,
    pub error: String,
}

/// Outcome of one generation pass.
#[derive(Clone, Debug)]
pub struct GenerateReport {
    pub archive_path: PathBuf,
    pub archive_bytes: u64,
    /// Entry names written, in order.
    pub entries: Vec<String>,
    pub failures: Vec<FileFailure>,
}

/// Selected photos plus the template they are composited with.
///
/// The selection is replaced on every [`Session::select_files`] and cleared by
/// [`Session::reset`].
#[derive(Debug)]
pub struct Session {
    template: OverlayTemplate,
    config: LayoutConfig,
    files: Vec<InputFile>,
    status: String,
    state: SessionState,
}

impl Session {
    pub fn new(template: OverlayTemplate, config: LayoutConfig) -> Self {
        Self {
            template,
            config,
            files: Vec::new(),
            status: String::new(),
            state: SessionState::Idle,
        }
    }

    /// Load the configured overlay template and start an idle session.
    pub fn open(config: LayoutConfig) -> LayoutResult<Self> {
        config.validate()?;
        let template = OverlayTemplate::load(&config.overlay, config.canvas)?;
        Ok(Self::new(template, config))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    pub fn template(&self) -> &OverlayTemplate {
        &self.template
    }

    /// Generate is allowed when idle with a non-empty selection.
    pub fn can_generate(&self) -> bool {
        self.state == SessionState::Idle && !self.files.is_empty()
    }

    pub fn can_reset(&self) -> bool {
        self.state == SessionState::Idle
    }

    /// Clear the selection and status.
    pub fn reset(&mut self) -> LayoutResult<()> {
        if !self.can_reset() {
            return Err(LayoutError::validation("cannot reset while processing"));
        }
        self.files.clear();
        self.status.clear();
        Ok(())
    }

    /// Replace the selection with the image files among `paths`.
    pub fn select_paths<I>(&mut self, paths: I) -> LayoutResult<usize>
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        self.select_files(filter_images(paths))
    }

    /// Replace the selection. Returns the number of photos kept.
    pub fn select_files(&mut self, files: Vec<InputFile>) -> LayoutResult<usize> {
        self.reset()?;
        if files.is_empty() {
            return Ok(0);
        }
        self.files = files;
        self.status = format!("{} photo(s) are ready to be processed.", self.files.len());
        Ok(self.files.len())
    }

    /// Composite every selected photo and write the archive to `archive_path`.
    ///
    /// Returns `Ok(None)` without touching the filesystem when nothing is selected.
    /// Photos that fail to decode or render are logged and skipped; entry numbering
    /// follows selection order, so a failure leaves a gap.
    #[tracing::instrument(skip(self, observer), fields(files = self.files.len()))]
    pub fn generate(
        &mut self,
        archive_path: &Path,
        observer: &mut dyn Observer,
    ) -> LayoutResult<Option<GenerateReport>> {
        if self.files.is_empty() {
            return Ok(None);
        }
        if self.state == SessionState::Processing {
            return Err(LayoutError::validation("a generation pass is already running"));
        }

        self.set_state(SessionState::Processing, observer);
        let result = self.run_pass(archive_path, observer);
        self.set_state(SessionState::Idle, observer);
        result.map(Some)
    }

    fn run_pass(
        &mut self,
        archive_path: &Path,
        observer: &mut dyn Observer,
    ) -> LayoutResult<GenerateReport> {
        let mut compositor = CpuCompositor::new(&self.template)?;
        let naming = self.config.entry_naming();
        let preview_quality = self.config.preview_quality;
        let mut archive = ArchiveBuilder::new();
        let mut entries = Vec::with_capacity(self.files.len());
        let mut failures = Vec::new();

        let total = self.files.len();
        for index in 0..total {
            let file = self.files[index].clone();
            self.set_status(
                format!("Processing image {} of {total}: {}", index + 1, file.name),
                observer,
            );

            let (frame, png) = match process_one(&mut compositor, &file) {
                Ok(out) => out,
                Err(e) => {
                    tracing::error!(index, file = %file.name, error = %e, "failed to process photo");
                    failures.push(FileFailure {
                        index,
                        name: file.name.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let entry = naming.name_for(index);
            archive.add(&entry, &png)?;

            if observer.wants_previews() {
                match encode_jpeg_preview(&frame, preview_quality) {
                    Ok(jpeg) => observer.preview(index, &entry, &jpeg),
                    Err(e) => tracing::warn!(entry = %entry, error = %e, "preview encode failed"),
                }
            }
            entries.push(entry);
        }

        self.set_status("Zipping files... please wait.".to_string(), observer);
        let archive_bytes = archive.write_to(archive_path)?;
        tracing::info!(path = %archive_path.display(), bytes = archive_bytes, "archive written");
        self.set_status(
            "All done! Your .zip file has been written.".to_string(),
            observer,
        );

        Ok(GenerateReport {
            archive_path: archive_path.to_path_buf(),
            archive_bytes,
            entries,
            failures,
        })
    }

    fn set_status(&mut self, message: String, observer: &mut dyn Observer) {
        self.status = message;
        observer.status(&self.status);
    }

    fn set_state(&mut self, state: SessionState, observer: &mut dyn Observer) {
        self.state = state;
        observer.state_changed(state);
    }
}

fn process_one(
    compositor: &mut CpuCompositor,
    file: &InputFile,
) -> LayoutResult<(Frame, Vec<u8>)> {
    let photo = load_image_file(&file.path)?;
    let frame = compositor.compose(&photo)?;
    let png = encode_png(&frame)?;
    Ok((frame, png))
}

/// Composite a single photo file with `template`.
pub fn compose_file(template: &OverlayTemplate, photo: &Path) -> LayoutResult<Frame> {
    let image = load_image_file(photo)?;
    CpuCompositor::new(template)?.compose(&image)
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
