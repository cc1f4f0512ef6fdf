//! layoutpack composites a batch of photos under a fixed overlay template and
//! packages the results as a single zip archive.
//!
//! # Pipeline overview
//!
//! 1. **Collect**: paths -> [`InputFile`] list (non-images dropped)
//! 2. **Decode**: file bytes -> [`PreparedImage`] (premultiplied RGBA8)
//! 3. **Composite**: cover-fit the photo onto the canvas, overlay on top ([`CpuCompositor`])
//! 4. **Encode**: [`Frame`] -> PNG entry (plus an optional JPEG preview)
//! 5. **Package**: entries -> zip archive written to disk ([`ArchiveBuilder`])
//!
//! [`Session`] drives the whole pass, one photo at a time. A photo that fails to
//! decode is logged and skipped; the pass carries on with the next one.
#![forbid(unsafe_code)]

mod archive;
mod assets;
mod config;
mod encode;
mod foundation;
mod render;
mod session;

pub use archive::builder::{
    ArchiveBuilder, DEFAULT_ARCHIVE_NAME, DEFAULT_ENTRY_PREFIX, DEFAULT_INDEX_WIDTH, EntryNaming,
    ensure_parent_dir, entry_name,
};
pub use assets::decode::{PreparedImage, PreparedSvg, decode_image, load_image_file, parse_svg};
pub use assets::intake::{InputFile, collect_inputs, filter_images, require_non_empty};
pub use assets::template::OverlayTemplate;
pub use config::{DEFAULT_OVERLAY, LayoutConfig};
pub use encode::image_out::{DEFAULT_PREVIEW_QUALITY, encode_jpeg_preview, encode_png};
pub use foundation::core::{Affine, Canvas, DrawRect, Rect, Vec2, cover_fit};
pub use foundation::error::{LayoutError, LayoutResult};
pub use render::cpu::{CpuCompositor, Frame};
pub use session::{
    FileFailure, GenerateReport, NullObserver, Observer, Session, SessionState, compose_file,
};
