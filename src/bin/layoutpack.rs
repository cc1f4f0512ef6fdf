use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layoutpack", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite every photo with the overlay and write a zip archive.
    Generate(GenerateArgs),
    /// Composite a single photo and write it as PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overlay template (PNG/JPEG/... or SVG).
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Canvas width in pixels (requires --height).
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Canvas height in pixels (requires --width).
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Photos or directories of photos.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output archive path. Defaults to the configured archive name.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write a JPEG preview of each layout into this directory.
    #[arg(long)]
    previews: Option<PathBuf>,

    /// JPEG preview quality (1-100).
    #[arg(long)]
    preview_quality: Option<u8>,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Photo to composite.
    #[arg(long)]
    photo: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn load_config(args: &LayoutArgs) -> anyhow::Result<layoutpack::LayoutConfig> {
    let mut cfg = match &args.config {
        Some(path) => layoutpack::LayoutConfig::from_path(path)?,
        None => layoutpack::LayoutConfig::default(),
    };
    if let Some(overlay) = &args.overlay {
        cfg.overlay = overlay.clone();
    }
    if let (Some(w), Some(h)) = (args.width, args.height) {
        cfg.canvas = Some(layoutpack::Canvas::new(w, h)?);
    }
    Ok(cfg)
}

struct CliObserver {
    preview_dir: Option<PathBuf>,
}

impl layoutpack::Observer for CliObserver {
    fn status(&mut self, message: &str) {
        tracing::info!("{message}");
    }

    fn wants_previews(&self) -> bool {
        self.preview_dir.is_some()
    }

    fn preview(&mut self, _index: usize, entry_name: &str, jpeg: &[u8]) {
        let Some(dir) = &self.preview_dir else {
            return;
        };
        let path = dir.join(Path::new(entry_name).with_extension("jpg"));
        if let Err(e) = write_file(&path, jpeg) {
            tracing::warn!(path = %path.display(), error = %e, "could not write preview");
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    layoutpack::ensure_parent_dir(path)?;
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.layout)?;
    if let Some(q) = args.preview_quality {
        cfg.preview_quality = q;
    }
    cfg.validate()?;

    let files = layoutpack::collect_inputs(args.inputs.as_slice())?;
    layoutpack::require_non_empty(&files)?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.archive_name));

    let mut session = layoutpack::Session::open(cfg)?;
    session.select_files(files)?;
    tracing::info!("{}", session.status());

    let mut observer = CliObserver {
        preview_dir: args.previews,
    };
    let Some(report) = session.generate(&out, &mut observer)? else {
        anyhow::bail!("nothing to process");
    };

    if !report.failures.is_empty() {
        tracing::warn!(
            failed = report.failures.len(),
            written = report.entries.len(),
            "some photos were skipped"
        );
    }
    eprintln!("wrote {}", report.archive_path.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.layout)?;
    cfg.validate()?;

    let template = layoutpack::OverlayTemplate::load(&cfg.overlay, cfg.canvas)?;
    let frame = layoutpack::compose_file(&template, &args.photo)?;
    let png = layoutpack::encode_png(&frame)?;
    write_file(&args.out, &png)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
