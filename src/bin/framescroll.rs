use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use futures::executor::LocalPool;

use framescroll::{
    CycleOutcome, FramePaths, FsFrameSource, RasterSurface, ScreenCategory, ScrollSequence,
    SequenceConfig, Viewport,
};

const CLEAR_RGBA: [u8; 4] = [0, 0, 0, 0];

#[derive(Parser, Debug)]
#[command(name = "framescroll", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the asset path of one frame.
    Path(PathArgs),
    /// Render the frame for one scroll position as a PNG.
    Frame(FrameArgs),
    /// Render evenly spaced scroll positions as numbered PNGs.
    Scrub(ScrubArgs),
}

#[derive(Parser, Debug)]
struct PathArgs {
    /// Frame index (0-based).
    #[arg(long)]
    index: usize,

    /// Use the small-screen variant.
    #[arg(long)]
    small: bool,

    /// Sequence config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// Directory frame paths are resolved against (the site's public root).
    #[arg(long)]
    frames_root: PathBuf,

    /// Sequence config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1440)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Scroll progress in [0, 1].
    #[arg(long, default_value_t = 0.0)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Print the paint (requested/drawn frame, destination rect) as JSON on stdout.
    #[arg(long)]
    report: bool,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Number of scroll positions, first and last included.
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

type CliSequence = ScrollSequence<FsFrameSource, RasterSurface>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Path(args) => cmd_path(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Scrub(args) => cmd_scrub(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<SequenceConfig> {
    match path {
        Some(p) => SequenceConfig::from_json_file(p)
            .with_context(|| format!("load sequence config '{}'", p.display())),
        None => Ok(SequenceConfig::default()),
    }
}

fn cmd_path(args: PathArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    cfg.validate()?;
    let category = if args.small {
        ScreenCategory::Small
    } else {
        ScreenCategory::Large
    };
    println!("{}", FramePaths::from_config(&cfg).path_for(args.index, category));
    Ok(())
}

/// Mount a sequence on the requested viewport and load its whole frame set.
fn load_sequence(view: &ViewArgs) -> anyhow::Result<CliSequence> {
    let cfg = read_config(view.config.as_deref())?;
    let source = FsFrameSource::new(view.frames_root.clone())?;
    let surface = RasterSurface::with_clear(1, 1, CLEAR_RGBA);
    let mut seq = ScrollSequence::new(cfg, source, surface)?;

    let mut pool = LocalPool::new();
    let cycle = seq.mount(Viewport::new(view.width, view.height));
    let report = pool.run_until(cycle);
    tracing::info!(
        loaded = report.loaded,
        failed = report.failed,
        category = ?report.category,
        "frames loaded"
    );
    if report.outcome != CycleOutcome::Completed || report.loaded == 0 {
        anyhow::bail!(
            "no frames could be loaded from '{}'",
            view.frames_root.display()
        );
    }
    Ok(seq)
}

fn render_at(seq: &mut CliSequence, progress: f64) {
    seq.on_scroll(progress);
    if let Some(drawn) = seq.on_animation_frame() {
        tracing::debug!(
            progress,
            requested = drawn.requested,
            drawn = drawn.drawn,
            "painted"
        );
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut seq = load_sequence(&args.view)?;
    render_at(&mut seq, args.progress);
    seq.surface()
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    if args.report {
        let drawn = seq.last_drawn().context("no frame was painted")?;
        println!("{}", serde_json::to_string(&drawn)?);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be > 0");
    }
    let mut seq = load_sequence(&args.view)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let last = (args.steps - 1).max(1) as f64;
    for step in 0..args.steps {
        render_at(&mut seq, step as f64 / last);
        let out = args.out_dir.join(format!("scrub_{step:04}.png"));
        seq.surface()
            .save_png(&out)
            .with_context(|| format!("write png '{}'", out.display()))?;
    }

    eprintln!("wrote {} frames to {}", args.steps, args.out_dir.display());
    Ok(())
}
