use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use glyphmorph::{
    AnimatedDisplay, DisplayConfig, Driver, FrameSequenceBuilder, FrameTrack, GlyphPair,
    InMemorySink, PngSequenceSink, RasterSurface, RecordingSurface, ScriptedInput, TRACK_LEN,
    glyph::LEGACY_ORIGIN,
    render::{FrameSink, write_png},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glyphmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a number of ticks and write the last presented frame as a PNG.
    Frame(FrameArgs),
    /// Write one PNG per tick.
    Sequence(SequenceArgs),
    /// Dump the precomputed frame track as JSON.
    Track(TrackArgs),
    /// Print every draw call of a number of ticks as JSON.
    Trace(TraceArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Display configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Glyph point file; built-in glyphs are used when omitted.
    #[arg(long)]
    glyphs: Option<PathBuf>,

    /// Key script, e.g. "0:left,3:pagedown,5:home".
    #[arg(long, default_value = "")]
    keys: String,

    /// Wait the configured tick interval between frames.
    #[arg(long)]
    realtime: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Ticks to render; the last one is written.
    #[arg(long, default_value_t = 1)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of ticks (one PNG each).
    #[arg(long, default_value_t = TRACK_LEN as u64)]
    count: u64,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct TrackArgs {
    /// Glyph point file; built-in glyphs are used when omitted.
    #[arg(long)]
    glyphs: Option<PathBuf>,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TraceArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[arg(long, default_value_t = 1)]
    ticks: u64,
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
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Track(args) => cmd_track(args),
        Command::Trace(args) => cmd_trace(args),
    }
}

struct Session {
    cfg: DisplayConfig,
    display: AnimatedDisplay,
    driver: Driver,
    input: ScriptedInput,
}

fn load_track(glyphs: Option<&Path>) -> anyhow::Result<FrameTrack> {
    let pair = match glyphs {
        Some(path) => GlyphPair::load(path, LEGACY_ORIGIN)?,
        None => GlyphPair::builtin(),
    };
    Ok(FrameSequenceBuilder::new(&pair).build())
}

fn open_session(common: &CommonArgs, ticks: u64) -> anyhow::Result<Session> {
    let cfg = match &common.config {
        Some(path) => DisplayConfig::load(path)?,
        None => DisplayConfig::default(),
    };
    let track = load_track(common.glyphs.as_deref())?;
    let display = AnimatedDisplay::from_config(track, &cfg)?;
    let input = ScriptedInput::parse(&common.keys, &cfg)?;

    let interval = if common.realtime {
        Duration::from_millis(cfg.tick_ms)
    } else {
        Duration::ZERO
    };
    let driver = Driver::new(interval).with_max_ticks(ticks);

    Ok(Session {
        cfg,
        display,
        driver,
        input,
    })
}

fn run_raster<S: FrameSink>(mut session: Session, sink: S) -> anyhow::Result<S> {
    let mut surface = RasterSurface::new(session.cfg.canvas, session.cfg.style, sink)?;
    let stats = session
        .driver
        .run(&mut session.display, &mut surface, &mut session.input)?;
    tracing::info!(ticks = stats.ticks, circles = stats.circles, "rendered");
    Ok(surface.finish()?)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if args.ticks == 0 {
        anyhow::bail!("--ticks must be at least 1");
    }
    let session = open_session(&args.common, args.ticks)?;
    let sink = run_raster(session, InMemorySink::last_only())?;
    let frame = sink
        .last()
        .context("no frame was presented (stopped before the first tick?)")?;

    ensure_parent_dir(&args.out)?;
    write_png(&args.out, frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let session = open_session(&args.common, args.count)?;
    let sink = run_raster(session, PngSequenceSink::new(&args.out_dir))?;
    eprintln!(
        "wrote {} frames to {}",
        sink.written().len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_track(args: TrackArgs) -> anyhow::Result<()> {
    let track = load_track(args.glyphs.as_deref())?;
    ensure_parent_dir(&args.out)?;
    let f = File::create(&args.out)
        .with_context(|| format!("create track file '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &track).context("serialize frame track")?;
    eprintln!(
        "wrote {} ({} frames, fingerprint {:016x})",
        args.out.display(),
        track.len(),
        track.fingerprint()
    );
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common, args.ticks)?;
    let mut surface = RecordingSurface::new();
    session
        .driver
        .run(&mut session.display, &mut surface, &mut session.input)?;
    let stdout = std::io::stdout().lock();
    serde_json::to_writer(stdout, surface.calls()).context("serialize draw calls")?;
    println!();
    Ok(())
}
