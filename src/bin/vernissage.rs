use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vernissage::{
    ColorScheme, ElementId, EventKind, FrameReport, HapticKind, HeadlessDocument, InputEvent,
    Millis, MotionConfig, MotionError, MotionResult, MotionRuntime, Navigator, Rect, Size, Surface,
    TransitionPhase, WaveOverlay,
};

#[derive(Parser, Debug)]
#[command(name = "vernissage", version)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive a headless page through a sequence of route changes and print a JSON frame trace.
    Simulate(SimulateArgs),
    /// Print the transition overlay SVG for a viewport.
    Overlay(OverlayArgs),
    /// Print the default configuration, or validate a configuration file.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Motion configuration JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Route to visit; repeat for a sequence.
    #[arg(long = "route", default_values_t = ["/galerie".to_string(), "/qui-suis-je".to_string()])]
    routes: Vec<String>,

    /// Route the page starts on.
    #[arg(long, default_value = "/")]
    start: String,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Simulate a touch device.
    #[arg(long, default_value_t = false)]
    touch: bool,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// Time spent on each route before the next navigation. Defaults to the transition length
    /// plus one second.
    #[arg(long)]
    dwell_ms: Option<u64>,

    /// Only keep frames that published a signal or changed phase.
    #[arg(long, default_value_t = false)]
    changes_only: bool,

    /// Write the trace here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Use the dark fill.
    #[arg(long, default_value_t = false)]
    dark: bool,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Validate this file instead of printing the defaults.
    #[arg(long)]
    check: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Overlay(args) => cmd_overlay(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Routing stand-in: accepts absolute paths and records the visit order.
#[derive(Debug, Default)]
struct SiteNavigator {
    visited: Vec<String>,
}

impl Navigator for SiteNavigator {
    fn navigate(&mut self, to: &str, surface: &mut dyn Surface) -> MotionResult<()> {
        if !to.starts_with('/') {
            return Err(MotionError::navigation(format!("'{to}' is not an absolute path")));
        }
        self.visited.push(to.to_string());
        surface.scroll_to(0.0);
        Ok(())
    }
}

struct Page {
    doc: HeadlessDocument,
    cards: Vec<ElementId>,
}

fn build_page(config: &MotionConfig, viewport: Size, touch: bool) -> Page {
    let mut doc = HeadlessDocument::new(viewport)
        .with_touch(touch)
        .with_vibration(touch);
    doc.insert(
        &config.scroll.wrapper_selector,
        Rect::new(0.0, 0.0, viewport.width, viewport.height * 4.0),
    );
    doc.insert(
        &config.scroll.content_selector,
        Rect::new(0.0, 0.0, viewport.width, viewport.height * 4.0),
    );
    let cards = (0..3u32)
        .map(|i| {
            let x = 80.0 + f64::from(i) * 380.0;
            doc.insert("a.card", Rect::new(x, 200.0, x + 320.0, 440.0))
        })
        .collect();
    Page { doc, cards }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => MotionConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => MotionConfig::default(),
    };
    anyhow::ensure!(args.step_ms > 0, "--step-ms must be > 0");
    anyhow::ensure!(
        args.width > 0.0 && args.height > 0.0,
        "viewport must have a positive size"
    );

    let dwell = args
        .dwell_ms
        .unwrap_or_else(|| config.transition.total_ms() + 1000);
    let Page { doc, cards } = build_page(&config, Size::new(args.width, args.height), args.touch);
    let mut runtime = MotionRuntime::new(config, doc, SiteNavigator::default(), args.start.clone())
        .context("build motion runtime")?;
    for &card in &cards {
        runtime.register_interactive(card);
        runtime.register_haptic(card, HapticKind::Light);
    }

    let mut trace: Vec<FrameReport> = Vec::new();
    let mut now = 0u64;
    let mut last_phase = TransitionPhase::Idle;
    runtime.mount(Millis(now));

    // Settle on the start page, then visit each route in turn.
    let segments = std::iter::once(None).chain(args.routes.iter().map(Some));
    for route in segments {
        if let Some(route) = route {
            let outcome = runtime.navigate(route, Millis(now));
            tracing::info!(route = %route, ?outcome, "navigate");
        }
        let end = now + dwell;
        while now < end {
            if runtime.phase() == TransitionPhase::Idle {
                sweep_pointer(&mut runtime, &cards, now);
            }
            let report = runtime.frame(Millis(now));
            let changed = report.phase != last_phase || !report.signals.is_empty();
            last_phase = report.phase;
            if !args.changes_only || changed {
                trace.push(report);
            }
            now += args.step_ms;
        }
    }
    runtime.shutdown();

    write_trace(&trace, args.out.as_deref())?;
    tracing::info!(
        frames = trace.len(),
        visited = ?runtime.navigator().visited,
        "simulation finished"
    );
    Ok(())
}

/// Scroll the page a little and drag the pointer across the first card.
fn sweep_pointer<S: Surface, N: Navigator>(
    runtime: &mut MotionRuntime<S, N>,
    cards: &[ElementId],
    now: u64,
) {
    let y = runtime.surface().scroll_y() + 4.0;
    runtime.surface_mut().scroll_to(y);

    let Some(&card) = cards.first() else {
        return;
    };
    let Some(rect) = runtime.surface().bounding_rect(card) else {
        return;
    };
    let phase = now % 1000;
    let kind = match phase {
        0..=15 => EventKind::PointerEnter,
        984..=999 => EventKind::PointerLeave,
        _ => EventKind::PointerMove,
    };
    let x = rect.x0 + rect.width() * (phase as f64 / 1000.0);
    let event = InputEvent::pointer(kind, Some(card), x, rect.center().y, Millis(now));
    runtime.handle_event(&event);
}

fn write_trace(trace: &[FrameReport], out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let f = std::fs::File::create(path)
                .with_context(|| format!("create trace file '{}'", path.display()))?;
            serde_json::to_writer_pretty(f, trace).context("write trace")?;
        }
        None => {
            let stdout = std::io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), trace).context("write trace")?;
            println!();
        }
    }
    Ok(())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.width > 0.0 && args.height > 0.0,
        "viewport must have a positive size"
    );
    let scheme = if args.dark {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    };
    let overlay = WaveOverlay::new(Size::new(args.width, args.height), scheme);
    println!("{}", overlay.to_svg());
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    match args.check {
        Some(path) => {
            let config = MotionConfig::from_path(&path)
                .with_context(|| format!("validate config '{}'", path.display()))?;
            println!(
                "ok: transition runs {} ms from request to complete",
                config.transition.total_ms()
            );
        }
        None => println!("{}", MotionConfig::default().to_json_pretty()?),
    }
    Ok(())
}
