use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pingwatch::{
    events, ui, App, LatencySource, Overrides, Sample, SampleCell, Sampler, Settings,
};

/// How long to wait for terminal input before checking the sample cell again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "pingwatch")]
#[command(about = "Always-on-top terminal overlay showing live network latency")]
struct Args {
    /// Host to ping [default: 1.1.1.1]
    #[arg(long)]
    host: Option<String>,

    /// Pause between probes (e.g., "500ms", "2s") [default: 500ms]
    #[arg(short, long)]
    interval: Option<String>,

    /// Upper bound on a single probe [default: 5s]
    #[arg(short, long)]
    timeout: Option<String>,

    /// Redraw interval when nothing else changes [default: 1s]
    #[arg(long)]
    tick: Option<String>,

    /// Config file (TOML, YAML or JSON) with the same keys as the flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Probe once, print the sample as JSON and exit
    #[arg(long)]
    once: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }

    let overrides = Overrides {
        host: args.host,
        interval: args.interval,
        timeout: args.timeout,
        tick: args.tick,
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;
    info!(?settings, "starting");

    if args.once {
        return run_once(&settings);
    }

    run_tui(&settings)?;
    Ok(ExitCode::SUCCESS)
}

/// Send logs to a file; the terminal belongs to the overlay.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pingwatch=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Probe once and print the result
fn run_once(settings: &Settings) -> Result<ExitCode> {
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let source = settings.ping_source();
    let sample = Sample::from_probe(rt.block_on(source.measure()));

    let report = serde_json::json!({
        "source": source.description(),
        "sample": sample,
    });
    println!("{}", serde_json::to_string(&report)?);

    Ok(if sample.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Run the overlay until the user closes it
fn run_tui(settings: &Settings) -> Result<()> {
    let cell = SampleCell::new();
    let sampler = Sampler::spawn(
        Arc::new(settings.ping_source()),
        cell.clone(),
        settings.sampler_config(),
    )?;

    // Setup terminal
    enable_raw_mode().context("failed to initialise terminal")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(e).context("failed to initialise terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(cell, settings.host.clone());

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, settings.tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    sampler.shutdown()?;
    info!("stopped");

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let mut dirty = true;

    while app.running {
        if app.refresh() {
            dirty = true;
        }
        if last_tick.elapsed() >= tick {
            dirty = true;
            last_tick = Instant::now();
        }

        if dirty {
            terminal.draw(|frame| {
                app.set_bounds(frame.area());
                ui::render(frame, app);
            })?;
            dirty = false;
        }

        if let Some(event) = events::poll_event(POLL_INTERVAL)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                // Terminal will redraw below
                Event::Resize(_, _) => {}
                _ => {}
            }
            dirty = true;
        }
    }

    Ok(())
}
