// stepscope: step-through playback of traced program executions

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use env_logger::{Env, Target};
use ratatui::{Terminal, backend::CrosstermBackend};

use stepscope::client::{HttpTracer, RecordedTracer, TracerClient};
use stepscope::config::{DEFAULT_PLAY_INTERVAL, DEFAULT_SERVER_URL};
use stepscope::playback::{Session, SystemClock};
use stepscope::ui::App;
use stepscope::view::ProjectionCache;

/// Replay a traced program execution step by step
#[derive(Parser, Debug)]
#[command(name = "stepscope")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Python source file to trace
    file: PathBuf,

    /// URL of the tracing service
    #[arg(short, long, env = "STEPSCOPE_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Replay a saved tracer response instead of contacting the service
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Autoplay interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_PLAY_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    /// Write log records to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let log_level = if cli.verbose { "debug" } else { "info" };
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        // Records on stderr would land in the middle of the UI
        None => env_logger::Builder::from_env(Env::default().default_filter_or("off")).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if !cli.file.exists() {
        anyhow::bail!("file '{}' not found", cli.file.display());
    }

    let tracer: Arc<dyn TracerClient> = match &cli.trace {
        Some(path) => Arc::new(RecordedTracer::new(path)),
        None => Arc::new(HttpTracer::new(&cli.server).context("failed to build HTTP client")?),
    };

    let session = Session::with_clock(
        ProjectionCache::new(),
        SystemClock::new(),
        Duration::from_millis(cli.interval_ms),
    );
    let mut app = App::new(session, tracer, cli.file.clone());
    app.submit();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}
