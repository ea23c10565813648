//! swipereveal - swipe-to-reveal contact list in the terminal
//!
//! Drag a row with the mouse (or press h / l) to expose its action buttons.

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use swipereveal_core::{RevealPolicy, RowVariant, SwipeConfig};
use swipereveal_tui::tracing_setup::{self, TracingConfig};
use swipereveal_tui::{App, UI};
use tokio::sync::watch;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "swipereveal",
    author,
    version,
    about = "Swipe-to-reveal contact list in the terminal"
)]
struct Cli {
    /// Number of rows (overrides list.rows)
    #[arg(long)]
    rows: Option<u32>,

    /// Config file (default: ~/.swipereveal/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Collapse the previously open row when another one opens
    #[arg(long)]
    exclusive: bool,

    /// One action panel on the left instead of one per side
    #[arg(long)]
    single_sided: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Log file (default: ~/.swipereveal/swipereveal.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// File config with command-line overrides applied
    fn resolve_config(&self) -> Result<SwipeConfig> {
        let mut config = SwipeConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(rows) = self.rows {
            config.list.rows = rows;
        }
        if self.exclusive {
            config.list.reveal_policy = RevealPolicy::Exclusive;
        }
        if self.single_sided {
            config.list.variant = RowVariant::SingleSided;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| SwipeConfig::home_dir().join("swipereveal.log"));
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        log_file,
    })?;

    let config = cli.resolve_config()?;
    info!(
        rows = config.list.rows,
        policy = ?config.list.reveal_policy,
        variant = ?config.list.variant,
        "starting"
    );

    // Create app state
    let mut app = App::new(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create UI
    let mut ui = UI::new();

    // Redraw hook on the canonical row list
    let mut revisions = app.screen.rows().subscribe();

    // Main event loop
    let res = run_event_loop(&mut terminal, &mut app, &mut ui, &mut revisions).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    info!("exiting");
    Ok(())
}

async fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    ui: &mut UI,
    revisions: &mut watch::Receiver<u64>,
) -> Result<()> {
    loop {
        // Advance animations and apply settles
        app.tick(Instant::now());

        // Row list mutated since the last frame
        if revisions.has_changed().unwrap_or(false) {
            let _ = revisions.borrow_and_update();
            app.on_rows_changed();
        }

        // Render UI
        terminal.draw(|f| ui.render(f, app))?;

        // Poll for events; frame-rate timeout while something moves
        if let Some(event) = App::poll_event(app.poll_timeout())? {
            app.handle_event(event);
        }

        // Exit if requested
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
