use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::OpenOptions, io, sync::Arc, time::Duration};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repotui::config::{get_config_path, Config};
use repotui::host::LocalHost;
use repotui::model::{Outcome, Wizard};
use repotui::{utils, OpenMode};

mod app;
mod handlers;
mod ui;

use app::{App, WizardApp};

/// Repository file browser and connection manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp directory (repotui-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl, ^D/U, ^F/B, gg/G)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: <config dir>/repotui/config.yaml, then ./config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Browse the repository and open a file
    Open,
    /// Browse the repository and save into a folder
    Save,
    /// Manage repository connections
    Repositories,
}

/// Log to a file; the terminal belongs to the UI
fn init_tracing() -> Result<()> {
    let path = utils::get_debug_log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("repotui=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        init_tracing()?;
        tracing::info!("debug mode enabled");
    }

    let mut config = match get_config_path(args.config)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Config::load(&path)?
        }
        None => Config::default(),
    };

    if args.vim {
        config.vim_mode = true;
    }

    let setup = match args.command {
        Some(Command::Repositories) => Screen::Wizard(WizardApp::new(
            Wizard::new(Box::new(LocalHost::open(&config.repositories_path())?))?,
        )),
        Some(Command::Open) => Screen::Browser(App::new(&config, OpenMode::Open)?),
        Some(Command::Save) => Screen::Browser(App::new(&config, OpenMode::Save)?),
        None => Screen::Browser(App::new(&config, config.mode)?),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = match setup {
        Screen::Browser(mut app) => run_app(&mut terminal, &mut app)
            .await
            .map(|_| outcome_message(app.model.outcome.as_ref())),
        Screen::Wizard(mut app) => {
            run_wizard(&mut terminal, &mut app).map(|_| app.wizard.status.clone())
        }
    };

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(message) = result? {
        println!("{}", message);
    }
    Ok(())
}

enum Screen {
    Browser(App),
    Wizard(WizardApp),
}

fn outcome_message(outcome: Option<&Outcome>) -> Option<String> {
    outcome.map(|o| match o {
        Outcome::Opened { name } => format!("Opened {}", name),
        Outcome::Saved { path, name } => format!("Saved {} to {}", name, path),
    })
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.should_dismiss_toast() {
            app.model.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.handle_api_response(response);
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                handlers::keyboard::handle_key(app, key);
            }
        }

        // Let spawned requests make progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

fn run_wizard<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut WizardApp,
) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| {
            ui::render_wizard(f, app);
        })?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                handlers::wizard::handle_wizard_key(app, key);
            }
        }
    }
    Ok(())
}
