//! booking-tui - terminal hotel-booking client
//!
//! Destination search, date and guest pickers, a booking cart, and a
//! rotating panel of sustainable travel tips.

mod clipboard;
mod config;
mod core;
mod data;
mod format;
mod frontend;
mod widgets;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use crossterm::event::KeyEvent;
use std::path::PathBuf;
use std::time::Duration;

#[derive(ClapParser)]
#[command(name = "booking-tui")]
#[command(about = "Terminal hotel-booking client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.booking-tui)
    /// Can also be set via BOOKING_TUI_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Tips file to rotate instead of the configured one
    #[arg(long, value_name = "FILE")]
    tips: Option<PathBuf>,

    /// Milliseconds between tip changes
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Milliseconds the outgoing tip stays faded
    #[arg(long)]
    fade_ms: Option<u64>,

    /// Start with the tips panel hidden
    #[arg(long)]
    no_tips: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a tips file
    ValidateTips {
        /// Tips file to validate (default: the configured tips file)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Print the tips in rotation order
    Tips,
}

fn main() -> Result<()> {
    // Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    // TUI apps can't log to stdout, so we write to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("booking-tui.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    if let Some(dir) = &cli.data_dir {
        tracing::info!("Using custom data directory: {:?}", dir);
    } else if let Ok(env_dir) = std::env::var("BOOKING_TUI_DIR") {
        tracing::info!("Using data directory from BOOKING_TUI_DIR: {}", env_dir);
    }

    // Load configuration, then apply command line overrides
    let mut config =
        config::Config::load_with_options(cli.config.as_deref(), cli.data_dir.as_deref())?;
    if let Some(interval_ms) = cli.interval_ms {
        config.tips.interval_ms = interval_ms;
    }
    if let Some(fade_ms) = cli.fade_ms {
        config.tips.fade_ms = fade_ms;
    }
    if let Some(tips) = &cli.tips {
        config.tips.file = Some(tips.clone());
    }
    if cli.no_tips {
        config.ui.show_tips = false;
    }

    // Handle subcommands
    if let Some(command) = cli.command {
        match command {
            Commands::ValidateTips { file } => {
                let path = file.unwrap_or_else(|| config.tips_path());
                std::process::exit(validate_tips(&config, &path));
            }
            Commands::Tips => {
                print_tips(&config)?;
                return Ok(());
            }
        }
    }

    config.validate()?;

    let tips = match config.load_tips() {
        Ok(tips) => tips,
        Err(e) => {
            tracing::warn!("{:#} - using built-in tips", e);
            config::embedded_tips()?
        }
    };
    let destinations = config.load_destinations()?;

    run_tui(config, destinations, tips)
}

/// Check a tips file and report. Returns the process exit code.
fn validate_tips(config: &config::Config, path: &std::path::Path) -> i32 {
    println!("Validating tips file: {:?}", path);

    let tips = match config::load_tips_file(path) {
        Ok(tips) => tips,
        Err(e) => {
            eprintln!("✗ Failed to load tips: {:#}", e);
            return 1;
        }
    };
    println!("✓ Tips loaded successfully");
    println!("  {} tips defined", tips.len());

    let mut categories: Vec<&str> = tips.iter().map(|t| t.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();
    println!("  Categories: {}", categories.join(", "));

    let mut warnings = 0;
    for (i, tip) in tips.iter().enumerate() {
        // Longer tips wrap past the panel's two lines
        if tip.text.chars().count() > 200 {
            println!(
                "⚠ Warning: tip #{} ({}) is {} characters long",
                i + 1,
                tip.category,
                tip.text.chars().count()
            );
            warnings += 1;
        }
    }
    if tips.len() == 1 {
        println!("⚠ Warning: only one tip - the panel will fade back to the same tip");
        warnings += 1;
    }

    match config.rotation_timing() {
        Ok(timing) => println!(
            "  Rotation: every {} ms, {} ms fade",
            timing.interval().as_millis(),
            timing.fade().as_millis()
        ),
        Err(e) => {
            eprintln!("✗ {:#}", e);
            return 1;
        }
    }

    if warnings == 0 {
        println!("✓ Tips file is valid with no issues");
    } else {
        println!("⚠ Found {} warning(s)", warnings);
    }
    0
}

fn print_tips(config: &config::Config) -> Result<()> {
    let tips = config.load_tips()?;
    let timing = config.rotation_timing()?;
    println!(
        "{} tips from {:?}, rotating every {} ms with a {} ms fade",
        tips.len(),
        config.tips_path(),
        timing.interval().as_millis(),
        timing.fade().as_millis()
    );
    for (i, tip) in tips.iter().enumerate() {
        println!(
            "{:>3}. {} [{}] {}",
            i + 1,
            format::progress_markers(tips.len(), i),
            tip.category,
            tip.text
        );
    }
    Ok(())
}

/// Run TUI frontend
fn run_tui(
    config: config::Config,
    destinations: Vec<data::Destination>,
    tips: Vec<data::TipItem>,
) -> Result<()> {
    // Tip rotation timers run on the tokio runtime
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config, destinations, tips))
}

/// Async TUI main loop
async fn async_run_tui(
    config: config::Config,
    destinations: Vec<data::Destination>,
    tips: Vec<data::TipItem>,
) -> Result<()> {
    use crate::core::{route_input, AppCore, RotationEvent, UiAction};
    use frontend::{Frontend, FrontendEvent, TuiFrontend};
    use tokio::sync::mpsc;

    // Timer steps from the tip rotator arrive here
    let (rotation_tx, mut rotation_rx) = mpsc::unbounded_channel::<RotationEvent>();

    // Create core application state
    let mut app_core = AppCore::new(
        config,
        destinations,
        tips,
        chrono::Local::now().date_naive(),
        rotation_tx,
        Box::new(clipboard::SystemClipboard),
    )
    .context("Failed to initialize application")?;

    // Create TUI frontend
    let mut frontend = TuiFrontend::new()?;
    frontend.set_poll_timeout(Duration::from_millis(app_core.config.ui.poll_timeout_ms));
    let (width, height) = frontend.size();
    tracing::info!(width, height, "TUI started");

    if app_core.config.ui.show_tips {
        if let Err(e) = app_core.mount_tips() {
            tracing::warn!("{:#}", e);
            app_core.ui_state.set_status(format!("{:#}", e));
        }
    }

    // Main event loop
    while app_core.running {
        // Poll for frontend events (keyboard, resize, paste)
        for event in frontend.poll_events()? {
            match event {
                FrontendEvent::Key { code, modifiers } => {
                    let key = KeyEvent::new(code, modifiers);
                    match route_input(key, app_core.ui_state.focused) {
                        UiAction::TextInput => frontend.edit_destination(&mut app_core, key),
                        action => app_core.handle_action(action),
                    }
                }
                FrontendEvent::Resize { width, height } => {
                    tracing::debug!(width, height, "Terminal resized");
                    app_core.needs_render = true;
                }
                FrontendEvent::Paste { text } => frontend.paste(&mut app_core, &text),
            }
        }

        // Apply pending tip rotation steps
        while let Ok(event) = rotation_rx.try_recv() {
            app_core.handle_rotation_event(event);
        }

        app_core.refresh_today(chrono::Local::now().date_naive());

        if app_core.needs_render {
            frontend.render(&mut app_core)?;
            app_core.needs_render = false;
        }
    }

    // Stop the rotation timer before the terminal is restored
    app_core.shutdown();
    frontend.cleanup()?;

    Ok(())
}
