//! `clinic`: terminal front end for the clinic booking system.
//!
//! # Usage
//!
//! ```
//! clinic signup --username grey --role doctor   # password read from stdin
//! clinic --config ~/.config/clinic/clinic.toml
//! ```
//!
//! Logs go to `log_file` (default `clinic.log`); the terminal belongs to the
//! UI. Set `RUST_LOG` to change the level.

mod app;
mod navigator;
mod ui;

use std::{
  fs::OpenOptions,
  io,
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use clinic_core::identity::Role;
use clinic_dashboard::Backend;
use clinic_store_sqlite::{SqliteIdentity, SqliteStore};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use navigator::RouteSlot;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "clinic", version, about = "Clinic booking in the terminal")]
struct Args {
  /// Path to a TOML config file (db_path, log_file).
  #[arg(short, long, value_name = "FILE", default_value = "clinic.toml")]
  config: PathBuf,

  /// SQLite database file; overrides `db_path` from the config.
  #[arg(long, value_name = "FILE")]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create an account. The password is read from stdin.
  Signup {
    #[arg(long)]
    username: String,

    /// `doctor` or `patient`.
    #[arg(long, value_parser = parse_role)]
    role: Role,
  },
}

fn parse_role(s: &str) -> Result<Role, String> {
  Role::parse(s).ok_or_else(|| format!("unknown role `{s}` (expected doctor or patient)"))
}

// ─── Config file ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ClinicConfig {
  db_path:  PathBuf,
  log_file: PathBuf,
}

fn load_config(path: &Path) -> Result<ClinicConfig> {
  let settings = config::Config::builder()
    .set_default("db_path", "clinic.db")?
    .set_default("log_file", "clinic.log")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("CLINIC"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise config")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let cfg = load_config(&args.config)?;

  init_tracing(&expand_tilde(&cfg.log_file))?;

  // Flag overrides config file and environment.
  let db_path = expand_tilde(args.db.as_deref().unwrap_or(&cfg.db_path));
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;
  let identity = SqliteIdentity::new(&store);

  if let Some(Command::Signup { username, role }) = args.command {
    let password = read_password()?;
    let account = identity
      .sign_up(&username, &password, role)
      .await
      .context("failed to create account")?;
    println!("{}", account.user_id);
    return Ok(());
  }

  let backend = Backend::new(
    Arc::new(store),
    Arc::new(identity),
    Arc::new(RouteSlot::default()),
  );
  let mut app = App::new(backend);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn init_tracing(log_file: &Path) -> Result<()> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(log_file)
    .with_context(|| format!("failed to open log file {log_file:?}"))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.tick().await?;
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> Result<String> {
  use std::io::{BufRead, Write};
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
