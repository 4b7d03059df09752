use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use folio_shared::vcard::Variant;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

mod api;
mod app;
mod cache;
mod config;
mod editor;
mod export;
mod ui;

use api::{ApiClient, ProfileApi};
use app::{App, AppEvent};
use cache::ProfileCache;
use config::Config;

/// Log to `<cache dir>/folio/folio-tui.log`; the terminal belongs to the UI
fn init_tracing() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("folio")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("folio-tui.log"))
    else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut vcard_id: Option<String> = None;
    let mut out_dir: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--vcard" | "--out" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires an argument", args[i]);
                    std::process::exit(1);
                };
                if args[i] == "--vcard" {
                    vcard_id = Some(value.clone());
                } else {
                    out_dir = Some(PathBuf::from(value));
                }
                i += 2;
            }
            "--help" | "-h" => {
                println!("Usage: folio-tui [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --vcard <ID>   Write the portfolio vCard of a profile and exit");
                println!("  --out <DIR>    Directory for --vcard (default: $FOLIO_EXPORT_DIR)");
                println!("  --help, -h     Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                std::process::exit(1);
            }
        }
    }

    let config = Config::from_env();
    let api = ApiClient::new(&config.server_url);

    // Headless export
    if let Some(id) = vcard_id {
        let dir = out_dir.unwrap_or_else(|| config.export_dir.clone());
        match export_one(&api, &id, &dir).await {
            Ok(path) => {
                println!("Saved {}", path.display());
                return Ok(());
            }
            Err(e) => {
                eprintln!("Failed to export vCard: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(ProfileCache::new(api), config);
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Console exited with error: {:?}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn export_one(api: &ApiClient, id: &str, dir: &std::path::Path) -> Result<PathBuf> {
    let id = Uuid::parse_str(id).with_context(|| format!("'{}' is not a profile id", id))?;
    let profile = api
        .get_profile(id)
        .await
        .with_context(|| format!("Failed to fetch profile {}", id))?;

    export::write_vcard(dir, &profile, Variant::Portfolio)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App<ApiClient>,
) -> Result<()> {
    // Create event channel
    let (tx, mut rx) = mpsc::channel::<AppEvent>(100);

    // Spawn input handler
    let tx_input = tx.clone();
    tokio::spawn(async move {
        loop {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        let _ = tx_input.send(AppEvent::Key(key)).await;
                    }
                }
            }
            // Send tick events for UI refresh
            let _ = tx_input.send(AppEvent::Tick).await;
        }
    });

    // Initial profile load
    let _ = tx.send(AppEvent::LoadProfiles).await;

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if let Some(event) = rx.recv().await {
            match event {
                AppEvent::Key(key) => {
                    if app.handle_key(key, tx.clone()).await? {
                        return Ok(());
                    }
                    // Check if terminal needs clearing after external editor
                    if app.needs_terminal_clear {
                        terminal.clear()?;
                        app.needs_terminal_clear = false;
                    }
                }
                AppEvent::Tick => {
                    // Just refresh UI
                }
                AppEvent::LoadProfiles => {
                    app.set_loading(true, "Loading profiles...");
                    terminal.draw(|f| ui::draw(f, &app))?;
                    app.load_profiles().await;
                }
            }
        }
    }
}
