use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use fundraffle::api::HttpFundraisingApi;
use fundraffle::auth::{IdentityProvider, MemorySessionStorage, SessionIdentity};
use fundraffle::config::AppConfig;
use fundraffle::tui::app::AppState;
use fundraffle::tui::services::Services;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();

    // Initialize logging
    let _log_guard = fundraffle::core::logging::init_tui(&config.data_dir());
    log::info!("Fundraffle v{} starting", fundraffle::VERSION);

    let api = Arc::new(HttpFundraisingApi::new(&config.api)?);
    let identity = build_identity().await;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::new(api, identity, config.api.token_options(), event_tx);
    let mut app = AppState::new(event_rx, services);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Event loop failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Fundraffle exiting");
    Ok(())
}

/// Pick the session store and import a session handed over by the environment.
async fn build_identity() -> Arc<dyn IdentityProvider> {
    #[cfg(feature = "keyring")]
    {
        use fundraffle::auth::KeyringSessionStorage;

        if KeyringSessionStorage::is_available() {
            let identity = SessionIdentity::new(Arc::new(KeyringSessionStorage::new()));
            import_session(&identity).await;
            return Arc::new(identity);
        }
        log::warn!("System keyring unavailable, keeping the session in memory");
    }

    let identity = SessionIdentity::new(Arc::new(MemorySessionStorage::new()));
    import_session(&identity).await;
    Arc::new(identity)
}

async fn import_session<S>(identity: &SessionIdentity<S>)
where
    S: fundraffle::auth::SessionStorage,
{
    match identity.import_from_env().await {
        Ok(true) => {}
        Ok(false) => log::debug!("No session in the environment"),
        Err(e) => log::warn!("Ignoring session from the environment: {e}"),
    }
}
