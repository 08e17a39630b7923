//! Order of Movies
//!
//! Terminal version of the movie release-date ordering game. Reads player
//! commands from stdin and redraws the screen on every change.

use order_of_movies::clients::DatasetClient;
use order_of_movies::config::Config;
use order_of_movies::file_store::FileStore;
use order_of_movies::runtime::{GameRuntime, RuntimeEvent};
use order_of_movies::ui::{self, Command};

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so they stay out of the game screen
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::info!(state_path = %config.state_path.display(), "Config loaded");

    let store = FileStore::open(&config.state_path)?;
    let client = DatasetClient::new(&config)?;
    let (mut runtime, mut events) = GameRuntime::new(config.rules(), client, Box::new(store));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut notice: Option<String> = None;
    redraw(&runtime, notice.as_deref()).await;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                notice = match ui::parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => Some(ui::help().to_string()),
                    Ok(command) => ui::dispatch(&mut runtime, command)
                        .await
                        .err()
                        .map(|e| e.to_string()),
                    Err(e) => Some(e.to_string()),
                };
                redraw(&runtime, notice.as_deref()).await;
            }
            Some(event) = events.recv() => match event {
                RuntimeEvent::Redraw => redraw(&runtime, notice.as_deref()).await,
                RuntimeEvent::Alert(message) => {
                    notice = Some(format!("!! {message}"));
                    redraw(&runtime, notice.as_deref()).await;
                }
            },
        }
    }

    runtime.leave().await;
    Ok(())
}

async fn redraw(runtime: &GameRuntime, notice: Option<&str>) {
    let mut screen = String::from(CLEAR_SCREEN);
    screen.push_str(&ui::screen(runtime).await);
    if let Some(notice) = notice {
        screen.push('\n');
        screen.push_str(notice);
        screen.push('\n');
    }
    screen.push_str("\n> ");
    print!("{screen}");
    let _ = std::io::stdout().flush();
}
