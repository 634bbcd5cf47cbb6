mod dictionary;
mod game;
mod models;
mod session;
mod settings;
mod terminal;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use dictionary::Dictionary;
use session::Session;
use settings::Settings;
use terminal::{Console, TerminalRenderer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing on stderr so the board owns stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boggle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Boggle...");

    // Load configuration
    let settings = Settings::from_env()?;
    tracing::info!("Configuration loaded");

    // Load dictionary
    let dictionary = Dictionary::load(&settings.dictionary_path)
        .await
        .with_context(|| format!("Download a word list to {}", settings.dictionary_path))?;
    if dictionary.is_empty() {
        tracing::warn!("Dictionary {} has no words", settings.dictionary_path);
    }
    let dictionary = Arc::new(dictionary);

    // Prompts and pauses block, so the game runs off the async workers
    tokio::task::spawn_blocking(move || {
        let mut console = Console::stdio();
        let mut renderer = TerminalRenderer::new(std::io::stdout());
        let mut rng = rand::rng();

        Session::new(&settings, dictionary.as_ref()).run(&mut console, &mut renderer, &mut rng)
    })
    .await
    .context("game task failed")??;

    Ok(())
}
