//! VibeTune - describe your day, get a matching song
//!
//! Startup resolves configuration once (a missing API key is fatal), builds
//! the two-stage pipeline over the OpenAI adapter and then either serves the
//! web form or runs a single recommendation from the command line.

mod adapters;
mod config;
mod domain;
mod error;
mod pipeline;
mod ports;
mod server;
mod utils;

use adapters::services::llm::OpenAIService;
use anyhow::Context;
use clap::Parser;
use config::{AppConfig, Args, Command, KeyAction, KEYCHAIN_PROVIDER, KEYCHAIN_SERVICE_TYPE};
use pipeline::Pipeline;
use ports::llm::CompletionPort;
use server::AppState;
use std::sync::Arc;
use utils::keychain::{ApiKeyStatus, KeychainManager, KeychainPort};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("vibetune=info"))
        .init();

    let args = Args::parse();
    let keychain = KeychainManager::new();

    match args.command.clone().unwrap_or(Command::Serve) {
        Command::Key { action } => manage_key(&keychain, action),
        Command::Recommend { description } => {
            let pipeline = build_pipeline(&args, &keychain)?.0;
            let recommendation = pipeline
                .run(&description)
                .await
                .context("Could not get a recommendation")?;

            let insights = &recommendation.insights;
            let song = &recommendation.song;
            println!(
                "Detected Mood: {} | Estimated Age: {}",
                insights.mood, insights.age
            );
            println!();
            println!("{} by {}", song.title, song.artist);
            println!("Album: {}", song.album);
            println!("Genre: {} | Era: {}", song.genre, song.era);
            Ok(())
        }
        Command::Serve => {
            let (pipeline, config, provider) = build_pipeline(&args, &keychain)?;
            let state = Arc::new(AppState {
                pipeline: Arc::new(pipeline),
                provider_name: provider.provider_name().to_string(),
                model: config.llm.model.clone(),
            });

            server::serve(state, config.bind)
                .await
                .context("Server error")?;
            Ok(())
        }
    }
}

/// Resolve configuration and wire the pipeline to the OpenAI adapter
fn build_pipeline(
    args: &Args,
    keychain: &dyn KeychainPort,
) -> anyhow::Result<(Pipeline, AppConfig, Arc<dyn CompletionPort>)> {
    let config = AppConfig::resolve(args, keychain).context("Failed to load configuration")?;

    log::info!(
        "Using model {} at {}",
        config.llm.model,
        config.api_base
    );

    let provider: Arc<dyn CompletionPort> = Arc::new(OpenAIService::with_base_url(
        config.api_key.clone(),
        config.api_base.clone(),
    ));
    let pipeline = Pipeline::with_provider(provider.clone(), config.llm.clone());

    Ok((pipeline, config, provider))
}

fn manage_key(keychain: &dyn KeychainPort, action: KeyAction) -> anyhow::Result<()> {
    match action {
        KeyAction::Set { key } => {
            let api_key = key.trim();
            if api_key.is_empty() {
                anyhow::bail!("API key must not be empty");
            }
            keychain.save_api_key(KEYCHAIN_SERVICE_TYPE, KEYCHAIN_PROVIDER, api_key)?;
            println!("API key saved");
        }
        KeyAction::Delete => {
            keychain.delete_api_key(KEYCHAIN_SERVICE_TYPE, KEYCHAIN_PROVIDER)?;
            println!("API key deleted");
        }
        KeyAction::Status => {
            let status = ApiKeyStatus::lookup(keychain, KEYCHAIN_SERVICE_TYPE, KEYCHAIN_PROVIDER);
            if status.has_key {
                println!(
                    "API key stored: {}",
                    status.masked_key.unwrap_or_default()
                );
            } else {
                println!("No API key stored");
            }
        }
    }
    Ok(())
}
