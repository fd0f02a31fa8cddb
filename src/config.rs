//! Command-line and environment configuration
//!
//! Everything here is resolved once in `main` and then shared read-only.

use crate::adapters::services::llm::openai::OPENAI_API_BASE;
use crate::error::{AppError, Result};
use crate::ports::llm::LlmConfig;
use crate::utils::keychain::KeychainPort;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;

/// Keychain account the OpenAI key is stored under
pub const KEYCHAIN_SERVICE_TYPE: &str = "llm";
pub const KEYCHAIN_PROVIDER: &str = "openai";

const MISSING_KEY_HINT: &str =
    "Set OPENAI_API_KEY, pass --api-key, or run `vibetune key set <KEY>`";

/// Command-line arguments for vibetune
#[derive(Parser, Debug)]
#[command(name = "vibetune")]
#[command(about = "Describe how you're feeling and get a matching song")]
#[command(version)]
pub struct Args {
    /// Address the web form listens on
    #[arg(long, default_value = "127.0.0.1:8501", env = "VIBETUNE_BIND", global = true)]
    pub bind: SocketAddr,

    /// Chat model used for both stages
    #[arg(long, default_value = "gpt-4o", env = "VIBETUNE_MODEL", global = true)]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, default_value = OPENAI_API_BASE, env = "OPENAI_BASE_URL", global = true)]
    pub api_base: String,

    /// API key; falls back to the OS keychain when unset
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Per-request timeout for provider calls
    #[arg(long, default_value_t = 120, env = "VIBETUNE_TIMEOUT_SECS", global = true)]
    pub timeout_secs: u64,

    /// Sampling temperature; provider default when unset
    #[arg(long, env = "VIBETUNE_TEMPERATURE", global = true)]
    pub temperature: Option<f32>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Serve the recommendation form (default)
    Serve,

    /// Run one recommendation and print it
    Recommend {
        /// How you're feeling or what you're doing
        description: String,
    },

    /// Manage the API key stored in the OS keychain
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Store an API key
    Set { key: String },
    /// Remove the stored API key
    Delete,
    /// Show whether a key is stored (masked)
    Status,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub api_base: String,
    pub api_key: String,
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Resolve configuration, failing if no API key can be found
    pub fn resolve(args: &Args, keychain: &dyn KeychainPort) -> Result<Self> {
        let api_key = resolve_api_key(args.api_key.as_deref(), keychain)?;

        if args.timeout_secs == 0 {
            return Err(AppError::Config(
                "Timeout must be at least one second".to_string(),
            ));
        }

        if let Some(t) = args.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(AppError::Config(format!(
                    "Temperature {} is outside 0.0..=2.0",
                    t
                )));
            }
        }

        Ok(Self {
            bind: args.bind,
            api_base: args.api_base.clone(),
            api_key,
            llm: LlmConfig {
                model: args.model.clone(),
                temperature: args.temperature,
                timeout: Duration::from_secs(args.timeout_secs),
                ..LlmConfig::default()
            },
        })
    }
}

/// Explicit key first, then the keychain; never an empty key
fn resolve_api_key(explicit: Option<&str>, keychain: &dyn KeychainPort) -> Result<String> {
    if let Some(key) = explicit.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    match keychain.get_api_key(KEYCHAIN_SERVICE_TYPE, KEYCHAIN_PROVIDER) {
        Ok(key) if !key.trim().is_empty() => {
            log::info!("Using API key from OS keychain");
            Ok(key.trim().to_string())
        }
        Ok(_) => Err(AppError::Config(format!(
            "Stored API key is empty. {}",
            MISSING_KEY_HINT
        ))),
        Err(e) => {
            log::warn!("Keychain lookup failed: {}", e);
            Err(AppError::Config(format!(
                "No API key configured ({}). {}",
                e, MISSING_KEY_HINT
            )))
        }
    }
}
