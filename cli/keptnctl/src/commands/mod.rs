//! CLI commands.

mod events;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keptn_api::{EventHandler, HandlerConfig};

use crate::output::OutputFormat;

/// keptnctl - query the Keptn event API.
#[derive(Debug, Parser)]
#[command(name = "keptnctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// API endpoint (overrides KEPTN_ENDPOINT).
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// API token (overrides KEPTN_API_TOKEN).
    #[arg(long, global = true)]
    token: Option<String>,

    /// Header the token is sent in (overrides KEPTN_AUTH_HEADER).
    #[arg(long, global = true)]
    auth_header: Option<String>,

    /// URI scheme, http or https (overrides KEPTN_SCHEME).
    #[arg(long, global = true)]
    scheme: Option<String>,

    /// Accept self-signed TLS certificates.
    #[arg(long, global = true)]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Query events.
    Events(events::EventsCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let ctx = CommandContext {
            config: self.handler_config()?,
            format: self.format,
        };

        match self.command {
            Commands::Events(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("keptnctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }

    /// Environment configuration with command-line overrides applied.
    fn handler_config(&self) -> Result<HandlerConfig> {
        let mut config = HandlerConfig::from_env()?;

        if let Some(endpoint) = &self.endpoint {
            config.base_url = endpoint.clone();
            // A scheme-less endpoint keeps the configured scheme.
            if endpoint.starts_with("https://") {
                config.scheme = "https".to_string();
            } else if endpoint.starts_with("http://") {
                config.scheme = "http".to_string();
            }
        }
        if let Some(token) = &self.token {
            config.auth_token = Some(token.clone());
        }
        if let Some(header) = &self.auth_header {
            config.auth_header = Some(header.clone());
        }
        if let Some(scheme) = &self.scheme {
            config.scheme = scheme.to_lowercase();
        }
        if self.insecure {
            config.transport.accept_invalid_certs = true;
        }

        config.validate().context("Invalid command-line configuration")?;
        Ok(config)
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: HandlerConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Get an event handler for the configured endpoint.
    pub fn handler(&self) -> Result<EventHandler> {
        Ok(EventHandler::authenticated(self.config.clone())?)
    }
}
