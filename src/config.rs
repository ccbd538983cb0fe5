//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A one-minute countdown timer with play, pause and stop controls")]
#[command(version)]
pub struct Config {
    /// Expose the HTTP control API
    #[arg(long)]
    pub serve: bool,

    /// Port to bind the HTTP control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind the HTTP control API to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Run without the terminal screen (requires --serve)
    #[arg(long)]
    pub headless: bool,

    /// Write logs to this file while the terminal screen is shown
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Reject flag combinations that leave the countdown without any controls
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.headless && !self.serve {
            anyhow::bail!("--headless needs --serve, otherwise nothing can control the countdown");
        }
        Ok(())
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Whether the terminal screen owns stdout
    pub fn shows_screen(&self) -> bool {
        !self.headless
    }
}
