use std::time::Duration;

use clap::Parser;

use crate::now_playing::Cadence;
use crate::now_playing::http::{API_PATH, DEFAULT_ADDRESS, DEFAULT_PORT};

/// Polling cadence.
#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum PollMode {
    /// Poll every --interval milliseconds and re-render every response
    Fixed,
    /// Poll faster while playing and skip unchanged responses
    Adaptive,
}

/// Status line format.
#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum OutputMode {
    /// Waybar-style JSON object per line
    Json,
    /// Bare text per line
    Plain,
}

/// Configuration parsed from command-line arguments.
#[derive(Debug, Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address of the now-playing server
    #[arg(short = 'a', long = "address", default_value = DEFAULT_ADDRESS)]
    pub address: String,
    /// Port of the now-playing server
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Full endpoint URL, overrides --address and --port
    #[arg(long = "url")]
    pub url: Option<String>,
    /// Polling cadence: "fixed" or "adaptive"
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = PollMode::Adaptive)]
    pub mode: PollMode,
    /// Fixed mode interval in milliseconds
    #[arg(long = "interval", default_value_t = 1000)]
    pub interval: u64,
    /// Adaptive mode interval while playing, in milliseconds
    #[arg(long = "playing-interval", default_value_t = 100)]
    pub playing_interval: u64,
    /// Adaptive mode interval while paused or stopped, in milliseconds
    #[arg(long = "idle-interval", default_value_t = 200)]
    pub idle_interval: u64,
    /// Adaptive mode delay after a failed poll, in milliseconds
    #[arg(long = "retry-interval", default_value_t = 250)]
    pub retry_interval: u64,
    /// Metadata format string
    #[arg(long = "format", default_value = "{title} - {artist}")]
    pub format: String,
    /// Tooltip format string (json output only)
    #[arg(long = "tooltip-format", default_value = "{title}\n{artist}\n{album}")]
    pub tooltip_format: String,
    /// Output style: "json" or "plain"
    #[arg(long = "output", value_enum, default_value_t = OutputMode::Json)]
    pub output: OutputMode,
    /// Hide elapsed/total time and percentage
    #[arg(long = "no-position", default_value_t = false, action = clap::ArgAction::SetTrue)]
    pub no_position: bool,
    /// Disable play/pause icon in output
    #[arg(long = "no-icon", default_value_t = false, action = clap::ArgAction::SetTrue)]
    pub no_icon: bool,
    /// Endpoint URL (from url, or address and port)
    #[arg(skip)]
    pub endpoint: String,
    #[arg(skip)]
    pub cadence: Cadence,
}

impl Config {
    /// Parse arguments and compute derived fields.
    pub fn parse() -> Self {
        <Self as Parser>::parse().resolve()
    }

    #[cfg(test)]
    pub fn parse_from_args(args: &[&str]) -> Self {
        <Self as Parser>::try_parse_from(args)
            .expect("valid test arguments")
            .resolve()
    }

    fn resolve(mut self) -> Self {
        self.endpoint = match &self.url {
            Some(url) => url.trim().to_string(),
            None => {
                let host = self.address.trim();
                // Bare IPv6 literals need brackets inside a URL.
                if host.contains(':') && !host.starts_with('[') {
                    format!("http://[{}]:{}{}", host, self.port, API_PATH)
                } else {
                    format!("http://{}:{}{}", host, self.port, API_PATH)
                }
            }
        };
        self.cadence = match self.mode {
            PollMode::Fixed => Cadence::Fixed {
                interval: Duration::from_millis(self.interval),
            },
            PollMode::Adaptive => Cadence::Adaptive {
                playing: Duration::from_millis(self.playing_interval),
                idle: Duration::from_millis(self.idle_interval),
                retry: Duration::from_millis(self.retry_interval),
            },
        };
        self
    }
}
