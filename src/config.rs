//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-timer")]
#[command(about = "A countdown timer with a local HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Preset hours for the first timer (0-12)
    #[arg(long, default_value = "0")]
    pub hours: u32,

    /// Preset minutes for the first timer (0-59)
    #[arg(short, long, default_value = "0")]
    pub minutes: u32,

    /// Preset seconds for the first timer (0-59)
    #[arg(short, long, default_value = "0")]
    pub seconds: u32,

    /// Start the preset timer immediately
    #[arg(long)]
    pub start: bool,

    /// Interval between ticks in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Whether a preset duration was given on the command line
    pub fn has_preset(&self) -> bool {
        self.hours > 0 || self.minutes > 0 || self.seconds > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally_with_one_second_ticks() {
        let config = Config::try_parse_from(["pomodoro-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert!(!config.has_preset());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn preset_flags_are_parsed() {
        let config = Config::try_parse_from(["pomodoro-timer", "-m", "25", "--start", "-v"]).unwrap();
        assert_eq!(config.minutes, 25);
        assert!(config.start);
        assert!(config.has_preset());
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_tick_period_is_rejected() {
        assert!(Config::try_parse_from(["pomodoro-timer", "--tick-ms", "0"]).is_err());
    }
}
