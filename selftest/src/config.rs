//! Command line configuration of a test binary.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(&self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
            }
        }
    }
}

/// Options accepted by a binary generated with `run_all_tests!`.
#[derive(Debug, Clone, Parser)]
#[command(about = "Run every registered test")]
pub struct Config {
    /// Log level for diagnostics on stderr.
    #[arg(long, env = "LOG", default_value_t = LevelFilter::Warn)]
    pub log: LevelFilter,

    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Print the registered tests instead of running them.
    #[arg(long)]
    pub list: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: LevelFilter::Warn,
            color: ColorChoice::Auto,
            list: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_all_flags() {
        let config =
            Config::try_parse_from(["demo", "--log", "debug", "--color", "never", "--list"])
                .expect("valid arguments");
        assert_eq!(config.log, LevelFilter::Debug);
        assert_eq!(config.color, ColorChoice::Never);
        assert!(config.list);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(Config::try_parse_from(["demo", "--log", "loud"]).is_err());
    }

    #[test]
    fn explicit_color_choices() {
        assert!(ColorChoice::Always.enabled());
        assert!(!ColorChoice::Never.enabled());
    }
}
