use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

/// Interactive dashboard of video game release statistics.
#[derive(Debug, Clone, Parser)]
#[command(name = "game-stats", version, about)]
pub struct Config {
    /// Delimited file (.csv or .tsv) with the games table
    #[arg(env = "GAME_STATS_DATA", default_value = "games.csv")]
    pub data: PathBuf,

    /// Verbose logging and automatic reload when the data file changes
    #[arg(long, env = "GAME_STATS_DEBUG")]
    pub debug: bool,

    /// How often the data file is checked for changes in debug mode
    #[arg(
        long,
        env = "GAME_STATS_RELOAD_INTERVAL_MS",
        value_name = "MS",
        default_value_t = 1000
    )]
    pub reload_interval_ms: u64,
}

impl Config {
    /// Default log level; `RUST_LOG` still takes precedence.
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// `None` unless debug mode is on.
    pub fn reload_interval(&self) -> Option<Duration> {
        self.debug
            .then(|| Duration::from_millis(self.reload_interval_ms.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["game-stats"]).unwrap();
        assert_eq!(config.data, PathBuf::from("games.csv"));
        assert!(!config.debug);
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert_eq!(config.reload_interval(), None);
    }

    #[test]
    fn debug_enables_reload() {
        let config = Config::try_parse_from([
            "game-stats",
            "data/vgsales.tsv",
            "--debug",
            "--reload-interval-ms",
            "250",
        ])
        .unwrap();
        assert_eq!(config.data, PathBuf::from("data/vgsales.tsv"));
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(config.reload_interval(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn rejects_non_numeric_interval() {
        assert!(Config::try_parse_from(["game-stats", "--reload-interval-ms", "soon"]).is_err());
    }
}
