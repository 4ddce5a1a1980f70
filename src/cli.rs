use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogLevel;

/// Command-line options.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(name = "jmenu", version, about = "Settings and navigation menu", long_about = None)]
pub struct Cli {
    /// Directory holding `config/`, `log/` and `assets/`.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Minimum level written to the log: none, log, warning or error.
    #[arg(long, value_name = "LEVEL", default_value = "log")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let cli = Cli::try_parse_from(["jmenu"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.log_level, LogLevel::Log);
    }

    #[test]
    fn root_and_level() {
        let cli = Cli::try_parse_from(["jmenu", "--root", "/tmp/game", "--log-level", "warning"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("/tmp/game"));
        assert_eq!(cli.log_level, LogLevel::Warning);
    }

    #[test]
    fn missing_value_and_unknown_flag_fail() {
        assert!(Cli::try_parse_from(["jmenu", "--root"]).is_err());
        assert!(Cli::try_parse_from(["jmenu", "--log-level", "loud"]).is_err());
        assert!(Cli::try_parse_from(["jmenu", "--fast"]).is_err());
    }
}
