use serde::{Deserialize, Serialize};
use slog::Logger;
use sloggers::terminal::Destination;
use sloggers::types::Severity;
use sloggers::Build;

/// Controls the logger built by `build_logger`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error` or `crit`.
    pub debug_level: String,
    /// Write to stdout instead of stderr.
    pub log_to_stdout: bool,
    /// Drop all log output.
    pub disabled: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            debug_level: "info".into(),
            log_to_stdout: false,
            disabled: false,
        }
    }
}

/// Parses a log level name as accepted in `LoggerConfig::debug_level`.
pub fn parse_severity(level: &str) -> Result<Severity, String> {
    match level {
        "trace" => Ok(Severity::Trace),
        "debug" => Ok(Severity::Debug),
        "info" => Ok(Severity::Info),
        "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        "crit" => Ok(Severity::Critical),
        other => Err(format!("Unknown debug-level: {}", other)),
    }
}

/// Builds a terminal logger, or a null logger if `config.disabled` is set.
pub fn build_logger(config: &LoggerConfig) -> Result<Logger, String> {
    if config.disabled {
        return sloggers::null::NullLoggerBuilder
            .build()
            .map_err(|e| format!("Unable to build null logger: {:?}", e));
    }

    let destination = if config.log_to_stdout {
        Destination::Stdout
    } else {
        Destination::Stderr
    };

    sloggers::terminal::TerminalLoggerBuilder::new()
        .level(parse_severity(&config.debug_level)?)
        .destination(destination)
        .build()
        .map_err(|e| format!("Unable to build terminal logger: {:?}", e))
}

/// Return a logger suitable for test usage.
///
/// By default no logs will be printed, but they can be enabled via the `test_logger` feature:
///
/// ```bash
/// $ cargo test -p header_processor --features 'logging/test_logger'
/// ```
pub fn test_logger() -> Logger {
    if cfg!(feature = "test_logger") {
        sloggers::terminal::TerminalLoggerBuilder::new()
            .level(Severity::Debug)
            .build()
            .expect("Should build test_logger")
    } else {
        sloggers::null::NullLoggerBuilder
            .build()
            .expect("Should build NullLoggerBuilder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels() {
        assert_eq!(parse_severity("trace"), Ok(Severity::Trace));
        assert_eq!(parse_severity("warn"), Ok(Severity::Warning));
        assert_eq!(parse_severity("crit"), Ok(Severity::Critical));
        assert!(parse_severity("loud").is_err());
    }

    #[test]
    fn builds_loggers() {
        assert!(build_logger(&LoggerConfig::default()).is_ok());
        assert!(build_logger(&LoggerConfig {
            disabled: true,
            ..LoggerConfig::default()
        })
        .is_ok());
    }

    #[test]
    fn rejects_unknown_level() {
        let config = LoggerConfig {
            debug_level: "verbose".into(),
            ..LoggerConfig::default()
        };

        assert!(build_logger(&config).is_err());
    }

    #[test]
    fn test_logger_accepts_records() {
        let log = test_logger();
        slog::info!(log, "Test message"; "slot" => 1);
    }
}
