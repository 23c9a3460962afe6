use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONSOLE_PATTERN: &str = "{m}{n}";
const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";

/// Builds the logging configuration: plain progress lines on stdout, plus a
/// timestamped copy in `log_file` when one is given.
///
/// # Errors
/// Returns an error if the log file's directory cannot be created or the file cannot be opened.
pub fn build_config(log_file: Option<&Path>, verbose: bool) -> Result<Config, Box<dyn std::error::Error>> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let stdout = ConsoleAppender::builder()
        .target(Target::Stdout)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let mut builder = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        // driver internals stay quiet unless something is wrong
        .logger(Logger::builder().build("mongodb", LevelFilter::Warn));
    let mut root = Root::builder().appender("stdout");
    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
            .build(path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file_appender)));
        root = root.appender("file");
    }
    Ok(builder.build(root.build(level))?)
}

/// Installs the global logger. Call once, before the first log line.
///
/// # Errors
/// Returns an error if the configuration cannot be built or a logger is already installed.
pub fn init(log_file: Option<&Path>, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(log_file, verbose)?;
    log4rs::init_config(config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_appender_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("logs").join("import.log");
        let config = build_config(Some(&log_path), true).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.appenders().len(), 2);
        assert!(log_path.exists());
    }

    #[test]
    fn stdout_only_without_log_file() {
        let config = build_config(None, false).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Info);
        assert_eq!(config.appenders().len(), 1);
    }
}
