//! Option resolution: defaults, an optional TOML file, then command-line flags.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::errors::ImportError;

pub const DEFAULT_IMPORT_DIR: &str = ".";
pub const DEFAULT_EXTENSION: &str = ".txt.gz";
pub const DEFAULT_MONGO_HOST: &str = "127.0.0.1";
pub const DEFAULT_MONGO_PORT: u16 = 27017;
pub const DEFAULT_DB_NAME: &str = "svm_stats";
pub const DEFAULT_COLLECTION: &str = "client_stats";
pub const DEFAULT_ARCHIVE_DIR: &str = "./ARCHIVE";
pub const DEFAULT_ARCHIVE_PREFIX: &str = "ARCHIVE_";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "SVM_STATS_IMPORT_CONFIG";

#[derive(Parser, Debug, Default)]
#[command(
    name = "svm_stats_import",
    version,
    about = "Import gzip-compressed JSON stat files into MongoDB",
    long_about = None
)]
pub struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to a TOML config file; flags take precedence over its values")]
    pub config: Option<PathBuf>,
    #[arg(long, value_name = "DIRECTORY", help = "Stats import directory [default: .]")]
    pub import_dir: Option<PathBuf>,
    #[arg(long, value_name = "HOST", help = "MongoDB host (ip-address) [default: 127.0.0.1]")]
    pub mongo_host: Option<String>,
    #[arg(long, value_name = "PORT", help = "MongoDB tcp port number [default: 27017]")]
    pub mongo_port: Option<u16>,
    #[arg(long, value_name = "USERNAME", help = "MongoDB authentication username")]
    pub mongo_username: Option<String>,
    #[arg(long, value_name = "PASSWORD", help = "MongoDB authentication password")]
    pub mongo_password: Option<String>,
    #[arg(long, value_name = "NAME", help = "MongoDB database name [default: svm_stats]")]
    pub mongo_db_name: Option<String>,
    #[arg(long, value_name = "NAME", help = "MongoDB stats collection name [default: client_stats]")]
    pub mongo_collection: Option<String>,
    #[arg(long, value_name = "FILE-EXTENSION", help = "Stats file extension [default: .txt.gz]")]
    pub extension: Option<String>,
    #[arg(long, value_name = "DIRECTORY", help = "Stats archive file directory [default: ./ARCHIVE]")]
    pub archive_dir: Option<PathBuf>,
    #[arg(long, value_name = "PREFIX", help = "Stats archive file prefix [default: ARCHIVE_]")]
    pub archive_file_prefix: Option<String>,
    #[arg(long, value_name = "FILE", help = "Log output file")]
    pub log_file: Option<PathBuf>,
    #[arg(long, value_name = "SECS", help = "MongoDB connect and server-selection timeout [default: 10]")]
    pub connect_timeout_secs: Option<u64>,
    #[arg(long, help = "Output more information")]
    pub verbose: bool,
    #[arg(long, help = "Decompress and transform files without inserting or archiving them")]
    pub dry_run: bool,
}

/// Values accepted from a TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub import_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub mongo_host: Option<String>,
    pub mongo_port: Option<u16>,
    pub mongo_username: Option<String>,
    pub mongo_password: Option<String>,
    pub mongo_db_name: Option<String>,
    pub mongo_collection: Option<String>,
    pub archive_dir: Option<PathBuf>,
    pub archive_file_prefix: Option<String>,
    pub log_file: Option<PathBuf>,
    pub verbose: Option<bool>,
    pub connect_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    /// Returns `ImportError::Configuration` if the file cannot be read or contains unknown keys.
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ImportError::Configuration(format!("cannot read config file {}: {e}", path.display()))
        })?;
        toml::from_str(&text).map_err(|e| {
            ImportError::Configuration(format!("invalid config file {}: {e}", path.display()))
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).field("password", &"***").finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoOptions {
    pub host: String,
    pub port: u16,
    pub credentials: Option<Credentials>,
    pub db_name: String,
    pub collection: String,
    pub connect_timeout: Duration,
}

impl MongoOptions {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The resolved, immutable run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub import_dir: PathBuf,
    pub extension: String,
    pub mongo: MongoOptions,
    pub archive_dir: PathBuf,
    pub archive_file_prefix: String,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            import_dir: PathBuf::from(DEFAULT_IMPORT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            mongo: MongoOptions {
                host: DEFAULT_MONGO_HOST.to_string(),
                port: DEFAULT_MONGO_PORT,
                credentials: None,
                db_name: DEFAULT_DB_NAME.to_string(),
                collection: DEFAULT_COLLECTION.to_string(),
                connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            archive_file_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            log_file: None,
            verbose: false,
            dry_run: false,
        }
    }
}

impl Options {
    /// Resolves options from parsed flags, loading the config file named by
    /// `--config` or `SVM_STATS_IMPORT_CONFIG` when present.
    ///
    /// # Errors
    /// Returns `ImportError::Configuration` on an unreadable config file or invalid values.
    pub fn from_cli(cli: Cli) -> Result<Self, ImportError> {
        let path = cli.config.clone().or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let file = match path {
            Some(p) => FileConfig::load(&p)?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }

    /// Merges flags over file values over defaults, then validates the result.
    ///
    /// # Errors
    /// Returns `ImportError::Configuration` when the merged values are inconsistent.
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self, ImportError> {
        let defaults = Self::default();
        let username = cli.mongo_username.or(file.mongo_username);
        let password = cli.mongo_password.or(file.mongo_password);
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            _ => {
                return Err(ImportError::Configuration(
                    "--mongo-username and --mongo-password must be given together".to_string(),
                ));
            }
        };
        let timeout_secs = cli
            .connect_timeout_secs
            .or(file.connect_timeout_secs)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ImportError::Configuration(
                "--connect-timeout-secs must be greater than zero".to_string(),
            ));
        }
        let mongo = MongoOptions {
            host: cli.mongo_host.or(file.mongo_host).unwrap_or(defaults.mongo.host),
            port: cli.mongo_port.or(file.mongo_port).unwrap_or(defaults.mongo.port),
            credentials,
            db_name: cli.mongo_db_name.or(file.mongo_db_name).unwrap_or(defaults.mongo.db_name),
            collection: cli
                .mongo_collection
                .or(file.mongo_collection)
                .unwrap_or(defaults.mongo.collection),
            connect_timeout: Duration::from_secs(timeout_secs),
        };
        if mongo.db_name.trim().is_empty() {
            return Err(ImportError::Configuration("database name must not be empty".to_string()));
        }
        if mongo.collection.trim().is_empty() {
            return Err(ImportError::Configuration("collection name must not be empty".to_string()));
        }
        Ok(Self {
            import_dir: cli.import_dir.or(file.import_dir).unwrap_or(defaults.import_dir),
            extension: cli.extension.or(file.extension).unwrap_or(defaults.extension),
            mongo,
            archive_dir: cli.archive_dir.or(file.archive_dir).unwrap_or(defaults.archive_dir),
            archive_file_prefix: cli
                .archive_file_prefix
                .or(file.archive_file_prefix)
                .unwrap_or(defaults.archive_file_prefix),
            log_file: cli.log_file.or(file.log_file),
            verbose: cli.verbose || file.verbose.unwrap_or(false),
            dry_run: cli.dry_run,
        })
    }

    /// Human-readable lines describing the resolved configuration. Never includes the password.
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.verbose {
            lines.push("Verbose output on".to_string());
        }
        if self.dry_run {
            lines.push("Dry run: no records will be inserted and no files archived".to_string());
        }
        lines.push(format!("Stats import directory: {}", self.import_dir.display()));
        lines.push(format!("Stats file extension: {}", self.extension));
        lines.push(format!("MongoDB host: {}", self.mongo.host));
        lines.push(format!("MongoDB port: {}", self.mongo.port));
        if let Some(creds) = &self.mongo.credentials {
            lines.push(format!("MongoDB username: {}", creds.username));
        }
        lines.push(format!("MongoDB database name: {}", self.mongo.db_name));
        lines.push(format!("MongoDB collection name: {}", self.mongo.collection));
        lines.push(format!("MongoDB connect timeout: {}s", self.mongo.connect_timeout.as_secs()));
        lines.push(format!("Stats archive directory: {}", self.archive_dir.display()));
        lines.push(format!("Stats archive file prefix: {}", self.archive_file_prefix));
        if let Some(log_file) = &self.log_file {
            lines.push(format!("Log file: {}", log_file.display()));
        }
        lines
    }
}
