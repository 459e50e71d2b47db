//! Configuration for the taskvault server binary.
//!
//! Settings are layered with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskvault/config.toml`)
//! 4. Compiled defaults

use std::path::{Path, PathBuf};

use crate::identity::domain::{AccessToken, IdentityDomainError, UserId};

/// Errors that can occur when loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// An `[[identity.tokens]]` entry is malformed.
    #[error("invalid identity token entry {index}: {source}")]
    InvalidToken {
        /// Zero-based position of the entry in the file.
        index: usize,
        /// Validation failure.
        source: IdentityDomainError,
    },

    /// A page size setting is zero.
    #[error("{setting} must be greater than zero")]
    ZeroPageSize {
        /// Name of the offending setting.
        setting: &'static str,
    },
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerConfigFile {
    server: ServerSection,
    database: DatabaseSection,
    tasks: TasksSection,
    identity: IdentitySection,
}

/// `[server]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerSection {
    bind_addr: Option<String>,
}

/// `[database]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DatabaseSection {
    url: Option<String>,
    pool_size: Option<u32>,
}

/// `[tasks]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TasksSection {
    page_size: Option<u32>,
    max_page_size: Option<u32>,
}

/// `[identity]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct IdentitySection {
    tokens: Vec<TokenEntry>,
}

/// One `[[identity.tokens]]` entry.
#[derive(Debug, serde::Deserialize)]
struct TokenEntry {
    user_id: String,
    token: String,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the taskvault server.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Multi-tenant task management server")]
pub struct ServerCliArgs {
    /// Address to bind the HTTP server to.
    #[arg(short, long, env = "TASKVAULT_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/taskvault/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// `PostgreSQL` connection URL. Tasks are kept in memory when unset.
    #[arg(long, env = "TASKVAULT_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Default number of tasks per listing page.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKVAULT_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// A bearer token bound to the user it authenticates.
#[derive(Debug, Clone)]
pub struct TokenBinding {
    /// The user the token authenticates.
    pub user_id: UserId,
    /// The bearer token itself.
    pub token: AccessToken,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to (e.g., `127.0.0.1:8000`).
    pub bind_addr: String,
    /// `PostgreSQL` connection URL, if any.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// Page size used when a listing request names none.
    pub page_size: u32,
    /// Largest page size a listing request may ask for.
    pub max_page_size: u32,
    /// Static bearer tokens accepted by the identity provider.
    pub tokens: Vec<TokenBinding>,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_owned(),
            database_url: None,
            pool_size: 8,
            page_size: 10,
            max_page_size: 100,
            tokens: Vec::new(),
            log_level: "info".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path is tried and a missing
    /// file is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or if a resolved setting is invalid.
    pub fn load(cli: &ServerCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Resolve a `ServerConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    fn resolve(cli: &ServerCliArgs, file: &ServerConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let page_size = cli
            .page_size
            .or(file.tasks.page_size)
            .unwrap_or(defaults.page_size);
        let max_page_size = file.tasks.max_page_size.unwrap_or(defaults.max_page_size);
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize {
                setting: "page_size",
            });
        }
        if max_page_size == 0 {
            return Err(ConfigError::ZeroPageSize {
                setting: "max_page_size",
            });
        }

        Ok(Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            database_url: cli
                .database_url
                .clone()
                .or_else(|| file.database.url.clone()),
            pool_size: file.database.pool_size.unwrap_or(defaults.pool_size),
            page_size: page_size.min(max_page_size),
            max_page_size,
            tokens: resolve_tokens(&file.identity.tokens)?,
            log_level: cli.log_level.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Validate `[[identity.tokens]]` entries.
fn resolve_tokens(entries: &[TokenEntry]) -> Result<Vec<TokenBinding>, ConfigError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let user_id = entry
                .user_id
                .parse::<UserId>()
                .map_err(|source| ConfigError::InvalidToken { index, source })?;
            let token = AccessToken::new(entry.token.as_str())
                .map_err(|source| ConfigError::InvalidToken { index, source })?;
            Ok(TokenBinding { user_id, token })
        })
        .collect()
}

/// Load and parse a TOML config file.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ServerConfigFile, ConfigError> {
    if let Some(explicit) = explicit_path {
        let contents = std::fs::read_to_string(explicit).map_err(|source| ConfigError::ReadFile {
            path: explicit.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ServerConfigFile::default());
    };
    let path = config_dir.join("taskvault").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ServerConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
