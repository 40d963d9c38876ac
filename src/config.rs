use serde::{Deserialize, Deserializer};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
const SOCKET_FILE: &str = "app.sock";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Application configuration, read once at startup and passed down.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub is_debug: Option<bool>,
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub mongodb: MongoConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListenConfig {
    /// `"sock"` for a unix domain socket, anything else for TCP.
    #[serde(rename = "type", default = "default_listen_type")]
    pub kind: String,
    #[serde(default = "default_bind_ip")]
    pub bind_ip: String,
    #[serde(default = "default_port", deserialize_with = "string_or_number")]
    pub port: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub host: String,
    #[serde(deserialize_with = "string_or_number")]
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub auth_db: String,
    pub collection: String,
}

/// Ports may be written quoted or bare.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(value) => value,
        Raw::Number(value) => value.to_string(),
    })
}

fn default_listen_type() -> String {
    "port".to_string()
}

fn default_bind_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> String {
    "8080".to_string()
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            kind: default_listen_type(),
            bind_ip: default_bind_ip(),
            port: default_port(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: "27017".to_string(),
            database: "service".to_string(),
            username: String::new(),
            password: String::new(),
            auth_db: String::new(),
            collection: "users".to_string(),
        }
    }
}

impl ListenConfig {
    pub fn is_socket(&self) -> bool {
        self.kind == "sock"
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_ip, self.port)
    }

    /// Socket file placed next to the running binary.
    pub fn socket_path(&self, exe: &Path) -> PathBuf {
        exe.parent().unwrap_or_else(|| Path::new(".")).join(SOCKET_FILE)
    }
}

impl Config {
    /// Reads `CONFIG_PATH` (default `config.yml`) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("📄 Reading application configuration from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Overrides file values with whatever `lookup` returns for each known key.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("IS_DEBUG") {
            self.is_debug = Some(matches!(value.as_str(), "1" | "true" | "TRUE" | "True"));
        }

        let targets = [
            ("LISTEN_TYPE", &mut self.listen.kind),
            ("BIND_IP", &mut self.listen.bind_ip),
            ("PORT", &mut self.listen.port),
            ("MONGODB_HOST", &mut self.mongodb.host),
            ("MONGODB_PORT", &mut self.mongodb.port),
            ("MONGODB_DATABASE", &mut self.mongodb.database),
            ("MONGODB_USERNAME", &mut self.mongodb.username),
            ("MONGODB_PASSWORD", &mut self.mongodb.password),
            ("MONGODB_AUTH_DB", &mut self.mongodb.auth_db),
            ("MONGODB_COLLECTION", &mut self.mongodb.collection),
        ];
        for (key, field) in targets {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }
    }

    pub fn is_debug(&self) -> bool {
        self.is_debug.unwrap_or(false)
    }
}
