use clap::{Args, Parser};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::auth::SigningSecret;
use crate::error::ConfigError;

/// Where the signing secret comes from. Shared by every binary.
#[derive(Args, Debug, Clone, Default)]
pub struct SecretArgs {
    /// JWT secret key for authentication
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// File containing the JWT secret key
    #[arg(long, env = "JWT_SECRET_FILE")]
    pub jwt_secret_file: Option<PathBuf>,
}

impl SecretArgs {
    /// Resolve to a secret. Exactly one source must be set; file contents
    /// lose trailing whitespace.
    pub fn load(&self) -> Result<SigningSecret, ConfigError> {
        match (&self.jwt_secret, &self.jwt_secret_file) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingSecretSources),
            (None, None) => Err(ConfigError::MissingSecret),
            (Some(value), None) => SigningSecret::new(value.as_str()),
            (None, Some(path)) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::SecretFile {
                        path: path.clone(),
                        source,
                    })?;
                SigningSecret::new(contents.trim_end())
            }
        }
    }
}

/// Command line for the event sink server
#[derive(Parser, Debug, Clone)]
#[command(name = "event-sink")]
#[command(about = "Authenticated JSONL event sink")]
#[command(version)]
pub struct ServerArgs {
    /// Path to JSONL file for logging events
    #[arg(short = 'f', long, env = "JSONL_FILE", default_value = "logs.jsonl")]
    pub jsonl_file: PathBuf,

    /// Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Host to run the server on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[command(flatten)]
    pub secret: SecretArgs,
}

/// Resolved, immutable server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_path: PathBuf,
    pub secret: SigningSecret,
}

impl AppConfig {
    pub fn from_args(args: &ServerArgs) -> Result<Self, ConfigError> {
        let ip: IpAddr = args
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(args.host.clone()))?;

        Ok(AppConfig {
            bind_addr: SocketAddr::new(ip, args.port),
            log_path: args.jsonl_file.clone(),
            secret: args.secret.load()?,
        })
    }
}
