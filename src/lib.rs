use std::path::PathBuf;

use serde::Deserialize;

pub mod affinity;
pub mod counter;
pub mod errors;
pub mod metrics;
pub mod mutator;
pub mod patch;
pub mod review;
pub mod tls;
pub mod views;

pub use affinity::CapacityAffinity;
pub use counter::DecisionCounter;
pub use mutator::AffinityMutator;

use crate::errors::Error;

pub const ENV_PREFIX: &str = "WEBHOOK_";

/// Raw settings read from `WEBHOOK_*` environment variables.
#[derive(Deserialize, Debug, Clone)]
pub struct WebhookEnvironmentConfig {
    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    #[serde(default = "default_tls_cert_file")]
    pub tls_cert_file: String,
    #[serde(default = "default_tls_key_file")]
    pub tls_key_file: String,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_server_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_server_port() -> u16 {
    8443
}

fn default_tls_cert_file() -> String {
    "/etc/webhook/certs/tls.crt".to_owned()
}

fn default_tls_key_file() -> String {
    "/etc/webhook/certs/tls.key".to_owned()
}

// Pods with large inline specs easily exceed actix's 256KiB default
fn default_max_body_bytes() -> usize {
    3 * 1024 * 1024
}

impl Default for WebhookEnvironmentConfig {
    fn default() -> Self {
        WebhookEnvironmentConfig {
            server_host: default_server_host(),
            server_port: default_server_port(),
            tls_cert_file: default_tls_cert_file(),
            tls_key_file: default_tls_key_file(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl WebhookEnvironmentConfig {
    pub fn from_env() -> Result<Self, Error> {
        envy::prefixed(ENV_PREFIX).from_env::<Self>().map_err(Error::EnvConfig)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub tls_cert_file: PathBuf,
    pub tls_key_file: PathBuf,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env_config(env_config: WebhookEnvironmentConfig) -> Result<Self, Error> {
        if env_config.server_host.trim().is_empty() {
            return Err(Error::InvalidConfig("server_host is empty".to_owned()));
        }
        if env_config.tls_cert_file.is_empty() || env_config.tls_key_file.is_empty() {
            return Err(Error::InvalidConfig("TLS certificate and key files are required".to_owned()));
        }
        if env_config.max_body_bytes == 0 {
            return Err(Error::InvalidConfig("max_body_bytes must be greater than zero".to_owned()));
        }
        Ok(Config {
            server_host: env_config.server_host,
            server_port: env_config.server_port,
            tls_cert_file: PathBuf::from(env_config.tls_cert_file),
            tls_key_file: PathBuf::from(env_config.tls_key_file),
            max_body_bytes: env_config.max_body_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
