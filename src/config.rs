use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;

use crate::power_quality::{
    limits::{DEFAULT_DISPLACEMENT_PF, DEFAULT_FREQUENCY_HZ, DEFAULT_VOLTAGE_V},
    FormDefaults, HarmonicAnalysisEngine,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=info,power_quality_analyser=debug".to_string(),
            json: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub enable_cors: bool,
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: default_request_timeout_secs(),
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

/// Defaults applied to blank calculator fields
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub default_voltage_v: f64,
    pub default_frequency_hz: f64,
    pub default_displacement_pf: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_voltage_v: DEFAULT_VOLTAGE_V,
            default_frequency_hz: DEFAULT_FREQUENCY_HZ,
            default_displacement_pf: DEFAULT_DISPLACEMENT_PF,
        }
    }
}

impl AnalysisConfig {
    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            voltage_v: self.default_voltage_v,
            frequency_hz: self.default_frequency_hz,
            displacement_pf: self.engine().default_displacement_pf(),
        }
    }

    pub fn engine(&self) -> HarmonicAnalysisEngine {
        HarmonicAnalysisEngine::new(self.default_displacement_pf)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("PQA__").split("__"));
        Ok(figment.extract()?)
    }
}
