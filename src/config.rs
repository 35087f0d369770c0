use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tracing::warn;

/// Complete application configuration, loaded from environment variables or default values.
///
/// Only the service surface is configurable. Pallet, container, carton and
/// carrier figures as well as the capacity thresholds are fixed.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    /// Creates the service configuration from the environment, reusing an
    /// already loaded logging configuration.
    pub fn from_env(logging: LogConfig) -> Self {
        Self {
            api: ApiConfig::from_env(),
            logging,
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;
    const HOST_VAR: &'static str = "DPP_LOGISTICS_API_HOST";
    const PORT_VAR: &'static str = "DPP_LOGISTICS_API_PORT";

    fn from_env() -> Self {
        Self::from_values(env_string(Self::HOST_VAR), env_string(Self::PORT_VAR))
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Self {
        let default_ip = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
        let host_value = host.unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let (bind_ip, display_host) = match host_value.parse::<IpAddr>() {
            Ok(ip) => (ip, host_value),
            Err(err) => {
                warn!(
                    var = Self::HOST_VAR,
                    value = %host_value,
                    error = %err,
                    "could not parse host, using {}",
                    Self::DEFAULT_HOST
                );
                (default_ip, Self::DEFAULT_HOST.to_string())
            }
        };

        let port = match port {
            Some(raw) => match raw.parse::<u16>() {
                Ok(value) if value != 0 => value,
                Ok(_) => {
                    warn!(
                        var = Self::PORT_VAR,
                        "port must not be 0, using {}",
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
                Err(err) => {
                    warn!(
                        var = Self::PORT_VAR,
                        value = %raw,
                        error = %err,
                        "could not parse port, using {}",
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
            },
            None => Self::DEFAULT_PORT,
        };

        Self {
            bind_ip,
            display_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }
}

/// Configuration for log output.
///
/// Loaded before the subscriber exists, so problems are collected in
/// `issues` and reported once logging is up.
#[derive(Clone, Debug)]
pub struct LogConfig {
    filter: String,
    json: bool,
    issues: Vec<String>,
}

impl LogConfig {
    pub const DEFAULT_FILTER: &'static str = "info";
    const FILTER_VAR: &'static str = "DPP_LOGISTICS_LOG";
    const JSON_VAR: &'static str = "DPP_LOGISTICS_LOG_JSON";

    /// Reads the logging configuration from the environment.
    pub fn from_env() -> Self {
        Self::from_values(env_string(Self::FILTER_VAR), env_string(Self::JSON_VAR))
    }

    fn from_values(filter: Option<String>, json: Option<String>) -> Self {
        let mut issues = Vec::new();
        let json = match json {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                issues.push(format!(
                    "could not interpret {} ('{}') as boolean value, using plain text logs",
                    Self::JSON_VAR,
                    raw
                ));
                false
            }),
            None => false,
        };

        Self {
            filter: filter.unwrap_or_else(|| Self::DEFAULT_FILTER.to_string()),
            json,
            issues,
        }
    }

    /// Filter directive in `tracing_subscriber::EnvFilter` syntax.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Whether logs are emitted as JSON lines.
    pub fn json(&self) -> bool {
        self.json
    }

    /// Problems found while reading the configuration.
    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            warn!(var = name, error = %err, "environment access failed, using default value");
            None
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
