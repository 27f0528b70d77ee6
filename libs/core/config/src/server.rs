use crate::{env_or_default, env_parse_nonzero_or, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// How the HTTP server accepts connections
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenType {
    /// Bind `host:port`
    Tcp,
    /// Bind a filesystem socket
    Socket,
}

impl FromStr for ListenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tcp" => Ok(ListenType::Tcp),
            "sock" | "socket" | "unix" => Ok(ListenType::Socket),
            other => Err(format!("unknown listen type '{}', expected 'tcp' or 'sock'", other)),
        }
    }
}

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub listen_type: ListenType,
    pub host: String,
    pub port: u16,
    /// Socket file used when `listen_type` is [`ListenType::Socket`]
    pub socket_path: PathBuf,
    /// Upper bound for receiving a request body
    pub read_timeout: Duration,
    /// Upper bound for producing a response
    pub write_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    /// Listen on a filesystem socket instead of TCP
    pub fn with_socket(mut self, path: impl Into<PathBuf>) -> Self {
        self.listen_type = ListenType::Socket;
        self.socket_path = path.into();
        self
    }

    pub fn with_timeouts(mut self, read: Duration, write: Duration) -> Self {
        self.read_timeout = read;
        self.write_timeout = write;
        self
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - LISTEN_TYPE: `tcp` or `sock` (default `tcp`)
    /// - HOST: defaults to Ipv4Addr::UNSPECIFIED (0.0.0.0 - all interfaces)
    /// - PORT: defaults to 8080
    /// - SOCKET_PATH: defaults to `app.sock`
    /// - READ_TIMEOUT_SECS / WRITE_TIMEOUT_SECS: default 15, must be positive
    fn from_env() -> Result<Self, ConfigError> {
        let listen_type = env_parse_or("LISTEN_TYPE", ListenType::Tcp)?;
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_or("PORT", 8080u16)?;
        let socket_path = PathBuf::from(env_or_default("SOCKET_PATH", "app.sock"));
        let read_timeout = Duration::from_secs(env_parse_nonzero_or("READ_TIMEOUT_SECS", 15)?);
        let write_timeout = Duration::from_secs(env_parse_nonzero_or("WRITE_TIMEOUT_SECS", 15)?);

        Ok(Self {
            listen_type,
            host,
            port,
            socket_path,
            read_timeout,
            write_timeout,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_type: ListenType::Tcp,
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
            socket_path: PathBuf::from("app.sock"),
            read_timeout: Duration::from_secs(15),
            write_timeout: Duration::from_secs(15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "LISTEN_TYPE",
        "HOST",
        "PORT",
        "SOCKET_PATH",
        "READ_TIMEOUT_SECS",
        "WRITE_TIMEOUT_SECS",
    ];

    #[test]
    fn test_server_config_from_env_with_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.listen_type, ListenType::Tcp);
            assert_eq!(config.address(), "0.0.0.0:8080");
            assert_eq!(config.socket_path, PathBuf::from("app.sock"));
            assert_eq!(config.read_timeout, Duration::from_secs(15));
            assert_eq!(config.write_timeout, Duration::from_secs(15));
        });
    }

    #[test]
    fn test_server_config_rejects_zero_timeouts() {
        for key in ["READ_TIMEOUT_SECS", "WRITE_TIMEOUT_SECS"] {
            temp_env::with_vars_unset(VARS, || {
                temp_env::with_var(key, Some("0"), || {
                    let err = ServerConfig::from_env().unwrap_err();
                    assert!(matches!(err, ConfigError::ParseError { key: ref k, .. } if k == key));
                });
            });
        }
    }

    #[test]
    fn test_server_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("HOST", Some("127.0.0.1")),
                ("PORT", Some("3000")),
                ("READ_TIMEOUT_SECS", Some("5")),
                ("WRITE_TIMEOUT_SECS", Some("20")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "127.0.0.1:3000");
                assert_eq!(config.read_timeout, Duration::from_secs(5));
                assert_eq!(config.write_timeout, Duration::from_secs(20));
            },
        );
    }

    #[test]
    fn test_server_config_socket_listener() {
        temp_env::with_vars(
            [
                ("LISTEN_TYPE", Some("sock")),
                ("SOCKET_PATH", Some("/tmp/users.sock")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.listen_type, ListenType::Socket);
                assert_eq!(config.socket_path, PathBuf::from("/tmp/users.sock"));
            },
        );
    }

    #[test]
    fn test_server_config_unknown_listen_type() {
        temp_env::with_var("LISTEN_TYPE", Some("carrier-pigeon"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("LISTEN_TYPE"));
        });
    }

    #[test]
    fn test_server_config_from_env_port_out_of_range() {
        temp_env::with_var("PORT", Some("99999"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_server_config_builders() {
        let config = ServerConfig::new("localhost".to_string(), 9000)
            .with_socket("/run/users.sock")
            .with_timeouts(Duration::from_secs(1), Duration::from_secs(2));
        assert_eq!(config.address(), "localhost:9000");
        assert_eq!(config.listen_type, ListenType::Socket);
        assert_eq!(config.read_timeout, Duration::from_secs(1));
        assert_eq!(config.write_timeout, Duration::from_secs(2));
    }
}
