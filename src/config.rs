use std::net::SocketAddr;

use tracing::debug;

use crate::cli::{Args, Command};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    CheckWx,
    AviationWeather,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    // only set for the serve command
    pub bind_addr: Option<SocketAddr>,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let bind_addr = match &args.command {
            Command::Serve { bind } => Some(bind.parse().map_err(|source| ConfigError::BindAddress {
                addr: bind.clone(),
                source,
            })?),
            _ => None,
        };

        let config = Config {
            provider: args.provider.into(),
            api_key: args.api_key.clone().filter(|key| !key.trim().is_empty()),
            timeout_secs: args.timeout_secs,
            bind_addr,
        };
        config.validate()?;

        debug!(provider = ?config.provider, timeout_secs = config.timeout_secs, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider == Provider::CheckWx && self.api_key.is_none() {
            return Err(ConfigError::Invalid {
                message: "the checkwx provider needs --api-key or CHECKWX_API_KEY".to_string(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "timeout must be at least one second".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_for_serve() {
        let args = parse(&["metar-decode", "serve"]);
        let config = Config::from_args(&args).unwrap();

        assert_eq!(config.provider, Provider::AviationWeather);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.bind_addr, Some("0.0.0.0:3000".parse().unwrap()));
    }

    #[test]
    fn test_checkwx_requires_api_key() {
        let args = parse(&["metar-decode", "show", "CYOW", "--provider", "checkwx", "--api-key", ""]);
        let err = Config::from_args(&args).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let args = parse(&["metar-decode", "show", "CYOW", "--provider", "checkwx", "--api-key", "secret"]);
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.provider, Provider::CheckWx);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.bind_addr, None);
    }

    #[test]
    fn test_bad_bind_address() {
        let args = parse(&["metar-decode", "serve", "--bind", "nowhere"]);
        let err = Config::from_args(&args).unwrap_err();
        assert!(matches!(err, ConfigError::BindAddress { .. }));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let args = parse(&["metar-decode", "decode", "CYOW 211800Z", "--timeout-secs", "0"]);
        assert!(Config::from_args(&args).is_err());
    }
}
