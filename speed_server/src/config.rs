use std::env;

use cognito_tools::CognitoConfig;
use gsc_common::helpers::parse_boolean_flag;
use log::*;

const DEFAULT_GSC_HOST: &str = "127.0.0.1";
const DEFAULT_GSC_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// When true, newly registered users are confirmed with the identity provider immediately, so they can log in
    /// without an email-verification round trip.
    pub auto_confirm_users: bool,
    /// Identity provider configuration. Read from the environment exactly once, here, and passed to the Cognito
    /// client at startup.
    pub cognito: CognitoConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GSC_HOST.to_string(),
            port: DEFAULT_GSC_PORT,
            auto_confirm_users: true,
            cognito: CognitoConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("GSC_HOST").ok().unwrap_or_else(|| DEFAULT_GSC_HOST.into());
        let port = env::var("GSC_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for GSC_PORT. {e} Using the default, {DEFAULT_GSC_PORT}, instead."
                    );
                    DEFAULT_GSC_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_GSC_PORT);
        let auto_confirm_users = parse_boolean_flag(env::var("GSC_AUTO_CONFIRM_USERS").ok(), true);
        let cognito = CognitoConfig::new_from_env_or_default();
        Self { host, port, auto_confirm_users, cognito }
    }
}
